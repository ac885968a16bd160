use super::model::ObservationTable;

/// Offset subtracted from Heliocentric Julian Dates before plotting.
pub const HJD_OFFSET: f64 = 2_450_000.0;

/// Time, magnitude and magnitude error as parallel series in row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightCurveColumns {
    pub time: Vec<f64>,
    pub magnitude: Vec<f64>,
    pub magnitude_error: Vec<f64>,
}

impl LightCurveColumns {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Same columns with the time axis shifted by `offset`.
    pub fn with_time_offset(self, offset: f64) -> Self {
        LightCurveColumns {
            time: normalize_time(&self.time, offset),
            ..self
        }
    }
}

/// Extract fields 0, 1 and 2 of every row.
pub fn extract_columns(table: &ObservationTable) -> LightCurveColumns {
    let n = table.len();
    let mut cols = LightCurveColumns {
        time: Vec::with_capacity(n),
        magnitude: Vec::with_capacity(n),
        magnitude_error: Vec::with_capacity(n),
    };
    for obs in table {
        cols.time.push(obs.time);
        cols.magnitude.push(obs.magnitude);
        cols.magnitude_error.push(obs.magnitude_error);
    }
    cols
}

/// `time[i] - offset` for every element.
pub fn normalize_time(time: &[f64], offset: f64) -> Vec<f64> {
    time.iter().map(|&t| t - offset).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Observation;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn sample_table() -> ObservationTable {
        ObservationTable::new(
            vec![
                Observation::from_fields([2455260.85336, 19.799, 0.117, 4.67, 685.0]),
                Observation::from_fields([2455261.80012, 19.712, 0.104, 3.98, 702.5]),
                Observation::from_fields([2455262.79120, 19.845, 0.121, 5.10, 690.1]),
            ],
            "lc.dat",
        )
    }

    #[test]
    fn test_extract_columns_preserves_rows() {
        let table = sample_table();
        let cols = extract_columns(&table);

        assert_eq!(cols.len(), table.len());
        assert_eq!(cols.magnitude.len(), table.len());
        assert_eq!(cols.magnitude_error.len(), table.len());
        for (i, obs) in table.iter().enumerate() {
            assert_eq!(cols.time[i], obs.time);
            assert_eq!(cols.magnitude[i], obs.magnitude);
            assert_eq!(cols.magnitude_error[i], obs.magnitude_error);
        }
    }

    #[test]
    fn test_extract_columns_empty_table() {
        let table = ObservationTable::new(Vec::new(), "empty.dat");
        assert!(extract_columns(&table).is_empty());
    }

    #[test]
    fn test_normalize_time_is_plain_subtraction() {
        let t = [2455260.85336, 2455261.80012, 0.0, -3.5];
        let shifted = normalize_time(&t, HJD_OFFSET);
        assert_eq!(shifted.len(), t.len());
        for (i, &v) in shifted.iter().enumerate() {
            assert_eq!(v, t[i] - HJD_OFFSET);
        }
    }

    #[test]
    fn test_normalize_time_round_trip() {
        let t = [2455260.85336, 2455261.80012, 2455262.79120];
        let back = normalize_time(&normalize_time(&t, HJD_OFFSET), -HJD_OFFSET);
        for (a, b) in t.iter().zip(back.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_example_row_normalized() {
        let cols = extract_columns(&sample_table()).with_time_offset(HJD_OFFSET);
        assert_relative_eq!(cols.time[0], 5260.85336, max_relative = 1e-12);
        assert_eq!(cols.magnitude[0], 19.799);
        assert_eq!(cols.magnitude_error[0], 0.117);
    }

    #[test]
    fn test_zero_offset_is_identity() {
        let t = vec![1.5, 2.5, 3.5];
        assert_eq!(normalize_time(&t, 0.0), t);
    }
}
