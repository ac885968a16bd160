use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Column – one of the five fields of an observation line
// ---------------------------------------------------------------------------

/// The five fields of a light curve row, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Time,
    Magnitude,
    MagnitudeError,
    Seeing,
    SkyLevel,
}

impl Column {
    /// All columns in their on-disk order.
    pub const ALL: [Column; 5] = [
        Column::Time,
        Column::Magnitude,
        Column::MagnitudeError,
        Column::Seeing,
        Column::SkyLevel,
    ];

    /// Zero-based field index within a line.
    pub fn index(self) -> usize {
        match self {
            Column::Time => 0,
            Column::Magnitude => 1,
            Column::MagnitudeError => 2,
            Column::Seeing => 3,
            Column::SkyLevel => 4,
        }
    }

    /// Header names accepted for this column in CSV input (lower-case).
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Time => &["time", "hjd", "jd"],
            Column::Magnitude => &["magnitude", "mag"],
            Column::MagnitudeError => &["magnitude_error", "mag_err", "magerr", "err"],
            Column::Seeing => &["seeing"],
            Column::SkyLevel => &["sky_level", "sky"],
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Column::Time => "time",
            Column::Magnitude => "magnitude",
            Column::MagnitudeError => "magnitude error",
            Column::Seeing => "seeing",
            Column::SkyLevel => "sky level",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the light curve file
// ---------------------------------------------------------------------------

/// A single photometric measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Heliocentric Julian Date (days).
    pub time: f64,
    pub magnitude: f64,
    pub magnitude_error: f64,
    /// Seeing at exposure time (arcsec).
    pub seeing: f64,
    pub sky_level: f64,
}

impl Observation {
    /// Build from the five fields in file order.
    pub fn from_fields(fields: [f64; 5]) -> Self {
        let [time, magnitude, magnitude_error, seeing, sky_level] = fields;
        Observation {
            time,
            magnitude,
            magnitude_error,
            seeing,
            sky_level,
        }
    }

    /// Value of the given field.
    pub fn get(&self, column: Column) -> f64 {
        match column {
            Column::Time => self.time,
            Column::Magnitude => self.magnitude,
            Column::MagnitudeError => self.magnitude_error,
            Column::Seeing => self.seeing,
            Column::SkyLevel => self.sky_level,
        }
    }
}

// ---------------------------------------------------------------------------
// ObservationTable – the complete loaded light curve
// ---------------------------------------------------------------------------

/// Rows in file order. Built once by the loader and never mutated.
#[derive(Debug, Clone)]
pub struct ObservationTable {
    rows: Vec<Observation>,
    source: PathBuf,
}

impl ObservationTable {
    pub fn new(rows: Vec<Observation>, source: impl Into<PathBuf>) -> Self {
        ObservationTable {
            rows,
            source: source.into(),
        }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.rows.iter()
    }

    /// File the table was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// `(min, max)` of a column, ignoring NaN. `None` when no finite value exists.
    pub fn range_of(&self, column: Column) -> Option<(f64, f64)> {
        self.rows
            .iter()
            .map(|o| o.get(column))
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

impl<'a> IntoIterator for &'a ObservationTable {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_indices_follow_file_order() {
        for (i, col) in Column::ALL.iter().enumerate() {
            assert_eq!(col.index(), i);
        }
    }

    #[test]
    fn test_observation_field_access() {
        let obs = Observation::from_fields([2455260.85336, 19.799, 0.117, 4.67, 685.0]);
        assert_eq!(obs.get(Column::Time), 2455260.85336);
        assert_eq!(obs.get(Column::Magnitude), 19.799);
        assert_eq!(obs.get(Column::MagnitudeError), 0.117);
        assert_eq!(obs.get(Column::Seeing), 4.67);
        assert_eq!(obs.get(Column::SkyLevel), 685.0);
    }

    #[test]
    fn test_range_skips_nan() {
        let table = ObservationTable::new(
            vec![
                Observation::from_fields([1.0, 18.0, 0.1, 2.0, 100.0]),
                Observation::from_fields([2.0, f64::NAN, 0.1, 3.5, 100.0]),
                Observation::from_fields([3.0, 19.5, 0.1, 1.5, 100.0]),
            ],
            "lc.dat",
        );
        assert_eq!(table.range_of(Column::Magnitude), Some((18.0, 19.5)));
        assert_eq!(table.range_of(Column::Seeing), Some((1.5, 3.5)));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_empty_table_has_no_range() {
        let table = ObservationTable::new(Vec::new(), "empty.dat");
        assert!(table.is_empty());
        assert_eq!(table.range_of(Column::Time), None);
    }
}
