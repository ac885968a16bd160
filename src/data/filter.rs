use super::model::{Observation, ObservationTable};

// ---------------------------------------------------------------------------
// Quality cuts: which observations are shown
// ---------------------------------------------------------------------------

/// Upper limits on observing conditions. A `None` limit is inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QualityCuts {
    pub max_seeing: Option<f64>,
    pub max_magnitude_error: Option<f64>,
}

impl QualityCuts {
    pub fn is_active(&self) -> bool {
        self.max_seeing.is_some() || self.max_magnitude_error.is_some()
    }

    /// An observation passes when it is within every active limit.
    /// NaN never passes an active limit.
    pub fn accepts(&self, obs: &Observation) -> bool {
        let within = |limit: Option<f64>, v: f64| limit.map_or(true, |max| v <= max);
        within(self.max_seeing, obs.seeing)
            && within(self.max_magnitude_error, obs.magnitude_error)
    }
}

/// Return indices of observations that pass all active cuts, in file order.
pub fn filtered_indices(table: &ObservationTable, cuts: &QualityCuts) -> Vec<usize> {
    table
        .iter()
        .enumerate()
        .filter(|(_, obs)| cuts.accepts(obs))
        .map(|(i, _)| i)
        .collect()
}

/// Copy of the table restricted to `indices`.
pub fn select_rows(table: &ObservationTable, indices: &[usize]) -> ObservationTable {
    let rows = indices
        .iter()
        .filter_map(|&i| table.rows().get(i).copied())
        .collect();
    ObservationTable::new(rows, table.source())
}
