use std::path::Path;

use anyhow::{Context, Result};

use crate::chart::{ErrorBarChart, Output};
use crate::color::ColorBy;
use crate::data::filter::filtered_indices;
use crate::data::loader;
use crate::data::model::ObservationTable;
use crate::pipeline::{chart_for, PlotSettings};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded light curve (None until a file is loaded).
    pub table: Option<ObservationTable>,

    /// Offset, cuts, colouring and sizes used to build the chart.
    pub settings: PlotSettings,

    /// Indices of observations passing the current cuts (cached).
    pub visible_indices: Vec<usize>,

    /// Chart currently shown in the central panel.
    pub chart: Option<ErrorBarChart>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PlotSettings::default())
    }
}

impl AppState {
    pub fn new(settings: PlotSettings) -> Self {
        Self {
            table: None,
            settings,
            visible_indices: Vec::new(),
            chart: None,
            status_message: None,
        }
    }

    /// State showing a ready-made chart with no table behind it.
    pub fn with_chart(chart: ErrorBarChart) -> Self {
        Self {
            chart: Some(chart),
            ..Self::default()
        }
    }

    /// Ingest a newly loaded table and rebuild the chart.
    pub fn set_table(&mut self, table: ObservationTable) {
        self.table = Some(table);
        self.status_message = None;
        self.refresh();
    }

    /// Load `path`, keeping the current table if loading fails.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let table = loader::load(path)
            .with_context(|| format!("loading {}", path.display()))?;
        self.set_table(table);
        Ok(())
    }

    /// Recompute `visible_indices` and the chart after a settings change.
    pub fn refresh(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        self.visible_indices = filtered_indices(table, &self.settings.cuts);
        match chart_for(table, &self.settings) {
            Ok(chart) => self.chart = Some(chart),
            Err(e) => {
                log::error!("Failed to build chart: {e:#}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn set_time_offset(&mut self, offset: f64) {
        self.settings.time_offset = offset;
        self.refresh();
    }

    pub fn set_color_by(&mut self, color_by: ColorBy) {
        self.settings.color_by = color_by;
        self.refresh();
    }

    pub fn set_max_seeing(&mut self, limit: Option<f64>) {
        self.settings.cuts.max_seeing = limit;
        self.refresh();
    }

    pub fn set_max_magnitude_error(&mut self, limit: Option<f64>) {
        self.settings.cuts.max_magnitude_error = limit;
        self.refresh();
    }

    /// Write the current chart to a PNG or SVG file.
    pub fn save_chart(&self, path: &Path) -> Result<()> {
        let chart = self.chart.as_ref().context("no chart to save")?;
        chart
            .emit(&Output::File(path.to_path_buf()))
            .with_context(|| format!("saving chart to {}", path.display()))
    }
}
