//! Load → filter → extract/normalize, shared by the CLI and the viewer.

use std::path::Path;

use crate::chart::{ChartStyle, ErrorBarChart, RenderError};
use crate::color::{point_colors, ColorBy};
use crate::config::ViewerConfig;
use crate::data::columns::{extract_columns, LightCurveColumns};
use crate::data::filter::{filtered_indices, select_rows, QualityCuts};
use crate::data::model::ObservationTable;

/// Everything that turns a table into a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSettings {
    pub time_offset: f64,
    pub cuts: QualityCuts,
    pub color_by: ColorBy,
    /// Chart title; the file stem when unset.
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self::from(&ViewerConfig::default())
    }
}

impl From<&ViewerConfig> for PlotSettings {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            time_offset: config.time_offset,
            cuts: config.quality_cuts(),
            color_by: config.color_by,
            title: config.title.clone(),
            width: config.width,
            height: config.height,
        }
    }
}

/// Axis label for times shifted by `offset`.
pub fn time_axis_label(offset: f64) -> String {
    if offset == 0.0 {
        "HJD".to_string()
    } else {
        format!("HJD - {offset}")
    }
}

/// Rows passing the cuts, as normalized columns plus the style to draw them with.
pub fn prepare(table: &ObservationTable, settings: &PlotSettings) -> (LightCurveColumns, ChartStyle) {
    let visible = if settings.cuts.is_active() {
        let indices = filtered_indices(table, &settings.cuts);
        log::debug!(
            "{} of {} observations pass quality cuts",
            indices.len(),
            table.len()
        );
        select_rows(table, &indices)
    } else {
        table.clone()
    };

    let cols = extract_columns(&visible).with_time_offset(settings.time_offset);
    if cols.is_empty() {
        log::warn!("No observations left to plot from {}", table.source().display());
    } else {
        log::debug!("Plotting {} observations", cols.len());
    }

    let style = ChartStyle {
        title: settings
            .title
            .clone()
            .unwrap_or_else(|| default_title(table.source())),
        x_label: time_axis_label(settings.time_offset),
        width: settings.width,
        height: settings.height,
        point_colors: point_colors(&visible, settings.color_by),
        ..ChartStyle::default()
    };

    (cols, style)
}

/// Chart for the interactive viewer; nothing is emitted.
pub fn chart_for(table: &ObservationTable, settings: &PlotSettings) -> Result<ErrorBarChart, RenderError> {
    let (cols, style) = prepare(table, settings);
    ErrorBarChart::new(&cols.time, &cols.magnitude, &cols.magnitude_error)?.with_style(style)
}

fn default_title(source: &Path) -> String {
    source
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "Light curve".to_string())
}
