//! Chart module - error-bar chart handle and its two renderers.
//!
//! Magnitudes are plotted negated by both renderers so that brighter (smaller)
//! values sit higher; tick and hover labels negate them back.

mod static_render;

use std::path::PathBuf;

use thiserror::Error;

pub use static_render::save;

use crate::color::DEFAULT_RGB;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("series lengths differ: {time} times, {magnitude} magnitudes, {error} errors")]
    LengthMismatch {
        time: usize,
        magnitude: usize,
        error: usize,
    },
    #[error("{len} point colours for {points} points")]
    ColorMismatch { len: usize, points: usize },
    #[error("drawing chart: {0}")]
    Draw(String),
    #[error("unsupported chart format '.{0}' (use .png or .svg)")]
    UnsupportedFormat(String),
    #[error("chart window: {0}")]
    Window(String),
}

/// Where an emitted chart goes.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Interactive window; blocks until it is closed.
    Window,
    /// PNG or SVG file, chosen by extension.
    File(PathBuf),
}

/// One plotted observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub time: f64,
    pub magnitude: f64,
    pub error: f64,
    pub rgb: [u8; 3],
}

/// Caller-controlled presentation of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Pixel size used for file output.
    pub width: u32,
    pub height: u32,
    /// One colour per point, or `None` for a single colour.
    pub point_colors: Option<Vec<[u8; 3]>>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: "Light curve".to_string(),
            x_label: "Time (days)".to_string(),
            y_label: "Magnitude".to_string(),
            width: 1024,
            height: 640,
            point_colors: None,
        }
    }
}

/// Handle to a rendered error-bar chart. Customise with the `with_*`
/// builders and emit again with [`ErrorBarChart::emit`].
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBarChart {
    time: Vec<f64>,
    magnitude: Vec<f64>,
    magnitude_error: Vec<f64>,
    style: ChartStyle,
}

impl ErrorBarChart {
    /// Build a chart from three equal-length series.
    pub fn new(
        time: &[f64],
        magnitude: &[f64],
        magnitude_error: &[f64],
    ) -> Result<Self, RenderError> {
        if time.len() != magnitude.len() || time.len() != magnitude_error.len() {
            return Err(RenderError::LengthMismatch {
                time: time.len(),
                magnitude: magnitude.len(),
                error: magnitude_error.len(),
            });
        }
        Ok(Self {
            time: time.to_vec(),
            magnitude: magnitude.to_vec(),
            magnitude_error: magnitude_error.to_vec(),
            style: ChartStyle::default(),
        })
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Replace the whole style. Point colours must match the point count.
    pub fn with_style(self, style: ChartStyle) -> Result<Self, RenderError> {
        let ChartStyle {
            title,
            x_label,
            y_label,
            width,
            height,
            point_colors,
        } = style;
        self.with_title(title)
            .with_x_label(x_label)
            .with_y_label(y_label)
            .with_size(width, height)
            .with_point_colors(point_colors)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.style.title = title.into();
        self
    }

    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.style.x_label = label.into();
        self
    }

    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.style.y_label = label.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.style.width = width;
        self.style.height = height;
        self
    }

    pub fn with_point_colors(mut self, colors: Option<Vec<[u8; 3]>>) -> Result<Self, RenderError> {
        if let Some(c) = &colors {
            if c.len() != self.len() {
                return Err(RenderError::ColorMismatch {
                    len: c.len(),
                    points: self.len(),
                });
            }
        }
        self.style.point_colors = colors;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Points with finite time and magnitude. A non-finite error draws as zero.
    pub fn points(&self) -> impl Iterator<Item = ChartPoint> + '_ {
        (0..self.len())
            .filter(|&i| self.time[i].is_finite() && self.magnitude[i].is_finite())
            .map(|i| {
                let err = self.magnitude_error[i];
                ChartPoint {
                    time: self.time[i],
                    magnitude: self.magnitude[i],
                    error: if err.is_finite() { err.abs() } else { 0.0 },
                    rgb: self
                        .style
                        .point_colors
                        .as_ref()
                        .map_or(DEFAULT_RGB, |c| c[i]),
                }
            })
    }

    /// Padded `(min, max)` of the time axis.
    pub fn time_range(&self) -> (f64, f64) {
        let bounds = self.points().fold(None, |acc, p| extend(acc, p.time, p.time));
        pad(bounds, 0.02)
    }

    /// Padded `(brightest, faintest)` magnitude including error bars.
    pub fn magnitude_range(&self) -> (f64, f64) {
        let bounds = self.points().fold(None, |acc, p| {
            extend(acc, p.magnitude - p.error, p.magnitude + p.error)
        });
        pad(bounds, 0.05)
    }

    /// Emit the chart to `output`.
    pub fn emit(&self, output: &Output) -> Result<(), RenderError> {
        match output {
            Output::File(path) => {
                save(self, path)?;
                log::info!("Wrote chart with {} points to {}", self.len(), path.display());
                Ok(())
            }
            Output::Window => crate::app::run(crate::state::AppState::with_chart(self.clone()))
                .map_err(|e| RenderError::Window(e.to_string())),
        }
    }
}

fn extend(acc: Option<(f64, f64)>, lo: f64, hi: f64) -> Option<(f64, f64)> {
    match acc {
        None => Some((lo, hi)),
        Some((a, b)) => Some((a.min(lo), b.max(hi))),
    }
}

fn pad(bounds: Option<(f64, f64)>, fraction: f64) -> (f64, f64) {
    match bounds {
        None => (0.0, 1.0),
        Some((lo, hi)) => {
            let span = hi - lo;
            let margin = if span > 0.0 { span * fraction } else { 0.5 };
            (lo - margin, hi + margin)
        }
    }
}

/// Build an error-bar chart from the three series, apply `style` and emit it
/// to `output`.
///
/// Error bars are vertical, points are not connected, and the magnitude axis
/// is inverted. The returned handle can be customised and emitted again.
pub fn render_errorbar_chart(
    time: &[f64],
    magnitude: &[f64],
    magnitude_error: &[f64],
    style: &ChartStyle,
    output: &Output,
) -> Result<ErrorBarChart, RenderError> {
    let chart = ErrorBarChart::new(time, magnitude, magnitude_error)?.with_style(style.clone())?;
    chart.emit(output)?;
    Ok(chart)
}
