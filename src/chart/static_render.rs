//! Static Chart Renderer
//! Writes an error-bar chart to a PNG or SVG file with plotters.

use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use super::{ErrorBarChart, RenderError};

/// Cap width of each error bar, in pixels.
const CAP_WIDTH: u32 = 6;

/// Write `chart` to `path`. The extension picks the backend.
pub fn save(chart: &ErrorBarChart, path: &Path) -> Result<(), RenderError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let style = chart.style();
    let size = (style.width, style.height);

    match ext.as_str() {
        "png" => draw(chart, BitMapBackend::new(path, size).into_drawing_area()),
        "svg" => draw(chart, SVGBackend::new(path, size).into_drawing_area()),
        other => Err(RenderError::UnsupportedFormat(other.to_string())),
    }
}

fn draw<DB: DrawingBackend>(
    chart: &ErrorBarChart,
    root: DrawingArea<DB, Shift>,
) -> Result<(), RenderError> {
    root.fill(&WHITE).map_err(draw_err)?;

    let style = chart.style();
    let (t_min, t_max) = chart.time_range();
    let (bright, faint) = chart.magnitude_range();

    // Negated magnitudes: -faint is the bottom of the axis.
    let mut ctx = ChartBuilder::on(&root)
        .caption(style.title.as_str(), ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(t_min..t_max, -faint..-bright)
        .map_err(draw_err)?;

    ctx.configure_mesh()
        .x_desc(style.x_label.as_str())
        .y_desc(style.y_label.as_str())
        .x_label_formatter(&|t| format!("{t:.1}"))
        .y_label_formatter(&|m| format!("{:.2}", -m))
        .draw()
        .map_err(draw_err)?;

    ctx.draw_series(chart.points().map(|p| {
        let [r, g, b] = p.rgb;
        ErrorBar::new_vertical(
            p.time,
            -(p.magnitude + p.error),
            -p.magnitude,
            -(p.magnitude - p.error),
            RGBColor(r, g, b).filled(),
            CAP_WIDTH,
        )
    }))
    .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

fn draw_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Draw(e.to_string())
}
