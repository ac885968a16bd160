use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Line, MarkerShape, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Light curve plot (central panel)
// ---------------------------------------------------------------------------

/// Render the error-bar plot in the central panel.
///
/// Magnitudes are drawn negated so brighter points sit higher; the axis and
/// hover labels show the real values.
pub fn errorbar_plot(ui: &mut Ui, state: &AppState) {
    let chart = match &state.chart {
        Some(chart) => chart,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a light curve to plot it  (File → Open…)");
            });
            return;
        }
    };

    let style = chart.style();
    let (t_min, t_max) = chart.time_range();
    let (bright, faint) = chart.magnitude_range();

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&style.title);
        if chart.is_empty() {
            ui.label("No observations pass the quality cuts.");
        }
    });

    Plot::new("lightcurve_plot")
        .x_axis_label(style.x_label.clone())
        .y_axis_label(style.y_label.clone())
        .y_axis_formatter(|mark, _range| format!("{:.2}", -mark.value))
        .label_formatter(|_name, value| format!("t = {:.5}\nmag = {:.3}", value.x, -value.y))
        .include_x(t_min)
        .include_x(t_max)
        .include_y(-faint)
        .include_y(-bright)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // Markers grouped by colour so each colour is one series.
            let mut markers: BTreeMap<[u8; 3], Vec<[f64; 2]>> = BTreeMap::new();

            for p in chart.points() {
                let [r, g, b] = p.rgb;
                let color = Color32::from_rgb(r, g, b);

                let bar: PlotPoints = [
                    [p.time, -(p.magnitude + p.error)],
                    [p.time, -(p.magnitude - p.error)],
                ]
                .into_iter()
                .collect();
                plot_ui.line(Line::new(bar).color(color.gamma_multiply(0.7)).width(1.0));

                markers.entry(p.rgb).or_default().push([p.time, -p.magnitude]);
            }

            for ([r, g, b], pts) in markers {
                let points: PlotPoints = pts.into_iter().collect();
                plot_ui.points(
                    Points::new(points)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(2.5)
                        .color(Color32::from_rgb(r, g, b)),
                );
            }
        });
}
