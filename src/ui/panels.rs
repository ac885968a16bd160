use eframe::egui::{self, Color32, DragValue, RichText, Ui};

use crate::color::ColorBy;
use crate::data::model::Column;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – offset, quality cuts, colouring
// ---------------------------------------------------------------------------

/// Render the left settings panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Settings");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No light curve loaded.");
        return;
    };
    let seeing_range = table.range_of(Column::Seeing);
    let error_range = table.range_of(Column::MagnitudeError);

    // ---- Time offset ----
    ui.strong("Time offset (days)");
    let mut offset = state.settings.time_offset;
    if ui
        .add(DragValue::new(&mut offset).speed(1.0).max_decimals(1))
        .changed()
    {
        state.set_time_offset(offset);
    }
    ui.separator();

    // ---- Quality cuts ----
    ui.strong("Quality cuts");
    if let Some(limit) = limit_widget(ui, "Max seeing", state.settings.cuts.max_seeing, seeing_range) {
        state.set_max_seeing(limit);
    }
    if let Some(limit) = limit_widget(
        ui,
        "Max mag error",
        state.settings.cuts.max_magnitude_error,
        error_range,
    ) {
        state.set_max_magnitude_error(limit);
    }
    ui.separator();

    // ---- Colour-by selector ----
    ui.strong("Color by");
    let current = state.settings.color_by;
    egui::ComboBox::from_id_salt("color_by")
        .selected_text(current.label())
        .show_ui(ui, |ui: &mut Ui| {
            for option in ColorBy::ALL {
                if ui.selectable_label(current == option, option.label()).clicked() {
                    state.set_color_by(option);
                }
            }
        });
}

/// Checkbox plus value for an optional upper limit. Returns the new limit
/// when the user changed it.
fn limit_widget(
    ui: &mut Ui,
    label: &str,
    current: Option<f64>,
    data_range: Option<(f64, f64)>,
) -> Option<Option<f64>> {
    let mut enabled = current.is_some();
    // Start a fresh limit at the largest value so nothing disappears at once.
    let mut value = current.or(data_range.map(|(_, hi)| hi)).unwrap_or(0.0);
    let mut changed = false;

    ui.horizontal(|ui: &mut Ui| {
        changed |= ui.checkbox(&mut enabled, label).changed();
        let drag = DragValue::new(&mut value).speed(0.01).range(0.0..=f64::MAX);
        changed |= ui.add_enabled(enabled, drag).changed();
    });

    changed.then(|| enabled.then_some(value))
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.chart.is_some(), egui::Button::new("Save chart…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} observations loaded, {} visible",
                table.len(),
                state.visible_indices.len()
            ));
        } else if let Some(chart) = &state.chart {
            ui.label(format!("{} points", chart.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open light curve")
        .add_filter("Light curves", &["dat", "txt", "csv"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save chart")
        .add_filter("PNG image", &["png"])
        .add_filter("SVG image", &["svg"])
        .set_file_name("lightcurve.png")
        .save_file();

    if let Some(path) = file {
        match state.save_chart(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to save chart: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
