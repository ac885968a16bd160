use palette::{Hsl, IntoColor, Srgb};
use serde::Deserialize;

use crate::data::model::{Column, ObservationTable};

/// Default marker colour when no colour column is selected (steel blue).
pub const DEFAULT_RGB: [u8; 3] = [70, 130, 180];

const HUE_LOW: f32 = 240.0; // blue
const HUE_HIGH: f32 = 0.0; // red

// ---------------------------------------------------------------------------
// Colour-by selection
// ---------------------------------------------------------------------------

/// Auxiliary column that drives per-point colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBy {
    #[default]
    None,
    Seeing,
    SkyLevel,
}

impl ColorBy {
    pub const ALL: [ColorBy; 3] = [ColorBy::None, ColorBy::Seeing, ColorBy::SkyLevel];

    pub fn column(self) -> Option<Column> {
        match self {
            ColorBy::None => None,
            ColorBy::Seeing => Some(Column::Seeing),
            ColorBy::SkyLevel => Some(Column::SkyLevel),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorBy::None => "none",
            ColorBy::Seeing => "seeing",
            ColorBy::SkyLevel => "sky level",
        }
    }
}

// ---------------------------------------------------------------------------
// Gradient: value in [min, max] → colour
// ---------------------------------------------------------------------------

/// Linear blue→red hue ramp over a value range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    min: f64,
    max: f64,
}

impl Gradient {
    pub fn new(min: f64, max: f64) -> Self {
        Gradient { min, max }
    }

    /// Colour for `value`. Out-of-range values clamp; NaN maps to grey.
    pub fn rgb(&self, value: f64) -> [u8; 3] {
        if value.is_nan() {
            return [128, 128, 128];
        }
        let span = self.max - self.min;
        let t = if span.abs() < f64::EPSILON {
            0.5
        } else {
            ((value - self.min) / span).clamp(0.0, 1.0)
        } as f32;

        let hue = HUE_LOW + (HUE_HIGH - HUE_LOW) * t;
        let hsl = Hsl::new(hue, 0.75, 0.5);
        let rgb: Srgb = hsl.into_color();
        [
            (rgb.red * 255.0).round() as u8,
            (rgb.green * 255.0).round() as u8,
            (rgb.blue * 255.0).round() as u8,
        ]
    }
}

/// Per-row colours for `table`, or `None` when no colour column is chosen
/// or the column holds no finite value.
pub fn point_colors(table: &ObservationTable, color_by: ColorBy) -> Option<Vec<[u8; 3]>> {
    let column = color_by.column()?;
    let (min, max) = table.range_of(column)?;
    let gradient = Gradient::new(min, max);
    Some(table.iter().map(|o| gradient.rgb(o.get(column))).collect())
}
