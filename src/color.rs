use eframe::egui::Color32;
use palette::Srgb;
use plotters::style::RGBColor;

use crate::data::model::Partition;

// ---------------------------------------------------------------------------
// Partition colours
// ---------------------------------------------------------------------------

/// Alpha used for individual scatter markers.
pub const SCATTER_ALPHA: f32 = 0.3;

/// Edge / marker colour of a partition.
pub fn partition_color(partition: Partition) -> Srgb<u8> {
    let rgb: Srgb<f32> = match partition {
        Partition::Train => Srgb::new(0.0, 0.447, 0.741),
        Partition::Valid => Srgb::new(0.850, 0.325, 0.098),
    };
    rgb.into_format()
}

/// Colour of the global mean reference line and its label.
pub fn mean_line_color() -> Srgb<u8> {
    Srgb::new(255, 0, 0)
}

// ---------------------------------------------------------------------------
// Backend conversions
// ---------------------------------------------------------------------------

pub fn to_color32(color: Srgb<u8>) -> Color32 {
    Color32::from_rgb(color.red, color.green, color.blue)
}

pub fn to_color32_alpha(color: Srgb<u8>, alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.red, color.green, color.blue, a)
}

pub fn to_rgb_color(color: Srgb<u8>) -> RGBColor {
    RGBColor(color.red, color.green, color.blue)
}
