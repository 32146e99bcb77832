// src/ui/widgets/mod.rs
//! Custom widgets drawing a spectrogram frame.

pub mod axis;
pub mod peaks;
pub mod spectrogram;
pub mod status;

use std::ops::Range;

use ratatui::style::Color;

use crate::spectrogram::{BinWindow, Look};

pub use axis::AxisView;
pub use peaks::PeakView;
pub use spectrogram::SpectrogramView;
pub use status::{render_help, render_status, PlaybackState};

/// Bins covered by display column `x` out of `columns`, at least one wide.
pub fn column_bins(window: BinWindow, columns: u16, x: u16) -> Range<usize> {
    let step = window.width() / columns.max(1) as f64;
    let start = (window.min + x as f64 * step).floor().max(0.0) as usize;
    let end = (window.min + (x + 1) as f64 * step).ceil() as usize;
    start..end.max(start + 1)
}

/// Largest value of `values` under each of `columns` display columns.
pub fn column_levels(values: &[f32], window: BinWindow, columns: u16) -> Vec<f32> {
    (0..columns)
        .map(|x| {
            let bins = column_bins(window, columns, x);
            let end = bins.end.min(values.len());
            let start = bins.start.min(end);
            values[start..end].iter().copied().fold(0.0, f32::max)
        })
        .collect()
}

pub(crate) fn look_color(look: &Look, value: f32) -> Color {
    let (r, g, b) = look.sample(value);
    Color::Rgb(r, g, b)
}
