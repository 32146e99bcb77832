// src/spectrogram/axis.rs
//! Frequency axis ticks for the current zoom window.

use super::zoom::BinWindow;

/// Default number of labelled ticks across the display.
pub const DEFAULT_TICKS: usize = 9;

/// One labelled tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    /// Position across the display, in `(0, 1)`.
    pub position: f64,
    /// Frequency under the tick.
    pub hz: f64,
    pub label: String,
}

/// Evenly spaced ticks inside `window`, labelled in Hz at `resolution` Hz/bin.
pub fn ticks(window: BinWindow, resolution: f64, count: usize) -> Vec<AxisTick> {
    if count == 0 {
        return Vec::new();
    }
    let step_bins = window.width() / (count + 1) as f64;
    let step_hz = step_bins * resolution;
    let precision = if step_hz < 1.0 {
        3
    } else if step_hz < 10.0 {
        2
    } else {
        0
    };

    (1..=count)
        .map(|l| {
            let hz = (window.min + l as f64 * step_bins) * resolution;
            AxisTick {
                position: l as f64 / (count + 1) as f64,
                hz,
                label: format!("{:.*}", precision, hz),
            }
        })
        .collect()
}
