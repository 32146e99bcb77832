// src/spectrogram/options.rs
//! Construction options for a spectrogram pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::axis::DEFAULT_TICKS;
use super::look::Look;
use super::peak_hold::DEFAULT_FALL_RATE;
use super::scroll::Direction;

/// Everything needed to build a [`Spectrogram`](super::Spectrogram).
///
/// Every field has a default, so partial configuration files deserialise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrogramOptions {
    /// Prefix for log lines of this instance.
    pub name: String,
    pub fft_size: usize,
    /// Sample rate in Hz.
    pub sampling: f64,
    pub direction: Direction,
    /// Narrowest window `scale` will produce, in bins.
    pub min_range_bins: f64,
    pub visible_rows: usize,
    pub fall_rate: f32,
    pub render_interval_ms: u64,
    /// Initial window in Hz; the full range when absent.
    pub freq_range: Option<(f64, f64)>,
    pub axis_ticks: usize,
    pub look: Look,
}

impl Default for SpectrogramOptions {
    fn default() -> Self {
        Self {
            name: "spectro-vis".to_string(),
            fft_size: 16384,
            sampling: 44100.0,
            direction: Direction::Top,
            min_range_bins: 200.0,
            visible_rows: 200,
            fall_rate: DEFAULT_FALL_RATE,
            render_interval_ms: 50,
            freq_range: None,
            axis_ticks: DEFAULT_TICKS,
            look: Look::default(),
        }
    }
}

impl SpectrogramOptions {
    /// Cadence at which a host should poll [`render`](super::Spectrogram::render).
    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let options: SpectrogramOptions =
            serde_json::from_str(r#"{ "fft_size": 2048, "direction": "bottom" }"#).unwrap();
        assert_eq!(options.fft_size, 2048);
        assert_eq!(options.direction, Direction::Bottom);
        assert_eq!(options.visible_rows, 200);
        assert_eq!(options.min_range_bins, 200.0);
        assert_eq!(options.look, Look::default());
    }

    #[test]
    fn freq_range_reads_as_pair() {
        let options: SpectrogramOptions =
            serde_json::from_str(r#"{ "freq_range": [20.0, 5000.0] }"#).unwrap();
        assert_eq!(options.freq_range, Some((20.0, 5000.0)));
    }

    #[test]
    fn render_interval_is_never_zero() {
        let options = SpectrogramOptions {
            render_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(options.render_interval(), Duration::from_millis(1));
    }
}
