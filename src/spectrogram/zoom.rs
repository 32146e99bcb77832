// src/spectrogram/zoom.rs
//! Zoom window over frequency bins: set, scale around the centre, and pan.

use super::error::{Result, SpectrogramError};

/// Contiguous range of bins currently on display, `0 <= min < max <= bins`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinWindow {
    pub min: f64,
    pub max: f64,
}

impl BinWindow {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn center(&self) -> f64 {
        (self.max + self.min) / 2.0
    }
}

/// Which branch of the clamp policy resolved a `scale` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleStep {
    /// Narrower than the floor: re-centred at exactly `min_range_bins`.
    Floor,
    /// Overflowed the upper bound only: clipped to `bins`.
    ClipUpper,
    /// Overflowed the lower bound only: clipped to 0.
    ClipLower,
    /// Overflowed both bounds: collapsed to the full range.
    Full,
    /// Inside bounds and wide enough.
    Accepted,
}

/// Owns the zoom window for one signal.
#[derive(Debug, Clone)]
pub struct FrequencyRange {
    window: BinWindow,
    bins: f64,
    min_range_bins: f64,
}

impl FrequencyRange {
    /// Full-range window over `bins` bins.
    pub fn new(bins: usize, min_range_bins: f64) -> Result<Self> {
        if bins == 0 {
            return Err(SpectrogramError::InvalidConfig(
                "zoom needs at least one bin".into(),
            ));
        }
        if !(min_range_bins.is_finite() && min_range_bins > 0.0) {
            return Err(SpectrogramError::InvalidConfig(format!(
                "min range must be a positive bin count, got {}",
                min_range_bins
            )));
        }
        let bins = bins as f64;
        Ok(Self {
            window: BinWindow::new(0.0, bins),
            bins,
            min_range_bins,
        })
    }

    pub fn window(&self) -> BinWindow {
        self.window
    }

    pub fn bins(&self) -> f64 {
        self.bins
    }

    pub fn min_range_bins(&self) -> f64 {
        self.min_range_bins
    }

    /// Window as fractions of the bin count, for the display layer.
    pub fn normalized(&self) -> (f64, f64) {
        (self.window.min / self.bins, self.window.max / self.bins)
    }

    /// Show every bin.
    pub fn set_full(&mut self) {
        self.window = BinWindow::new(0.0, self.bins);
    }

    /// Select the bins covering `fmin..fmax` Hz at `resolution` Hz per bin.
    ///
    /// The lower edge is floored and the upper edge ceiled. A rejected request
    /// leaves the current window untouched.
    pub fn set_range(&mut self, fmin: f64, fmax: f64, resolution: f64) -> Result<BinWindow> {
        let min = (fmin / resolution).floor();
        let max = (fmax / resolution).ceil();
        let valid = min >= 0.0
            && fmin < fmax
            && min < self.bins
            && max > 0.0
            && max <= self.bins
            && min < max;
        if !valid {
            return Err(SpectrogramError::InvalidRange {
                fmin,
                fmax,
                min,
                max,
            });
        }
        self.window = BinWindow::new(min, max);
        Ok(self.window)
    }

    /// Zoom in (`delta < 0`) or out around the current centre.
    pub fn scale(&mut self, delta: f64) -> ScaleStep {
        let factor = if delta < 0.0 { 0.5 } else { 2.0 };
        let center = self.window.center();
        let d = self.window.width() * factor;
        let min = center - d / 2.0;
        let max = center + d / 2.0;

        let (window, step) = if max - min < self.min_range_bins {
            (self.floor_window(center), ScaleStep::Floor)
        } else if max > self.bins && min >= 0.0 {
            (BinWindow::new(min, self.bins), ScaleStep::ClipUpper)
        } else if max <= self.bins && min < 0.0 {
            (BinWindow::new(0.0, max), ScaleStep::ClipLower)
        } else if max > self.bins && min < 0.0 {
            (BinWindow::new(0.0, self.bins), ScaleStep::Full)
        } else {
            (BinWindow::new(min, max), ScaleStep::Accepted)
        };
        self.window = window;
        step
    }

    /// Slide the window by `delta` bins without changing its width.
    ///
    /// Negative deltas move toward higher bins, positive toward lower ones.
    /// Returns whether the window moved: false for a zero (or NaN) delta and
    /// for a push against a bound the window already touches.
    pub fn pan(&mut self, delta: f64) -> bool {
        let before = self.window;
        let width = before.width();
        // the far edge is clamped too so rounding never leaves the bounds
        if delta < 0.0 {
            let max = (before.max - delta).min(self.bins);
            self.window = BinWindow::new((max - width).max(0.0), max);
        } else if delta > 0.0 {
            let min = (before.min - delta).max(0.0);
            self.window = BinWindow::new(min, (min + width).min(self.bins));
        }
        self.window != before
    }

    // Exactly `min_range_bins` wide around `center`, slid back inside the
    // bounds when the centre sits closer to an edge than half the floor.
    fn floor_window(&self, center: f64) -> BinWindow {
        let width = self.min_range_bins;
        if width >= self.bins {
            return BinWindow::new(0.0, self.bins);
        }
        let min = (center - width / 2.0).clamp(0.0, self.bins - width);
        BinWindow::new(min, min + width)
    }
}

/// Pan distance in bins for a pointer drag of `dx` pixels.
pub fn drag_to_bins(dx: f64) -> f64 {
    dx * 5.0 + 0.5 * dx * dx * dx.signum()
}
