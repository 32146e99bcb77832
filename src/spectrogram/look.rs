// src/spectrogram/look.rs
//! Colour palette and colour-map range used to paint magnitudes.

use serde::{Deserialize, Serialize};

use super::error::{Result, SpectrogramError};

/// Number of colour stops in a palette.
pub const PALETTE_STOPS: usize = 8;

/// Default palette, dark violet to yellow.
pub const DEFAULT_BASE_COLORS: [u32; PALETTE_STOPS] = [
    0x2f0087, 0x6200a4, 0x9200a6, 0xba2f8a, 0xd85b69, 0xee8949, 0xf6bd27, 0xe4fa15,
];

/// Palette plus the slice of `[0, 1]` it is stretched over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Look {
    /// Colour stops as `0xRRGGBB`.
    pub base_colors: [u32; PALETTE_STOPS],
    /// Magnitudes at or below `.0` map to the first stop, at or above `.1`
    /// to the last.
    pub color_map_range: (f32, f32),
}

impl Default for Look {
    fn default() -> Self {
        Self {
            base_colors: DEFAULT_BASE_COLORS,
            color_map_range: (0.0, 1.0),
        }
    }
}

impl Look {
    pub fn set_base_colors(&mut self, colors: [u32; PALETTE_STOPS]) {
        self.base_colors = colors;
    }

    /// Set the colour-map range; both ends in `[0, 1]` with `min <= max`.
    pub fn set_color_map_range(&mut self, min: f32, max: f32) -> Result<()> {
        validate_range(min, max)?;
        self.color_map_range = (min, max);
        Ok(())
    }

    /// Check a deserialised look before it is used.
    pub fn validate(&self) -> Result<()> {
        validate_range(self.color_map_range.0, self.color_map_range.1)
    }

    /// Colour for magnitude `value` as `(r, g, b)`.
    pub fn sample(&self, value: f32) -> (u8, u8, u8) {
        let (lo, hi) = self.color_map_range;
        let t = if hi > lo {
            ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
        } else if value >= hi {
            1.0
        } else {
            0.0
        };
        // NaN falls through clamp untouched
        let t = if t.is_nan() { 0.0 } else { t };

        let scaled = t * (PALETTE_STOPS - 1) as f32;
        let index = (scaled.floor() as usize).min(PALETTE_STOPS - 2);
        let frac = scaled - index as f32;
        lerp_rgb(self.base_colors[index], self.base_colors[index + 1], frac)
    }
}

fn validate_range(min: f32, max: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) {
        return Err(SpectrogramError::InvalidConfig(format!(
            "colour map range must lie in [0, 1], got {}..{}",
            min, max
        )));
    }
    if min > max {
        return Err(SpectrogramError::InvalidConfig(format!(
            "colour map range is inverted: {}..{}",
            min, max
        )));
    }
    Ok(())
}

fn channels(color: u32) -> [f32; 3] {
    [
        ((color >> 16) & 0xff) as f32,
        ((color >> 8) & 0xff) as f32,
        (color & 0xff) as f32,
    ]
}

fn lerp_rgb(from: u32, to: u32, t: f32) -> (u8, u8, u8) {
    let a = channels(from);
    let b = channels(to);
    let mix = |i: usize| (a[i] + (b[i] - a[i]) * t).round().clamp(0.0, 255.0) as u8;
    (mix(0), mix(1), mix(2))
}
