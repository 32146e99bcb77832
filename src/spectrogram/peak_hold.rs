// src/spectrogram/peak_hold.rs
//! Peak-hold accumulator: a per-bin running maximum that falls linearly.

use super::error::{Result, SpectrogramError};

/// Default fall per update tick.
pub const DEFAULT_FALL_RATE: f32 = 0.01;

/// Decaying per-bin maximum.
///
/// The previous and next peak rows live in a two-slot arena; `current` picks
/// the slot holding the latest peaks and an update writes the other slot then
/// flips the index.
#[derive(Debug, Clone)]
pub struct PeakHold {
    new_data: Vec<f32>,
    slots: [Vec<f32>; 2],
    current: usize,
    fall_rate: f32,
    range: (f64, f64),
}

impl PeakHold {
    pub fn new(bins: usize, fall_rate: f32) -> Result<Self> {
        if bins == 0 {
            return Err(SpectrogramError::InvalidConfig(
                "peak hold needs at least one bin".into(),
            ));
        }
        if !(fall_rate > 0.0 && fall_rate < 1.0) {
            return Err(SpectrogramError::InvalidConfig(format!(
                "fall rate must be in (0, 1), got {}",
                fall_rate
            )));
        }
        Ok(Self {
            new_data: vec![0.0; bins],
            slots: [vec![0.0; bins], vec![0.0; bins]],
            current: 0,
            fall_rate,
            range: (0.0, 1.0),
        })
    }

    pub fn bins(&self) -> usize {
        self.new_data.len()
    }

    pub fn fall_rate(&self) -> f32 {
        self.fall_rate
    }

    /// Take one row and advance the decay by one tick.
    ///
    /// Values are expected in `[0, 1]`; they are not clamped here.
    pub fn update(&mut self, row: &[f32]) -> Result<()> {
        if row.len() != self.new_data.len() {
            return Err(SpectrogramError::InputSize {
                expected: self.new_data.len(),
                actual: row.len(),
            });
        }
        self.new_data.copy_from_slice(row);

        let (first, second) = self.slots.split_at_mut(1);
        let (prev, next) = if self.current == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        };
        for ((out, &old), &new) in next.iter_mut().zip(prev.iter()).zip(self.new_data.iter()) {
            *out = new.max(old - self.fall_rate);
        }
        self.current ^= 1;
        Ok(())
    }

    /// Current held peaks, one per bin.
    pub fn peaks(&self) -> &[f32] {
        &self.slots[self.current]
    }

    /// Row passed to the latest update.
    pub fn new_data(&self) -> &[f32] {
        &self.new_data
    }

    /// Record the normalised display window. Has no effect on the decay.
    pub fn update_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn reset(&mut self) {
        self.new_data.fill(0.0);
        for slot in &mut self.slots {
            slot.fill(0.0);
        }
    }
}
