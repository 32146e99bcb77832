// src/spectrogram/signal.rs
//! Signal descriptor: FFT size, sampling rate and the values derived from them.

use tracing::warn;

use super::error::{Result, SpectrogramError};

/// FFT geometry of the incoming rows.
///
/// `bins` and `fft_resolution` are derived fields and only ever change
/// together with `fft_size` / `sampling`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalInfo {
    fft_size: usize,
    sampling: f64,
    bins: usize,
    fft_resolution: f64,
}

impl SignalInfo {
    /// Build a descriptor for `fft_size` samples taken at `sampling` Hz.
    pub fn new(fft_size: usize, sampling: f64) -> Result<Self> {
        if fft_size < 2 {
            return Err(SpectrogramError::InvalidConfig(format!(
                "fft size must be at least 2, got {}",
                fft_size
            )));
        }
        if !fft_size.is_power_of_two() {
            warn!(fft_size, "fft size is not a power of two");
        }
        check_sampling(sampling)?;

        Ok(Self {
            fft_size,
            sampling,
            bins: fft_size / 2,
            fft_resolution: sampling / fft_size as f64,
        })
    }

    /// Change the effective sample rate. The bin count is unaffected.
    pub fn set_sampling(&mut self, sampling: f64) -> Result<()> {
        check_sampling(sampling)?;
        self.sampling = sampling;
        self.fft_resolution = sampling / self.fft_size as f64;
        Ok(())
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn sampling(&self) -> f64 {
        self.sampling
    }

    /// Number of magnitude values per row.
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Width of one bin in Hz.
    pub fn fft_resolution(&self) -> f64 {
        self.fft_resolution
    }

    /// Frequency in Hz at the lower edge of (possibly fractional) bin `bin`.
    pub fn bin_to_hz(&self, bin: f64) -> f64 {
        bin * self.fft_resolution
    }
}

fn check_sampling(sampling: f64) -> Result<()> {
    if sampling.is_finite() && sampling > 0.0 {
        Ok(())
    } else {
        Err(SpectrogramError::InvalidConfig(format!(
            "sampling rate must be positive, got {}",
            sampling
        )))
    }
}
