// src/spectrogram/shared.rs
//! Thread-safe handle so a capture thread can feed rows while the UI renders.

use std::sync::{Arc, Mutex, MutexGuard};

use super::error::{Result, SpectrogramError};
use super::{ScaleStep, Spectrogram};

#[derive(Debug, Clone)]
pub struct SharedSpectrogram {
    inner: Arc<Mutex<Spectrogram>>,
}

impl SharedSpectrogram {
    pub fn new(spectrogram: Spectrogram) -> Self {
        Self {
            inner: Arc::new(Mutex::new(spectrogram)),
        }
    }

    /// Lock the pipeline. A poisoned lock is reported, not recovered.
    pub fn lock(&self) -> Result<MutexGuard<'_, Spectrogram>> {
        self.inner.lock().map_err(|_| SpectrogramError::Poisoned)
    }

    /// Run `f` with the pipeline locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut Spectrogram) -> Result<R>) -> Result<R> {
        let mut guard = self.lock()?;
        f(&mut guard)
    }

    pub fn step(&self, row: &[f32]) -> Result<()> {
        self.with(|s| s.step(row))
    }

    pub fn set_sampling(&self, sampling: f64) -> Result<()> {
        self.with(|s| s.set_sampling(sampling))
    }

    pub fn scale_freq_range(&self, delta: f64) -> Result<ScaleStep> {
        self.with(|s| s.scale_freq_range(delta))
    }

    pub fn move_freq_range(&self, delta: f64) -> Result<bool> {
        self.with(|s| s.move_freq_range(delta))
    }

    pub fn dispose(&self) -> Result<()> {
        self.with(|s| s.dispose())
    }
}
