// src/audio/analyzer.rs
//! Turns a block of samples into one normalised magnitude row.

use std::sync::Arc;

use anyhow::{ensure, Result};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::config::AnalyzerSettings;

/// Hann-windowed FFT followed by a dBFS to `[0, 1]` mapping.
pub struct RowAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    fft_size: usize,
    min_db: f32,
    max_db: f32,
}

impl RowAnalyzer {
    pub fn new(fft_size: usize, settings: AnalyzerSettings) -> Result<Self> {
        ensure!(fft_size >= 2, "fft size must be at least 2, got {fft_size}");
        ensure!(
            settings.min_db < settings.max_db,
            "analyser needs min_db < max_db, got {}..{}",
            settings.min_db,
            settings.max_db
        );

        let fft = FftPlanner::new().plan_fft_forward(fft_size);
        let window = (0..fft_size)
            .map(|i| {
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / fft_size as f32).cos())
            })
            .collect();

        Ok(Self {
            fft,
            window,
            buffer: vec![Complex::new(0.0, 0.0); fft_size],
            fft_size,
            min_db: settings.min_db,
            max_db: settings.max_db,
        })
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of values per output row.
    pub fn bins(&self) -> usize {
        self.fft_size / 2
    }

    /// Analyse the newest `fft_size` samples of `samples` (zero-padded in
    /// front when shorter) into `bins` values in `[0, 1]`.
    pub fn analyze(&mut self, samples: &[f32]) -> Vec<f32> {
        let take = samples.len().min(self.fft_size);
        let offset = self.fft_size - take;
        let recent = &samples[samples.len() - take..];

        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = if i >= offset { recent[i - offset] } else { 0.0 };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }
        self.fft.process(&mut self.buffer);

        let scale = 1.0 / self.fft_size as f32;
        let range = self.max_db - self.min_db;
        self.buffer
            .iter()
            .take(self.bins())
            .map(|c| {
                let db = 20.0 * (c.norm() * scale).max(1e-10).log10();
                ((db - self.min_db) / range).clamp(0.0, 1.0)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(bin: usize, fft_size: usize, amplitude: f32) -> Vec<f32> {
        (0..fft_size)
            .map(|n| {
                amplitude
                    * (2.0 * std::f32::consts::PI * bin as f32 * n as f32 / fft_size as f32).sin()
            })
            .collect()
    }

    fn argmax(row: &[f32]) -> usize {
        row.iter()
            .enumerate()
            .fold((0, f32::MIN), |best, (i, &v)| if v > best.1 { (i, v) } else { best })
            .0
    }

    #[test]
    fn sine_peaks_in_its_bin() {
        let mut analyzer = RowAnalyzer::new(1024, AnalyzerSettings::default()).unwrap();
        // quiet enough that neither the peak nor its leakage clips at 1.0
        let row = analyzer.analyze(&sine(100, 1024, 0.001));
        assert_eq!(row.len(), 512);
        assert_eq!(argmax(&row), 100);
        // A/4 after the Hann window: about -72 dBFS
        assert!((row[100] - 0.3994).abs() < 0.01, "{}", row[100]);
        assert!(row[99] < row[100] && row[101] < row[100]);
    }

    #[test]
    fn silence_is_all_zero() {
        let mut analyzer = RowAnalyzer::new(256, AnalyzerSettings::default()).unwrap();
        let row = analyzer.analyze(&[0.0; 256]);
        assert!(row.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn uses_newest_samples_and_pads_short_input() {
        let mut analyzer = RowAnalyzer::new(512, AnalyzerSettings::default()).unwrap();
        let mut long = vec![0.0; 300];
        long.extend(sine(40, 512, 0.001));
        let row = analyzer.analyze(&long);
        assert_eq!(argmax(&row), 40);

        let short = analyzer.analyze(&[0.25; 10]);
        assert_eq!(short.len(), 256);
        assert!(short.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn rejects_inverted_db_window() {
        let settings = AnalyzerSettings {
            min_db: -30.0,
            max_db: -100.0,
        };
        assert!(RowAnalyzer::new(1024, settings).is_err());
        assert!(RowAnalyzer::new(1, AnalyzerSettings::default()).is_err());
    }
}
