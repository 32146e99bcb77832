// src/audio/mod.rs
//! Audio side: playback with sample capture, and the FFT row analyser.

pub mod analyzer;
pub mod player;
pub mod sample_capture;

pub use analyzer::RowAnalyzer;
pub use player::PlaybackSession;
pub use sample_capture::{CaptureBuffer, SampleCapture};
