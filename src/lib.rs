// src/lib.rs
//! specscroll - a scrolling spectrogram with zoomable frequency axis and peak hold.
//!
//! The [`spectrogram`] module is the engine; [`audio`], [`app`] and [`ui`]
//! wrap it into a terminal player that draws the spectrogram of a track.

pub mod app;
pub mod audio;
pub mod cli;
pub mod config;
pub mod spectrogram;
pub mod telemetry;
pub mod ui;
