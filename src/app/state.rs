// src/app/state.rs
//! Application state: playback session, row analyser and spectrogram wiring.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    widgets::{Block, Borders},
    Frame,
};
use tracing::{debug, info};

use crate::{
    audio::{PlaybackSession, RowAnalyzer},
    config::AppConfig,
    spectrogram::{self, drag_to_bins, Spectrogram},
    ui::{
        keybindings::{key_to_action, mouse_to_action, Action},
        layout::compute_layout,
        widgets::{
            render_help, render_status, AxisView, PeakView, PlaybackState, SpectrogramView,
        },
    },
};

/// Rows added or removed by `[` / `]`.
pub const ROW_STEP: usize = 25;
/// Upper bound for the history height.
pub const MAX_ROWS: usize = 4096;
/// Fraction of the window width moved per pan key press.
pub const PAN_FRACTION: f64 = 0.1;

/// Apply a view action to the pipeline. Playback actions and `Quit` are
/// ignored here.
pub fn apply_action(spectrogram: &mut Spectrogram, action: Action) -> spectrogram::Result<()> {
    match action {
        Action::ZoomIn => {
            spectrogram.scale_freq_range(-1.0)?;
        }
        Action::ZoomOut => {
            spectrogram.scale_freq_range(1.0)?;
        }
        Action::PanLower => {
            let step = spectrogram.window()?.width() * PAN_FRACTION;
            spectrogram.move_freq_range(step)?;
        }
        Action::PanHigher => {
            let step = spectrogram.window()?.width() * PAN_FRACTION;
            spectrogram.move_freq_range(-step)?;
        }
        Action::FullRange => spectrogram.full_range()?,
        Action::Reset => spectrogram.reset()?,
        Action::FewerRows => {
            let rows = spectrogram.history()?.height();
            spectrogram.set_visible_rows(rows.saturating_sub(ROW_STEP).max(1))?;
        }
        Action::MoreRows => {
            let rows = spectrogram.history()?.height();
            spectrogram.set_visible_rows((rows + ROW_STEP).min(MAX_ROWS))?;
        }
        Action::TogglePause | Action::Quit | Action::None => {}
    }
    Ok(())
}

/// Main application state.
pub struct App {
    /// The engine being driven
    pub spectrogram: Spectrogram,
    session: PlaybackSession,
    analyzer: RowAnalyzer,
    /// Rate last forwarded to the pipeline
    sampling: Option<u32>,
    /// Column of the last mouse drag position
    drag_from: Option<u16>,
    track: String,
    state: PlaybackState,
}

impl App {
    /// Open `path` and start playing it.
    pub fn new(path: &Path, config: AppConfig) -> Result<Self> {
        let fft_size = config.spectrogram.fft_size;
        let spectrogram =
            Spectrogram::new(config.spectrogram).context("invalid spectrogram options")?;
        let analyzer = RowAnalyzer::new(fft_size, config.analyzer)?;
        let session = PlaybackSession::start(path, fft_size * 2)?;
        let track = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            spectrogram,
            session,
            analyzer,
            sampling: None,
            drag_from: None,
            track,
            state: PlaybackState::Playing,
        })
    }

    /// Handle a key event and return true if the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> Result<bool> {
        let action = key_to_action(&key);
        match action {
            Action::Quit => return Ok(true),
            Action::TogglePause => {
                self.session.toggle_pause();
                self.state = match self.state {
                    PlaybackState::Playing => PlaybackState::Paused,
                    PlaybackState::Paused => PlaybackState::Playing,
                    PlaybackState::Finished => PlaybackState::Finished,
                };
                self.spectrogram.invalidate()?;
            }
            _ => apply_action(&mut self.spectrogram, action)?,
        }
        debug!("[app] {:?}", action);
        Ok(false)
    }

    /// Wheel zooms; dragging with the left button pans.
    pub fn on_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.drag_from = Some(mouse.column),
            MouseEventKind::Up(MouseButton::Left) => self.drag_from = None,
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(from) = self.drag_from.replace(mouse.column) {
                    let dx = mouse.column as f64 - from as f64;
                    self.spectrogram.move_freq_range(drag_to_bins(dx))?;
                }
            }
            _ => apply_action(&mut self.spectrogram, mouse_to_action(&mouse))?,
        }
        Ok(())
    }

    /// Pull the newest samples through the analyser into the pipeline.
    pub fn tick(&mut self) -> Result<()> {
        let capture = self.session.capture().clone();

        if let Some(rate) = capture.sample_rate() {
            if self.sampling != Some(rate) {
                self.spectrogram.set_sampling(rate as f64)?;
                self.sampling = Some(rate);
            }
        }

        if !self.session.is_playing() {
            if self.state != PlaybackState::Finished {
                info!("[app] playback finished");
                self.state = PlaybackState::Finished;
                self.spectrogram.invalidate()?;
            }
            return Ok(());
        }
        if self.session.is_paused() {
            return Ok(());
        }

        if let Some(samples) = capture.latest(self.analyzer.fft_size()) {
            let row = self.analyzer.analyze(&samples);
            self.spectrogram.step(&row)?;
        }
        Ok(())
    }

    pub fn needs_redraw(&self) -> Result<bool> {
        Ok(self.spectrogram.needs_render()?)
    }

    /// Request a full redraw, e.g. after a terminal resize.
    pub fn invalidate(&mut self) -> Result<()> {
        Ok(self.spectrogram.invalidate()?)
    }

    pub fn render_interval(&self) -> Result<Duration> {
        Ok(self.spectrogram.render_interval()?)
    }

    /// Draw the application UI if the pipeline has a pending frame.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let layout = compute_layout(f.area());
        let Ok(Some(frame)) = self.spectrogram.render() else {
            return;
        };

        render_status(f, layout.status, &self.track, self.state, &frame);

        let block = Block::default().borders(Borders::ALL).title(" spectrogram ");
        let inner = block.inner(layout.spectrogram);
        f.render_widget(block, layout.spectrogram);
        f.render_widget(SpectrogramView::new(&frame), inner);

        let mut axis_area = layout.axis;
        axis_area.x = inner.x;
        axis_area.width = inner.width;
        f.render_widget(AxisView::new(&frame), axis_area);

        let block = Block::default().borders(Borders::ALL).title(" peak hold ");
        let inner = block.inner(layout.peaks);
        f.render_widget(block, layout.peaks);
        f.render_widget(PeakView::new(&frame), inner);

        render_help(f, layout.help);
    }

    /// Stop playback and tear the pipeline down.
    pub fn shutdown(&mut self) -> Result<()> {
        self.session.stop();
        if !self.spectrogram.is_disposed() {
            self.spectrogram.dispose()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrogram::SpectrogramOptions;

    fn pipeline() -> Spectrogram {
        Spectrogram::new(SpectrogramOptions {
            fft_size: 2048,
            sampling: 2048.0,
            visible_rows: 50,
            min_range_bins: 16.0,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn zoom_actions_scale_around_center() {
        let mut spectro = pipeline();
        apply_action(&mut spectro, Action::ZoomIn).unwrap();
        assert_eq!(spectro.normalized_range().unwrap(), (0.25, 0.75));
        apply_action(&mut spectro, Action::ZoomOut).unwrap();
        assert_eq!(spectro.normalized_range().unwrap(), (0.0, 1.0));
    }

    #[test]
    fn pan_actions_move_a_tenth_of_the_window() {
        let mut spectro = pipeline();
        apply_action(&mut spectro, Action::ZoomIn).unwrap();
        apply_action(&mut spectro, Action::PanHigher).unwrap();
        let window = spectro.window().unwrap();
        assert!((window.min - 307.2).abs() < 1e-9);
        assert!((window.max - 819.2).abs() < 1e-9);

        apply_action(&mut spectro, Action::PanLower).unwrap();
        apply_action(&mut spectro, Action::PanLower).unwrap();
        let window = spectro.window().unwrap();
        assert!((window.min - 204.8).abs() < 1e-9);
    }

    #[test]
    fn full_range_after_zoom() {
        let mut spectro = pipeline();
        apply_action(&mut spectro, Action::ZoomIn).unwrap();
        apply_action(&mut spectro, Action::ZoomIn).unwrap();
        apply_action(&mut spectro, Action::FullRange).unwrap();
        assert_eq!(spectro.normalized_range().unwrap(), (0.0, 1.0));
    }

    #[test]
    fn row_actions_step_and_clamp() {
        let mut spectro = pipeline();
        apply_action(&mut spectro, Action::MoreRows).unwrap();
        assert_eq!(spectro.history().unwrap().height(), 75);
        for _ in 0..5 {
            apply_action(&mut spectro, Action::FewerRows).unwrap();
        }
        assert_eq!(spectro.history().unwrap().height(), 1);
    }

    #[test]
    fn reset_action_clears_history() {
        let mut spectro = pipeline();
        spectro.step(&vec![0.5; 1024]).unwrap();
        apply_action(&mut spectro, Action::Reset).unwrap();
        assert!(spectro.peaks().unwrap().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn actions_after_dispose_report_disposed() {
        let mut spectro = pipeline();
        spectro.dispose().unwrap();
        assert_eq!(
            apply_action(&mut spectro, Action::ZoomIn),
            Err(spectrogram::SpectrogramError::Disposed)
        );
        assert!(apply_action(&mut spectro, Action::None).is_ok());
    }
}
