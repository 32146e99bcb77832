// src/ui/widgets/status.rs
//! Status and help lines.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::spectrogram::RenderFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
    Finished,
}

/// Track name, playback state, sample rate, visible band and row count.
pub fn render_status(
    f: &mut Frame<'_>,
    area: Rect,
    track: &str,
    state: PlaybackState,
    frame: &RenderFrame<'_>,
) {
    let state_span = match state {
        PlaybackState::Playing => Span::styled(" ⏵ ", Style::default().fg(Color::Green)),
        PlaybackState::Paused => Span::styled(" ⏸ ", Style::default().fg(Color::Yellow)),
        PlaybackState::Finished => Span::styled(" ⏹ ", Style::default().fg(Color::Gray)),
    };
    let low = frame.signal.bin_to_hz(frame.window.min);
    let high = frame.signal.bin_to_hz(frame.window.max);

    let line = Line::from(vec![
        state_span,
        Span::styled(track.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            "  {:.0} Hz | {:.1}-{:.1} Hz | {} rows",
            frame.signal.sampling(),
            low,
            high,
            frame.history.height()
        )),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

pub fn render_help(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default().fg(Color::Cyan);
    let line = Line::from(vec![
        Span::styled("+/-", key),
        Span::raw(" zoom  "),
        Span::styled("←/→", key),
        Span::raw(" pan  "),
        Span::styled("f", key),
        Span::raw(" full  "),
        Span::styled("r", key),
        Span::raw(" reset  "),
        Span::styled("[/]", key),
        Span::raw(" rows  "),
        Span::styled("space", key),
        Span::raw(" pause  "),
        Span::styled("q", key),
        Span::raw(" quit"),
    ]);
    f.render_widget(
        Paragraph::new(line).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
