// src/ui/layout.rs
//! Layout computation for the UI panels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computed layout areas for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedLayout {
    /// Track and view state, one line
    pub status: Rect,
    /// Scrolling spectrogram, three quarters of the flexible space
    pub spectrogram: Rect,
    /// Frequency labels under the spectrogram
    pub axis: Rect,
    /// Peak-hold histogram, the remaining quarter
    pub peaks: Rect,
    /// Key help, one line
    pub help: Rect,
}

/// Split the terminal into the viewer panels.
pub fn compute_layout(area: Rect) -> ComputedLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(3),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    ComputedLayout {
        status: chunks[0],
        spectrogram: chunks[1],
        axis: chunks[2],
        peaks: chunks[3],
        help: chunks[4],
    }
}
