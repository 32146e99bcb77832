// src/ui/widgets/spectrogram.rs
//! Scrolling spectrogram drawn with half blocks, two history rows per cell.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::{column_bins, look_color};
use crate::spectrogram::RenderFrame;

/// Upper half is the foreground colour, lower half the background.
const HALF_BLOCK: &str = "▀";

pub struct SpectrogramView<'a, 'f> {
    frame: &'a RenderFrame<'f>,
}

impl<'a, 'f> SpectrogramView<'a, 'f> {
    pub fn new(frame: &'a RenderFrame<'f>) -> Self {
        Self { frame }
    }
}

/// History row shown at vertical pixel `pixel` of `pixels`.
fn history_row(pixel: usize, pixels: usize, rows: usize) -> usize {
    (pixel * rows / pixels.max(1)).min(rows.saturating_sub(1))
}

impl Widget for SpectrogramView<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let history = self.frame.history;
        let look = self.frame.look;
        let rows = history.height();
        let pixels = area.height as usize * 2;

        for x in 0..area.width {
            let bins = column_bins(self.frame.window, area.width, x);
            for y in 0..area.height {
                let upper = history_row(y as usize * 2, pixels, rows);
                let lower = history_row(y as usize * 2 + 1, pixels, rows);
                let top = history.row_peak(upper, bins.clone());
                let bottom = history.row_peak(lower, bins.clone());

                if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(look_color(look, top))
                        .set_bg(look_color(look, bottom));
                }
            }
        }
    }
}
