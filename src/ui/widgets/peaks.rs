// src/ui/widgets/peaks.rs
//! Histogram of the latest row with the held peaks drawn as markers above it.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::Widget,
};

use super::{column_levels, look_color};
use crate::spectrogram::RenderFrame;

/// Block characters for eighth-cell gradation, index 0 is empty.
const BARS: [&str; 9] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];
const PEAK_MARK: &str = "▔";

pub struct PeakView<'a, 'f> {
    frame: &'a RenderFrame<'f>,
}

impl<'a, 'f> PeakView<'a, 'f> {
    pub fn new(frame: &'a RenderFrame<'f>) -> Self {
        Self { frame }
    }
}

/// Character for cell `row_from_bottom` of a bar `level` high in a column
/// `height` cells tall.
fn bar_symbol(level: f32, row_from_bottom: usize, height: usize) -> &'static str {
    let eighths = (level.clamp(0.0, 1.0) * (height * 8) as f32).round() as usize;
    let below = row_from_bottom * 8;
    if eighths >= below + 8 {
        BARS[8]
    } else if eighths > below {
        BARS[eighths - below]
    } else {
        BARS[0]
    }
}

/// Cell counted from the bottom that holds the marker for `peak`.
fn peak_row(peak: f32, height: usize) -> Option<usize> {
    let cells = (peak.clamp(0.0, 1.0) * height as f32).ceil() as usize;
    cells.checked_sub(1)
}

impl Widget for PeakView<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let window = self.frame.window;
        let latest = column_levels(self.frame.latest, window, area.width);
        let held = column_levels(self.frame.peaks, window, area.width);
        let height = area.height as usize;

        for (x, (&level, &peak)) in latest.iter().zip(held.iter()).enumerate() {
            let color = look_color(self.frame.look, level);
            let marker = peak_row(peak, height).filter(|&row| {
                bar_symbol(level, row, height) != BARS[8]
            });

            for row in 0..height {
                let y = area.bottom() - 1 - row as u16;
                let Some(cell) = buf.cell_mut((area.x + x as u16, y)) else {
                    continue;
                };
                if marker == Some(row) {
                    cell.set_symbol(PEAK_MARK).set_fg(Color::White);
                } else {
                    cell.set_symbol(bar_symbol(level, row, height)).set_fg(color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrogram::{Spectrogram, SpectrogramOptions};

    #[test]
    fn bar_fills_in_eighths() {
        assert_eq!(bar_symbol(1.0, 0, 2), "█");
        assert_eq!(bar_symbol(1.0, 1, 2), "█");
        assert_eq!(bar_symbol(0.5, 0, 2), "█");
        assert_eq!(bar_symbol(0.5, 1, 2), " ");
        assert_eq!(bar_symbol(0.25, 0, 2), "▄");
        assert_eq!(bar_symbol(0.0, 0, 2), " ");
    }

    #[test]
    fn peak_marker_row() {
        assert_eq!(peak_row(0.0, 4), None);
        assert_eq!(peak_row(0.1, 4), Some(0));
        assert_eq!(peak_row(1.0, 4), Some(3));
    }

    #[test]
    fn decaying_peak_floats_above_the_bar() {
        let mut spectro = Spectrogram::new(SpectrogramOptions {
            fft_size: 4,
            sampling: 400.0,
            visible_rows: 2,
            min_range_bins: 1.0,
            fall_rate: 0.1,
            ..Default::default()
        })
        .unwrap();
        spectro.step(&[1.0, 0.0]).unwrap();
        spectro.step(&[0.0, 0.0]).unwrap();
        let frame = spectro.render().unwrap().unwrap();

        let area = Rect::new(0, 0, 2, 4);
        let mut buf = Buffer::empty(area);
        PeakView::new(&frame).render(area, &mut buf);

        // held 0.9 on a 4-cell column lands in the top cell
        assert_eq!(buf[(0, 0)].symbol(), PEAK_MARK);
        assert_eq!(buf[(0, 3)].symbol(), " ");
        assert_eq!(buf[(1, 0)].symbol(), " ");
    }
}
