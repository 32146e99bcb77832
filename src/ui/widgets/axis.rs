// src/ui/widgets/axis.rs
//! Frequency labels placed under their ticks.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::spectrogram::{AxisTick, RenderFrame};

pub struct AxisView<'a, 'f> {
    frame: &'a RenderFrame<'f>,
}

impl<'a, 'f> AxisView<'a, 'f> {
    pub fn new(frame: &'a RenderFrame<'f>) -> Self {
        Self { frame }
    }
}

/// One text line `width` characters wide with each label centred on its
/// tick. Labels that would overlap the previous one are dropped.
pub fn axis_line(ticks: &[AxisTick], width: usize) -> String {
    let mut line = vec![' '; width];
    let mut free_from = 0usize;

    for tick in ticks {
        let label: Vec<char> = tick.label.chars().collect();
        let center = (tick.position * width as f64).round() as usize;
        let start = center.saturating_sub(label.len() / 2);
        let end = start + label.len();
        if start < free_from || end > width {
            continue;
        }
        line[start..end].copy_from_slice(&label);
        free_from = end + 1;
    }
    line.into_iter().collect()
}

impl Widget for AxisView<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let line = axis_line(self.frame.axis, area.width as usize);
        buf.set_string(area.x, area.y, line, Style::default().fg(Color::Gray));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrogram::{axis::ticks, BinWindow};

    #[test]
    fn labels_are_centred_on_ticks() {
        let ticks = ticks(BinWindow::new(0.0, 100.0), 10.0, 3);
        // ticks at 250, 500, 750 Hz
        let line = axis_line(&ticks, 40);
        assert_eq!(line.chars().count(), 40);
        assert_eq!(&line[9..12], "250");
        assert_eq!(&line[19..22], "500");
        assert_eq!(&line[29..32], "750");
    }

    #[test]
    fn crowded_labels_are_dropped() {
        let ticks = ticks(BinWindow::new(0.0, 10000.0), 1.0, 9);
        let line = axis_line(&ticks, 12);
        assert!(line.contains("1000"));
        assert!(line.split_whitespace().count() < 9);
    }
}
