// src/spectrogram/scroll.rs
//! Scrolling magnitude history: a fixed-width, resizable-height row buffer.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::error::{Result, SpectrogramError};

/// End of the buffer that receives new rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Newest row at index 0, older rows move toward the bottom.
    #[default]
    Top,
    /// Newest row at index `height - 1`, older rows move toward the top.
    Bottom,
}

/// Rolling 2-D buffer of magnitude rows.
///
/// Rows live in a ring so a push writes one row and advances an index; the
/// logical order seen through [`row`](Self::row) is the same as if every row
/// had been shifted by one.
#[derive(Debug, Clone)]
pub struct ScrollBuffer {
    data: Vec<f32>,
    width: usize,
    height: usize,
    /// Physical slot the next push writes to.
    next: usize,
    direction: Direction,
}

impl ScrollBuffer {
    /// Zero-filled buffer of `height` rows, each `width` values wide.
    pub fn new(width: usize, height: usize, direction: Direction) -> Result<Self> {
        if width == 0 {
            return Err(SpectrogramError::InvalidConfig(
                "scroll buffer width must be at least 1".into(),
            ));
        }
        check_rows(height)?;
        Ok(Self {
            data: zeroed(width, height)?,
            width,
            height,
            next: 0,
            direction,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Append `row` at the anchored end, evicting the oldest row.
    pub fn push(&mut self, row: &[f32]) -> Result<()> {
        if row.len() != self.width {
            return Err(SpectrogramError::InputSize {
                expected: self.width,
                actual: row.len(),
            });
        }
        let start = self.next * self.width;
        self.data[start..start + self.width].copy_from_slice(row);
        self.next = (self.next + 1) % self.height;
        Ok(())
    }

    /// Row at logical index `index`, or `None` past the last row.
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.height {
            return None;
        }
        let age = match self.direction {
            Direction::Top => index,
            Direction::Bottom => self.height - 1 - index,
        };
        Some(self.row_by_age(age))
    }

    /// Rows in logical (display) order.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.height).filter_map(move |i| self.row(i))
    }

    /// Most recently pushed row (zeros before the first push).
    pub fn latest(&self) -> &[f32] {
        self.row_by_age(0)
    }

    /// Copy of the whole buffer in logical row-major order.
    pub fn to_row_major(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.data.len());
        for row in self.rows() {
            out.extend_from_slice(row);
        }
        out
    }

    /// Largest value of logical row `index` within `bins`, clipped to the
    /// row width. Returns 0.0 for an empty selection.
    pub fn row_peak(&self, index: usize, bins: Range<usize>) -> f32 {
        let Some(row) = self.row(index) else {
            return 0.0;
        };
        let end = bins.end.min(self.width);
        let start = bins.start.min(end);
        row[start..end].iter().copied().fold(0.0, f32::max)
    }

    /// Change the number of rows, keeping the most recent ones at the
    /// anchored end and zero-filling the rest.
    pub fn set_visible_rows(&mut self, rows: usize) -> Result<()> {
        check_rows(rows)?;
        let keep = self.height.min(rows);
        let mut data = zeroed(self.width, rows)?;
        // Newest row goes to the last slot so the next push wraps to slot 0.
        for age in 0..keep {
            let slot = rows - 1 - age;
            data[slot * self.width..(slot + 1) * self.width]
                .copy_from_slice(self.row_by_age(age));
        }
        self.data = data;
        self.height = rows;
        self.next = 0;
        Ok(())
    }

    /// Zero every row.
    pub fn reset(&mut self) {
        self.data.fill(0.0);
        self.next = 0;
    }

    // age 0 is the newest row, `height - 1` the oldest.
    fn row_by_age(&self, age: usize) -> &[f32] {
        let slot = (self.next + self.height - 1 - age) % self.height;
        &self.data[slot * self.width..(slot + 1) * self.width]
    }
}

// Zero-filled storage for `rows` rows, or an error when it cannot be sized.
fn zeroed(width: usize, rows: usize) -> Result<Vec<f32>> {
    let too_large = || {
        SpectrogramError::InvalidConfig(format!(
            "{rows} rows of {width} values do not fit in memory"
        ))
    };
    let len = width.checked_mul(rows).ok_or_else(too_large)?;
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|_| too_large())?;
    data.resize(len, 0.0);
    Ok(data)
}

fn check_rows(rows: usize) -> Result<()> {
    if rows == 0 {
        Err(SpectrogramError::InvalidConfig(
            "visible rows must be at least 1".into(),
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn filled(width: usize, value: f32) -> Vec<f32> {
        vec![value; width]
    }

    /// Reference model: shifts every row on each push.
    struct ShiftModel {
        rows: Vec<Vec<f32>>,
        width: usize,
        direction: Direction,
    }

    impl ShiftModel {
        fn new(width: usize, height: usize, direction: Direction) -> Self {
            Self {
                rows: vec![vec![0.0; width]; height],
                width,
                direction,
            }
        }

        fn push(&mut self, row: &[f32]) {
            let h = self.rows.len();
            match self.direction {
                Direction::Top => {
                    for i in (1..h).rev() {
                        self.rows[i] = self.rows[i - 1].clone();
                    }
                    self.rows[0] = row.to_vec();
                }
                Direction::Bottom => {
                    for i in 0..h - 1 {
                        self.rows[i] = self.rows[i + 1].clone();
                    }
                    self.rows[h - 1] = row.to_vec();
                }
            }
        }

        fn resize(&mut self, rows: usize) {
            let h = self.rows.len();
            let keep = h.min(rows);
            let zero = vec![0.0; self.width];
            self.rows = match self.direction {
                Direction::Top => {
                    let mut next: Vec<_> = self.rows[..keep].to_vec();
                    next.resize(rows, zero);
                    next
                }
                Direction::Bottom => {
                    let mut next = vec![zero; rows - keep];
                    next.extend_from_slice(&self.rows[h - keep..]);
                    next
                }
            };
        }

        fn flat(&self) -> Vec<f32> {
            self.rows.concat()
        }
    }

    #[test]
    fn top_anchored_keeps_newest_at_row_zero() {
        let mut buf = ScrollBuffer::new(3, 4, Direction::Top).unwrap();
        for v in 1..=4 {
            buf.push(&filled(3, v as f32)).unwrap();
        }
        assert_eq!(buf.row(0).unwrap(), &[4.0; 3]);
        assert_eq!(buf.row(3).unwrap(), &[1.0; 3]);

        buf.push(&filled(3, 5.0)).unwrap();
        let firsts: Vec<f32> = buf.rows().map(|r| r[0]).collect();
        assert_eq!(firsts, vec![5.0, 4.0, 3.0, 2.0]);
    }

    #[test]
    fn bottom_anchored_keeps_newest_at_last_row() {
        let mut buf = ScrollBuffer::new(2, 3, Direction::Bottom).unwrap();
        buf.push(&[1.0, 1.5]).unwrap();
        let firsts: Vec<f32> = buf.rows().map(|r| r[0]).collect();
        assert_eq!(firsts, vec![0.0, 0.0, 1.0]);

        buf.push(&[2.0, 2.5]).unwrap();
        buf.push(&[3.0, 3.5]).unwrap();
        buf.push(&[4.0, 4.5]).unwrap();
        assert_eq!(buf.row(2).unwrap(), &[4.0, 4.5]);
        assert_eq!(buf.row(0).unwrap(), &[2.0, 2.5]);
        assert_eq!(buf.latest(), &[4.0, 4.5]);
    }

    #[test]
    fn wrong_width_is_rejected_without_mutation() {
        let mut buf = ScrollBuffer::new(4, 2, Direction::Top).unwrap();
        buf.push(&filled(4, 1.0)).unwrap();
        let before = buf.to_row_major();

        let err = buf.push(&filled(3, 9.0)).unwrap_err();
        assert_eq!(
            err,
            SpectrogramError::InputSize {
                expected: 4,
                actual: 3
            }
        );
        assert_eq!(buf.to_row_major(), before);
        assert_eq!(buf.latest(), &[1.0; 4]);
    }

    #[test]
    fn shrinking_keeps_most_recent_rows() {
        for direction in [Direction::Top, Direction::Bottom] {
            let mut buf = ScrollBuffer::new(1, 5, direction).unwrap();
            for v in 1..=5 {
                buf.push(&[v as f32]).unwrap();
            }
            buf.set_visible_rows(2).unwrap();
            let rows: Vec<f32> = buf.rows().map(|r| r[0]).collect();
            match direction {
                Direction::Top => assert_eq!(rows, vec![5.0, 4.0]),
                Direction::Bottom => assert_eq!(rows, vec![4.0, 5.0]),
            }
        }
    }

    #[test]
    fn growing_zero_fills_far_end() {
        let mut top = ScrollBuffer::new(1, 2, Direction::Top).unwrap();
        top.push(&[1.0]).unwrap();
        top.push(&[2.0]).unwrap();
        top.set_visible_rows(4).unwrap();
        assert_eq!(top.to_row_major(), vec![2.0, 1.0, 0.0, 0.0]);

        let mut bottom = ScrollBuffer::new(1, 2, Direction::Bottom).unwrap();
        bottom.push(&[1.0]).unwrap();
        bottom.push(&[2.0]).unwrap();
        bottom.set_visible_rows(4).unwrap();
        assert_eq!(bottom.to_row_major(), vec![0.0, 0.0, 1.0, 2.0]);

        // pushes after a resize continue from the anchored end
        bottom.push(&[3.0]).unwrap();
        assert_eq!(bottom.to_row_major(), vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn zero_rows_is_invalid() {
        assert!(ScrollBuffer::new(4, 0, Direction::Top).is_err());
        let mut buf = ScrollBuffer::new(4, 2, Direction::Top).unwrap();
        assert!(buf.set_visible_rows(0).is_err());
        assert_eq!(buf.height(), 2);
    }

    #[test]
    fn oversized_row_count_is_an_error() {
        assert!(matches!(
            ScrollBuffer::new(8192, usize::MAX / 4096, Direction::Top),
            Err(SpectrogramError::InvalidConfig(_))
        ));

        let mut buf = ScrollBuffer::new(8192, 4, Direction::Top).unwrap();
        buf.push(&filled(8192, 0.5)).unwrap();
        let before = buf.to_row_major();

        // overflows the element count, then the byte count
        for rows in [usize::MAX / 4096, usize::MAX / 8192] {
            let err = buf.set_visible_rows(rows).unwrap_err();
            assert!(matches!(err, SpectrogramError::InvalidConfig(_)));
            assert_eq!(buf.height(), 4);
            assert_eq!(buf.to_row_major(), before);
        }

        buf.push(&filled(8192, 0.25)).unwrap();
        assert_eq!(buf.latest(), &[0.25; 8192][..]);
    }

    #[test]
    fn reset_zero_fills() {
        let mut buf = ScrollBuffer::new(2, 2, Direction::Top).unwrap();
        buf.push(&[0.5, 0.7]).unwrap();
        buf.reset();
        assert!(buf.to_row_major().iter().all(|&v| v == 0.0));
        buf.push(&[0.1, 0.2]).unwrap();
        assert_eq!(buf.row(0).unwrap(), &[0.1, 0.2]);
    }

    #[test]
    fn row_peak_clips_to_width() {
        let mut buf = ScrollBuffer::new(4, 1, Direction::Top).unwrap();
        buf.push(&[0.1, 0.9, 0.3, 0.4]).unwrap();
        assert_eq!(buf.row_peak(0, 0..2), 0.9);
        assert_eq!(buf.row_peak(0, 2..100), 0.4);
        assert_eq!(buf.row_peak(0, 3..3), 0.0);
        assert_eq!(buf.row_peak(5, 0..4), 0.0);
    }

    #[test]
    fn ring_matches_row_shifting() {
        let mut rng = rand::rng();
        for direction in [Direction::Top, Direction::Bottom] {
            let width = 3;
            let mut buf = ScrollBuffer::new(width, 5, direction).unwrap();
            let mut model = ShiftModel::new(width, 5, direction);

            for step in 0..500 {
                if step % 37 == 36 {
                    let rows = rng.random_range(1..9);
                    buf.set_visible_rows(rows).unwrap();
                    model.resize(rows);
                } else {
                    let row: Vec<f32> = (0..width).map(|_| rng.random::<f32>()).collect();
                    buf.push(&row).unwrap();
                    model.push(&row);
                }
                assert_eq!(buf.to_row_major(), model.flat(), "step {step} {direction:?}");
            }
        }
    }
}
