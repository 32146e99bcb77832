// src/audio/sample_capture.rs
//! A pass-through source that mirrors played samples into a shared ring buffer.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ringbuf::{traits::*, HeapRb};
use rodio::Source;

/// Mono samples recently sent to the output, plus the rate they play at.
pub struct CaptureBuffer {
    samples: Mutex<HeapRb<f32>>,
    /// 0 until the first sample has been captured.
    sample_rate: AtomicU32,
}

impl CaptureBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Mutex::new(HeapRb::<f32>::new(capacity.max(1))),
            sample_rate: AtomicU32::new(0),
        }
    }

    /// Append one sample, dropping the oldest when full.
    pub fn push(&self, sample: f32) {
        if let Ok(mut buf) = self.samples.lock() {
            if buf.is_full() {
                let _ = buf.try_pop();
            }
            let _ = buf.try_push(sample);
        }
    }

    /// Copy of the newest `count` samples, or `None` while fewer are buffered.
    pub fn latest(&self, count: usize) -> Option<Vec<f32>> {
        let buf = self.samples.lock().ok()?;
        let available = buf.occupied_len();
        if available < count {
            return None;
        }
        Some(buf.iter().skip(available - count).copied().collect())
    }

    pub fn len(&self) -> usize {
        self.samples.lock().map(|buf| buf.occupied_len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut buf) = self.samples.lock() {
            buf.clear();
        }
        self.sample_rate.store(0, Ordering::Relaxed);
    }

    /// Rate of the captured stream in Hz, once known.
    pub fn sample_rate(&self) -> Option<u32> {
        match self.sample_rate.load(Ordering::Relaxed) {
            0 => None,
            rate => Some(rate),
        }
    }

    fn publish_rate(&self, rate: u32) {
        self.sample_rate.store(rate, Ordering::Relaxed);
    }
}

/// Wraps a source, down-mixing each frame to mono into a [`CaptureBuffer`]
/// while passing the interleaved samples through untouched.
pub struct SampleCapture<S> {
    source: S,
    buffer: Arc<CaptureBuffer>,
    frame_sum: f32,
    frame_pos: u16,
}

impl<S> SampleCapture<S> {
    pub fn new(source: S, buffer: Arc<CaptureBuffer>) -> Self {
        Self {
            source,
            buffer,
            frame_sum: 0.0,
            frame_pos: 0,
        }
    }
}

impl<S> Iterator for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let channels = self.source.channels().max(1);
        let rate = self.source.sample_rate();
        let sample = self.source.next()?;

        self.frame_sum += sample;
        self.frame_pos += 1;
        if self.frame_pos >= channels {
            self.buffer.publish_rate(rate);
            self.buffer.push(self.frame_sum / channels as f32);
            self.frame_sum = 0.0;
            self.frame_pos = 0;
        }
        Some(sample)
    }
}

impl<S> Source for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.source.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.source.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.source.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.source.total_duration()
    }
}
