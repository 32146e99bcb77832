// src/spectrogram/mod.rs
//! Scrolling spectrogram core: row history, zoom window and peak hold.
//!
//! A [`Spectrogram`] is fed one normalised magnitude row per [`step`] and
//! polled by a renderer through [`render`], which only yields a frame when
//! something changed since the previous one.
//!
//! [`step`]: Spectrogram::step
//! [`render`]: Spectrogram::render

pub mod axis;
pub mod error;
pub mod look;
pub mod options;
pub mod peak_hold;
pub mod scroll;
pub mod shared;
pub mod signal;
pub mod zoom;

use std::time::Duration;

use tracing::{debug, info, warn};

pub use axis::AxisTick;
pub use error::{Result, SpectrogramError};
pub use look::{Look, PALETTE_STOPS};
pub use options::SpectrogramOptions;
pub use peak_hold::PeakHold;
pub use scroll::{Direction, ScrollBuffer};
pub use shared::SharedSpectrogram;
pub use signal::SignalInfo;
pub use zoom::{drag_to_bins, BinWindow, FrequencyRange, ScaleStep};

/// Live state of a pipeline that has not been disposed.
#[derive(Debug)]
struct Pipeline {
    signal: SignalInfo,
    zoom: FrequencyRange,
    history: ScrollBuffer,
    peaks: PeakHold,
    axis: Vec<AxisTick>,
    axis_ticks: usize,
    look: Look,
    render_interval: Duration,
    dirty: bool,
}

impl Pipeline {
    fn refresh_axis(&mut self) {
        self.axis = axis::ticks(
            self.zoom.window(),
            self.signal.fft_resolution(),
            self.axis_ticks,
        );
    }

    fn zoom_changed(&mut self) {
        self.peaks.update_range(self.zoom.normalized());
        self.refresh_axis();
        self.dirty = true;
    }
}

/// Everything a renderer needs for one frame, borrowed from the pipeline.
#[derive(Debug)]
pub struct RenderFrame<'a> {
    /// Zoom window as fractions of the bin count.
    pub range: (f64, f64),
    pub window: BinWindow,
    pub signal: SignalInfo,
    pub history: &'a ScrollBuffer,
    /// Held peaks, one per bin.
    pub peaks: &'a [f32],
    /// Row of the latest step.
    pub latest: &'a [f32],
    pub axis: &'a [AxisTick],
    pub look: &'a Look,
}

/// Scrolling spectrogram pipeline.
///
/// All mutating calls take `&mut self`; wrap the pipeline in a
/// [`SharedSpectrogram`] to drive it from more than one thread.
#[derive(Debug)]
pub struct Spectrogram {
    name: String,
    inner: Option<Pipeline>,
}

impl Spectrogram {
    /// Build a pipeline from `options`.
    pub fn new(options: SpectrogramOptions) -> Result<Self> {
        let signal = SignalInfo::new(options.fft_size, options.sampling)?;
        let bins = signal.bins();
        let mut zoom = FrequencyRange::new(bins, options.min_range_bins)?;
        let history = ScrollBuffer::new(bins, options.visible_rows, options.direction)?;
        let mut peaks = PeakHold::new(bins, options.fall_rate)?;
        options.look.validate()?;

        if let Some((fmin, fmax)) = options.freq_range {
            if let Err(err) = zoom.set_range(fmin, fmax, signal.fft_resolution()) {
                warn!("[{}] initial range ignored: {err}", options.name);
            }
        }
        peaks.update_range(zoom.normalized());

        info!(
            "[{}] fft_size={} sampling={} bins={} resolution={:.3} Hz rows={} direction={:?}",
            options.name,
            signal.fft_size(),
            signal.sampling(),
            bins,
            signal.fft_resolution(),
            options.visible_rows,
            options.direction
        );

        let mut pipeline = Pipeline {
            signal,
            zoom,
            history,
            peaks,
            axis: Vec::new(),
            axis_ticks: options.axis_ticks,
            look: options.look,
            render_interval: options.render_interval(),
            dirty: true,
        };
        pipeline.refresh_axis();

        Ok(Self {
            name: options.name,
            inner: Some(pipeline),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.is_none()
    }

    /// Push one magnitude row into the history and the peak hold.
    ///
    /// The row must hold exactly `bins` values; otherwise nothing changes.
    pub fn step(&mut self, row: &[f32]) -> Result<()> {
        let pipeline = self.inner.as_mut().ok_or(SpectrogramError::Disposed)?;
        let bins = pipeline.signal.bins();
        if row.len() != bins {
            return Err(SpectrogramError::InputSize {
                expected: bins,
                actual: row.len(),
            });
        }
        pipeline.peaks.update(row)?;
        pipeline.history.push(row)?;
        pipeline.dirty = true;
        Ok(())
    }

    /// Change the effective sample rate. Zoom window and buffers are kept.
    pub fn set_sampling(&mut self, sampling: f64) -> Result<()> {
        let pipeline = self.inner.as_mut().ok_or(SpectrogramError::Disposed)?;
        pipeline.signal.set_sampling(sampling)?;
        pipeline.refresh_axis();
        pipeline.dirty = true;
        info!(
            "[{}] sampling={} resolution={:.3} Hz",
            self.name,
            sampling,
            pipeline.signal.fft_resolution()
        );
        Ok(())
    }

    /// Zero the history and the held peaks. The zoom window is kept.
    pub fn reset(&mut self) -> Result<()> {
        let pipeline = self.inner.as_mut().ok_or(SpectrogramError::Disposed)?;
        pipeline.history.reset();
        pipeline.peaks.reset();
        pipeline.dirty = true;
        Ok(())
    }

    pub fn set_visible_rows(&mut self, rows: usize) -> Result<()> {
        let pipeline = self.inner.as_mut().ok_or(SpectrogramError::Disposed)?;
        pipeline.history.set_visible_rows(rows)?;
        pipeline.dirty = true;
        debug!("[{}] visible rows={}", self.name, rows);
        Ok(())
    }

    /// Show `fmin..fmax` Hz. A malformed range is logged and returned as an
    /// error; the previous window stays.
    pub fn set_freq_range(&mut self, fmin: f64, fmax: f64) -> Result<()> {
        let pipeline = self.inner.as_mut().ok_or(SpectrogramError::Disposed)?;
        let resolution = pipeline.signal.fft_resolution();
        match pipeline.zoom.set_range(fmin, fmax, resolution) {
            Ok(window) => {
                pipeline.zoom_changed();
                debug!("[{}] range bins {}..{}", self.name, window.min, window.max);
                Ok(())
            }
            Err(err) => {
                warn!("[{}] wrong freq. range: {err}", self.name);
                Err(err)
            }
        }
    }

    /// Zoom in for negative `delta`, out otherwise.
    pub fn scale_freq_range(&mut self, delta: f64) -> Result<ScaleStep> {
        let pipeline = self.inner.as_mut().ok_or(SpectrogramError::Disposed)?;
        let step = pipeline.zoom.scale(delta);
        pipeline.zoom_changed();
        debug!(
            "[{}] scale {:?} -> {:?}",
            self.name,
            step,
            pipeline.zoom.window()
        );
        Ok(step)
    }

    /// Pan by `delta` bins; see [`FrequencyRange::pan`] for the sign.
    pub fn move_freq_range(&mut self, delta: f64) -> Result<bool> {
        let pipeline = self.inner.as_mut().ok_or(SpectrogramError::Disposed)?;
        let moved = pipeline.zoom.pan(delta);
        if moved {
            pipeline.zoom_changed();
        }
        Ok(moved)
    }

    /// Back to the full bin range.
    pub fn full_range(&mut self) -> Result<()> {
        let pipeline = self.inner.as_mut().ok_or(SpectrogramError::Disposed)?;
        pipeline.zoom.set_full();
        pipeline.zoom_changed();
        Ok(())
    }

    /// `(min / bins, max / bins)` of the zoom window.
    pub fn normalized_range(&self) -> Result<(f64, f64)> {
        Ok(self.live()?.zoom.normalized())
    }

    pub fn window(&self) -> Result<BinWindow> {
        Ok(self.live()?.zoom.window())
    }

    pub fn signal(&self) -> Result<SignalInfo> {
        Ok(self.live()?.signal)
    }

    pub fn history(&self) -> Result<&ScrollBuffer> {
        Ok(&self.live()?.history)
    }

    pub fn peaks(&self) -> Result<&[f32]> {
        Ok(self.live()?.peaks.peaks())
    }

    pub fn axis(&self) -> Result<&[AxisTick]> {
        Ok(&self.live()?.axis)
    }

    pub fn render_interval(&self) -> Result<Duration> {
        Ok(self.live()?.render_interval)
    }

    pub fn set_base_colors(&mut self, colors: [u32; PALETTE_STOPS]) -> Result<()> {
        let pipeline = self.inner.as_mut().ok_or(SpectrogramError::Disposed)?;
        pipeline.look.set_base_colors(colors);
        pipeline.dirty = true;
        Ok(())
    }

    pub fn set_color_map_range(&mut self, min: f32, max: f32) -> Result<()> {
        let pipeline = self.inner.as_mut().ok_or(SpectrogramError::Disposed)?;
        if let Err(err) = pipeline.look.set_color_map_range(min, max) {
            warn!("[{}] {err}", self.name);
            return Err(err);
        }
        pipeline.dirty = true;
        Ok(())
    }

    /// True when a mutation happened since the last frame.
    pub fn needs_render(&self) -> Result<bool> {
        Ok(self.live()?.dirty)
    }

    /// Force the next [`render`](Self::render) to produce a frame, e.g.
    /// after the host surface was resized.
    pub fn invalidate(&mut self) -> Result<()> {
        let pipeline = self.inner.as_mut().ok_or(SpectrogramError::Disposed)?;
        pipeline.dirty = true;
        Ok(())
    }

    /// Frame for the renderer if anything changed since the previous call.
    pub fn render(&mut self) -> Result<Option<RenderFrame<'_>>> {
        let pipeline = self.inner.as_mut().ok_or(SpectrogramError::Disposed)?;
        if !pipeline.dirty {
            return Ok(None);
        }
        pipeline.dirty = false;
        Ok(Some(RenderFrame {
            range: pipeline.zoom.normalized(),
            window: pipeline.zoom.window(),
            signal: pipeline.signal,
            history: &pipeline.history,
            peaks: pipeline.peaks.peaks(),
            latest: pipeline.peaks.new_data(),
            axis: &pipeline.axis,
            look: &pipeline.look,
        }))
    }

    /// Release all buffers. Every later call fails with
    /// [`SpectrogramError::Disposed`].
    pub fn dispose(&mut self) -> Result<()> {
        self.inner.take().ok_or(SpectrogramError::Disposed)?;
        info!("[{}] disposed", self.name);
        Ok(())
    }

    fn live(&self) -> Result<&Pipeline> {
        self.inner.as_ref().ok_or(SpectrogramError::Disposed)
    }
}
