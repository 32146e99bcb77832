// src/audio/player.rs
//! Playback session: decodes one file with rodio on a dedicated thread and
//! mirrors what it plays into a [`CaptureBuffer`].

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use rodio::{Decoder, OutputStream, Sink, Source};
use tracing::{debug, info, warn};

use super::sample_capture::{CaptureBuffer, SampleCapture};

/// How often the audio thread checks whether the track ran out.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Commands sent to the audio thread.
enum SessionCommand {
    Pause,
    Resume,
    Stop,
}

/// An owned playback of a single file.
///
/// Dropping the session stops playback and joins the audio thread.
pub struct PlaybackSession {
    path: PathBuf,
    cmd_tx: Sender<SessionCommand>,
    /// Mirrored from the audio thread for quick UI access
    playing: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
    capture: Arc<CaptureBuffer>,
    worker: Option<JoinHandle<()>>,
}

impl PlaybackSession {
    /// Decode `path` and start playing it, keeping the last
    /// `capture_len` mono samples available through [`capture`](Self::capture).
    pub fn start(path: &Path, capture_len: usize) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("failed to decode {}", path.display()))?;
        info!(
            "[session] {} channels={} rate={}",
            path.display(),
            source.channels(),
            source.sample_rate()
        );

        let capture = Arc::new(CaptureBuffer::new(capture_len));
        let playing = Arc::new(AtomicBool::new(false));
        let paused = Arc::new(AtomicBool::new(false));
        let (cmd_tx, cmd_rx) = mpsc::channel::<SessionCommand>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();

        let thread_capture = capture.clone();
        let thread_playing = playing.clone();
        let thread_paused = paused.clone();

        // The output stream is not Send, so it lives and dies on this thread.
        let worker = thread::Builder::new()
            .name("specscroll-audio".into())
            .spawn(move || {
                let (stream, handle) = match OutputStream::try_default() {
                    Ok(pair) => pair,
                    Err(err) => {
                        let _ = ready_tx.send(Err(format!("no audio output: {err}")));
                        return;
                    }
                };
                let sink = match Sink::try_new(&handle) {
                    Ok(sink) => sink,
                    Err(err) => {
                        let _ = ready_tx.send(Err(format!("cannot create sink: {err}")));
                        return;
                    }
                };

                sink.append(SampleCapture::new(
                    source.convert_samples::<f32>(),
                    thread_capture,
                ));
                sink.play();
                thread_playing.store(true, Ordering::SeqCst);
                let _ = ready_tx.send(Ok(()));

                loop {
                    match cmd_rx.recv_timeout(POLL_INTERVAL) {
                        Ok(SessionCommand::Pause) => {
                            sink.pause();
                            thread_paused.store(true, Ordering::SeqCst);
                        }
                        Ok(SessionCommand::Resume) => {
                            sink.play();
                            thread_paused.store(false, Ordering::SeqCst);
                        }
                        Ok(SessionCommand::Stop) | Err(RecvTimeoutError::Disconnected) => break,
                        Err(RecvTimeoutError::Timeout) => {
                            if sink.empty() && thread_playing.swap(false, Ordering::SeqCst) {
                                debug!("[session] track finished");
                            }
                        }
                    }
                }

                sink.stop();
                thread_playing.store(false, Ordering::SeqCst);
                thread_paused.store(false, Ordering::SeqCst);
                // Keep stream alive until the sink is done
                drop(stream);
            })
            .context("failed to spawn audio thread")?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(msg)) => {
                let _ = worker.join();
                return Err(anyhow!(msg));
            }
            Err(_) => {
                let _ = worker.join();
                return Err(anyhow!("audio thread exited during startup"));
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            cmd_tx,
            playing,
            paused,
            capture,
            worker: Some(worker),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Shared buffer of recently played mono samples.
    pub fn capture(&self) -> &Arc<CaptureBuffer> {
        &self.capture
    }

    pub fn pause(&self) {
        let _ = self.cmd_tx.send(SessionCommand::Pause);
    }

    pub fn resume(&self) {
        let _ = self.cmd_tx.send(SessionCommand::Resume);
    }

    pub fn toggle_pause(&self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Halt playback and wait for the audio thread. Idempotent.
    pub fn stop(&mut self) {
        let _ = self.cmd_tx.send(SessionCommand::Stop);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("[session] audio thread panicked");
            }
        }
    }

    /// True while the track has samples left to play (paused or not).
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.stop();
    }
}
