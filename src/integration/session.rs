//! Frame-sequential counting session with cooperative control.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};
use thiserror::Error;

use crate::tracker::{CounterConfig, Counts};

use super::detector::{DetectionSource, FrameSource};
use super::pipeline::CounterPipeline;

/// Session-ending failures.
///
/// Only source unavailability at startup is fatal; per-frame anomalies
/// (detection failures, degenerate boxes) are absorbed inside the loop.
#[derive(Debug, Error)]
pub enum SessionError<E> {
    /// The video source could not produce its first frame.
    #[error("video source unavailable")]
    SourceUnavailable(#[source] E),
    /// The video source opened but yielded no initial frame.
    #[error("video source yielded no initial frame")]
    EmptySource,
}

/// Cloneable handle for controlling a running session from another thread
/// (a CLI or UI collaborator).
///
/// Requests are cooperative: they are observed once per completed frame, so
/// in-flight frame processing always finishes and the counter state stays
/// consistent when the loop exits.
#[derive(Debug, Clone, Default)]
pub struct SessionControl {
    stop: Arc<AtomicBool>,
    reset: Arc<AtomicBool>,
}

impl SessionControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the session to terminate after the current frame.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Ask the session to zero the counts and drop all tracks after the
    /// current frame.
    pub fn request_reset(&self) {
        self.reset.store(true, Ordering::SeqCst);
    }

    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    fn take_reset(&self) -> bool {
        self.reset.swap(false, Ordering::SeqCst)
    }
}

/// The frame-sequential processing loop: acquire frame, detect, update the
/// counter, apply control requests, repeat.
///
/// Single-threaded by construction; the only blocking point is frame
/// acquisition, which carries no timeout.
pub struct CounterSession<S: FrameSource, D: DetectionSource> {
    source: S,
    pipeline: CounterPipeline<D>,
    control: SessionControl,
}

impl<S: FrameSource, D: DetectionSource> CounterSession<S, D> {
    pub fn new(source: S, detector: D, config: CounterConfig) -> Self {
        Self {
            source,
            pipeline: CounterPipeline::new(detector, config),
            control: SessionControl::new(),
        }
    }

    /// Handle for stop/reset requests, safe to hand to another thread.
    pub fn control(&self) -> SessionControl {
        self.control.clone()
    }

    /// Get a reference to the underlying pipeline.
    pub fn pipeline(&self) -> &CounterPipeline<D> {
        &self.pipeline
    }

    /// Get a mutable reference to the underlying pipeline.
    pub fn pipeline_mut(&mut self) -> &mut CounterPipeline<D> {
        &mut self.pipeline
    }

    /// Run the session to completion and return the final counts.
    ///
    /// Fatal only if the source cannot produce a first frame. A mid-stream
    /// acquisition failure ends the loop cleanly, like end of stream.
    pub fn run(&mut self) -> Result<Counts, SessionError<S::Error>>
    where
        D::Error: fmt::Display,
        S::Error: fmt::Display,
    {
        let first = self
            .source
            .next_frame()
            .map_err(SessionError::SourceUnavailable)?
            .ok_or(SessionError::EmptySource)?;

        info!("session started, {}x{} frames", first.width, first.height);

        let mut frame = first;
        loop {
            self.pipeline.process_frame(&frame);

            // Control flags are observed once per completed frame.
            if self.control.take_reset() {
                self.pipeline.counter_mut().reset();
            }
            if self.control.stop_requested() {
                info!("stop requested, session ending");
                break;
            }

            frame = match self.source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(err) => {
                    warn!("frame acquisition failed mid-stream, ending session: {err}");
                    break;
                }
            };
        }

        let counts = self.pipeline.counts();
        info!(
            "session ended: in {}, out {}, occupancy {}",
            counts.in_count,
            counts.out_count,
            counts.occupancy()
        );
        Ok(counts)
    }
}
