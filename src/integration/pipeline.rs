//! CounterPipeline for combining detection with line counting.

use std::fmt;

use log::{debug, warn};

use crate::tracker::{CounterConfig, Counts, LineCounter, Track};

use super::detector::{DetectionSource, VideoFrame};

/// A combined counter that bundles detection inference with the
/// [`LineCounter`].
///
/// Per-frame detector failures are absorbed, never surfaced: a frame whose
/// detection fails contributes no detections, which drops all active tracks
/// for that frame and leaves the counts untouched.
pub struct CounterPipeline<D: DetectionSource> {
    detector: D,
    counter: LineCounter,
}

impl<D: DetectionSource> CounterPipeline<D> {
    /// Create a new counting pipeline with the given detector and config.
    pub fn new(detector: D, config: CounterConfig) -> Self {
        Self {
            detector,
            counter: LineCounter::new(config),
        }
    }

    /// Create a new counting pipeline with default configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self::new(detector, CounterConfig::default())
    }

    /// Process a single frame and return the track snapshot.
    ///
    /// Runs detection on the frame, then updates the counter with the
    /// result. A detection failure is logged and treated as an empty
    /// detection set.
    pub fn process_frame(&mut self, frame: &VideoFrame) -> Vec<Track>
    where
        D::Error: fmt::Display,
    {
        let detections = match self.detector.detect(&frame.data, frame.width, frame.height) {
            Ok(detections) => detections,
            Err(err) => {
                warn!("detection failed, frame contributes no detections: {err}");
                Vec::new()
            }
        };

        debug!("frame {}x{}: {} detections", frame.width, frame.height, detections.len());
        self.counter.update(frame.width, detections)
    }

    /// Current entry/exit totals.
    pub fn counts(&self) -> Counts {
        self.counter.counts()
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying counter.
    pub fn counter(&self) -> &LineCounter {
        &self.counter
    }

    /// Get a mutable reference to the underlying counter.
    pub fn counter_mut(&mut self) -> &mut LineCounter {
        &mut self.counter
    }
}
