//! # linecount-rs — bidirectional line-crossing people counter
//!
//! Counts people crossing two fixed vertical lines in a video feed,
//! classifying crossings as entries (IN) or exits (OUT). Detection is
//! delegated to an external backend; this crate owns the per-frame identity
//! association and the crossing state machine.
//!
//! ## Design
//!
//! - Greedy IoU/centroid-distance association, deliberately not a global
//!   optimum assignment.
//! - No-coast track lifecycle: a person undetected for one frame loses
//!   their identity; the track store is rebuilt wholesale every frame.
//! - Hysteresis-gated crossing events: a track lingering on a line counts
//!   once, and re-counts IN only after an OUT registered in between. A
//!   5-pixel movement gate suppresses jitter.
//!
//! ## Example
//!
//! ```rust
//! use linecount_rs::{CounterConfig, Detection, LineCounter};
//!
//! let mut counter = LineCounter::new(CounterConfig::default());
//!
//! // One person walking right across a 1000 px wide frame.
//! counter.update(1000, vec![Detection::new(670.0, 100.0, 710.0, 300.0, 0.9)]);
//! counter.update(1000, vec![Detection::new(685.0, 100.0, 725.0, 300.0, 0.9)]);
//!
//! assert_eq!(counter.counts().in_count, 1);
//! ```

pub mod integration;
pub mod tracker;

// Re-exports for convenience
pub use integration::{
    CounterPipeline, CounterSession, DetectionBuilder, DetectionSource, FrameSource,
    IntoDetections, SessionControl, SessionError, VideoFrame,
};
pub use tracker::{
    CounterConfig, CountingLines, Counts, CrossingKind, Detection, LineCounter,
    MovementDirection, Rect, Track,
};
