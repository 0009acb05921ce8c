//! Integration module for connecting video and detection backends with the
//! counter.
//!
//! This module provides the trait boundaries for the external collaborators
//! (frame acquisition, object detection) plus the per-frame pipeline and
//! the frame-sequential session loop built on top of them.

mod builder;
mod detector;
mod pipeline;
mod session;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, FrameSource, IntoDetections, VideoFrame};
pub use pipeline::CounterPipeline;
pub use session::{CounterSession, SessionControl, SessionError};
