//! Traits for the external video and detection backends.

use crate::tracker::Detection;

/// One decoded video frame handed through the pipeline.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Raw image bytes (format is an agreement between source and detector)
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
}

impl VideoFrame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }
}

/// Trait for object detection inference backends.
///
/// Implement this trait to connect any detection model to the counter.
/// Detections may carry any class label and confidence; the counter filters
/// to persons above its confidence threshold itself.
///
/// # Example
///
/// ```ignore
/// use linecount_rs::{DetectionSource, Detection};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<Detection>, Self::Error> {
///         // Run inference and return detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Run inference on raw image data and return detections.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

/// Trait for frame acquisition backends (camera, file decoder, network
/// stream).
///
/// `next_frame` may block for bounded I/O; the session loop has no timeout
/// around it, so an indefinitely stalled source stalls the session.
pub trait FrameSource {
    /// Error type for acquisition failures.
    type Error;

    /// Fetch the next frame, or `None` at end of stream.
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to `Detection`.
///
/// Implement this for your model's output format to enable easy conversion.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}
