//! Single tracked person record.

use crate::tracker::direction::{CrossingKind, MovementDirection};
use crate::tracker::rect::Rect;

/// State of one tracked person, valid for one frame.
///
/// Tracks live only as long as they are matched: a person undetected for a
/// single frame loses their identity, and a redetection mints a new one.
/// The store holding these records is rebuilt wholesale every frame.
#[derive(Debug, Clone)]
pub struct Track {
    /// Unique track identifier, assigned once, never reused
    pub id: u64,
    /// Current bounding box (TLWH format)
    pub bbox: Rect,
    /// Centroid in integer pixel coordinates
    pub centroid: (i32, i32),
    /// Horizontal centroid coordinate as of this update; the "previous x"
    /// for the next frame's crossing test
    pub prev_x: i32,
    /// Hysteresis flag: currently inside the IN region
    pub last_in: bool,
    /// Hysteresis flag: currently past the OUT region
    pub last_out: bool,
    /// Crossing event fired on this frame, `None` on all other frames
    pub direction: Option<CrossingKind>,
    /// Horizontal movement direction; carried over when x is unchanged
    pub movement_direction: Option<MovementDirection>,
    /// Most recent detection confidence (display-only)
    pub score: f32,
}

impl Track {
    /// Create a fresh track from a first-frame detection.
    ///
    /// New tracks carry no history and can never fire a crossing event on
    /// the frame they are created.
    pub fn new(id: u64, bbox: Rect, score: f32) -> Self {
        let centroid = bbox.centroid();
        Self {
            id,
            bbox,
            centroid,
            prev_x: centroid.0,
            last_in: false,
            last_out: false,
            direction: None,
            movement_direction: None,
            score,
        }
    }

    /// Horizontal centroid coordinate.
    #[inline]
    pub fn x(&self) -> i32 {
        self.centroid.0
    }
}
