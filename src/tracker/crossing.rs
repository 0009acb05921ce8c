//! Counting lines and the per-track crossing state machine.

use crate::tracker::direction::CrossingKind;
use crate::tracker::line_counter::CounterConfig;

/// The two fixed vertical counting lines, in pixel coordinates.
///
/// Derived once from the first frame's width and never recomputed, even if
/// the source changes frame size mid-stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountingLines {
    /// IN line, crossed left to right to enter
    pub line_in_x: i32,
    /// OUT line, crossed right to left to leave
    pub line_out_x: i32,
}

impl CountingLines {
    pub fn new(line_in_x: i32, line_out_x: i32) -> Self {
        Self {
            line_in_x,
            line_out_x,
        }
    }

    /// Place the lines from the frame width: OUT at 20% from the left,
    /// IN at 70%, truncated to whole pixels.
    pub fn from_frame_width(width: u32, config: &CounterConfig) -> Self {
        Self {
            line_in_x: (width as f32 * config.in_line_frac) as i32,
            line_out_x: (width as f32 * config.out_line_frac) as i32,
        }
    }

    /// Advance the crossing state machine for one track update.
    ///
    /// Fires at most one event: the IN and OUT edge conditions are both
    /// checked (IN first) but cannot hold simultaneously since the IN line
    /// sits to the right of the OUT line.
    ///
    /// The movement gate suppresses jitter: a near-stationary centroid
    /// oscillating across a line by a few pixels never counts. The
    /// hysteresis flags suppress re-counting: a track lingering past the IN
    /// line only counts IN again after an OUT has registered in between.
    /// Flags are updated on every edge transition whether or not the event
    /// fired.
    pub(crate) fn evaluate(
        &self,
        prev_x: i32,
        current_x: i32,
        last_in: bool,
        last_out: bool,
        min_movement: i32,
    ) -> CrossingUpdate {
        let movement_distance = (current_x - prev_x).abs();

        let mut update = CrossingUpdate {
            fired: None,
            last_in,
            last_out,
        };

        if prev_x < self.line_in_x && current_x >= self.line_in_x {
            if movement_distance > min_movement && (!update.last_in || update.last_out) {
                update.fired = Some(CrossingKind::In);
            }
            update.last_in = true;
            update.last_out = false;
        }

        if prev_x > self.line_out_x && current_x <= self.line_out_x {
            if movement_distance > min_movement && !update.last_out {
                update.fired = Some(CrossingKind::Out);
            }
            update.last_out = true;
            update.last_in = false;
        }

        update
    }
}

/// Result of one crossing evaluation: the event that fired, if any, and the
/// hysteresis flags to store on the track.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CrossingUpdate {
    pub fired: Option<CrossingKind>,
    pub last_in: bool,
    pub last_out: bool,
}
