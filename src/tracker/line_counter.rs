//! Main line-crossing counter implementation.

use std::collections::BTreeMap;

use log::info;

use crate::tracker::crossing::CountingLines;
use crate::tracker::direction::{CrossingKind, MovementDirection};
use crate::tracker::matching::{self, Detection};
use crate::tracker::track::Track;

/// Configuration for the LineCounter.
#[derive(Debug, Clone)]
pub struct CounterConfig {
    /// Minimum detection confidence admitted into tracking (strict)
    pub conf_thresh: f32,
    /// IoU above which overlap dominates the association score
    pub iou_thresh: f32,
    /// Maximum centroid distance considered for association, in pixels
    pub max_distance: f32,
    /// Minimum association score to accept a match (strict)
    pub match_thresh: f32,
    /// Minimum per-frame centroid movement for a crossing to count (strict)
    pub min_movement: i32,
    /// IN line position as a fraction of frame width
    pub in_line_frac: f32,
    /// OUT line position as a fraction of frame width
    pub out_line_frac: f32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            conf_thresh: 0.6,
            iou_thresh: 0.3,
            max_distance: 150.0,
            match_thresh: 0.1,
            min_movement: 5,
            in_line_frac: 0.7,
            out_line_frac: 0.2,
        }
    }
}

/// Running entry/exit totals for a counting session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub in_count: u64,
    pub out_count: u64,
}

impl Counts {
    /// People currently inside the monitored region, clamped at zero.
    #[inline]
    pub fn occupancy(&self) -> u64 {
        self.in_count.saturating_sub(self.out_count)
    }
}

/// Counts people crossing two fixed vertical lines.
///
/// Each call to [`update`](Self::update) consumes one frame's detections,
/// associates them with the previous frame's tracks, evaluates line
/// crossings, and replaces the track store wholesale. Unmatched tracks are
/// dropped immediately: there is no coast period, so a person undetected
/// for a single frame is reassigned a fresh identity on redetection.
pub struct LineCounter {
    tracks: BTreeMap<u64, Track>,
    next_id: u64,
    counts: Counts,
    lines: Option<CountingLines>,
    config: CounterConfig,
}

impl LineCounter {
    pub fn new(config: CounterConfig) -> Self {
        Self {
            tracks: BTreeMap::new(),
            next_id: 0,
            counts: Counts::default(),
            lines: None,
            config,
        }
    }

    /// Process one frame's detections and return the new track snapshot,
    /// in ascending identity order.
    ///
    /// The counting lines are derived from `frame_width` on the first call
    /// and fixed for the rest of the session; later width changes are
    /// ignored.
    pub fn update(&mut self, frame_width: u32, detections: Vec<Detection>) -> Vec<Track> {
        let lines = *self
            .lines
            .get_or_insert_with(|| CountingLines::from_frame_width(frame_width, &self.config));

        let admitted: Vec<Detection> = detections
            .into_iter()
            .filter(|d| d.is_person() && d.score > self.config.conf_thresh)
            .collect();

        // Previous tracks in ascending identity order, so greedy
        // tie-breaking is deterministic.
        let prev_tracks: Vec<Track> = self.tracks.values().cloned().collect();
        let track_ids: Vec<u64> = prev_tracks.iter().map(|t| t.id).collect();

        let scores = matching::score_matrix(&admitted, &prev_tracks, &self.config);
        let assignment = matching::greedy_assignment(&scores, &track_ids, self.config.match_thresh);

        let mut assigned: Vec<Option<u64>> = vec![None; admitted.len()];
        for (det_idx, id) in assignment.matches {
            assigned[det_idx] = Some(id);
        }

        let mut new_tracks = BTreeMap::new();
        for (det_idx, det) in admitted.iter().enumerate() {
            let track = match assigned[det_idx] {
                Some(id) => {
                    let prev = &self.tracks[&id];
                    advance_track(prev, det, lines, &self.config, &mut self.counts)
                }
                None => {
                    let id = self.next_id;
                    self.next_id += 1;
                    Track::new(id, det.bbox, det.score)
                }
            };
            new_tracks.insert(track.id, track);
        }

        // Wholesale replacement; unmatched previous tracks vanish here.
        self.tracks = new_tracks;
        self.tracks.values().cloned().collect()
    }

    /// Current entry/exit totals.
    pub fn counts(&self) -> Counts {
        self.counts
    }

    /// Active tracks from the last processed frame, keyed by identity.
    pub fn tracks(&self) -> &BTreeMap<u64, Track> {
        &self.tracks
    }

    /// Counting line positions, `None` until the first frame is processed.
    pub fn lines(&self) -> Option<CountingLines> {
        self.lines
    }

    /// Explicitly reconfigure the counting lines.
    pub fn set_lines(&mut self, lines: CountingLines) {
        self.lines = Some(lines);
    }

    /// Start a new counting session: zero the counts and drop all tracks.
    ///
    /// Identity numbering continues from where it left off so identities
    /// stay unique across resets.
    pub fn reset(&mut self) {
        self.counts = Counts::default();
        self.tracks.clear();
        info!("counter reset, identities continue from {}", self.next_id);
    }
}

/// Carry a matched track into the current frame: evaluate the crossing
/// state machine, update the counts, and rebuild the track record.
fn advance_track(
    prev: &Track,
    det: &Detection,
    lines: CountingLines,
    config: &CounterConfig,
    counts: &mut Counts,
) -> Track {
    let centroid = det.bbox.centroid();
    let current_x = centroid.0;

    let update = lines.evaluate(
        prev.prev_x,
        current_x,
        prev.last_in,
        prev.last_out,
        config.min_movement,
    );

    match update.fired {
        Some(CrossingKind::In) => {
            counts.in_count += 1;
            info!("person {} crossed IN, in count {}", prev.id, counts.in_count);
        }
        Some(CrossingKind::Out) => {
            counts.out_count += 1;
            info!("person {} crossed OUT, out count {}", prev.id, counts.out_count);
        }
        None => {}
    }

    let movement_direction = match current_x.cmp(&prev.prev_x) {
        std::cmp::Ordering::Greater => Some(MovementDirection::LeftToRight),
        std::cmp::Ordering::Less => Some(MovementDirection::RightToLeft),
        std::cmp::Ordering::Equal => prev.movement_direction,
    };

    Track {
        id: prev.id,
        bbox: det.bbox,
        centroid,
        prev_x: current_x,
        last_in: update.last_in,
        last_out: update.last_out,
        direction: update.fired,
        movement_direction,
        score: det.score,
    }
}
