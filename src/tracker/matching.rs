//! Greedy detection-to-track association.

use std::collections::HashSet;

use nalgebra::{Point2, distance};
use ndarray::Array2;

use crate::tracker::line_counter::CounterConfig;
use crate::tracker::rect::Rect;
use crate::tracker::track::Track;

/// COCO class id for "person".
pub const PERSON_CLASS_ID: u32 = 0;

/// Detection input for the counter.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Bounding box in TLWH format
    pub bbox: Rect,
    /// Detection confidence score in [0, 1]
    pub score: f32,
    /// Detector class id (COCO: 0 = person)
    pub class_id: u32,
}

impl Detection {
    /// Create a person detection from TLBR coordinates.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, score: f32) -> Self {
        Self {
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
            score,
            class_id: PERSON_CLASS_ID,
        }
    }

    /// Create a detection from TLBR coordinates with an explicit class id.
    pub fn with_class(x1: f32, y1: f32, x2: f32, y2: f32, score: f32, class_id: u32) -> Self {
        Self {
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
            score,
            class_id,
        }
    }

    pub fn from_rect(bbox: Rect, score: f32) -> Self {
        Self {
            bbox,
            score,
            class_id: PERSON_CLASS_ID,
        }
    }

    #[inline]
    pub fn is_person(&self) -> bool {
        self.class_id == PERSON_CLASS_ID
    }
}

/// Combined IoU/distance association score for one (detection, track) pair.
///
/// IoU dominates when the boxes overlap well; otherwise centroid proximity
/// contributes a score that decays linearly to zero at `max_distance`.
fn combined_score(det: &Detection, track: &Track, config: &CounterConfig) -> f32 {
    let iou = det.bbox.iou(&track.bbox);
    if iou > config.iou_thresh {
        return iou * 2.0;
    }

    let (dx, dy) = det.bbox.centroid();
    let (tx, ty) = track.centroid;
    let dist = distance(
        &Point2::new(dx as f32, dy as f32),
        &Point2::new(tx as f32, ty as f32),
    );

    if dist < config.max_distance {
        (config.max_distance - dist) / config.max_distance
    } else {
        0.0
    }
}

/// Compute the association score matrix between detections and tracks.
///
/// Returns a matrix of shape (detections, tracks). Tracks must be supplied
/// in ascending identity order so that tie-breaking is deterministic.
pub fn score_matrix(
    detections: &[Detection],
    tracks: &[Track],
    config: &CounterConfig,
) -> Array2<f32> {
    let mut scores = Array2::zeros((detections.len(), tracks.len()));
    for (i, det) in detections.iter().enumerate() {
        for (j, track) in tracks.iter().enumerate() {
            scores[[i, j]] = combined_score(det, track, config);
        }
    }
    scores
}

#[derive(Debug, Clone)]
pub struct AssignmentResult {
    /// (detection index, matched track identity) pairs
    pub matches: Vec<(usize, u64)>,
    /// Detection indices that matched no track and need a fresh identity
    pub unmatched_detections: Vec<usize>,
}

/// Resolve detections against previous-frame tracks greedily.
///
/// Detections are processed in input order; each independently claims the
/// unused track with the highest score, strictly above `match_thresh`.
/// Strict comparison means the earliest-scanned track (lowest identity)
/// wins an exact tie. This is deliberately not a global optimum: a
/// detection can consume a track a later detection would have scored
/// higher against.
pub fn greedy_assignment(
    scores: &Array2<f32>,
    track_ids: &[u64],
    match_thresh: f32,
) -> AssignmentResult {
    let (num_dets, num_tracks) = scores.dim();
    debug_assert_eq!(num_tracks, track_ids.len());

    let mut matches = Vec::new();
    let mut unmatched_detections = Vec::new();
    let mut used: HashSet<u64> = HashSet::new();

    for i in 0..num_dets {
        let mut best: Option<(u64, f32)> = None;
        for (j, &id) in track_ids.iter().enumerate() {
            if used.contains(&id) {
                continue;
            }
            let score = scores[[i, j]];
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((id, score));
            }
        }

        match best {
            Some((id, score)) if score > match_thresh => {
                used.insert(id);
                matches.push((i, id));
            }
            _ => unmatched_detections.push(i),
        }
    }

    AssignmentResult {
        matches,
        unmatched_detections,
    }
}
