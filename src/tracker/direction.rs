use std::fmt;

/// Kind of crossing event fired when a track passes a counting line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingKind {
    /// Crossed the IN line left to right (entered the monitored region)
    In,
    /// Crossed the OUT line right to left (left the monitored region)
    Out,
}

impl fmt::Display for CrossingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossingKind::In => write!(f, "IN"),
            CrossingKind::Out => write!(f, "OUT"),
        }
    }
}

/// Horizontal movement direction of a track, derived from the sign of
/// the per-frame centroid displacement. Display-only, never gates counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementDirection {
    /// Moving towards the IN line
    LeftToRight,
    /// Moving towards the OUT line
    RightToLeft,
}
