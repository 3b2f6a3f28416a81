//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::Point2;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// A point in the board plane, in millimeters.
pub type Point = Point2<Scalar>;
/// A straight trace piece from `.0` to `.1`.
pub type Segment = (Point, Point);

/// Pairs adjacent points into line segments.
#[must_use]
pub fn segments_from_points(points: &[Point]) -> Vec<Segment> {
    points.windows(2).map(|pair| (pair[0], pair[1])).collect()
}

/// Euclidean length of a single segment.
#[inline]
#[must_use]
pub fn segment_length(segment: &Segment) -> Scalar {
    nalgebra::distance(&segment.0, &segment.1)
}

/// Sum of segment lengths of a polyline.
#[must_use]
pub fn polyline_length(segments: &[Segment]) -> Scalar {
    segments.iter().map(segment_length).sum()
}
