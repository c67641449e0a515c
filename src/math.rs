use nalgebra as na;

/// Geometric center of a bounding box, in the same pixel units as the box.
pub type Centroid = na::Point2<f32>;

#[inline]
pub fn distance(a: &Centroid, b: &Centroid) -> f32 {
    na::distance(a, b)
}

/// Strict: a centroid exactly `radius` away is outside. A non-positive
/// radius therefore never matches, not even a coincident point.
#[inline]
pub fn within_radius(a: &Centroid, b: &Centroid, radius: f32) -> bool {
    distance(a, b) < radius
}
