//! Per-face geometry derived from rotated vertices.

use crate::math::Vec3;
use crate::mesh::{Face, Mesh};

/// Cross products shorter than this are treated as collinear.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// Normal used for faces whose first three vertices are collinear.
pub const FALLBACK_NORMAL: Vec3 = Vec3::FORWARD;

/// Unit normal of a polygon from its first three points.
///
/// Uses `(p1 - p0) × (p2 - p0)`, so the normal follows the winding order.
/// Collinear points (or fewer than three) yield [`FALLBACK_NORMAL`].
pub fn face_normal(points: &[Vec3]) -> Vec3 {
    let [p0, p1, p2] = match points {
        [p0, p1, p2, ..] => [*p0, *p1, *p2],
        _ => return FALLBACK_NORMAL,
    };
    let normal = (p1 - p0).cross(p2 - p0);
    let magnitude = normal.magnitude();
    if magnitude < DEGENERATE_EPSILON {
        return FALLBACK_NORMAL;
    }
    normal / magnitude
}

/// Arithmetic mean of the points. Zero for an empty slice.
pub fn centroid(points: &[Vec3]) -> Vec3 {
    if points.is_empty() {
        return Vec3::ZERO;
    }
    let mut sum = Vec3::ZERO;
    for &p in points {
        sum += p;
    }
    sum / points.len() as f64
}

/// Normal and centroid of one face in rotated space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceGeometry {
    pub normal: Vec3,
    pub centroid: Vec3,
    /// Mean Z of the face's vertices.
    pub average_z: f64,
}

impl FaceGeometry {
    /// Computes the geometry of `face` using the rotated vertex positions.
    ///
    /// `rotated` must be indexable by every index of the face, which holds
    /// for any validated [`Mesh`] and a rotated copy of its vertex list.
    pub fn of_face(face: &Face, rotated: &[Vec3]) -> Self {
        let points: Vec<Vec3> = face.indices.iter().map(|&i| rotated[i]).collect();
        let centroid = centroid(&points);
        Self {
            normal: face_normal(&points),
            centroid,
            average_z: centroid.z,
        }
    }

    /// Geometry for every face of `mesh`, in declaration order.
    pub fn compute(mesh: &Mesh, rotated: &[Vec3]) -> Vec<Self> {
        mesh.faces()
            .iter()
            .map(|face| Self::of_face(face, rotated))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_is_unit_length() {
        let points = [
            Vec3::new(0.3, -2.0, 1.0),
            Vec3::new(4.0, 1.5, -0.5),
            Vec3::new(-1.0, 0.25, 3.0),
        ];
        assert_relative_eq!(face_normal(&points).magnitude(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn normal_follows_winding() {
        let ccw = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let cw = [ccw[0], ccw[2], ccw[1]];
        assert_relative_eq!(face_normal(&ccw), Vec3::FORWARD);
        assert_relative_eq!(face_normal(&cw), Vec3::BACK);
    }

    #[test]
    fn collinear_face_uses_fallback() {
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
        ];
        assert_eq!(face_normal(&points), FALLBACK_NORMAL);
        assert_eq!(face_normal(&points[..2]), FALLBACK_NORMAL);
    }

    #[test]
    fn centroid_averages_all_points() {
        let quad = [
            Vec3::new(-1.0, -1.0, 2.0),
            Vec3::new(1.0, -1.0, 2.0),
            Vec3::new(1.0, 1.0, 2.0),
            Vec3::new(-1.0, 1.0, 4.0),
        ];
        assert_relative_eq!(centroid(&quad), Vec3::new(0.0, 0.0, 2.5));
        assert_eq!(centroid(&[]), Vec3::ZERO);
    }
}
