//! Procedural meshes.
//!
//! All closed shapes are wound counter-clockwise when seen from outside, so
//! their face normals point away from the interior and back-face culling keeps
//! the side facing the camera. The Möbius strip has no outside and carries
//! [`MeshRenderPolicy::ONE_SIDED`].

use std::f64::consts::{PI, TAU};

use crate::color::Color;
use crate::error::MeshResult;
use crate::math::Vec3;
use crate::mesh::{Face, Mesh, MeshRenderPolicy};

const SPHERE_RADIUS: f64 = 1.0;
const SPHERE_SEGMENTS: usize = 15;
const SPHERE_RINGS: usize = 9;

const TORUS_MAJOR_RADIUS: f64 = 1.2;
const TORUS_MINOR_RADIUS: f64 = 0.6;
const TORUS_SEGMENTS: usize = 20;
const TORUS_SIDES: usize = 10;

const MOBIUS_RADIUS: f64 = 1.2;
const MOBIUS_HALF_WIDTH: f64 = 0.5;
const MOBIUS_SEGMENTS: usize = 40;
const MOBIUS_STRIPS: usize = 4;

/// The built-in shape library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cube,
    Pyramid,
    Sphere,
    Torus,
    Mobius,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Cube,
        ShapeKind::Pyramid,
        ShapeKind::Sphere,
        ShapeKind::Torus,
        ShapeKind::Mobius,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Pyramid => "pyramid",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Torus => "torus",
            ShapeKind::Mobius => "mobius",
        }
    }

    /// The next shape in [`ShapeKind::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn build(self) -> MeshResult<Mesh> {
        match self {
            ShapeKind::Cube => cube(),
            ShapeKind::Pyramid => pyramid(),
            ShapeKind::Sphere => sphere(),
            ShapeKind::Torus => torus(),
            ShapeKind::Mobius => mobius_strip(),
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A 2×2×2 cube centred on the origin, one color per side.
pub fn cube() -> MeshResult<Mesh> {
    let vertices = vec![
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, 1.0, 1.0),
    ];
    let faces = vec![
        Face::from([0, 3, 2, 1]), // -Z
        Face::from([4, 5, 6, 7]), // +Z
        Face::from([0, 1, 5, 4]), // -Y
        Face::from([3, 7, 6, 2]), // +Y
        Face::from([0, 4, 7, 3]), // -X
        Face::from([1, 2, 6, 5]), // +X
    ];
    let colors = vec![
        Color::BLUE,
        Color::RED,
        Color::GREEN,
        Color::YELLOW,
        Color::MAGENTA,
        Color::CYAN,
    ];
    Mesh::new("cube", vertices, faces, colors, MeshRenderPolicy::CLOSED)
}

/// A square pyramid with its base at z = -1 and apex at z = 1.
pub fn pyramid() -> MeshResult<Mesh> {
    let vertices = vec![
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(0.0, 0.0, 1.0),
    ];
    let faces = vec![
        Face::from([0, 1, 4]),
        Face::from([1, 2, 4]),
        Face::from([2, 3, 4]),
        Face::from([3, 0, 4]),
        Face::from([0, 3, 2, 1]),
    ];
    let colors = vec![
        Color::RED,
        Color::GREEN,
        Color::BLUE,
        Color::YELLOW,
        Color::ORANGE,
    ];
    Mesh::new("pyramid", vertices, faces, colors, MeshRenderPolicy::CLOSED)
}

/// A UV sphere: triangle fans at the poles and quads in between.
///
/// Roughly 30% of faces are green and the rest light blue, spread in a fixed
/// pattern so every build is identical.
pub fn sphere() -> MeshResult<Mesh> {
    let segments = SPHERE_SEGMENTS;
    let inner_rings = SPHERE_RINGS - 2;

    let mut vertices = Vec::with_capacity(2 + inner_rings * segments);
    vertices.push(Vec3::new(0.0, 0.0, SPHERE_RADIUS));
    for ring in 1..=inner_rings {
        let phi = PI * ring as f64 / (SPHERE_RINGS - 1) as f64;
        for seg in 0..segments {
            let theta = TAU * seg as f64 / segments as f64;
            vertices.push(Vec3::new(
                SPHERE_RADIUS * phi.sin() * theta.cos(),
                SPHERE_RADIUS * phi.sin() * theta.sin(),
                SPHERE_RADIUS * phi.cos(),
            ));
        }
    }
    let south = vertices.len();
    vertices.push(Vec3::new(0.0, 0.0, -SPHERE_RADIUS));

    let ring_vertex = |ring: usize, seg: usize| 1 + ring * segments + seg % segments;

    let mut faces = Vec::new();
    for seg in 0..segments {
        faces.push(Face::from([0, ring_vertex(0, seg), ring_vertex(0, seg + 1)]));
    }
    for ring in 0..inner_rings - 1 {
        for seg in 0..segments {
            faces.push(Face::from([
                ring_vertex(ring, seg),
                ring_vertex(ring + 1, seg),
                ring_vertex(ring + 1, seg + 1),
                ring_vertex(ring, seg + 1),
            ]));
        }
    }
    let last = inner_rings - 1;
    for seg in 0..segments {
        faces.push(Face::from([
            ring_vertex(last, seg),
            south,
            ring_vertex(last, seg + 1),
        ]));
    }

    let colors = (0..faces.len())
        .map(|i| {
            if (i * 7) % 10 < 3 {
                Color::GREEN
            } else {
                Color::LIGHT_BLUE
            }
        })
        .collect();

    Mesh::new("sphere", vertices, faces, colors, MeshRenderPolicy::CLOSED)
}

/// A ring torus around the Z axis, built from quads.
pub fn torus() -> MeshResult<Mesh> {
    let mut vertices = Vec::with_capacity(TORUS_SIDES * TORUS_SEGMENTS);
    for side in 0..TORUS_SIDES {
        let phi = TAU * side as f64 / TORUS_SIDES as f64;
        for seg in 0..TORUS_SEGMENTS {
            let theta = TAU * seg as f64 / TORUS_SEGMENTS as f64;
            let ring = TORUS_MAJOR_RADIUS + TORUS_MINOR_RADIUS * phi.cos();
            vertices.push(Vec3::new(
                ring * theta.cos(),
                ring * theta.sin(),
                TORUS_MINOR_RADIUS * phi.sin(),
            ));
        }
    }

    let index = |side: usize, seg: usize| {
        (side % TORUS_SIDES) * TORUS_SEGMENTS + seg % TORUS_SEGMENTS
    };
    let mut faces = Vec::with_capacity(TORUS_SIDES * TORUS_SEGMENTS);
    for side in 0..TORUS_SIDES {
        for seg in 0..TORUS_SEGMENTS {
            faces.push(Face::from([
                index(side, seg),
                index(side, seg + 1),
                index(side + 1, seg + 1),
                index(side + 1, seg),
            ]));
        }
    }
    let colors = vec![Color::ORANGE; faces.len()];

    Mesh::new("torus", vertices, faces, colors, MeshRenderPolicy::CLOSED)
}

/// A Möbius strip: one side, one edge, no consistent outward normal.
pub fn mobius_strip() -> MeshResult<Mesh> {
    let columns = MOBIUS_STRIPS + 1;
    let mut vertices = Vec::with_capacity(MOBIUS_SEGMENTS * columns);
    for seg in 0..MOBIUS_SEGMENTS {
        let u = TAU * seg as f64 / MOBIUS_SEGMENTS as f64;
        for col in 0..columns {
            let v = -MOBIUS_HALF_WIDTH + 2.0 * MOBIUS_HALF_WIDTH * col as f64 / MOBIUS_STRIPS as f64;
            let radial = MOBIUS_RADIUS + v * (u / 2.0).cos();
            vertices.push(Vec3::new(
                radial * u.cos(),
                radial * u.sin(),
                v * (u / 2.0).sin(),
            ));
        }
    }

    let mut faces = Vec::with_capacity(MOBIUS_SEGMENTS * MOBIUS_STRIPS);
    let mut colors = Vec::with_capacity(MOBIUS_SEGMENTS * MOBIUS_STRIPS);
    for seg in 0..MOBIUS_SEGMENTS {
        let next = (seg + 1) % MOBIUS_SEGMENTS;
        // Closing the loop glues the strip to itself with a half twist.
        let twisted = next == 0;
        for col in 0..MOBIUS_STRIPS {
            let (next_a, next_b) = if twisted {
                (MOBIUS_STRIPS - col, MOBIUS_STRIPS - col - 1)
            } else {
                (col, col + 1)
            };
            faces.push(Face::from([
                seg * columns + col,
                next * columns + next_a,
                next * columns + next_b,
                seg * columns + col + 1,
            ]));
            colors.push(if (seg + col) % 2 == 0 {
                Color::MAGENTA
            } else {
                Color::CYAN
            });
        }
    }

    Mesh::new("mobius", vertices, faces, colors, MeshRenderPolicy::ONE_SIDED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{centroid, face_normal};

    fn face_points(mesh: &Mesh, face: &Face) -> Vec<Vec3> {
        face.indices.iter().map(|&i| mesh.vertices()[i]).collect()
    }

    #[test]
    fn every_shape_builds() {
        for kind in ShapeKind::ALL {
            let mesh = kind.build().unwrap();
            assert_eq!(mesh.name(), kind.name());
            assert!(!mesh.is_empty());
        }
    }

    #[test]
    fn convex_shapes_are_wound_outward() {
        for mesh in [cube().unwrap(), pyramid().unwrap(), sphere().unwrap()] {
            for face in mesh.faces() {
                let points = face_points(&mesh, face);
                let normal = face_normal(&points);
                assert!(
                    normal.dot(centroid(&points)) > 0.0,
                    "{} face {:?} points inward",
                    mesh.name(),
                    face.indices
                );
            }
        }
    }

    #[test]
    fn torus_faces_point_away_from_tube_centre() {
        let mesh = torus().unwrap();
        for face in mesh.faces() {
            let points = face_points(&mesh, face);
            let c = centroid(&points);
            let tube_centre = Vec3::new(c.x, c.y, 0.0).normalize() * TORUS_MAJOR_RADIUS;
            assert!(face_normal(&points).dot(c - tube_centre) > 0.0);
        }
    }

    #[test]
    fn sphere_face_counts() {
        let mesh = sphere().unwrap();
        let expected = 2 * SPHERE_SEGMENTS + (SPHERE_RINGS - 3) * SPHERE_SEGMENTS;
        assert_eq!(mesh.faces().len(), expected);
        let green = mesh.colors().iter().filter(|&&c| c == Color::GREEN).count();
        assert!(green > 0 && green < mesh.faces().len() / 2);
    }

    #[test]
    fn mobius_is_one_sided() {
        let mesh = mobius_strip().unwrap();
        assert_eq!(mesh.policy(), MeshRenderPolicy::ONE_SIDED);
        assert_eq!(mesh.faces().len(), MOBIUS_SEGMENTS * MOBIUS_STRIPS);
    }

    #[test]
    fn next_cycles_through_all_shapes() {
        let mut kind = ShapeKind::Cube;
        for _ in 0..ShapeKind::ALL.len() {
            kind = kind.next();
        }
        assert_eq!(kind, ShapeKind::Cube);
    }
}
