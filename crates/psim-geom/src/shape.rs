// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Collision shapes: cuboids and spheres placed in world space.
//!
//! Cuboid vertices are enumerated by sign bits of the half-extents
//! (`bit 2 = x`, `bit 1 = y`, `bit 0 = z`, set = positive), rotated by the
//! shape's Euler orientation and then translated by its position. Edge and
//! face tables below index into that enumeration and never change.

use crate::error::GeomError;
use crate::math::Vec3;
use crate::types::aabb::Aabb;

/// The twelve cuboid edges as vertex index pairs.
pub const CUBOID_EDGES: [(usize, usize); 12] = [
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
];

/// The six cuboid faces as cyclic vertex quads, in canonical test order:
/// `-X, +X, -Y, +Y, -Z, +Z`.
pub const CUBOID_FACES: [[usize; 4]; 6] = [
    [0, 1, 3, 2],
    [4, 6, 7, 5],
    [0, 4, 5, 1],
    [2, 3, 7, 6],
    [0, 2, 6, 4],
    [1, 5, 7, 3],
];

/// Geometric variant of a [`Shape`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ShapeKind {
    /// Box described by its (unrotated) half-extents.
    Cuboid {
        /// Distance from the centre to each face pair, per local axis.
        half_extents: Vec3,
    },
    /// Ball described by its radius.
    Sphere {
        /// Radius in metres.
        radius: f32,
    },
}

impl ShapeKind {
    fn validate(self) -> Result<Self, GeomError> {
        let extents = match self {
            Self::Cuboid { half_extents } => half_extents.to_array(),
            Self::Sphere { radius } => [radius; 3],
        };
        match extents.into_iter().find(|e| !(e.is_finite() && *e > 0.0)) {
            Some(bad) => Err(GeomError::NonPositiveExtent(bad)),
            None => Ok(self),
        }
    }
}

/// A quad face of a cuboid in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CuboidFace {
    /// Corners in cyclic order.
    pub corners: [Vec3; 4],
    /// Mean of the four corners.
    pub centroid: Vec3,
    /// Outward normal, `cross(v2 - v1, v4 - v1)` flipped away from the
    /// cuboid centre. Its length is the face area, not one.
    pub normal: Vec3,
}

/// Collision shape: a [`ShapeKind`] plus world position and orientation.
///
/// Orientation is `(roll, pitch, yaw)` radians, see [`Vec3::rotate_euler`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    position: Vec3,
    rotation: Vec3,
}

impl Shape {
    /// Creates a shape at the origin with no rotation.
    pub fn new(kind: ShapeKind) -> Result<Self, GeomError> {
        Ok(Self {
            kind: kind.validate()?,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        })
    }

    /// Cuboid with the given half-extents.
    pub fn cuboid(half_extents: Vec3) -> Result<Self, GeomError> {
        Self::new(ShapeKind::Cuboid { half_extents })
    }

    /// Sphere with the given radius.
    pub fn sphere(radius: f32) -> Result<Self, GeomError> {
        Self::new(ShapeKind::Sphere { radius })
    }

    /// Builder-style position setter.
    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder-style orientation setter.
    #[must_use]
    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Geometric variant.
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Replaces the geometric variant, keeping placement.
    pub fn set_kind(&mut self, kind: ShapeKind) -> Result<(), GeomError> {
        self.kind = kind.validate()?;
        Ok(())
    }

    /// World-space centre.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Moves the centre.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Euler orientation in radians.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Sets the Euler orientation.
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    /// `true` for [`ShapeKind::Sphere`].
    pub fn is_sphere(&self) -> bool {
        matches!(self.kind, ShapeKind::Sphere { .. })
    }

    /// Unrotated half-extents; a sphere reports its radius on every axis.
    pub fn half_extents(&self) -> Vec3 {
        match self.kind {
            ShapeKind::Cuboid { half_extents } => half_extents,
            ShapeKind::Sphere { radius } => Vec3::splat(radius),
        }
    }

    /// World-space cuboid vertices; `None` for spheres.
    pub fn vertices(&self) -> Option<[Vec3; 8]> {
        let ShapeKind::Cuboid { half_extents } = self.kind else {
            return None;
        };
        Some(std::array::from_fn(|i| {
            let sign = |bit: usize| if i & bit == 0 { -1.0 } else { 1.0 };
            Vec3::new(
                sign(4) * half_extents.x(),
                sign(2) * half_extents.y(),
                sign(1) * half_extents.z(),
            )
            .rotate_euler(&self.rotation)
            .add(&self.position)
        }))
    }

    /// World-space cuboid edges as endpoint pairs; `None` for spheres.
    pub fn edges(&self) -> Option<[(Vec3, Vec3); 12]> {
        let v = self.vertices()?;
        Some(CUBOID_EDGES.map(|(a, b)| (v[a], v[b])))
    }

    /// World-space cuboid faces in canonical order; `None` for spheres.
    pub fn faces(&self) -> Option<[CuboidFace; 6]> {
        let v = self.vertices()?;
        Some(CUBOID_FACES.map(|[a, b, c, d]| {
            let corners = [v[a], v[b], v[c], v[d]];
            let centroid = corners
                .iter()
                .fold(Vec3::ZERO, |acc, p| acc.add(p))
                .scale(0.25);
            let mut normal = v[b].sub(&v[a]).cross(&v[d].sub(&v[a]));
            if centroid.sub(&self.position).dot(&normal) < 0.0 {
                normal = normal.negate();
            }
            CuboidFace {
                corners,
                centroid,
                normal,
            }
        }))
    }

    /// World-space axis-aligned bound.
    ///
    /// For a cuboid this is swept from the rotated vertices, so a rotated box
    /// reports a conservative (larger) bound.
    pub fn world_bounds(&self) -> Aabb {
        match self.vertices() {
            Some(v) => Aabb::from_corners(&v),
            None => Aabb::from_center_half_extents(self.position, self.half_extents()),
        }
    }

    /// Bound of the unrotated half-extents around the centre.
    pub fn unrotated_bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.half_extents())
    }

    /// The six points `centre ± radius` along each world axis.
    ///
    /// For a cuboid the unrotated half-extent is used per axis.
    pub fn extremal_points(&self) -> [Vec3; 6] {
        let h = self.half_extents();
        std::array::from_fn(|i| {
            let axis = i / 2;
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            self.position
                .add(&Vec3::along_axis(axis, sign * h.component(axis)))
        })
    }

    /// Point containment.
    ///
    /// Spheres use `distance <= radius`. Cuboids use the world-space bound of
    /// their rotated vertices, not a true oriented test.
    pub fn contains_point(&self, point: &Vec3) -> bool {
        match self.kind {
            ShapeKind::Sphere { radius } => self.position.distance(point) <= radius,
            ShapeKind::Cuboid { .. } => self.world_bounds().contains_point(point),
        }
    }

    /// Approximate overlap test between two shapes.
    ///
    /// - sphere/sphere: centre distance strictly below the sum of radii.
    /// - cuboid/cuboid: some vertex of either lies inside the other. Face or
    ///   edge penetrations with no vertex inside are missed.
    /// - cuboid/sphere: some axis-extremal point of the sphere lies inside the
    ///   cuboid, or some cuboid vertex lies inside the sphere.
    pub fn is_colliding(&self, other: &Self) -> bool {
        match (self.kind, other.kind) {
            (ShapeKind::Sphere { radius: r1 }, ShapeKind::Sphere { radius: r2 }) => {
                self.position.distance(&other.position) < r1 + r2
            }
            (ShapeKind::Cuboid { .. }, ShapeKind::Cuboid { .. }) => {
                self.any_vertex_inside(other) || other.any_vertex_inside(self)
            }
            (ShapeKind::Cuboid { .. }, ShapeKind::Sphere { .. }) => {
                cuboid_sphere_overlap(self, other)
            }
            (ShapeKind::Sphere { .. }, ShapeKind::Cuboid { .. }) => {
                cuboid_sphere_overlap(other, self)
            }
        }
    }

    fn any_vertex_inside(&self, other: &Self) -> bool {
        self.vertices()
            .is_some_and(|v| v.iter().any(|p| other.contains_point(p)))
    }
}

fn cuboid_sphere_overlap(cuboid: &Shape, sphere: &Shape) -> bool {
    sphere
        .extremal_points()
        .iter()
        .any(|p| cuboid.contains_point(p))
        || cuboid.any_vertex_inside(sphere)
}

/// Minimum-translation separation of two overlapping shapes.
///
/// Overlap is measured per world axis between the unrotated half-extent
/// bounds. The axis with the smallest overlap wins (ties go to X, then Y, then
/// Z). Half the penetration depth is returned for each shape, pushing `a` away
/// from `b` along that axis only; the two translations are exact negatives.
pub fn resolve_collisions(a: &Shape, b: &Shape) -> (Vec3, Vec3) {
    let overlap = a.unrotated_bounds().overlap(&b.unrotated_bounds());
    let [ox, oy, oz] = overlap.to_array();
    let axis = if ox <= oy && ox <= oz {
        0
    } else if oy <= ox && oy <= oz {
        1
    } else {
        2
    };
    let half_depth = overlap.component(axis).abs() * 0.5;
    let sign = if a.position.component(axis) >= b.position.component(axis) {
        1.0
    } else {
        -1.0
    };
    let push = Vec3::along_axis(axis, sign * half_depth);
    (push, push.negate())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn unit_cube() -> Shape {
        Shape::cuboid(Vec3::splat(0.5)).unwrap()
    }

    #[test]
    fn rejects_non_positive_extents() {
        assert_eq!(
            Shape::sphere(0.0),
            Err(GeomError::NonPositiveExtent(0.0))
        );
        assert!(Shape::cuboid(Vec3::new(1.0, -1.0, 1.0)).is_err());
        assert!(Shape::sphere(f32::NAN).is_err());
    }

    #[test]
    fn vertex_enumeration_uses_sign_bits() {
        let v = unit_cube().at(Vec3::new(10.0, 0.0, 0.0)).vertices().unwrap();
        assert_eq!(v[0], Vec3::new(9.5, -0.5, -0.5));
        assert_eq!(v[7], Vec3::new(10.5, 0.5, 0.5));
        assert_eq!(v[5], Vec3::new(10.5, -0.5, 0.5));
    }

    #[test]
    fn every_edge_has_unit_length() {
        for (a, b) in unit_cube().edges().unwrap() {
            assert!((a.distance(&b) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn face_normals_point_outward() {
        let shape = unit_cube().rotated(Vec3::new(0.4, 0.2, -0.7));
        for face in shape.faces().unwrap() {
            let out = face.centroid.sub(&shape.position());
            assert!(out.dot(&face.normal) > 0.0);
            assert!((face.normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn spheres_have_no_topology() {
        let s = Shape::sphere(1.0).unwrap();
        assert!(s.vertices().is_none());
        assert!(s.faces().is_none());
    }

    #[test]
    fn resolution_picks_smallest_axis_and_pushes_apart() {
        let a = unit_cube();
        let b = unit_cube().at(Vec3::new(0.2, 0.9, 0.0));
        let (ta, tb) = resolve_collisions(&a, &b);
        assert!((ta.y() + 0.05).abs() < 1e-6, "a moves down, got {ta:?}");
        assert_eq!(ta.x(), 0.0);
        assert_eq!(tb, ta.negate());
    }
}
