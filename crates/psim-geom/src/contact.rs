// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Contact sampling between overlapping shapes.

use crate::math::Vec3;
use crate::shape::{Shape, ShapeKind};

/// Fraction of an edge advanced per sample while searching for the boundary.
pub const CONTACT_MARCH_FRACTION: f32 = 0.01;

impl Shape {
    /// Approximate contact points between `self` and `other`.
    ///
    /// For a cuboid, every edge is inspected: an edge fully inside `other`
    /// contributes both endpoints; an edge with exactly one endpoint inside is
    /// marched from that endpoint in 1% steps and contributes the last sample
    /// still inside `other`. A sphere contributes its axis-extremal points that
    /// lie inside `other`.
    ///
    /// Points are deduplicated by exact coordinates; order carries no meaning.
    /// An empty result means no edge (or extremal point) touches `other`.
    pub fn contact_points_to(&self, other: &Self) -> Vec<Vec3> {
        let mut points = Vec::new();
        let Some(edges) = self.edges() else {
            for p in self.extremal_points() {
                if other.contains_point(&p) {
                    push_unique(&mut points, p);
                }
            }
            return points;
        };
        for (a, b) in edges {
            match (other.contains_point(&a), other.contains_point(&b)) {
                (true, true) => {
                    push_unique(&mut points, a);
                    push_unique(&mut points, b);
                }
                (true, false) => push_unique(&mut points, march_to_boundary(other, a, b)),
                (false, true) => push_unique(&mut points, march_to_boundary(other, b, a)),
                (false, false) => {}
            }
        }
        points
    }

    /// Point on `other`'s surface nearest to this shape's centre.
    ///
    /// Sphere targets step back from their centre along the direction towards
    /// the caller by one radius. Cuboid targets clamp the caller's centre into
    /// the box in the box's local frame; a centre already inside the box is
    /// returned unchanged. Coincident sphere centres yield NaN.
    pub fn closest_point_on(&self, other: &Self) -> Vec3 {
        match other.kind() {
            ShapeKind::Sphere { radius } => {
                let towards_other = other.position().sub(&self.position()).normalize();
                other.position().sub(&towards_other.scale(radius))
            }
            ShapeKind::Cuboid { half_extents } => {
                let local = self
                    .position()
                    .sub(&other.position())
                    .unrotate_euler(&other.rotation());
                let clamped = Vec3::new(
                    local.x().clamp(-half_extents.x(), half_extents.x()),
                    local.y().clamp(-half_extents.y(), half_extents.y()),
                    local.z().clamp(-half_extents.z(), half_extents.z()),
                );
                clamped
                    .rotate_euler(&other.rotation())
                    .add(&other.position())
            }
        }
    }
}

fn march_to_boundary(other: &Shape, inside: Vec3, outside: Vec3) -> Vec3 {
    let step = outside.sub(&inside).scale(CONTACT_MARCH_FRACTION);
    let steps = (1.0 / CONTACT_MARCH_FRACTION).round() as usize;
    let mut last = inside;
    for k in 1..=steps {
        let sample = inside.add(&step.scale(k as f32));
        if !other.contains_point(&sample) {
            break;
        }
        last = sample;
    }
    last
}

fn push_unique(points: &mut Vec<Vec3>, p: Vec3) {
    if !points.contains(&p) {
        points.push(p);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn cube_resting_on_slab_touches_at_bottom_corners() {
        let slab = Shape::cuboid(Vec3::new(100.0, 2.0, 100.0))
            .unwrap()
            .at(Vec3::new(0.0, -2.0, 0.0));
        let cube = Shape::cuboid(Vec3::splat(0.5))
            .unwrap()
            .at(Vec3::new(0.0, 0.5, 0.0));
        let points = cube.contact_points_to(&slab);
        assert_eq!(points.len(), 4);
        assert!(points.iter().all(|p| p.y() == 0.0));
    }

    #[test]
    fn straddling_edge_is_marched_to_boundary() {
        let target = Shape::cuboid(Vec3::splat(1.0)).unwrap();
        let cube = Shape::cuboid(Vec3::splat(0.5))
            .unwrap()
            .at(Vec3::new(1.25, 0.0, 0.0));
        let points = cube.contact_points_to(&target);
        // The four x-edges cross the target face at x = 1.0.
        let marched: Vec<_> = points.iter().filter(|p| p.x() > 0.75).collect();
        assert_eq!(marched.len(), 4);
        for p in marched {
            assert!(p.x() <= 1.0 && p.x() > 0.98, "got {p:?}");
        }
    }

    #[test]
    fn disjoint_shapes_have_no_contacts() {
        let a = Shape::cuboid(Vec3::splat(0.5)).unwrap();
        let b = a.at(Vec3::new(5.0, 0.0, 0.0));
        assert!(a.contact_points_to(&b).is_empty());
    }

    #[test]
    fn closest_point_on_sphere_faces_caller() {
        let caller = Shape::cuboid(Vec3::splat(0.5)).unwrap().at(Vec3::new(4.0, 0.0, 0.0));
        let ball = Shape::sphere(1.0).unwrap();
        let p = caller.closest_point_on(&ball);
        assert!((p.x() - 1.0).abs() < 1e-6 && p.y() == 0.0);
    }

    #[test]
    fn closest_point_on_cuboid_clamps_to_surface() {
        let caller = Shape::sphere(0.2).unwrap().at(Vec3::new(3.0, 0.25, 0.0));
        let boxy = Shape::cuboid(Vec3::splat(1.0)).unwrap();
        assert_eq!(caller.closest_point_on(&boxy), Vec3::new(1.0, 0.25, 0.0));
    }
}
