// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry primitives for psim.

This crate provides:
- Vector math (`math::Vec3`) with Euler rotation and perpendicular distance.
- Axis-aligned bounds (`Aabb`).
- Cuboid and sphere collision shapes (`Shape`) with vertex/edge/face
  derivation, point containment, pairwise overlap tests, minimum-axis
  separation and edge-sampled contact points.

Design notes:
- Approximate by intent: cuboid containment uses the world bound of the
  rotated vertices and cuboid/cuboid overlap is a vertex test, not a full
  separating-axis test.
- Float32 throughout; degenerate input yields NaN rather than an error.
"]

mod contact;
mod error;
/// Stateless vector math.
pub mod math;
/// Collision shapes and pairwise predicates.
pub mod shape;
/// Foundational geometric types.
pub mod types;

pub use contact::CONTACT_MARCH_FRACTION;
pub use error::GeomError;
pub use math::Vec3;
pub use shape::{resolve_collisions, CuboidFace, Shape, ShapeKind};
pub use types::aabb::Aabb;
