// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::Vec3;

/// Axis-aligned bounding box in world coordinates.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Values are `f32` and represent meters in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Builds an AABB centered at `center` with the given half-extents.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center.sub(&half_extents),
            max: center.add(&half_extents),
        }
    }

    /// Builds the minimal AABB that contains all eight `corners`.
    #[must_use]
    pub fn from_corners(corners: &[Vec3; 8]) -> Self {
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min = min.min(c);
            max = max.max(c);
        }
        Self { min, max }
    }

    /// Returns `true` if `point` lies inside the box (inclusive on faces).
    #[must_use]
    pub fn contains_point(&self, point: &Vec3) -> bool {
        (0..3).all(|axis| {
            let p = point.component(axis);
            p >= self.min.component(axis) && p <= self.max.component(axis)
        })
    }

    /// Per-axis overlap lengths with `other`.
    ///
    /// A component is negative when the boxes are separated along that axis.
    #[must_use]
    pub fn overlap(&self, other: &Self) -> Vec3 {
        self.max.min(&other.max).sub(&self.min.max(&other.min))
    }
}
