// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

/// 3D vector used for positions, directions, velocities and Euler angles.
///
/// * Components are world-space metres (or radians when the vector holds a
///   roll/pitch/yaw orientation).
/// * Arithmetic is plain `f32`; degenerate input (zero-length vectors fed to
///   [`Vec3::normalize`], [`Vec3::cos_theta`] or
///   [`Vec3::perpendicular_distance`]) produces NaN instead of an error.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec3 {
    data: [f32; 3],
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit vector pointing along the positive X axis.
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit vector pointing along the positive Y axis.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit vector pointing along the positive Z axis.
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
    }

    /// Creates a vector with every component set to `v`.
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f32; 3] {
        self.data
    }

    /// X component.
    pub fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y component.
    pub fn y(&self) -> f32 {
        self.data[1]
    }

    /// Z component.
    pub fn z(&self) -> f32 {
        self.data[2]
    }

    /// Component by axis index (`0 = x`, `1 = y`, `2 = z`).
    pub(crate) fn component(&self, axis: usize) -> f32 {
        self.data[axis]
    }

    /// Vector with a single non-zero component along `axis`.
    pub(crate) fn along_axis(axis: usize, value: f32) -> Self {
        let mut data = [0.0; 3];
        data[axis] = value;
        Self { data }
    }

    /// Adds two vectors.
    pub fn add(&self, other: &Self) -> Self {
        Self::new(
            self.x() + other.x(),
            self.y() + other.y(),
            self.z() + other.z(),
        )
    }

    /// Subtracts another vector.
    pub fn sub(&self, other: &Self) -> Self {
        Self::new(
            self.x() - other.x(),
            self.y() - other.y(),
            self.z() - other.z(),
        )
    }

    /// Scales the vector by a constant.
    pub fn scale(&self, scalar: f32) -> Self {
        Self::new(self.x() * scalar, self.y() * scalar, self.z() * scalar)
    }

    /// Divides every component by a constant.
    pub fn div(&self, divisor: f32) -> Self {
        Self::new(self.x() / divisor, self.y() / divisor, self.z() / divisor)
    }

    /// Component-wise negation.
    pub fn negate(&self) -> Self {
        self.scale(-1.0)
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    /// Cross product with another vector.
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.data;
        let [bx, by, bz] = other.data;
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Squared magnitude.
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Magnitude (3D Pythagoras).
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Distance between two points.
    pub fn distance(&self, other: &Self) -> f32 {
        other.sub(self).length()
    }

    /// Unit vector in the same direction. The zero vector normalises to NaN.
    pub fn normalize(&self) -> Self {
        self.div(self.length())
    }

    /// Cosine of the angle between `self` and `other`.
    pub fn cos_theta(&self, other: &Self) -> f32 {
        self.dot(other) / (self.length() * other.length())
    }

    /// Distance of the point `self` from the infinite line through the origin
    /// along `line`.
    ///
    /// Equivalent to `|self| * sin(theta)`; NaN when `line` is zero.
    pub fn perpendicular_distance(&self, line: &Self) -> f32 {
        self.cross(line).length() / line.length()
    }

    /// Rotates the vector by Euler angles `(roll, pitch, yaw)` stored as
    /// `(x, y, z)` radians.
    ///
    /// Intrinsic roll→pitch→yaw: the composite matrix is `Rx(roll) · Ry(pitch) ·
    /// Rz(yaw)`, so the yaw rotation touches the vector first.
    pub fn rotate_euler(&self, angles: &Self) -> Self {
        self.rotate_z(angles.z())
            .rotate_y(angles.y())
            .rotate_x(angles.x())
    }

    /// Inverse of [`Vec3::rotate_euler`] for the same `angles`.
    pub fn unrotate_euler(&self, angles: &Self) -> Self {
        self.rotate_x(-angles.x())
            .rotate_y(-angles.y())
            .rotate_z(-angles.z())
    }

    fn rotate_x(&self, angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(
            self.x(),
            self.y() * c - self.z() * s,
            self.y() * s + self.z() * c,
        )
    }

    fn rotate_y(&self, angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(
            self.x() * c + self.z() * s,
            self.y(),
            -self.x() * s + self.z() * c,
        )
    }

    fn rotate_z(&self, angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(
            self.x() * c - self.y() * s,
            self.x() * s + self.y() * c,
            self.z(),
        )
    }

    /// Component-wise minimum.
    pub fn min(&self, other: &Self) -> Self {
        Self::new(
            self.x().min(other.x()),
            self.y().min(other.y()),
            self.z().min(other.z()),
        )
    }

    /// Component-wise maximum.
    pub fn max(&self, other: &Self) -> Self {
        Self::new(
            self.x().max(other.x()),
            self.y().max(other.y()),
            self.z().max(other.z()),
        )
    }

    /// `true` when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|c| c.is_finite())
    }
}

/// Converts a 3-element `[f32; 3]` array into a `Vec3` interpreted as `(x, y, z)`.
///
/// # Examples
/// ```
/// use psim_geom::math::Vec3;
/// let v = Vec3::from([1.0, 2.0, 3.0]);
/// assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
/// ```
impl From<[f32; 3]> for Vec3 {
    fn from(value: [f32; 3]) -> Self {
        Self { data: value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.sub(&b).length() < 1e-5
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        assert_eq!(Vec3::UNIT_X.cross(&Vec3::UNIT_Y), Vec3::UNIT_Z);
    }

    #[test]
    fn yaw_turns_x_into_y() {
        let r = Vec3::UNIT_X.rotate_euler(&Vec3::new(0.0, 0.0, FRAC_PI_2));
        assert!(approx(r, Vec3::UNIT_Y), "got {r:?}");
    }

    #[test]
    fn unrotate_inverts_rotate() {
        let angles = Vec3::new(0.3, -1.1, 2.0);
        let v = Vec3::new(1.0, -2.0, 0.5);
        assert!(approx(v.rotate_euler(&angles).unrotate_euler(&angles), v));
    }

    #[test]
    fn perpendicular_distance_from_axis() {
        let d = Vec3::new(3.0, 4.0, 0.0).perpendicular_distance(&Vec3::new(0.0, 2.0, 0.0));
        assert!((d - 3.0).abs() < 1e-6);
    }

    #[test]
    fn axis_helpers_index_components() {
        let v = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!([0, 1, 2].map(|axis| v.component(axis)), [4.0, 5.0, 6.0]);
        assert_eq!(Vec3::along_axis(1, -2.0), Vec3::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn zero_vector_normalizes_to_nan() {
        assert!(Vec3::ZERO.normalize().x().is_nan());
        assert!(Vec3::UNIT_X.perpendicular_distance(&Vec3::ZERO).is_nan());
    }
}
