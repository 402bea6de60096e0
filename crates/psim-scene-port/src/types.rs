// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Plain value types handed to a [`crate::ScenePort`].

/// Geometric variant of a body, as far as a renderer cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeTag {
    /// Box; `dimensions` are full edge lengths.
    Cuboid,
    /// Ball; `dimensions[0]` is the radius.
    Sphere,
}

/// Kind of force being drawn (renderers colour by this).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForceTag {
    /// Short collision or user impulse.
    Impulse,
    /// User force over a time window.
    Constant,
    /// Gravity.
    Weight,
    /// Contact support.
    Reaction,
}

/// World transform and display data of one body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyView {
    /// Stable body key (the engine's body handle).
    pub key: u32,
    /// Display name.
    pub name: String,
    /// Shape variant.
    pub shape: ShapeTag,
    /// World-space centre.
    pub position: [f32; 3],
    /// Roll/pitch/yaw in radians.
    pub rotation: [f32; 3],
    /// Scale: full extents for cuboids, radius in `[0]` for spheres.
    pub dimensions: [f32; 3],
    /// RGB colour in `0..=1`.
    pub colour: [f32; 3],
    /// `true` for immovable bodies such as the floor.
    pub is_static: bool,
}

/// One active force on a body.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceView {
    /// Key of the body the force acts on.
    pub body: u32,
    /// Force identifier.
    pub id: String,
    /// Force kind.
    pub kind: ForceTag,
    /// World-space application point.
    pub from: [f32; 3],
    /// Force vector (orientation and magnitude).
    pub direction: [f32; 3],
}
