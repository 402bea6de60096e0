// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Vector math shared by the geometry and simulation layers.
//!
//! Everything here is stateless `f32` arithmetic. Operations assume
//! well-formed input; zero-length vectors propagate NaN rather than failing.

mod vec3;

pub use vec3::Vec3;
