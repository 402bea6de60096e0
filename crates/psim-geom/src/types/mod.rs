// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types used by the shape layer.
//!
//! Overlap and containment are inclusive on faces so that resting contact
//! keeps a pair registered instead of flickering in and out.

#[doc = "Axis-aligned bounding boxes (world space)."]
pub mod aabb;
