// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene port trait defining the renderer contract.

use crate::{BodyView, ForceView};

/// Scene rendering port trait.
///
/// A frame is always `begin_frame`, then every body, then every active force,
/// then `end_frame`. Implementors must not assume bodies arrive in any order
/// other than the world's body order.
pub trait ScenePort {
    /// Start a frame for simulation time `time` (seconds).
    fn begin_frame(&mut self, time: f32);

    /// Receive one body transform.
    fn draw_body(&mut self, body: &BodyView);

    /// Receive one active force, anchored at its application point.
    fn draw_force(&mut self, force: &ForceView);

    /// Finish the frame.
    fn end_frame(&mut self);
}
