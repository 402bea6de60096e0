// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Read-only projection of a world onto a [`ScenePort`].

use psim_scene_port::{BodyView, ForceTag, ForceView, ScenePort, ShapeTag};

use crate::body::Body;
use crate::event::{Force, ForceKind};
use crate::world::World;

impl World {
    /// Emits one frame: every body, then every force active at the current
    /// time, anchored at its application point.
    pub fn present<P: ScenePort + ?Sized>(&self, port: &mut P) {
        let t = self.time();
        port.begin_frame(t);
        for body in self.bodies() {
            port.draw_body(&body_view(body));
        }
        for body in self.bodies() {
            for force in body.active_forces(t) {
                port.draw_force(&force_view(body, force));
            }
        }
        port.end_frame();
    }
}

fn body_view(body: &Body) -> BodyView {
    BodyView {
        key: body.id().raw(),
        name: body.name().to_owned(),
        shape: if body.is_sphere() {
            ShapeTag::Sphere
        } else {
            ShapeTag::Cuboid
        },
        position: body.position().to_array(),
        rotation: body.rotation().to_array(),
        dimensions: body.dimensions().to_array(),
        colour: body.colour(),
        is_static: body.is_static(),
    }
}

fn force_view(body: &Body, force: &Force) -> ForceView {
    ForceView {
        body: body.id().raw(),
        id: force.id().to_owned(),
        kind: match force.kind() {
            ForceKind::Impulse => ForceTag::Impulse,
            ForceKind::Constant => ForceTag::Constant,
            ForceKind::Weight => ForceTag::Weight,
            ForceKind::Reaction => ForceTag::Reaction,
        },
        from: force.anchor().to_array(),
        direction: force.direction().to_array(),
    }
}
