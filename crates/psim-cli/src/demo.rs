// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Built-in demonstration scene.

use psim_core::{BodyError, BodyKind, Force, ForceKind, Vec3, World, WorldError};

/// A crate pushed sideways for one second and a ball dropped beside it,
/// both above the floor.
pub fn demo_world() -> Result<World, WorldError> {
    let mut world = World::with_floor();

    let crate_id = world.spawn(BodyKind::Cube);
    world.edit(crate_id, |body| {
        body.set_name("Crate");
        body.set_transform(Vec3::new(0.0, 2.0, 0.0), Vec3::ZERO, Vec3::splat(1.0))?;
        body.set_mass(2.0)?;
        body.add_event(
            Force::new(ForceKind::Constant, Vec3::new(4.0, 0.0, 0.0))
                .with_id("push")
                .with_anchor(body.position()),
        );
        Ok::<_, BodyError>(())
    })??;

    let ball_id = world.spawn(BodyKind::Sphere);
    world.edit(ball_id, |body| {
        body.set_name("Ball");
        body.set_colour([0.2, 0.6, 0.9]);
        body.set_transform(Vec3::new(-2.0, 3.0, 0.0), Vec3::ZERO, Vec3::splat(0.5))
    })??;

    Ok(world)
}
