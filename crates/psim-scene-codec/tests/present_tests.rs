// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
//! What a render consumer sees of a world.

use psim_core::{BodyKind, Force, ForceKind, Vec3, World};
use psim_scene_codec::MockAdapter;
use psim_scene_port::{ForceTag, ShapeTag};

fn scene() -> World {
    let mut world = World::with_floor();
    let cube = world.spawn(BodyKind::Cube);
    world
        .edit(cube, |b| {
            b.set_transform(Vec3::new(0.0, 3.0, 0.0), Vec3::ZERO, Vec3::splat(1.0))?;
            b.add_event(
                Force::new(ForceKind::Constant, Vec3::new(2.0, 0.0, 0.0))
                    .with_id("push")
                    .with_anchor(Vec3::new(0.0, 3.0, 0.0))
                    .starting_at(0.25),
            );
            Ok::<_, psim_core::BodyError>(())
        })
        .unwrap()
        .unwrap();
    let ball = world.spawn(BodyKind::Sphere);
    world
        .edit(ball, |b| b.set_transform(Vec3::new(3.0, 2.0, 0.0), Vec3::ZERO, Vec3::splat(0.5)))
        .unwrap()
        .unwrap();
    world
}

#[test]
fn frame_lists_every_body() {
    let world = scene();
    let mut adapter = MockAdapter::new();
    world.present(&mut adapter);

    assert_eq!(adapter.frame_count, 1);
    assert!(!adapter.in_frame());
    assert_eq!(adapter.body_count(), 3);

    let floor = adapter.body_named("FLOOR").unwrap();
    assert!(floor.is_static);
    assert_eq!(floor.dimensions, [200.0, 4.0, 200.0]);

    let ball = adapter.body_named("Sphere 2").unwrap();
    assert_eq!(ball.shape, ShapeTag::Sphere);
    assert_eq!(ball.position, [3.0, 2.0, 0.0]);
}

#[test]
fn only_active_forces_are_drawn() {
    let mut world = scene();
    let mut adapter = MockAdapter::new();

    world.present(&mut adapter);
    assert_eq!(adapter.time, 0.0);
    assert_eq!(adapter.force_count(), 2);
    assert_eq!(adapter.forces_of(ForceTag::Weight).count(), 2);

    world.time_jump(0.3).unwrap();
    world.present(&mut adapter);
    assert_eq!(adapter.time, 0.3);
    let pushes: Vec<_> = adapter.forces_of(ForceTag::Constant).collect();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].id, "push");
    assert_eq!(pushes[0].direction, [2.0, 0.0, 0.0]);

    world.time_jump(2.0).unwrap();
    world.present(&mut adapter);
    assert_eq!(adapter.forces_of(ForceTag::Constant).count(), 0);
}

#[test]
fn works_through_a_trait_object() {
    let world = scene();
    let mut adapter = MockAdapter::new();
    let port: &mut dyn psim_scene_port::ScenePort = &mut adapter;
    world.present(port);
    assert_eq!(adapter.frame_count, 1);
}
