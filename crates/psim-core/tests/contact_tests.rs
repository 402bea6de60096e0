// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
//! Contact normals and how support is shared between contact points.

use psim_core::{Body, BodyId, BodyKind, Force, ForceKind, Vec3, GRAVITY};

fn body(id: u32, kind: BodyKind, name: &str, at: Vec3, dims: Vec3) -> Body {
    let mut b = Body::create(BodyId::from_raw(id), kind);
    b.set_name(name);
    b.set_transform(at, Vec3::ZERO, dims).unwrap();
    b
}

fn unit_cube_at(at: Vec3) -> Body {
    body(1, BodyKind::Cube, "Crate", at, Vec3::splat(1.0))
}

fn pushed(mut b: Body, push: Vec3) -> Body {
    let anchor = b.position();
    b.add_event(Force::new(ForceKind::Constant, push).with_anchor(anchor));
    b
}

/// Reaction vectors indexed by contact number.
fn reactions(b: &Body, other: &str) -> Vec<Vec3> {
    (0..)
        .map_while(|i| {
            let id = format!("Reaction force due to {other}({i})");
            b.forces().iter().find(|f| f.id() == id).map(Force::direction)
        })
        .collect()
}

fn assert_close(a: Vec3, b: Vec3) {
    assert!(a.distance(&b) < 1e-4, "{a:?} != {b:?}");
}

#[test]
fn overhanging_cube_shares_support_by_reversed_lever() {
    let table = body(0, BodyKind::Cube, "Table", Vec3::ZERO, Vec3::new(2.0, 1.0, 2.0));
    // Resting on the table top with 0.4 m hanging past its +X edge.
    let mut c = unit_cube_at(Vec3::new(0.9, 1.0, 0.0));
    let contacts = c.shape().contact_points_to(table.shape());
    let centre = c.position();
    let lever: Vec<f32> = contacts
        .iter()
        .map(|p| p.sub(&centre).perpendicular_distance(&Vec3::UNIT_Y))
        .collect();
    let total: f32 = lever.iter().sum();
    let n = lever.len();
    assert_eq!(n, 4);
    assert!(
        (0..n).any(|i| (lever[i] - lever[n - 1 - i]).abs() > 0.1),
        "levers {lever:?}"
    );

    c.register_collision(&table, 0.0);
    let support = reactions(&c, "Table");
    assert_eq!(support.len(), n);
    for (i, r) in support.iter().enumerate() {
        let share = lever[n - 1 - i] / total;
        assert_close(*r, Vec3::new(0.0, GRAVITY * share, 0.0));
    }
    let sum = support.iter().fold(Vec3::ZERO, |acc, r| acc.add(r));
    assert_close(sum, Vec3::new(0.0, GRAVITY, 0.0));
}

#[test]
fn sphere_contact_pushes_away_from_its_centre() {
    let ball = body(0, BodyKind::Sphere, "Ball", Vec3::ZERO, Vec3::splat(1.0));
    let mut c = pushed(unit_cube_at(Vec3::new(1.2, 0.0, 0.0)), Vec3::new(-6.0, 0.0, 0.0));

    c.register_collision(&ball, 0.0);
    let support = reactions(&c, "Ball");
    assert_eq!(support.len(), 4);
    for r in &support {
        assert_close(*r, Vec3::new(1.5, 0.0, 0.0));
    }
}

#[test]
fn side_contact_uses_the_touched_box_face() {
    let block = body(0, BodyKind::Cube, "Block", Vec3::ZERO, Vec3::splat(2.0));

    let mut right = pushed(unit_cube_at(Vec3::new(1.5, 0.0, 0.0)), Vec3::new(-6.0, 0.0, 0.0));
    right.register_collision(&block, 0.0);
    let support = reactions(&right, "Block");
    assert_eq!(support.len(), 4);
    for r in &support {
        assert_close(*r, Vec3::new(1.5, 0.0, 0.0));
    }

    let mut left = pushed(unit_cube_at(Vec3::new(-1.5, 0.0, 0.0)), Vec3::new(6.0, 0.0, 0.0));
    left.register_collision(&block, 0.0);
    let support = reactions(&left, "Block");
    assert_eq!(support.len(), 4);
    for r in &support {
        assert_close(*r, Vec3::new(-1.5, 0.0, 0.0));
    }
}
