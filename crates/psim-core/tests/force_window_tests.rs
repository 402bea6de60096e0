// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
//! Activation windows of persistent and ad-hoc forces.

use psim_core::{Body, BodyId, BodyKind, Force, ForceKind, Vec3, IMPULSE_WINDOW};

fn cube() -> Body {
    Body::create(BodyId::from_raw(1), BodyKind::Cube)
}

fn active_ids(body: &Body, t: f32) -> Vec<String> {
    body.active_forces(t)
        .into_iter()
        .map(|f| f.id().to_owned())
        .collect()
}

#[test]
fn weight_for_two_kilograms_is_always_active() {
    let w = Force::weight(2.0);
    assert_eq!(w.id(), "Weight");
    assert_eq!(w.kind(), ForceKind::Weight);
    assert!((w.direction().y() + 19.62).abs() < 1e-5);
    assert_eq!(w.direction().x(), 0.0);
    assert_eq!(w.direction().z(), 0.0);

    let mut body = cube();
    body.set_mass(2.0).unwrap();
    assert_eq!(active_ids(&body, 0.0), ["Weight"]);
    assert_eq!(active_ids(&body, 1_000_000.0), ["Weight"]);
}

#[test]
fn impulse_is_active_for_three_milliseconds() {
    let impulse = Force::new(ForceKind::Impulse, Vec3::UNIT_X)
        .with_id("kick")
        .starting_at(1.0);
    assert!((impulse.end() - 1.003).abs() < 1e-6);
    assert!((impulse.end() - impulse.start() - IMPULSE_WINDOW).abs() < 1e-6);

    let mut body = cube();
    body.add_event(impulse);
    let kicked = |t: f32| active_ids(&body, t).iter().any(|id| id == "kick");
    assert!(!kicked(0.999));
    assert!(kicked(1.0));
    assert!(kicked(1.002));
    assert!(!kicked(1.003));
}

#[test]
fn disabled_events_are_skipped() {
    let mut body = cube();
    body.add_event(Force::new(ForceKind::Constant, Vec3::UNIT_X).with_id("push"));
    assert_eq!(active_ids(&body, 0.5), ["Weight", "push"]);
    body.event_mut(1).unwrap().set_enabled(false);
    assert_eq!(active_ids(&body, 0.5), ["Weight"]);
}

#[test]
fn constant_force_ends_exclusively() {
    let mut body = cube();
    let mut push = Force::new(ForceKind::Constant, Vec3::UNIT_X).with_id("push");
    push.set_start(0.25);
    push.set_end(0.5);
    body.add_event(push);
    assert!(!active_ids(&body, 0.2).contains(&"push".to_owned()));
    assert!(active_ids(&body, 0.25).contains(&"push".to_owned()));
    assert!(!active_ids(&body, 0.5).contains(&"push".to_owned()));
}

#[test]
fn reactions_follow_toggle_not_window() {
    let mut body = cube();
    let mut reaction = Force::new(ForceKind::Reaction, Vec3::UNIT_Y).with_id("support");
    body.add_force(reaction.clone());
    // Well past the default one-second window.
    assert!(active_ids(&body, 50.0).contains(&"support".to_owned()));

    reaction.set_enabled(false);
    let mut off = cube();
    off.add_force(reaction);
    assert!(!active_ids(&off, 0.5).contains(&"support".to_owned()));
}

#[test]
fn ad_hoc_impulse_ignores_toggle() {
    let mut body = cube();
    let mut impulse = Force::new(ForceKind::Impulse, Vec3::UNIT_Y).with_id("bump");
    impulse.set_enabled(false);
    body.add_force(impulse);
    assert!(active_ids(&body, 0.001).contains(&"bump".to_owned()));
}

#[test]
fn set_mass_rewrites_weight() {
    let mut body = cube();
    body.set_mass(3.0).unwrap();
    let w = body.events()[0].as_force().unwrap();
    assert!((w.direction().y() + 29.43).abs() < 1e-4);
    assert!(body.set_mass(0.0).is_err());
    assert!(body.set_mass(f32::NAN).is_err());
    assert_eq!(body.mass(), 3.0);
}
