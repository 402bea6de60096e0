// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mock adapter for headless testing of ScenePort consumers.
//!
//! MockAdapter keeps the last completed frame in plain collections without
//! any rendering. Use it to check what a renderer would have been shown.

use std::collections::BTreeMap;

use psim_scene_port::{BodyView, ForceTag, ForceView, ScenePort};

/// Mock scene adapter for testing.
///
/// Implements `ScenePort` by tracking the bodies and forces of the current
/// frame. A new frame replaces the previous one.
#[derive(Debug, Default)]
pub struct MockAdapter {
    /// Bodies of the current frame, by key.
    pub bodies: BTreeMap<u32, BodyView>,
    /// Forces of the current frame, in draw order.
    pub forces: Vec<ForceView>,
    /// Simulation time of the current frame.
    pub time: f32,
    /// Number of completed frames.
    pub frame_count: u32,
    in_frame: bool,
}

impl MockAdapter {
    /// Create a new mock adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bodies in the current frame.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of forces in the current frame.
    pub fn force_count(&self) -> usize {
        self.forces.len()
    }

    /// Get body by key.
    pub fn get_body(&self, key: u32) -> Option<&BodyView> {
        self.bodies.get(&key)
    }

    /// First body with this name.
    pub fn body_named(&self, name: &str) -> Option<&BodyView> {
        self.bodies.values().find(|b| b.name == name)
    }

    /// Forces drawn on body `key`.
    pub fn forces_on(&self, key: u32) -> impl Iterator<Item = &ForceView> + '_ {
        self.forces.iter().filter(move |f| f.body == key)
    }

    /// Forces of one kind, across all bodies.
    pub fn forces_of(&self, kind: ForceTag) -> impl Iterator<Item = &ForceView> + '_ {
        self.forces.iter().filter(move |f| f.kind == kind)
    }

    /// `true` between `begin_frame` and `end_frame`.
    pub fn in_frame(&self) -> bool {
        self.in_frame
    }
}

impl ScenePort for MockAdapter {
    fn begin_frame(&mut self, time: f32) {
        self.bodies.clear();
        self.forces.clear();
        self.time = time;
        self.in_frame = true;
    }

    fn draw_body(&mut self, body: &BodyView) {
        self.bodies.insert(body.key, body.clone());
    }

    fn draw_force(&mut self, force: &ForceView) {
        self.forces.push(force.clone());
    }

    fn end_frame(&mut self) {
        self.in_frame = false;
        self.frame_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psim_scene_port::ShapeTag;

    fn make_body(key: u32, name: &str) -> BodyView {
        BodyView {
            key,
            name: name.into(),
            shape: ShapeTag::Cuboid,
            position: [0.0, 1.0, 0.0],
            rotation: [0.0; 3],
            dimensions: [1.0; 3],
            colour: [1.0; 3],
            is_static: false,
        }
    }

    #[test]
    fn test_new_frame_replaces_old() {
        let mut adapter = MockAdapter::new();
        adapter.begin_frame(0.0);
        adapter.draw_body(&make_body(1, "a"));
        adapter.draw_body(&make_body(2, "b"));
        adapter.end_frame();
        assert_eq!(adapter.body_count(), 2);

        adapter.begin_frame(0.001);
        assert!(adapter.in_frame());
        adapter.draw_body(&make_body(2, "b"));
        adapter.end_frame();
        assert_eq!(adapter.body_count(), 1);
        assert_eq!(adapter.frame_count, 2);
        assert_eq!(adapter.time, 0.001);
        assert!(adapter.body_named("b").is_some());
        assert!(adapter.get_body(1).is_none());
    }

    #[test]
    fn test_forces_filter_by_body() {
        let mut adapter = MockAdapter::new();
        adapter.begin_frame(0.0);
        for (body, id) in [(1, "Weight"), (2, "Weight"), (1, "push")] {
            adapter.draw_force(&ForceView {
                body,
                id: id.into(),
                kind: ForceTag::Constant,
                from: [0.0; 3],
                direction: [1.0, 0.0, 0.0],
            });
        }
        adapter.end_frame();
        assert_eq!(adapter.forces_on(1).count(), 2);
        assert_eq!(adapter.forces_of(ForceTag::Constant).count(), 3);
    }
}
