// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Contact bookkeeping: reaction forces, collision impulses, and pruning.

use psim_geom::Vec3;
use tracing::{debug, info, warn};

use crate::body::{Body, BodyLookup};
use crate::constants::IMPULSE_WINDOW;
use crate::event::{Force, ForceKind};

impl Body {
    /// Registers a contact with `other` at simulation time `t`.
    ///
    /// Support forces are spread over the sampled contact points along the
    /// contact normal, sized to cancel the component of the non-reaction load
    /// along that normal. On the first registration against `other` the body
    /// also receives a collision impulse that cancels its momentum over
    /// [`IMPULSE_WINDOW`], and the contact is logged.
    pub fn register_collision(&mut self, other: &Self, t: f32) {
        let contacts = self.shape.contact_points_to(&other.shape);
        match self.contact_normal(other) {
            Some(normal) if !contacts.is_empty() => {
                self.apply_reactions(other, t, &contacts, normal);
            }
            Some(_) => debug!(body = %self.name(), other = %other.name(), "no contact points sampled"),
            None => warn!(
                body = %self.name(),
                other = %other.name(),
                "degenerate contact normal; skipping reaction forces"
            ),
        }

        if self.collisions.insert(other.id) {
            let message = format!("Collision with {}", other.name());
            info!(body = %self.name(), time = t, "{message}");
            self.collision_log.push((t, message));

            let impulse = Force::new(
                ForceKind::Impulse,
                self.momentum().negate().div(IMPULSE_WINDOW),
            )
            .with_id(format!("Collision force due to {}", other.name()))
            .with_anchor(self.position())
            .starting_at(t)
            .caused_by(other.id);
            self.upsert_force(impulse);
        }
    }

    /// Prunes contact state that no longer holds.
    ///
    /// Forces caused by a tracked body switch off once their anchor leaves
    /// that body, and the body is untracked once the shapes stop overlapping.
    /// Bodies that no longer resolve through `others` are untracked outright.
    pub fn update_collision_forces<L: BodyLookup + ?Sized>(&mut self, others: &L) {
        let tracked: Vec<_> = self.collisions.iter().copied().collect();
        for id in tracked {
            let Some(other) = others.shape_of(id) else {
                self.forget(id);
                continue;
            };
            for force in self.forces.iter_mut().filter(|f| f.cause() == Some(id)) {
                if !other.contains_point(&force.anchor()) {
                    force.set_enabled(false);
                }
            }
            if !self.shape.is_colliding(other) {
                self.collisions.remove(&id);
            }
        }
    }

    /// Contact normal against `other`: towards a sphere's centre, or the
    /// outward normal of the first cuboid face (canonical order) that this
    /// body's centre sits in front of. `None` when no usable normal exists.
    fn contact_normal(&self, other: &Self) -> Option<Vec3> {
        let centre = self.position();
        let normal = match other.shape.faces() {
            None => other.position().sub(&centre),
            Some(faces) => {
                faces
                    .iter()
                    .find(|face| face.normal.dot(&centre.sub(&face.centroid)) >= 0.0)?
                    .normal
            }
        };
        (normal.length_squared() > 0.0 && normal.is_finite()).then_some(normal)
    }

    fn apply_reactions(&mut self, other: &Self, t: f32, contacts: &[Vec3], normal: Vec3) {
        let centre = self.position();
        let lever: Vec<f32> = contacts
            .iter()
            .map(|p| p.sub(&centre).perpendicular_distance(&normal))
            .collect();
        let total: f32 = lever.iter().sum();
        let n = contacts.len();
        // Point i takes the lever share of point n-1-i.
        let weight = |i: usize| {
            if total > 0.0 && total.is_finite() {
                lever[n - 1 - i] / total
            } else {
                1.0 / n as f32
            }
        };

        let load = Force::resultant(
            self.active_forces(t)
                .into_iter()
                .filter(|f| f.kind() != ForceKind::Reaction),
        );
        let magnitude = load.dot(&normal).abs() / normal.length();

        // Reactions push this body away from `other`.
        let mut unit = normal.normalize();
        if unit.dot(&centre.sub(&other.position())) < 0.0 {
            unit = unit.negate();
        }

        for (i, point) in contacts.iter().enumerate() {
            let reaction = Force::new(ForceKind::Reaction, unit.scale(magnitude * weight(i)))
                .with_id(reaction_id(other.name(), i))
                .with_anchor(*point)
                .caused_by(other.id);
            self.upsert_force(reaction);
        }
        // Contacts that disappeared since the last registration stop pushing.
        for force in &mut self.forces {
            if force.kind() == ForceKind::Reaction
                && force.cause() == Some(other.id)
                && reaction_index(force.id(), other.name()).is_some_and(|i| i >= n)
            {
                force.set_enabled(false);
            }
        }
    }

    fn upsert_force(&mut self, force: Force) {
        match self
            .forces
            .iter_mut()
            .find(|f| f.cause() == force.cause() && f.id() == force.id())
        {
            Some(slot) => *slot = force,
            None => self.forces.push(force),
        }
    }
}

fn reaction_id(other: &str, index: usize) -> String {
    format!("Reaction force due to {other}({index})")
}

fn reaction_index(id: &str, other: &str) -> Option<usize> {
    id.strip_prefix("Reaction force due to ")?
        .strip_prefix(other)?
        .strip_prefix('(')?
        .strip_suffix(')')?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaction_ids_round_trip() {
        let id = reaction_id("FLOOR", 3);
        assert_eq!(id, "Reaction force due to FLOOR(3)");
        assert_eq!(reaction_index(&id, "FLOOR"), Some(3));
        assert_eq!(reaction_index(&id, "Cube 1"), None);
    }
}
