// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rigid bodies and their fixed-step integrator.

use std::collections::BTreeSet;
use std::fmt;

use psim_geom::{GeomError, Shape, ShapeKind, Vec3};
use thiserror::Error;

use crate::constants::{DEFAULT_MASS, DT, FLOOR_MASS};
use crate::event::{Event, Force, ForceKind};
use crate::ident::BodyId;
use crate::timekeeper::{Record, TimeKeeper};

/// Variant requested when creating a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Unit cube.
    Cube,
    /// Sphere of radius 0.5.
    Sphere,
    /// Immovable ground slab.
    Floor,
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cube => "Cube",
            Self::Sphere => "Sphere",
            Self::Floor => "Floor",
        })
    }
}

/// Errors raised by body edits.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BodyError {
    /// New dimensions produced an invalid shape.
    #[error(transparent)]
    Geometry(#[from] GeomError),
    /// Mass must be finite and strictly positive.
    #[error("mass must be finite and > 0, got {0}")]
    NonPositiveMass(f32),
}

/// Read access to the other bodies of a world while one body is stepped.
pub trait BodyLookup {
    /// Collision shape of body `id`, if it still exists.
    fn shape_of(&self, id: BodyId) -> Option<&Shape>;
}

impl BodyLookup for [Body] {
    fn shape_of(&self, id: BodyId) -> Option<&Shape> {
        self.iter().find(|b| b.id == id).map(Body::shape)
    }
}

/// A simulated rigid body.
///
/// Dimensions are full edge lengths for cubes and the radius (repeated on all
/// three axes) for spheres. Force application points live in world space and
/// follow the body when it moves.
#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) id: BodyId,
    name: String,
    colour: [f32; 3],
    pub(crate) shape: Shape,
    dimensions: Vec3,
    pub(crate) velocity: Vec3,
    angular_velocity: Vec3,
    pub(crate) mass: f32,
    is_static: bool,
    events: Vec<Event>,
    pub(crate) forces: Vec<Force>,
    pub(crate) collisions: BTreeSet<BodyId>,
    pub(crate) collision_log: Vec<(f32, String)>,
    history: TimeKeeper,
}

impl Body {
    /// Builds a body of `kind` with the defaults for that kind.
    ///
    /// Cubes and spheres start at the origin with mass 1 and a weight event;
    /// the floor is a static 200×4×200 slab centred at `(0, -2, 0)` named
    /// `FLOOR`. History starts with one record at `t = 0`.
    #[must_use]
    pub fn create(id: BodyId, kind: BodyKind) -> Self {
        let (dimensions, position, mass, is_static, colour) = match kind {
            BodyKind::Cube => (Vec3::splat(1.0), Vec3::ZERO, DEFAULT_MASS, false, [0.85, 0.35, 0.3]),
            BodyKind::Sphere => (Vec3::splat(0.5), Vec3::ZERO, DEFAULT_MASS, false, [0.3, 0.55, 0.85]),
            BodyKind::Floor => (
                Vec3::new(200.0, 4.0, 200.0),
                Vec3::new(0.0, -2.0, 0.0),
                FLOOR_MASS,
                true,
                [0.45, 0.45, 0.45],
            ),
        };
        let name = match kind {
            BodyKind::Floor => "FLOOR".to_owned(),
            _ => format!("{kind} {}", id.raw()),
        };
        let Ok(shape) = Shape::new(shape_kind(kind == BodyKind::Sphere, dimensions)) else {
            unreachable!("BUG: default {kind} dimensions must be positive");
        };
        let shape = shape.at(position);
        let mut events = Vec::new();
        if !is_static {
            events.push(Event::from(Force::weight(mass).with_anchor(position)));
        }
        let mut body = Self {
            id,
            name,
            colour,
            shape,
            dimensions,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass,
            is_static,
            events,
            forces: Vec::new(),
            collisions: BTreeSet::new(),
            collision_log: Vec::new(),
            history: TimeKeeper::new(),
        };
        body.wipe_history();
        body
    }

    /// Handle.
    #[must_use]
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the body.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// RGB colour.
    #[must_use]
    pub fn colour(&self) -> [f32; 3] {
        self.colour
    }

    /// Sets the RGB colour.
    pub fn set_colour(&mut self, colour: [f32; 3]) {
        self.colour = colour;
    }

    /// Collision shape (position and rotation included).
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// `true` for sphere bodies.
    #[must_use]
    pub fn is_sphere(&self) -> bool {
        self.shape.is_sphere()
    }

    /// Centre position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.shape.position()
    }

    /// Roll/pitch/yaw.
    #[must_use]
    pub fn rotation(&self) -> Vec3 {
        self.shape.rotation()
    }

    /// Dimensions as edited (full extents, or radius for spheres).
    #[must_use]
    pub fn dimensions(&self) -> Vec3 {
        self.dimensions
    }

    /// Linear velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Overrides the linear velocity.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Angular velocity.
    #[must_use]
    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    /// Overrides the angular velocity.
    pub fn set_angular_velocity(&mut self, angular_velocity: Vec3) {
        self.angular_velocity = angular_velocity;
    }

    /// Mass.
    #[must_use]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// `mass · velocity`.
    #[must_use]
    pub fn momentum(&self) -> Vec3 {
        self.velocity.scale(self.mass)
    }

    /// `true` for bodies that ignore translation and rotation.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Sets the mass and rescales every weight event to match.
    pub fn set_mass(&mut self, mass: f32) -> Result<(), BodyError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(BodyError::NonPositiveMass(mass));
        }
        self.mass = mass;
        for force in self.events.iter_mut().filter_map(Event::as_force_mut) {
            if force.kind() == ForceKind::Weight {
                force.set_weight_mass(mass);
            }
        }
        Ok(())
    }

    /// Persistent events in insertion order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Mutable access to event `index`.
    pub fn event_mut(&mut self, index: usize) -> Option<&mut Event> {
        self.events.get_mut(index)
    }

    /// Attaches a persistent event.
    pub fn add_event(&mut self, event: impl Into<Event>) {
        self.events.push(event.into());
    }

    /// Detaches event `index`.
    pub fn remove_event(&mut self, index: usize) -> Option<Event> {
        (index < self.events.len()).then(|| self.events.remove(index))
    }

    /// Ad-hoc contact forces (reactions and collision impulses).
    #[must_use]
    pub fn forces(&self) -> &[Force] {
        &self.forces
    }

    /// Adds an ad-hoc force.
    pub fn add_force(&mut self, force: Force) {
        self.forces.push(force);
    }

    /// Bodies this one is currently registered as touching.
    pub fn colliding_with(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.collisions.iter().copied()
    }

    /// `(time, message)` entries, one per first contact with another body.
    #[must_use]
    pub fn collision_log(&self) -> &[(f32, String)] {
        &self.collision_log
    }

    /// Recorded kinematic history.
    #[must_use]
    pub fn history(&self) -> &TimeKeeper {
        &self.history
    }

    /// Snapshot at `t`, if that step has been simulated.
    #[must_use]
    pub fn record_at(&self, t: f32) -> Option<&Record> {
        self.history.retrieve(t)
    }

    /// Restarts the history with the current state as the `t = 0` record.
    pub fn wipe_history(&mut self) {
        let initial = self.snapshot(0.0);
        self.history.wipe(initial);
    }

    /// Where `force`'s application point would sit with the body at
    /// `position`/`rotation`.
    #[must_use]
    pub fn anchor_at_pose(&self, force: &Force, position: Vec3, rotation: Vec3) -> Vec3 {
        force
            .local_anchor(self.position(), self.rotation())
            .rotate_euler(&rotation)
            .add(&position)
    }

    /// Moves, rotates and resizes the body.
    ///
    /// Every force anchor (persistent and ad-hoc) stays on the same material
    /// point of the body.
    pub fn set_transform(
        &mut self,
        position: Vec3,
        rotation: Vec3,
        dimensions: Vec3,
    ) -> Result<(), BodyError> {
        self.shape
            .set_kind(shape_kind(self.shape.is_sphere(), dimensions))?;
        self.dimensions = dimensions;
        self.place(position, rotation);
        Ok(())
    }

    /// Translates by `delta`. No-op for static bodies.
    pub fn apply_translation(&mut self, delta: Vec3) {
        if self.is_static {
            return;
        }
        self.place(self.position().add(&delta), self.rotation());
    }

    /// Adds `delta` to each rotation angle. No-op for static bodies.
    pub fn apply_rotation(&mut self, delta: Vec3) {
        if self.is_static {
            return;
        }
        self.place(self.position(), self.rotation().add(&delta));
    }

    /// Changes the dimensions, keeping position and rotation.
    pub fn apply_scale(&mut self, dimensions: Vec3) -> Result<(), BodyError> {
        self.set_transform(self.position(), self.rotation(), dimensions)
    }

    /// Persistent and ad-hoc forces active at `t`.
    ///
    /// Events count when enabled and inside their window. Ad-hoc forces count
    /// once `t >= start`: reactions while their toggle is on, everything else
    /// until `end`.
    #[must_use]
    pub fn active_forces(&self, t: f32) -> Vec<&Force> {
        let persistent = self.events.iter().filter_map(|e| e.active_force(t));
        let ad_hoc = self.forces.iter().filter(|f| {
            t >= f.start()
                && if f.kind() == ForceKind::Reaction {
                    f.enabled()
                } else {
                    t < f.end()
                }
        });
        persistent.chain(ad_hoc).collect()
    }

    /// Resultant torque about the centre at `t`: `Σ (position − anchor) × F`.
    #[must_use]
    pub fn torque(&self, t: f32) -> Vec3 {
        torque_about(self.position(), &self.active_forces(t))
    }

    /// Advances the body to time `t`.
    ///
    /// If `t` was already simulated the cached record is restored and nothing
    /// else changes. Otherwise contact forces are refreshed against `others`,
    /// the active forces are integrated over one [`DT`] with semi-implicit
    /// Euler, and the result is recorded at `t`.
    pub fn step<L: BodyLookup + ?Sized>(&mut self, t: f32, others: &L) {
        if self.restore_at(t) {
            return;
        }
        self.update_collision_forces(others);

        let (net, torque) = {
            let active = self.active_forces(t);
            (
                Force::resultant(active.iter().copied()),
                torque_about(self.position(), &active),
            )
        };

        let acceleration = net.div(self.mass);
        self.velocity = self.velocity.add(&acceleration.scale(DT));
        let displacement = self
            .velocity
            .scale(DT)
            .add(&acceleration.scale(0.5 * DT * DT));
        self.apply_translation(displacement);

        let angular_acceleration = torque.div(self.mass);
        self.angular_velocity = self.angular_velocity.add(&angular_acceleration.scale(DT));
        let turn = self
            .angular_velocity
            .scale(DT)
            .add(&angular_acceleration.scale(0.5 * DT * DT));
        self.apply_rotation(turn);

        let record = self.snapshot(t);
        self.history.record(record);
    }

    /// Restores the cached state at `t`. Returns `false` when `t` has not been
    /// simulated, leaving the body untouched.
    pub fn restore_at(&mut self, t: f32) -> bool {
        let Some(record) = self.history.retrieve(t).copied() else {
            return false;
        };
        self.place(record.position, record.rotation);
        self.velocity = record.velocity;
        self.angular_velocity = record.angular_velocity;
        true
    }

    /// Clears contact bookkeeping: ad-hoc forces and the collision set.
    pub(crate) fn clear_contacts(&mut self) {
        self.forces.clear();
        self.collisions.clear();
    }

    /// Drops everything that refers to `other`.
    pub(crate) fn forget(&mut self, other: BodyId) {
        self.collisions.remove(&other);
        self.forces.retain(|f| f.cause() != Some(other));
    }

    fn snapshot(&self, time: f32) -> Record {
        Record {
            time,
            position: self.position(),
            rotation: self.rotation(),
            velocity: self.velocity,
            angular_velocity: self.angular_velocity,
        }
    }

    fn place(&mut self, position: Vec3, rotation: Vec3) {
        let from = (self.position(), self.rotation());
        let to = (position, rotation);
        for force in self.events.iter_mut().filter_map(Event::as_force_mut) {
            force.follow(from, to);
        }
        for force in &mut self.forces {
            force.follow(from, to);
        }
        self.shape.set_position(position);
        self.shape.set_rotation(rotation);
    }
}

fn torque_about(centre: Vec3, forces: &[&Force]) -> Vec3 {
    forces.iter().fold(Vec3::ZERO, |acc, f| {
        acc.add(&centre.sub(&f.anchor()).cross(&f.direction()))
    })
}

fn shape_kind(is_sphere: bool, dimensions: Vec3) -> ShapeKind {
    if is_sphere {
        ShapeKind::Sphere {
            radius: dimensions.x(),
        }
    } else {
        ShapeKind::Cuboid {
            half_extents: dimensions.scale(0.5),
        }
    }
}
