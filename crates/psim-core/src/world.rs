// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! World orchestration: body arena, global clock, stepping and scrubbing.

use psim_geom::{resolve_collisions, Shape};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::body::{Body, BodyError, BodyKind, BodyLookup};
use crate::constants::STEPS_PER_SECOND;
use crate::ident::BodyId;

/// Errors returned by [`World`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WorldError {
    /// No body with this handle exists.
    #[error("unknown body: {0}")]
    UnknownBody(BodyId),
    /// Time jumps must target `t >= 0`.
    #[error("cannot jump to negative time {0}")]
    NegativeTime(f32),
    /// Time jumps must target a finite time.
    #[error("cannot jump to non-finite time {0}")]
    NonFiniteTime(f32),
    /// A body edit was rejected.
    #[error(transparent)]
    Body(#[from] BodyError),
}

/// A simulation: ordered bodies plus a fixed-step clock.
///
/// The clock counts whole steps, so `time()` is always an exact multiple of
/// [`crate::DT`] as seen by each body's history. The frontier is the furthest step
/// ever simulated since the last edit; everything up to it can be restored
/// without recomputation.
///
/// The pairwise collision scan is O(n²) per step. That is fine for the handful
/// of bodies a sandbox holds and nothing more.
#[derive(Debug, Clone, Default)]
pub struct World {
    bodies: Vec<Body>,
    next_id: u32,
    tick: u64,
    frontier: u64,
}

impl World {
    /// Empty world at `t = 0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// World holding only the static floor.
    #[must_use]
    pub fn with_floor() -> Self {
        let mut world = Self::new();
        world.spawn(BodyKind::Floor);
        world
    }

    /// Current simulation time in seconds.
    #[must_use]
    pub fn time(&self) -> f32 {
        tick_time(self.tick)
    }

    /// Furthest simulated time.
    #[must_use]
    pub fn frontier(&self) -> f32 {
        tick_time(self.frontier)
    }

    /// Number of bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// `true` when the world holds no bodies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Bodies in world order (floor first when created by [`World::with_floor`]).
    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter()
    }

    /// Looks a body up by handle.
    #[must_use]
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// First body with this display name.
    #[must_use]
    pub fn body_named(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name() == name)
    }

    /// Adds a body of `kind` and returns its handle.
    ///
    /// Adding a body invalidates the simulated timeline, so the world rewinds
    /// to `t = 0` with every body's current state as its starting record.
    pub fn spawn(&mut self, kind: BodyKind) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body::create(id, kind));
        debug!(%id, %kind, "spawned body");
        self.rebase();
        id
    }

    /// Removes a body, dropping every contact that referenced it.
    pub fn remove(&mut self, id: BodyId) -> Result<Body, WorldError> {
        let index = self.index_of(id)?;
        let body = self.bodies.remove(index);
        for other in &mut self.bodies {
            other.forget(id);
        }
        self.rebase();
        Ok(body)
    }

    /// Applies an edit to body `id` and rewinds the timeline.
    ///
    /// Any edit may change kinematic state, so every body restarts its history
    /// from its current state at `t = 0`, ad-hoc contact forces are dropped,
    /// and the frontier is reset.
    pub fn edit<R>(&mut self, id: BodyId, f: impl FnOnce(&mut Body) -> R) -> Result<R, WorldError> {
        let index = self.index_of(id)?;
        let out = f(&mut self.bodies[index]);
        self.rebase();
        Ok(out)
    }

    /// Advances the world by one [`crate::DT`].
    ///
    /// Below the frontier this is pure replay. At the frontier every ordered
    /// pair is tested, overlaps are separated immediately (later pairs see
    /// the moved positions), the first body of the pair registers the
    /// contact, and then every body integrates to the new time.
    #[instrument(level = "trace", skip(self))]
    pub fn global_step(&mut self) {
        if self.tick < self.frontier {
            self.tick += 1;
            self.restore_all();
            return;
        }

        let now = self.time();
        let n = self.bodies.len();
        for i in 0..n {
            for j in 0..n {
                if i == j || !self.bodies[i].shape.is_colliding(&self.bodies[j].shape) {
                    continue;
                }
                let (push_i, push_j) =
                    resolve_collisions(&self.bodies[i].shape, &self.bodies[j].shape);
                self.bodies[i].apply_translation(push_i);
                self.bodies[j].apply_translation(push_j);
                let (body, other) = pair_mut(&mut self.bodies, i, j);
                body.register_collision(other, now);
            }
        }

        self.tick += 1;
        self.frontier = self.tick;
        let t = self.time();
        for i in 0..n {
            let (before, rest) = self.bodies.split_at_mut(i);
            let (body, after) = rest.split_at_mut(1);
            body[0].step(t, &Others { before, after });
        }
    }

    /// Moves the clock to `target` seconds.
    ///
    /// Targets up to the frontier restore cached records directly. Later
    /// targets continue the simulation from the frontier, one step at a time,
    /// until the clock reaches the target; this blocks until done.
    #[instrument(skip(self))]
    pub fn time_jump(&mut self, target: f32) -> Result<(), WorldError> {
        if !target.is_finite() {
            return Err(WorldError::NonFiniteTime(target));
        }
        if target < 0.0 {
            return Err(WorldError::NegativeTime(target));
        }
        let target_tick = (f64::from(target) * f64::from(STEPS_PER_SECOND)).round() as u64;
        if target_tick <= self.frontier {
            self.tick = target_tick;
            self.restore_all();
            return Ok(());
        }
        if self.tick < self.frontier {
            self.tick = self.frontier;
            self.restore_all();
        }
        while self.tick < target_tick {
            self.global_step();
        }
        debug!(t = self.time(), "continued simulation to target");
        Ok(())
    }

    fn restore_all(&mut self) {
        let t = self.time();
        for body in &mut self.bodies {
            if !body.restore_at(t) {
                debug!(body = %body.name(), t, "no record to restore");
            }
        }
    }

    fn rebase(&mut self) {
        self.tick = 0;
        self.frontier = 0;
        for body in &mut self.bodies {
            body.clear_contacts();
            body.wipe_history();
        }
    }

    fn index_of(&self, id: BodyId) -> Result<usize, WorldError> {
        self.bodies
            .iter()
            .position(|b| b.id == id)
            .ok_or(WorldError::UnknownBody(id))
    }
}

/// Every body except the one being stepped.
struct Others<'a> {
    before: &'a [Body],
    after: &'a [Body],
}

impl BodyLookup for Others<'_> {
    fn shape_of(&self, id: BodyId) -> Option<&Shape> {
        self.before
            .shape_of(id)
            .or_else(|| self.after.shape_of(id))
    }
}

fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &Body) {
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &head[j])
    }
}

fn tick_time(tick: u64) -> f32 {
    (tick as f64 / f64::from(STEPS_PER_SECOND)) as f32
}
