// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Forces and the timed events that carry them.

use psim_geom::Vec3;

use crate::constants::{DEFAULT_WINDOW, GRAVITY, IMPULSE_WINDOW, WEIGHT_ID};
use crate::ident::BodyId;

/// Behavioural kind of a [`Force`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForceKind {
    /// Active for exactly [`IMPULSE_WINDOW`] seconds after `start`.
    Impulse,
    /// Active on `[start, end)`.
    Constant,
    /// Gravity; active from `start` with no end.
    Weight,
    /// Contact support; active while its toggle is on.
    Reaction,
}

impl ForceKind {
    /// Canonical name, as used by the scene file format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Impulse => "Impulse",
            Self::Constant => "Constant",
            Self::Weight => "Weight",
            Self::Reaction => "Reaction",
        }
    }
}

/// A force applied at a world-space point.
///
/// The window setters keep `start >= 0` and `end > start`, and an impulse's
/// end is always `start + IMPULSE_WINDOW`.
///
/// Once attached to a body that moves, the point is pinned in the body's
/// frame and the world-space anchor is re-derived from each new pose.
/// Returning to a pose therefore returns the anchor to the same world point.
#[derive(Debug, Clone, PartialEq)]
pub struct Force {
    id: String,
    start: f32,
    end: f32,
    enabled: bool,
    kind: ForceKind,
    direction: Vec3,
    anchor: Vec3,
    pinned: Option<Vec3>,
    cause: Option<BodyId>,
}

impl Force {
    /// New enabled force of `kind` and vector `direction`, applied at the
    /// origin over the default window `[0, 1)` (or `[0, 0.003)` for impulses).
    #[must_use]
    pub fn new(kind: ForceKind, direction: Vec3) -> Self {
        let end = if kind == ForceKind::Impulse {
            IMPULSE_WINDOW
        } else {
            DEFAULT_WINDOW
        };
        Self {
            id: String::new(),
            start: 0.0,
            end,
            enabled: true,
            kind,
            direction,
            anchor: Vec3::ZERO,
            pinned: None,
            cause: None,
        }
    }

    /// Gravity acting on a body of `mass`: `(0, -g·mass, 0)`, id `"Weight"`.
    #[must_use]
    pub fn weight(mass: f32) -> Self {
        let mut force = Self::new(ForceKind::Weight, weight_vector(mass)).with_id(WEIGHT_ID);
        force.end = f32::INFINITY;
        force
    }

    /// Builder-style identifier setter.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Builder-style application point setter.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Vec3) -> Self {
        self.set_anchor(anchor);
        self
    }

    /// Builder-style start setter (same rules as [`Force::set_start`]).
    #[must_use]
    pub fn starting_at(mut self, t: f32) -> Self {
        self.set_start(t);
        self
    }

    /// Tags the force with the body whose contact produced it.
    #[must_use]
    pub fn caused_by(mut self, body: BodyId) -> Self {
        self.cause = Some(body);
        self
    }

    /// Identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Replaces the identifier.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Window start in seconds.
    #[must_use]
    pub fn start(&self) -> f32 {
        self.start
    }

    /// Window end in seconds (exclusive).
    #[must_use]
    pub fn end(&self) -> f32 {
        self.end
    }

    /// Moves the window start. Negative times are ignored. A start past the
    /// current end pushes the end to `start + 1`; impulses re-derive their end.
    pub fn set_start(&mut self, t: f32) {
        if t >= 0.0 {
            self.start = t;
        }
        if self.start > self.end {
            self.end = self.start + DEFAULT_WINDOW;
        }
        if self.kind == ForceKind::Impulse {
            self.end = self.start + IMPULSE_WINDOW;
        }
    }

    /// Moves the window end. Ignored unless `t > start`, and always ignored
    /// for impulses, whose window length is fixed.
    pub fn set_end(&mut self, t: f32) {
        if t > self.start && self.kind != ForceKind::Impulse {
            self.end = t;
        }
    }

    /// Enable toggle. Persistent events and reactions honour it.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the enable toggle.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Kind.
    #[must_use]
    pub fn kind(&self) -> ForceKind {
        self.kind
    }

    /// Changes the kind; switching to [`ForceKind::Impulse`] clamps the window.
    pub fn set_kind(&mut self, kind: ForceKind) {
        self.kind = kind;
        if kind == ForceKind::Impulse {
            self.end = self.start + IMPULSE_WINDOW;
        }
    }

    /// Force vector.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Replaces the force vector.
    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction;
    }

    /// World-space application point.
    #[must_use]
    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    /// Moves the application point, in world space at the owning body's
    /// current pose.
    pub fn set_anchor(&mut self, anchor: Vec3) {
        self.anchor = anchor;
        self.pinned = None;
    }

    /// Body whose contact created this force, if any.
    #[must_use]
    pub fn cause(&self) -> Option<BodyId> {
        self.cause
    }

    /// Magnitude of the force vector.
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        self.direction.length()
    }

    /// Whether `t` falls inside `[start, end)`; weights have no end.
    #[must_use]
    pub fn in_window(&self, t: f32) -> bool {
        t >= self.start && (self.kind == ForceKind::Weight || t < self.end)
    }

    /// Vector sum of the given forces.
    pub fn resultant<'a>(forces: impl IntoIterator<Item = &'a Self>) -> Vec3 {
        forces
            .into_iter()
            .fold(Vec3::ZERO, |acc, f| acc.add(&f.direction))
    }

    /// Application point in the frame of a body posed at
    /// `position`/`rotation`.
    pub(crate) fn local_anchor(&self, position: Vec3, rotation: Vec3) -> Vec3 {
        self.pinned
            .unwrap_or_else(|| self.anchor.sub(&position).unrotate_euler(&rotation))
    }

    /// Follows the owning body from pose `from` to pose `to`.
    pub(crate) fn follow(&mut self, from: (Vec3, Vec3), to: (Vec3, Vec3)) {
        let local = self.local_anchor(from.0, from.1);
        self.pinned = Some(local);
        self.anchor = local.rotate_euler(&to.1).add(&to.0);
    }

    pub(crate) fn set_weight_mass(&mut self, mass: f32) {
        self.direction = weight_vector(mass);
    }
}

fn weight_vector(mass: f32) -> Vec3 {
    Vec3::new(0.0, -GRAVITY * mass, 0.0)
}

/// Discriminant of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A timed force.
    Force,
}

/// A persistent, user-visible timed occurrence attached to a body.
///
/// Only forces exist today; the common accessors delegate to the payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A timed force.
    Force(Force),
}

impl Event {
    /// Discriminant.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Force(_) => EventKind::Force,
        }
    }

    /// Identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Force(f) => f.id(),
        }
    }

    /// Window start.
    #[must_use]
    pub fn start(&self) -> f32 {
        match self {
            Self::Force(f) => f.start(),
        }
    }

    /// Window end.
    #[must_use]
    pub fn end(&self) -> f32 {
        match self {
            Self::Force(f) => f.end(),
        }
    }

    /// Enable toggle.
    #[must_use]
    pub fn enabled(&self) -> bool {
        match self {
            Self::Force(f) => f.enabled(),
        }
    }

    /// Sets the enable toggle.
    pub fn set_enabled(&mut self, enabled: bool) {
        match self {
            Self::Force(f) => f.set_enabled(enabled),
        }
    }

    /// Moves the window start (see [`Force::set_start`]).
    pub fn set_start(&mut self, t: f32) {
        match self {
            Self::Force(f) => f.set_start(t),
        }
    }

    /// Moves the window end (see [`Force::set_end`]).
    pub fn set_end(&mut self, t: f32) {
        match self {
            Self::Force(f) => f.set_end(t),
        }
    }

    /// The force payload.
    #[must_use]
    pub fn as_force(&self) -> Option<&Force> {
        match self {
            Self::Force(f) => Some(f),
        }
    }

    /// Mutable force payload.
    pub fn as_force_mut(&mut self) -> Option<&mut Force> {
        match self {
            Self::Force(f) => Some(f),
        }
    }

    /// The force if this event is enabled and active at `t`.
    #[must_use]
    pub fn active_force(&self, t: f32) -> Option<&Force> {
        self.as_force().filter(|f| f.enabled() && f.in_window(t))
    }
}

impl From<Force> for Event {
    fn from(force: Force) -> Self {
        Self::Force(force)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_one_second() {
        let f = Force::new(ForceKind::Constant, Vec3::UNIT_X);
        assert_eq!((f.start(), f.end()), (0.0, 1.0));
        assert!(f.enabled());
    }

    #[test]
    fn start_past_end_extends_window() {
        let mut f = Force::new(ForceKind::Constant, Vec3::UNIT_X);
        f.set_start(3.0);
        assert_eq!((f.start(), f.end()), (3.0, 4.0));
    }

    #[test]
    fn negative_start_is_ignored() {
        let mut f = Force::new(ForceKind::Constant, Vec3::UNIT_X).starting_at(0.5);
        f.set_start(-1.0);
        assert_eq!(f.start(), 0.5);
    }

    #[test]
    fn end_must_follow_start() {
        let mut f = Force::new(ForceKind::Constant, Vec3::UNIT_X).starting_at(0.5);
        f.set_end(0.25);
        assert_eq!(f.end(), 1.0);
        f.set_end(2.0);
        assert_eq!(f.end(), 2.0);
    }

    #[test]
    fn impulse_window_is_fixed() {
        let mut f = Force::new(ForceKind::Impulse, Vec3::UNIT_Y);
        f.set_end(5.0);
        assert!((f.end() - IMPULSE_WINDOW).abs() < 1e-7);

        let mut g = Force::new(ForceKind::Constant, Vec3::UNIT_Y).starting_at(2.0);
        g.set_kind(ForceKind::Impulse);
        assert!((g.end() - 2.003).abs() < 1e-6);
    }

    #[test]
    fn disabled_event_is_never_active() {
        let mut e = Event::from(Force::new(ForceKind::Constant, Vec3::UNIT_X));
        assert!(e.active_force(0.5).is_some());
        e.set_enabled(false);
        assert!(e.active_force(0.5).is_none());
    }

    #[test]
    fn followed_anchor_returns_with_the_pose() {
        let mut f = Force::new(ForceKind::Constant, Vec3::UNIT_X)
            .with_anchor(Vec3::new(0.0, 50.5, 0.0));
        let home = (Vec3::new(0.0, 50.0, 0.0), Vec3::ZERO);
        let away = (Vec3::new(0.3, 49.7, -0.2), Vec3::new(0.4, -1.1, 0.7));
        f.follow(home, away);
        assert!((f.anchor().distance(&away.0) - 0.5).abs() < 1e-5);
        f.follow(away, home);
        assert_eq!(f.anchor(), Vec3::new(0.0, 50.5, 0.0));

        // A new world-space anchor is taken at the current pose.
        f.set_anchor(Vec3::new(1.0, 50.0, 0.0));
        f.follow(home, away);
        f.follow(away, home);
        assert_eq!(f.anchor(), Vec3::new(1.0, 50.0, 0.0));
    }

    #[test]
    fn resultant_sums_directions() {
        let forces = [
            Force::new(ForceKind::Constant, Vec3::new(1.0, 2.0, 0.0)),
            Force::new(ForceKind::Constant, Vec3::new(-3.0, 0.0, 1.0)),
        ];
        assert_eq!(Force::resultant(&forces), Vec3::new(-2.0, 2.0, 1.0));
    }
}
