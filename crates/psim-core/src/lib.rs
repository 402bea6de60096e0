// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! psim core: a small rigid-body sandbox with a scrubbable timeline.
//!
//! A [`World`] owns a set of [`Body`] values and advances them in fixed
//! [`DT`] steps. Every step is recorded per body, so the world can jump back to
//! any visited time and replay it exactly, or continue forward from the last
//! simulated instant.
//!
//! Bodies carry two force collections:
//! - persistent [`Event`]s (user forces and the body's weight), and
//! - ad-hoc contact [`Force`]s created by collisions (reactions and collision
//!   impulses), tagged with the body that caused them.
//!
//! Collision handling is deliberately approximate: see `psim-geom` for the
//! shape predicates.

mod body;
mod constants;
mod contact;
mod event;
mod ident;
mod timekeeper;
mod view;
mod world;

pub use body::{Body, BodyError, BodyKind, BodyLookup};
pub use constants::{
    DEFAULT_MASS, DEFAULT_WINDOW, DT, FLOOR_MASS, GRAVITY, IMPULSE_WINDOW, STEPS_PER_SECOND,
    WEIGHT_ID,
};
pub use event::{Event, EventKind, Force, ForceKind};
pub use ident::BodyId;
pub use timekeeper::{Record, TimeKeeper};
pub use world::{World, WorldError};

pub use psim_geom::{GeomError, Shape, ShapeKind, Vec3};
