// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene port contract for psim renderers.
//!
//! This crate defines what a render consumer may see of the simulation: body
//! transforms and the forces currently acting on them. It carries no engine
//! types, so renderers never link against the simulation core.
//!
//! # Design Principles
//!
//! - **Renderers are read-only**: views are plain values copied out of the
//!   world; nothing here can mutate a body.
//! - **No time ownership**: the simulation clock is handed to the port at the
//!   start of every frame.

mod port;
mod types;

pub use port::ScenePort;
pub use types::{BodyView, ForceTag, ForceView, ShapeTag};
