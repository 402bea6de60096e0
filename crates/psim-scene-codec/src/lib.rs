// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Text codec and test harness for psim scenes.
//!
//! This crate provides:
//! - encode/decode of the line-oriented `.psim` scene format
//! - MockAdapter for headless testing of ScenePort consumers
//!
//! # Design
//!
//! Serialization is deliberately separated from the engine and from the port
//! contract. This keeps psim-core free of I/O concerns and psim-scene-port
//! dependency-free.

mod mock_adapter;
mod text;

pub use mock_adapter::*;
pub use text::*;
