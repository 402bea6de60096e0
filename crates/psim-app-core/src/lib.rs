// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for psim tools (config, prefs).
//! Keeps the CLI and any future front-end thin and storage-agnostic.

pub mod config;
pub mod prefs;
