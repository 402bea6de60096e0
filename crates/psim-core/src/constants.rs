// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed simulation constants.

/// Integration step in seconds.
pub const DT: f32 = 0.001;

/// Steps per simulated second (`1 / DT`).
pub const STEPS_PER_SECOND: u32 = 1000;

/// Duration of every impulse force, in seconds.
pub const IMPULSE_WINDOW: f32 = 0.003;

/// Default active window length for new forces, in seconds.
pub const DEFAULT_WINDOW: f32 = 1.0;

/// Gravitational acceleration, m/s².
pub const GRAVITY: f32 = 9.81;

/// Mass of the floor slab. Large enough that nothing moves it.
pub const FLOOR_MASS: f32 = 5.97e24;

/// Mass assigned to freshly created dynamic bodies.
pub const DEFAULT_MASS: f32 = 1.0;

/// Identifier of the gravity force every dynamic body carries.
pub const WEIGHT_ID: &str = "Weight";
