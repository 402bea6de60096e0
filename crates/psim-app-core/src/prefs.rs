// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved preferences for the psim sandbox tools.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Config key under which [`SandboxPrefs`] are stored.
pub const PREFS_KEY: &str = "sandbox_prefs";

/// Preferences remembered between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxPrefs {
    /// Scene file opened most recently.
    pub last_scene: Option<PathBuf>,
    /// Default tracing filter directive when neither a flag nor `RUST_LOG`
    /// is given.
    pub log_filter: String,
    /// Reporting cadence for progress output, in milliseconds of
    /// simulation time.
    pub report_every_ms: u32,
}

impl Default for SandboxPrefs {
    fn default() -> Self {
        Self {
            last_scene: None,
            log_filter: "warn".to_owned(),
            report_every_ms: 250,
        }
    }
}

impl SandboxPrefs {
    /// Reporting cadence in seconds of simulation time; never below one step.
    pub fn report_every_secs(&self) -> f32 {
        (self.report_every_ms.max(1) as f32) / 1000.0
    }
}
