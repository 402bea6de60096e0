// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-body kinematic history indexed by step.

use psim_geom::Vec3;

use crate::constants::DT;

/// Kinematic snapshot of a body at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// Simulation time in seconds.
    pub time: f32,
    /// Centre position.
    pub position: Vec3,
    /// Roll/pitch/yaw in radians.
    pub rotation: Vec3,
    /// Linear velocity.
    pub velocity: Vec3,
    /// Angular velocity.
    pub angular_velocity: Vec3,
}

/// Dense, append-only list of [`Record`]s; entry `i` is the state at `i·DT`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeKeeper {
    records: Vec<Record>,
}

impl TimeKeeper {
    /// Empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot. Callers append in step order so that the entry
    /// index matches `round(time / DT)`.
    pub fn record(&mut self, record: Record) {
        if Self::index_of(record.time) != Some(self.records.len()) {
            tracing::warn!(
                time = record.time,
                len = self.records.len(),
                "record appended out of step order"
            );
        }
        self.records.push(record);
    }

    /// Snapshot at `t`, rounded to the nearest step. `None` for negative
    /// times and times past the last recorded step.
    #[must_use]
    pub fn retrieve(&self, t: f32) -> Option<&Record> {
        self.records.get(Self::index_of(t)?)
    }

    /// Drops the whole history and restarts it from `initial`.
    pub fn wipe(&mut self, initial: Record) {
        self.records.clear();
        self.records.push(initial);
    }

    /// Number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` before the first record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent snapshot.
    #[must_use]
    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    /// All snapshots in time order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.iter()
    }

    fn index_of(t: f32) -> Option<usize> {
        if !t.is_finite() || t < 0.0 {
            return None;
        }
        Some((t / DT).round() as usize)
    }
}
