// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Terminal renderer: a `ScenePort` that turns frames into tables or JSON.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use psim_scene_port::{BodyView, ForceView, ScenePort, ShapeTag};
use serde::Serialize;

/// Collects one frame and prints it.
#[derive(Debug, Default)]
pub struct ReportAdapter {
    frame: FrameReport,
}

/// One presented frame.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FrameReport {
    /// Simulation time of the frame.
    pub time: f32,
    /// Bodies in world order.
    pub bodies: Vec<BodyRow>,
}

/// One body line of a frame.
#[derive(Debug, Clone, Serialize)]
pub struct BodyRow {
    /// Display name.
    pub name: String,
    /// `cuboid` or `sphere`.
    pub shape: &'static str,
    /// Centre position.
    pub position: [f32; 3],
    /// Roll/pitch/yaw.
    pub rotation: [f32; 3],
    /// Ids of the forces active on the body.
    pub forces: Vec<String>,
    #[serde(skip)]
    key: u32,
}

impl ReportAdapter {
    /// An adapter with an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last presented frame.
    pub fn frame(&self) -> &FrameReport {
        &self.frame
    }
}

impl ScenePort for ReportAdapter {
    fn begin_frame(&mut self, time: f32) {
        self.frame = FrameReport {
            time,
            bodies: Vec::new(),
        };
    }

    fn draw_body(&mut self, body: &BodyView) {
        self.frame.bodies.push(BodyRow {
            name: body.name.clone(),
            shape: match body.shape {
                ShapeTag::Cuboid => "cuboid",
                ShapeTag::Sphere => "sphere",
            },
            position: body.position,
            rotation: body.rotation,
            forces: Vec::new(),
            key: body.key,
        });
    }

    fn draw_force(&mut self, force: &ForceView) {
        if let Some(row) = self.frame.bodies.iter_mut().find(|r| r.key == force.body) {
            row.forces.push(force.id.clone());
        }
    }

    fn end_frame(&mut self) {}
}

impl FrameReport {
    /// Human-readable table.
    pub fn to_table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["body", "shape", "position", "rotation", "active forces"]);
        for row in &self.bodies {
            table.add_row(vec![
                row.name.clone(),
                row.shape.to_owned(),
                triple(row.position),
                triple(row.rotation),
                row.forces.len().to_string(),
            ]);
        }
        format!("t = {:.3}\n{table}", self.time)
    }
}

fn triple([x, y, z]: [f32; 3]) -> String {
    format!("{x:.3}, {y:.3}, {z:.3}")
}
