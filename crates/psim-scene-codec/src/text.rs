// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The `.psim` text format.
//!
//! A scene is a sequence of body blocks:
//!
//! ```text
//! OBJECT KINEMATIC
//! NAME Cube 1
//! COL 0.85 0.35 0.3
//! SHAPE Cuboid
//! DIMS 1 1 1
//! POS 0 3 0
//! ROT 0 0 0
//! VEL 0 0 0
//! AVEL 0 0 0
//! MASS 1
//! EVENT FORCE
//! ID push
//! START 0
//! FTYPE Constant
//! END 1
//! DIR 5 0 0
//! FROM 0 3 0
//! ENDEVENT
//! ENDOBJECT
//! ```
//!
//! Tokens are whitespace separated; `NAME` and `ID` take the rest of the
//! line. Sphere `DIMS` carry the radius, once or repeated three times.
//! Unrecognised lines are ignored. Bodies are written in their `t = 0` state;
//! the static floor and weight forces are implicit and never written.

use std::fmt::Write as _;

use psim_core::{Body, BodyError, BodyKind, Event, Force, ForceKind, Vec3, World};
use thiserror::Error;
use tracing::{debug, info};

/// Structured failure for a whole scene load. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// A numeric field did not parse.
    #[error("line {line}: invalid number {token:?}")]
    InvalidNumber {
        /// Line number.
        line: usize,
        /// Offending token.
        token: String,
    },
    /// A key carried too few values.
    #[error("line {line}: {key} expects {expected} value(s)")]
    MissingValue {
        /// Line number.
        line: usize,
        /// Key whose values were short.
        key: String,
        /// Number of values required.
        expected: usize,
    },
    /// `SHAPE` named something other than `Cuboid` or `Sphere`.
    #[error("line {line}: unknown shape {shape:?}")]
    UnknownShape {
        /// Line number.
        line: usize,
        /// Value found.
        shape: String,
    },
    /// `FTYPE` named something other than `Constant` or `Impulse`.
    #[error("line {line}: unknown force type {kind:?}")]
    UnknownForceType {
        /// Line number.
        line: usize,
        /// Value found.
        kind: String,
    },
    /// A block was opened and never closed.
    #[error("line {line}: {block} block is never closed")]
    UnterminatedBlock {
        /// Line that opened the block.
        line: usize,
        /// `OBJECT` or `EVENT`.
        block: &'static str,
    },
    /// The body described by a block is invalid (bad dimensions or mass).
    #[error("line {line}: {source}")]
    InvalidBody {
        /// Line of the offending field.
        line: usize,
        /// Underlying body error.
        #[source]
        source: BodyError,
    },
}

/// Serialises every non-static body of `world` in world order.
pub fn encode_world(world: &World) -> String {
    world
        .bodies()
        .filter(|b| !b.is_static())
        .map(encode_body)
        .collect()
}

/// Serialises one body in its `t = 0` state.
pub fn encode_body(body: &Body) -> String {
    let (position, rotation, velocity, angular_velocity) = match body.record_at(0.0) {
        Some(r) => (r.position, r.rotation, r.velocity, r.angular_velocity),
        None => (
            body.position(),
            body.rotation(),
            body.velocity(),
            body.angular_velocity(),
        ),
    };

    let mut out = String::new();
    let [r, g, b] = body.colour();
    let dims = body.dimensions();
    let _ = writeln!(out, "OBJECT KINEMATIC");
    let _ = writeln!(out, "NAME {}", body.name());
    let _ = writeln!(out, "COL {r} {g} {b}");
    if body.is_sphere() {
        let _ = writeln!(out, "SHAPE Sphere");
        let _ = writeln!(out, "DIMS {}", dims.x());
    } else {
        let _ = writeln!(out, "SHAPE Cuboid");
        let _ = writeln!(out, "DIMS {}", vector(dims));
    }
    let _ = writeln!(out, "POS {}", vector(position));
    let _ = writeln!(out, "ROT {}", vector(rotation));
    let _ = writeln!(out, "VEL {}", vector(velocity));
    let _ = writeln!(out, "AVEL {}", vector(angular_velocity));
    let _ = writeln!(out, "MASS {}", body.mass());
    for force in body.events().iter().filter_map(Event::as_force) {
        let kind = force.kind();
        if !matches!(kind, ForceKind::Constant | ForceKind::Impulse) {
            continue;
        }
        let _ = writeln!(out, "EVENT FORCE");
        let _ = writeln!(out, "ID {}", force.id());
        let _ = writeln!(out, "START {}", force.start());
        let _ = writeln!(out, "FTYPE {}", kind.name());
        if kind == ForceKind::Constant {
            let _ = writeln!(out, "END {}", force.end());
        }
        let _ = writeln!(out, "DIR {}", vector(force.direction()));
        // Anchors follow the body, so write them at the t = 0 pose.
        let anchor = body.anchor_at_pose(force, position, rotation);
        let _ = writeln!(out, "FROM {}", vector(anchor));
        let _ = writeln!(out, "ENDEVENT");
    }
    let _ = writeln!(out, "ENDOBJECT");
    out
}

fn vector(v: Vec3) -> String {
    format!("{} {} {}", v.x(), v.y(), v.z())
}

/// Parses a scene into a fresh world (floor first, then each body in file
/// order) at `t = 0`.
pub fn decode_world(text: &str) -> Result<World, DecodeError> {
    let mut world = World::with_floor();
    let mut object: Option<BodyDraft> = None;
    let mut event: Option<ForceDraft> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let mut tokens = raw.split_whitespace();
        let Some(key) = tokens.next() else {
            continue;
        };
        let values: Vec<&str> = tokens.collect();

        if let Some(draft) = event.as_mut() {
            match key {
                "ENDEVENT" => {
                    if let (Some(done), Some(body)) = (event.take(), object.as_mut()) {
                        body.forces.push(done.build());
                    }
                }
                "ID" => draft.id = rest_of_line(raw, key),
                "START" => draft.start = scalar(line, key, &values)?,
                "END" => draft.end = Some(scalar(line, key, &values)?),
                "FTYPE" => draft.kind = force_kind(line, &values)?,
                "DIR" => draft.direction = vector3(line, key, &values)?,
                "FROM" => draft.anchor = vector3(line, key, &values)?,
                "ENDOBJECT" | "OBJECT" | "EVENT" => {
                    return Err(DecodeError::UnterminatedBlock {
                        line: draft.line,
                        block: "EVENT",
                    })
                }
                _ => debug!(line, key, "ignoring unrecognised event line"),
            }
            continue;
        }

        if let Some(draft) = object.as_mut() {
            match key {
                "ENDOBJECT" => {
                    if let Some(done) = object.take() {
                        done.spawn_into(&mut world)?;
                    }
                }
                "EVENT" if values.first() == Some(&"FORCE") => {
                    event = Some(ForceDraft::new(line));
                }
                "NAME" => draft.name = Some(rest_of_line(raw, key)),
                "COL" => draft.colour = Some(vector3(line, key, &values)?.to_array()),
                "SHAPE" => draft.sphere = shape(line, &values)?,
                "DIMS" => {
                    draft.dimensions = Some((line, dimensions(line, &values)?));
                }
                "POS" => draft.position = vector3(line, key, &values)?,
                "ROT" => draft.rotation = vector3(line, key, &values)?,
                "VEL" => draft.velocity = vector3(line, key, &values)?,
                "AVEL" => draft.angular_velocity = vector3(line, key, &values)?,
                "MASS" => draft.mass = Some((line, scalar(line, key, &values)?)),
                "OBJECT" => {
                    return Err(DecodeError::UnterminatedBlock {
                        line: draft.line,
                        block: "OBJECT",
                    })
                }
                _ => debug!(line, key, "ignoring unrecognised object line"),
            }
            continue;
        }

        if key == "OBJECT" {
            object = Some(BodyDraft::new(line));
        } else {
            debug!(line, key, "ignoring line outside any block");
        }
    }

    if let Some(draft) = event {
        return Err(DecodeError::UnterminatedBlock {
            line: draft.line,
            block: "EVENT",
        });
    }
    if let Some(draft) = object {
        return Err(DecodeError::UnterminatedBlock {
            line: draft.line,
            block: "OBJECT",
        });
    }
    info!(bodies = world.len(), "scene decoded");
    Ok(world)
}

struct BodyDraft {
    line: usize,
    name: Option<String>,
    colour: Option<[f32; 3]>,
    sphere: bool,
    dimensions: Option<(usize, Vec3)>,
    position: Vec3,
    rotation: Vec3,
    velocity: Vec3,
    angular_velocity: Vec3,
    mass: Option<(usize, f32)>,
    forces: Vec<Force>,
}

impl BodyDraft {
    fn new(line: usize) -> Self {
        Self {
            line,
            name: None,
            colour: None,
            sphere: false,
            dimensions: None,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass: None,
            forces: Vec::new(),
        }
    }

    fn spawn_into(self, world: &mut World) -> Result<(), DecodeError> {
        let kind = if self.sphere {
            BodyKind::Sphere
        } else {
            BodyKind::Cube
        };
        let id = world.spawn(kind);
        let outcome = world.edit(id, move |body| {
            if let Some(name) = self.name {
                body.set_name(name);
            }
            if let Some(colour) = self.colour {
                body.set_colour(colour);
            }
            let (dims_line, dimensions) = self
                .dimensions
                .unwrap_or((self.line, body.dimensions()));
            body.set_transform(self.position, self.rotation, dimensions)
                .map_err(|source| DecodeError::InvalidBody {
                    line: dims_line,
                    source,
                })?;
            body.set_velocity(self.velocity);
            body.set_angular_velocity(self.angular_velocity);
            if let Some((mass_line, mass)) = self.mass {
                body.set_mass(mass).map_err(|source| DecodeError::InvalidBody {
                    line: mass_line,
                    source,
                })?;
            }
            for force in self.forces {
                body.add_event(force);
            }
            Ok(())
        });
        match outcome {
            Ok(result) => result,
            Err(e) => {
                debug!(error = %e, "freshly spawned body vanished");
                Ok(())
            }
        }
    }
}

struct ForceDraft {
    line: usize,
    id: String,
    start: f32,
    end: Option<f32>,
    kind: ForceKind,
    direction: Vec3,
    anchor: Vec3,
}

impl ForceDraft {
    fn new(line: usize) -> Self {
        Self {
            line,
            id: String::new(),
            start: 0.0,
            end: None,
            kind: ForceKind::Constant,
            direction: Vec3::ZERO,
            anchor: Vec3::ZERO,
        }
    }

    fn build(self) -> Force {
        let mut force = Force::new(self.kind, self.direction)
            .with_id(self.id)
            .with_anchor(self.anchor)
            .starting_at(self.start);
        if let Some(end) = self.end {
            force.set_end(end);
        }
        force
    }
}

fn rest_of_line(raw: &str, key: &str) -> String {
    raw.trim_start()
        .strip_prefix(key)
        .unwrap_or_default()
        .trim()
        .to_owned()
}

fn number(line: usize, token: &str) -> Result<f32, DecodeError> {
    token.parse().map_err(|_| DecodeError::InvalidNumber {
        line,
        token: token.to_owned(),
    })
}

fn scalar(line: usize, key: &str, values: &[&str]) -> Result<f32, DecodeError> {
    match values.first() {
        Some(token) => number(line, token),
        None => Err(DecodeError::MissingValue {
            line,
            key: key.to_owned(),
            expected: 1,
        }),
    }
}

fn vector3(line: usize, key: &str, values: &[&str]) -> Result<Vec3, DecodeError> {
    match values {
        [x, y, z, ..] => Ok(Vec3::new(
            number(line, x)?,
            number(line, y)?,
            number(line, z)?,
        )),
        _ => Err(DecodeError::MissingValue {
            line,
            key: key.to_owned(),
            expected: 3,
        }),
    }
}

fn dimensions(line: usize, values: &[&str]) -> Result<Vec3, DecodeError> {
    match values {
        [single] => Ok(Vec3::splat(number(line, single)?)),
        _ => vector3(line, "DIMS", values),
    }
}

fn shape(line: usize, values: &[&str]) -> Result<bool, DecodeError> {
    match values.first().copied() {
        Some("Sphere") => Ok(true),
        Some("Cuboid") => Ok(false),
        other => Err(DecodeError::UnknownShape {
            line,
            shape: other.unwrap_or_default().to_owned(),
        }),
    }
}

fn force_kind(line: usize, values: &[&str]) -> Result<ForceKind, DecodeError> {
    match values.first().copied() {
        Some("Constant") => Ok(ForceKind::Constant),
        Some("Impulse") => Ok(ForceKind::Impulse),
        other => Err(DecodeError::UnknownForceType {
            line,
            kind: other.unwrap_or_default().to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_of_line_keeps_inner_spaces() {
        assert_eq!(rest_of_line("NAME Big  Red Cube ", "NAME"), "Big  Red Cube");
        assert_eq!(rest_of_line("NAME", "NAME"), "");
    }

    #[test]
    fn dims_accept_one_or_three_values() {
        assert_eq!(dimensions(1, &["0.75"]), Ok(Vec3::splat(0.75)));
        assert_eq!(dimensions(1, &["1", "2", "3"]), Ok(Vec3::new(1.0, 2.0, 3.0)));
        assert!(matches!(
            dimensions(4, &["1", "2"]),
            Err(DecodeError::MissingValue { line: 4, expected: 3, .. })
        ));
    }

    #[test]
    fn numbers_accept_c_style_exponents() {
        assert_eq!(number(1, "5.97e+24"), Ok(5.97e24));
        assert_eq!(number(1, "1.000000"), Ok(1.0));
    }
}
