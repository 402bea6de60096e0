// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
//! End-to-end tests for the `psim` binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn psim(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("psim").unwrap();
    cmd.arg("--config-dir").arg(config);
    cmd
}

/// Writes the demo scene and returns its path.
fn demo_scene(dir: &TempDir) -> PathBuf {
    let out = dir.path().join("demo.psim");
    psim(&dir.path().join("cfg"))
        .args(["demo", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote"));
    out
}

#[test]
fn demo_writes_a_scene_file() {
    let dir = TempDir::new().unwrap();
    let scene = demo_scene(&dir);
    let text = std::fs::read_to_string(scene).unwrap();
    assert!(text.starts_with("OBJECT KINEMATIC"));
    assert!(text.contains("NAME Crate"));
    assert!(!text.contains("FLOOR"));
}

#[test]
fn run_prints_final_frame() {
    let dir = TempDir::new().unwrap();
    let scene = demo_scene(&dir);
    psim(&dir.path().join("cfg"))
        .arg("run")
        .arg(&scene)
        .args(["--until", "0.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("t = 0.500"))
        .stdout(predicate::str::contains("Crate"))
        .stdout(predicate::str::contains("FLOOR"));
}

#[test]
fn run_json_lists_bodies() {
    let dir = TempDir::new().unwrap();
    let scene = demo_scene(&dir);
    psim(&dir.path().join("cfg"))
        .arg("run")
        .arg(&scene)
        .args(["--until", "0.1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bodies\""))
        .stdout(predicate::str::contains("\"Ball\""));
}

#[test]
fn run_without_scene_fails_on_fresh_config() {
    let dir = TempDir::new().unwrap();
    psim(&dir.path().join("cfg"))
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no scene"));
}

#[test]
fn run_remembers_last_scene() {
    let dir = TempDir::new().unwrap();
    let scene = demo_scene(&dir);
    let cfg = dir.path().join("cfg");
    psim(&cfg).arg("run").arg(&scene).args(["--until", "0.01"]).assert().success();
    psim(&cfg)
        .args(["run", "--until", "0.02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("t = 0.020"));
}

#[test]
fn negative_until_is_rejected() {
    let dir = TempDir::new().unwrap();
    let scene = demo_scene(&dir);
    psim(&dir.path().join("cfg"))
        .arg("run")
        .arg(&scene)
        .arg("--until=-1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--until"));
}

#[test]
fn infinite_until_is_rejected() {
    let dir = TempDir::new().unwrap();
    let scene = demo_scene(&dir);
    for extra in [&["run"][..], &["scrub", "--back-to", "0"][..]] {
        psim(&dir.path().join("cfg"))
            .args(extra)
            .arg(&scene)
            .args(["--until", "inf"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("finite"));
    }
}

#[test]
fn scrub_reports_both_frames_and_frontier() {
    let dir = TempDir::new().unwrap();
    let scene = demo_scene(&dir);
    psim(&dir.path().join("cfg"))
        .arg("scrub")
        .arg(&scene)
        .args(["--until", "0.3", "--back-to", "0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("t = 0.300"))
        .stdout(predicate::str::contains("t = 0.100"))
        .stdout(predicate::str::contains("frontier 0.300"));
}

#[test]
fn roundtrip_is_stable_for_demo() {
    let dir = TempDir::new().unwrap();
    let scene = demo_scene(&dir);
    let original = std::fs::read_to_string(&scene).unwrap();
    psim(&dir.path().join("cfg"))
        .arg("roundtrip")
        .arg(&scene)
        .assert()
        .success()
        .stdout(original);
}

#[test]
fn malformed_scene_reports_line() {
    let dir = TempDir::new().unwrap();
    let scene = dir.path().join("bad.psim");
    std::fs::write(&scene, "OBJECT KINEMATIC\nSHAPE Blob\nENDOBJECT\n").unwrap();
    psim(&dir.path().join("cfg"))
        .arg("roundtrip")
        .arg(&scene)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}
