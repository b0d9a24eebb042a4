//! `buildhook list` and `buildhook check` integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn list_shows_modules_with_hooks() {
  let env = TestEnv::new();
  env.add_module("zlib", "empty.lua");
  env.add_module("png", "testing_off.lua");
  std::fs::create_dir_all(env.modules_path().join("no_hook")).unwrap();

  env
    .buildhook_cmd()
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("2 module hook(s)"))
    .stdout(predicate::str::contains("png"))
    .stdout(predicate::str::contains("zlib"))
    .stdout(predicate::str::contains("no_hook").not());
}

#[test]
fn list_json_is_sorted() {
  let env = TestEnv::new();
  env.add_module("zlib", "empty.lua");
  env.add_module("png", "empty.lua");

  let output = env.buildhook_cmd().args(["list", "--format", "json"]).output().unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let modules: Vec<_> = json
    .as_array()
    .unwrap()
    .iter()
    .map(|e| e["module"].as_str().unwrap().to_string())
    .collect();
  assert_eq!(modules, ["png", "zlib"]);
}

#[test]
fn modules_dir_flag_overrides_env() {
  let env = TestEnv::new();
  let other = env.temp.path().join("other");
  let script_dir = other.join("assimp").join("build_scripts");
  std::fs::create_dir_all(&script_dir).unwrap();
  std::fs::write(script_dir.join("setup.lua"), "").unwrap();

  env
    .buildhook_cmd()
    .arg("list")
    .arg("--modules-dir")
    .arg(&other)
    .assert()
    .success()
    .stdout(predicate::str::contains("assimp"));
}

#[test]
fn check_passes_for_valid_scripts() {
  let env = TestEnv::new();
  env.add_module("zlib", "empty.lua");
  env.add_module("png", "raises.lua");

  env
    .buildhook_cmd()
    .arg("check")
    .assert()
    .success()
    .stdout(predicate::str::contains("2 hook script(s) OK"));
}

#[test]
fn check_fails_on_syntax_error() {
  let env = TestEnv::new();
  env.add_module("zlib", "empty.lua");
  env.add_module("png", "syntax_error.lua");

  env
    .buildhook_cmd()
    .arg("check")
    .assert()
    .failure()
    .stderr(predicate::str::contains("png: cannot parse hook script: syntax error"))
    .stderr(predicate::str::contains("1 of 2 hook script(s) failed to load"));
}
