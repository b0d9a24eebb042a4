//! `buildhook run` integration tests.

use predicates::prelude::*;

use super::common::{TestEnv, fixture_path};

#[test]
fn run_module_prints_appended_entries() {
  let env = TestEnv::new();
  env.add_module("mod", "testing_off.lua");

  env
    .buildhook_cmd()
    .arg("run")
    .arg("mod")
    .args(env.context_flags())
    .assert()
    .success()
    .stdout(predicate::str::contains("-DBUILD_TESTING=OFF"))
    .stdout(predicate::str::contains("zlib"));
}

#[test]
fn run_json_output_matches_hook_output() {
  let env = TestEnv::new();
  env.add_module("mod", "testing_off.lua");

  let output = env
    .buildhook_cmd()
    .args(["run", "mod", "--format", "json"])
    .args(env.context_flags())
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["cmake_args"], serde_json::json!(["-DBUILD_TESTING=OFF"]));
  assert_eq!(json["additional_build_targets"], serde_json::json!(["zlib"]));
}

#[test]
fn run_empty_hook_outputs_empty_lists() {
  let env = TestEnv::new();
  env.add_module("mod", "empty.lua");

  let output = env
    .buildhook_cmd()
    .args(["run", "mod", "--format", "json"])
    .args(env.context_flags())
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["cmake_args"], serde_json::json!([]));
  assert_eq!(json["additional_build_targets"], serde_json::json!([]));
}

#[test]
fn run_defaults_module_dir_from_modules_root() {
  let env = TestEnv::new();
  env.add_module("pr_bh", "context_echo.lua");

  env
    .buildhook_cmd()
    .args(["run", "pr_bh"])
    .args(env.context_flags())
    .assert()
    .success()
    .stdout(predicate::str::contains("-DGENERATOR=Ninja"))
    .stdout(predicate::str::contains("-DCONFIG=RelWithDebInfo"))
    .stdout(predicate::str::contains("-DMODULE_DIR="))
    .stdout(predicate::str::contains("pr_bh"));
}

#[test]
fn run_reads_context_file() {
  let env = TestEnv::new();
  env.add_module("pr_bh", "context_echo.lua");
  let ctx_path = env.write_file("ctx.json", &env.context_json("pr_bh").to_string());

  env
    .buildhook_cmd()
    .args(["run", "pr_bh", "--build-config", "Debug", "--context"])
    .arg(&ctx_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("-DCONFIG=Debug"));
}

#[test]
fn run_script_by_path() {
  let env = TestEnv::new();

  env
    .buildhook_cmd()
    .arg("run")
    .arg("--script")
    .arg(fixture_path("testing_off.lua"))
    .arg("--module-dir")
    .arg("/src/mod")
    .args(env.context_flags())
    .assert()
    .success()
    .stdout(predicate::str::contains("-DBUILD_TESTING=OFF"));
}

#[test]
fn run_missing_context_fields_fails() {
  let env = TestEnv::new();
  env.add_module("mod", "empty.lua");

  env
    .buildhook_cmd()
    .args(["run", "mod", "--generator", "Ninja"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid build context"));
}

#[test]
fn run_raising_hook_fails_with_message() {
  let env = TestEnv::new();
  env.add_module("mod", "raises.lua");

  env
    .buildhook_cmd()
    .args(["run", "mod"])
    .args(env.context_flags())
    .assert()
    .failure()
    .stderr(predicate::str::contains("hook for module 'mod' failed"))
    .stderr(predicate::str::contains("unsupported generator: Ninja"));
}

#[test]
fn run_syntax_error_is_load_failure() {
  let env = TestEnv::new();
  env.add_module("mod", "syntax_error.lua");

  env
    .buildhook_cmd()
    .args(["run", "mod"])
    .args(env.context_flags())
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to load hook for module 'mod'"));
}

#[test]
fn run_unknown_module_is_load_failure() {
  let env = TestEnv::new();

  env
    .buildhook_cmd()
    .args(["run", "ghost"])
    .args(env.context_flags())
    .assert()
    .failure()
    .stderr(predicate::str::contains("hook script not found"));
}

#[test]
fn script_print_goes_to_stderr() {
  let env = TestEnv::new();
  env.add_module("mod", "prints.lua");

  let output = env
    .buildhook_cmd()
    .args(["run", "mod", "--format", "json"])
    .args(env.context_flags())
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["additional_build_targets"], serde_json::json!(["printed"]));
  assert!(String::from_utf8_lossy(&output.stderr).contains("configuring for"));
}
