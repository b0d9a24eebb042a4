//! Registry discovery and batch invocation over a modules root.

use buildhook_lib::registry::discover_scripts;
use buildhook_lib::{FailurePolicy, HookRegistry, ModuleBuild, RegistryError, invoke_all};

use super::common::ModulesRoot;

#[test]
fn discovers_only_modules_with_scripts() {
  let root = ModulesRoot::new();
  root.add_module("zlib", "");
  root.add_module("png", "");
  std::fs::create_dir_all(root.path().join("docs")).unwrap();

  let scripts = discover_scripts(root.path()).unwrap();
  let modules: Vec<_> = scripts.iter().map(|s| s.module.as_str()).collect();
  assert_eq!(modules, ["png", "zlib"]);
  assert!(scripts.iter().all(|s| s.path.ends_with("build_scripts/setup.lua")));
}

#[test]
fn syntax_error_fails_discovery_with_module_name() {
  let root = ModulesRoot::new();
  root.add_module("zlib", "");
  root.add_module("png", "cmake_args += {'-DPNG=ON'}");

  let err = HookRegistry::discover(root.path()).unwrap_err();
  assert!(matches!(err, RegistryError::Load { ref module, .. } if module == "png"));
  assert!(err.to_string().contains("png"));
}

#[test]
fn batch_runs_every_module() {
  let root = ModulesRoot::new();
  root.add_module("zlib", r#"table.insert(additional_build_targets, "zlib")"#);
  root.add_module("png", r#"cmake_define("PNG_SHARED", false)"#);

  let registry = HookRegistry::discover(root.path()).unwrap();
  let builds: Vec<_> = ["zlib", "png"]
    .into_iter()
    .map(|module| ModuleBuild {
      module: module.to_string(),
      context: root.context(module),
    })
    .collect();

  let report = invoke_all(&registry, &builds, FailurePolicy::Abort).unwrap();
  assert!(report.is_success());
  assert_eq!(report.output("zlib").unwrap().additional_build_targets(), ["zlib"]);
  assert_eq!(report.output("png").unwrap().cmake_args(), ["-DPNG_SHARED=OFF"]);
}

#[test]
fn batch_skip_policy_records_failures() {
  let root = ModulesRoot::new();
  root.add_module("zlib", r#"error("no zlib for you")"#);
  root.add_module("png", r#"table.insert(additional_build_targets, "png")"#);

  let registry = HookRegistry::discover(root.path()).unwrap();
  let builds: Vec<_> = ["zlib", "png"]
    .into_iter()
    .map(|module| ModuleBuild {
      module: module.to_string(),
      context: root.context(module),
    })
    .collect();

  let report = invoke_all(&registry, &builds, FailurePolicy::Skip).unwrap();
  assert_eq!(report.outputs.len(), 1);
  assert_eq!(report.failures.len(), 1);
  assert_eq!(report.failures[0].module(), "zlib");
  assert!(report.failures[0].is_runtime());

  let err = invoke_all(&registry, &builds, FailurePolicy::Abort).unwrap_err();
  assert_eq!(err.module(), "zlib");
}
