//! Hook input and output records.
//!
//! A [`BuildContext`] describes the module build a hook runs for. It is built
//! once by the caller and only ever lent to hooks by shared reference.
//!
//! A [`HookOutput`] collects what hooks contribute: extra CMake arguments and
//! extra build targets. It only supports appending, so entries pushed by an
//! earlier hook can never be removed or reordered by a later one.

use serde::{Deserialize, Serialize};

/// Errors reported by [`BuildContext::validate`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContextError {
  #[error("build context field '{0}' must not be empty")]
  EmptyField(&'static str),
}

/// Read-only description of a single module build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildContext {
  /// Selected build-tool generator (e.g. "Ninja").
  pub generator: String,
  /// Build configuration (e.g. "RelWithDebInfo").
  pub build_config: String,
  /// Where the module's sources come from. Empty for local-only modules.
  #[serde(default)]
  pub module_url: String,
  pub module_dir: String,
  pub root: String,
  pub build_dir: String,
  pub deps_dir: String,
  pub install_dir: String,
}

impl BuildContext {
  /// Field names and values, in declaration order.
  pub fn fields(&self) -> [(&'static str, &str); 8] {
    [
      ("generator", self.generator.as_str()),
      ("build_config", self.build_config.as_str()),
      ("module_url", self.module_url.as_str()),
      ("module_dir", self.module_dir.as_str()),
      ("root", self.root.as_str()),
      ("build_dir", self.build_dir.as_str()),
      ("deps_dir", self.deps_dir.as_str()),
      ("install_dir", self.install_dir.as_str()),
    ]
  }

  /// Value of the field called `name`, if there is one.
  pub fn field(&self, name: &str) -> Option<&str> {
    self
      .fields()
      .into_iter()
      .find(|(field, _)| *field == name)
      .map(|(_, value)| value)
  }

  /// Check that every field except `module_url` is non-empty.
  ///
  /// Paths are not checked for existence.
  pub fn validate(&self) -> Result<(), ContextError> {
    for (name, value) in self.fields() {
      if name != "module_url" && value.is_empty() {
        return Err(ContextError::EmptyField(name));
      }
    }
    Ok(())
  }
}

/// Append-only collection of hook contributions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookOutput {
  cmake_args: Vec<String>,
  additional_build_targets: Vec<String>,
}

impl HookOutput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push_cmake_arg(&mut self, arg: impl Into<String>) {
    self.cmake_args.push(arg.into());
  }

  pub fn push_build_target(&mut self, target: impl Into<String>) {
    self.additional_build_targets.push(target.into());
  }

  pub fn extend_cmake_args<I, S>(&mut self, args: I)
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.cmake_args.extend(args.into_iter().map(Into::into));
  }

  pub fn extend_build_targets<I, S>(&mut self, targets: I)
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self
      .additional_build_targets
      .extend(targets.into_iter().map(Into::into));
  }

  pub fn cmake_args(&self) -> &[String] {
    &self.cmake_args
  }

  pub fn additional_build_targets(&self) -> &[String] {
    &self.additional_build_targets
  }

  pub fn is_empty(&self) -> bool {
    self.cmake_args.is_empty() && self.additional_build_targets.is_empty()
  }

  /// Split into `(cmake_args, additional_build_targets)`.
  pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
    (self.cmake_args, self.additional_build_targets)
  }
}
