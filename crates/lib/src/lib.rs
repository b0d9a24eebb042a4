//! buildhook-lib: per-module build customization hooks
//!
//! A module may ship a hook that inspects its build context and contributes
//! extra CMake arguments and build targets. This crate provides:
//! - `BuildContext` / `HookOutput`: the read-only input and append-only output
//! - `BuildHook`: the hook capability, implemented by closures and `LuaHook`
//! - `HookRegistry`: hooks keyed by module name, with script discovery
//! - `invoke` / `invoke_all`: running hooks and surfacing their failures

pub mod consts;
pub mod context;
pub mod error;
pub mod hook;
pub mod invoke;
pub mod lua;
pub mod paths;
pub mod registry;

pub use context::{BuildContext, ContextError, HookOutput};
pub use error::{HookError, LoadError, display_chain};
pub use hook::{BoxError, BuildHook};
pub use invoke::{BatchReport, FailurePolicy, ModuleBuild, invoke, invoke_all, invoke_all_with, invoke_module};
pub use lua::LuaHook;
pub use registry::{HookRegistry, RegistryError};
