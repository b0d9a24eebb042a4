//! Lua script hooks.
//!
//! A module's hook script is plain Lua 5.4. Each invocation gets its own VM
//! with the build context exposed as globals, and reads back what the script
//! appended to `cmake_args` and `additional_build_targets`.
//!
//! # Submodules
//!
//! - [`globals`] - Context globals, output arrays and helper functions
//! - [`runtime`] - Per-invocation Lua VM setup
//! - [`script`] - [`LuaHook`], the loaded form of a script file

pub mod globals;
pub mod runtime;
pub mod script;

pub use script::LuaHook;
