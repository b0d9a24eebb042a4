//! The build hook capability.
//!
//! A [`BuildHook`] inspects a [`BuildContext`] and appends to a [`HookOutput`].
//! Script hooks ([`crate::lua::LuaHook`]) and native Rust hooks implement the
//! same trait, so the invoker and registry never care which kind they hold.
//!
//! Plain closures are hooks too:
//!
//! ```
//! use buildhook_lib::context::{BuildContext, HookOutput};
//! use buildhook_lib::hook::{BoxError, BuildHook};
//!
//! let hook = |ctx: &BuildContext, out: &mut HookOutput| -> Result<(), BoxError> {
//!   if ctx.build_config == "Debug" {
//!     out.push_cmake_arg("-DENABLE_ASSERTS=ON");
//!   }
//!   Ok(())
//! };
//! # let _: &dyn BuildHook = &hook;
//! ```

use crate::context::{BuildContext, HookOutput};

/// Error type hooks return from [`BuildHook::extend`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A build-customization hook for one module.
pub trait BuildHook: Send + Sync {
  /// Inspect `ctx` and append zero or more entries to `output`.
  fn extend(&self, ctx: &BuildContext, output: &mut HookOutput) -> Result<(), BoxError>;
}

impl<F> BuildHook for F
where
  F: Fn(&BuildContext, &mut HookOutput) -> Result<(), BoxError> + Send + Sync,
{
  fn extend(&self, ctx: &BuildContext, output: &mut HookOutput) -> Result<(), BoxError> {
    self(ctx, output)
  }
}
