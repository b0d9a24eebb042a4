pub const APP_NAME: &str = "buildhook";

/// Directory inside a module that holds its hook script.
pub const HOOK_SCRIPT_DIR: &str = "build_scripts";

/// File name of a module's hook script.
pub const HOOK_SCRIPT_FILE: &str = "setup.lua";

/// Environment variable overriding the default modules root.
pub const MODULES_DIR_ENV: &str = "BUILDHOOK_MODULES_DIR";

/// Modules root used when neither a flag nor the environment names one.
pub const DEFAULT_MODULES_DIR: &str = "modules";

/// Log target for output produced by hook scripts via `print`.
pub const SCRIPT_LOG_TARGET: &str = "buildhook::script";
