//! Globals visible to hook scripts.
//!
//! - `generator`, `build_config`, `module_url`, `module_dir`, `root`,
//!   `build_dir`, `deps_dir`, `install_dir` - the build context as strings
//! - `moduleUrl`, `moduleDir` - aliases kept for scripts written against the
//!   older camelCase names
//! - `ctx` - read-only userdata exposing the same fields
//! - `cmake_args` - array of extra CMake arguments, starts empty
//! - `additional_build_targets` - array of extra build targets, starts empty
//! - `cmake_define(name, value)` - append `-D<name>=<value>` to `cmake_args`

use mlua::prelude::*;

use crate::context::{BuildContext, HookOutput};

pub const CTX_GLOBAL: &str = "ctx";
pub const CMAKE_ARGS_GLOBAL: &str = "cmake_args";
pub const BUILD_TARGETS_GLOBAL: &str = "additional_build_targets";

const CAMEL_CASE_ALIASES: [(&str, &str); 2] = [("moduleUrl", "module_url"), ("moduleDir", "module_dir")];

/// Register context globals, output arrays and helpers on the Lua globals.
pub fn register_globals(lua: &Lua, ctx: &BuildContext) -> LuaResult<()> {
  let globals = lua.globals();

  for (name, value) in ctx.fields() {
    globals.set(name, value)?;
  }
  for (alias, name) in CAMEL_CASE_ALIASES {
    globals.set(alias, ctx.field(name))?;
  }
  globals.set(CTX_GLOBAL, ContextProxy(ctx.clone()))?;

  globals.set(CMAKE_ARGS_GLOBAL, lua.create_table()?)?;
  globals.set(BUILD_TARGETS_GLOBAL, lua.create_table()?)?;

  let cmake_define = lua.create_function(|lua, (name, value): (String, LuaValue)| {
    if name.is_empty() {
      return Err(LuaError::external("cmake_define: name must not be empty"));
    }
    let rendered = render_define_value(lua, value)?;
    let args: LuaTable = lua.globals().get(CMAKE_ARGS_GLOBAL)?;
    args.push(format!("-D{}={}", name, rendered))
  })?;
  globals.set("cmake_define", cmake_define)?;

  Ok(())
}

/// The `ctx` global.
///
/// A userdata has no storage of its own, so neither assignment nor `rawset`
/// can change what scripts read back. Unknown fields read as `nil`.
struct ContextProxy(BuildContext);

impl LuaUserData for ContextProxy {
  fn add_methods<M: LuaUserDataMethods<Self>>(methods: &mut M) {
    methods.add_meta_method(LuaMetaMethod::Index, |_, this, key: LuaValue| {
      let field = match key {
        LuaValue::String(s) => this.0.field(&s.to_str()?).map(str::to_string),
        _ => None,
      };
      Ok(field)
    });

    methods.add_meta_method(LuaMetaMethod::NewIndex, |_, _, (key, _): (LuaValue, LuaValue)| -> LuaResult<()> {
      let key = match key {
        LuaValue::String(s) => s.to_str()?.to_string(),
        other => other.type_name().to_string(),
      };
      Err(LuaError::external(format!("build context is read-only (cannot assign ctx.{})", key)))
    });

    methods.add_meta_method(LuaMetaMethod::Pairs, |lua, this, ()| {
      let data = lua.create_table_from(this.0.fields())?;
      let next: LuaFunction = lua.globals().get("next")?;
      Ok((next, data, LuaValue::Nil))
    });

    methods.add_meta_method(LuaMetaMethod::ToString, |_, this, ()| {
      Ok(format!("ctx({} {})", this.0.generator, this.0.build_config))
    });
  }
}

/// Render a define value. Numbers use Lua's own `tostring`, so `1.0` stays
/// `1.0` and integers stay integral.
fn render_define_value(lua: &Lua, value: LuaValue) -> LuaResult<String> {
  match value {
    LuaValue::String(s) => Ok(s.to_str()?.to_string()),
    LuaValue::Boolean(true) => Ok("ON".to_string()),
    LuaValue::Boolean(false) => Ok("OFF".to_string()),
    LuaValue::Integer(_) | LuaValue::Number(_) => {
      let tostring: LuaFunction = lua.globals().get("tostring")?;
      tostring.call::<String>(value)
    }
    other => Err(LuaError::external(format!(
      "cmake_define: unsupported value type {}",
      other.type_name()
    ))),
  }
}

/// Append the script's `cmake_args` and `additional_build_targets` to `output`.
///
/// Both globals must still be arrays of strings. Nothing is appended unless
/// both arrays are valid.
pub fn collect_outputs(lua: &Lua, output: &mut HookOutput) -> LuaResult<()> {
  let args = read_string_array(lua, CMAKE_ARGS_GLOBAL)?;
  let targets = read_string_array(lua, BUILD_TARGETS_GLOBAL)?;
  output.extend_cmake_args(args);
  output.extend_build_targets(targets);
  Ok(())
}

fn read_string_array(lua: &Lua, name: &str) -> LuaResult<Vec<String>> {
  let table = match lua.globals().get::<LuaValue>(name)? {
    LuaValue::Table(t) => t,
    other => {
      return Err(LuaError::external(format!(
        "'{}' must be an array of strings, got {}",
        name,
        other.type_name()
      )));
    }
  };

  let len = table.raw_len();
  let mut entries = 0usize;
  for pair in table.clone().pairs::<LuaValue, LuaValue>() {
    pair?;
    entries += 1;
  }
  if entries != len {
    return Err(LuaError::external(format!(
      "'{}' must be an array of strings, but has non-sequential keys",
      name
    )));
  }

  let mut items = Vec::with_capacity(len);
  for i in 1..=len {
    match table.raw_get::<LuaValue>(i)? {
      LuaValue::String(s) => items.push(s.to_str()?.to_string()),
      other => {
        return Err(LuaError::external(format!(
          "{}[{}] must be a string, got {}",
          name,
          i,
          other.type_name()
        )));
      }
    }
  }
  Ok(items)
}
