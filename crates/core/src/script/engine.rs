//! Sandboxed Lua evaluation for configuration scripts.

use std::sync::LazyLock;

use mlua::{Lua, LuaOptions, Result as LuaResult, StdLib, Value};
use regex::Regex;

use super::surface::{CapabilityTable, ConfigAccumulator, install_surface};
use super::types::{EvalFailure, SandboxConfig, ScriptError};
use crate::config::value::ConfigObject;

/// Lua reports positions as `[string "chunk"]:12: message`.
static SOURCE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\]:(\d+):"#).unwrap());

/// A sandboxed Lua environment for one configuration load.
///
/// Created fresh per load, discarded after: the accumulator and every
/// binding live and die with the engine, so concurrent loads share nothing.
///
/// # Example
///
/// ```rust
/// use slatebook_core::script::{CapabilityTable, ScriptEngine};
///
/// let engine = ScriptEngine::sandboxed().unwrap();
/// engine.install_surface(&CapabilityTable::new()).unwrap();
/// engine.eval_config_script("config.set('editor.theme', 'dark')").unwrap();
/// assert!(engine.take_config().contains_key("editor"));
/// ```
pub struct ScriptEngine {
    lua: Lua,
}

impl ScriptEngine {
    /// Create an engine with the given sandbox limits.
    ///
    /// The standard library is restricted to `table`, `string`, `utf8` and
    /// `math`; base functions (`type`, `tostring`, `pairs`, ...) stay
    /// available.
    pub fn new(config: &SandboxConfig) -> Result<Self, ScriptError> {
        let libs = StdLib::TABLE | StdLib::STRING | StdLib::UTF8 | StdLib::MATH;
        let lua = Lua::new_with(libs, LuaOptions::default())?;

        if config.memory_limit > 0 {
            lua.set_memory_limit(config.memory_limit)?;
        }

        Self::apply_sandbox(&lua)?;
        Ok(Self { lua })
    }

    /// Create an engine with the default restrictive sandbox.
    pub fn sandboxed() -> Result<Self, ScriptError> {
        Self::new(&SandboxConfig::restricted())
    }

    /// Install the `config` API, the caller's bindings, and the permissive
    /// stub fallback. Must run before [`eval_config_script`].
    ///
    /// [`eval_config_script`]: ScriptEngine::eval_config_script
    pub fn install_surface(&self, base: &CapabilityTable) -> Result<(), ScriptError> {
        install_surface(&self.lua, base)?;
        Ok(())
    }

    /// Run a configuration script to completion.
    ///
    /// Declarations made through `config.set` land in the accumulator even
    /// when a later statement fails; retrieve them with [`take_config`].
    ///
    /// [`take_config`]: ScriptEngine::take_config
    pub fn eval_config_script(&self, code: &str) -> Result<(), EvalFailure> {
        self.lua
            .load(code)
            .set_name("boot-config")
            .exec()
            .map_err(classify_failure)
    }

    /// Take the accumulated configuration out of the engine.
    pub fn take_config(&self) -> ConfigObject {
        self.lua
            .remove_app_data::<ConfigAccumulator>()
            .map(|accumulator| accumulator.root)
            .unwrap_or_default()
    }

    /// Remove globals that would reach outside the sandbox.
    ///
    /// With the stub fallback installed these identifiers still resolve, but
    /// to the inert stub instead of the host.
    fn apply_sandbox(lua: &Lua) -> LuaResult<()> {
        let globals = lua.globals();

        globals.set("dofile", Value::Nil)?;
        globals.set("loadfile", Value::Nil)?;
        globals.set("load", Value::Nil)?;
        globals.set("require", Value::Nil)?;
        globals.set("package", Value::Nil)?;
        globals.set("io", Value::Nil)?;
        globals.set("os", Value::Nil)?;
        globals.set("debug", Value::Nil)?;
        globals.set("collectgarbage", Value::Nil)?;

        Ok(())
    }
}

/// Classify an evaluation error at the evaluator boundary.
///
/// `mlua` distinguishes rejection of the chunk from failures while running
/// it; everything that is not a syntax error (including memory exhaustion
/// and callback errors) counts as a runtime failure here.
fn classify_failure(err: mlua::Error) -> EvalFailure {
    match err {
        mlua::Error::SyntaxError { message, .. } => {
            let line = source_line(&message);
            EvalFailure::Syntax { message, line }
        }
        other => {
            let message = other.to_string();
            let line = source_line(&message);
            EvalFailure::Runtime { message, line }
        }
    }
}

fn source_line(message: &str) -> Option<u32> {
    SOURCE_LINE_RE
        .captures(message)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
