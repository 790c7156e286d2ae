//! The capability surface installed into the script sandbox.
//!
//! A configuration script sees exactly one real API, the `config` global.
//! Everything else it might reference (command registration, event hooks,
//! whatever the wider notebook scripting ecosystem offers) resolves to an
//! inert stub so that unrelated statements in an otherwise valid script can
//! never fail the load or touch the configuration.

use std::collections::HashMap;

use mlua::{Function, Lua, LuaSerdeExt, MultiValue, Result as LuaResult, Table, Value};

use super::convert::config_value_from_lua;
use crate::config::merge::{set_path, set_top_level, value_at};
use crate::config::value::{ConfigObject, ConfigValue};

/// A caller-supplied global binding.
#[derive(Debug, Clone)]
pub enum Capability {
    /// A constant value exposed under the identifier.
    Value(ConfigValue),
    /// An inert permissive stand-in: callable and indexable, does nothing.
    Stub,
}

/// Global identifier -> binding, installed into the sandbox before
/// evaluation.
pub type CapabilityTable = HashMap<String, Capability>;

/// Accumulator for the configuration declarations made during one
/// evaluation. Lives in Lua app data for the lifetime of one engine.
#[derive(Debug, Default)]
pub(crate) struct ConfigAccumulator {
    pub(crate) root: ConfigObject,
}

/// Install the capability surface on a sandboxed Lua state.
///
/// Registers the `config` API, the caller's bindings, and a permissive
/// fallback for every other global identifier. Failures here are host-side
/// defects and propagate; nothing a script does can make this fail.
pub(crate) fn install_surface(lua: &Lua, base: &CapabilityTable) -> LuaResult<()> {
    lua.set_app_data(ConfigAccumulator::default());

    let config = lua.create_table()?;
    config.set("set", create_set_fn(lua)?)?;
    config.set("get", create_get_fn(lua)?)?;
    lua.globals().set("config", config)?;

    for (name, capability) in base {
        let binding = match capability {
            Capability::Value(value) => lua.to_value(value)?,
            Capability::Stub => Value::Table(make_stub(lua)?),
        };
        lua.globals().set(name.as_str(), binding)?;
    }

    install_stub_fallback(lua)?;
    Ok(())
}

/// Create `config.set`, the single writer into the accumulator.
///
/// Two call shapes (in Lua):
///
/// ```lua
/// config.set { option1 = "pete" }      -- bulk: replace top-level keys
/// config.set("optionObj.nested", 5)    -- path: set one dotted path
/// ```
fn create_set_fn(lua: &Lua) -> LuaResult<Function> {
    lua.create_function(|lua, args: MultiValue| {
        let mut args = args.into_iter();
        match (args.next(), args.next()) {
            (Some(Value::Table(table)), None) => {
                let incoming = match config_value_from_lua(Value::Table(table))? {
                    ConfigValue::Object(map) => map,
                    _ => {
                        return Err(mlua::Error::runtime(
                            "config.set table must use string keys",
                        ));
                    }
                };
                let mut accumulator = lua
                    .app_data_mut::<ConfigAccumulator>()
                    .ok_or_else(|| mlua::Error::runtime("config accumulator missing"))?;
                set_top_level(&mut accumulator.root, incoming);
                Ok(())
            }
            (Some(Value::String(path)), Some(value)) => {
                let path = path.to_str()?.to_string();
                let value = config_value_from_lua(value)?;
                let mut accumulator = lua
                    .app_data_mut::<ConfigAccumulator>()
                    .ok_or_else(|| mlua::Error::runtime("config accumulator missing"))?;
                set_path(&mut accumulator.root, &path, value);
                Ok(())
            }
            _ => Err(mlua::Error::runtime(
                "config.set expects a table, or a path string and a value",
            )),
        }
    })
}

/// Create `config.get(path)`: read back what the script has set so far.
fn create_get_fn(lua: &Lua) -> LuaResult<Function> {
    lua.create_function(|lua, path: String| {
        let current = {
            let accumulator = lua
                .app_data_ref::<ConfigAccumulator>()
                .ok_or_else(|| mlua::Error::runtime("config accumulator missing"))?;
            value_at(&accumulator.root, &path).cloned()
        };
        match current {
            Some(value) => lua.to_value(&value),
            None => Ok(Value::Nil),
        }
    })
}

/// Build the shared inert stub.
///
/// Calling it returns the stub again, indexing it returns the stub again,
/// and assignments into it are discarded, so arbitrarily long chains like
/// `slashCommand.define { name = "x" }` or `event.listen(...).cancel()` all
/// succeed without observable effect.
fn make_stub(lua: &Lua) -> LuaResult<Table> {
    let stub = lua.create_table()?;
    let metatable = lua.create_table()?;

    let call_target = stub.clone();
    metatable.set(
        "__call",
        lua.create_function(move |_, _args: MultiValue| Ok(call_target.clone()))?,
    )?;

    let index_target = stub.clone();
    metatable.set(
        "__index",
        lua.create_function(move |_, (_table, _key): (Value, Value)| {
            Ok(index_target.clone())
        })?,
    )?;

    metatable.set(
        "__newindex",
        lua.create_function(|_, (_table, _key, _value): (Value, Value, Value)| Ok(()))?,
    )?;

    stub.set_metatable(Some(metatable));
    Ok(stub)
}

/// Resolve every global identifier not bound above to the inert stub.
///
/// This covers the globals removed by the sandbox as well: a script that
/// mentions `os` or `io` gets the stub, not the host.
fn install_stub_fallback(lua: &Lua) -> LuaResult<()> {
    let stub = make_stub(lua)?;
    let metatable = lua.create_table()?;
    metatable.set(
        "__index",
        lua.create_function(move |_, (_globals, _name): (Table, Value)| {
            Ok(stub.clone())
        })?,
    )?;
    lua.globals().set_metatable(Some(metatable));
    Ok(())
}
