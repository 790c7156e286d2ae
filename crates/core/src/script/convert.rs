//! Conversion from Lua values into configuration values.

use mlua::{Result as LuaResult, Value};

use crate::config::value::{ConfigObject, ConfigValue};

/// Nesting depth beyond which conversion gives up.
///
/// Cyclic tables and absurdly deep structures must become a recoverable
/// script failure instead of exhausting the host stack.
const MAX_VALUE_DEPTH: usize = 128;

/// Convert a Lua value into a [`ConfigValue`].
///
/// Tables whose keys are the consecutive integers `1..=n` become arrays;
/// every other table becomes a mapping with string keys. Values that cannot
/// live in a configuration (functions, userdata, threads) are a runtime
/// error, which the loader recovers from.
pub fn config_value_from_lua(value: Value) -> LuaResult<ConfigValue> {
    convert(value, 0)
}

fn convert(value: Value, depth: usize) -> LuaResult<ConfigValue> {
    if depth > MAX_VALUE_DEPTH {
        return Err(mlua::Error::runtime("configuration value is nested too deeply"));
    }

    match value {
        Value::Nil => Ok(ConfigValue::Null),
        Value::Boolean(b) => Ok(ConfigValue::Bool(b)),
        Value::Integer(i) => Ok(ConfigValue::Number(i as f64)),
        Value::Number(n) => Ok(ConfigValue::Number(n)),
        Value::String(s) => Ok(ConfigValue::String(s.to_str()?.to_string())),
        Value::Table(table) => {
            let len = table.raw_len();
            if len > 0 {
                let mut items = Vec::with_capacity(len);
                for i in 1..=len {
                    items.push(convert(table.raw_get(i)?, depth + 1)?);
                }
                Ok(ConfigValue::Array(items))
            } else {
                let mut map = ConfigObject::new();
                for pair in table.pairs::<String, Value>() {
                    let (key, item) = pair?;
                    map.insert(key, convert(item, depth + 1)?);
                }
                Ok(ConfigValue::Object(map))
            }
        }
        other => Err(mlua::Error::runtime(format!(
            "cannot store a {} in the configuration",
            other.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlua::Lua;

    fn eval(expr: &str) -> LuaResult<ConfigValue> {
        let lua = Lua::new();
        let value: Value = lua.load(expr).eval()?;
        config_value_from_lua(value)
    }

    #[test]
    fn scalars() {
        assert_eq!(eval("nil").unwrap(), ConfigValue::Null);
        assert_eq!(eval("true").unwrap(), ConfigValue::Bool(true));
        assert_eq!(eval("5").unwrap(), ConfigValue::Number(5.0));
        assert_eq!(eval("1.5").unwrap(), ConfigValue::Number(1.5));
        assert_eq!(eval("'pete'").unwrap(), ConfigValue::String("pete".into()));
    }

    #[test]
    fn sequence_table_becomes_array() {
        assert_eq!(
            eval("{1, 2, 3}").unwrap(),
            ConfigValue::Array(vec![1_i64.into(), 2_i64.into(), 3_i64.into()])
        );
    }

    #[test]
    fn keyed_table_becomes_object() {
        let value = eval("{ theme = 'dark', wide = false }").unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.get("theme"), Some(&"dark".into()));
        assert_eq!(map.get("wide"), Some(&false.into()));
    }

    #[test]
    fn nested_tables() {
        let value = eval("{ outer = { inner = { 'a', 'b' } } }").unwrap();
        let inner = value
            .as_object()
            .and_then(|m| m.get("outer"))
            .and_then(ConfigValue::as_object)
            .and_then(|m| m.get("inner"))
            .unwrap();
        assert_eq!(inner, &ConfigValue::Array(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn empty_table_is_an_object() {
        assert_eq!(eval("{}").unwrap(), ConfigValue::Object(ConfigObject::new()));
    }

    #[test]
    fn function_is_rejected() {
        assert!(eval("function() end").is_err());
    }

    #[test]
    fn cyclic_table_is_rejected_not_fatal() {
        let err = eval("local t = {}; t.self_ref = t; return t").unwrap_err();
        assert!(err.to_string().contains("nested too deeply"));
    }
}
