//! `${VAR}` substitution in config values, resolved at load time.
//!
//! Only uppercase `[A-Z_][A-Z0-9_]*` names are matched, and only string
//! leaves of the value tree are processed. A referenced variable that is
//! unset or empty is an error.

use std::collections::HashMap;

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid pattern"));

/// Substitute `${VAR}` references throughout a config value tree using
/// the process environment.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    resolve_env_vars_with(value, &std::env::vars().collect())
}

/// Substitute using a provided variable map (useful for testing).
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    walk(value, env, "")
}

fn walk(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute(s, env, path)?)),
        Value::Array(items) => {
            let items = items
                .iter()
                .enumerate()
                .map(|(i, item)| walk(item, env, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Array(items))
        }
        Value::Object(fields) => {
            let mut out = serde_json::Map::with_capacity(fields.len());
            for (name, field) in fields {
                let child_path = if path.is_empty() {
                    name.clone()
                } else {
                    format!("{path}.{name}")
                };
                out.insert(name.clone(), walk(field, env, &child_path)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

fn substitute(raw: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    let mut result = String::with_capacity(raw.len());
    let mut last = 0;

    for captures in ENV_VAR_PATTERN.captures_iter(raw) {
        let whole = captures.get(0).expect("match present");
        let name = &captures[1];

        let resolved = match env.get(name) {
            Some(value) if !value.is_empty() => value,
            _ => bail!("missing env var \"{name}\" referenced at config path: {path}"),
        };

        result.push_str(&raw[last..whole.start()]);
        result.push_str(resolved);
        last = whole.end();
    }
    result.push_str(&raw[last..]);

    Ok(result)
}
