//! Rendering of command results

use std::collections::BTreeMap;

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::Result;

/// Print `value` in the requested format, using `pretty` for text output
pub fn emit<T, F>(format: OutputFormat, value: &T, pretty: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T),
{
    match format {
        OutputFormat::Pretty => pretty(value),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Toml => print!("{}", render_toml(value)?),
    }
    Ok(())
}

/// Render `value` as TOML. TOML has no null, so null entries are left out.
fn render_toml<T: Serialize>(value: &T) -> Result<String> {
    let mut value = serde_json::to_value(value)?;
    drop_nulls(&mut value);
    Ok(toml::to_string_pretty(&value)?)
}

fn drop_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(drop_nulls);
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(drop_nulls);
        }
        _ => {}
    }
}

/// Print a unified diff with added and removed lines coloured
pub fn print_unified_diff(diff: &str) {
    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }
}

/// Print an override map as `key = value` lines
pub fn print_overrides(overrides: &BTreeMap<String, Value>) {
    if overrides.is_empty() {
        println!("No Postgres config overrides set.");
        return;
    }

    println!("{}", "Postgres config overrides:".bold());
    let width = overrides.keys().map(String::len).max().unwrap_or(0);
    for (key, value) in overrides {
        let key = format!("{:<width$}", key, width = width);
        println!("  {} = {}", key.cyan(), display_value(value));
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
