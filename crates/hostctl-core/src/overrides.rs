//! `key=value` Postgres overrides from the command line
//!
//! Values are typed by trying, in order, an integer, a boolean and finally a
//! plain string. Keys ending in `_timeout` are always sent as strings since
//! the platform rejects numeric timeouts.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{Error, Result};

/// Key the platform reads to decide whether to restart Postgres
pub const RESTART_DATABASE: &str = "restart_database";

const TIMEOUT_SUFFIX: &str = "_timeout";

/// A typed override value
#[derive(Debug, Clone, PartialEq)]
pub enum OverrideValue {
    Int(i64),
    Bool(bool),
    Str(String),
    /// Baseline value of some other JSON type, carried through unchanged
    Json(Value),
}

impl OverrideValue {
    /// Type a raw command line value
    pub fn coerce(raw: &str) -> Self {
        if let Ok(int) = raw.parse::<i64>() {
            OverrideValue::Int(int)
        } else if let Some(flag) = parse_bool(raw) {
            OverrideValue::Bool(flag)
        } else {
            OverrideValue::Str(raw.to_string())
        }
    }

    /// Type a value fetched from the platform
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Bool(flag) => OverrideValue::Bool(flag),
            Value::String(text) => OverrideValue::Str(text),
            Value::Number(number) => match number.as_i64() {
                Some(int) => OverrideValue::Int(int),
                None => OverrideValue::Json(Value::Number(number)),
            },
            other => OverrideValue::Json(other),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            OverrideValue::Int(int) => Value::from(*int),
            OverrideValue::Bool(flag) => Value::Bool(*flag),
            OverrideValue::Str(text) => Value::String(text.clone()),
            OverrideValue::Json(value) => value.clone(),
        }
    }

    pub fn is_str(&self) -> bool {
        matches!(self, OverrideValue::Str(_))
    }
}

impl fmt::Display for OverrideValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideValue::Int(int) => write!(f, "{}", int),
            OverrideValue::Bool(flag) => write!(f, "{}", flag),
            OverrideValue::Str(text) => f.write_str(text),
            OverrideValue::Json(value) => write!(f, "{}", value),
        }
    }
}

impl Serialize for OverrideValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            OverrideValue::Int(int) => serializer.serialize_i64(*int),
            OverrideValue::Bool(flag) => serializer.serialize_bool(*flag),
            OverrideValue::Str(text) => serializer.serialize_str(text),
            OverrideValue::Json(value) => value.serialize(serializer),
        }
    }
}

/// The boolean spellings accepted on the command line
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// An ordered set of overrides for one update
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OverrideSet {
    values: BTreeMap<String, OverrideValue>,
}

impl OverrideSet {
    /// Parse `key=value` pairs.
    ///
    /// Every entry must contain exactly one `=`. The whole set is rejected
    /// on the first malformed entry.
    ///
    /// # Example
    ///
    /// ```
    /// use hostctl_core::{OverrideSet, OverrideValue};
    ///
    /// let set =
    ///     OverrideSet::parse(["max_connections=100", "track_commit_timestamp=true"]).unwrap();
    /// assert_eq!(set.get("max_connections"), Some(&OverrideValue::Int(100)));
    /// assert_eq!(set.get("track_commit_timestamp"), Some(&OverrideValue::Bool(true)));
    /// ```
    pub fn parse<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = BTreeMap::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let mut parts = pair.split('=');
            let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(Error::InvalidOverride {
                    entry: pair.to_string(),
                });
            };
            values.insert(key.to_string(), OverrideValue::coerce(value));
        }
        Ok(Self { values })
    }

    /// Wrap an override map fetched from the platform
    pub fn from_remote(remote: BTreeMap<String, Value>) -> Self {
        Self {
            values: remote
                .into_iter()
                .map(|(key, value)| (key, OverrideValue::from_json(value)))
                .collect(),
        }
    }

    /// Layer `self` over `baseline`; on a shared key `self` wins
    pub fn with_baseline(self, baseline: OverrideSet) -> Self {
        let mut values = baseline.values;
        values.extend(self.values);
        Self { values }
    }

    /// Ask the platform not to restart Postgres for this update
    pub fn with_no_restart(mut self) -> Self {
        self.values
            .insert(RESTART_DATABASE.to_string(), OverrideValue::Bool(false));
        self
    }

    /// Drop the given keys, ignoring surrounding whitespace
    pub fn without<S: AsRef<str>>(mut self, keys: &[S]) -> Self {
        for key in keys {
            self.values.remove(key.as_ref().trim());
        }
        self
    }

    /// Apply the timeout rule and produce the request body
    pub fn finalize(self) -> BTreeMap<String, Value> {
        self.values
            .into_iter()
            .map(|(key, value)| {
                let value = if key.ends_with(TIMEOUT_SUFFIX) && !value.is_str() {
                    OverrideValue::Str(value.to_string())
                } else {
                    value
                };
                (key, value.to_json())
            })
            .collect()
    }

    /// Produce a request body with every value as it is
    pub fn into_json(self) -> BTreeMap<String, Value> {
        self.values
            .into_iter()
            .map(|(key, value)| (key, value.to_json()))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&OverrideValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OverrideValue)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::int("100", OverrideValue::Int(100))]
    #[case::negative("-5", OverrideValue::Int(-5))]
    #[case::one_is_int("1", OverrideValue::Int(1))]
    #[case::word_true("true", OverrideValue::Bool(true))]
    #[case::short_false("f", OverrideValue::Bool(false))]
    #[case::upper("TRUE", OverrideValue::Bool(true))]
    #[case::mixed_case("tRuE", OverrideValue::Str("tRuE".into()))]
    #[case::string("4MB", OverrideValue::Str("4MB".into()))]
    #[case::empty("", OverrideValue::Str(String::new()))]
    fn test_coercion_order(#[case] raw: &str, #[case] expected: OverrideValue) {
        assert_eq!(OverrideValue::coerce(raw), expected);
    }

    #[rstest]
    #[case::no_equals("value")]
    #[case::two_equals("a=b=c")]
    fn test_malformed_pair_is_rejected(#[case] entry: &str) {
        let err = OverrideSet::parse(["max_connections=100", entry]).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("expected config value in key=value format, received: '{}'", entry)
        );
    }

    #[test]
    fn test_timeout_keys_become_strings() {
        let body = OverrideSet::parse(["statement_timeout=600", "wal_sender_timeout=true"])
            .unwrap()
            .finalize();
        assert_eq!(body["statement_timeout"], json!("600"));
        assert_eq!(body["wal_sender_timeout"], json!("true"));
    }

    #[test]
    fn test_timeout_rule_applies_to_baseline() {
        let baseline = OverrideSet::from_remote(
            [("idle_session_timeout".to_string(), json!(30))].into_iter().collect(),
        );
        let body = OverrideSet::default().with_baseline(baseline).finalize();
        assert_eq!(body["idle_session_timeout"], json!("30"));
    }

    #[test]
    fn test_override_wins_over_baseline() {
        let baseline = OverrideSet::from_remote(
            [
                ("max_connections".to_string(), json!(60)),
                ("work_mem".to_string(), json!("4MB")),
            ]
            .into_iter()
            .collect(),
        );
        let body = OverrideSet::parse(["max_connections=100"])
            .unwrap()
            .with_baseline(baseline)
            .finalize();
        assert_eq!(body["max_connections"], json!(100));
        assert_eq!(body["work_mem"], json!("4MB"));
    }

    #[test]
    fn test_no_restart_flag() {
        let body = OverrideSet::default().with_no_restart().finalize();
        assert_eq!(body[RESTART_DATABASE], json!(false));
    }

    #[test]
    fn test_unusual_baseline_values_pass_through() {
        let set = OverrideSet::from_remote(
            [
                ("ratio".to_string(), json!(0.5)),
                ("list".to_string(), json!(["a"])),
            ]
            .into_iter()
            .collect(),
        );
        let body = set.finalize();
        assert_eq!(body["ratio"], json!(0.5));
        assert_eq!(body["list"], json!(["a"]));
    }

    #[test]
    fn test_without_trims_keys() {
        let set = OverrideSet::parse(["max_connections=100", "work_mem=4MB"])
            .unwrap()
            .without(&[" work_mem "]);
        assert_eq!(set.len(), 1);
        assert!(set.get("work_mem").is_none());
    }
}
