//! Canonical serialization of configuration records
//!
//! Records are rendered through [`toml::Value`], whose tables are ordered
//! maps. Field order and map insertion order therefore never leak into the
//! output: two structurally equal records always produce identical text.

use serde::Serialize;

use crate::{Error, Result};

/// A configuration record with a deterministic textual form.
///
/// Implementors name the config section they represent; the label is used
/// in diff headers such as `remote[db.settings]`.
pub trait CanonicalForm: Serialize {
    /// Dotted section path within `config.toml`
    const SECTION: &'static str;

    /// Render the record in canonical form.
    ///
    /// Unset (`None`) fields are omitted, so a record with no opinions
    /// renders as an empty string.
    fn to_canonical(&self) -> Result<String> {
        to_canonical_string(self)
    }
}

/// Render any serializable table-shaped value in canonical form
pub fn to_canonical_string<T: Serialize + ?Sized>(record: &T) -> Result<String> {
    match toml::Value::try_from(record)? {
        toml::Value::Table(table) => Ok(toml::to_string(&table)?),
        other => Err(Error::NotATable {
            kind: other.type_str(),
        }),
    }
}
