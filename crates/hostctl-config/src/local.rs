//! The local `config.toml` as a whole

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use toml_edit::{DocumentMut, Item, TableLike};
use tracing::debug;

use crate::db::Db;
use crate::storage::Storage;
use crate::{Error, Result};

/// Directory under the working directory that holds `config.toml`
pub const CONFIG_DIR: &str = "hostctl";

/// File name of the local configuration
pub const CONFIG_FILE: &str = "config.toml";

/// Desired platform state declared in `config.toml`
///
/// Sections that are not written in the file carry no opinion. Unknown keys
/// are ignored so the file can hold settings for other commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Project reference the file belongs to, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(default)]
    pub db: Db,

    #[serde(default)]
    pub storage: Storage,
}

impl LocalConfig {
    /// Location of `config.toml` below `workdir`
    pub fn path_in(workdir: &Path) -> PathBuf {
        workdir.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Parse configuration from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use hostctl_config::LocalConfig;
    ///
    /// let config = LocalConfig::parse(r#"
    /// [db.settings]
    /// max_connections = 100
    ///
    /// [db.pooler]
    /// enabled = true
    /// pool_mode = "transaction"
    /// "#).unwrap();
    ///
    /// assert_eq!(config.db.settings.max_connections, Some(100));
    /// assert!(config.db.pooler.is_enabled());
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let config: LocalConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Read and parse `config.toml` at `path`
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] when the file does not exist, or a
    /// parse error when its contents do not match the schema.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        debug!(path = %path.display(), "Loading local config");
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Render the configuration back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        debug!(path = %path.display(), "Saved local config");
        Ok(())
    }

    /// Write the configuration over the existing file at `path`.
    ///
    /// Only values this schema renders are touched. Comments, unknown
    /// sections and keys for other commands are kept. Falls back to
    /// [`save`](Self::save) when the file does not exist yet.
    pub fn update_file(&self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return self.save(path);
        }
        let original = std::fs::read_to_string(path)?;
        std::fs::write(path, self.render_over(&original)?)?;
        debug!(path = %path.display(), "Updated local config in place");
        Ok(())
    }

    /// Overlay the configuration onto `original` TOML text
    ///
    /// # Example
    ///
    /// ```
    /// use hostctl_config::LocalConfig;
    ///
    /// let original =
    ///     "# tuned by hand\n[api]\nport = 54321\n\n[db.settings]\nmax_connections = 100 # peak\n";
    /// let mut config = LocalConfig::parse(original).unwrap();
    /// config.db.settings.max_connections = Some(60);
    ///
    /// let updated = config.render_over(original).unwrap();
    /// assert!(updated.contains("# tuned by hand"));
    /// assert!(updated.contains("port = 54321"));
    /// assert!(updated.contains("max_connections = 60 # peak"));
    /// ```
    pub fn render_over(&self, original: &str) -> Result<String> {
        let mut document: DocumentMut = original.parse()?;
        let rendered: DocumentMut = self.to_toml_string()?.parse()?;
        overlay(document.as_table_mut(), rendered.as_table());
        Ok(document.to_string())
    }
}

/// Copy every value of `source` into `target`, recursing into tables.
/// Existing values keep their surrounding whitespace and comments; nothing
/// is removed from `target`.
fn overlay(target: &mut dyn TableLike, source: &dyn TableLike) {
    for (key, item) in source.iter() {
        if let Some(existing) = target.get_mut(key) {
            match (existing, item) {
                (existing, Item::Value(value)) if !existing.is_table_like() => {
                    let mut value = value.clone();
                    if let Some(current) = existing.as_value() {
                        *value.decor_mut() = current.decor().clone();
                    }
                    *existing = Item::Value(value);
                }
                (existing, item) => {
                    if let (Some(target), Some(source)) =
                        (existing.as_table_like_mut(), item.as_table_like())
                    {
                        overlay(target, source);
                    }
                }
            }
            continue;
        }
        if has_values(item) {
            target.insert(key, item.clone());
        }
    }
}

/// Whether `item` is a value or a table holding at least one value
fn has_values(item: &Item) -> bool {
    match item.as_table_like() {
        Some(table) => table.iter().any(|(_, child)| has_values(child)),
        None => !item.is_none(),
    }
}
