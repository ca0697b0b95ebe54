//! [`TestWorkdir`]: a temporary working directory with `hostctl/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use hostctl_config::LocalConfig;
use tempfile::TempDir;

/// Temporary working directory for config loading and CLI tests.
///
/// # Example
///
/// ```rust
/// use hostctl_test_utils::TestWorkdir;
///
/// let workdir = TestWorkdir::with_config("[db.settings]\nmax_connections = 100\n");
/// assert!(workdir.config_path().is_file());
/// ```
pub struct TestWorkdir {
    temp_dir: TempDir,
}

impl Default for TestWorkdir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkdir {
    /// An empty directory without a config file.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// A directory whose `hostctl/config.toml` holds `content`.
    pub fn with_config(content: &str) -> Self {
        let workdir = Self::new();
        workdir.write_config(content);
        workdir
    }

    /// Root of the working directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `hostctl/config.toml` inside the directory.
    pub fn config_path(&self) -> PathBuf {
        LocalConfig::path_in(self.root())
    }

    /// Overwrite `hostctl/config.toml`.
    pub fn write_config(&self, content: &str) {
        let path = self.config_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
    }

    /// Current contents of `hostctl/config.toml`.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_config(&self) -> String {
        let path = self.config_path();
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read config: {}", path.display()))
    }
}
