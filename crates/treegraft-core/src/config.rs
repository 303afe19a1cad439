//! Operation configuration types.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration shared by graft, prune, and file removal.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct OpsConfig {
    /// Base directory for relative paths (None = process working directory).
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Mirror notifications to the log in addition to the sink.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub log_notifications: bool,
}

fn default_true() -> bool {
    true
}

impl OpsConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(Some(ref dir)) = self.working_dir {
            if dir.as_os_str().is_empty() {
                return Err("Working directory cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl OpsConfig {
    /// Create a new config builder.
    pub fn builder() -> OpsConfigBuilder {
        OpsConfigBuilder::default()
    }

    /// Resolve a caller-supplied path against the working directory.
    ///
    /// Absolute paths and configs without a working directory pass the
    /// path through unchanged.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.working_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            working_dir: None,
            log_notifications: true,
        }
    }
}
