//! crashscan configuration
//!
//! Config file: `$CRASHSCAN_CONFIG` or ~/.config/crashscan/config.toml.
//! Every field is optional; a missing file means defaults.
//!
//! ```toml
//! target = "xv6"
//! context_lines = 10
//! max_frames = 20
//! kernel_obj = "/build/xv6/kernel/kernel"
//!
//! [[extra_signatures]]
//! pattern = "usertrap\\(\\): (.+)"
//! kind = "fault"
//! label = "user trap"
//! ```

use crate::context::DEFAULT_CONTEXT_LINES;
use crate::error::{Result, ScanError};
use crate::signature::SignatureDef;
use crate::stack_trace::DEFAULT_MAX_FRAMES;
use crate::target::xv6::XV6_TARGET;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "CRASHSCAN_CONFIG";

fn default_target() -> String {
    XV6_TARGET.to_string()
}

fn default_context_lines() -> usize {
    DEFAULT_CONTEXT_LINES
}

fn default_max_frames() -> usize {
    DEFAULT_MAX_FRAMES
}

/// Analyzer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Target system whose profile is used
    #[serde(default = "default_target")]
    pub target: String,

    /// Overrides the profile's title prefix
    #[serde(default)]
    pub system_label: Option<String>,

    /// Lines of context on each side of a match
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,

    /// Frame cap after a stack-trace marker
    #[serde(default = "default_max_frames")]
    pub max_frames: usize,

    /// Kernel image with symbols; unset disables symbolization
    #[serde(default)]
    pub kernel_obj: Option<PathBuf>,

    /// Signatures appended after the target's built-in table
    #[serde(default)]
    pub extra_signatures: Vec<SignatureDef>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            system_label: None,
            context_lines: DEFAULT_CONTEXT_LINES,
            max_frames: DEFAULT_MAX_FRAMES,
            kernel_obj: None,
            extra_signatures: Vec::new(),
        }
    }
}

impl ScanConfig {
    /// Default user config path: ~/.config/crashscan/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("crashscan").join("config.toml"))
    }

    /// Parse and validate TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: ScanConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Resolve config: explicit path, then `$CRASHSCAN_CONFIG`, then the
    /// user config file if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Self::load_from_path(Path::new(&path));
            }
        }

        match Self::user_config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.target.trim().is_empty() {
            return Err(ScanError::Config("target must not be empty".to_string()));
        }
        if let Some(label) = &self.system_label {
            if label.trim().is_empty() {
                return Err(ScanError::Config("system_label must not be blank".to_string()));
            }
        }
        Ok(())
    }
}
