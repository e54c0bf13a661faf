//! Target profiles and the registry that selects one per target system.
//!
//! Each supported operating system provides a [`TargetProfile`]: its
//! pattern set, classifier and relevant-file mapper. The registry is filled
//! once at startup and read-only afterwards.

pub mod xv6;

use crate::classifier::{classify, Category};
use crate::error::{Result, ScanError};
use crate::parser::KeywordSet;
use crate::report::Report;
use crate::signature::PatternSet;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

pub use xv6::Xv6Profile;

/// Target-specific analyzer capabilities
pub trait TargetProfile: Send + Sync {
    /// Registry key, e.g. "xv6"
    fn name(&self) -> &str;

    /// Title prefix, e.g. "XV6"
    fn system_label(&self) -> &str;

    fn pattern_set(&self) -> &PatternSet;

    /// Category for a title subject (the title minus the system label)
    fn classify(&self, subject: &str) -> Category {
        classify(subject)
    }

    fn relevant_files(&self, report: &Report, system_label: &str) -> Vec<String>;

    /// Keywords for the suspicious-output fallback, compiled once
    fn suspicious_keywords(&self) -> &KeywordSet;
}

/// Target profiles keyed by lower-cased target name
#[derive(Default, Clone)]
pub struct TargetRegistry {
    profiles: HashMap<String, Arc<dyn TargetProfile>>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in profile
    pub fn with_builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Arc::new(Xv6Profile::new()?))?;
        info!(targets = ?registry.names(), "target registry ready");
        Ok(registry)
    }

    pub fn register(&mut self, profile: Arc<dyn TargetProfile>) -> Result<()> {
        let key = profile.name().to_lowercase();
        if self.profiles.contains_key(&key) {
            return Err(ScanError::DuplicateTarget(key));
        }
        self.profiles.insert(key, profile);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn TargetProfile>> {
        self.profiles
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| ScanError::UnknownTarget(name.to_string()))
    }

    /// Registered target names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.profiles.keys().cloned().collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for TargetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetRegistry")
            .field("targets", &self.names())
            .finish()
    }
}
