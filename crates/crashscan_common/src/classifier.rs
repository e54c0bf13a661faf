//! Crash classification from report titles.

use serde::{Deserialize, Serialize};

/// Coarse crash category used for triage and deduplication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    KernelPanic,
    AssertionFailure,
    MemoryError,
    StackError,
    Deadlock,
    #[default]
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::KernelPanic => "kernel-panic",
            Category::AssertionFailure => "assertion-failure",
            Category::MemoryError => "memory-error",
            Category::StackError => "stack-error",
            Category::Deadlock => "deadlock",
            Category::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword rules, first match wins
const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (&["panic"], Category::KernelPanic),
    (&["assertion"], Category::AssertionFailure),
    (&["segmentation", "segfault"], Category::MemoryError),
    (&["stack"], Category::StackError),
    (&["deadlock"], Category::Deadlock),
];

/// Map a report title to a category. Total: unmatched titles are `Unknown`.
pub fn classify(title: &str) -> Category {
    let title = title.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| title.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Unknown)
}
