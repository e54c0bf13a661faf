//! Suspected source modules for a crash.
//!
//! Advisory only. Nothing here feeds back into detection or classification.

use crate::report::Report;

/// Keyword rule: if any keyword occurs in the lower-cased title, suggest `files`
#[derive(Debug, Clone, Copy)]
pub struct FileRule {
    pub keywords: &'static [&'static str],
    pub files: &'static [&'static str],
}

/// Ordered keyword rules plus the fallback "core" module list of a target
#[derive(Debug, Clone, Copy)]
pub struct RelevantFileMap {
    pub core: &'static [&'static str],
    pub rules: &'static [FileRule],
}

impl RelevantFileMap {
    /// Files for a title. Empty title or no matching rule gives the core set.
    pub fn for_title(&self, title: &str) -> Vec<String> {
        if title.is_empty() {
            return to_owned(self.core);
        }

        let title = title.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| title.contains(k)))
            .map(|rule| to_owned(rule.files))
            .unwrap_or_else(|| to_owned(self.core))
    }

    /// Files for a report, matching rules on the title minus `system_label`
    pub fn for_report(&self, report: &Report, system_label: &str) -> Vec<String> {
        self.for_title(report.title_subject(system_label))
    }
}

fn to_owned(files: &[&str]) -> Vec<String> {
    files.iter().map(|f| f.to_string()).collect()
}
