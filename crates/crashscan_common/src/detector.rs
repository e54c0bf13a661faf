//! Cheap crash pre-filter.
//!
//! Answers "does any signature match any line?" without building a report.
//! Lines are split and trimmed exactly as the parser sees them, so a buffer
//! flagged here always parses to a titled report.

use crate::parser::console_lines;
use crate::signature::PatternSet;

/// Boolean crash test over a raw console buffer
#[derive(Debug, Clone, Copy)]
pub struct Detector<'a> {
    patterns: &'a PatternSet,
}

impl<'a> Detector<'a> {
    pub fn new(patterns: &'a PatternSet) -> Self {
        Self { patterns }
    }

    /// True if any signature matches some trimmed line, regardless of kind
    pub fn contains_crash(&self, output: &[u8]) -> bool {
        console_lines(output).any(|line| self.patterns.is_match(line))
    }
}
