//! Line-oriented crash parser
//!
//! Scans the buffer one line at a time. On each trimmed line, signatures are
//! tried in priority order (panic, assert, fault, generic error, stack
//! marker) and the first hit ends the scan. If nothing matches, the whole
//! buffer is checked for suspicious keywords so anomalous output still
//! produces a low-confidence report.

use crate::context::{extract_context, DEFAULT_CONTEXT_LINES};
use crate::error::{Result, ScanError};
use crate::report::Report;
use crate::signature::{PatternSet, SignatureKind};
use crate::stack_trace::{collect_frames, extract_stack_trace, StackFrame, DEFAULT_MAX_FRAMES};
use regex::bytes::{RegexSet, RegexSetBuilder};
use tracing::debug;

/// Keywords that mark output as suspicious when no signature matched
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "trap",
    "interrupt",
    "exception",
    "fault",
    "error",
    "warning",
    "corruption",
    "invalid",
    "illegal",
    "unexpected",
];

/// Split a console buffer into the trimmed lines signatures are matched on
pub fn console_lines(output: &[u8]) -> impl Iterator<Item = &[u8]> {
    output.split(|&b| b == b'\n').map(<[u8]>::trim_ascii)
}

/// Compiled case-insensitive keyword matcher for the suspicious fallback
#[derive(Debug, Clone)]
pub struct KeywordSet {
    set: RegexSet,
}

impl KeywordSet {
    pub fn new(keywords: &[&str]) -> Result<Self> {
        let set = RegexSetBuilder::new(keywords.iter().map(|k| regex::escape(k)))
            .case_insensitive(true)
            .build()
            .map_err(|source| ScanError::InvalidSignature {
                pattern: keywords.join("|"),
                source,
            })?;
        Ok(Self { set })
    }

    /// True when any keyword occurs anywhere in `haystack`
    pub fn is_match(&self, haystack: &[u8]) -> bool {
        self.set.is_match(haystack)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

/// Per-target parsing knobs
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Title prefix naming the target system, e.g. "XV6"
    pub system_label: String,
    /// Lines shown on each side of a matched line
    pub context_lines: usize,
    /// Frame cap after a stack-trace marker
    pub max_frames: usize,
    pub suspicious_keywords: KeywordSet,
}

impl ParseOptions {
    pub fn new(system_label: &str, suspicious_keywords: KeywordSet) -> Self {
        Self {
            system_label: system_label.to_string(),
            context_lines: DEFAULT_CONTEXT_LINES,
            max_frames: DEFAULT_MAX_FRAMES,
            suspicious_keywords,
        }
    }
}

/// Crash parser bound to one pattern set
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    patterns: &'a PatternSet,
    options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(patterns: &'a PatternSet, options: &'a ParseOptions) -> Self {
        Self { patterns, options }
    }

    /// Parse one console buffer. Never fails; clean output gives an empty title.
    ///
    /// The returned report carries title, body, offsets, kind and frames.
    /// Category and relevant files are left for the target profile.
    pub fn parse(&self, output: &[u8]) -> Report {
        let mut report = Report::empty(output.to_vec());
        let lines: Vec<&[u8]> = output.split(|&b| b == b'\n').collect();

        let mut offset = 0usize;
        for (i, (raw, line)) in lines.iter().zip(console_lines(output)).enumerate() {
            for signature in self.patterns.in_priority_order() {
                let Some(captured) = signature.capture(line) else {
                    continue;
                };

                let kind = signature.kind();
                report.title = signature.title(&self.options.system_label, captured.as_deref());
                if kind == SignatureKind::StackMarker {
                    report.body = extract_stack_trace(&lines, i, self.options.max_frames);
                    report.frames = collect_frames(&lines, i, self.options.max_frames)
                        .into_iter()
                        .map(StackFrame::parse)
                        .collect();
                } else {
                    report.body = extract_context(&lines, i, self.options.context_lines);
                }
                report.kind = Some(kind);
                report.start_pos = offset;
                report.end_pos = offset.saturating_add(report.body.len()).min(output.len());

                debug!(
                    kind = %kind,
                    line = i,
                    start = report.start_pos,
                    "crash signature matched"
                );
                return report;
            }

            offset += raw.len() + 1;
        }

        if self.options.suspicious_keywords.is_match(output) {
            debug!("no signature matched; output contains suspicious keywords");
            report.title = format!("{} suspicious output", self.options.system_label);
            report.body = output.to_vec();
            report.start_pos = 0;
            report.end_pos = output.len();
        }

        report
    }
}
