//! Crash report produced from one captured console buffer.

use crate::classifier::Category;
use crate::signature::SignatureKind;
use crate::stack_trace::StackFrame;
use serde::{Serialize, Serializer};
use std::borrow::Cow;

/// Structured result of analyzing one console buffer.
///
/// Invariant: `start_pos <= end_pos <= output.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Raw input buffer
    #[serde(skip)]
    pub output: Vec<u8>,

    /// Human-readable title; empty when nothing was found
    pub title: String,

    /// Excerpt (context window, stack trace, or the whole output)
    #[serde(serialize_with = "lossy_utf8")]
    pub body: Vec<u8>,

    /// Byte offset of the matched line in `output`
    pub start_pos: usize,

    /// `start_pos + body.len()`, clamped to `output.len()`
    pub end_pos: usize,

    /// Kind of the signature that matched (None for fallback or clean output)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<SignatureKind>,

    pub category: Category,

    pub relevant_files: Vec<String>,

    /// Frames collected after a stack-trace marker
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<StackFrame>,
}

impl Report {
    /// Report with no findings for `output`
    pub fn empty(output: Vec<u8>) -> Self {
        Self {
            output,
            title: String::new(),
            body: Vec::new(),
            start_pos: 0,
            end_pos: 0,
            kind: None,
            category: Category::Unknown,
            relevant_files: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// True if either a signature matched or the suspicious fallback fired
    pub fn has_crash(&self) -> bool {
        !self.title.is_empty()
    }

    /// True when only the keyword fallback produced this report
    pub fn is_suspicious(&self) -> bool {
        self.has_crash() && self.kind.is_none()
    }

    /// Title without the leading system label, so a label such as
    /// "xv6-fs" cannot steer keyword rules. Titles not carrying the label
    /// are returned whole.
    pub fn title_subject(&self, system_label: &str) -> &str {
        self.title
            .strip_prefix(system_label)
            .and_then(|rest| rest.strip_prefix(' '))
            .unwrap_or(&self.title)
    }

    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

fn lossy_utf8<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}
