//! Crash signatures and the immutable PatternSet built from them.
//!
//! A signature is a byte regex with at most one capture group, tagged with
//! a kind (which decides its priority tier in the parser) and a label used
//! to build the report title. Stack-marker signatures are literal
//! substrings and are escaped before compilation.

use crate::error::{Result, ScanError};
use regex::bytes::{Regex, RegexSet};
use serde::{Deserialize, Serialize};

// ============================================================================
// Signature Kind
// ============================================================================

/// Class of crash message a signature recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureKind {
    Panic,
    Assert,
    Fault,
    GenericError,
    StackMarker,
}

impl SignatureKind {
    /// Parser tiers, highest priority first
    pub const PRIORITY: [SignatureKind; 5] = [
        SignatureKind::Panic,
        SignatureKind::Assert,
        SignatureKind::Fault,
        SignatureKind::GenericError,
        SignatureKind::StackMarker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureKind::Panic => "panic",
            SignatureKind::Assert => "assert",
            SignatureKind::Fault => "fault",
            SignatureKind::GenericError => "generic_error",
            SignatureKind::StackMarker => "stack_marker",
        }
    }

    /// Position in the parser's priority order (0 = tried first)
    pub fn tier(&self) -> usize {
        match self {
            SignatureKind::Panic => 0,
            SignatureKind::Assert => 1,
            SignatureKind::Fault => 2,
            SignatureKind::GenericError => 3,
            SignatureKind::StackMarker => 4,
        }
    }
}

impl std::fmt::Display for SignatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Signature Definition (configuration form)
// ============================================================================

/// Uncompiled signature, as written in built-in tables or config files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureDef {
    /// Regex source (literal text for stack markers)
    pub pattern: String,
    pub kind: SignatureKind,
    /// Title label, e.g. "kernel panic"
    pub label: String,
}

impl SignatureDef {
    pub fn new(pattern: &str, kind: SignatureKind, label: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            kind,
            label: label.to_string(),
        }
    }

    /// Compile into a matcher, failing fast on bad definitions
    pub fn compile(&self) -> Result<Signature> {
        if self.label.trim().is_empty() {
            return Err(ScanError::EmptyLabel {
                pattern: self.pattern.clone(),
            });
        }

        let source = match self.kind {
            SignatureKind::StackMarker => regex::escape(&self.pattern),
            _ => self.pattern.clone(),
        };

        let matcher = Regex::new(&source).map_err(|e| ScanError::InvalidSignature {
            pattern: self.pattern.clone(),
            source: e,
        })?;

        // captures_len counts the implicit whole-match group
        let groups = matcher.captures_len() - 1;
        if groups > 1 {
            return Err(ScanError::TooManyCaptureGroups {
                pattern: self.pattern.clone(),
                groups,
            });
        }

        Ok(Signature {
            matcher,
            source,
            kind: self.kind,
            label: self.label.clone(),
        })
    }
}

// ============================================================================
// Compiled Signature
// ============================================================================

/// A compiled crash signature
#[derive(Debug, Clone)]
pub struct Signature {
    matcher: Regex,
    source: String,
    kind: SignatureKind,
    label: String,
}

impl Signature {
    pub fn kind(&self) -> SignatureKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Regex source this signature was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, haystack: &[u8]) -> bool {
        self.matcher.is_match(haystack)
    }

    /// Match a single line.
    ///
    /// Returns `None` when the line does not match, otherwise the text of
    /// the capture group (if the signature has one).
    pub fn capture(&self, line: &[u8]) -> Option<Option<String>> {
        let caps = self.matcher.captures(line)?;
        Some(
            caps.get(1)
                .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned()),
        )
    }

    /// Build the report title for a match of this signature
    pub fn title(&self, system: &str, captured: Option<&str>) -> String {
        match (self.kind, captured) {
            (SignatureKind::StackMarker, _) => format!("{} stack trace", system),
            (_, Some(text)) => format!("{} {}: {}", system, self.label, text),
            (_, None) => format!("{} {}", system, self.label),
        }
    }
}

// ============================================================================
// PatternSet
// ============================================================================

/// Ordered, immutable collection of crash signatures.
///
/// List order is significant: within one kind tier, earlier signatures are
/// tried first.
#[derive(Debug, Clone)]
pub struct PatternSet {
    signatures: Vec<Signature>,
    /// Indices into `signatures`, sorted by tier then list order
    scan_order: Vec<usize>,
    any: RegexSet,
}

impl PatternSet {
    /// Compile a pattern set from definitions
    pub fn new(defs: &[SignatureDef]) -> Result<Self> {
        let signatures = defs
            .iter()
            .map(SignatureDef::compile)
            .collect::<Result<Vec<_>>>()?;
        Self::from_signatures(signatures)
    }

    fn from_signatures(signatures: Vec<Signature>) -> Result<Self> {
        let any = RegexSet::new(signatures.iter().map(|s| s.source.as_str())).map_err(|e| {
            ScanError::InvalidSignature {
                pattern: "<pattern set>".to_string(),
                source: e,
            }
        })?;

        let mut scan_order: Vec<usize> = (0..signatures.len()).collect();
        // sort_by_key is stable, so list order survives inside each tier
        scan_order.sort_by_key(|&i| signatures[i].kind.tier());

        Ok(Self {
            signatures,
            scan_order,
            any,
        })
    }

    /// New set with extra signatures appended after the existing ones
    pub fn extended(&self, defs: &[SignatureDef]) -> Result<Self> {
        let mut signatures = self.signatures.clone();
        for def in defs {
            signatures.push(def.compile()?);
        }
        Self::from_signatures(signatures)
    }

    /// True if any signature matches anywhere in the buffer
    pub fn is_match(&self, haystack: &[u8]) -> bool {
        self.any.is_match(haystack)
    }

    /// Signatures in parser priority order
    pub fn in_priority_order(&self) -> impl Iterator<Item = &Signature> {
        self.scan_order.iter().map(move |&i| &self.signatures[i])
    }

    /// Signatures in list order
    pub fn iter(&self) -> impl Iterator<Item = &Signature> {
        self.signatures.iter()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
