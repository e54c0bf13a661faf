//! xv6 target profile
//!
//! xv6 prints short, single-line kernel messages (`panic: acquire`,
//! `scause 0x...`), so the signature table is small. Relevant files point
//! into the xv6-riscv `kernel/` tree.

use super::TargetProfile;
use crate::error::Result;
use crate::parser::{KeywordSet, SUSPICIOUS_KEYWORDS};
use crate::relevant_files::{FileRule, RelevantFileMap};
use crate::report::Report;
use crate::signature::{PatternSet, SignatureDef, SignatureKind};

pub const XV6_TARGET: &str = "xv6";
pub const XV6_LABEL: &str = "XV6";

/// Built-in xv6 signatures, in match order
pub fn xv6_signatures() -> Vec<SignatureDef> {
    use SignatureKind::*;
    vec![
        // Kernel panics
        SignatureDef::new(r"panic: (.+)", Panic, "kernel panic"),
        SignatureDef::new(r"PANIC: (.+)", Panic, "kernel panic"),
        // Assertion failures
        SignatureDef::new(r"assertion failed: (.+)", Assert, "assertion failed"),
        SignatureDef::new(r"assert\((.+)\) failed", Assert, "assertion failed"),
        // Page faults and memory errors
        SignatureDef::new(r"page fault: (.+)", Fault, "page fault"),
        SignatureDef::new(r"segmentation fault: (.+)", Fault, "segmentation fault"),
        SignatureDef::new(r"invalid memory access: (.+)", Fault, "invalid memory access"),
        SignatureDef::new(r"stack overflow", Fault, "stack overflow"),
        // General errors
        SignatureDef::new(r"deadlock detected", GenericError, "deadlock detected"),
        SignatureDef::new(r"kernel error: (.+)", GenericError, "kernel error"),
        SignatureDef::new(r"fatal error: (.+)", GenericError, "fatal error"),
        // Stack trace headers (literal)
        SignatureDef::new("backtrace:", StackMarker, "stack trace"),
        SignatureDef::new("stack trace:", StackMarker, "stack trace"),
    ]
}

pub const XV6_FILES: RelevantFileMap = RelevantFileMap {
    core: &[
        "kernel/main.c",
        "kernel/vm.c",
        "kernel/proc.c",
        "kernel/syscall.c",
        "kernel/trap.c",
        "kernel/fs.c",
        "kernel/bio.c",
        "kernel/sleeplock.c",
        "kernel/spinlock.c",
    ],
    rules: &[
        FileRule {
            keywords: &["vm", "memory", "page"],
            files: &["kernel/vm.c", "kernel/kalloc.c"],
        },
        FileRule {
            keywords: &["proc", "process"],
            files: &["kernel/proc.c", "kernel/swtch.S"],
        },
        FileRule {
            keywords: &["syscall"],
            files: &["kernel/syscall.c", "kernel/sysproc.c"],
        },
        FileRule {
            keywords: &["fs", "file"],
            files: &["kernel/fs.c", "kernel/file.c", "kernel/bio.c"],
        },
        FileRule {
            keywords: &["lock"],
            files: &["kernel/spinlock.c", "kernel/sleeplock.c"],
        },
    ],
};

/// Analyzer profile for the xv6 teaching kernel
#[derive(Debug, Clone)]
pub struct Xv6Profile {
    patterns: PatternSet,
    keywords: KeywordSet,
}

impl Xv6Profile {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: PatternSet::new(&xv6_signatures())?,
            keywords: KeywordSet::new(SUSPICIOUS_KEYWORDS)?,
        })
    }
}

impl TargetProfile for Xv6Profile {
    fn name(&self) -> &str {
        XV6_TARGET
    }

    fn system_label(&self) -> &str {
        XV6_LABEL
    }

    fn pattern_set(&self) -> &PatternSet {
        &self.patterns
    }

    fn relevant_files(&self, report: &Report, system_label: &str) -> Vec<String> {
        XV6_FILES.for_report(report, system_label)
    }

    fn suspicious_keywords(&self) -> &KeywordSet {
        &self.keywords
    }
}
