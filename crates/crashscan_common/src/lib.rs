//! crashscan common - crash detection for captured kernel console output
//!
//! Turns raw console/log text from a target under test into a structured
//! crash report: title, excerpt, stack frames, category and a short list of
//! suspected source files.
//!
//! Flow: bytes -> Detector (optional pre-filter) -> Parser -> Report ->
//! classifier -> relevant files. Everything after configuration is total.

pub mod classifier;
pub mod config;
pub mod context;
pub mod detector;
pub mod error;
pub mod parser;
pub mod relevant_files;
pub mod report;
pub mod reporter;
pub mod signature;
pub mod stack_trace;
pub mod symbolizer;
pub mod target;

pub use classifier::{classify, Category};
pub use config::ScanConfig;
pub use detector::Detector;
pub use error::{Result, ScanError};
pub use parser::{KeywordSet, ParseOptions, Parser};
pub use report::Report;
pub use reporter::Reporter;
pub use signature::{PatternSet, Signature, SignatureDef, SignatureKind};
pub use stack_trace::StackFrame;
pub use symbolizer::Symbolizer;
pub use target::{TargetProfile, TargetRegistry, Xv6Profile};
