//! Per-target analysis facade.
//!
//! A `Reporter` is built once from the registry and config, then shared
//! (it is `Send + Sync`) by every worker that analyzes captured output.

use crate::config::ScanConfig;
use crate::detector::Detector;
use crate::error::Result;
use crate::parser::{ParseOptions, Parser};
use crate::report::Report;
use crate::signature::PatternSet;
use crate::symbolizer::{self, Symbolizer};
use crate::target::{TargetProfile, TargetRegistry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

pub struct Reporter {
    profile: Arc<dyn TargetProfile>,
    patterns: PatternSet,
    options: ParseOptions,
    kernel_obj: Option<PathBuf>,
}

impl Reporter {
    /// Reporter with the profile's own signatures and default knobs
    pub fn new(profile: Arc<dyn TargetProfile>) -> Self {
        let options = ParseOptions::new(profile.system_label(), profile.suspicious_keywords().clone());
        Self {
            patterns: profile.pattern_set().clone(),
            profile,
            options,
            kernel_obj: None,
        }
    }

    pub fn from_config(registry: &TargetRegistry, config: &ScanConfig) -> Result<Self> {
        config.validate()?;
        let mut reporter = Self::new(registry.get(&config.target)?);

        if !config.extra_signatures.is_empty() {
            reporter.patterns = reporter.patterns.extended(&config.extra_signatures)?;
        }
        if let Some(label) = &config.system_label {
            reporter.options.system_label = label.clone();
        }
        reporter.options.context_lines = config.context_lines;
        reporter.options.max_frames = config.max_frames;
        reporter.kernel_obj = config.kernel_obj.clone();

        info!(
            system = reporter.target(),
            signatures = reporter.patterns.len(),
            context_lines = config.context_lines,
            max_frames = config.max_frames,
            "reporter configured"
        );
        Ok(reporter)
    }

    pub fn target(&self) -> &str {
        self.profile.name()
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn kernel_obj(&self) -> Option<&Path> {
        self.kernel_obj.as_deref()
    }

    /// Cheap yes/no pre-filter
    pub fn contains_crash(&self, output: &[u8]) -> bool {
        Detector::new(&self.patterns).contains_crash(output)
    }

    /// Full analysis: parse, classify, then suggest relevant files
    pub fn parse(&self, output: &[u8]) -> Report {
        let label = &self.options.system_label;
        let mut report = Parser::new(&self.patterns, &self.options).parse(output);
        if report.has_crash() {
            report.category = self.profile.classify(report.title_subject(label));
        }
        report.relevant_files = self.profile.relevant_files(&report, label);
        report
    }

    /// Annotate stack frames when a kernel object is configured.
    ///
    /// Without `kernel_obj` (or without a symbol source) the report is
    /// returned unchanged.
    pub fn symbolize(&self, report: Report, source: Option<&dyn Symbolizer>) -> Report {
        if self.kernel_obj.is_none() {
            debug!(system = self.target(), "kernel_obj not configured");
            return report;
        }
        symbolizer::symbolize(report, source)
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("target", &self.target())
            .field("signatures", &self.patterns.len())
            .field("options", &self.options)
            .field("kernel_obj", &self.kernel_obj)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Category;
    use crate::error::ScanError;
    use crate::signature::{SignatureDef, SignatureKind};

    fn reporter(config: &ScanConfig) -> Reporter {
        let registry = TargetRegistry::with_builtin().unwrap();
        Reporter::from_config(&registry, config).unwrap()
    }

    #[test]
    fn test_reporter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Reporter>();
    }

    #[test]
    fn test_parse_fills_category_and_files() {
        let reporter = reporter(&ScanConfig::default());
        let report = reporter.parse(b"init: starting sh\npanic: freewalk: leaf\n");
        assert_eq!(report.title, "XV6 kernel panic: freewalk: leaf");
        assert_eq!(report.category, Category::KernelPanic);
        assert_eq!(report.relevant_files.len(), 9);
    }

    #[test]
    fn test_clean_report_has_default_files() {
        let reporter = reporter(&ScanConfig::default());
        let report = reporter.parse(b"hello world\n");
        assert_eq!(report.category, Category::Unknown);
        assert_eq!(report.relevant_files.len(), 9);
    }

    #[test]
    fn test_extra_signatures_and_label() {
        let config = ScanConfig {
            system_label: Some("xv6-riscv".to_string()),
            extra_signatures: vec![SignatureDef::new(
                r"usertrap\(\): (.+)",
                SignatureKind::Fault,
                "user trap",
            )],
            ..ScanConfig::default()
        };
        let reporter = reporter(&config);
        let input = b"usertrap(): unexpected scause 0xd pid=3\n";
        assert!(reporter.contains_crash(input));
        let report = reporter.parse(input);
        assert_eq!(report.title, "xv6-riscv user trap: unexpected scause 0xd pid=3");
    }

    #[test]
    fn test_system_label_does_not_steer_enrichment() {
        let config = ScanConfig {
            system_label: Some("xv6-fs-panic".to_string()),
            ..ScanConfig::default()
        };
        let reporter = reporter(&config);

        let report = reporter.parse(b"fatal error: out of inodes\n");
        assert_eq!(report.title, "xv6-fs-panic fatal error: out of inodes");
        assert_eq!(report.category, Category::Unknown);
        assert_eq!(report.relevant_files.len(), 9);

        let report = reporter.parse(b"panic: acquire\n");
        assert_eq!(report.category, Category::KernelPanic);
        assert_eq!(report.relevant_files.len(), 9);
    }

    #[test]
    fn test_detection_implies_title_with_blank_captures() {
        let reporter = reporter(&ScanConfig::default());
        for input in [
            &b"boot\r\npanic: \r\n"[..],
            b"panic:  \n",
            b"PANIC: \t\r\n",
            b"assertion failed:   \n",
        ] {
            assert!(!reporter.contains_crash(input), "flagged {:?}", input);
            assert!(reporter.parse(input).title.is_empty());
        }
        let input = b"boot\r\npanic: kfree\r\n";
        assert!(reporter.contains_crash(input));
        assert_eq!(reporter.parse(input).title, "XV6 kernel panic: kfree");
    }

    #[test]
    fn test_context_lines_from_config() {
        let config = ScanConfig {
            context_lines: 1,
            ..ScanConfig::default()
        };
        let reporter = reporter(&config);
        let report = reporter.parse(b"a\nb\nc\npanic: x\nd\ne\n");
        assert_eq!(report.body_text(), "c\n>>> panic: x <<<\nd");
    }

    #[test]
    fn test_bad_extra_signature_fails_at_config_time() {
        let registry = TargetRegistry::with_builtin().unwrap();
        let config = ScanConfig {
            extra_signatures: vec![SignatureDef::new("(", SignatureKind::Panic, "broken")],
            ..ScanConfig::default()
        };
        let err = Reporter::from_config(&registry, &config).unwrap_err();
        assert!(matches!(err, ScanError::InvalidSignature { .. }));
    }

    #[test]
    fn test_symbolize_without_kernel_obj_is_noop() {
        let reporter = reporter(&ScanConfig::default());
        let report = reporter.parse(b"backtrace:\n0x80002a3c\n");
        assert_eq!(reporter.symbolize(report.clone(), None), report);
    }

    struct OneSymbol;

    impl Symbolizer for OneSymbol {
        fn resolve(&self, address: u64) -> Option<String> {
            (address == 0x80002a3c).then(|| "kerneltrap".to_string())
        }
    }

    #[test]
    fn test_symbolize_with_kernel_obj() {
        let config = ScanConfig {
            kernel_obj: Some(PathBuf::from("/build/xv6/kernel/kernel")),
            ..ScanConfig::default()
        };
        let reporter = reporter(&config);
        let report = reporter.parse(b"backtrace:\n0x80002a3c\n0x80001000\n");

        // kernel_obj alone is not enough without a symbol source
        assert_eq!(reporter.symbolize(report.clone(), None), report);

        let symbolized = reporter.symbolize(report, Some(&OneSymbol));
        assert_eq!(symbolized.frames[0].function.as_deref(), Some("kerneltrap"));
        assert_eq!(symbolized.frames[1].function, None);
    }
}
