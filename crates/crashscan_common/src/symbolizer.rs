//! Symbolization hook.
//!
//! Address resolution lives outside this crate. Callers that have symbol
//! information implement [`Symbolizer`] and hand it to [`symbolize`].

use crate::report::Report;
use tracing::debug;

/// Resolves a code address to a function name
pub trait Symbolizer: Send + Sync {
    fn resolve(&self, address: u64) -> Option<String>;
}

/// Annotate the report's stack frames with function names.
///
/// With no symbol source this is a no-op and the report comes back as-is.
/// Frames that already carry a printed function name are left alone.
pub fn symbolize(mut report: Report, source: Option<&dyn Symbolizer>) -> Report {
    let Some(source) = source else {
        debug!("no symbol source configured, skipping symbolization");
        return report;
    };

    let mut resolved = 0usize;
    for frame in report.frames.iter_mut().filter(|f| f.function.is_none()) {
        if let Some(name) = frame.address.and_then(|addr| source.resolve(addr)) {
            frame.function = Some(name);
            resolved += 1;
        }
    }
    debug!(resolved, frames = report.frames.len(), "symbolized stack frames");
    report
}
