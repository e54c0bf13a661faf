//! Context window extraction around a matched line.

/// Default number of lines shown on each side of a match
pub const DEFAULT_CONTEXT_LINES: usize = 10;

/// Prefix placed before the matched line in an excerpt
pub const MATCH_OPEN: &[u8] = b">>> ";

/// Suffix placed after the matched line in an excerpt
pub const MATCH_CLOSE: &[u8] = b" <<<";

/// Return lines `[matched - window, matched + window]` (clipped to the
/// buffer), newline-joined, with the matched line wrapped in `>>> ... <<<`.
pub fn extract_context(lines: &[&[u8]], matched: usize, window: usize) -> Vec<u8> {
    if lines.is_empty() {
        return Vec::new();
    }
    let matched = matched.min(lines.len() - 1);
    let start = matched.saturating_sub(window);
    let end = matched.saturating_add(window).saturating_add(1).min(lines.len());

    let mut excerpt = Vec::new();
    for (i, line) in lines.iter().enumerate().take(end).skip(start) {
        if i > start {
            excerpt.push(b'\n');
        }
        if i == matched {
            excerpt.extend_from_slice(MATCH_OPEN);
            excerpt.extend_from_slice(line);
            excerpt.extend_from_slice(MATCH_CLOSE);
        } else {
            excerpt.extend_from_slice(line);
        }
    }
    excerpt
}
