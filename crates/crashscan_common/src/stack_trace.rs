//! Stack trace extraction
//!
//! Starting at a "backtrace:" / "stack trace:" marker, greedily collect the
//! following lines while they look like frames. xv6 prints frames as bare
//! return addresses, `symbol+0xoff` pairs, or `function()` names.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Default cap on collected frames after the marker line
pub const DEFAULT_MAX_FRAMES: usize = 20;

/// One frame line from an extracted stack trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    /// Frame line as printed (lossy UTF-8, untrimmed)
    pub line: String,
    /// First hex address on the line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<u64>,
    /// Function name, either printed on the line or filled by a symbolizer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

impl StackFrame {
    pub fn parse(raw: &[u8]) -> Self {
        let line = String::from_utf8_lossy(raw).into_owned();
        let address = parse_hex_address(&line);
        let function = printed_function(line.trim());
        Self {
            line,
            address,
            function,
        }
    }
}

/// Frame-shape heuristic
pub fn looks_like_frame(line: &[u8]) -> bool {
    let line = String::from_utf8_lossy(line);
    let line = line.trim();

    // bare return address
    if line.len() > 2 && line.starts_with("0x") {
        return true;
    }

    // symbol+offset
    if line.contains('+') && line.contains("0x") {
        return true;
    }

    line.contains("()")
}

/// Frame lines following `marker`, excluding the marker itself.
///
/// Stops at the first blank or non-frame line, or after `max_frames` frames.
pub fn collect_frames<'a>(lines: &[&'a [u8]], marker: usize, max_frames: usize) -> Vec<&'a [u8]> {
    let mut frames = Vec::new();
    for line in lines.iter().skip(marker + 1).take(max_frames) {
        if line.trim_ascii().is_empty() || !looks_like_frame(line) {
            break;
        }
        frames.push(*line);
    }
    trace!(marker, frames = frames.len(), "collected stack frames");
    frames
}

/// Marker line plus collected frames, newline-joined
pub fn extract_stack_trace(lines: &[&[u8]], marker: usize, max_frames: usize) -> Vec<u8> {
    let Some(header) = lines.get(marker) else {
        return Vec::new();
    };

    let mut trace = header.to_vec();
    for frame in collect_frames(lines, marker, max_frames) {
        trace.push(b'\n');
        trace.extend_from_slice(frame);
    }
    trace
}

fn parse_hex_address(line: &str) -> Option<u64> {
    let start = line.find("0x")? + 2;
    let digits: String = line[start..]
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    u64::from_str_radix(&digits, 16).ok()
}

fn printed_function(line: &str) -> Option<String> {
    let name = if let Some(idx) = line.find("()") {
        &line[..idx]
    } else if let Some(idx) = line.find('+') {
        if !line[idx..].contains("0x") {
            return None;
        }
        &line[..idx]
    } else {
        return None;
    };

    // "0x80002a3c kerneltrap+0x12": keep the last whitespace-separated token
    let name = name.split_whitespace().last()?;
    if name.starts_with("0x") || !name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.') {
        return None;
    }
    Some(name.to_string())
}
