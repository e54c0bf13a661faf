//! Report rendering - plain/colored text and JSON lines

use crashscan_common::{Category, Report};
use owo_colors::OwoColorize;
use serde::Serialize;

/// One analyzed input, as emitted in JSON mode
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub report: Report,
}

/// Single JSON line for a file report
pub fn render_json(file_report: &FileReport) -> serde_json::Result<String> {
    serde_json::to_string(file_report)
}

fn status_tag(report: &Report, color: bool) -> String {
    let (tag, severe) = if !report.has_crash() {
        ("[CLEAN]", false)
    } else if report.is_suspicious() {
        ("[SUSPICIOUS]", false)
    } else {
        ("[CRASH]", true)
    };

    match (color, report.has_crash(), severe) {
        (false, _, _) => tag.to_string(),
        (true, false, _) => tag.bright_green().to_string(),
        (true, true, false) => tag.yellow().to_string(),
        (true, true, true) => tag.bright_red().to_string(),
    }
}

/// Human-readable report, ASCII only
pub fn render_text(file_report: &FileReport, color: bool) -> String {
    let report = &file_report.report;
    let mut out = String::new();

    out.push_str(&format!("{}  {}\n", status_tag(report, color), file_report.file));
    if !report.has_crash() {
        return out;
    }

    let category = if color && report.category != Category::Unknown {
        report.category.cyan().to_string()
    } else {
        report.category.to_string()
    };
    out.push_str(&format!("  Title:    {}\n", report.title));
    out.push_str(&format!("  Category: {}\n", category));
    out.push_str(&format!("  Offsets:  {}..{}\n", report.start_pos, report.end_pos));

    if !report.relevant_files.is_empty() {
        out.push_str(&format!("  Files:    {}\n", report.relevant_files.join(", ")));
    }

    if !report.frames.is_empty() {
        out.push_str("  Frames:\n");
        for (i, frame) in report.frames.iter().enumerate() {
            match &frame.function {
                Some(function) => {
                    out.push_str(&format!("    #{:<2} {} ({})\n", i, frame.line.trim(), function))
                }
                None => out.push_str(&format!("    #{:<2} {}\n", i, frame.line.trim())),
            }
        }
    }

    // suspicious reports carry the whole capture; only show excerpts
    if !report.is_suspicious() {
        out.push_str("  Excerpt:\n");
        for line in report.body_text().lines() {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}
