// src/utils/text_debug.rs
use crate::extractors::keywords::KeywordTable;
use crate::extractors::section::heading_regex;
use crate::utils::error::{AppError, ExtractError};
use std::fs;
use std::path::Path;

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Finds every line that would be recognized as a section heading, labelled
/// with the first keyword group that claims it. Spans start at the first
/// non-whitespace character of the line.
pub fn find_heading_lines(text: &str, table: &KeywordTable) -> Result<Vec<(usize, usize, &'static str)>, ExtractError> {
    let mut highlights = Vec::new();
    for (label, keywords) in table.groups() {
        let re = heading_regex(keywords.iter())?;
        for mat in re.find_iter(text) {
            let leading = mat.as_str().len() - mat.as_str().trim_start().len();
            highlights.push((mat.start() + leading, mat.end(), label));
        }
    }

    // Keep the earliest group for lines claimed by more than one
    highlights.sort_by_key(|h| h.0);
    let mut last_end = 0;
    highlights.retain(|(start, end, _)| {
        if *start < last_end {
            return false;
        }
        last_end = *end;
        true
    });
    Ok(highlights)
}

/// Renders the document as HTML with the given spans highlighted
pub fn render_debug_html(text: &str, highlights: &[(usize, usize, &str)]) -> String {
    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");

    // CSS for highlight colors
    debug_html.push_str("body { font-family: monospace; white-space: pre-wrap; }\n");
    debug_html.push_str(".highlight-education { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-experience { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-skills { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-certifications { background-color: #FFA500; }\n");
    debug_html.push_str(".highlight-other { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    let mut last_pos = 0;
    for (start, end, label) in highlights {
        if *start > last_pos {
            debug_html.push_str(&escape_html(&text[last_pos..*start]));
        }
        debug_html.push_str(&format!(
            "<span class=\"highlight-{}\" title=\"Position: {}-{}, Section: {}\">",
            label, start, end, label
        ));
        debug_html.push_str(&escape_html(&text[*start..*end]));
        debug_html.push_str("</span>");
        last_pos = *end;
    }

    if last_pos < text.len() {
        debug_html.push_str(&escape_html(&text[last_pos..]));
    }

    debug_html.push_str("\n</body>\n</html>");
    debug_html
}

/// Debug output name for the `index`-th input document. The index and the
/// full file name (extension included) keep same-named inputs apart.
pub fn debug_file_name(index: usize, document_name: &str) -> String {
    format!("{:03}_{}_headings.html", index, document_name)
}

/// Writes an annotated copy of a document showing where headings were detected
pub fn save_heading_debug(text: &str, path: &Path, table: &KeywordTable) -> Result<usize, AppError> {
    let highlights = find_heading_lines(text, table)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_debug_html(text, &highlights))?;

    tracing::info!("Saved debug HTML with {} heading(s) to {}", highlights.len(), path.display());
    Ok(highlights.len())
}
