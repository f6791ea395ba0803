// src/utils/span_debug.rs
use crate::extractors::section::{locate, SubsectionId};
use crate::utils::error::AppError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Wraps each `(start, end, label)` byte range of `text` in `[[label>> ... <<label]]`.
/// Ranges are expected not to overlap.
pub fn annotate_spans(text: &str, highlights: &[(usize, usize, String)]) -> String {
    let mut annotated = String::with_capacity(text.len() + highlights.len() * 24);
    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0); // Sort by position

    for (start, end, label) in sorted_highlights {
        if start < last_pos || end > text.len() {
            tracing::warn!("Skipping overlapping or out-of-range span {}..{} ({})", start, end, label);
            continue;
        }
        annotated.push_str(&text[last_pos..start]);
        annotated.push_str(&format!("[[{}>>", label));
        annotated.push_str(&text[start..end]);
        annotated.push_str(&format!("<<{}]]", label));
        last_pos = end;
    }

    annotated.push_str(&text[last_pos..]);
    annotated
}

/// Writes the normalized document with the located subsections marked, so the
/// locator's choice of start and boundary can be checked by eye.
pub fn save_span_debug(document: &str, filename: &Path, sections: &[SubsectionId]) -> Result<(), AppError> {
    let highlights: Vec<(usize, usize, String)> = sections
        .iter()
        .filter_map(|id| {
            let range = locate(document, id).range();
            if range.is_none() {
                tracing::debug!("Subsection {} not found, nothing to mark", id);
            }
            range.map(|r| (r.start, r.end, id.to_string()))
        })
        .collect();

    let mut file = File::create(filename)?;
    file.write_all(annotate_spans(document, &highlights).as_bytes())?;

    tracing::info!("Saved span debug text to {}", filename.display());
    Ok(())
}
