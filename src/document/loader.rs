// src/document/loader.rs
use crate::utils::error::DocumentError;
use std::path::Path;

/// Returns true when the path looks like a PDF (extension check only).
fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Reads the raw text of an SPC document.
///
/// PDFs are run through `pdf-extract`, which yields the text of every page in
/// document order. Anything else is treated as already-extracted UTF-8 text.
/// An empty result is returned as-is; the analyzers turn it into "unknown".
pub async fn load_raw_text(path: &Path) -> Result<String, DocumentError> {
    if !tokio::fs::try_exists(path).await? {
        return Err(DocumentError::NotFound(path.display().to_string()));
    }

    let text = if is_pdf(path) {
        let bytes = tokio::fs::read(path).await?;
        tracing::info!("Extracting text from PDF {} ({} bytes)", path.display(), bytes.len());

        // pdf-extract is synchronous and CPU bound
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| DocumentError::Task(e.to_string()))?
            .map_err(|e| DocumentError::Pdf(e.to_string()))?
    } else {
        tracing::info!("Reading plain text document {}", path.display());
        tokio::fs::read_to_string(path).await?
    };

    if text.trim().is_empty() {
        tracing::warn!("Document {} produced no text; results will be empty", path.display());
    } else {
        tracing::debug!("Loaded {} bytes of text from {}", text.len(), path.display());
    }

    Ok(text)
}
