use anyhow::{Context, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct PageText {
    pub page: u32,
    pub text: String,
}

/// Extract text for specific 1-based pages of a PDF.
///
/// pdf-extract has no per-page API, so the whole document is extracted once
/// and split on the form-feed page separators it emits. Pages past the last
/// separator fall back to empty text rather than failing.
pub fn extract_text_pages<P: AsRef<Path>>(path: P, pages: &[u32]) -> Result<Vec<PageText>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read PDF: {}", path.display()))?;

    let doc = lopdf::Document::load_mem(&bytes)
        .with_context(|| format!("Failed to parse PDF: {}", path.display()))?;
    let total_pages = doc.get_pages().len() as u32;

    for &page in pages {
        if page == 0 || page > total_pages {
            anyhow::bail!("Page {} is out of range (1-{})", page, total_pages);
        }
    }

    let full_text = pdf_extract::extract_text_from_mem(&bytes)
        .with_context(|| format!("Failed to extract text from PDF: {}", path.display()))?;
    let page_texts: Vec<&str> = full_text.split('\x0C').collect();

    Ok(pages
        .iter()
        .map(|&page| PageText {
            page,
            text: page_texts
                .get((page - 1) as usize)
                .map(|t| t.to_string())
                .unwrap_or_default(),
        })
        .collect())
}
