use anyhow::{Context, Result};
use lopdf::{Document, Object};
use std::collections::HashSet;
use std::path::Path;

pub struct PdfDocument {
    pub doc: Document,
    #[allow(dead_code)]
    pub path: String,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let doc =
            Document::load(&path).with_context(|| format!("Failed to open PDF: {}", path_str))?;
        Ok(PdfDocument {
            doc,
            path: path_str,
        })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Read the document info dictionary
    pub fn info(&self) -> DocumentInfo {
        let mut info = DocumentInfo::default();

        if let Ok(Object::Reference(info_ref)) = self.doc.trailer.get(b"Info") {
            if let Ok(Object::Dictionary(dict)) = self.doc.get_object(*info_ref) {
                info.title = info_string(dict, b"Title");
                info.author = info_string(dict, b"Author");
                info.subject = info_string(dict, b"Subject");
                info.keywords = info_string(dict, b"Keywords");
                info.creator = info_string(dict, b"Creator");
                info.producer = info_string(dict, b"Producer");
                info.creation_date = info_string(dict, b"CreationDate");
                info.mod_date = info_string(dict, b"ModDate");
            }
        }

        info.page_count = self.page_count();
        info
    }

    /// Build a new document containing exactly the given 1-based pages.
    ///
    /// Deletes the complement in reverse order so page numbers stay stable
    /// while deleting, then prunes objects that are no longer referenced.
    pub fn extract_pages(&self, pages: &[u32]) -> Result<Document> {
        let total = self.page_count();

        for &page in pages {
            if page == 0 || page > total {
                anyhow::bail!("Page {} is out of range (1-{})", page, total);
            }
        }

        let keep: HashSet<u32> = pages.iter().copied().collect();
        let mut to_delete: Vec<u32> = (1..=total).filter(|p| !keep.contains(p)).collect();
        to_delete.reverse();

        let mut new_doc = self.doc.clone();
        for page_num in to_delete {
            new_doc.delete_pages(&[page_num]);
        }
        new_doc.prune_objects();

        Ok(new_doc)
    }

    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
        doc.save(&path)
            .with_context(|| format!("Failed to save PDF: {}", path.as_ref().display()))?;
        Ok(())
    }
}

/// Re-save a document with unreferenced objects pruned and content streams
/// compressed. When the rewrite does not come out smaller, the original
/// bytes are returned unchanged so compression never grows a document.
pub fn compress_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut doc = Document::load_mem(bytes).context("Failed to parse PDF")?;
    doc.prune_objects();
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .context("Failed to serialize compressed PDF")?;

    if buffer.len() < bytes.len() {
        Ok(buffer)
    } else {
        Ok(bytes.to_vec())
    }
}

#[derive(Debug, Default, Clone)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub mod_date: Option<String>,
    pub page_count: u32,
}

fn info_string(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key) {
        Ok(Object::String(bytes, _)) => decode_pdf_string(bytes),
        _ => None,
    }
}

fn decode_pdf_string(bytes: &[u8]) -> Option<String> {
    if bytes.starts_with(&[0xFE, 0xFF]) {
        // UTF-16 BE with BOM
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).ok()
    } else {
        // PDFDocEncoding, treated as Latin-1
        Some(bytes.iter().map(|&b| b as char).collect())
    }
}
