use crate::pdf::{self, PdfDocument};
use crate::selection;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P, pages: &str) -> Result<()> {
    let doc = PdfDocument::open(&path)?;
    let page_list = selection::parse(pages, doc.page_count());

    if page_list.is_empty() {
        anyhow::bail!("No valid pages in selection: {:?}", pages);
    }

    let texts = pdf::text::extract_text_pages(&path, &page_list)?;
    for page_text in texts {
        println!("--- Page {} ---", page_text.page);
        println!("{}", page_text.text);
        println!();
    }

    Ok(())
}
