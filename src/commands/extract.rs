use crate::pdf::PdfDocument;
use crate::selection;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, pages: &str, output: Q) -> Result<()> {
    let doc = PdfDocument::open(&input)?;
    let page_list = selection::parse(pages, doc.page_count());

    if page_list.is_empty() {
        anyhow::bail!("No valid pages in selection: {:?}", pages);
    }

    let mut new_doc = doc.extract_pages(&page_list)?;
    PdfDocument::save(&mut new_doc, &output)?;

    println!(
        "Extracted {} page(s) to {}",
        page_list.len(),
        output.as_ref().display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::write_fixture_pdf;
    use lopdf::Document;

    #[test]
    fn test_extract_selected_pages() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.pdf");
        write_fixture_pdf(&input, 6);

        let output = dir.path().join("subset.pdf");
        run(&input, "2-3,6", &output).unwrap();

        let doc = Document::load(&output).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_extract_all_tokens_invalid_is_user_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.pdf");
        write_fixture_pdf(&input, 3);

        let result = run(&input, "9-12,abc", dir.path().join("subset.pdf"));
        assert!(result.is_err());
    }
}
