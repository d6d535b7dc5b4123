use crate::pdf::document::compress_bytes;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    let original = std::fs::read(input)
        .with_context(|| format!("Failed to read PDF: {}", input.display()))?;
    let compressed = compress_bytes(&original)
        .with_context(|| format!("Failed to compress PDF: {}", input.display()))?;
    std::fs::write(output, &compressed)
        .with_context(|| format!("Failed to write PDF: {}", output.display()))?;

    if compressed.len() < original.len() {
        let saved = 100 - (compressed.len() * 100 / original.len());
        println!(
            "Compressed {} -> {} bytes (~{}% smaller) into {}",
            original.len(),
            compressed.len(),
            saved,
            output.display()
        );
    } else {
        println!(
            "No size reduction found; wrote original {} bytes to {}",
            original.len(),
            output.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::write_fixture_pdf;
    use lopdf::Document;

    #[test]
    fn test_compress_output_is_loadable_with_same_pages() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.pdf");
        write_fixture_pdf(&input, 4);

        let output = dir.path().join("small.pdf");
        run(&input, &output).unwrap();

        let doc = Document::load(&output).unwrap();
        assert_eq!(doc.get_pages().len(), 4);
        let original_len = std::fs::metadata(&input).unwrap().len();
        let output_len = std::fs::metadata(&output).unwrap().len();
        assert!(output_len <= original_len);
    }

    #[test]
    fn test_compress_rejects_non_pdf_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("junk.pdf");
        std::fs::write(&input, b"not a pdf at all").unwrap();

        assert!(run(&input, dir.path().join("out.pdf")).is_err());
    }
}
