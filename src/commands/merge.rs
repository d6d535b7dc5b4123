use anyhow::{Context, Result};
use lopdf::Document;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct MergeSummary {
    pub files: usize,
    pub pages: usize,
}

/// Expand the argument list into concrete PDF paths. Directory arguments are
/// scanned recursively for `.pdf` files, sorted per directory; plain paths
/// are taken as-is in argument order.
pub fn collect_inputs<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|path| {
                    path.extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
                })
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(input.to_path_buf());
        }
    }
    Ok(files)
}

/// Concatenate the given PDFs into `output`, in order. A single input is a
/// plain byte copy.
pub fn merge_into(files: &[PathBuf], output: &Path) -> Result<MergeSummary> {
    if files.is_empty() {
        anyhow::bail!("No input files specified");
    }

    if files.len() == 1 {
        std::fs::copy(&files[0], output).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                files[0].display(),
                output.display()
            )
        })?;
        let pages = Document::load(&files[0])
            .map(|doc| doc.get_pages().len())
            .unwrap_or(0);
        return Ok(MergeSummary { files: 1, pages });
    }

    let mut merged = Document::load(&files[0])
        .with_context(|| format!("Failed to load PDF: {}", files[0].display()))?;
    let mut total_pages = merged.get_pages().len();

    for file in &files[1..] {
        let doc = Document::load(file)
            .with_context(|| format!("Failed to load PDF: {}", file.display()))?;
        total_pages += doc.get_pages().len();

        for (_, page_id) in doc.get_pages() {
            // Renumber object IDs to avoid conflicts with the base document
            let new_id = (merged.max_id + 1, 0);
            merged.max_id += 1;

            if let Ok(page_obj) = doc.get_object(page_id) {
                merged.objects.insert(new_id, page_obj.clone());
                append_to_page_tree(&mut merged, new_id)?;
            }
        }
    }

    merged
        .save(output)
        .with_context(|| format!("Failed to save merged PDF: {}", output.display()))?;

    Ok(MergeSummary {
        files: files.len(),
        pages: total_pages,
    })
}

/// Register a copied page object under the base document's page tree,
/// growing Kids and Count.
fn append_to_page_tree(merged: &mut Document, page_id: lopdf::ObjectId) -> Result<()> {
    let pages_id = {
        let catalog = merged.catalog().context("Merged PDF has no catalog")?;
        match catalog.get(b"Pages") {
            Ok(lopdf::Object::Reference(id)) => *id,
            _ => anyhow::bail!("Merged PDF catalog has no Pages reference"),
        }
    };

    let pages_dict = merged
        .get_dictionary_mut(pages_id)
        .context("Merged PDF has no page tree dictionary")?;
    if let Ok(lopdf::Object::Array(kids)) = pages_dict.get_mut(b"Kids") {
        kids.push(lopdf::Object::Reference(page_id));
    }
    if let Ok(lopdf::Object::Integer(count)) = pages_dict.get_mut(b"Count") {
        *count += 1;
    }
    Ok(())
}

pub fn run<P: AsRef<Path>>(inputs: &[P], output: P) -> Result<()> {
    let files = collect_inputs(inputs)?;
    let summary = merge_into(&files, output.as_ref())?;

    if summary.files == 1 {
        println!("Copied 1 file to {}", output.as_ref().display());
    } else {
        println!(
            "Merged {} files ({} pages) into {}",
            summary.files,
            summary.pages,
            output.as_ref().display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::write_fixture_pdf;

    #[test]
    fn test_merge_concatenates_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.pdf");
        let b = dir.path().join("b.pdf");
        write_fixture_pdf(&a, 2);
        write_fixture_pdf(&b, 3);

        let output = dir.path().join("merged.pdf");
        let summary = merge_into(&[a, b], &output).unwrap();
        assert_eq!(summary.files, 2);
        assert_eq!(summary.pages, 5);

        let merged = Document::load(&output).unwrap();
        assert_eq!(merged.get_pages().len(), 5);
    }

    #[test]
    fn test_merge_single_input_is_a_copy() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.pdf");
        write_fixture_pdf(&a, 2);

        let output = dir.path().join("copy.pdf");
        let summary = merge_into(&[a.clone()], &output).unwrap();
        assert_eq!(summary.files, 1);
        assert_eq!(summary.pages, 2);
        assert_eq!(
            std::fs::read(&a).unwrap(),
            std::fs::read(&output).unwrap()
        );
    }

    #[test]
    fn test_merge_no_inputs_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(merge_into(&[], &dir.path().join("out.pdf")).is_err());
    }

    #[test]
    fn test_collect_inputs_expands_directories() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("docs");
        std::fs::create_dir(&sub).unwrap();
        write_fixture_pdf(&sub.join("b.pdf"), 1);
        write_fixture_pdf(&sub.join("a.pdf"), 1);
        std::fs::write(sub.join("notes.txt"), "not a pdf").unwrap();

        let files = collect_inputs(&[sub.clone()]).unwrap();
        assert_eq!(files, vec![sub.join("a.pdf"), sub.join("b.pdf")]);
    }
}
