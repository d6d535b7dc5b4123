use crate::pdf::PdfDocument;
use crate::selection::{self, PageRun};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Turn an optional page selection into the runs to split into.
///
/// With a selection, invalid tokens are dropped by the parser and an empty
/// result is a user error. Without one, every page becomes its own run
/// (burst).
pub fn plan_runs(spec: Option<&str>, total_pages: u32) -> Result<Vec<PageRun>> {
    match spec {
        Some(spec) => {
            let selected = selection::parse(spec, total_pages);
            if selected.is_empty() {
                anyhow::bail!("No valid pages in selection: {:?}", spec);
            }
            Ok(selection::compact(&selected))
        }
        None => Ok((1..=total_pages).map(PageRun::single).collect()),
    }
}

/// Extract each run into its own PDF under `output_dir`, named by rendering
/// the run into `pattern` (the `{n}` placeholder becomes "7-9" or "5").
/// Outputs are written in ascending run order.
pub fn write_runs(
    doc: &PdfDocument,
    runs: &[PageRun],
    output_dir: &Path,
    pattern: &str,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let mut outputs = Vec::with_capacity(runs.len());
    for run in runs {
        let output_path = output_dir.join(format!("{}.pdf", run.render(pattern)));
        let pages: Vec<u32> = run.pages().collect();
        let mut new_doc = doc.extract_pages(&pages)?;
        PdfDocument::save(&mut new_doc, &output_path)?;
        outputs.push(output_path);
    }
    Ok(outputs)
}

pub fn default_pattern(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("pages");
    format!("{}_{{n}}", stem)
}

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    pages: Option<&str>,
    output_dir: Q,
    name_pattern: Option<&str>,
) -> Result<()> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();

    let doc = PdfDocument::open(input)?;
    let runs = plan_runs(pages, doc.page_count())?;

    let pattern = name_pattern
        .map(str::to_owned)
        .unwrap_or_else(|| default_pattern(input));
    let outputs = write_runs(&doc, &runs, output_dir, &pattern)?;

    let page_total: u32 = runs.iter().map(|r| r.end - r.start + 1).sum();
    println!(
        "Split {} page(s) into {} document(s) in {}",
        page_total,
        outputs.len(),
        output_dir.display()
    );

    Ok(())
}
