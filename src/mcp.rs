use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::commands::merge::{collect_inputs, merge_into};
use crate::commands::split::{default_pattern, plan_runs, write_runs};
use crate::pdf::document::compress_bytes;
use crate::pdf::text::extract_text_pages;
use crate::pdf::PdfDocument;
use crate::selection;

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SelectRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "Page selection (e.g. '1-3,5,7-9'); invalid tokens are ignored")]
    pub pages: String,
    #[schemars(description = "Output name pattern; '{n}' becomes the page run (default: '<stem>_{n}')")]
    pub name_pattern: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExtractRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Page selection (e.g. '1-3,5,7-9')")]
    pub pages: String,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SplitRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Page selection (e.g. '1-3,5,7-9'); omit to split every page")]
    pub pages: Option<String>,
    #[schemars(description = "Directory to write the output documents into")]
    pub output_dir: String,
    #[schemars(description = "Output name pattern; '{n}' becomes the page run (default: '<stem>_{n}')")]
    pub name_pattern: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MergeRequest {
    #[schemars(description = "PDF files or directories to merge, in order")]
    pub inputs: Vec<String>,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CompressRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReadPagesRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "Page selection (e.g. '1-3,5')")]
    pub pages: String,
}

#[derive(Debug, Clone)]
pub struct DocForgeServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl DocForgeServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for DocForgeServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl DocForgeServer {
    #[tool(description = "Get PDF metadata including title, author, creator, producer, creation date, and page count")]
    fn doc_info(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        match PdfDocument::open(&path) {
            Ok(doc) => {
                let info = doc.info();
                let result = DocInfoResult {
                    path,
                    page_count: info.page_count,
                    title: info.title,
                    author: info.author,
                    subject: info.subject,
                    keywords: info.keywords,
                    creator: info.creator,
                    producer: info.producer,
                    creation_date: info.creation_date,
                };
                to_json(&result)
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Preview a page selection: which pages it resolves to, the consecutive runs a split would produce, and the output names")]
    fn doc_select(&self, Parameters(req): Parameters<SelectRequest>) -> String {
        let doc = match PdfDocument::open(&req.path) {
            Ok(d) => d,
            Err(e) => return format!("Error: {}", e),
        };
        let total_pages = doc.page_count();

        let pages = selection::parse(&req.pages, total_pages);
        let pattern = req
            .name_pattern
            .unwrap_or_else(|| default_pattern(Path::new(&req.path)));

        let runs: Vec<RunResult> = selection::compact(&pages)
            .iter()
            .map(|run| RunResult {
                start: run.start,
                end: run.end,
                name: format!("{}.pdf", run.render(&pattern)),
            })
            .collect();

        to_json(&SelectResult {
            total_pages,
            pages,
            runs,
        })
    }

    #[tool(description = "Extract the selected pages from a PDF into a single new file")]
    fn doc_extract(&self, Parameters(req): Parameters<ExtractRequest>) -> String {
        let doc = match PdfDocument::open(&req.path) {
            Ok(d) => d,
            Err(e) => return format!("Error: {}", e),
        };

        let pages = selection::parse(&req.pages, doc.page_count());
        if pages.is_empty() {
            return format!("Error: No valid pages in selection: {:?}", req.pages);
        }

        let mut new_doc = match doc.extract_pages(&pages) {
            Ok(d) => d,
            Err(e) => return format!("Error: {}", e),
        };
        if let Err(e) = PdfDocument::save(&mut new_doc, &req.output) {
            return format!("Error: {}", e);
        }

        to_json(&ExtractResult {
            output_path: req.output,
            page_count: pages.len() as u32,
        })
    }

    #[tool(description = "Split a PDF into one document per consecutive page run. Omit the selection to split every page into its own document.")]
    fn doc_split(&self, Parameters(req): Parameters<SplitRequest>) -> String {
        let doc = match PdfDocument::open(&req.path) {
            Ok(d) => d,
            Err(e) => return format!("Error: {}", e),
        };

        let runs = match plan_runs(req.pages.as_deref(), doc.page_count()) {
            Ok(r) => r,
            Err(e) => return format!("Error: {}", e),
        };
        let pattern = req
            .name_pattern
            .unwrap_or_else(|| default_pattern(Path::new(&req.path)));

        match write_runs(&doc, &runs, Path::new(&req.output_dir), &pattern) {
            Ok(outputs) => to_json(&SplitResult {
                outputs: outputs
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            }),
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Combine multiple PDFs into one, in the given order. Directory inputs are scanned recursively for PDFs.")]
    fn doc_merge(&self, Parameters(req): Parameters<MergeRequest>) -> String {
        let inputs: Vec<PathBuf> = req.inputs.iter().map(PathBuf::from).collect();
        let files = match collect_inputs(&inputs) {
            Ok(f) => f,
            Err(e) => return format!("Error: {}", e),
        };

        match merge_into(&files, Path::new(&req.output)) {
            Ok(summary) => to_json(&MergeResult {
                output_path: req.output,
                file_count: summary.files as u32,
                page_count: summary.pages as u32,
            }),
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Compress a PDF by pruning unreferenced objects and compressing streams. Keeps the original bytes when no reduction is possible.")]
    fn doc_compress(&self, Parameters(req): Parameters<CompressRequest>) -> String {
        let original = match std::fs::read(&req.path) {
            Ok(b) => b,
            Err(e) => return format!("Error: Failed to read {}: {}", req.path, e),
        };
        let compressed = match compress_bytes(&original) {
            Ok(b) => b,
            Err(e) => return format!("Error: {}", e),
        };
        if let Err(e) = std::fs::write(&req.output, &compressed) {
            return format!("Error: Failed to write {}: {}", req.output, e);
        }

        to_json(&CompressResult {
            output_path: req.output,
            original_bytes: original.len() as u64,
            compressed_bytes: compressed.len() as u64,
            reduced: compressed.len() < original.len(),
        })
    }

    #[tool(description = "Extract text content from the selected pages of a PDF")]
    fn doc_read_pages(&self, Parameters(req): Parameters<ReadPagesRequest>) -> String {
        let doc = match PdfDocument::open(&req.path) {
            Ok(d) => d,
            Err(e) => return format!("Error: {}", e),
        };

        let pages = selection::parse(&req.pages, doc.page_count());
        if pages.is_empty() {
            return format!("Error: No valid pages in selection: {:?}", req.pages);
        }

        match extract_text_pages(&req.path, &pages) {
            Ok(texts) => {
                let result: Vec<PageTextResult> = texts
                    .into_iter()
                    .map(|t| PageTextResult {
                        page: t.page,
                        text: t.text,
                    })
                    .collect();
                to_json(&result)
            }
            Err(e) => format!("Error: {}", e),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("Error: {}", e))
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DocInfoResult {
    pub path: String,
    pub page_count: u32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SelectResult {
    pub total_pages: u32,
    pub pages: Vec<u32>,
    pub runs: Vec<RunResult>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct RunResult {
    pub start: u32,
    pub end: u32,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ExtractResult {
    pub output_path: String,
    pub page_count: u32,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SplitResult {
    pub outputs: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MergeResult {
    pub output_path: String,
    pub file_count: u32,
    pub page_count: u32,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CompressResult {
    pub output_path: String,
    pub original_bytes: u64,
    pub compressed_bytes: u64,
    pub reduced: bool,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PageTextResult {
    pub page: u32,
    pub text: String,
}

impl ServerHandler for DocForgeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF document utility tools. Use doc_info for metadata and page counts, \
                 doc_select to preview how a page selection resolves into output documents, \
                 doc_extract to pull selected pages into one file, doc_split to produce one \
                 document per consecutive page run, doc_merge to concatenate PDFs, \
                 doc_compress to shrink a PDF, and doc_read_pages to read page text."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = DocForgeServer::new();

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
