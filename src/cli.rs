use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docforge")]
#[command(about = "PDF document utility: merge, split, and compress")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Display PDF metadata and page count
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Combine multiple PDFs into one
    Merge {
        /// PDF files or directories to merge (directories are scanned recursively)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Split a PDF into one document per consecutive page run
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Page selection (e.g. "1-3,5,7-9"); invalid tokens are ignored.
        /// Omit to split every page into its own document.
        #[arg(short, long)]
        pages: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Output name pattern; "{n}" becomes the page run, e.g. "7-9" or "5".
        /// Defaults to "<input stem>_{n}".
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Rewrite a PDF with pruned objects and compressed streams
    Compress {
        /// PDF file to compress
        path: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Extract selected pages into a single new PDF
    Extract {
        /// PDF file to extract from
        path: PathBuf,

        /// Page selection (e.g. "1-3,5,7-9")
        pages: String,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print text from selected pages
    Text {
        /// PDF file to read
        path: PathBuf,

        /// Page selection (e.g. "1-3,5")
        pages: String,
    },
}
