use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tocpdf")]
#[command(about = "Generate PDFs with a linked table of contents page")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a document: an index page followed by one page per name
    #[command(alias = "generate")]
    Build {
        /// Output file (default: tableOfContentsReport<epoch>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file overriding page size, margins and font sizes
        #[arg(short, long)]
        layout: Option<PathBuf>,

        /// Content page name, in index order; repeat for more pages
        /// (default: "Page 1", "Page 2", "Page 3")
        #[arg(short, long = "page")]
        pages: Vec<String>,
    },

    /// List the link annotations of a PDF and the pages they jump to
    Links {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Run as MCP server
    Mcp,
}
