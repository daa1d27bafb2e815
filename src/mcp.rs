use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::commands::build::{build, DEFAULT_PAGE_NAMES};
use crate::config::Layout;
use crate::pdf::links::extract_links;

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BuildIndexRequest {
    #[schemars(description = "Output PDF file path")]
    pub output: String,
    #[schemars(description = "Content page names in index order (default: Page 1, Page 2, Page 3)")]
    #[serde(default)]
    pub pages: Vec<String>,
    #[schemars(description = "Optional path to a JSON layout file")]
    #[serde(default)]
    pub layout: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct TocServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl TocServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for TocServer {
    fn default() -> Self {
        Self::new()
    }
}

fn build_index(req: BuildIndexRequest) -> Result<BuildResult> {
    let layout = match &req.layout {
        Some(path) => Layout::load(path)?,
        None => Layout::default(),
    };
    let output = PathBuf::from(&req.output);
    let summary = if req.pages.is_empty() {
        build(&DEFAULT_PAGE_NAMES, &layout, &output)?
    } else {
        build(&req.pages, &layout, &output)?
    };

    Ok(BuildResult {
        output_path: req.output,
        page_count: summary.page_count,
        rows: summary
            .rows
            .into_iter()
            .map(|r| IndexRowResult {
                name: r.name,
                page: r.ordinal,
                rect: r.geometry.to_rect().to_array(),
            })
            .collect(),
    })
}

#[tool_router]
impl TocServer {
    #[tool(description = "Create a PDF whose first page is a table of contents linking to one page per name")]
    fn build_index(&self, Parameters(req): Parameters<BuildIndexRequest>) -> String {
        match build_index(req) {
            Ok(result) => {
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {:#}", e),
        }
    }

    #[tool(description = "List the link annotations in a PDF with their rectangles and destination pages")]
    fn list_links(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        match extract_links(&path) {
            Ok(links) => {
                let result: Vec<LinkResult> = links
                    .into_iter()
                    .map(|l| LinkResult {
                        page: l.page,
                        rect: l.rect,
                        target: l.target,
                    })
                    .collect();
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct IndexRowResult {
    pub name: String,
    pub page: u32,
    pub rect: [f32; 4],
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct BuildResult {
    pub output_path: String,
    pub page_count: u32,
    pub rows: Vec<IndexRowResult>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct LinkResult {
    pub page: u32,
    pub rect: [f32; 4],
    pub target: Option<u32>,
}

impl ServerHandler for TocServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Table of contents PDF tools. Use build_index to generate a document with a \
                 linked index page, and list_links to check where each link in a PDF points."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = TocServer::new();

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
