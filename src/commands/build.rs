use crate::config::Layout;
use crate::index::{draw_heading, write_index, PageRegistry, RowPlacement};
use crate::pdf::PdfDocument;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Registry name of the index page itself. It never appears as a row.
pub const INDEX_PAGE_NAME: &str = "toc";

pub const DEFAULT_PAGE_NAMES: [&str; 3] = ["Page 1", "Page 2", "Page 3"];

/// What a build produced.
#[derive(Debug)]
pub struct BuildSummary {
    pub output: PathBuf,
    pub page_count: u32,
    pub rows: Vec<RowPlacement>,
}

/// `tableOfContentsReport<unix-seconds>.pdf` in the current directory
pub fn default_output() -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    PathBuf::from(format!("tableOfContentsReport{}.pdf", secs))
}

/// Create the index page followed by one headed content page per name,
/// then fill in the index.
pub fn assemble<S: AsRef<str>>(
    names: &[S],
    layout: &Layout,
) -> Result<(PdfDocument, Vec<RowPlacement>)> {
    let mut doc = PdfDocument::new();
    let mut registry = PageRegistry::new();

    let index_page = doc.append_page(layout.page_size);
    registry.register(INDEX_PAGE_NAME, index_page)?;

    for name in names {
        let name = name.as_ref();
        let page = doc.append_page(layout.page_size);
        draw_heading(&mut doc, page, name, layout)?;
        registry
            .register(name, page)
            .with_context(|| format!("Cannot add content page {:?}", name))?;
    }

    log::debug!(
        "registered pages: {:?}",
        registry.names().collect::<Vec<_>>()
    );

    let size = layout.page_size;
    let region = layout.table_region(size);
    log::info!(
        "left margin {} top margin {}",
        layout.side_margin,
        layout.top_margin
    );
    log::info!("table width {} table top {}", region.width, region.top);
    log::info!("index page {}x{}", size.width, size.height);

    let rows = write_index(&mut doc, index_page, names, &registry, layout)
        .context("Failed to build table of contents")?;
    Ok((doc, rows))
}

pub fn build<S: AsRef<str>>(names: &[S], layout: &Layout, output: &Path) -> Result<BuildSummary> {
    let (mut doc, rows) = assemble(names, layout)?;
    doc.save(output)
        .with_context(|| format!("Failed to save PDF: {}", output.display()))?;
    Ok(BuildSummary {
        output: output.to_path_buf(),
        page_count: doc.page_count(),
        rows,
    })
}

pub fn run(output: Option<&Path>, layout: Option<&Path>, pages: &[String]) -> Result<()> {
    let layout = match layout {
        Some(path) => Layout::load(path)?,
        None => Layout::default(),
    };
    let output = output.map(Path::to_path_buf).unwrap_or_else(default_output);

    let summary = if pages.is_empty() {
        build(&DEFAULT_PAGE_NAMES, &layout, &output)?
    } else {
        build(pages, &layout, &output)?
    };

    for row in &summary.rows {
        println!("{:<40} {:>4}", row.name, row.ordinal);
    }
    println!(
        "Wrote {} pages to {}",
        summary.page_count,
        summary.output.display()
    );

    Ok(())
}
