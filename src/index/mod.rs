//! Index (table of contents) page generation.
//!
//! [`write_index`] is the entry point: it lays out one row per named page,
//! then links every row to its page.

pub mod builder;
pub mod placer;
pub mod registry;
pub mod resolver;

pub use builder::{IndexTableBuilder, RowPlacement};
pub use placer::LinkAnnotationPlacer;
pub use registry::PageRegistry;

use crate::config::Layout;
use crate::error::IndexError;
use crate::pdf::font::Font;
use crate::pdf::{PageHandle, PdfDocument};

pub const INDEX_TITLE: &str = "TABLE OF CONTENTS";

/// Draw `text` as a page heading in the header font.
pub fn draw_heading(
    doc: &mut PdfDocument,
    page: PageHandle,
    text: &str,
    layout: &Layout,
) -> Result<(), IndexError> {
    let (x, y) = layout.heading_origin(doc.page_size(page)?);
    let mut canvas = doc.canvas(page)?;
    canvas.text(Font::HelveticaBold, layout.heading_font_size, x, y, text);
    canvas.close()
}

/// Fill `index_page` with a linked table of contents for `names`.
///
/// Nothing is drawn or attached unless every name resolves and every row
/// fits on the page.
pub fn write_index<S: AsRef<str>>(
    doc: &mut PdfDocument,
    index_page: PageHandle,
    names: &[S],
    registry: &PageRegistry,
    layout: &Layout,
) -> Result<Vec<RowPlacement>, IndexError> {
    let page_size = doc.page_size(index_page)?;
    let rows = IndexTableBuilder::new(layout).build(doc, index_page, names, registry)?;

    let links = rows
        .iter()
        .map(|row| LinkAnnotationPlacer::place(&row.geometry, row.target, page_size))
        .collect::<Result<Vec<_>, _>>()?;

    draw_heading(doc, index_page, INDEX_TITLE, layout)?;
    LinkAnnotationPlacer::attach_all(doc, index_page, &links)?;

    log::info!("index page {} lists {} page(s)", index_page, rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::content::page_strings;
    use crate::pdf::links::extract_links_from_doc;
    use crate::pdf::PageSize;

    fn assemble(names: &[&str]) -> (PdfDocument, PageHandle, PageRegistry) {
        let layout = Layout::default();
        let mut doc = PdfDocument::new();
        let mut registry = PageRegistry::new();
        let index = doc.append_page(layout.page_size);
        registry.register("toc", index).unwrap();
        for name in names {
            let page = doc.append_page(layout.page_size);
            draw_heading(&mut doc, page, name, &layout).unwrap();
            registry.register(*name, page).unwrap();
        }
        (doc, index, registry)
    }

    #[test]
    fn test_links_cover_rows() {
        let names = ["Page 1", "Page 2", "Page 3"];
        let (mut doc, index, registry) = assemble(&names);
        let layout = Layout::default();

        let rows = write_index(&mut doc, index, &names, &registry, &layout).unwrap();

        let links = extract_links_from_doc(&doc.doc);
        assert_eq!(links.len(), 3);
        for (row, link) in rows.iter().zip(&links) {
            assert_eq!(link.page, 1);
            assert_eq!(link.target, Some(row.ordinal));
            assert_eq!(link.rect, row.geometry.to_rect().to_array());
        }
        assert_eq!(
            page_strings(&doc, index),
            vec!["Page 1", "2", "Page 2", "3", "Page 3", "4", INDEX_TITLE]
        );
    }

    #[test]
    fn test_every_link_stays_on_page() {
        let names: Vec<String> = (1..=20).map(|i| format!("Chapter {}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (mut doc, index, registry) = assemble(&refs);

        let rows = write_index(&mut doc, index, &refs, &registry, &Layout::default()).unwrap();

        let bounds = PageSize::LANDSCAPE_LETTER.bounds();
        for row in &rows {
            let rect = row.geometry.to_rect();
            assert_eq!(bounds.intersect(&rect), Some(rect));
        }
    }

    #[test]
    fn test_failed_build_leaves_page_blank() {
        let (mut doc, index, registry) = assemble(&["Page 1"]);

        let err =
            write_index(&mut doc, index, &["Page 1", "Missing"], &registry, &Layout::default())
                .unwrap_err();

        assert!(matches!(err, IndexError::NameNotRegistered { .. }));
        assert!(doc.annotation_ids(index).unwrap().is_empty());
        let dict = doc.doc.get_dictionary(index.object_id()).unwrap();
        assert!(dict.get(b"Contents").is_err());
    }

    #[test]
    fn test_foreign_page_with_matching_id_is_rejected() {
        let layout = Layout::default();
        let mut other = PdfDocument::new();
        let foreign = other.append_page(layout.page_size);

        let mut doc = PdfDocument::new();
        let index = doc.append_page(layout.page_size);
        assert_eq!(index.object_id(), foreign.object_id());
        let mut registry = PageRegistry::new();
        registry.register("Foreign", foreign).unwrap();

        let err = write_index(&mut doc, index, &["Foreign"], &registry, &layout).unwrap_err();

        assert!(matches!(err, IndexError::PageNotFoundInDocument { page } if page == foreign));
        assert!(doc.annotation_ids(index).unwrap().is_empty());
        let dict = doc.doc.get_dictionary(index.object_id()).unwrap();
        assert!(dict.get(b"Contents").is_err());
    }

    #[test]
    fn test_custom_layout() {
        let names = ["Intro", "Body"];
        let (mut doc, index, registry) = assemble(&names);
        let layout = Layout {
            side_margin: 72.0,
            label_column_pct: 60.0,
            ..Layout::default()
        };

        let rows = write_index(&mut doc, index, &names, &registry, &layout).unwrap();
        assert_eq!(rows[0].geometry.left, 72.0);
        assert_eq!(rows[0].geometry.right, 720.0);
    }
}
