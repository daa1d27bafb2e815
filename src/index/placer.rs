use crate::error::IndexError;
use crate::index::builder::RowGeometry;
use crate::pdf::links::LinkAnnotation;
use crate::pdf::{PageHandle, PageSize, PdfDocument};

/// Turns index rows into clickable regions on the index page.
pub struct LinkAnnotationPlacer;

impl LinkAnnotationPlacer {
    /// A link covering exactly the band of `row`, pointing at `target`.
    pub fn place(
        row: &RowGeometry,
        target: PageHandle,
        host: PageSize,
    ) -> Result<LinkAnnotation, IndexError> {
        let rect = row.to_rect();
        if host.bounds().intersect(&rect) != Some(rect) {
            return Err(IndexError::LinkOutsidePage { rect });
        }
        Ok(LinkAnnotation { rect, target })
    }

    /// Attach all links to the host page in a single pass.
    pub fn attach_all(
        doc: &mut PdfDocument,
        host: PageHandle,
        links: &[LinkAnnotation],
    ) -> Result<(), IndexError> {
        doc.attach_annotations(host, links)?;
        log::debug!("attached {} link(s) to page {}", links.len(), host);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::Rect;

    fn row(top: f32, bottom: f32) -> RowGeometry {
        RowGeometry {
            top,
            bottom,
            left: 36.0,
            right: 756.0,
        }
    }

    #[test]
    fn test_rect_matches_row() {
        let mut doc = PdfDocument::new();
        let target = doc.append_page(PageSize::LANDSCAPE_LETTER);

        let link =
            LinkAnnotationPlacer::place(&row(540.0, 518.9), target, PageSize::LANDSCAPE_LETTER)
                .unwrap();

        assert_eq!(link.rect, Rect::new(36.0, 518.9, 756.0, 540.0));
        assert_eq!(link.target, target);
        let page = PageSize::LANDSCAPE_LETTER.bounds();
        assert_eq!(page.intersect(&link.rect), Some(link.rect));
    }

    #[test]
    fn test_off_page_row_rejected() {
        let mut doc = PdfDocument::new();
        let target = doc.append_page(PageSize::LANDSCAPE_LETTER);
        let err = LinkAnnotationPlacer::place(&row(10.0, -5.0), target, PageSize::LANDSCAPE_LETTER)
            .unwrap_err();
        assert!(matches!(err, IndexError::LinkOutsidePage { .. }));
    }

    #[test]
    fn test_attach_all_in_order() {
        let mut doc = PdfDocument::new();
        let host = doc.append_page(PageSize::LANDSCAPE_LETTER);
        let a = doc.append_page(PageSize::LANDSCAPE_LETTER);
        let b = doc.append_page(PageSize::LANDSCAPE_LETTER);

        let links = vec![
            LinkAnnotationPlacer::place(&row(540.0, 520.0), a, PageSize::LANDSCAPE_LETTER).unwrap(),
            LinkAnnotationPlacer::place(&row(520.0, 500.0), b, PageSize::LANDSCAPE_LETTER).unwrap(),
        ];
        LinkAnnotationPlacer::attach_all(&mut doc, host, &links).unwrap();

        assert_eq!(doc.annotation_ids(host).unwrap().len(), 2);
        assert!(doc.annotation_ids(a).unwrap().is_empty());
    }

    #[test]
    fn test_attach_to_foreign_target_fails() {
        let mut other = PdfDocument::new();
        let stray = other.append_page(PageSize::LANDSCAPE_LETTER);

        let mut doc = PdfDocument::new();
        let host = doc.append_page(PageSize::LANDSCAPE_LETTER);
        let link = LinkAnnotationPlacer::place(&row(540.0, 520.0), stray, PageSize::LANDSCAPE_LETTER)
            .unwrap();

        assert!(LinkAnnotationPlacer::attach_all(&mut doc, host, &[link]).is_err());
        assert!(doc.annotation_ids(host).unwrap().is_empty());
    }
}
