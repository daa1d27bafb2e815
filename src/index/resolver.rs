use crate::error::IndexError;
use crate::pdf::{PageHandle, PdfDocument};

/// 1-based position of `page` in the document, found by scanning the page
/// list for the same handle. Pages are compared by identity, never by
/// content.
pub fn page_number(doc: &PdfDocument, page: PageHandle) -> Result<u32, IndexError> {
    doc.pages()
        .iter()
        .position(|&p| p == page)
        .map(|i| i as u32 + 1)
        .ok_or(IndexError::PageNotFoundInDocument { page })
}
