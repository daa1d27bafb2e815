use crate::pdf::{PageHandle, Rect};
use thiserror::Error;

/// Failures that abort an index build. There is no partial-success mode:
/// any of these means nothing is written.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("no page registered under the name {name:?}")]
    NameNotRegistered { name: String },

    #[error("page {page} is not part of the document")]
    PageNotFoundInDocument { page: PageHandle },

    #[error("page {page} has no usable MediaBox")]
    MissingMediaBox { page: PageHandle },

    #[error("a page is already registered under the name {name:?}")]
    DuplicateName { name: String },

    #[error("index row {row} does not fit on the page ({needed:.2}pt needed, {available:.2}pt left)")]
    TableOverflow {
        row: usize,
        needed: f32,
        available: f32,
    },

    #[error("link rectangle {rect} lies outside its host page")]
    LinkOutsidePage { rect: Rect },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
}
