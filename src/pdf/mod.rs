pub mod content;
pub mod document;
pub mod font;
pub mod geometry;
pub mod links;
pub mod table;

pub use document::{PageHandle, PdfDocument};
pub use geometry::{PageSize, Rect};
