use crate::error::IndexError;
use crate::pdf::font::{to_win_ansi, Font};
use crate::pdf::{PageHandle, PdfDocument};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, Stream, StringFormat};

/// An open content stream on one page.
///
/// The canvas holds the document mutably, so nothing else can draw until it
/// is [closed](PageCanvas::close). Closing appends the stream to the page's
/// `/Contents`; a canvas dropped without closing loses its operations.
#[must_use = "a canvas must be closed or its content is lost"]
pub struct PageCanvas<'a> {
    doc: &'a mut PdfDocument,
    page: PageHandle,
    operations: Vec<Operation>,
    closed: bool,
}

impl<'a> PageCanvas<'a> {
    pub(crate) fn new(doc: &'a mut PdfDocument, page: PageHandle) -> Self {
        PageCanvas {
            doc,
            page,
            operations: Vec::new(),
            closed: false,
        }
    }

    /// Show `text` with its baseline starting at `(x, y)`.
    pub fn text(&mut self, font: Font, size: f32, x: f32, y: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()],
            ),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    #[cfg(test)]
    pub(crate) fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Encode the operations and append them to the page as a new stream.
    pub fn close(mut self) -> Result<(), IndexError> {
        self.closed = true;
        let content = Content {
            operations: std::mem::take(&mut self.operations),
        };
        let stream = Stream::new(Dictionary::new(), content.encode()?);
        let stream_id = self.doc.doc.add_object(stream);

        let page = self.page;
        let dict = self.doc.page_dictionary_mut(page)?;
        match dict.get_mut(b"Contents") {
            Ok(Object::Array(streams)) => streams.push(Object::Reference(stream_id)),
            Ok(Object::Reference(first)) => {
                let first = *first;
                dict.set(
                    "Contents",
                    vec![Object::Reference(first), Object::Reference(stream_id)],
                );
            }
            _ => dict.set("Contents", vec![Object::Reference(stream_id)]),
        }
        Ok(())
    }
}

impl Drop for PageCanvas<'_> {
    fn drop(&mut self) {
        if !self.closed && !self.operations.is_empty() {
            log::warn!(
                "content stream on page {} dropped without close; {} operation(s) discarded",
                self.page,
                self.operations.len()
            );
        }
    }
}

/// Decoded operator names of every content stream on `page`, in order.
#[cfg(test)]
pub(crate) fn page_operators(doc: &PdfDocument, page: PageHandle) -> Vec<String> {
    let content = doc.doc.get_page_content(page.object_id()).unwrap();
    Content::decode(&content)
        .unwrap()
        .operations
        .into_iter()
        .map(|op| op.operator)
        .collect()
}

/// Text strings shown on `page`, in drawing order.
#[cfg(test)]
pub(crate) fn page_strings(doc: &PdfDocument, page: PageHandle) -> Vec<String> {
    let content = doc.doc.get_page_content(page.object_id()).unwrap();
    Content::decode(&content)
        .unwrap()
        .operations
        .into_iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(bytes.iter().map(|&b| b as char).collect()),
            _ => None,
        })
        .collect()
}
