use crate::error::IndexError;
use crate::pdf::content::PageCanvas;
use crate::pdf::font::Font;
use crate::pdf::links::LinkAnnotation;
use crate::pdf::PageSize;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a page inside a [`PdfDocument`]. Two pages with identical
/// content are still different handles, and so are pages of different
/// documents that happen to share an object id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageHandle {
    document: u64,
    object: ObjectId,
}

impl PageHandle {
    pub fn object_id(self) -> ObjectId {
        self.object
    }
}

impl fmt::Display for PageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} R (document {})",
            self.object.0, self.object.1, self.document
        )
    }
}

/// A document under assembly. Pages are only ever appended.
pub struct PdfDocument {
    pub doc: Document,
    id: u64,
    pages_id: ObjectId,
    resources_id: ObjectId,
    kids: Vec<ObjectId>,
}

impl PdfDocument {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in Font::ALL {
            fonts.set(font.resource_name(), Object::Dictionary(font.dictionary()));
        }
        let resources_id = doc.add_object(dictionary! { "Font" => fonts });

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut document = PdfDocument {
            doc,
            id: NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed),
            pages_id,
            resources_id,
            kids: Vec::new(),
        };
        document.write_page_tree();
        document
    }

    /// Append a blank page at the end of the document.
    pub fn append_page(&mut self, size: PageSize) -> PageHandle {
        let media_box: Vec<Object> = vec![
            0.0f32.into(),
            0.0f32.into(),
            size.width.into(),
            size.height.into(),
        ];
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => media_box,
            "Resources" => self.resources_id,
        });
        self.kids.push(page_id);
        self.write_page_tree();
        log::debug!("appended page {} ({}x{})", self.kids.len(), size.width, size.height);
        self.handle(page_id)
    }

    fn handle(&self, object: ObjectId) -> PageHandle {
        PageHandle {
            document: self.id,
            object,
        }
    }

    fn write_page_tree(&mut self) {
        let kids: Vec<Object> = self.kids.iter().copied().map(Object::Reference).collect();
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.kids.len() as i64,
            }),
        );
    }

    /// Pages in document order, read back from the page tree.
    pub fn pages(&self) -> Vec<PageHandle> {
        self.doc
            .get_pages()
            .into_values()
            .map(|id| self.handle(id))
            .collect()
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    pub fn contains(&self, page: PageHandle) -> bool {
        page.document == self.id && self.kids.contains(&page.object)
    }

    pub fn page_size(&self, page: PageHandle) -> Result<PageSize, IndexError> {
        let dict = self.page_dictionary(page)?;
        let coords = match dict.get(b"MediaBox") {
            Ok(Object::Array(media_box)) if media_box.len() == 4 => media_box
                .iter()
                .map(|o| o.as_float())
                .collect::<Result<Vec<f32>, _>>()?,
            _ => return Err(IndexError::MissingMediaBox { page }),
        };
        Ok(PageSize {
            width: coords[2] - coords[0],
            height: coords[3] - coords[1],
        })
    }

    fn page_dictionary(&self, page: PageHandle) -> Result<&Dictionary, IndexError> {
        if !self.contains(page) {
            return Err(IndexError::PageNotFoundInDocument { page });
        }
        Ok(self.doc.get_dictionary(page.object)?)
    }

    pub(crate) fn page_dictionary_mut(
        &mut self,
        page: PageHandle,
    ) -> Result<&mut Dictionary, IndexError> {
        if !self.contains(page) {
            return Err(IndexError::PageNotFoundInDocument { page });
        }
        Ok(self.doc.get_dictionary_mut(page.object)?)
    }

    /// Open a content stream on `page`. It must be closed before the
    /// document can be touched again.
    pub fn canvas(&mut self, page: PageHandle) -> Result<PageCanvas<'_>, IndexError> {
        if !self.contains(page) {
            return Err(IndexError::PageNotFoundInDocument { page });
        }
        Ok(PageCanvas::new(self, page))
    }

    /// Attach a batch of link annotations to `page` in one write.
    pub fn attach_annotations(
        &mut self,
        page: PageHandle,
        annotations: &[LinkAnnotation],
    ) -> Result<(), IndexError> {
        for annotation in annotations {
            if !self.contains(annotation.target) {
                return Err(IndexError::PageNotFoundInDocument {
                    page: annotation.target,
                });
            }
        }

        let refs: Vec<Object> = annotations
            .iter()
            .map(|a| Object::Reference(self.doc.add_object(a.to_dictionary())))
            .collect();

        let dict = self.page_dictionary_mut(page)?;
        match dict.get_mut(b"Annots") {
            Ok(Object::Array(existing)) => existing.extend(refs),
            _ => dict.set("Annots", Object::Array(refs)),
        }
        Ok(())
    }

    /// Link annotation object ids attached to `page`, in attachment order.
    #[cfg(test)]
    pub(crate) fn annotation_ids(&self, page: PageHandle) -> Result<Vec<ObjectId>, IndexError> {
        let dict = self.page_dictionary(page)?;
        match dict.get(b"Annots") {
            Ok(Object::Array(annots)) => Ok(annots
                .iter()
                .filter_map(|o| o.as_reference().ok())
                .collect()),
            _ => Ok(Vec::new()),
        }
    }

    pub fn to_bytes(&mut self) -> Result<Vec<u8>, IndexError> {
        let mut buf = Vec::new();
        self.doc.save_to(&mut buf)?;
        Ok(buf)
    }

    /// Serialize the whole document, then write it out in one go.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<(), IndexError> {
        let bytes = self.to_bytes()?;
        std::fs::write(&path, bytes)?;
        log::info!(
            "saved {} page(s) to {}",
            self.kids.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}
