use crate::pdf::{PageHandle, Rect};
use anyhow::{Context, Result};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};
use std::path::Path;

/// An invisible clickable region that jumps to another page of the same
/// document.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkAnnotation {
    pub rect: Rect,
    pub target: PageHandle,
}

impl LinkAnnotation {
    pub fn to_dictionary(&self) -> Dictionary {
        let rect: Vec<Object> = self.rect.to_array().iter().map(|&v| v.into()).collect();
        // [page /XYZ null null null] keeps the viewer's current zoom and position
        let dest = vec![
            Object::Reference(self.target.object_id()),
            Object::Name(b"XYZ".to_vec()),
            Object::Null,
            Object::Null,
            Object::Null,
        ];
        dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => rect,
            "Border" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
            "BS" => dictionary! { "Type" => "Border", "W" => Object::Integer(0), "S" => "U" },
            "A" => dictionary! { "Type" => "Action", "S" => "GoTo", "D" => dest },
        }
    }
}

/// A link annotation read back from a saved file.
#[derive(Debug, Clone)]
pub struct LinkEntry {
    /// 1-based page the link sits on
    pub page: u32,
    pub rect: [f32; 4],
    /// 1-based destination page, if it resolves to one
    pub target: Option<u32>,
}

/// List the link annotations of every page of a PDF file
pub fn extract_links<P: AsRef<Path>>(path: P) -> Result<Vec<LinkEntry>> {
    let path = path.as_ref();
    let doc =
        Document::load(path).with_context(|| format!("Failed to open PDF: {}", path.display()))?;

    Ok(extract_links_from_doc(&doc))
}

pub fn extract_links_from_doc(doc: &Document) -> Vec<LinkEntry> {
    let page_map = build_page_map(doc);
    let mut entries = Vec::new();

    for &(page_id, page_num) in &page_map {
        let page = match doc.get_dictionary(page_id) {
            Ok(d) => d,
            Err(_) => continue,
        };

        let annots = match page.get(b"Annots") {
            Ok(Object::Array(a)) => a,
            Ok(Object::Reference(r)) => match doc.get_object(*r) {
                Ok(Object::Array(a)) => a,
                _ => continue,
            },
            _ => continue,
        };

        for annot in annots {
            let dict = match annot {
                Object::Reference(r) => match doc.get_dictionary(*r) {
                    Ok(d) => d,
                    Err(_) => continue,
                },
                Object::Dictionary(d) => d,
                _ => continue,
            };

            match dict.get(b"Subtype") {
                Ok(Object::Name(subtype)) if subtype == b"Link" => {}
                _ => continue,
            }

            let rect = match read_rect(dict) {
                Some(r) => r,
                None => continue,
            };

            entries.push(LinkEntry {
                page: page_num,
                rect,
                target: get_destination_page(doc, dict, &page_map),
            });
        }
    }

    entries
}

fn read_rect(dict: &Dictionary) -> Option<[f32; 4]> {
    let arr = match dict.get(b"Rect") {
        Ok(Object::Array(a)) if a.len() == 4 => a,
        _ => return None,
    };
    let mut rect = [0.0; 4];
    for (slot, obj) in rect.iter_mut().zip(arr) {
        *slot = obj.as_float().ok()?;
    }
    Some(rect)
}

fn get_destination_page(
    doc: &Document,
    dict: &Dictionary,
    page_map: &[(ObjectId, u32)],
) -> Option<u32> {
    if let Ok(dest) = dict.get(b"Dest") {
        return resolve_destination(doc, dest, page_map);
    }

    let action = match dict.get(b"A") {
        Ok(Object::Reference(r)) => doc.get_dictionary(*r).ok()?,
        Ok(Object::Dictionary(d)) => d,
        _ => return None,
    };
    match action.get(b"S") {
        Ok(Object::Name(s)) if s == b"GoTo" => {}
        _ => return None,
    }
    resolve_destination(doc, action.get(b"D").ok()?, page_map)
}

fn resolve_destination(doc: &Document, dest: &Object, page_map: &[(ObjectId, u32)]) -> Option<u32> {
    match dest {
        Object::Array(arr) => get_page_from_dest_array(arr, page_map),
        Object::Reference(r) => resolve_destination(doc, doc.get_object(*r).ok()?, page_map),
        _ => None,
    }
}

fn get_page_from_dest_array(arr: &[Object], page_map: &[(ObjectId, u32)]) -> Option<u32> {
    // [page_ref /XYZ left top zoom] or similar
    let Some(Object::Reference(page_ref)) = arr.first() else {
        return None;
    };
    page_map
        .iter()
        .find(|(id, _)| id == page_ref)
        .map(|(_, num)| *num)
}

fn build_page_map(doc: &Document) -> Vec<(ObjectId, u32)> {
    doc.get_pages().into_iter().map(|(num, id)| (id, num)).collect()
}
