use crate::error::IndexError;
use crate::pdf::PageHandle;
use std::collections::HashMap;

/// Human-readable names for the pages of one document.
///
/// Names are unique: registering a name twice is rejected rather than
/// silently replacing the earlier page.
#[derive(Debug, Default)]
pub struct PageRegistry {
    entries: Vec<(String, PageHandle)>,
    by_name: HashMap<String, usize>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, page: PageHandle) -> Result<(), IndexError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(IndexError::DuplicateName { name });
        }
        self.by_name.insert(name.clone(), self.entries.len());
        self.entries.push((name, page));
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<PageHandle, IndexError> {
        self.by_name
            .get(name)
            .map(|&i| self.entries[i].1)
            .ok_or_else(|| IndexError::NameNotRegistered {
                name: name.to_string(),
            })
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

}
