//! Documentation index for the playground's scripting API.
//!
//! Entries are loaded once from a pre-generated JSON export (the shape
//! produced by the Lua language server) and kept immutable; module grouping
//! and filtering are pure re-derivations so a view can always be recomputed
//! from `(entries, selected module, search text)`.

pub mod html;
mod index;
mod model;

pub use index::{filter, is_hidden, module_of, modules};
pub use model::{parse_doc_json, DocDefine, DocEntry, DocField, DocIndexError};

/// The loaded documentation, parsed and ready for filtering.
pub struct DocIndex {
    entries: Vec<DocEntry>,
}

impl DocIndex {
    /// Parses the JSON export.
    ///
    /// # Errors
    /// [`DocIndexError`] when the payload is not a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self, DocIndexError> {
        parse_doc_json(json).map(|entries| Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[DocEntry] {
        &self.entries
    }

    /// Sorted, deduplicated module names of all visible entries.
    #[must_use]
    pub fn modules(&self) -> Vec<String> {
        modules(&self.entries)
    }

    /// Stable filter by module and case-insensitive search text.
    #[must_use]
    pub fn filter(&self, module: Option<&str>, search: &str) -> Vec<&DocEntry> {
        filter(&self.entries, module, search)
    }
}
