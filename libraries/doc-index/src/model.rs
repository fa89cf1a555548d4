//! Typed model of the documentation export.
//!
//! The export is produced by the Lua language server; only the fields the
//! browser actually renders are modelled, everything else is ignored by the
//! deserializer. Parsing is strict about the overall shape so malformed
//! payloads fail early instead of leaking partial entries downstream.

use serde::Deserialize;
use std::fmt::Display;

/// One documented symbol (function, type or value).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocEntry {
    /// qualified symbol name, e.g. `sokol.gfx.begin_pass`
    pub name: String,
    /// kind of the symbol (`function`, `type`, …)
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// rendered type signature
    #[serde(default)]
    pub view: Option<String>,
    /// definition sites; the first one supplies source file and description
    #[serde(default)]
    pub defines: Vec<DocDefine>,
    #[serde(default)]
    pub fields: Vec<DocField>,
}

impl DocEntry {
    /// Source file of the first definition, if any.
    #[must_use]
    pub fn source_file(&self) -> Option<&str> {
        self.defines.first().and_then(|define| define.file.as_deref())
    }

    /// Description of the first definition, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.defines.first().and_then(|define| define.desc.as_deref())
    }
}

/// One definition site of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocDefine {
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub view: Option<String>,
}

/// A named field of a documented table or type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocField {
    pub name: String,
    /// rendered type signature
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    /// unprocessed fallback when `desc` is absent
    #[serde(default)]
    pub rawdesc: Option<String>,
}

impl DocField {
    /// Preferring the cleaned-up description over the raw one.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.desc.as_deref().or(self.rawdesc.as_deref())
    }
}

/// The documentation export could not be parsed.
#[derive(Debug)]
pub struct DocIndexError(pub String);

impl Display for DocIndexError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "malformed documentation export: {}", self.0)
    }
}

impl std::error::Error for DocIndexError {}

/// Parses the JSON export into an ordered entry sequence.
///
/// # Errors
/// [`DocIndexError`] when the payload is not a JSON array of entry objects.
pub fn parse_doc_json(json: &str) -> Result<Vec<DocEntry>, DocIndexError> {
    serde_json::from_str(json).map_err(|error| DocIndexError(error.to_string()))
}
