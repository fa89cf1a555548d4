//! The sample store: named example programs and the documentation export.
//!
//! The base may be a local directory (the shipped `assets/` tree) or an HTTP
//! origin serving the same layout: `examples/{name}.lua` and `doc.json`.

use crate::error::SnippetError;
use log::debug;
use std::{fs, path::PathBuf, time::Duration};

/// Names offered by the sample picker.
pub const SAMPLE_NAMES: [&str; 3] = ["triangle", "raytracer", "breakout"];

/// Loaded and run when the playground starts without a shared snippet.
pub const DEFAULT_SAMPLE: &str = "raytracer";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

enum Base {
    Http(String),
    Dir(PathBuf),
}

/// Read access to the static sample resources.
pub struct SampleStore {
    base: Base,
    http: reqwest::blocking::Client,
}

impl SampleStore {
    /// `base` is either an `http(s)://` origin or a local directory.
    #[must_use]
    pub fn new(base: &str) -> Self {
        let base = if base.starts_with("http://") || base.starts_with("https://") {
            Base::Http(base.trim_end_matches('/').to_owned())
        } else {
            Base::Dir(PathBuf::from(base))
        };
        Self {
            base,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Loads a named sample program.
    ///
    /// # Errors
    /// [`SnippetError::NotFound`] when the sample is absent or the base
    /// answers with a non-success status — the caller must then leave the
    /// editor buffer untouched.
    pub fn load_sample(&self, name: &str) -> Result<String, SnippetError> {
        self.fetch(&format!("examples/{name}.lua"))
            .map_err(|error| match error {
                SnippetError::Http(_) | SnippetError::Io(_) => {
                    SnippetError::NotFound(name.to_owned())
                }
                other => other,
            })
    }

    /// Loads the pre-generated documentation export.
    ///
    /// # Errors
    /// Any [`SnippetError`]; the docs browser replaces its panel with a
    /// textual error in that case.
    pub fn load_doc_json(&self) -> Result<String, SnippetError> {
        self.fetch("doc.json")
    }

    fn fetch(&self, relative: &str) -> Result<String, SnippetError> {
        match &self.base {
            Base::Http(origin) => {
                let url = format!("{origin}/{relative}");
                debug!("fetching {url}");
                let response = self
                    .http
                    .get(&url)
                    .timeout(REQUEST_TIMEOUT)
                    .send()
                    .map_err(|error| SnippetError::Network(error.to_string()))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SnippetError::Http(status.as_u16()));
                }
                response
                    .text()
                    .map_err(|error| SnippetError::Network(error.to_string()))
            }
            Base::Dir(directory) => {
                let path = directory.join(relative);
                debug!("reading {}", path.display());
                fs::read_to_string(&path).map_err(|error| SnippetError::Io(error.to_string()))
            }
        }
    }
}
