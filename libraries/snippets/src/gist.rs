//! Client for the external snippet-hosting API.
//!
//! Both operations convert every failure into the `None` sentinel at the
//! public boundary; the cause is logged for operators. Responses are parsed
//! into typed structs so unexpected shapes are rejected early instead of
//! leaking partial data downstream.

use crate::error::SnippetError;
use indexmap::IndexMap;
use log::error;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gist API of the default hosting provider.
pub const DEFAULT_GIST_API: &str = "https://api.github.com/gists";

/// Fixed description attached to every shared snippet.
const GIST_DESCRIPTION: &str = "Moonplay playground";

/// A share always contains exactly this one file.
const GIST_FILE_NAME: &str = "main.lua";

/// The hosting API rejects requests without a user agent.
const USER_AGENT: &str = concat!("moonplay/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Multi-file response of a snippet read. Keys are file names; `IndexMap`
/// preserves document order so "the first file" is deterministic.
#[derive(Debug, Deserialize)]
struct GistResponse {
    files: IndexMap<String, GistFile>,
}

#[derive(Debug, Deserialize)]
struct GistFile {
    content: String,
}

#[derive(Debug, Serialize)]
struct CreateGistRequest<'code> {
    description: &'static str,
    public: bool,
    files: IndexMap<&'static str, NewGistFile<'code>>,
}

#[derive(Debug, Serialize)]
struct NewGistFile<'code> {
    content: &'code str,
}

#[derive(Debug, Deserialize)]
struct CreateGistResponse {
    id: String,
}

/// Loads and saves shared snippets.
pub struct GistClient {
    http: reqwest::blocking::Client,
    api_base: String,
    /// prefix of returned share URLs; the snippet id is appended as the
    /// `gist` query parameter
    share_base: String,
}

impl GistClient {
    #[must_use]
    pub fn new(api_base: impl Into<String>, share_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_owned(),
            share_base: share_base.into(),
        }
    }

    /// Fetches a shared snippet by its opaque id.
    ///
    /// Returns the content of the gist's first file, or `None` on any
    /// failure (transport, non-success status, malformed payload, empty file
    /// set) — the caller must then leave the buffer unchanged.
    #[must_use]
    pub fn load(&self, id: &str) -> Option<String> {
        match self.try_load(id) {
            Ok(code) => Some(code),
            Err(cause) => {
                error!("failed to load gist {id}: {cause}");
                None
            }
        }
    }

    /// Shares the given code as a new public gist.
    ///
    /// Returns a shareable URL embedding the new snippet id, or `None` on
    /// any failure.
    #[must_use]
    pub fn save(&self, code: &str) -> Option<String> {
        match self.try_save(code) {
            Ok(url) => Some(url),
            Err(cause) => {
                error!("failed to save gist: {cause}");
                None
            }
        }
    }

    fn try_load(&self, id: &str) -> Result<String, SnippetError> {
        let url = format!("{}/{id}", self.api_base);
        let response = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .map_err(|cause| SnippetError::Network(cause.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SnippetError::Http(status.as_u16()));
        }
        let gist: GistResponse = response
            .json()
            .map_err(|cause| SnippetError::Parse(cause.to_string()))?;
        let (_, file) = gist
            .files
            .first()
            .ok_or_else(|| SnippetError::Parse("gist has no files".to_owned()))?;
        Ok(file.content.clone())
    }

    fn try_save(&self, code: &str) -> Result<String, SnippetError> {
        let mut files = IndexMap::new();
        files.insert(GIST_FILE_NAME, NewGistFile { content: code });
        let body = CreateGistRequest {
            description: GIST_DESCRIPTION,
            public: true,
            files,
        };

        let response = self
            .http
            .post(&self.api_base)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .map_err(|cause| SnippetError::Network(cause.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SnippetError::Http(status.as_u16()));
        }
        let created: CreateGistResponse = response
            .json()
            .map_err(|cause| SnippetError::Parse(cause.to_string()))?;
        Ok(format!("{}?gist={}", self.share_base, created.id))
    }
}
