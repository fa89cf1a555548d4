use std::fmt::Display;

/// Failure modes of the loader boundary.
#[derive(Debug)]
pub enum SnippetError {
    /// the requested named resource is absent (includes any non-success
    /// status from the sample base)
    NotFound(String),
    /// the transport failed before a response arrived
    Network(String),
    /// the server answered with a non-success status
    Http(u16),
    /// the response body did not have the expected shape
    Parse(String),
    /// local file access failed
    Io(String),
}

impl Display for SnippetError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnippetError::NotFound(name) => write!(formatter, "`{name}` not found"),
            SnippetError::Network(message) => write!(formatter, "network error: {message}"),
            SnippetError::Http(status) => write!(formatter, "unexpected HTTP status {status}"),
            SnippetError::Parse(message) => write!(formatter, "malformed response: {message}"),
            SnippetError::Io(message) => write!(formatter, "I/O error: {message}"),
        }
    }
}

impl std::error::Error for SnippetError {}
