//! Sample and shared-snippet loading.
//!
//! Two collaborators live here: the [`SampleStore`] serving the named example
//! programs (and the documentation export) from a local directory or an HTTP
//! base, and the [`GistClient`] talking to the external snippet-hosting API.
//! Loader failures never cross the boundary as panics or raw errors; callers
//! get a typed error or a `None` sentinel while the cause lands in the log.

mod error;
mod gist;
mod samples;

pub use error::SnippetError;
pub use gist::{GistClient, DEFAULT_GIST_API};
pub use samples::{SampleStore, DEFAULT_SAMPLE, SAMPLE_NAMES};
