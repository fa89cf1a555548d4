//! Types shared between the playground host and its player runtimes:
//! the wire protocol, the per-run correlation token and the endpoint pair
//! connecting both sides.

pub mod channel;
pub mod display;
pub mod message;
pub mod token;
