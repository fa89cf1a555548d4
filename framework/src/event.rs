//! Application-level events of the playground shell.

/// Events the shell reacts to outside of a running handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplicationEvent {
    /// Tear everything down and exit.
    Exit,
}
