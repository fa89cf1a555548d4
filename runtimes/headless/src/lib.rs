//! A headless player runtime.
//!
//! The real rendering engine is an external collaborator; this crate owns
//! the protocol side of a player instance: boot, announce readiness with the
//! boot token, then apply incoming host messages to a [`Player`]
//! implementation in arrival order. The resolution-before-code ordering of
//! the handshake is therefore preserved by construction.

mod launcher;
mod player;
mod runner;

pub use launcher::HeadlessLauncher;
pub use player::{LogPlayer, Player, PlayerAction, RecordingPlayer};
pub use runner::{PlayerRuntimeBuilder, PlayerRuntimeThread};
