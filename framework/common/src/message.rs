//! Messages crossing the host⇄player boundary.
//!
//! The JSON shape of these messages is the playground's wire protocol and
//! must stay stable: `playerReady`, `setResolution`, `setCode`, with the
//! field names used below.

use serde::{Deserialize, Serialize};

use crate::token::RunToken;

/// Any message a player may send to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlayerToHostMessage {
    /// Sent exactly once per player instance, as soon as it can accept code.
    PlayerReady {
        /// echo of the token the player was booted with
        token: RunToken,
    },
}

/// Any message the host may send to a player.
///
/// The host stays silent until the player has signalled readiness. When both
/// messages are sent, `setResolution` precedes `setCode` so the player can
/// size its surface before running code that may query the dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostToPlayerMessage {
    /// Requests a fixed surface size; `0×0` is the "native" sentinel.
    SetResolution { width: u32, height: u32 },
    /// The program text to execute. Always the last message of a handshake.
    SetCode { code: String },
}
