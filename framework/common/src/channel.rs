//! Endpoint pair connecting the host with a single player instance.
//!
//! Every run gets a fresh pair; dropping the host's endpoint is what detaches
//! a superseded player for good, so a late message from an old instance can
//! never reach a live run.

use std::{
    fmt::Display,
    sync::mpsc::{self, Receiver, Sender, TryRecvError},
};

use crate::{
    message::{HostToPlayerMessage, PlayerToHostMessage},
    token::RunToken,
};

/// Creates a connected pair of endpoints for one player instance.
#[must_use]
pub fn channel(token: RunToken) -> (HostEndpoint, PlayerEndpoint) {
    let (host_to_player_sender, host_to_player_receiver) = mpsc::channel();
    let (player_to_host_sender, player_to_host_receiver) = mpsc::channel();

    let host = HostEndpoint {
        token,
        sender: host_to_player_sender,
        receiver: player_to_host_receiver,
    };
    let player = PlayerEndpoint {
        token,
        sender: player_to_host_sender,
        receiver: host_to_player_receiver,
    };
    (host, player)
}

/// The opposite endpoint has been dropped; no more messages can pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelClosed;

impl Display for ChannelClosed {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("the other end of the player channel is gone")
    }
}

impl std::error::Error for ChannelClosed {}

/// The host's half of a player connection.
pub struct HostEndpoint {
    token: RunToken,
    /// Used to push configuration and code into the player
    sender: Sender<HostToPlayerMessage>,
    /// Used to poll for signals from the player
    receiver: Receiver<PlayerToHostMessage>,
}

impl HostEndpoint {
    /// Token of the run this endpoint belongs to.
    #[must_use]
    pub fn token(&self) -> RunToken {
        self.token
    }

    /// Sends a message to the player.
    ///
    /// # Errors
    /// [`ChannelClosed`] if the player dropped its endpoint.
    pub fn send(&self, message: HostToPlayerMessage) -> Result<(), ChannelClosed> {
        self.sender.send(message).map_err(|_| ChannelClosed)
    }

    /// Non-blocking poll for the next player signal.
    ///
    /// # Errors
    /// [`ChannelClosed`] if the player dropped its endpoint.
    pub fn poll(&self) -> Result<Option<PlayerToHostMessage>, ChannelClosed> {
        match self.receiver.try_recv() {
            Ok(message) => Ok(Some(message)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ChannelClosed),
        }
    }
}

/// The player's half of a connection, handed to the runtime at boot.
pub struct PlayerEndpoint {
    token: RunToken,
    /// Used to signal readiness to the host
    sender: Sender<PlayerToHostMessage>,
    /// Used to poll for configuration and code from the host
    receiver: Receiver<HostToPlayerMessage>,
}

impl PlayerEndpoint {
    /// Token of the run this player was booted for.
    #[must_use]
    pub fn token(&self) -> RunToken {
        self.token
    }

    /// Sends a signal to the host.
    ///
    /// # Errors
    /// [`ChannelClosed`] if the host dropped its endpoint, i.e. this player
    /// has been superseded.
    pub fn send(&self, message: PlayerToHostMessage) -> Result<(), ChannelClosed> {
        self.sender.send(message).map_err(|_| ChannelClosed)
    }

    /// Non-blocking poll for the next host message.
    ///
    /// # Errors
    /// [`ChannelClosed`] if the host dropped its endpoint.
    pub fn poll(&self) -> Result<Option<HostToPlayerMessage>, ChannelClosed> {
        match self.receiver.try_recv() {
            Ok(message) => Ok(Some(message)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ChannelClosed),
        }
    }
}
