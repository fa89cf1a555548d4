//! What a player does with the messages it receives.

use log::info;
use std::sync::{Arc, Mutex, PoisonError};

/// Receiver of the configure-then-run half of the handshake.
///
/// A binding to a real engine implements this; the playground ships a
/// logging stand-in and a recording double for tests.
pub trait Player: Send {
    /// Called at most once per run, before any code arrives.
    fn set_resolution(&mut self, width: u32, height: u32);

    /// Hands over the program text; the player renders autonomously from
    /// here until it is superseded.
    fn run_code(&mut self, code: &str);
}

/// Stand-in player that only logs what it receives.
#[derive(Debug, Default)]
pub struct LogPlayer;

impl Player for LogPlayer {
    fn set_resolution(&mut self, width: u32, height: u32) {
        info!("player surface sized to {width}x{height}");
    }

    fn run_code(&mut self, code: &str) {
        info!("player received {} bytes of code", code.len());
    }
}

/// Everything a player was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    SetResolution { width: u32, height: u32 },
    RunCode(String),
}

/// Test double recording all received actions.
#[derive(Debug, Default, Clone)]
pub struct RecordingPlayer {
    actions: Arc<Mutex<Vec<PlayerAction>>>,
}

impl RecordingPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded actions so far.
    #[must_use]
    pub fn actions(&self) -> Vec<PlayerAction> {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, action: PlayerAction) {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(action);
    }
}

impl Player for RecordingPlayer {
    fn set_resolution(&mut self, width: u32, height: u32) {
        self.record(PlayerAction::SetResolution { width, height });
    }

    fn run_code(&mut self, code: &str) {
        self.record(PlayerAction::RunCode(code.to_owned()));
    }
}
