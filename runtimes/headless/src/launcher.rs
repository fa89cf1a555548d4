//! Glue between the orchestrator and this runtime.

use crate::{player::Player, runner::PlayerRuntimeBuilder, PlayerRuntimeThread};
use log::warn;
use moonplay_framework::orchestrator::{LaunchError, PlayerLauncher};
use moonplay_framework_common::channel::PlayerEndpoint;
use std::time::Duration;

/// Boots one headless player per run and reaps superseded runtime threads.
pub struct HeadlessLauncher<MakePlayer> {
    make_player: MakePlayer,
    boot_delay: Option<Duration>,
    current: Option<PlayerRuntimeThread>,
}

impl<MakePlayer, NewPlayer> HeadlessLauncher<MakePlayer>
where
    MakePlayer: FnMut() -> NewPlayer,
    NewPlayer: Player + 'static,
{
    /// `make_player` produces a fresh [`Player`] for every run.
    #[must_use]
    pub fn new(make_player: MakePlayer) -> Self {
        Self {
            make_player,
            boot_delay: None,
            current: None,
        }
    }

    /// See [`PlayerRuntimeBuilder::with_boot_delay`].
    #[must_use]
    pub fn with_boot_delay(mut self, delay: Duration) -> Self {
        self.boot_delay = Some(delay);
        self
    }

    /// Stops the current player runtime and waits for it to exit.
    pub fn shutdown(&mut self) {
        if let Some(runtime) = self.current.take() {
            runtime.stop();
            if runtime.join().is_err() {
                warn!("a player runtime panicked during shutdown");
            }
        }
    }
}

impl<MakePlayer, NewPlayer> PlayerLauncher for HeadlessLauncher<MakePlayer>
where
    MakePlayer: FnMut() -> NewPlayer,
    NewPlayer: Player + 'static,
{
    fn launch(&mut self, endpoint: PlayerEndpoint) -> Result<(), LaunchError> {
        // the orchestrator has already dropped the old host endpoint, so a
        // superseded runtime exits on its own; reap it before booting anew
        self.shutdown();

        let mut builder = PlayerRuntimeBuilder::new(endpoint);
        if let Some(delay) = self.boot_delay {
            builder = builder.with_boot_delay(delay);
        }
        let runtime = builder.build_runner_thread((self.make_player)());
        self.current = Some(runtime);
        Ok(())
    }
}

impl<MakePlayer> Drop for HeadlessLauncher<MakePlayer> {
    fn drop(&mut self) {
        if let Some(runtime) = self.current.take() {
            runtime.stop();
            drop(runtime.join());
        }
    }
}
