//! The player runtime thread: boot, signal readiness, apply host messages.

use crate::player::Player;
use log::debug;
use moonplay_framework_common::{
    channel::{ChannelClosed, PlayerEndpoint},
    message::{HostToPlayerMessage, PlayerToHostMessage},
};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

const HOST_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Assembles a player runtime before spawning its thread.
pub struct PlayerRuntimeBuilder {
    endpoint: PlayerEndpoint,
    boot_delay: Option<Duration>,
}

impl PlayerRuntimeBuilder {
    #[must_use]
    pub fn new(endpoint: PlayerEndpoint) -> Self {
        Self {
            endpoint,
            boot_delay: None,
        }
    }

    /// Delays the ready signal, emulating a slow-loading player. Test seam
    /// for late-readiness races.
    #[must_use]
    pub fn with_boot_delay(mut self, delay: Duration) -> Self {
        self.boot_delay = Some(delay);
        self
    }

    /// Spawns the runtime thread driving `player`.
    #[must_use]
    pub fn build_runner_thread(self, player: impl Player + 'static) -> PlayerRuntimeThread {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let thread_stop_flag = Arc::clone(&stop_flag);
        let join_handle = thread::spawn(move || {
            run_player(self.endpoint, player, self.boot_delay, &thread_stop_flag);
        });
        PlayerRuntimeThread {
            stop_flag,
            join_handle,
        }
    }
}

/// Handle of a spawned player runtime.
pub struct PlayerRuntimeThread {
    stop_flag: Arc<AtomicBool>,
    join_handle: JoinHandle<()>,
}

impl PlayerRuntimeThread {
    /// Asks the runtime to exit after the message it is currently handling.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Waits for the runtime thread to exit.
    ///
    /// # Errors
    /// The player's panic payload, if it panicked.
    pub fn join(self) -> thread::Result<()> {
        self.join_handle.join()
    }
}

fn run_player(
    endpoint: PlayerEndpoint,
    mut player: impl Player,
    boot_delay: Option<Duration>,
    stop_flag: &AtomicBool,
) {
    let token = endpoint.token();
    if let Some(delay) = boot_delay {
        thread::sleep(delay);
    }

    if endpoint
        .send(PlayerToHostMessage::PlayerReady { token })
        .is_err()
    {
        debug!("player {token}: superseded before becoming ready");
        return;
    }
    debug!("player {token}: ready");

    loop {
        if stop_flag.load(Ordering::Relaxed) {
            debug!("player {token}: stop requested");
            return;
        }
        match endpoint.poll() {
            Ok(Some(HostToPlayerMessage::SetResolution { width, height })) => {
                player.set_resolution(width, height);
            }
            Ok(Some(HostToPlayerMessage::SetCode { code })) => {
                player.run_code(&code);
            }
            Ok(None) => thread::sleep(HOST_POLL_INTERVAL),
            Err(ChannelClosed) => {
                // the host dropped this player in favor of a new run
                debug!("player {token}: host detached, shutting down");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PlayerRuntimeBuilder;
    use crate::player::{PlayerAction, RecordingPlayer};
    use moonplay_framework_common::{
        channel,
        message::{HostToPlayerMessage, PlayerToHostMessage},
        token::RunToken,
    };
    use std::time::{Duration, Instant};

    fn await_ready(host: &channel::HostEndpoint) -> PlayerToHostMessage {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(message) = host.poll().unwrap() {
                return message;
            }
            assert!(Instant::now() < deadline, "no ready signal within 5s");
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn announces_readiness_with_the_boot_token() {
        let token = RunToken::new_random();
        let (host, player_endpoint) = channel::channel(token);
        let runtime = PlayerRuntimeBuilder::new(player_endpoint)
            .build_runner_thread(RecordingPlayer::new());

        let message = await_ready(&host);
        assert_eq!(message, PlayerToHostMessage::PlayerReady { token });

        drop(host);
        runtime.join().unwrap();
    }

    #[test]
    fn applies_host_messages_in_order() {
        let (host, player_endpoint) = channel::channel(RunToken::new_random());
        let player = RecordingPlayer::new();
        let runtime =
            PlayerRuntimeBuilder::new(player_endpoint).build_runner_thread(player.clone());

        let _ready = await_ready(&host);
        host.send(HostToPlayerMessage::SetResolution {
            width: 640,
            height: 480,
        })
        .unwrap();
        host.send(HostToPlayerMessage::SetCode {
            code: "print(1)".to_owned(),
        })
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while player.actions().len() < 2 {
            assert!(Instant::now() < deadline, "player did not act within 5s");
            std::thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(
            player.actions(),
            vec![
                PlayerAction::SetResolution {
                    width: 640,
                    height: 480
                },
                PlayerAction::RunCode("print(1)".to_owned()),
            ]
        );

        drop(host);
        runtime.join().unwrap();
    }

    #[test]
    fn exits_when_the_host_detaches() {
        let (host, player_endpoint) = channel::channel(RunToken::new_random());
        let runtime = PlayerRuntimeBuilder::new(player_endpoint)
            .build_runner_thread(RecordingPlayer::new());
        drop(host);
        runtime.join().unwrap();
    }
}
