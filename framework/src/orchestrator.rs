//! The run orchestrator: boots a player runtime, performs the readiness
//! handshake and pushes configuration and code into it.
//!
//! Per run the orchestrator mints a [`RunToken`], creates a fresh endpoint
//! pair and hands the player half to the configured [`PlayerLauncher`]. It
//! then awaits the single `playerReady` signal carrying that token; stale
//! tokens from superseded runs are discarded. On readiness it sends
//! `setResolution` (fixed resolutions only) strictly before `setCode`,
//! relying on in-order delivery of sequential sends on the same endpoint.

use log::{debug, info, warn};
use moonplay_framework_common::{
    channel::{self, ChannelClosed, HostEndpoint},
    display::DisplayConfig,
    message::{HostToPlayerMessage, PlayerToHostMessage},
    token::RunToken,
};
use std::{
    fmt::Display,
    thread,
    time::{Duration, Instant},
};

/// How long [`RunOrchestrator::run`] sleeps between readiness polls.
const READY_POLL_INTERVAL: Duration = Duration::from_millis(1);

pub type RunResult<T> = Result<T, RunError>;

/// Terminal failures of a run attempt. Any of these leaves the orchestrator
/// with no player attached; the editor buffer is never touched.
#[derive(Debug)]
pub enum RunError {
    /// the launcher could not boot a new player instance
    LaunchFailed(String),
    /// the player dropped its endpoint before the handshake finished
    PlayerGone,
    /// the player did not signal readiness within the configured deadline
    ReadyTimeout(Duration),
}

impl Display for RunError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::LaunchFailed(message) => {
                write!(formatter, "failed to launch a player: {message}")
            }
            RunError::PlayerGone => {
                formatter.write_str("the player vanished before it was configured")
            }
            RunError::ReadyTimeout(timeout) => write!(
                formatter,
                "the player did not become ready within {timeout:?}"
            ),
        }
    }
}

impl std::error::Error for RunError {}

impl From<ChannelClosed> for RunError {
    fn from(_: ChannelClosed) -> Self {
        RunError::PlayerGone
    }
}

/// Boots a fresh player instance for one run.
///
/// Implementations receive the player half of the endpoint pair and must
/// arrange for the new player to announce itself on it with the endpoint's
/// own token.
pub trait PlayerLauncher {
    /// # Errors
    /// A human-readable reason when the player cannot be booted; the run is
    /// then abandoned without a handshake.
    fn launch(
        &mut self,
        endpoint: channel::PlayerEndpoint,
    ) -> Result<(), LaunchError>;
}

/// Reason a [`PlayerLauncher`] could not boot a player.
#[derive(Debug)]
pub struct LaunchError(pub String);

/// Two-phase readiness handshake, at most one active per orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandshakePhase {
    /// no player attached
    #[default]
    NotStarted,
    /// a player is booting; its ready signal must carry this token
    AwaitingReady(RunToken),
    /// configuration and code were delivered; the player renders on its own
    Configured(RunToken),
}

/// Owns the single player surface and drives the run/reset lifecycle.
pub struct RunOrchestrator<Launcher> {
    launcher: Launcher,
    ready_timeout: Option<Duration>,
    phase: HandshakePhase,
    /// endpoint of the live player; superseded endpoints are dropped whole
    player: Option<HostEndpoint>,
    /// set while a handshake is in flight, consumed on readiness
    pending: Option<PendingRun>,
}

struct PendingRun {
    code: String,
    display: DisplayConfig,
    deadline: Option<Instant>,
}

impl<Launcher: PlayerLauncher> RunOrchestrator<Launcher> {
    #[must_use]
    pub fn new(launcher: Launcher) -> Self {
        Self {
            launcher,
            ready_timeout: None,
            phase: HandshakePhase::NotStarted,
            player: None,
            pending: None,
        }
    }

    /// Bounds the wait for a player's ready signal. Without this the
    /// orchestrator waits indefinitely, mirroring the original browser host.
    #[must_use]
    pub fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn phase(&self) -> HandshakePhase {
        self.phase
    }

    /// Begins a new run: supersedes any previous player and boots a new one.
    ///
    /// Returns as soon as the player is booting; call [`Self::pump`] to drive
    /// the handshake to completion.
    ///
    /// # Errors
    /// [`RunError::LaunchFailed`] when the launcher cannot boot a player.
    pub fn start_run(&mut self, code: &str, display: DisplayConfig) -> RunResult<RunToken> {
        self.discard_player();

        let token = RunToken::new_random();
        let (host_endpoint, player_endpoint) = channel::channel(token);
        self.launcher
            .launch(player_endpoint)
            .map_err(|LaunchError(message)| RunError::LaunchFailed(message))?;

        debug!("run {token}: player booting, awaiting readiness");
        self.player = Some(host_endpoint);
        self.pending = Some(PendingRun {
            code: code.to_owned(),
            display,
            deadline: self.ready_timeout.map(|timeout| Instant::now() + timeout),
        });
        self.phase = HandshakePhase::AwaitingReady(token);
        Ok(token)
    }

    /// Advances an in-flight handshake by one poll.
    ///
    /// A no-op outside of the `AwaitingReady` phase.
    ///
    /// # Errors
    /// [`RunError::PlayerGone`] when the booting player dropped its endpoint,
    /// [`RunError::ReadyTimeout`] when the configured deadline passed. Either
    /// way the player surface has been discarded.
    pub fn pump(&mut self) -> RunResult<HandshakePhase> {
        let HandshakePhase::AwaitingReady(expected) = self.phase else {
            return Ok(self.phase);
        };

        loop {
            let Some(player) = self.player.as_ref() else {
                self.abandon_run();
                return Err(RunError::PlayerGone);
            };
            match player.poll() {
                Ok(Some(PlayerToHostMessage::PlayerReady { token })) if token == expected => {
                    self.configure(expected)?;
                    return Ok(self.phase);
                }
                Ok(Some(PlayerToHostMessage::PlayerReady { token })) => {
                    // one-shot semantics: a stale ready must never configure
                    // the live player
                    warn!("ignoring ready signal of superseded run {token}");
                }
                Ok(None) => {
                    let overdue = self
                        .pending
                        .as_ref()
                        .and_then(|pending| pending.deadline)
                        .is_some_and(|deadline| Instant::now() >= deadline);
                    if overdue {
                        let timeout = self.ready_timeout.unwrap_or_default();
                        warn!("run {expected}: no ready signal within {timeout:?}");
                        self.abandon_run();
                        return Err(RunError::ReadyTimeout(timeout));
                    }
                    return Ok(self.phase);
                }
                Err(ChannelClosed) => {
                    self.abandon_run();
                    return Err(RunError::PlayerGone);
                }
            }
        }
    }

    /// Starts a run and blocks until the player is configured.
    ///
    /// # Errors
    /// Any [`RunError`]; see [`Self::start_run`] and [`Self::pump`].
    pub fn run(&mut self, code: &str, display: DisplayConfig) -> RunResult<RunToken> {
        let token = self.start_run(code, display)?;
        loop {
            if let HandshakePhase::Configured(_) = self.pump()? {
                return Ok(token);
            }
            thread::park_timeout(READY_POLL_INTERVAL);
        }
    }

    /// Discards the player surface and any pending handshake. The buffer
    /// owned by the session is not affected.
    pub fn reset(&mut self) {
        if self.player.is_some() {
            info!("resetting: discarding the current player");
        }
        self.discard_player();
    }

    /// Sends the configuration and code of the pending run, in that order.
    fn configure(&mut self, token: RunToken) -> RunResult<()> {
        let Some(pending) = self.pending.take() else {
            self.abandon_run();
            return Err(RunError::PlayerGone);
        };
        let Some(player) = self.player.as_ref() else {
            self.abandon_run();
            return Err(RunError::PlayerGone);
        };

        let result = (|| {
            // the player must size its surface before it receives code that
            // may query the dimensions
            if let DisplayConfig::Fixed { width, height } = pending.display {
                player.send(HostToPlayerMessage::SetResolution { width, height })?;
            }
            player.send(HostToPlayerMessage::SetCode { code: pending.code })
        })();

        match result {
            Ok(()) => {
                info!("run {token}: player ready and configured");
                self.phase = HandshakePhase::Configured(token);
                Ok(())
            }
            Err(ChannelClosed) => {
                self.abandon_run();
                Err(RunError::PlayerGone)
            }
        }
    }

    fn abandon_run(&mut self) {
        self.discard_player();
    }

    fn discard_player(&mut self) {
        if let HandshakePhase::AwaitingReady(token) = self.phase {
            debug!("run {token}: superseded before the player became ready");
        }
        self.player = None;
        self.pending = None;
        self.phase = HandshakePhase::NotStarted;
    }
}

#[cfg(test)]
mod tests {
    use super::{HandshakePhase, LaunchError, PlayerLauncher, RunError, RunOrchestrator};
    use moonplay_framework_common::{
        channel::PlayerEndpoint,
        display::DisplayConfig,
        message::{HostToPlayerMessage, PlayerToHostMessage},
        token::RunToken,
    };
    use std::time::Duration;

    /// Keeps every endpoint it was launched with, so tests can play the
    /// player's role by hand.
    #[derive(Default)]
    struct ManualLauncher {
        endpoints: Vec<PlayerEndpoint>,
    }

    impl PlayerLauncher for ManualLauncher {
        fn launch(&mut self, endpoint: PlayerEndpoint) -> Result<(), LaunchError> {
            self.endpoints.push(endpoint);
            Ok(())
        }
    }

    struct FailingLauncher;

    impl PlayerLauncher for FailingLauncher {
        fn launch(&mut self, _endpoint: PlayerEndpoint) -> Result<(), LaunchError> {
            Err(LaunchError("player bootstrap missing".to_owned()))
        }
    }

    fn drain(endpoint: &PlayerEndpoint) -> Vec<HostToPlayerMessage> {
        let mut messages = Vec::new();
        while let Ok(Some(message)) = endpoint.poll() {
            messages.push(message);
        }
        messages
    }

    fn signal_ready(endpoint: &PlayerEndpoint) {
        endpoint
            .send(PlayerToHostMessage::PlayerReady {
                token: endpoint.token(),
            })
            .unwrap();
    }

    #[test]
    fn native_run_sends_exactly_one_set_code() {
        let mut orchestrator = RunOrchestrator::new(ManualLauncher::default());
        orchestrator
            .start_run("print(1)", DisplayConfig::Native)
            .unwrap();

        let player = orchestrator.launcher.endpoints.last().unwrap();
        signal_ready(player);
        let phase = orchestrator.pump().unwrap();
        assert!(matches!(phase, HandshakePhase::Configured(_)));

        let player = orchestrator.launcher.endpoints.last().unwrap();
        let messages = drain(player);
        assert_eq!(
            messages,
            vec![HostToPlayerMessage::SetCode {
                code: "print(1)".to_owned()
            }],
            "a native run must not receive a setResolution message"
        );
    }

    #[test]
    fn fixed_resolution_precedes_code() {
        let mut orchestrator = RunOrchestrator::new(ManualLauncher::default());
        orchestrator
            .start_run(
                "print(1)",
                DisplayConfig::Fixed {
                    width: 640,
                    height: 480,
                },
            )
            .unwrap();

        let player = orchestrator.launcher.endpoints.last().unwrap();
        signal_ready(player);
        orchestrator.pump().unwrap();

        let player = orchestrator.launcher.endpoints.last().unwrap();
        let messages = drain(player);
        assert_eq!(
            messages,
            vec![
                HostToPlayerMessage::SetResolution {
                    width: 640,
                    height: 480
                },
                HostToPlayerMessage::SetCode {
                    code: "print(1)".to_owned()
                },
            ]
        );
    }

    #[test]
    fn superseding_a_run_detaches_the_first_player() {
        let mut orchestrator = RunOrchestrator::new(ManualLauncher::default());
        orchestrator.start_run("print(1)", DisplayConfig::Native).unwrap();
        orchestrator.start_run("print(2)", DisplayConfig::Native).unwrap();

        {
            let first = orchestrator.launcher.endpoints.first().unwrap();
            // the late ready of the superseded player cannot be delivered at all
            assert!(first
                .send(PlayerToHostMessage::PlayerReady {
                    token: first.token(),
                })
                .is_err());
        }

        let second = orchestrator.launcher.endpoints.last().unwrap();
        signal_ready(second);
        orchestrator.pump().unwrap();

        let first = orchestrator.launcher.endpoints.first().unwrap();
        assert!(drain(first).is_empty(), "the superseded player saw traffic");
        let second = orchestrator.launcher.endpoints.last().unwrap();
        assert_eq!(
            drain(second),
            vec![HostToPlayerMessage::SetCode {
                code: "print(2)".to_owned()
            }]
        );
    }

    #[test]
    fn stale_ready_token_is_ignored() {
        let mut orchestrator = RunOrchestrator::new(ManualLauncher::default());
        orchestrator.start_run("print(1)", DisplayConfig::Native).unwrap();

        let player = orchestrator.launcher.endpoints.last().unwrap();
        player
            .send(PlayerToHostMessage::PlayerReady {
                token: RunToken::new_random(),
            })
            .unwrap();
        let phase = orchestrator.pump().unwrap();
        assert!(
            matches!(phase, HandshakePhase::AwaitingReady(_)),
            "a foreign token must not finish the handshake"
        );

        let player = orchestrator.launcher.endpoints.last().unwrap();
        signal_ready(player);
        let phase = orchestrator.pump().unwrap();
        assert!(matches!(phase, HandshakePhase::Configured(_)));
    }

    #[test]
    fn overdue_readiness_reports_a_timeout() {
        let mut orchestrator = RunOrchestrator::new(ManualLauncher::default())
            .with_ready_timeout(Duration::ZERO);
        orchestrator.start_run("print(1)", DisplayConfig::Native).unwrap();

        let error = orchestrator.pump().unwrap_err();
        assert!(matches!(error, RunError::ReadyTimeout(_)));
        assert_eq!(orchestrator.phase(), HandshakePhase::NotStarted);
    }

    #[test]
    fn vanished_player_reports_player_gone() {
        let mut orchestrator = RunOrchestrator::new(ManualLauncher::default());
        orchestrator.start_run("print(1)", DisplayConfig::Native).unwrap();

        orchestrator.launcher.endpoints.clear();
        let error = orchestrator.pump().unwrap_err();
        assert!(matches!(error, RunError::PlayerGone));
    }

    #[test]
    fn failed_launch_starts_no_handshake() {
        let mut orchestrator = RunOrchestrator::new(FailingLauncher);
        let error = orchestrator
            .start_run("print(1)", DisplayConfig::Native)
            .unwrap_err();
        assert!(matches!(error, RunError::LaunchFailed(_)));
        assert_eq!(orchestrator.phase(), HandshakePhase::NotStarted);
    }

    #[test]
    fn reset_discards_the_pending_handshake() {
        let mut orchestrator = RunOrchestrator::new(ManualLauncher::default());
        orchestrator.start_run("print(1)", DisplayConfig::Native).unwrap();
        orchestrator.reset();
        assert_eq!(orchestrator.phase(), HandshakePhase::NotStarted);

        let player = orchestrator.launcher.endpoints.last().unwrap();
        assert!(
            player
                .send(PlayerToHostMessage::PlayerReady {
                    token: player.token(),
                })
                .is_err(),
            "reset must drop the host endpoint"
        );
    }
}
