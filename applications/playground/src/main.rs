//! The playground shell: loads a sample or shared snippet into the editor
//! buffer, runs it on a headless player via the readiness handshake, shares
//! the buffer as a gist, or serves the documentation browser.

#![expect(
    clippy::print_stdout,
    reason = "a command line tool reports results on stdout"
)]

mod args;
mod docs_server;
mod error;

use args::{Args, USAGE};
use error::{ApplicationError, ApplicationResult};
use lib_snippets::{GistClient, SampleStore, DEFAULT_GIST_API, DEFAULT_SAMPLE};
use log::{error, info, warn};
use moonplay_framework::{
    event::ApplicationEvent,
    logging::init_logger,
    orchestrator::RunOrchestrator,
    register_ctrlc,
    session::{PlaygroundSession, LOAD_FAILURE_PLACEHOLDER},
};
use runtime_headless::{HeadlessLauncher, LogPlayer};
use std::{env, process::ExitCode, sync::mpsc::channel, time::Duration};

/// Bounded wait for the player's ready signal; the framework itself would
/// wait indefinitely.
const READY_TIMEOUT: Duration = Duration::from_secs(10);

/// Share URLs point at the hosted playground, which picks the snippet up via
/// its `gist` query parameter.
const SHARE_BASE: &str = "https://moonplay.dev/playground";

fn main() -> ExitCode {
    init_logger();

    match run_application() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            error.into()
        }
    }
}

fn run_application() -> ApplicationResult<()> {
    let args = Args::parse(env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let store = SampleStore::new(&args.assets_base);
    if let Some(port) = args.serve_docs {
        return docs_server::serve(&store, port);
    }

    let gist_client = GistClient::new(DEFAULT_GIST_API, SHARE_BASE);
    let mut session = PlaygroundSession::new();
    if !load_initial_code(&mut session, &store, &gist_client, &args)? {
        // nothing runnable; the buffer shows the placeholder
        println!("{}", session.buffer.snapshot());
        return Ok(());
    }

    if args.share {
        let url = gist_client
            .save(&session.buffer.snapshot())
            .ok_or(ApplicationError::ShareFailed)?;
        println!("{url}");
        return Ok(());
    }

    let launcher = HeadlessLauncher::new(LogPlayer::default);
    let mut orchestrator = RunOrchestrator::new(launcher).with_ready_timeout(READY_TIMEOUT);
    orchestrator.run(&session.buffer.snapshot(), args.resolution)?;

    let (event_sender, event_receiver) = channel();
    register_ctrlc(&event_sender);
    info!("player is running; press Ctrl-C to exit");
    match event_receiver.recv() {
        Ok(ApplicationEvent::Exit) | Err(_) => {}
    }
    orchestrator.reset();
    Ok(())
}

/// Fills the editor buffer. Returns whether there is something to run.
///
/// A failed sample or snippet load leaves the buffer untouched and aborts;
/// only the default-on-startup path degrades to a visible placeholder.
fn load_initial_code(
    session: &mut PlaygroundSession,
    store: &SampleStore,
    gist_client: &GistClient,
    args: &Args,
) -> ApplicationResult<bool> {
    if let Some(id) = &args.gist {
        let Some(code) = gist_client.load(id) else {
            return Err(ApplicationError::Load(format!("shared snippet `{id}`")));
        };
        session.buffer.replace_all(code);
        return Ok(true);
    }

    if let Some(name) = &args.sample {
        let code = store
            .load_sample(name)
            .map_err(|cause| ApplicationError::Load(format!("sample `{name}`: {cause}")))?;
        session.buffer.replace_all(code);
        return Ok(true);
    }

    match store.load_sample(DEFAULT_SAMPLE) {
        Ok(code) => {
            session.buffer.replace_all(code);
            Ok(true)
        }
        Err(cause) => {
            warn!("failed to load the default sample: {cause}");
            session.buffer.replace_all(LOAD_FAILURE_PLACEHOLDER);
            Ok(false)
        }
    }
}
