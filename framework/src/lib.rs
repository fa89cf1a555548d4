//! Host-side framework of the playground: the editor session, the run
//! orchestrator performing the readiness handshake with a player runtime,
//! and process-wide logging setup.

use log::error;
use std::sync::mpsc::Sender;

pub mod event;
pub mod logging;
pub mod orchestrator;
pub mod session;

use event::ApplicationEvent;

/// Forwards Ctrl-C to the application's event channel so the shell can shut
/// down its threads in an orderly fashion.
pub fn register_ctrlc(event_sender: &Sender<ApplicationEvent>) {
    let event_sender = event_sender.clone();
    let result = ctrlc::set_handler(move || {
        if event_sender.send(ApplicationEvent::Exit).is_err() {
            error!("cannot forward Ctrl-C: event channel is closed");
        }
    });
    if let Err(error) = result {
        error!("failed to register Ctrl-C handler: {error}");
    }
}
