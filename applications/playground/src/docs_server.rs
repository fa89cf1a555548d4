//! Serves the documentation browser over HTTP.
//!
//! The view is fully re-derived per request from the loaded entries and the
//! `module`/`search` query parameters; sidebar links encode the next view
//! state, so the server itself stays stateless across requests.

use crate::error::{ApplicationError, ApplicationResult};
use lib_doc_index::{html, DocIndex};
use lib_snippets::SampleStore;
use log::{error, info, warn};
use moonplay_framework::{event::ApplicationEvent, register_ctrlc, session::DocUiState};
use std::{
    fmt::Write,
    sync::mpsc::{channel, TryRecvError},
    time::Duration,
};
use tiny_http::{Header, Request, Response, Server};

const SHUTDOWN_POLL: Duration = Duration::from_millis(200);

const PAGE_STYLE: &str = "\
body { font-family: sans-serif; margin: 0; }
.docs-layout { display: flex; }
.docs-sidebar { width: 14em; padding: 1em; border-right: 1px solid #ccc; }
.docs-content { flex: 1; padding: 1em; }
.module-item { display: block; }
.module-item.active { font-weight: bold; }
.doc-file { color: #666; font-size: smaller; }
.field-name { font-weight: bold; margin-right: 0.5em; }";

/// Runs the documentation server until Ctrl-C.
pub(crate) fn serve(store: &SampleStore, port: u16) -> ApplicationResult<()> {
    // fetch-once: a failed load replaces every view with a textual error
    let index = match store
        .load_doc_json()
        .map_err(|cause| cause.to_string())
        .and_then(|json| DocIndex::from_json(&json).map_err(|cause| cause.to_string()))
    {
        Ok(index) => Ok(index),
        Err(cause) => {
            error!("failed to load documentation: {cause}");
            Err(cause)
        }
    };

    let server = Server::http(("0.0.0.0", port))
        .map_err(|cause| ApplicationError::ServeDocs(cause.to_string()))?;
    info!("serving documentation on http://localhost:{port}/");

    let (event_sender, event_receiver) = channel();
    register_ctrlc(&event_sender);

    loop {
        match event_receiver.try_recv() {
            Ok(ApplicationEvent::Exit) | Err(TryRecvError::Disconnected) => {
                info!("documentation server shutting down");
                return Ok(());
            }
            Err(TryRecvError::Empty) => {}
        }
        match server.recv_timeout(SHUTDOWN_POLL) {
            Ok(Some(request)) => respond(&index, request),
            Ok(None) => {}
            Err(cause) => return Err(ApplicationError::ServeDocs(cause.to_string())),
        }
    }
}

fn respond(index: &Result<DocIndex, String>, request: Request) {
    let state = ui_state_from_query(request.url());
    let (status, body): (u16, String) = match index {
        Ok(index) => (
            200,
            html::render(
                index.entries(),
                state.selected_module.as_deref(),
                &state.search_text,
            ),
        ),
        Err(cause) => (
            500,
            format!(
                "<div class=\"error\">Failed to load documentation: {}</div>",
                html::escape(cause)
            ),
        ),
    };

    let mut page = String::new();
    let _ = write!(
        page,
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>Moonplay docs</title>\
         <style>{PAGE_STYLE}</style></head>\n<body>\n{body}</body></html>\n"
    );

    let header = Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..]);
    let mut response = Response::from_string(page).with_status_code(status);
    match header {
        Ok(header) => response = response.with_header(header),
        Err(()) => warn!("cannot build the content-type header"),
    }
    if let Err(cause) = request.respond(response) {
        warn!("failed to deliver a docs page: {cause}");
    }
}

/// Extracts the sidebar state from the request's query string.
fn ui_state_from_query(url: &str) -> DocUiState {
    let mut state = DocUiState::default();
    let Some((_path, query)) = url.split_once('?') else {
        return state;
    };
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "module" if !value.is_empty() => {
                state.selected_module = Some(percent_decode(value));
            }
            "search" => state.set_search(percent_decode(value)),
            _ => {}
        }
    }
    state
}

/// Minimal decoder for the two query parameters this server understands.
fn percent_decode(value: &str) -> String {
    let mut decoded = String::with_capacity(value.len());
    let mut bytes = value.bytes();
    let mut buffer = Vec::new();
    while let Some(byte) = bytes.next() {
        match byte {
            b'+' => buffer.push(b' '),
            b'%' => {
                let high = bytes.next();
                let low = bytes.next();
                let decoded_byte = high
                    .zip(low)
                    .and_then(|(high, low)| hex_value(high).zip(hex_value(low)))
                    .map(|(high, low)| high << 4 | low);
                match decoded_byte {
                    Some(decoded_byte) => buffer.push(decoded_byte),
                    // keep malformed escapes as-is
                    None => buffer.push(b'%'),
                }
            }
            other => buffer.push(other),
        }
    }
    decoded.push_str(&String::from_utf8_lossy(&buffer));
    decoded
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{percent_decode, ui_state_from_query};

    #[test]
    fn query_parameters_drive_the_ui_state() {
        let state = ui_state_from_query("/?module=sokol&search=begin");
        assert_eq!(state.selected_module.as_deref(), Some("sokol"));
        assert_eq!(state.search_text, "begin");
    }

    #[test]
    fn missing_query_yields_the_default_state() {
        let state = ui_state_from_query("/");
        assert_eq!(state.selected_module, None);
        assert_eq!(state.search_text, "");
    }

    #[test]
    fn empty_module_parameter_selects_nothing() {
        let state = ui_state_from_query("/?module=&search=");
        assert_eq!(state.selected_module, None);
    }

    #[test]
    fn decodes_spaces_and_escapes() {
        assert_eq!(percent_decode("a+b"), "a b");
        assert_eq!(percent_decode("vec2%2Eadd"), "vec2.add");
        assert_eq!(percent_decode("100%"), "100%");
    }
}
