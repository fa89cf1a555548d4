//! Long-lived state of one playground instance.
//!
//! Everything that used to be free-floating page state lives in owned
//! objects here, so multiple independent sessions can coexist and tests
//! never need a global reset.

/// Shown in the editor when the default sample cannot be fetched on startup.
pub const LOAD_FAILURE_PLACEHOLDER: &str = "-- Failed to load default example";

/// The current program text. Single owner; every other component only ever
/// reads a snapshot.
#[derive(Debug, Default)]
pub struct SourceBuffer {
    text: String,
}

impl SourceBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the current text, for handing to a run or a share.
    #[must_use]
    pub fn snapshot(&self) -> String {
        self.text.clone()
    }

    /// Replaces the whole buffer, e.g. when a sample or shared snippet loads.
    pub fn replace_all(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Sidebar state of the documentation browser.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocUiState {
    /// `None` shows all modules
    pub selected_module: Option<String>,
    /// case-insensitive substring filter; empty matches everything
    pub search_text: String,
}

impl DocUiState {
    /// Selects a module; selecting the active module again deselects it.
    pub fn toggle_module(&mut self, module: &str) {
        if self.selected_module.as_deref() == Some(module) {
            self.selected_module = None;
        } else {
            self.selected_module = Some(module.to_owned());
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }
}

/// One playground instance: the editor buffer plus the docs sidebar state.
#[derive(Debug, Default)]
pub struct PlaygroundSession {
    pub buffer: SourceBuffer,
    pub docs_ui: DocUiState,
}

impl PlaygroundSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::{DocUiState, SourceBuffer};

    #[test]
    fn replace_all_overwrites_previous_text() {
        let mut buffer = SourceBuffer::new();
        buffer.replace_all("print(1)");
        buffer.replace_all("print(2)");
        assert_eq!(buffer.snapshot(), "print(2)");
    }

    #[test]
    fn snapshot_is_a_copy() {
        let mut buffer = SourceBuffer::new();
        buffer.replace_all("a");
        let snapshot = buffer.snapshot();
        buffer.replace_all("b");
        assert_eq!(snapshot, "a");
    }

    #[test]
    fn toggling_the_selected_module_deselects_it() {
        let mut state = DocUiState::default();
        state.toggle_module("glm");
        assert_eq!(state.selected_module.as_deref(), Some("glm"));
        state.toggle_module("glm");
        assert_eq!(state.selected_module, None);
        state.toggle_module("glm");
        state.toggle_module("sokol");
        assert_eq!(state.selected_module.as_deref(), Some("sokol"));
    }
}
