use std::path::PathBuf;
use std::time::Instant;

/// Overall UI state that is not part of the edit session.
#[derive(Default)]
pub struct UIState {
    pub file_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,

    /// When the outstanding edit request was sent.
    pub request_started: Option<Instant>,

    /// Log messages.
    pub log_messages: Vec<String>,

    pub show_about: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
