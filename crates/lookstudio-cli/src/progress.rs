use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use lookstudio_core::session::{SessionChange, SessionObserver, SessionStore};

/// Spinner that follows the edit request lifecycle.
pub struct SpinnerObserver {
    bar: ProgressBar,
}

impl SpinnerObserver {
    pub fn new() -> Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg} [{elapsed}]")?);
        Ok(Self { bar })
    }
}

impl SessionObserver for SpinnerObserver {
    fn session_changed(&self, _session: &SessionStore, change: SessionChange) {
        match change {
            SessionChange::RequestStarted => {
                self.bar.set_message("Editing image");
                self.bar.enable_steady_tick(Duration::from_millis(100));
            }
            SessionChange::RequestSucceeded => self.bar.finish_with_message("Done"),
            SessionChange::RequestFailed | SessionChange::RequestAbandoned => {
                if !self.bar.is_finished() {
                    self.bar.abandon_with_message("Failed");
                }
            }
            _ => {}
        }
    }
}
