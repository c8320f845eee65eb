//! Session state store: the single owner of everything the UI renders.
//!
//! Every mutation replaces whole values and then notifies all registered
//! observers synchronously, before the mutating call returns.

use std::fmt;

use crate::data_uri::DataUri;
use crate::error::SessionError;

/// The loaded source image. Bytes and their encoded form are always set together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OriginalImage {
    bytes: Vec<u8>,
    encoded: DataUri,
}

impl OriginalImage {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        let encoded = DataUri::encode(mime_type, &bytes);
        Self { bytes, encoded }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        self.encoded.mime_type()
    }

    pub fn encoded(&self) -> &DataUri {
        &self.encoded
    }
}

/// Lifecycle of the edit request, derived from the stored fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    InFlight,
    Succeeded,
    Failed(String),
}

impl RequestState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::InFlight => write!(f, "In flight"),
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Failed(message) => write!(f, "Failed: {message}"),
        }
    }
}

/// Which store operation triggered a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionChange {
    OriginalImage,
    Instruction,
    RequestStarted,
    RequestSucceeded,
    RequestFailed,
    RequestAbandoned,
    ErrorReported,
    ErrorDismissed,
}

/// Receives a callback after every store mutation.
///
/// Implementors drive repaints, progress spinners, logging, or anything else
/// that has to follow the session.
pub trait SessionObserver: Send {
    fn session_changed(&self, session: &SessionStore, change: SessionChange);
}

#[derive(Default)]
pub struct SessionStore {
    original: Option<OriginalImage>,
    instruction: String,
    result: Option<DataUri>,
    error: Option<String>,
    /// Set only by a failed request; reported errors do not count.
    failed: bool,
    loading: bool,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    pub fn original(&self) -> Option<&OriginalImage> {
        self.original.as_ref()
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn result(&self) -> Option<&DataUri> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn request_state(&self) -> RequestState {
        if self.loading {
            RequestState::InFlight
        } else if self.failed {
            RequestState::Failed(self.error.clone().unwrap_or_default())
        } else if self.result.is_some() {
            RequestState::Succeeded
        } else {
            RequestState::Idle
        }
    }

    /// Replace the original image and reset the result and any error.
    ///
    /// The loading flag is left alone: a request already in flight still
    /// settles through the controller.
    pub fn set_original_image(&mut self, bytes: Vec<u8>, mime_type: impl Into<String>) {
        let image = OriginalImage::new(bytes, mime_type);
        tracing::debug!(
            mime = image.mime_type(),
            size = image.bytes().len(),
            "Original image set"
        );
        self.original = Some(image);
        self.result = None;
        self.error = None;
        self.failed = false;
        self.notify(SessionChange::OriginalImage);
    }

    pub fn set_instruction(&mut self, text: impl Into<String>) {
        self.instruction = text.into();
        self.notify(SessionChange::Instruction);
    }

    pub fn begin_request(&mut self) -> Result<(), SessionError> {
        if self.loading {
            return Err(SessionError::AlreadyInFlight);
        }
        self.loading = true;
        self.result = None;
        self.error = None;
        self.failed = false;
        tracing::debug!("Request state -> InFlight");
        self.notify(SessionChange::RequestStarted);
        Ok(())
    }

    pub fn complete_request(&mut self, result: DataUri) {
        self.loading = false;
        self.result = Some(result);
        self.error = None;
        self.failed = false;
        tracing::debug!("Request state -> Succeeded");
        self.notify(SessionChange::RequestSucceeded);
    }

    pub fn fail_request(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.result = None;
        self.error = Some(message.into());
        self.failed = true;
        tracing::debug!("Request state -> Failed");
        self.notify(SessionChange::RequestFailed);
    }

    /// Drop the in-flight marker without recording a result or an error.
    pub fn abandon_request(&mut self) {
        self.loading = false;
        tracing::debug!("Request abandoned");
        self.notify(SessionChange::RequestAbandoned);
    }

    /// Show an error that did not come from a request (e.g. a rejected file).
    ///
    /// The request state is unchanged: a succeeded edit stays succeeded.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.notify(SessionChange::ErrorReported);
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
        self.failed = false;
        self.notify(SessionChange::ErrorDismissed);
    }

    fn notify(&self, change: SessionChange) {
        for observer in &self.observers {
            observer.session_changed(self, change);
        }
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("has_original", &self.original.is_some())
            .field("instruction", &self.instruction)
            .field("state", &self.request_state())
            .field("observers", &self.observers.len())
            .finish()
    }
}
