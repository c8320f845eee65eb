//! Edit request controller.
//!
//! Validates preconditions, turns a submission into a detached [`EditJob`],
//! and reconciles the job's [`EditOutcome`] back into the session store. At
//! most one job is outstanding at any time; a second submission is rejected,
//! never queued, and the outstanding job is never cancelled.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::{debug, info, warn};

use crate::capability::{EditCapability, EditedImage};
use crate::config::StudioConfig;
use crate::consts::DEFAULT_RESULT_MIME;
use crate::data_uri::DataUri;
use crate::error::{CapabilityError, IntakeError, ValidationError};
use crate::intake::IntakePolicy;
use crate::presets::StylePreset;
use crate::session::{SessionObserver, SessionStore};

/// Identifies the outstanding request and the image it was issued against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket {
    id: u64,
    image_generation: u64,
}

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Everything needed to perform one external edit call, detached from the store.
#[derive(Clone, Debug)]
pub struct EditJob {
    ticket: RequestTicket,
    image_base64: String,
    mime_type: String,
    instruction: String,
}

impl EditJob {
    pub fn ticket(&self) -> RequestTicket {
        self.ticket
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Perform the external call. Blocks until the capability answers.
    pub fn run(&self, capability: &dyn EditCapability) -> EditOutcome {
        let result = capability.edit(&self.image_base64, &self.mime_type, &self.instruction);
        self.finish(result)
    }

    /// Build the outcome from a result obtained some other way.
    pub fn finish(&self, result: Result<EditedImage, CapabilityError>) -> EditOutcome {
        EditOutcome {
            ticket: self.ticket,
            result,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EditOutcome {
    pub ticket: RequestTicket,
    pub result: Result<EditedImage, CapabilityError>,
}

/// What became of a submission attempt.
#[derive(Debug)]
pub enum Submission {
    /// The request started; run the job and hand its outcome to [`EditController::settle`].
    Dispatched(EditJob),
    /// A precondition failed; the session now shows the message.
    Invalid(ValidationError),
    /// Another request is in flight; nothing changed.
    Busy,
    /// A style was selected without an image; only the instruction changed.
    InstructionOnly,
}

/// What [`EditController::settle`] did with an outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    Succeeded,
    Failed,
    /// The image was replaced while the request ran; the result was dropped.
    Discarded,
    /// The outcome did not belong to the outstanding request.
    Ignored,
}

pub struct EditController {
    session: SessionStore,
    intake: IntakePolicy,
    result_mime_type: String,
    image_generation: u64,
    next_ticket: u64,
    in_flight: Option<RequestTicket>,
}

impl Default for EditController {
    fn default() -> Self {
        Self::new(IntakePolicy::default(), DEFAULT_RESULT_MIME)
    }
}

impl EditController {
    pub fn new(intake: IntakePolicy, result_mime_type: impl Into<String>) -> Self {
        Self {
            session: SessionStore::new(),
            intake,
            result_mime_type: result_mime_type.into(),
            image_generation: 0,
            next_ticket: 1,
            in_flight: None,
        }
    }

    pub fn from_config(config: &StudioConfig) -> Self {
        Self::new(
            IntakePolicy::from(&config.intake),
            config.service.result_mime_type.clone(),
        )
    }

    /// Apply new intake and presentation settings. The session is kept.
    pub fn configure(&mut self, config: &StudioConfig) {
        self.intake = IntakePolicy::from(&config.intake);
        self.result_mime_type = config.service.result_mime_type.clone();
        debug!(mime = %self.result_mime_type, "Controller reconfigured");
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn intake(&self) -> &IntakePolicy {
        &self.intake
    }

    pub fn in_flight(&self) -> Option<RequestTicket> {
        self.in_flight
    }

    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.session.subscribe(observer);
    }

    pub fn set_instruction(&mut self, text: impl Into<String>) {
        self.session.set_instruction(text);
    }

    pub fn dismiss_error(&mut self) {
        self.session.dismiss_error();
    }

    /// File intake boundary: validate the content type and size, then store
    /// the image. A rejected file only reports its error to the session.
    pub fn load_image(
        &mut self,
        bytes: Vec<u8>,
        declared_mime: Option<&str>,
    ) -> Result<(), IntakeError> {
        match self.intake.check(&bytes, declared_mime) {
            Ok(mime) => {
                self.image_generation += 1;
                self.session.set_original_image(bytes, mime);
                Ok(())
            }
            Err(e) => {
                warn!("Rejected image: {e}");
                self.session.report_error(e.to_string());
                Err(e)
            }
        }
    }

    pub fn submit_edit(&mut self, instruction: &str) -> Submission {
        if let Some(ticket) = self.in_flight {
            debug!(ticket = ticket.id, "Submission rejected, request already in flight");
            return Submission::Busy;
        }

        let (image_base64, mime_type) = match self.session.original() {
            Some(original) => (
                original.encoded().payload().to_string(),
                original.mime_type().to_string(),
            ),
            None => return self.reject(ValidationError::MissingImage),
        };
        if instruction.is_empty() {
            return self.reject(ValidationError::EmptyInstruction);
        }

        if self.session.begin_request().is_err() {
            return Submission::Busy;
        }

        let ticket = RequestTicket {
            id: self.next_ticket,
            image_generation: self.image_generation,
        };
        self.next_ticket += 1;
        self.in_flight = Some(ticket);

        info!(ticket = ticket.id, mime = %mime_type, "Edit request started");

        Submission::Dispatched(EditJob {
            ticket,
            image_base64,
            mime_type,
            instruction: instruction.to_string(),
        })
    }

    /// Put the preset's text in the instruction field and, when an image is
    /// loaded, submit it right away.
    pub fn select_style(&mut self, preset: &StylePreset) -> Submission {
        self.session.set_instruction(preset.instruction.clone());
        if self.session.original().is_none() {
            debug!(style = %preset.name, "Style selected without an image");
            return Submission::InstructionOnly;
        }
        self.submit_edit(&preset.instruction)
    }

    /// Reconcile a finished job into the session.
    pub fn settle(&mut self, outcome: EditOutcome) -> Settlement {
        if self.in_flight != Some(outcome.ticket) {
            warn!(ticket = outcome.ticket.id, "Ignoring outcome for a request that is not in flight");
            return Settlement::Ignored;
        }
        self.in_flight = None;

        if outcome.ticket.image_generation != self.image_generation {
            info!(ticket = outcome.ticket.id, "Image replaced during the request, dropping its result");
            self.session.abandon_request();
            return Settlement::Discarded;
        }

        match outcome.result.and_then(|edited| self.present(edited)) {
            Ok(result) => {
                info!(ticket = outcome.ticket.id, mime = result.mime_type(), "Edit request succeeded");
                self.session.complete_request(result);
                Settlement::Succeeded
            }
            Err(e) => {
                warn!(ticket = outcome.ticket.id, "Edit request failed: {e}");
                self.session.fail_request(e.to_string());
                Settlement::Failed
            }
        }
    }

    /// Run a job on the calling thread and settle it.
    pub fn execute(&mut self, job: EditJob, capability: &dyn EditCapability) -> Settlement {
        let outcome = job.run(capability);
        self.settle(outcome)
    }

    fn reject(&mut self, error: ValidationError) -> Submission {
        debug!("Submission invalid: {error}");
        self.session.fail_request(error.to_string());
        Submission::Invalid(error)
    }

    /// Wrap the returned payload for display, rejecting empty or undecodable data.
    fn present(&self, edited: EditedImage) -> Result<DataUri, CapabilityError> {
        let payload = edited.data.trim();
        if payload.is_empty() {
            return Err(CapabilityError::MalformedResponse(
                "the image payload is empty".to_string(),
            ));
        }
        match BASE64.decode(payload.as_bytes()) {
            Ok(bytes) if !bytes.is_empty() => {}
            Ok(_) => {
                return Err(CapabilityError::MalformedResponse(
                    "the image payload is empty".to_string(),
                ))
            }
            Err(e) => {
                return Err(CapabilityError::MalformedResponse(format!(
                    "the image payload is not valid base64 ({e})"
                )))
            }
        }

        let mime_type = edited
            .mime_type
            .filter(|mime| !mime.trim().is_empty())
            .unwrap_or_else(|| self.result_mime_type.clone());
        Ok(DataUri::from_base64(mime_type, payload))
    }
}
