use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Capability(#[from] CapabilityError),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Could not serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Unknown style preset: {0}")]
    UnknownStyle(String),

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),
}

pub type Result<T> = std::result::Result<T, StudioError>;

/// Preconditions checked before any request leaves the process.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please upload an image before generating an edit.")]
    MissingImage,

    #[error("Please provide an editing prompt.")]
    EmptyInstruction,
}

/// A selected file that cannot become the original image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Please select a valid image file ({mime} is not supported).")]
    UnsupportedType { mime: String },

    #[error("Please select a valid image file (the file type could not be determined).")]
    Unrecognized,

    #[error("The selected file is empty.")]
    Empty,

    #[error("Image is too large ({size} bytes, limit is {limit} bytes).")]
    TooLarge { size: usize, limit: usize },
}

/// Failures surfaced by the remote edit service or its transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("No Gemini API key configured (set GEMINI_API_KEY or service.api_key).")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("The request was blocked by the service: {0}")]
    Blocked(String),

    #[error("The model did not return an image: {0}")]
    NoImage(String),

    #[error("Malformed response from the edit service: {0}")]
    MalformedResponse(String),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("An edit request is already in progress.")]
    AlreadyInFlight,
}
