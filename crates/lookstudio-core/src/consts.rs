/// MIME type used to present an edited image when the service does not name one.
pub const DEFAULT_RESULT_MIME: &str = "image/png";

/// Image types accepted at intake unless the config says otherwise.
pub const DEFAULT_ACCEPTED_MIME_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

/// Largest image accepted at intake. Gemini rejects inline request data above 20 MiB.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

/// Base URL of the Gemini REST API.
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Image-capable Gemini model used for edits.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-image-preview";

/// Transport timeout for a single edit call, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Environment variables consulted, in order, when the config carries no API key.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];
