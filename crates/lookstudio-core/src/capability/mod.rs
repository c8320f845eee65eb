//! The remote image-edit service, seen from the controller as one blocking call.

pub mod gemini;

pub use gemini::GeminiClient;

use crate::error::CapabilityError;

/// What the service hands back for a successful edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditedImage {
    /// Base64-encoded image bytes.
    pub data: String,
    /// Type reported by the service, if any.
    pub mime_type: Option<String>,
    /// Any text the model returned alongside the image.
    pub text: Option<String>,
}

/// An opaque, single-call edit service.
///
/// Calls block until the service answers or the transport gives up, so they
/// must not run on the UI thread.
pub trait EditCapability: Send + Sync {
    fn edit(
        &self,
        image_base64: &str,
        mime_type: &str,
        instruction: &str,
    ) -> Result<EditedImage, CapabilityError>;
}
