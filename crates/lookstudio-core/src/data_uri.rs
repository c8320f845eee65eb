//! `data:<mime>;base64,<payload>` encoding of image bytes.
//!
//! Both the original image and the edit result are held in this form so the
//! presentation layer can show or save them without knowing where they came from.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{Result, StudioError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUri {
    mime_type: String,
    payload: String,
}

impl DataUri {
    /// Base64-encode `bytes` under the given MIME type.
    pub fn encode(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload: BASE64.encode(bytes),
        }
    }

    /// Wrap an already base64-encoded payload. The payload is not re-checked.
    pub fn from_base64(mime_type: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload: payload.into(),
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 text after the comma.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(self.payload.as_bytes())
            .map_err(|e| StudioError::InvalidDataUri(format!("payload is not valid base64: {e}")))
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.payload)
    }
}

impl FromStr for DataUri {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |msg: &str| StudioError::InvalidDataUri(msg.to_string());

        let rest = s
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| invalid("missing `data:` scheme"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| invalid("missing `,` before the payload"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("only base64 payloads are supported"))?;

        if mime_type.is_empty() {
            return Err(invalid("missing media type"));
        }
        if payload.is_empty() {
            return Err(invalid("empty payload"));
        }
        if BASE64.decode(payload.as_bytes()).is_err() {
            return Err(invalid("payload is not valid base64"));
        }

        Ok(Self::from_base64(mime_type, payload))
    }
}
