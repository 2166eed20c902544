//! Boundary to the remote service that turns descriptions, sketches and
//! speech into shape records.
//!
//! No network client lives here. Hosts implement [`ShapeInterpreter`] on top
//! of whatever service they use and hand the result to
//! [`Scene::interpret_and_add`](crate::scene::Scene::interpret_and_add).

use serde::{Deserialize, Serialize};

use crate::error::InterpretError;
use crate::scene::{ShapeParams, ShapeType};

/// Instruction sent alongside every interpretation request.
pub const SYSTEM_INSTRUCTION: &str = "You are a CAD design assistant. \
Interpret user descriptions or drawings into 3D primitive parameters. \
Always return a JSON object with fields \"type\", \"params\" and \"label\". \
Units are in millimeters. \
Support: box (width, height, depth), sphere (radius), cylinder (radius, height), \
cone (radius, height), torus (radius, tube).";

/// MIME type assumed for images without an explicit one.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Translates free text, optionally with a sketch image, into a shape record.
pub trait ShapeInterpreter {
    /// Interprets one request.
    ///
    /// # Errors
    ///
    /// Returns an error if the service fails or its answer cannot be decoded.
    fn interpret(
        &self,
        prompt: &str,
        image: Option<&ImagePayload>,
    ) -> Result<ShapeRequest, InterpretError>;
}

/// Best-effort shape record returned by an interpretation service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeRequest {
    /// Kind name as returned by the service, any case.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Partial, kind-appropriate parameters.
    pub params: ShapeParams,
    /// Display name.
    pub label: Option<String>,
}

impl ShapeRequest {
    /// Decodes a JSON response body. An empty body decodes to an empty request.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for a shape record.
    pub fn from_json(text: &str) -> Result<Self, InterpretError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(text)?)
    }

    /// Parses the requested kind.
    ///
    /// # Errors
    ///
    /// Returns an error if no kind was given or it is not supported.
    pub fn shape_type(&self) -> Result<ShapeType, InterpretError> {
        self.kind
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(InterpretError::MissingKind)?
            .parse()
    }
}

/// An inline image attached to an interpretation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    /// MIME type of the image.
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub data: String,
}

impl ImagePayload {
    /// Splits a `data:<mime>;base64,<data>` URL into its parts.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no `,` separator or no data after it.
    pub fn from_data_url(url: &str) -> Result<Self, InterpretError> {
        let (header, data) = url
            .split_once(',')
            .ok_or_else(|| InterpretError::InvalidImage("missing ',' separator".into()))?;
        if data.is_empty() {
            return Err(InterpretError::InvalidImage("empty image data".into()));
        }
        let mime_type = header
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME);
        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }
}
