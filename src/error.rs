use thiserror::Error;

use crate::scene::SolidId;

/// Top-level error type for the SimpAAD modeling crate.
#[derive(Debug, Error)]
pub enum SimpaadError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Interpret(#[from] InterpretError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to geometric construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to triangle buffers.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("vertex index {index} is out of range for {len} vertices")]
    IndexOutOfRange { index: u32, len: usize },

    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Errors raised by the scene store.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("solid not found: {0:?}")]
    SolidNotFound(SolidId),

    #[error("parameter {name} = {value} must be a positive finite number")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Errors raised while exporting a scene to a mesh document.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid model name {0:?}: must be non-empty and contain no whitespace")]
    InvalidModelName(String),

    #[error("precision {precision} is out of range {min}..={max}")]
    InvalidPrecision {
        precision: usize,
        min: usize,
        max: usize,
    },

    #[error("solid {solid:?} produced a non-finite value in facet {facet}")]
    NonFinite { solid: SolidId, facet: usize },

    #[error("solid {solid:?} has a singular world transform")]
    SingularTransform { solid: SolidId },

    #[error("solid {solid:?} has a malformed triangle buffer: {source}")]
    MalformedMesh {
        solid: SolidId,
        source: TessellationError,
    },
}

/// Errors at the shape interpretation boundary.
#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("interpretation did not name a shape type")]
    MissingKind,

    #[error("unknown shape type: {0}")]
    UnknownKind(String),

    #[error("malformed interpretation response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid image payload: {0}")]
    InvalidImage(String),

    #[error("interpretation service failed: {0}")]
    Service(String),
}

/// Convenience type alias for results using [`SimpaadError`].
pub type Result<T> = std::result::Result<T, SimpaadError>;
