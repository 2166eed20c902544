//! Scene-to-document export.
//!
//! [`MeshExporter`] turns a snapshot of tessellated solids into one ASCII STL
//! document. [`ExportFile`] names that document for the host's save dialog.

mod file;
mod mesh_export;

pub use file::{ExportFile, STL_FILE_EXTENSION, STL_MIME_TYPE};
pub use mesh_export::{ExportOutcome, MeshExporter, RejectedSolid, RenderSolid};

use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::stl;

/// Model name written on the `solid` and `endsolid` lines by default.
pub const DEFAULT_MODEL_NAME: &str = "SimpAAD_Model";

/// Fewest fractional digits an export may print.
pub const MIN_PRECISION: usize = 6;

/// Most fractional digits an export may print; beyond this `f64` has no more to give.
pub const MAX_PRECISION: usize = 17;

/// How facet normals are carried from local to world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalMode {
    /// Emit the local-space normal unchanged.
    PassThrough,
    /// Map normals through the inverse-transpose of the linear part and
    /// re-normalize.
    #[default]
    WorldSpace,
}

/// Settings for a single export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Name on the `solid` and `endsolid` lines. Must not contain whitespace.
    pub model_name: String,
    /// Fractional digits printed for every coordinate, within
    /// [`MIN_PRECISION`]`..=`[`MAX_PRECISION`].
    pub precision: usize,
    /// How local normals are carried into the document.
    pub normals: NormalMode,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            precision: MIN_PRECISION,
            normals: NormalMode::default(),
        }
    }
}

impl ExportConfig {
    /// Checks the model name and precision.
    ///
    /// # Errors
    ///
    /// Returns an error if the model name is empty or contains whitespace,
    /// or if the precision is outside its allowed range.
    pub fn validate(&self) -> Result<(), ExportError> {
        stl::validate_model_name(&self.model_name)?;
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&self.precision) {
            return Err(ExportError::InvalidPrecision {
                precision: self.precision,
                min: MIN_PRECISION,
                max: MAX_PRECISION,
            });
        }
        Ok(())
    }
}
