use tracing::{debug, info, warn};

use crate::error::{ExportError, Result};
use crate::math::{Matrix3, Transform, Vector3, TOLERANCE};
use crate::scene::SolidId;
use crate::stl::{self, Facet};
use crate::tessellation::{Triangle, TriangleMesh};

use super::{ExportConfig, NormalMode};

/// One solid as the viewport draws it: its local mesh and world transform.
#[derive(Debug, Clone)]
pub struct RenderSolid {
    pub id: SolidId,
    pub mesh: TriangleMesh,
    pub transform: Transform,
}

impl RenderSolid {
    #[must_use]
    pub fn new(id: SolidId, mesh: TriangleMesh, transform: Transform) -> Self {
        Self {
            id,
            mesh,
            transform,
        }
    }
}

/// A solid left out of the document, with the reason.
#[derive(Debug)]
pub struct RejectedSolid {
    pub id: SolidId,
    pub error: ExportError,
}

/// Result of a successful export.
#[derive(Debug)]
pub struct ExportOutcome {
    /// The complete ASCII STL text.
    pub document: String,
    /// Number of facets written.
    pub facet_count: usize,
    /// Solids skipped because their data could not be written.
    pub rejected: Vec<RejectedSolid>,
}

impl ExportOutcome {
    /// Returns `true` if every solid made it into the document.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Serializes a snapshot of rendered solids into one ASCII STL document.
///
/// Solids are written in the order given, one facet per triangle, with
/// vertices mapped to world space. Nothing is welded, deduplicated or
/// repaired.
pub struct MeshExporter {
    config: ExportConfig,
}

impl MeshExporter {
    /// Creates a new `MeshExporter` operation.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Executes the export.
    ///
    /// A solid whose data cannot be written is skipped and reported in
    /// [`ExportOutcome::rejected`]; the rest of the scene is still exported.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured model name is empty or contains
    /// whitespace, or if the precision is out of range.
    pub fn execute(&self, solids: &[RenderSolid]) -> Result<ExportOutcome> {
        self.config.validate()?;
        let name = &self.config.model_name;

        let mut document = String::new();
        stl::write_header(&mut document, name);

        let mut facet_count = 0;
        let mut rejected = Vec::new();
        for solid in solids {
            if solid.mesh.is_empty() {
                debug!(id = ?solid.id, "solid has no triangles");
                continue;
            }
            match self.write_solid(solid) {
                Ok((block, count)) => {
                    debug!(id = ?solid.id, facets = count, "exported solid");
                    document.push_str(&block);
                    facet_count += count;
                }
                Err(error) => {
                    warn!(id = ?solid.id, %error, "solid skipped in export");
                    rejected.push(RejectedSolid {
                        id: solid.id,
                        error,
                    });
                }
            }
        }

        stl::write_footer(&mut document, name);
        info!(
            solids = solids.len(),
            facets = facet_count,
            rejected = rejected.len(),
            "mesh export finished"
        );

        Ok(ExportOutcome {
            document,
            facet_count,
            rejected,
        })
    }

    /// Writes one solid's facets into a scratch buffer.
    fn write_solid(
        &self,
        solid: &RenderSolid,
    ) -> std::result::Result<(String, usize), ExportError> {
        let triangles = solid
            .mesh
            .to_non_indexed()
            .map_err(|source| ExportError::MalformedMesh {
                solid: solid.id,
                source,
            })?;

        let normal_matrix = self.normal_matrix(solid)?;

        let mut block = String::new();
        for (index, triangle) in triangles.iter().enumerate() {
            let facet = world_facet(triangle, &solid.transform, normal_matrix.as_ref());
            if !facet.is_finite() {
                return Err(ExportError::NonFinite {
                    solid: solid.id,
                    facet: index,
                });
            }
            stl::write_facet(&mut block, &facet, self.config.precision);
        }
        Ok((block, triangles.len()))
    }

    /// Returns the matrix to apply to normals, or `None` to pass them through.
    fn normal_matrix(
        &self,
        solid: &RenderSolid,
    ) -> std::result::Result<Option<Matrix3>, ExportError> {
        match self.config.normals {
            NormalMode::PassThrough => Ok(None),
            NormalMode::WorldSpace if solid.transform.is_translation_only() => Ok(None),
            NormalMode::WorldSpace => solid
                .transform
                .normal_matrix()
                .map(Some)
                .ok_or(ExportError::SingularTransform { solid: solid.id }),
        }
    }
}

/// Maps a local triangle into world space.
///
/// A normal that collapses to zero length under `normal_matrix` is written
/// as the zero vector.
fn world_facet(
    triangle: &Triangle,
    transform: &Transform,
    normal_matrix: Option<&Matrix3>,
) -> Facet {
    let [a, b, c] = triangle.vertices;
    let normal = match normal_matrix {
        None => triangle.normal,
        Some(m) => {
            let n: Vector3 = m * triangle.normal;
            let len = n.norm();
            if len < TOLERANCE {
                Vector3::zeros()
            } else {
                n / len
            }
        }
    };
    Facet {
        normal,
        vertices: [
            transform.transform_point(&a),
            transform.transform_point(&b),
            transform.transform_point(&c),
        ],
    }
}
