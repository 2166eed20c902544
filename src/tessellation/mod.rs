mod tessellate_solid;
mod uv_grid;

pub use tessellate_solid::TessellateSolid;

use crate::error::TessellationError;
use crate::math::{Point3, Vector3, TOLERANCE};

/// Segment counts used by the solid catalog.
///
/// Resolution is fixed per solid kind; consumers of the resulting meshes
/// must not assume any particular triangle count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogResolution {
    /// Longitude segments of a sphere.
    pub sphere_width_segments: usize,
    /// Latitude segments of a sphere.
    pub sphere_height_segments: usize,
    /// Segments around a cylinder.
    pub cylinder_radial_segments: usize,
    /// Segments around a cone.
    pub cone_radial_segments: usize,
    /// Segments around the tube cross-section of a torus.
    pub torus_radial_segments: usize,
    /// Segments around the symmetry axis of a torus.
    pub torus_tubular_segments: usize,
}

impl Default for CatalogResolution {
    fn default() -> Self {
        Self {
            sphere_width_segments: 32,
            sphere_height_segments: 32,
            cylinder_radial_segments: 32,
            cone_radial_segments: 32,
            torus_radial_segments: 16,
            torus_tubular_segments: 100,
        }
    }
}

impl CatalogResolution {
    /// Checks that every segment count can close its surface.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first count below its minimum: 3 for
    /// segments around an axis, 2 for sphere latitude bands.
    pub fn validate(&self) -> Result<(), TessellationError> {
        let checks = [
            ("sphere_width_segments", self.sphere_width_segments, 3),
            ("sphere_height_segments", self.sphere_height_segments, 2),
            ("cylinder_radial_segments", self.cylinder_radial_segments, 3),
            ("cone_radial_segments", self.cone_radial_segments, 3),
            ("torus_radial_segments", self.torus_radial_segments, 3),
            ("torus_tubular_segments", self.torus_tubular_segments, 3),
        ];
        for (name, value, min) in checks {
            if value < min {
                return Err(TessellationError::InvalidParameters(format!(
                    "{name} = {value}, need at least {min}"
                )));
            }
        }
        Ok(())
    }
}

/// An indexed triangle mesh in a solid's local frame.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals, parallel to `vertices`. May be empty.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle, counter-clockwise
    /// seen from outside).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Appends `other`, offsetting its indices past the existing vertices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(
            other
                .indices
                .iter()
                .map(|tri| [tri[0] + offset, tri[1] + offset, tri[2] + offset]),
        );
    }

    /// Expands the mesh into non-indexed triangles with one flat normal each.
    ///
    /// The face normal is the re-normalized average of the three vertex
    /// normals. When the mesh carries no per-vertex normals, or the average
    /// cancels out, the geometric normal from the winding order is used.
    ///
    /// # Errors
    ///
    /// Returns an error if any index is out of range.
    pub fn to_non_indexed(&self) -> Result<Vec<Triangle>, TessellationError> {
        let has_normals = self.normals.len() == self.vertices.len();
        let mut triangles = Vec::with_capacity(self.indices.len());

        for tri in &self.indices {
            let mut vertices = [Point3::origin(); 3];
            let mut normal_sum = Vector3::zeros();
            for (slot, &index) in vertices.iter_mut().zip(tri) {
                let i = index as usize;
                *slot = *self
                    .vertices
                    .get(i)
                    .ok_or(TessellationError::IndexOutOfRange {
                        index,
                        len: self.vertices.len(),
                    })?;
                if has_normals {
                    normal_sum += self.normals[i];
                }
            }

            let len = normal_sum.norm();
            let triangle = if has_normals && len > TOLERANCE {
                Triangle::new(vertices, normal_sum / len)
            } else {
                Triangle::from_winding(vertices)
            };
            triangles.push(triangle);
        }

        Ok(triangles)
    }
}

/// A single non-indexed triangle with a flat face normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// The three corners, counter-clockwise seen from outside.
    pub vertices: [Point3; 3],
    /// Outward face normal.
    pub normal: Vector3,
}

impl Triangle {
    /// Creates a triangle with an explicit normal.
    #[must_use]
    pub fn new(vertices: [Point3; 3], normal: Vector3) -> Self {
        Self { vertices, normal }
    }

    /// Creates a triangle whose normal follows its winding order.
    #[must_use]
    pub fn from_winding(vertices: [Point3; 3]) -> Self {
        let normal = geometric_normal(&vertices);
        Self { vertices, normal }
    }
}

/// Unit normal of a triangle from its winding, or zero if it is degenerate.
#[must_use]
pub fn geometric_normal(vertices: &[Point3; 3]) -> Vector3 {
    let n = (vertices[1] - vertices[0]).cross(&(vertices[2] - vertices[0]));
    let len = n.norm();
    if len < TOLERANCE {
        Vector3::zeros()
    } else {
        n / len
    }
}
