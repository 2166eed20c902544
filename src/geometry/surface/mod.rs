mod cone;
mod cylinder;
mod sphere;
mod torus;

pub use cone::Cone;
pub use cylinder::Cylinder;
pub use sphere::Sphere;
pub use torus::Torus;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// Parameter domain for a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDomain {
    /// Start of the U parameter range.
    pub u_min: f64,
    /// End of the U parameter range.
    pub u_max: f64,
    /// Start of the V parameter range.
    pub v_min: f64,
    /// End of the V parameter range.
    pub v_max: f64,
}

impl SurfaceDomain {
    /// Creates a new surface domain.
    #[must_use]
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
        }
    }
}

/// Trait for parametric surfaces in a solid's local frame.
///
/// Implementations are parameterized so that `dP/du x dP/dv` points out of
/// the solid; grid tessellation relies on this for outward winding.
pub trait Surface {
    /// Evaluates the surface at parameters `(u, v)`, returning the 3D point.
    fn evaluate(&self, u: f64, v: f64) -> Point3;

    /// Computes the outward unit normal at parameters `(u, v)`.
    fn normal(&self, u: f64, v: f64) -> Vector3;

    /// Returns the parameter domain of the surface.
    fn domain(&self) -> SurfaceDomain;
}

/// Checks that a dimension is finite and strictly positive.
pub(crate) fn require_positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > TOLERANCE {
        Ok(value)
    } else {
        Err(GeometryError::Degenerate(format!("{name} must be positive, got {value}")).into())
    }
}
