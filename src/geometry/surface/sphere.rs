use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::Result;
use crate::math::{Point3, Vector3};

use super::{require_positive, Surface, SurfaceDomain};

/// A sphere centred on the local origin with its poles on the Y axis.
///
/// `P(u, v) = r * (cos(v) * sin(u), sin(v), cos(v) * cos(u))`
///
/// Parameters: `u` = longitude `[0, 2*pi]`, `v` = latitude `[-pi/2, pi/2]`.
/// The outward normal is `P / r`.
#[derive(Debug, Clone)]
pub struct Sphere {
    radius: f64,
}

impl Sphere {
    /// Creates a new sphere.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not a positive finite number.
    pub fn new(radius: f64) -> Result<Self> {
        Ok(Self {
            radius: require_positive("sphere radius", radius)?,
        })
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Surface for Sphere {
    fn evaluate(&self, u: f64, v: f64) -> Point3 {
        Point3::from(self.normal(u, v) * self.radius)
    }

    fn normal(&self, u: f64, v: f64) -> Vector3 {
        let cv = v.cos();
        Vector3::new(cv * u.sin(), v.sin(), cv * u.cos())
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, TAU, -FRAC_PI_2, FRAC_PI_2)
    }
}
