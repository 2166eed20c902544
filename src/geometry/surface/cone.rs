use std::f64::consts::TAU;

use crate::error::Result;
use crate::math::{Point3, Vector3};

use super::{require_positive, Surface, SurfaceDomain};

/// Lateral surface of a cone centred on the local origin, axis along Y.
///
/// The base circle of radius `r` lies at `y = -h/2` and the apex at `y = h/2`.
///
/// `P(u, v) = ((1 - v) * r * sin(u), -h/2 + v * h, (1 - v) * r * cos(u))`
///
/// Parameters: `u` = angle `[0, 2*pi]`, `v` = fraction of the way from base
/// to apex `[0, 1]`. The outward normal `(h * sin(u), r, h * cos(u)) / |..|`
/// is constant along each generator, so it is defined at the apex too.
#[derive(Debug, Clone)]
pub struct Cone {
    radius: f64,
    height: f64,
}

impl Cone {
    /// Creates a new cone.
    ///
    /// # Errors
    ///
    /// Returns an error if the base radius or height is not a positive finite number.
    pub fn new(radius: f64, height: f64) -> Result<Self> {
        Ok(Self {
            radius: require_positive("cone radius", radius)?,
            height: require_positive("cone height", height)?,
        })
    }

    /// Returns the base radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the apex point.
    #[must_use]
    pub fn apex(&self) -> Point3 {
        Point3::new(0.0, self.height / 2.0, 0.0)
    }
}

impl Surface for Cone {
    fn evaluate(&self, u: f64, v: f64) -> Point3 {
        let r = (1.0 - v) * self.radius;
        Point3::new(r * u.sin(), -self.height / 2.0 + v * self.height, r * u.cos())
    }

    fn normal(&self, u: f64, _v: f64) -> Vector3 {
        Vector3::new(self.height * u.sin(), self.radius, self.height * u.cos()).normalize()
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, TAU, 0.0, 1.0)
    }
}
