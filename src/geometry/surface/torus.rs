use std::f64::consts::TAU;

use crate::error::Result;
use crate::math::{Point3, Vector3};

use super::{require_positive, Surface, SurfaceDomain};

/// A torus centred on the local origin with its symmetry axis along Z.
///
/// `P(u, v) = ((R + r*cos(v)) * cos(u), (R + r*cos(v)) * sin(u), r*sin(v))`
///
/// `R` is the distance from the centre to the tube centre and `r` the tube
/// radius. Parameters: `u` around the axis, `v` around the tube, both in
/// `[0, 2*pi]`.
///
/// `r >= R` is accepted and yields a self-intersecting spindle torus.
#[derive(Debug, Clone)]
pub struct Torus {
    radius: f64,
    tube: f64,
}

impl Torus {
    /// Creates a new torus.
    ///
    /// # Errors
    ///
    /// Returns an error if either radius is not a positive finite number.
    pub fn new(radius: f64, tube: f64) -> Result<Self> {
        Ok(Self {
            radius: require_positive("torus radius", radius)?,
            tube: require_positive("torus tube", tube)?,
        })
    }

    /// Returns the distance from the centre to the tube centre.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the tube radius.
    #[must_use]
    pub fn tube(&self) -> f64 {
        self.tube
    }
}

impl Surface for Torus {
    fn evaluate(&self, u: f64, v: f64) -> Point3 {
        let ring = self.radius + self.tube * v.cos();
        Point3::new(ring * u.cos(), ring * u.sin(), self.tube * v.sin())
    }

    fn normal(&self, u: f64, v: f64) -> Vector3 {
        let cv = v.cos();
        Vector3::new(cv * u.cos(), cv * u.sin(), v.sin())
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, TAU, 0.0, TAU)
    }
}
