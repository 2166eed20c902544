use std::f64::consts::TAU;

use crate::error::Result;
use crate::math::{Point3, Vector3};

use super::{require_positive, Surface, SurfaceDomain};

/// Lateral surface of a cylinder centred on the local origin, axis along Y.
///
/// `P(u, v) = (r * sin(u), v, r * cos(u))` with `v` in `[-h/2, h/2]`.
///
/// The outward normal is `(sin(u), 0, cos(u))`.
#[derive(Debug, Clone)]
pub struct Cylinder {
    radius: f64,
    height: f64,
}

impl Cylinder {
    /// Creates a new cylinder.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius or height is not a positive finite number.
    pub fn new(radius: f64, height: f64) -> Result<Self> {
        Ok(Self {
            radius: require_positive("cylinder radius", radius)?,
            height: require_positive("cylinder height", height)?,
        })
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Surface for Cylinder {
    fn evaluate(&self, u: f64, v: f64) -> Point3 {
        Point3::new(self.radius * u.sin(), v, self.radius * u.cos())
    }

    fn normal(&self, u: f64, _v: f64) -> Vector3 {
        Vector3::new(u.sin(), 0.0, u.cos())
    }

    fn domain(&self) -> SurfaceDomain {
        let half = self.height / 2.0;
        SurfaceDomain::new(0.0, TAU, -half, half)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn evaluate_at_zero() {
        let c = Cylinder::new(2.0, 4.0).unwrap();
        let p = c.evaluate(0.0, 1.0);
        assert!((p - Point3::new(0.0, 1.0, 2.0)).norm() < TOLERANCE);
    }

    #[test]
    fn evaluate_quarter_turn() {
        let c = Cylinder::new(2.0, 4.0).unwrap();
        let p = c.evaluate(FRAC_PI_2, 0.0);
        assert!((p - Point3::new(2.0, 0.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn domain_spans_height() {
        let d = Cylinder::new(1.0, 6.0).unwrap().domain();
        assert!((d.v_min + 3.0).abs() < TOLERANCE);
        assert!((d.v_max - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn partials_cross_outward() {
        let c = Cylinder::new(1.5, 2.0).unwrap();
        let (u, v, h) = (2.1, 0.3, 1e-6);
        let pu = c.evaluate(u + h, v) - c.evaluate(u, v);
        let pv = c.evaluate(u, v + h) - c.evaluate(u, v);
        assert!(pu.cross(&pv).dot(&c.normal(u, v)) > 0.0);
    }

    #[test]
    fn invalid_dimensions() {
        assert!(Cylinder::new(0.0, 1.0).is_err());
        assert!(Cylinder::new(1.0, -2.0).is_err());
    }
}
