use super::{Matrix3, Point3, UnitQuaternion, Vector3, TOLERANCE};

/// Placement of a solid's local frame in world space.
///
/// Composed as `translation * rotation * scale`, so a local point is scaled
/// first, then rotated, then moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    translation: Vector3,
    rotation: UnitQuaternion,
    scale: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// A translation-only transform.
    #[must_use]
    pub fn from_translation(translation: Vector3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// A translation-only transform placing the local origin at `position`.
    #[must_use]
    pub fn from_position(position: &Point3) -> Self {
        Self::from_translation(position.coords)
    }

    /// Returns a copy with the given rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: UnitQuaternion) -> Self {
        self.rotation = rotation;
        self
    }

    /// Returns a copy with the given per-axis scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Vector3) -> Self {
        self.scale = scale;
        self
    }

    /// Returns a copy with the translation replaced.
    #[must_use]
    pub fn with_translation(mut self, translation: Vector3) -> Self {
        self.translation = translation;
        self
    }

    #[must_use]
    pub fn translation(&self) -> &Vector3 {
        &self.translation
    }

    #[must_use]
    pub fn rotation(&self) -> &UnitQuaternion {
        &self.rotation
    }

    #[must_use]
    pub fn scale(&self) -> &Vector3 {
        &self.scale
    }

    /// World position of the local origin.
    #[must_use]
    pub fn position(&self) -> Point3 {
        Point3::from(self.translation)
    }

    /// Returns `true` when rotation is identity and scale is `(1, 1, 1)`.
    #[must_use]
    pub fn is_translation_only(&self) -> bool {
        self.rotation.angle().abs() < TOLERANCE
            && (self.scale - Vector3::new(1.0, 1.0, 1.0)).norm() < TOLERANCE
    }

    /// Linear (rotation and scale) part of the transform.
    #[must_use]
    pub fn linear(&self) -> Matrix3 {
        self.rotation.to_rotation_matrix().into_inner() * Matrix3::from_diagonal(&self.scale)
    }

    /// Maps a local-space point into world space.
    #[must_use]
    pub fn transform_point(&self, point: &Point3) -> Point3 {
        let scaled = point.coords.component_mul(&self.scale);
        Point3::from(self.rotation * scaled + self.translation)
    }

    /// Inverse-transpose of the linear part, or `None` if it is singular.
    #[must_use]
    pub fn normal_matrix(&self) -> Option<Matrix3> {
        self.linear().try_inverse().map(|inv| inv.transpose())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn identity_is_translation_only() {
        assert!(Transform::identity().is_translation_only());
        assert!(Transform::from_translation(Vector3::new(1.0, 2.0, 3.0)).is_translation_only());
    }

    #[test]
    fn translation_moves_points() {
        let t = Transform::from_position(&Point3::new(0.0, 1.0, 0.0));
        let p = t.transform_point(&Point3::new(0.5, -0.5, 0.5));
        assert_relative_eq!(p, Point3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn rotation_and_scale_apply_before_translation() {
        let t = Transform::from_translation(Vector3::new(1.0, -2.0, 3.0))
            .with_rotation(UnitQuaternion::from_scaled_axis(Vector3::z() * FRAC_PI_2))
            .with_scale(Vector3::new(2.0, 1.0, 1.0));
        let p = t.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(1.0, 0.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn translation_leaves_normals_untouched() {
        let t = Transform::from_translation(Vector3::new(5.0, 5.0, 5.0));
        let n = t.normal_matrix().unwrap() * Vector3::x();
        assert_relative_eq!(n, Vector3::x());
    }

    #[test]
    fn rotation_rotates_normals() {
        let t = Transform::identity()
            .with_rotation(UnitQuaternion::from_scaled_axis(Vector3::z() * FRAC_PI_2));
        assert!(!t.is_translation_only());
        let n = t.normal_matrix().unwrap() * Vector3::x();
        assert_relative_eq!(n, Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn non_uniform_scale_uses_inverse_transpose() {
        // Plane x + y = const, stretched 2x along x: normal must lean toward y.
        let t = Transform::identity().with_scale(Vector3::new(2.0, 1.0, 1.0));
        let n = (t.normal_matrix().unwrap() * Vector3::new(1.0, 1.0, 0.0)).normalize();
        let expected = Vector3::new(0.5, 1.0, 0.0).normalize();
        assert_relative_eq!(n, expected, epsilon = 1e-12);
    }

    #[test]
    fn zero_scale_is_singular() {
        let t = Transform::identity().with_scale(Vector3::new(1.0, 0.0, 1.0));
        assert!(t.normal_matrix().is_none());
    }
}
