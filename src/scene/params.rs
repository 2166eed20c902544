use serde::{Deserialize, Serialize};

use crate::error::SceneError;

use super::solid::{ShapeType, SolidKind};

/// Loosely-typed shape parameters, as edited by hand or returned by an
/// interpretation service.
///
/// Any field may be absent. Fields a kind does not use are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tube: Option<f64>,
    /// Accepted for compatibility; catalog resolution is fixed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<f64>,
}

impl ShapeParams {
    /// Overwrites fields with those present in `patch`.
    pub fn merge(&mut self, patch: &ShapeParams) {
        let fields = [
            (&mut self.width, patch.width),
            (&mut self.height, patch.height),
            (&mut self.depth, patch.depth),
            (&mut self.radius, patch.radius),
            (&mut self.tube, patch.tube),
            (&mut self.segments, patch.segments),
        ];
        for (slot, value) in fields {
            if value.is_some() {
                *slot = value;
            }
        }
    }

    /// Checks that every present dimension is a positive finite number.
    ///
    /// # Errors
    ///
    /// Returns the first offending parameter.
    pub fn validate(&self) -> Result<(), SceneError> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
            ("radius", self.radius),
            ("tube", self.tube),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                if !usable(value) {
                    return Err(SceneError::InvalidParameter { name, value });
                }
            }
        }
        Ok(())
    }

    /// Builds a concrete kind, filling absent or non-positive dimensions
    /// from `defaults`.
    #[must_use]
    pub fn resolve(&self, kind: ShapeType, defaults: &ShapeDefaults) -> SolidKind {
        let pick =
            |value: Option<f64>, fallback: f64| value.filter(|v| usable(*v)).unwrap_or(fallback);
        match kind {
            ShapeType::Box => SolidKind::Box {
                width: pick(self.width, defaults.width),
                height: pick(self.height, defaults.height),
                depth: pick(self.depth, defaults.depth),
            },
            ShapeType::Sphere => SolidKind::Sphere {
                radius: pick(self.radius, defaults.radius),
            },
            ShapeType::Cylinder => SolidKind::Cylinder {
                radius: pick(self.radius, defaults.radius),
                height: pick(self.height, defaults.height),
            },
            ShapeType::Cone => SolidKind::Cone {
                radius: pick(self.radius, defaults.radius),
                height: pick(self.height, defaults.height),
            },
            ShapeType::Torus => SolidKind::Torus {
                radius: pick(self.radius, defaults.radius),
                tube: pick(self.tube, defaults.tube),
            },
        }
    }
}

/// Dimensions used when a shape is created or switched without them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeDefaults {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub radius: f64,
    pub tube: f64,
}

impl Default for ShapeDefaults {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 10.0,
            depth: 10.0,
            radius: 5.0,
            tube: 2.0,
        }
    }
}

fn usable(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn resolve_fills_missing_and_non_positive() {
        let params = ShapeParams {
            width: Some(4.0),
            height: Some(0.0),
            depth: None,
            ..ShapeParams::default()
        };
        let kind = params.resolve(ShapeType::Box, &ShapeDefaults::default());
        assert_eq!(
            kind,
            SolidKind::Box {
                width: 4.0,
                height: 10.0,
                depth: 10.0
            }
        );
    }

    #[test]
    fn resolve_ignores_foreign_fields() {
        let params = ShapeParams {
            width: Some(3.0),
            tube: Some(1.0),
            ..ShapeParams::default()
        };
        let kind = params.resolve(ShapeType::Sphere, &ShapeDefaults::default());
        assert_eq!(kind, SolidKind::Sphere { radius: 5.0 });
    }

    #[test]
    fn merge_overwrites_present_fields_only() {
        let mut base = ShapeParams {
            radius: Some(1.0),
            height: Some(2.0),
            ..ShapeParams::default()
        };
        base.merge(&ShapeParams {
            height: Some(9.0),
            ..ShapeParams::default()
        });
        assert_eq!(base.radius, Some(1.0));
        assert_eq!(base.height, Some(9.0));
    }

    #[test]
    fn validate_reports_offender() {
        let params = ShapeParams {
            radius: Some(2.0),
            tube: Some(f64::NAN),
            ..ShapeParams::default()
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(err, SceneError::InvalidParameter { name: "tube", .. }));
        assert!(ShapeParams::default().validate().is_ok());
    }

    #[test]
    fn deserializes_partial_json() {
        let params: ShapeParams = serde_json::from_str(r#"{"radius": 7.5}"#).unwrap();
        assert_eq!(params.radius, Some(7.5));
        assert_eq!(params.width, None);
    }
}
