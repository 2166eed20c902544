use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InterpretError;
use crate::math::{Point3, Transform};

use super::params::{ShapeDefaults, ShapeParams};

slotmap::new_key_type! {
    /// Unique identifier for a solid in a scene.
    pub struct SolidId;
}

/// Default display colour for new solids.
pub const DEFAULT_COLOR: &str = "#3b82f6";

/// Tag naming one of the supported primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Box,
    Sphere,
    Cylinder,
    Cone,
    Torus,
}

impl ShapeType {
    /// All kinds, in display order.
    pub const ALL: [ShapeType; 5] = [
        ShapeType::Box,
        ShapeType::Sphere,
        ShapeType::Cylinder,
        ShapeType::Cone,
        ShapeType::Torus,
    ];

    /// Lowercase name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Sphere => "sphere",
            Self::Cylinder => "cylinder",
            Self::Cone => "cone",
            Self::Torus => "torus",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeType {
    type Err = InterpretError;

    /// Parses a kind name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| InterpretError::UnknownKind(s.to_string()))
    }
}

/// Shape and dimensions of a primitive solid.
///
/// Each variant carries exactly the parameters its tessellation reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SolidKind {
    Box { width: f64, height: f64, depth: f64 },
    Sphere { radius: f64 },
    Cylinder { radius: f64, height: f64 },
    Cone { radius: f64, height: f64 },
    Torus { radius: f64, tube: f64 },
}

impl SolidKind {
    /// Returns the kind tag.
    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Self::Box { .. } => ShapeType::Box,
            Self::Sphere { .. } => ShapeType::Sphere,
            Self::Cylinder { .. } => ShapeType::Cylinder,
            Self::Cone { .. } => ShapeType::Cone,
            Self::Torus { .. } => ShapeType::Torus,
        }
    }

    /// Returns the parameters of this kind as a loose record.
    #[must_use]
    pub fn params(&self) -> ShapeParams {
        let mut p = ShapeParams::default();
        match *self {
            Self::Box {
                width,
                height,
                depth,
            } => {
                p.width = Some(width);
                p.height = Some(height);
                p.depth = Some(depth);
            }
            Self::Sphere { radius } => p.radius = Some(radius),
            Self::Cylinder { radius, height } | Self::Cone { radius, height } => {
                p.radius = Some(radius);
                p.height = Some(height);
            }
            Self::Torus { radius, tube } => {
                p.radius = Some(radius);
                p.tube = Some(tube);
            }
        }
        p
    }

    /// Converts to another kind, keeping dimensions shared by name
    /// (`radius`, `height`). Dimensions the source lacks come from `defaults`.
    ///
    /// This applies to boxes too: a cylinder of height 7 becomes a box of
    /// height 7, with width and depth from `defaults`. The source application
    /// instead resets all three box dimensions to their defaults on that
    /// switch.
    #[must_use]
    pub fn convert_to(&self, target: ShapeType, defaults: &ShapeDefaults) -> SolidKind {
        self.params().resolve(target, defaults)
    }
}

/// A primitive solid owned by a [`Scene`](super::Scene).
#[derive(Debug, Clone, PartialEq)]
pub struct SolidData {
    /// Shape and dimensions.
    pub kind: SolidKind,
    /// Placement in world space.
    pub transform: Transform,
    /// Display colour (not exported).
    pub color: String,
    /// Display name.
    pub label: String,
}

impl SolidData {
    /// Creates a solid at `position` with the default colour.
    #[must_use]
    pub fn new(kind: SolidKind, position: Point3, label: impl Into<String>) -> Self {
        Self {
            kind,
            transform: Transform::from_position(&position),
            color: DEFAULT_COLOR.to_string(),
            label: label.into(),
        }
    }

    /// World position of the solid's local origin.
    #[must_use]
    pub fn position(&self) -> Point3 {
        self.transform.position()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind_case_insensitively() {
        assert_eq!("Sphere".parse::<ShapeType>().unwrap(), ShapeType::Sphere);
        assert_eq!(" TORUS ".parse::<ShapeType>().unwrap(), ShapeType::Torus);
        assert!(matches!(
            "pyramid".parse::<ShapeType>(),
            Err(InterpretError::UnknownKind(k)) if k == "pyramid"
        ));
    }

    #[test]
    fn kind_serializes_tagged() {
        let json = serde_json::to_string(&SolidKind::Sphere { radius: 2.5 }).unwrap();
        assert_eq!(json, r#"{"type":"sphere","radius":2.5}"#);
        let back: SolidKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SolidKind::Sphere { radius: 2.5 });
    }

    #[test]
    fn convert_keeps_shared_dimensions() {
        let defaults = ShapeDefaults::default();
        let cyl = SolidKind::Cylinder {
            radius: 3.0,
            height: 7.0,
        };
        assert_eq!(
            cyl.convert_to(ShapeType::Cone, &defaults),
            SolidKind::Cone {
                radius: 3.0,
                height: 7.0
            }
        );
        assert_eq!(
            cyl.convert_to(ShapeType::Torus, &defaults),
            SolidKind::Torus {
                radius: 3.0,
                tube: 2.0
            }
        );
        assert_eq!(
            cyl.convert_to(ShapeType::Box, &defaults),
            SolidKind::Box {
                width: 10.0,
                height: 7.0,
                depth: 10.0
            }
        );
    }

    #[test]
    fn box_conversion_keeps_only_height() {
        let defaults = ShapeDefaults::default();
        let cone = SolidKind::Cone {
            radius: 4.0,
            height: 2.5,
        };
        assert_eq!(
            cone.convert_to(ShapeType::Box, &defaults),
            SolidKind::Box {
                width: defaults.width,
                height: 2.5,
                depth: defaults.depth
            }
        );
        let ball = SolidKind::Sphere { radius: 4.0 };
        assert_eq!(
            ball.convert_to(ShapeType::Box, &defaults),
            SolidKind::Box {
                width: defaults.width,
                height: defaults.height,
                depth: defaults.depth
            }
        );
    }

    #[test]
    fn solid_position_comes_from_transform() {
        let s = SolidData::new(
            SolidKind::Sphere { radius: 1.0 },
            Point3::new(1.0, 2.0, 3.0),
            "ball",
        );
        assert_eq!(s.position(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(s.color, DEFAULT_COLOR);
    }
}
