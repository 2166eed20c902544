use crate::error::Result;
use crate::geometry::surface::{require_positive, Cone, Cylinder, Sphere, Torus};
use crate::math::{Point3, Vector3};
use crate::scene::SolidKind;

use super::uv_grid::{push_quad, tessellate_disc, tessellate_uv_grid};
use super::{CatalogResolution, TriangleMesh};

/// Tessellates a primitive solid into a triangle mesh in its local frame.
///
/// Solids are centred on the local origin with Y up, except the torus which
/// lies in the XY plane around Z.
pub struct TessellateSolid {
    kind: SolidKind,
    resolution: CatalogResolution,
}

impl TessellateSolid {
    /// Creates a new `TessellateSolid` operation.
    #[must_use]
    pub fn new(kind: SolidKind, resolution: CatalogResolution) -> Self {
        Self { kind, resolution }
    }

    /// Executes the tessellation, returning an indexed triangle mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is non-positive or non-finite, or if
    /// the resolution has too few segments.
    pub fn execute(&self) -> Result<TriangleMesh> {
        let res = &self.resolution;
        res.validate()?;
        match self.kind {
            SolidKind::Box {
                width,
                height,
                depth,
            } => tessellate_box(width, height, depth),
            SolidKind::Sphere { radius } => {
                let sphere = Sphere::new(radius)?;
                Ok(tessellate_uv_grid(
                    &sphere,
                    res.sphere_width_segments,
                    res.sphere_height_segments,
                ))
            }
            SolidKind::Cylinder { radius, height } => {
                let cyl = Cylinder::new(radius, height)?;
                let segments = res.cylinder_radial_segments;
                let mut mesh = tessellate_uv_grid(&cyl, segments, 1);
                mesh.merge(&tessellate_disc(height / 2.0, radius, segments, true));
                mesh.merge(&tessellate_disc(-height / 2.0, radius, segments, false));
                Ok(mesh)
            }
            SolidKind::Cone { radius, height } => {
                let cone = Cone::new(radius, height)?;
                let segments = res.cone_radial_segments;
                let mut mesh = tessellate_uv_grid(&cone, segments, 1);
                mesh.merge(&tessellate_disc(-height / 2.0, radius, segments, false));
                Ok(mesh)
            }
            SolidKind::Torus { radius, tube } => {
                let torus = Torus::new(radius, tube)?;
                Ok(tessellate_uv_grid(
                    &torus,
                    res.torus_tubular_segments,
                    res.torus_radial_segments,
                ))
            }
        }
    }
}

/// Builds an axis-aligned box centred on the origin: 6 faces, 12 triangles.
fn tessellate_box(width: f64, height: f64, depth: f64) -> Result<TriangleMesh> {
    let hx = require_positive("box width", width)? / 2.0;
    let hy = require_positive("box height", height)? / 2.0;
    let hz = require_positive("box depth", depth)? / 2.0;

    // (outward normal, u, v) with u x v = normal, scaled to half extents.
    let faces = [
        (Vector3::x() * hx, Vector3::z() * -hz, Vector3::y() * hy),
        (Vector3::x() * -hx, Vector3::z() * hz, Vector3::y() * hy),
        (Vector3::y() * hy, Vector3::x() * hx, Vector3::z() * -hz),
        (Vector3::y() * -hy, Vector3::x() * hx, Vector3::z() * hz),
        (Vector3::z() * hz, Vector3::x() * hx, Vector3::y() * hy),
        (Vector3::z() * -hz, Vector3::x() * -hx, Vector3::y() * hy),
    ];

    let mut mesh = TriangleMesh::default();
    for (center, u, v) in faces {
        let c = Point3::from(center);
        push_quad(
            &mut mesh,
            [c - u - v, c + u - v, c + u + v, c - u + v],
            center.normalize(),
        );
    }
    Ok(mesh)
}
