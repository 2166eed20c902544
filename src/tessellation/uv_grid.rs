use std::f64::consts::TAU;

use crate::geometry::Surface;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::TriangleMesh;

/// Tessellates a parametric surface over its full domain on a UV grid.
///
/// Generates `(n_u + 1) * (n_v + 1)` vertices via `surface.evaluate(u, v)`,
/// then splits each quad cell into two triangles. Triangles with two
/// coincident corners (poles, apexes) are dropped.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(super) fn tessellate_uv_grid(surface: &dyn Surface, n_u: usize, n_v: usize) -> TriangleMesh {
    let mut mesh = TriangleMesh::default();
    if n_u == 0 || n_v == 0 {
        return mesh;
    }

    let domain = surface.domain();
    let rows = n_v + 1;
    let cols = n_u + 1;
    mesh.vertices.reserve(rows * cols);
    mesh.normals.reserve(rows * cols);
    mesh.indices.reserve(n_u * n_v * 2);

    for iv in 0..rows {
        let v = domain.v_min + (domain.v_max - domain.v_min) * iv as f64 / n_v as f64;
        for iu in 0..cols {
            let u = domain.u_min + (domain.u_max - domain.u_min) * iu as f64 / n_u as f64;
            mesh.vertices.push(surface.evaluate(u, v));
            mesh.normals.push(surface.normal(u, v));
        }
    }

    for iv in 0..n_v {
        for iu in 0..n_u {
            let i00 = (iv * cols + iu) as u32;
            let i10 = (iv * cols + iu + 1) as u32;
            let i01 = ((iv + 1) * cols + iu) as u32;
            let i11 = ((iv + 1) * cols + iu + 1) as u32;
            for tri in [[i00, i10, i11], [i00, i11, i01]] {
                if !has_collapsed_edge(&mesh.vertices, tri) {
                    mesh.indices.push(tri);
                }
            }
        }
    }

    mesh
}

/// Tessellates a flat disc in the XZ plane at height `y` as a triangle fan.
///
/// `facing_up` selects a `+Y` or `-Y` normal; winding follows it.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(super) fn tessellate_disc(
    y: f64,
    radius: f64,
    segments: usize,
    facing_up: bool,
) -> TriangleMesh {
    let mut mesh = TriangleMesh::default();
    if segments < 3 {
        return mesh;
    }

    let normal = if facing_up { Vector3::y() } else { -Vector3::y() };
    mesh.vertices.push(Point3::new(0.0, y, 0.0));
    mesh.normals.push(normal);
    for i in 0..segments {
        let theta = TAU * i as f64 / segments as f64;
        mesh.vertices
            .push(Point3::new(radius * theta.sin(), y, radius * theta.cos()));
        mesh.normals.push(normal);
    }

    for i in 0..segments {
        let a = (i + 1) as u32;
        let b = ((i + 1) % segments + 1) as u32;
        if facing_up {
            mesh.indices.push([0, a, b]);
        } else {
            mesh.indices.push([0, b, a]);
        }
    }

    mesh
}

/// Appends a planar quad given its corners counter-clockwise seen from outside.
#[allow(clippy::cast_possible_truncation)]
pub(super) fn push_quad(mesh: &mut TriangleMesh, corners: [Point3; 4], normal: Vector3) {
    let base = mesh.vertices.len() as u32;
    for corner in corners {
        mesh.vertices.push(corner);
        mesh.normals.push(normal);
    }
    mesh.indices.push([base, base + 1, base + 2]);
    mesh.indices.push([base, base + 2, base + 3]);
}

fn has_collapsed_edge(vertices: &[Point3], tri: [u32; 3]) -> bool {
    let [a, b, c] = tri.map(|i| vertices[i as usize]);
    (a - b).norm() < TOLERANCE || (b - c).norm() < TOLERANCE || (c - a).norm() < TOLERANCE
}
