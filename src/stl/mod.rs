//! ASCII stereolithography (STL) encoding.
//!
//! ```text
//! solid <name>
//!   facet normal <nx> <ny> <nz>
//!     outer loop
//!       vertex <x> <y> <z>
//!       vertex <x> <y> <z>
//!       vertex <x> <y> <z>
//!     endloop
//!   endfacet
//! endsolid <name>
//! ```

mod writer;

pub use writer::{validate_model_name, write_facet, write_footer, write_header};

use crate::math::{Point3, Vector3};

/// One STL facet: a normal and three vertices, all in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    pub normal: Vector3,
    pub vertices: [Point3; 3],
}

impl Facet {
    /// Returns `true` if every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.normal.iter().all(|c| c.is_finite())
            && self
                .vertices
                .iter()
                .all(|v| v.iter().all(|c| c.is_finite()))
    }
}
