pub mod error;
pub mod export;
pub mod geometry;
pub mod interpret;
pub mod math;
pub mod scene;
pub mod stl;
pub mod tessellation;

pub use error::{Result, SimpaadError};
