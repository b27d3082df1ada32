//! k-discrete-oriented-polytope (k-DOP) bounding volumes.
//!
//! Pipeline
//! - `directions`: fixed unit normals for k ∈ {6, 8, 12, 14, 18, 20, 26}.
//! - `extents`: per-direction `[min, max]` projections of a vertex source.
//! - `polytope`: half-space intersection to a vertex/face mesh.
//! - `dop`: the entity tying the three together, plus queries.
//! - `helper`: fill and wireframe meshes for presentation.
//!
//! Everything is synchronous and deterministic; rebuilding is always an
//! explicit call.

pub mod api;
pub mod directions;
pub mod dop;
pub mod error;
pub mod extents;
pub mod helper;
pub mod polytope;
pub mod rand3;
pub mod source;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use directions::SUPPORTED_K;
pub use dop::{Dop, DopId};
pub use error::DopError;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::directions::{directions_for, DirectionSet, SUPPORTED_K};
    pub use crate::dop::{Dop, DopId};
    pub use crate::error::DopError;
    pub use crate::extents::{compute_extents, ConstraintSet, SlabExtent};
    pub use crate::helper::{DopHelper, HelperSlot, Rgb};
    pub use crate::polytope::{build, Polytope};
    pub use crate::source::VertexSource;
    pub use nalgebra::Vector3 as Vec3;
}
