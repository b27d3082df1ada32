//! Flat re-export surface for binaries and benches.
//!
//! Mirrors the module tree one level up so callers outside the crate can
//! import everything from one place. No items are defined here.

// Directions and extents
pub use crate::directions::{directions_for, is_supported, Direction, DirectionSet, SUPPORTED_K};
pub use crate::extents::{compute_extents, ConstraintSet, SlabExtent};
// Polytope construction
pub use crate::polytope::{build, build_with, BuildCfg, Face, Hs3, Polytope, TriangleBuffers};
// Entity, presentation
pub use crate::dop::{Dop, DopId};
pub use crate::error::DopError;
pub use crate::helper::{DopHelper, EdgeMesh, FillMesh, HelperSlot, Rgb, FILL_ALPHA};
// Inputs
pub use crate::rand3::{
    cube_corners, sample_cloud, CloudGenerator, CloudParams, CloudSample, CloudShape, SampleError,
    SeedReplay,
};
pub use crate::source::{MeshGroup, PositionBuffer, Transformed, VertexSource};
