//! Convex polytopes in 3D: half-spaces in, vertices and faces out.
//!
//! Purpose
//! - Turn a k-DOP `ConstraintSet` (k/2 slabs) into a renderable convex mesh.
//! - Seed box, Sutherland–Hodgman face clipping, then a single weld/cleanup
//!   pass.
//!
//! Assumptions and conventions
//! - Half-spaces use `n·x <= c` with unit `n`.
//! - Faces wind counterclockwise around their outward normal.
//! - Tolerances scale with the polytope (see `cfg`).
//!
//! Code cross-refs: `extents::ConstraintSet`, `dop::Dop`

mod build;
mod cfg;
mod clip;
mod mesh;
mod types;
mod util;

pub use build::{build, build_with};
pub use cfg::BuildCfg;
pub use mesh::TriangleBuffers;
pub use types::{Face, Hs3, Polytope};

pub(crate) use mesh::to_f32;
