//! Error type shared by the engine.

use std::fmt;

/// Errors surfaced by direction lookup, extent computation and polytope build.
///
/// All variants are terminal for the call that produced them: the engine is
/// deterministic, so retrying with the same input yields the same error.
#[derive(Clone, Debug, PartialEq)]
pub enum DopError {
    /// `k` is not one of `SUPPORTED_K`.
    UnsupportedK { k: u32 },
    /// The vertex source yielded zero points.
    EmptyGeometry,
    /// Half-space intersection collapsed (empty, or inconsistent/non-finite
    /// constraints).
    DegeneratePolytope { reason: String },
    /// Geometry requested before the first successful build.
    NotInitialized,
}

impl DopError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegeneratePolytope {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedK { k } => write!(
                f,
                "unsupported k = {k} (expected one of 6, 8, 12, 14, 18, 20, 26)"
            ),
            Self::EmptyGeometry => write!(f, "vertex source yielded no points"),
            Self::DegeneratePolytope { reason } => write!(f, "degenerate polytope: {reason}"),
            Self::NotInitialized => {
                write!(f, "k-DOP has no geometry yet (call set_from_object first)")
            }
        }
    }
}

impl std::error::Error for DopError {}
