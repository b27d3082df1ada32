//! The k-DOP entity: directions, extents and cached geometry behind one identity.
//!
//! State machine
//! - `Uninitialized`: directions chosen, nothing built.
//! - `Ready`: owns a snapshot of the last source's points, the extents over
//!   the current directions and the built polytope.
//!
//! Every transition computes the new state completely before touching `self`,
//! so a failed `set_from_object` or `change_k` leaves the previous state in
//! place.
//!
//! Code cross-refs: `extents::compute_extents`, `polytope::build_with`,
//! `helper::DopHelper`

mod query;

use std::sync::atomic::{AtomicU64, Ordering};

use nalgebra::Vector3;
use tracing::debug;

use crate::directions::{directions_for, DirectionSet};
use crate::error::DopError;
use crate::extents::{compute_extents, ConstraintSet};
use crate::polytope::{build_with, BuildCfg, Polytope};
use crate::source::VertexSource;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of one `Dop`; survives rebuilds and k changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DopId(u64);

impl DopId {
    fn fresh() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Built {
    points: Vec<Vector3<f64>>,
    constraints: ConstraintSet,
    polytope: Polytope,
    /// Absolute tolerance for queries, scaled like the build tolerance.
    tol: f64,
}

#[derive(Clone, Debug)]
enum DopState {
    Uninitialized,
    Ready(Built),
}

/// A k-discrete-oriented polytope bound around the last vertex source.
#[derive(Clone, Debug)]
pub struct Dop {
    id: DopId,
    directions: DirectionSet,
    cfg: BuildCfg,
    generation: u64,
    state: DopState,
}

impl Dop {
    /// Uninitialized DOP for `k`; fails with `UnsupportedK`.
    pub fn new(k: u32) -> Result<Self, DopError> {
        Self::with_cfg(k, BuildCfg::default())
    }

    pub fn with_cfg(k: u32, cfg: BuildCfg) -> Result<Self, DopError> {
        Ok(Self {
            id: DopId::fresh(),
            directions: directions_for(k)?,
            cfg,
            generation: 0,
            state: DopState::Uninitialized,
        })
    }

    /// Compute extents of `source` over the current directions and rebuild.
    pub fn set_from_object<S: VertexSource + ?Sized>(&mut self, source: &S) -> Result<(), DopError> {
        let points = source.collect_points();
        let (constraints, polytope, tol) = build_state(&points, &self.directions, self.cfg)?;
        self.commit(Built {
            points,
            constraints,
            polytope,
            tol,
        });
        Ok(())
    }

    /// Switch to `k` and rebuild from the retained points.
    ///
    /// On an uninitialized DOP only the directions change.
    pub fn change_k(&mut self, k: u32) -> Result<(), DopError> {
        let directions = directions_for(k)?;
        let built = match &mut self.state {
            DopState::Uninitialized => {
                self.directions = directions;
                return Ok(());
            }
            DopState::Ready(built) => built,
        };
        let (constraints, polytope, tol) = build_state(&built.points, &directions, self.cfg)?;
        let points = std::mem::take(&mut built.points);
        self.directions = directions;
        self.commit(Built {
            points,
            constraints,
            polytope,
            tol,
        });
        Ok(())
    }

    /// The built polytope; `NotInitialized` before the first successful build.
    pub fn geometry(&self) -> Result<&Polytope, DopError> {
        self.built().map(|b| &b.polytope)
    }

    pub fn constraints(&self) -> Result<&ConstraintSet, DopError> {
        self.built().map(|b| &b.constraints)
    }

    /// Snapshot of the points the current geometry was built from.
    pub fn points(&self) -> Result<&[Vector3<f64>], DopError> {
        self.built().map(|b| b.points.as_slice())
    }

    /// Drop cached geometry and points; identity and k are kept.
    pub fn clear(&mut self) {
        self.state = DopState::Uninitialized;
    }

    #[inline]
    pub fn id(&self) -> DopId {
        self.id
    }
    #[inline]
    pub fn k(&self) -> u32 {
        self.directions.k()
    }
    #[inline]
    pub fn directions(&self) -> &DirectionSet {
        &self.directions
    }
    /// Number of successful rebuilds so far.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, DopState::Ready(_))
    }
    #[inline]
    pub fn cfg(&self) -> BuildCfg {
        self.cfg
    }

    fn built(&self) -> Result<&Built, DopError> {
        match &self.state {
            DopState::Ready(b) => Ok(b),
            DopState::Uninitialized => Err(DopError::NotInitialized),
        }
    }

    fn commit(&mut self, built: Built) {
        self.generation += 1;
        debug!(
            id = self.id.0,
            k = self.k(),
            points = built.points.len(),
            vertices = built.polytope.vertices.len(),
            faces = built.polytope.faces.len(),
            generation = self.generation,
            "k-DOP rebuilt"
        );
        self.state = DopState::Ready(built);
    }
}

fn build_state(
    points: &[Vector3<f64>],
    directions: &DirectionSet,
    cfg: BuildCfg,
) -> Result<(ConstraintSet, Polytope, f64), DopError> {
    let constraints = compute_extents(points, directions)?;
    let polytope = build_with(&constraints, cfg)?;
    let tol = polytope.aabb().map_or(cfg.tol_for(0.0, 0.0), |(lo, hi)| {
        cfg.tol_for((hi - lo).norm(), lo.amax().max(hi.amax()))
    });
    Ok((constraints, polytope, tol))
}

#[cfg(test)]
mod tests;
