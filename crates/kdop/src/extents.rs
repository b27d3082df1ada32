//! Slab extents: per-direction `[min, max]` projections of a point set.
//!
//! A `ConstraintSet` is the H-representation of a k-DOP: for every direction
//! `d` with extent `(lo, hi)` the polytope satisfies `lo <= d·x <= hi`.

use nalgebra::Vector3;

use crate::directions::{Direction, DirectionSet};
use crate::error::DopError;
use crate::polytope::Hs3;
use crate::source::VertexSource;

/// `[min, max]` of `d·v` over all vertices for one direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlabExtent {
    pub min: f64,
    pub max: f64,
}

impl SlabExtent {
    #[inline]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Distance between the two support planes.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn contains(&self, s: f64, tol: f64) -> bool {
        s >= self.min - tol && s <= self.max + tol
    }

    #[inline]
    fn include(&mut self, s: f64) {
        if s < self.min {
            self.min = s;
        }
        if s > self.max {
            self.max = s;
        }
    }
}

/// Directions paired with their extents (same order as the `DirectionSet`).
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintSet {
    directions: DirectionSet,
    extents: Vec<SlabExtent>,
}

impl ConstraintSet {
    /// Pair `directions` with caller-provided extents.
    ///
    /// Returns `None` when the lengths differ. No ordering check is made on
    /// `min <= max`; inconsistent slabs are reported by the builder.
    pub fn from_parts(directions: DirectionSet, extents: Vec<SlabExtent>) -> Option<Self> {
        if directions.len() != extents.len() {
            return None;
        }
        Some(Self {
            directions,
            extents,
        })
    }

    #[inline]
    pub fn k(&self) -> u32 {
        self.directions.k()
    }
    #[inline]
    pub fn directions(&self) -> &DirectionSet {
        &self.directions
    }
    #[inline]
    pub fn extents(&self) -> &[SlabExtent] {
        &self.extents
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.extents.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// `(direction, extent)` pairs in set order.
    pub fn iter(&self) -> impl Iterator<Item = (&Direction, &SlabExtent)> + '_ {
        self.directions.iter().zip(self.extents.iter())
    }

    /// Extent for the direction stored in canonical table `slot`, if active.
    pub fn extent_for_slot(&self, slot: usize) -> Option<&SlabExtent> {
        self.directions
            .position_of_slot(slot)
            .and_then(|i| self.extents.get(i))
    }

    /// The `2·(k/2)` half-spaces: `d·x <= max` then `-d·x <= -min`, per direction.
    pub fn halfspaces(&self) -> Vec<Hs3> {
        let mut out = Vec::with_capacity(2 * self.len());
        for (d, e) in self.iter() {
            out.push(Hs3::new(d.vector(), e.max));
            out.push(Hs3::new(-d.vector(), -e.min));
        }
        out
    }

    /// Membership with slack `tol` on every slab.
    pub fn contains(&self, p: &Vector3<f64>, tol: f64) -> bool {
        self.iter().all(|(d, e)| e.contains(d.project(p), tol))
    }

    /// All extents finite and ordered within `tol`.
    pub(crate) fn is_consistent(&self, tol: f64) -> bool {
        self.extents
            .iter()
            .all(|e| e.min.is_finite() && e.max.is_finite() && e.min <= e.max + tol)
    }
}

/// Project every vertex onto every direction and keep the min/max.
///
/// One linear pass over the source; projections are evaluated in `f64`
/// whatever the source precision. Fails with `EmptyGeometry` on zero points
/// and with `DegeneratePolytope` if any coordinate is NaN or infinite.
pub fn compute_extents<S: VertexSource + ?Sized>(
    source: &S,
    directions: &DirectionSet,
) -> Result<ConstraintSet, DopError> {
    let dirs: Vec<Vector3<f64>> = directions.iter().map(|d| d.vector()).collect();
    let mut extents = vec![SlabExtent::new(f64::INFINITY, f64::NEG_INFINITY); dirs.len()];
    let mut seen = 0usize;
    let mut non_finite = 0usize;
    source.for_each_vertex(&mut |p| {
        seen += 1;
        if !p.iter().all(|c| c.is_finite()) {
            non_finite += 1;
            return;
        }
        for (e, d) in extents.iter_mut().zip(&dirs) {
            e.include(d.dot(&p));
        }
    });
    if seen == 0 {
        return Err(DopError::EmptyGeometry);
    }
    if non_finite > 0 {
        return Err(DopError::degenerate(format!(
            "{non_finite} of {seen} input points have non-finite coordinates"
        )));
    }
    Ok(ConstraintSet {
        directions: directions.clone(),
        extents,
    })
}
