//! Canonical direction table for k-DOPs.
//!
//! Purpose
//! - Map a supported `k` to its fixed list of `k/2` unit normals.
//! - Keep the table data-driven: 13 representative directions (3 axes,
//!   4 cube diagonals, 6 edge diagonals); every supported `k` is a union of
//!   these families.
//!
//! Conventions
//! - Each stored direction `d` stands for the pair `{d, -d}`. The polytope's
//!   "max" plane uses `d`, the "min" plane uses `-d` with offset `-min`.
//! - Order is axes, then diagonals, then edge diagonals. Callers index
//!   extents by position in the set, so the order must never change.

use nalgebra::Vector3;

use crate::error::DopError;

/// Supported direction counts, ascending.
pub const SUPPORTED_K: [u32; 7] = [6, 8, 12, 14, 18, 20, 26];

/// Raw (unnormalized) components of the 13 canonical directions.
const TABLE: [[f64; 3]; 13] = [
    // axes
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    // cube diagonals
    [1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
    // edge diagonals
    [1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, 1.0, -1.0],
];

const AXES: std::ops::Range<usize> = 0..3;
const DIAGONALS: std::ops::Range<usize> = 3..7;
const EDGES: std::ops::Range<usize> = 7..13;

/// Whether `k` has a canonical direction set.
#[inline]
pub fn is_supported(k: u32) -> bool {
    SUPPORTED_K.contains(&k)
}

/// One canonical unit direction, tagged with its slot in the 13-entry table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Direction {
    slot: usize,
    n: Vector3<f64>,
}

impl Direction {
    fn canonical(slot: usize) -> Self {
        let [x, y, z] = TABLE[slot];
        Self {
            slot,
            n: Vector3::new(x, y, z).normalize(),
        }
    }

    /// Unit normal.
    #[inline]
    pub fn vector(&self) -> Vector3<f64> {
        self.n
    }

    /// Position in the 13-entry canonical table (shared across all `k`).
    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Scalar projection `d·p`.
    #[inline]
    pub fn project(&self, p: &Vector3<f64>) -> f64 {
        self.n.dot(p)
    }
}

/// Ordered, duplicate-free directions for one supported `k` (length `k/2`).
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionSet {
    k: u32,
    dirs: Vec<Direction>,
}

impl DirectionSet {
    #[inline]
    pub fn k(&self) -> u32 {
        self.k
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.dirs.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Direction> {
        self.dirs.iter()
    }
    #[inline]
    pub fn get(&self, i: usize) -> Option<&Direction> {
        self.dirs.get(i)
    }
    #[inline]
    pub fn as_slice(&self) -> &[Direction] {
        &self.dirs
    }

    /// Position of the direction occupying canonical `slot`, if present.
    pub fn position_of_slot(&self, slot: usize) -> Option<usize> {
        self.dirs.iter().position(|d| d.slot == slot)
    }

    #[inline]
    pub fn contains(&self, d: &Direction) -> bool {
        self.position_of_slot(d.slot).is_some()
    }

    /// `self ⊆ other` (e.g. 6 ⊆ 14 ⊆ 26).
    pub fn is_subset_of(&self, other: &DirectionSet) -> bool {
        self.dirs.iter().all(|d| other.contains(d))
    }
}

impl<'a> IntoIterator for &'a DirectionSet {
    type Item = &'a Direction;
    type IntoIter = std::slice::Iter<'a, Direction>;
    fn into_iter(self) -> Self::IntoIter {
        self.dirs.iter()
    }
}

/// Resolve the canonical direction set for `k`.
///
/// Families: 6 = axes, 8 = diagonals, 12 = edge diagonals, and the unions
/// 14 = 6∪8, 18 = 6∪12, 20 = 8∪12, 26 = 6∪8∪12.
pub fn directions_for(k: u32) -> Result<DirectionSet, DopError> {
    let families: &[std::ops::Range<usize>] = match k {
        6 => &[AXES],
        8 => &[DIAGONALS],
        12 => &[EDGES],
        14 => &[AXES, DIAGONALS],
        18 => &[AXES, EDGES],
        20 => &[DIAGONALS, EDGES],
        26 => &[AXES, DIAGONALS, EDGES],
        _ => return Err(DopError::UnsupportedK { k }),
    };
    let dirs = families
        .iter()
        .flat_map(|r| r.clone())
        .map(Direction::canonical)
        .collect();
    Ok(DirectionSet { k, dirs })
}
