//! Core 3D types: half-spaces, faces and the mesh-form polytope.

use nalgebra::Vector3;

use crate::extents::ConstraintSet;

/// Closed half-space `n · x <= c` in R^3.
///
/// Invariants:
/// - `n` is unit length for every half-space produced by the engine, so
///   `signed_distance` is a true distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hs3 {
    pub n: Vector3<f64>,
    pub c: f64,
}

impl Hs3 {
    #[inline]
    pub fn new(n: Vector3<f64>, c: f64) -> Self {
        Self { n, c }
    }
    /// `n·p - c`; positive outside.
    #[inline]
    pub fn signed_distance(&self, p: &Vector3<f64>) -> f64 {
        self.n.dot(p) - self.c
    }
    #[inline]
    pub fn satisfies(&self, p: &Vector3<f64>, tol: f64) -> bool {
        self.signed_distance(p) <= tol
    }
}

/// Planar face: vertex indices in counterclockwise order seen from outside.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    pub vertices: Vec<usize>,
    /// Supporting plane; `plane.n` is the outward normal.
    pub plane: Hs3,
}

/// Convex polytope in vertex/face form.
///
/// Invariants:
/// - `vertices` are unique (pairwise farther apart than the build tolerance).
/// - Every face has >= 3 indices, is planar and convex, and winds
///   counterclockwise around `plane.n`.
/// - Lower-dimensional results: a flat polytope carries two coincident faces
///   of opposite orientation; a segment or point has no faces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polytope {
    pub vertices: Vec<Vector3<f64>>,
    pub faces: Vec<Face>,
}

impl Polytope {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Positions of one face's vertices, in loop order.
    pub fn face_points<'a>(&'a self, face: &'a Face) -> impl Iterator<Item = Vector3<f64>> + 'a {
        face.vertices.iter().map(move |&i| self.vertices[i])
    }

    /// Every vertex satisfies every slab of `constraints` within `tol`.
    pub fn satisfies(&self, constraints: &ConstraintSet, tol: f64) -> bool {
        self.vertices.iter().all(|p| constraints.contains(p, tol))
    }

    /// Every vertex lies on the inner side of every face plane (within `tol`).
    ///
    /// Together with `satisfies`, this certifies that the mesh is the convex
    /// hull of its vertices and that no face is inverted.
    pub fn is_convex(&self, tol: f64) -> bool {
        self.faces.iter().all(|f| {
            self.vertices
                .iter()
                .all(|p| f.plane.satisfies(p, tol))
        })
    }

    /// Axis-aligned bounds `(min, max)`; `None` when empty.
    pub fn aabb(&self) -> Option<(Vector3<f64>, Vector3<f64>)> {
        let first = *self.vertices.first()?;
        let mut lo = first;
        let mut hi = first;
        for p in &self.vertices[1..] {
            lo = lo.inf(p);
            hi = hi.sup(p);
        }
        Some((lo, hi))
    }
}
