//! H→V: k-DOP constraints to a vertex/face polytope by incremental clipping.
//!
//! Algorithm
//! - Seed: axis-aligned bounds of the parallelepiped cut out by the
//!   best-conditioned triple of directions. For sets containing the axes this
//!   is exactly the axis box; otherwise it overestimates and the clips below
//!   cut it down.
//! - Clip the seed by each of the `2·(k/2)` half-spaces (see `clip.rs`).
//! - Finalize: weld points within `tol`, drop collinear loop vertices and
//!   zero-area faces, fix winding against the face plane, compact indices.
//!
//! Degenerate inputs (zero-width slabs) stay valid and produce flat, linear or
//! point polytopes; only an empty intersection or non-finite/inverted slabs
//! are errors.

use nalgebra::{Matrix3, Vector3};

use super::cfg::{BuildCfg, DET_EPS};
use super::clip::{box_faces, clip_by_halfspace, ClipFace, ClipOutcome};
use super::types::{Face, Hs3, Polytope};
use super::util::{combinations, distance_to_line, newell_normal, weld};
use crate::extents::ConstraintSet;
use crate::error::DopError;

/// Build with default tolerances.
pub fn build(constraints: &ConstraintSet) -> Result<Polytope, DopError> {
    build_with(constraints, BuildCfg::default())
}

/// Build the polytope `{x : lo_i <= d_i·x <= hi_i for all i}`.
pub fn build_with(constraints: &ConstraintSet, cfg: BuildCfg) -> Result<Polytope, DopError> {
    if constraints.is_empty() {
        return Err(DopError::degenerate("constraint set is empty"));
    }
    if constraints
        .extents()
        .iter()
        .any(|e| !(e.min.is_finite() && e.max.is_finite()))
    {
        return Err(DopError::degenerate("non-finite slab extent"));
    }
    let (lo, hi) = seed_box(constraints)?;
    let diameter = (hi - lo).norm();
    let tol = cfg.tol_for(diameter, lo.amax().max(hi.amax()));
    if !constraints.is_consistent(tol) {
        return Err(DopError::degenerate("slab with min > max"));
    }

    let mut faces = box_faces(lo.inf(&hi), lo.sup(&hi));
    for (i, hs) in constraints.halfspaces().iter().enumerate() {
        if clip_by_halfspace(&mut faces, hs, tol) == ClipOutcome::Empty {
            return Err(DopError::degenerate(format!(
                "half-space {i} removes the whole polytope"
            )));
        }
    }
    let poly = finalize(faces, tol, cfg.area_tol(tol, diameter));
    debug_assert!(poly.satisfies(constraints, 10.0 * tol));
    debug_assert!(poly.is_convex(10.0 * tol));
    Ok(poly)
}

/// Axis-aligned bounds of `{x : lo_t <= d_t·x <= hi_t}` for the best triple `t`.
fn seed_box(constraints: &ConstraintSet) -> Result<(Vector3<f64>, Vector3<f64>), DopError> {
    let dirs: Vec<Vector3<f64>> = constraints.directions().iter().map(|d| d.vector()).collect();
    let idxs: Vec<usize> = (0..dirs.len()).collect();
    let mut best: Option<(f64, Vec<usize>)> = None;
    for comb in combinations(&idxs, 3) {
        let m = Matrix3::from_rows(&[
            dirs[comb[0]].transpose(),
            dirs[comb[1]].transpose(),
            dirs[comb[2]].transpose(),
        ]);
        let det = m.determinant().abs();
        if best.as_ref().map_or(true, |(b, _)| det > *b) {
            best = Some((det, comb));
        }
    }
    let (det, triple) = best.ok_or_else(|| DopError::degenerate("fewer than three directions"))?;
    if det < DET_EPS {
        return Err(DopError::degenerate("directions do not span R^3"));
    }
    let m = Matrix3::from_rows(&[
        dirs[triple[0]].transpose(),
        dirs[triple[1]].transpose(),
        dirs[triple[2]].transpose(),
    ]);
    let inv = m
        .try_inverse()
        .ok_or_else(|| DopError::degenerate("directions do not span R^3"))?;
    let ext = constraints.extents();
    // x = inv · s with s_m ∈ [lo_m, hi_m]: interval arithmetic per row.
    let mut lo = Vector3::zeros();
    let mut hi = Vector3::zeros();
    for j in 0..3 {
        for (m_col, &t) in triple.iter().enumerate() {
            let w = inv[(j, m_col)];
            let a = w * ext[t].min;
            let b = w * ext[t].max;
            lo[j] += a.min(b);
            hi[j] += a.max(b);
        }
    }
    Ok((lo, hi))
}

/// Weld, clean and index the clipped face loops.
fn finalize(faces: Vec<ClipFace>, tol: f64, area_tol: f64) -> Polytope {
    let mut welded: Vec<Vector3<f64>> = Vec::new();
    let mut loops: Vec<(Hs3, Vec<usize>)> = Vec::with_capacity(faces.len());
    for face in faces {
        let idx: Vec<usize> = face
            .points
            .iter()
            .map(|&p| weld(&mut welded, p, tol))
            .collect();
        loops.push((face.plane, idx));
    }

    let mut kept: Vec<(Hs3, Vec<usize>)> = Vec::with_capacity(loops.len());
    for (plane, mut idx) in loops {
        remove_repeats(&mut idx);
        remove_collinear(&mut idx, &welded, tol);
        if idx.len() < 3 {
            continue;
        }
        let normal = newell_normal(idx.iter().map(|&i| welded[i]));
        if 0.5 * normal.norm() <= area_tol {
            continue;
        }
        if normal.dot(&plane.n) < 0.0 {
            idx.reverse();
        }
        kept.push((plane, idx));
    }

    if kept.is_empty() {
        return Polytope {
            vertices: extreme_points(welded, tol),
            faces: Vec::new(),
        };
    }

    // Compact to referenced vertices, first-appearance order.
    let mut remap = vec![usize::MAX; welded.len()];
    let mut vertices = Vec::new();
    let faces: Vec<Face> = kept
        .into_iter()
        .map(|(plane, idx)| {
            let vertices_idx: Vec<usize> = idx
                .into_iter()
                .map(|i| {
                    if remap[i] == usize::MAX {
                        remap[i] = vertices.len();
                        vertices.push(welded[i]);
                    }
                    remap[i]
                })
                .collect();
            Face {
                vertices: vertices_idx,
                plane,
            }
        })
        .collect();
    Polytope { vertices, faces }
}

/// Drop cyclically consecutive repeats (`a a b c a` → `a b c`).
fn remove_repeats(idx: &mut Vec<usize>) {
    idx.dedup();
    while idx.len() > 1 && idx.first() == idx.last() {
        idx.pop();
    }
}

fn remove_collinear(idx: &mut Vec<usize>, points: &[Vector3<f64>], tol: f64) {
    let mut i = 0;
    while idx.len() >= 3 && i < idx.len() {
        let n = idx.len();
        let prev = points[idx[(i + n - 1) % n]];
        let cur = points[idx[i]];
        let next = points[idx[(i + 1) % n]];
        if distance_to_line(&cur, &prev, &next) <= tol {
            idx.remove(i);
            // neighbours changed; re-check the previous vertex
            i = i.saturating_sub(1);
        } else {
            i += 1;
        }
    }
}

/// Faceless result: collapse to a single point or the two ends of a segment.
fn extreme_points(points: Vec<Vector3<f64>>, tol: f64) -> Vec<Vector3<f64>> {
    if points.len() <= 2 {
        return points;
    }
    let mut far = (0, 0, 0.0);
    for i in 0..points.len() {
        for j in i + 1..points.len() {
            let d = (points[i] - points[j]).norm();
            if d > far.2 {
                far = (i, j, d);
            }
        }
    }
    let (a, b) = (points[far.0], points[far.1]);
    if far.2 <= tol {
        return vec![a];
    }
    if points.iter().all(|p| distance_to_line(p, &a, &b) <= tol) {
        return vec![a, b];
    }
    points
}
