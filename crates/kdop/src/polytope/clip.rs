//! Sutherland–Hodgman clipping of a polygon-soup polytope by one half-space.
//!
//! Working representation: every face is an owned loop of positions plus its
//! plane. Shared vertices are bitwise copies across faces, and crossing
//! points are always interpolated from the inside endpoint toward the outside
//! endpoint, so the two faces sharing an edge produce the identical point.

use nalgebra::Vector3;

use super::types::Hs3;
use super::util::{dedup_points_in_place, order_ccw};

/// Face loop during construction (counterclockwise around `plane.n`).
#[derive(Clone, Debug)]
pub(crate) struct ClipFace {
    pub plane: Hs3,
    pub points: Vec<Vector3<f64>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ClipOutcome {
    /// No vertex beyond the plane; polytope unchanged.
    Redundant,
    /// Polytope cut and capped.
    Cut,
    /// Every vertex beyond the plane.
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Inside,
    On,
    Outside,
}

#[inline]
fn side(s: f64, tol: f64) -> Side {
    if s > tol {
        Side::Outside
    } else if s < -tol {
        Side::Inside
    } else {
        Side::On
    }
}

/// Axis-aligned box `[lo, hi]` as six outward quads.
pub(crate) fn box_faces(lo: Vector3<f64>, hi: Vector3<f64>) -> Vec<ClipFace> {
    let mut faces = Vec::with_capacity(6);
    for a in 0..3 {
        // (u, v, a) is a cyclic permutation, so e_u × e_v = e_a
        let u = (a + 1) % 3;
        let v = (a + 2) % 3;
        for positive in [false, true] {
            let corner = |su: f64, sv: f64| {
                let mut p = Vector3::zeros();
                p[a] = if positive { hi[a] } else { lo[a] };
                p[u] = su;
                p[v] = sv;
                p
            };
            let mut points = vec![
                corner(lo[u], lo[v]),
                corner(hi[u], lo[v]),
                corner(hi[u], hi[v]),
                corner(lo[u], hi[v]),
            ];
            let mut n = Vector3::zeros();
            let c;
            if positive {
                n[a] = 1.0;
                c = hi[a];
            } else {
                n[a] = -1.0;
                c = -lo[a];
                points.reverse();
            }
            faces.push(ClipFace {
                plane: Hs3::new(n, c),
                points,
            });
        }
    }
    faces
}

/// Clip `faces` in place by `hs`, adding a cap face on the cutting plane.
pub(crate) fn clip_by_halfspace(faces: &mut Vec<ClipFace>, hs: &Hs3, tol: f64) -> ClipOutcome {
    let mut any_out = false;
    let mut any_kept = false;
    for p in faces.iter().flat_map(|f| f.points.iter()) {
        if side(hs.signed_distance(p), tol) == Side::Outside {
            any_out = true;
        } else {
            any_kept = true;
        }
    }
    if !any_out {
        return ClipOutcome::Redundant;
    }
    if !any_kept {
        return ClipOutcome::Empty;
    }

    let mut cap = Vec::new();
    let mut kept = Vec::with_capacity(faces.len() + 1);
    for face in faces.drain(..) {
        let points = clip_polygon(&face.points, hs, tol, &mut cap);
        if !points.is_empty() {
            kept.push(ClipFace {
                plane: face.plane,
                points,
            });
        }
    }
    dedup_points_in_place(&mut cap, tol);
    order_ccw(&mut cap, &hs.n);
    if !cap.is_empty() {
        kept.push(ClipFace {
            plane: *hs,
            points: cap,
        });
    }
    *faces = kept;
    ClipOutcome::Cut
}

/// Clip one loop; points landing on the plane are also appended to `cap`.
fn clip_polygon(
    points: &[Vector3<f64>],
    hs: &Hs3,
    tol: f64,
    cap: &mut Vec<Vector3<f64>>,
) -> Vec<Vector3<f64>> {
    let n = points.len();
    let dist: Vec<f64> = points.iter().map(|p| hs.signed_distance(p)).collect();
    let mut out = Vec::with_capacity(n + 1);
    for i in 0..n {
        let j = (i + 1) % n;
        let (si, sj) = (side(dist[i], tol), side(dist[j], tol));
        match si {
            Side::Inside => out.push(points[i]),
            Side::On => {
                out.push(points[i]);
                cap.push(points[i]);
            }
            Side::Outside => {}
        }
        let crossing = match (si, sj) {
            (Side::Inside, Side::Outside) => Some((i, j)),
            (Side::Outside, Side::Inside) => Some((j, i)),
            _ => None,
        };
        if let Some((inside, outside)) = crossing {
            let t = dist[inside] / (dist[inside] - dist[outside]);
            let p = points[inside] + (points[outside] - points[inside]) * t;
            out.push(p);
            cap.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Vec<ClipFace> {
        box_faces(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn box_faces_wind_outward() {
        for f in unit_box() {
            let normal = super::super::util::newell_normal(f.points.iter().copied());
            assert!(normal.dot(&f.plane.n) > 0.0, "face {:?}", f.plane);
            for p in &f.points {
                assert!(f.plane.signed_distance(p).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn plane_outside_is_redundant() {
        let mut faces = unit_box();
        let hs = Hs3::new(Vector3::new(1.0, 0.0, 0.0), 2.0);
        assert_eq!(clip_by_halfspace(&mut faces, &hs, 1e-9), ClipOutcome::Redundant);
        assert_eq!(faces.len(), 6);
    }

    #[test]
    fn tangent_plane_is_redundant() {
        let mut faces = unit_box();
        let hs = Hs3::new(Vector3::new(0.0, 1.0, 0.0), 1.0);
        assert_eq!(clip_by_halfspace(&mut faces, &hs, 1e-9), ClipOutcome::Redundant);
    }

    #[test]
    fn plane_beyond_everything_empties() {
        let mut faces = unit_box();
        let hs = Hs3::new(Vector3::new(0.0, 0.0, 1.0), -2.0);
        assert_eq!(clip_by_halfspace(&mut faces, &hs, 1e-9), ClipOutcome::Empty);
    }

    #[test]
    fn corner_cut_adds_triangle_cap() {
        let mut faces = unit_box();
        let n = Vector3::new(1.0, 1.0, 1.0).normalize();
        let hs = Hs3::new(n, 2.0 / 3.0f64.sqrt());
        assert_eq!(clip_by_halfspace(&mut faces, &hs, 1e-9), ClipOutcome::Cut);
        assert_eq!(faces.len(), 7);
        let cap = faces.last().unwrap();
        assert_eq!(cap.points.len(), 3);
        let normal = super::super::util::newell_normal(cap.points.iter().copied());
        assert!(normal.dot(&n) > 0.0);
    }

    #[test]
    fn halving_cut_keeps_square_cap() {
        let mut faces = unit_box();
        let hs = Hs3::new(Vector3::new(1.0, 0.0, 0.0), 0.0);
        assert_eq!(clip_by_halfspace(&mut faces, &hs, 1e-9), ClipOutcome::Cut);
        // +x face removed, cap added
        assert_eq!(faces.len(), 6);
        let cap = faces.last().unwrap();
        assert_eq!(cap.points.len(), 4);
        for p in faces.iter().flat_map(|f| f.points.iter()) {
            assert!(p.x <= 1e-12);
        }
    }
}
