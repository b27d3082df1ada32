//! Containment and intersection queries on a built DOP.
//!
//! All tests work on the slab form (`ConstraintSet`) rather than the mesh.
//! `contains_point` and `intersect_ray` are exact up to the query tolerance;
//! the sphere and box tests only check the DOP's own axes (plus the
//! coordinate axes for boxes) and may report a hit near corners.

use nalgebra::Vector3;

use super::Dop;
use crate::error::DopError;

/// Below this |d·dir| a ray is treated as parallel to a slab.
const PARALLEL_EPS: f64 = 1e-12;

impl Dop {
    pub fn contains_point(&self, p: &Vector3<f64>) -> Result<bool, DopError> {
        let b = self.built()?;
        Ok(b.constraints.contains(p, b.tol))
    }

    pub fn intersects_sphere(&self, center: &Vector3<f64>, radius: f64) -> Result<bool, DopError> {
        let b = self.built()?;
        let r = radius.max(0.0);
        Ok(b.constraints.iter().all(|(d, e)| {
            let s = d.project(center);
            s + r >= e.min - b.tol && s - r <= e.max + b.tol
        }))
    }

    /// Separating-axis test against the box `[min, max]`.
    pub fn intersects_aabb(&self, min: &Vector3<f64>, max: &Vector3<f64>) -> Result<bool, DopError> {
        let b = self.built()?;
        let center = (min + max) * 0.5;
        let half = (max - min).abs() * 0.5;
        let on_dop_axes = b.constraints.iter().all(|(d, e)| {
            let s = d.project(&center);
            let r = half.dot(&d.vector().abs());
            s + r >= e.min - b.tol && s - r <= e.max + b.tol
        });
        if !on_dop_axes {
            return Ok(false);
        }
        let Some((lo, hi)) = b.polytope.aabb() else {
            return Ok(false);
        };
        let lo_box = min.inf(max);
        let hi_box = min.sup(max);
        Ok((0..3).all(|i| hi_box[i] >= lo[i] - b.tol && lo_box[i] <= hi[i] + b.tol))
    }

    /// Entry parameter of the ray `origin + t·dir` (`t >= 0`), if it hits.
    ///
    /// `Some(0.0)` when the origin is inside. `t` is measured in units of
    /// `dir`, which need not be normalized.
    pub fn intersect_ray(&self, origin: &Vector3<f64>, dir: &Vector3<f64>) -> Result<Option<f64>, DopError> {
        let b = self.built()?;
        let mut t_enter = 0.0f64;
        let mut t_exit = f64::INFINITY;
        for (d, e) in b.constraints.iter() {
            let s0 = d.project(origin);
            let sd = d.vector().dot(dir);
            let (lo, hi) = (e.min - b.tol, e.max + b.tol);
            if sd.abs() < PARALLEL_EPS {
                if s0 < lo || s0 > hi {
                    return Ok(None);
                }
                continue;
            }
            let (t0, t1) = ((lo - s0) / sd, (hi - s0) / sd);
            let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            t_enter = t_enter.max(near);
            t_exit = t_exit.min(far);
            if t_enter > t_exit {
                return Ok(None);
            }
        }
        Ok(Some(t_enter))
    }

    /// Interval overlap on every direction both DOPs share.
    ///
    /// With equal `k` this is the exact k-DOP overlap test. Without shared
    /// directions (e.g. k=8 against k=12) there is nothing to separate on and
    /// the result is `true`.
    pub fn intersects_dop(&self, other: &Dop) -> Result<bool, DopError> {
        let a = self.built()?;
        let b = other.built()?;
        let tol = a.tol.max(b.tol);
        Ok(a.constraints.iter().all(|(d, ea)| {
            match b.constraints.extent_for_slot(d.slot()) {
                Some(eb) => ea.max + tol >= eb.min && eb.max + tol >= ea.min,
                None => true,
            }
        }))
    }

    /// Hull vertices as a flat `[x0, y0, z0, x1, ...]` `f32` buffer, the
    /// input format of convex-polyhedron colliders.
    pub fn convex_points(&self) -> Result<Vec<f32>, DopError> {
        let b = self.built()?;
        Ok(b.polytope.positions_f32().into_iter().flatten().collect())
    }
}
