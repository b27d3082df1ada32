//! Small utilities: combinations, tolerance-aware point merging, plane bases.

use nalgebra::Vector3;

/// k-combinations of items (lexicographic).
pub(crate) fn combinations<T: Copy>(items: &[T], k: usize) -> Vec<Vec<T>> {
    let n = items.len();
    if k > n || k == 0 {
        return Vec::new();
    }
    let mut idxs: Vec<usize> = (0..k).collect();
    let mut out = Vec::new();
    loop {
        out.push(idxs.iter().map(|&i| items[i]).collect());
        // rightmost index that can still advance
        let Some(i) = (0..k).rev().find(|&i| idxs[i] != i + n - k) else {
            break;
        };
        idxs[i] += 1;
        for j in i + 1..k {
            idxs[j] = idxs[j - 1] + 1;
        }
    }
    out
}

/// Index of a point within `tol` of `p`, pushing `p` if none exists.
///
/// Linear scan; keeps first-appearance order.
pub(crate) fn weld(points: &mut Vec<Vector3<f64>>, p: Vector3<f64>, tol: f64) -> usize {
    if let Some(i) = points.iter().position(|q| (q - p).norm() <= tol) {
        return i;
    }
    points.push(p);
    points.len() - 1
}

/// Drop points within `tol` of an earlier one, keeping first occurrences.
pub(crate) fn dedup_points_in_place(points: &mut Vec<Vector3<f64>>, tol: f64) {
    let mut out: Vec<Vector3<f64>> = Vec::with_capacity(points.len());
    for &p in points.iter() {
        weld(&mut out, p, tol);
    }
    *points = out;
}

/// Orthonormal `(u, v)` spanning the plane orthogonal to unit `n`, with `u × v = n`.
pub(crate) fn plane_basis(n: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let seed = if n.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = seed.cross(n).normalize();
    let v = n.cross(&u);
    (u, v)
}

/// Sort coplanar points counterclockwise around `n` (seen from the tip of `n`).
pub(crate) fn order_ccw(points: &mut [Vector3<f64>], n: &Vector3<f64>) {
    if points.len() < 3 {
        return;
    }
    let (u, v) = plane_basis(n);
    let center = centroid(points);
    let angle = |p: &Vector3<f64>| {
        let rel = p - center;
        v.dot(&rel).atan2(u.dot(&rel))
    };
    points.sort_by(|a, b| {
        angle(a)
            .partial_cmp(&angle(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

pub(crate) fn centroid(points: &[Vector3<f64>]) -> Vector3<f64> {
    let mut acc = Vector3::zeros();
    for p in points {
        acc += p;
    }
    acc / (points.len().max(1) as f64)
}

/// Newell normal of a closed loop; its norm is twice the enclosed area.
pub(crate) fn newell_normal<I>(loop_points: I) -> Vector3<f64>
where
    I: IntoIterator<Item = Vector3<f64>>,
    I::IntoIter: Clone,
{
    let it = loop_points.into_iter();
    let mut next = it.clone().cycle().skip(1);
    let mut acc = Vector3::zeros();
    for a in it {
        // `next` is never exhausted: it cycles over a non-empty loop here
        if let Some(b) = next.next() {
            acc += a.cross(&b);
        }
    }
    acc
}

/// Distance from `p` to the infinite line through `a` and `b` (or to `a` if
/// they coincide).
pub(crate) fn distance_to_line(p: &Vector3<f64>, a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let ab = b - a;
    let len = ab.norm();
    if len == 0.0 {
        return (p - a).norm();
    }
    (p - a).cross(&ab).norm() / len
}
