//! Derived mesh products: volume, triangulation, edges, flat render buffers.

use std::collections::HashSet;

use nalgebra::Vector3;

use super::types::Polytope;
use super::util::centroid;

/// Flat-shaded triangle list: each face gets its own copies of its corners
/// so every vertex can carry the face normal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleBuffers {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<[u32; 3]>,
}

impl Polytope {
    /// Enclosed volume (divergence theorem over fan triangles).
    ///
    /// Zero for flat, linear and point polytopes: the two faces of a flat
    /// polytope cancel.
    pub fn volume(&self) -> f64 {
        if self.faces.is_empty() {
            return 0.0;
        }
        // anchor at the centroid to keep the triple products small
        let o = centroid(&self.vertices);
        let mut six_v = 0.0;
        for [a, b, c] in self.triangles() {
            let pa = self.vertices[a] - o;
            let pb = self.vertices[b] - o;
            let pc = self.vertices[c] - o;
            six_v += pa.dot(&pb.cross(&pc));
        }
        (six_v / 6.0).max(0.0)
    }

    /// Fan triangulation of every face, winding preserved.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        let mut out = Vec::new();
        for f in &self.faces {
            let v = &f.vertices;
            for i in 1..v.len().saturating_sub(1) {
                out.push([v[0], v[i], v[i + 1]]);
            }
        }
        out
    }

    /// Unique undirected edges `(a, b)` with `a < b`, first-appearance order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for f in &self.faces {
            let n = f.vertices.len();
            for i in 0..n {
                let a = f.vertices[i];
                let b = f.vertices[(i + 1) % n];
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    out.push(key);
                }
            }
        }
        out
    }

    /// Vertices as `f32` triples (physics convex-hull input).
    pub fn positions_f32(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(to_f32).collect()
    }

    /// Flat-shaded render buffers.
    pub fn triangle_buffers(&self) -> TriangleBuffers {
        let mut out = TriangleBuffers::default();
        for f in &self.faces {
            let base = out.positions.len() as u32;
            let normal = to_f32(&f.plane.n);
            for p in self.face_points(f) {
                out.positions.push(to_f32(&p));
                out.normals.push(normal);
            }
            for i in 1..f.vertices.len().saturating_sub(1) {
                let i = i as u32;
                out.indices.push([base, base + i, base + i + 1]);
            }
        }
        out
    }
}

#[inline]
pub(crate) fn to_f32(v: &Vector3<f64>) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}
