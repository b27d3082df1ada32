//! Typed vertex sources.
//!
//! The engine never walks a scene graph. Callers flatten whatever they have
//! (a mesh's world-space positions, a render buffer, several meshes of a
//! group) into something implementing [`VertexSource`].

use nalgebra::{Matrix4, Vector3, Vector4};

/// A finite sequence of 3D points in one coordinate space.
///
/// Implementations push every point exactly once, in a stable order, widened
/// to `f64`.
pub trait VertexSource {
    fn for_each_vertex(&self, f: &mut dyn FnMut(Vector3<f64>));

    /// Collect all points into an owned buffer.
    fn collect_points(&self) -> Vec<Vector3<f64>> {
        let mut out = Vec::new();
        self.for_each_vertex(&mut |p| out.push(p));
        out
    }
}

impl VertexSource for [Vector3<f64>] {
    fn for_each_vertex(&self, f: &mut dyn FnMut(Vector3<f64>)) {
        for &p in self {
            f(p);
        }
    }
}

impl VertexSource for [Vector3<f32>] {
    fn for_each_vertex(&self, f: &mut dyn FnMut(Vector3<f64>)) {
        for p in self {
            f(p.cast::<f64>());
        }
    }
}

impl VertexSource for [[f64; 3]] {
    fn for_each_vertex(&self, f: &mut dyn FnMut(Vector3<f64>)) {
        for &[x, y, z] in self {
            f(Vector3::new(x, y, z));
        }
    }
}

impl VertexSource for [[f32; 3]] {
    fn for_each_vertex(&self, f: &mut dyn FnMut(Vector3<f64>)) {
        for &[x, y, z] in self {
            f(Vector3::new(f64::from(x), f64::from(y), f64::from(z)));
        }
    }
}

impl<T> VertexSource for Vec<T>
where
    [T]: VertexSource,
{
    fn for_each_vertex(&self, f: &mut dyn FnMut(Vector3<f64>)) {
        self.as_slice().for_each_vertex(f)
    }
}

impl<T, const N: usize> VertexSource for [T; N]
where
    [T]: VertexSource,
{
    fn for_each_vertex(&self, f: &mut dyn FnMut(Vector3<f64>)) {
        self.as_slice().for_each_vertex(f)
    }
}

/// Flat `xyzxyz…` position buffer, as stored in a render vertex attribute.
///
/// A trailing partial triple is ignored.
#[derive(Clone, Copy, Debug)]
pub struct PositionBuffer<'a>(pub &'a [f32]);

impl VertexSource for PositionBuffer<'_> {
    fn for_each_vertex(&self, f: &mut dyn FnMut(Vector3<f64>)) {
        for c in self.0.chunks_exact(3) {
            f(Vector3::new(
                f64::from(c[0]),
                f64::from(c[1]),
                f64::from(c[2]),
            ));
        }
    }
}

/// Source whose points are mapped through an affine (world) matrix.
///
/// The last row of `world` is ignored; points are treated as `(x, y, z, 1)`.
#[derive(Clone, Debug)]
pub struct Transformed<'a, S: ?Sized> {
    pub source: &'a S,
    pub world: Matrix4<f64>,
}

impl<'a, S: VertexSource + ?Sized> Transformed<'a, S> {
    pub fn new(source: &'a S, world: Matrix4<f64>) -> Self {
        Self { source, world }
    }
}

impl<S: VertexSource + ?Sized> VertexSource for Transformed<'_, S> {
    fn for_each_vertex(&self, f: &mut dyn FnMut(Vector3<f64>)) {
        let m = self.world;
        self.source.for_each_vertex(&mut |p| {
            let q = m * Vector4::new(p.x, p.y, p.z, 1.0);
            f(Vector3::new(q.x, q.y, q.z));
        });
    }
}

/// Union of several sources, e.g. all meshes below one group node.
#[derive(Clone, Copy, Debug)]
pub struct MeshGroup<'a, S>(pub &'a [S]);

impl<S: VertexSource> VertexSource for MeshGroup<'_, S> {
    fn for_each_vertex(&self, f: &mut dyn FnMut(Vector3<f64>)) {
        for member in self.0 {
            member.for_each_vertex(f);
        }
    }
}
