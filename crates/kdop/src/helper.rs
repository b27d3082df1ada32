//! Presentation wrapper: fill and wireframe meshes derived from a DOP.
//!
//! A helper is a snapshot. It records the DOP's id and generation at build
//! time and never observes the DOP afterwards; callers poll `is_stale` and
//! call `rebuild`, which returns a fresh helper. `HelperSlot` models the
//! container position the helper occupies: installing a new helper hands the
//! previous one back by value.

use tracing::debug;

use crate::dop::{Dop, DopId};
use crate::error::DopError;
use crate::polytope::{to_f32, Polytope, TriangleBuffers};

/// Fill opacity of the translucent hull.
pub const FILL_ALPHA: f32 = 0.2;

/// 8-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const MAGENTA: Rgb = Rgb::from_hex(0xff00ff);
    pub const WHITE: Rgb = Rgb::from_hex(0xffffff);

    /// `0xRRGGBB`; bits above 24 are ignored.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Linear `[0, 1]` channels.
    pub fn to_f32(self) -> [f32; 3] {
        [self.r, self.g, self.b].map(|c| f32::from(c) / 255.0)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::MAGENTA
    }
}

/// Translucent flat-shaded hull.
#[derive(Clone, Debug, PartialEq)]
pub struct FillMesh {
    pub buffers: TriangleBuffers,
    pub tint: Rgb,
    pub alpha: f32,
    pub visible: bool,
}

/// Wireframe: unique hull vertices plus unique undirected segments.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeMesh {
    pub positions: Vec<[f32; 3]>,
    pub segments: Vec<[u32; 2]>,
    pub tint: Rgb,
    pub visible: bool,
}

impl FillMesh {
    fn from_polytope(poly: &Polytope, tint: Rgb) -> Self {
        Self {
            buffers: poly.triangle_buffers(),
            tint,
            alpha: FILL_ALPHA,
            visible: true,
        }
    }
}

impl EdgeMesh {
    fn from_polytope(poly: &Polytope, tint: Rgb) -> Self {
        Self {
            positions: poly.vertices.iter().map(to_f32).collect(),
            segments: poly
                .edges()
                .into_iter()
                .map(|(a, b)| [a as u32, b as u32])
                .collect(),
            tint,
            visible: true,
        }
    }
}

/// Renderable snapshot of one DOP's geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct DopHelper {
    source: DopId,
    generation: u64,
    k: u32,
    tint: Rgb,
    fill: FillMesh,
    edges: EdgeMesh,
}

impl DopHelper {
    /// Magenta helper for the DOP's current geometry.
    pub fn new(dop: &Dop) -> Result<Self, DopError> {
        Self::with_tint(dop, Rgb::MAGENTA)
    }

    pub fn with_tint(dop: &Dop, tint: Rgb) -> Result<Self, DopError> {
        let poly = dop.geometry()?;
        Ok(Self {
            source: dop.id(),
            generation: dop.generation(),
            k: dop.k(),
            tint,
            fill: FillMesh::from_polytope(poly, tint),
            edges: EdgeMesh::from_polytope(poly, tint),
        })
    }

    /// New helper for the DOP's current geometry, keeping tint and visibility.
    ///
    /// `self` is left untouched; the caller swaps it out (see `HelperSlot`).
    pub fn rebuild(&self, dop: &Dop) -> Result<DopHelper, DopError> {
        let mut next = Self::with_tint(dop, self.tint)?;
        next.fill.visible = self.fill.visible;
        next.edges.visible = self.edges.visible;
        Ok(next)
    }

    /// The DOP has been rebuilt, cleared or is a different DOP since this
    /// snapshot.
    pub fn is_stale(&self, dop: &Dop) -> bool {
        self.source != dop.id() || self.generation != dop.generation() || !dop.is_ready()
    }

    pub fn fill(&self) -> &FillMesh {
        &self.fill
    }
    pub fn edges(&self) -> &EdgeMesh {
        &self.edges
    }
    pub fn tint(&self) -> Rgb {
        self.tint
    }
    pub fn source(&self) -> DopId {
        self.source
    }
    pub fn generation(&self) -> u64 {
        self.generation
    }
    pub fn k(&self) -> u32 {
        self.k
    }

    pub fn set_fill_visible(&mut self, visible: bool) {
        self.fill.visible = visible;
    }
    pub fn set_edges_visible(&mut self, visible: bool) {
        self.edges.visible = visible;
    }
    pub fn fill_visible(&self) -> bool {
        self.fill.visible
    }
    pub fn edges_visible(&self) -> bool {
        self.edges.visible
    }
}

/// Container position holding at most one helper.
#[derive(Clone, Debug, Default)]
pub struct HelperSlot {
    current: Option<DopHelper>,
}

impl HelperSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&DopHelper> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut DopHelper> {
        self.current.as_mut()
    }

    /// Put `helper` in the slot and hand back the detached previous one.
    pub fn install(&mut self, helper: DopHelper) -> Option<DopHelper> {
        self.current.replace(helper)
    }

    pub fn take(&mut self) -> Option<DopHelper> {
        self.current.take()
    }

    /// Rebuild and swap when the slot is empty or stale for `dop`.
    ///
    /// Returns whether a new helper was installed. On error the slot keeps
    /// its previous helper.
    pub fn refresh(&mut self, dop: &Dop) -> Result<bool, DopError> {
        let next = match &self.current {
            Some(h) if !h.is_stale(dop) => return Ok(false),
            Some(h) => h.rebuild(dop)?,
            None => DopHelper::new(dop)?,
        };
        debug!(
            dop = dop.id().get(),
            generation = next.generation(),
            triangles = next.fill().buffers.indices.len(),
            "helper replaced"
        );
        self.install(next);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rand3::cube_corners;

    fn cube_dop(k: u32) -> Dop {
        let mut dop = Dop::new(k).unwrap();
        dop.set_from_object(&cube_corners(1.0)).unwrap();
        dop
    }

    #[test]
    fn rgb_hex_round_trip() {
        assert_eq!(Rgb::MAGENTA, Rgb { r: 255, g: 0, b: 255 });
        assert_eq!(Rgb::from_hex(0x12_34_56).to_hex(), 0x12_34_56);
        assert_eq!(Rgb::WHITE.to_f32(), [1.0, 1.0, 1.0]);
        assert_eq!(Rgb::default(), Rgb::MAGENTA);
    }

    #[test]
    fn helper_on_uninitialized_dop_fails() {
        let dop = Dop::new(6).unwrap();
        assert_eq!(DopHelper::new(&dop).unwrap_err(), DopError::NotInitialized);
    }

    #[test]
    fn cube_meshes_have_expected_counts() {
        let h = DopHelper::new(&cube_dop(6)).unwrap();
        assert_eq!(h.fill().buffers.indices.len(), 12);
        assert_eq!(h.fill().buffers.positions.len(), 24);
        assert_eq!(h.fill().alpha, FILL_ALPHA);
        assert_eq!(h.edges().positions.len(), 8);
        assert_eq!(h.edges().segments.len(), 12);
        assert_eq!(h.tint(), Rgb::MAGENTA);
    }

    #[test]
    fn rebuild_keeps_tint_and_visibility() {
        let mut dop = cube_dop(6);
        let mut h = DopHelper::with_tint(&dop, Rgb::WHITE).unwrap();
        h.set_edges_visible(false);
        assert!(!h.is_stale(&dop));

        dop.change_k(26).unwrap();
        assert!(h.is_stale(&dop));
        let next = h.rebuild(&dop).unwrap();
        assert!(!next.is_stale(&dop));
        assert_eq!(next.tint(), Rgb::WHITE);
        assert!(next.fill_visible());
        assert!(!next.edges_visible());
        assert_eq!(next.k(), 26);
        assert_eq!(next.generation(), dop.generation());
    }

    #[test]
    fn helper_of_other_dop_is_stale() {
        let a = cube_dop(6);
        let b = cube_dop(6);
        let h = DopHelper::new(&a).unwrap();
        assert!(h.is_stale(&b));
    }

    #[test]
    fn slot_hands_back_previous_helper() {
        let mut dop = cube_dop(8);
        let mut slot = HelperSlot::new();
        assert!(slot.refresh(&dop).unwrap());
        assert!(!slot.refresh(&dop).unwrap());
        let first_gen = slot.current().unwrap().generation();

        dop.set_from_object(&cube_corners(2.0)).unwrap();
        let manual = slot.current().unwrap().rebuild(&dop).unwrap();
        let old = slot.install(manual).unwrap();
        assert_eq!(old.generation(), first_gen);
        assert_eq!(slot.current().unwrap().generation(), dop.generation());
    }

    #[test]
    fn failed_refresh_keeps_helper() {
        let mut dop = cube_dop(6);
        let mut slot = HelperSlot::new();
        slot.refresh(&dop).unwrap();
        dop.clear();
        assert_eq!(slot.refresh(&dop).unwrap_err(), DopError::NotInitialized);
        assert!(slot.current().is_some());
    }
}
