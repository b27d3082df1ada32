//! Tolerance defaults for polytope construction.
//!
//! Policy
//! - One relative epsilon drives every length comparison during a build:
//!   `tol = rel_eps * diameter` of the starting box. Translating the input
//!   leaves `tol` unchanged.
//! - Coordinate magnitude only enters as a floor of `NOISE_ULPS` ulps, so a
//!   tiny cloud far from the origin is not compared below rounding noise.
//! - Area checks use `tol * diameter`.
//! - Defaults are fixed; `BuildCfg` exists so callers embedding unusually
//!   noisy data can loosen it without touching call sites.

/// Default relative tolerance (see module docs).
pub(crate) const DEFAULT_REL_EPS: f64 = 1e-7;
/// Floor for the diameter so a single point at the origin still gets a positive tolerance.
pub(crate) const MIN_SCALE: f64 = 1e-12;
/// Rounding-noise floor, in ulps of the largest absolute coordinate.
pub(crate) const NOISE_ULPS: f64 = 64.0;
/// Minimum |det| for three directions to seed the starting box.
pub(crate) const DET_EPS: f64 = 1e-9;

/// Build configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildCfg {
    pub rel_eps: f64,
}

impl Default for BuildCfg {
    fn default() -> Self {
        Self {
            rel_eps: DEFAULT_REL_EPS,
        }
    }
}

impl BuildCfg {
    /// Absolute length tolerance for a polytope of the given diameter whose
    /// largest absolute coordinate is `magnitude`.
    #[inline]
    pub fn tol_for(&self, diameter: f64, magnitude: f64) -> f64 {
        (self.rel_eps * diameter.max(MIN_SCALE)).max(NOISE_ULPS * f64::EPSILON * magnitude)
    }

    /// Face-area tolerance paired with `tol_for`.
    #[inline]
    pub fn area_tol(&self, tol: f64, diameter: f64) -> f64 {
        tol * diameter.max(tol)
    }
}
