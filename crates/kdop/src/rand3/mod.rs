//! Seeded synthetic point clouds.
//!
//! Purpose
//! - Reproducible inputs for tests, benchmarks, the cargo example and the CLI.
//! - Every sample carries the seed that replays it.
//!
//! Shapes
//! - `Ellipsoid`: uniform in the solid ellipsoid with the given radii.
//! - `Box`: uniform in the axis box `[-half, half]`.
//!
//! Both are optionally rotated and then translated by `center`.

use nalgebra::{Rotation3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::fmt;

/// Error for invalid sampler parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum SampleError {
    InvalidParams { reason: String },
}

impl SampleError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid sampler params: {reason}"),
        }
    }
}

impl std::error::Error for SampleError {}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CloudShape {
    Ellipsoid { radii: Vector3<f64> },
    Box { half: Vector3<f64> },
}

impl CloudShape {
    fn extents(&self) -> &Vector3<f64> {
        match self {
            Self::Ellipsoid { radii } => radii,
            Self::Box { half } => half,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CloudParams {
    pub shape: CloudShape,
    pub count: usize,
    pub center: Vector3<f64>,
    pub rotation: Option<Rotation3<f64>>,
}

impl CloudParams {
    pub fn ellipsoid(radii: Vector3<f64>, count: usize) -> Self {
        Self {
            shape: CloudShape::Ellipsoid { radii },
            count,
            center: Vector3::zeros(),
            rotation: None,
        }
    }

    pub fn cuboid(half: Vector3<f64>, count: usize) -> Self {
        Self {
            shape: CloudShape::Box { half },
            count,
            center: Vector3::zeros(),
            rotation: None,
        }
    }

    fn validate(&self) -> Result<(), SampleError> {
        if self.count == 0 {
            return Err(SampleError::invalid("count must be > 0"));
        }
        let e = self.shape.extents();
        if e.iter().any(|x| !x.is_finite() || *x < 0.0) {
            return Err(SampleError::invalid("shape extents must be finite and >= 0"));
        }
        if !self.center.iter().all(|x| x.is_finite()) {
            return Err(SampleError::invalid("center must be finite"));
        }
        Ok(())
    }
}

/// Replay token: the seed that regenerates one cloud.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedReplay {
    pub seed: u64,
}

#[derive(Clone, Debug)]
pub struct CloudSample {
    pub points: Vec<Vector3<f64>>,
    pub replay: SeedReplay,
}

/// Draw one cloud from `seed`.
pub fn sample_cloud(params: &CloudParams, seed: u64) -> Result<Vec<Vector3<f64>>, SampleError> {
    params.validate()?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(params.count);
    for _ in 0..params.count {
        let local = match params.shape {
            CloudShape::Ellipsoid { radii } => sample_unit_ball(&mut rng).component_mul(&radii),
            CloudShape::Box { half } => {
                Vector3::new(symmetric(&mut rng), symmetric(&mut rng), symmetric(&mut rng))
                    .component_mul(&half)
            }
        };
        let rotated = match &params.rotation {
            Some(r) => r * local,
            None => local,
        };
        out.push(rotated + params.center);
    }
    Ok(out)
}

/// Stream of clouds with per-sample seeds drawn from a master seed.
pub struct CloudGenerator {
    params: CloudParams,
    master_rng: StdRng,
}

impl CloudGenerator {
    pub fn new(params: CloudParams, seed: u64) -> Result<Self, SampleError> {
        params.validate()?;
        Ok(Self {
            params,
            master_rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn params(&self) -> &CloudParams {
        &self.params
    }

    pub fn generate_next(&mut self) -> Result<CloudSample, SampleError> {
        let seed = self.master_rng.next_u64();
        let points = sample_cloud(&self.params, seed)?;
        Ok(CloudSample {
            points,
            replay: SeedReplay { seed },
        })
    }

    pub fn regenerate(&self, replay: &SeedReplay) -> Result<Vec<Vector3<f64>>, SampleError> {
        sample_cloud(&self.params, replay.seed)
    }
}

/// The eight corners of the cube `[-half, half]^3`.
pub fn cube_corners(half: f64) -> Vec<Vector3<f64>> {
    let mut out = Vec::with_capacity(8);
    for &x in &[-half, half] {
        for &y in &[-half, half] {
            for &z in &[-half, half] {
                out.push(Vector3::new(x, y, z));
            }
        }
    }
    out
}

fn symmetric(rng: &mut StdRng) -> f64 {
    rng.gen_range(-1.0..=1.0)
}

fn sample_unit_ball(rng: &mut StdRng) -> Vector3<f64> {
    // rejection from the cube; accepts with probability pi/6
    loop {
        let v = Vector3::new(symmetric(rng), symmetric(rng), symmetric(rng));
        if v.norm_squared() <= 1.0 {
            return v;
        }
    }
}
