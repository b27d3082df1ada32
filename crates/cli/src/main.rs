mod io;
mod provenance;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use kdop::api::{sample_cloud, BuildCfg, CloudParams, Dop, DopHelper, SUPPORTED_K};
use nalgebra::Vector3;
use serde::Serialize;
use serde_json::{json, Value};
use std::panic::Location;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "kdop-cli")]
#[command(about = "Build k-DOP bounding polytopes from point clouds")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build one k-DOP and write it as OBJ or JSON (plus a provenance sidecar)
    Build {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, default_value_t = 26)]
        k: u32,
        #[arg(long)]
        out: PathBuf,
        /// Relative build tolerance (default 1e-7)
        #[arg(long)]
        rel_eps: Option<f64>,
    },
    /// Print counts and volume for every supported k as JSON lines
    Sweep {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Debug)]
struct SourceArgs {
    /// Point file: OBJ (`v` lines) or CSV with x,y,z columns
    #[arg(long, required_unless_present = "sample", conflicts_with = "sample")]
    input: Option<PathBuf>,
    /// Seeded synthetic cloud instead of a file
    #[arg(long, value_enum)]
    sample: Option<SampleShape>,
    #[arg(long, default_value_t = 1000)]
    count: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum SampleShape {
    Ellipsoid,
    Box,
}

/// One line of `sweep` output.
#[derive(Debug, Serialize)]
struct SweepRow {
    k: u32,
    vertices: usize,
    faces: usize,
    edges: usize,
    volume: f64,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Build {
            source,
            k,
            out,
            rel_eps,
        } => build(&source, k, &out, rel_eps).map(|_| ()),
        Action::Sweep { source } => {
            for row in sweep(&source)? {
                println!("{}", serde_json::to_string(&row)?);
            }
            Ok(())
        }
        Action::Report => report(),
    }
}

/// Points plus a short description of where they came from.
fn load_points(source: &SourceArgs) -> Result<(Vec<Vector3<f64>>, String)> {
    if let Some(path) = &source.input {
        let points = io::read_points(path)?;
        tracing::info!(path = %path.display(), points = points.len(), "input loaded");
        return Ok((points, path.display().to_string()));
    }
    let shape = source.sample.unwrap_or(SampleShape::Ellipsoid);
    let half = Vector3::new(2.0, 1.0, 0.5);
    let params = match shape {
        SampleShape::Ellipsoid => CloudParams::ellipsoid(half, source.count),
        SampleShape::Box => CloudParams::cuboid(half, source.count),
    };
    let points = sample_cloud(&params, source.seed)?;
    tracing::info!(?shape, count = source.count, seed = source.seed, "cloud sampled");
    let label = format!("sample:{shape:?}:count={}:seed={}", source.count, source.seed);
    Ok((points, label.to_lowercase()))
}

fn build(source: &SourceArgs, k: u32, out: &Path, rel_eps: Option<f64>) -> Result<PathBuf> {
    let (points, input) = load_points(source)?;
    let mut cfg = BuildCfg::default();
    if let Some(eps) = rel_eps {
        cfg.rel_eps = eps;
    }
    let mut dop = Dop::with_cfg(k, cfg)?;
    dop.set_from_object(points.as_slice())
        .with_context(|| format!("building {k}-DOP from {input}"))?;
    let geom = dop.geometry()?;
    io::write_polytope(out, k, geom)?;
    tracing::info!(
        k,
        vertices = geom.vertices.len(),
        faces = geom.faces.len(),
        volume = geom.volume(),
        out = %out.display(),
        "polytope written"
    );

    let payload = provenance::Payload::new(json!({
        "k": k,
        "rel_eps": cfg.rel_eps,
        "points": points.len(),
        "sample": source.sample,
        "count": source.count,
        "seed": source.seed,
    }))
    .with_input(input);
    provenance::write_sidecar(&provenance::Artifact::new(out, k, geom), payload)
}

fn sweep(source: &SourceArgs) -> Result<Vec<SweepRow>> {
    let (points, _) = load_points(source)?;
    let mut dop = Dop::new(SUPPORTED_K[0])?;
    dop.set_from_object(points.as_slice())?;
    let mut rows = Vec::with_capacity(SUPPORTED_K.len());
    for k in SUPPORTED_K {
        dop.change_k(k)?;
        let geom = dop.geometry()?;
        let helper = DopHelper::new(&dop)?;
        rows.push(SweepRow {
            k,
            vertices: geom.vertices.len(),
            faces: geom.faces.len(),
            edges: helper.edges().segments.len(),
            volume: geom.volume(),
        });
    }
    Ok(rows)
}

fn report() -> Result<()> {
    let payload = provenance::Payload::new(Value::Object(Default::default()));
    let doc = provenance::document(&payload, &[], Location::caller());
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
