//! Point-cloud readers and polytope writers.
//!
//! Inputs: Wavefront OBJ (`v x y z` lines; faces and other records are
//! skipped) or CSV with `x`, `y`, `z` columns (read through polars).
//! Outputs: OBJ (`v`/`f`, or `l` for a segment) or a JSON document.

use anyhow::{anyhow, bail, Context, Result};
use kdop::api::Polytope;
use nalgebra::Vector3;
use polars::prelude::*;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Obj,
    Csv,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("obj") => Ok(Self::Obj),
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => bail!("unsupported file extension: {}", path.display()),
        }
    }
}

/// Load points from an OBJ or CSV file.
pub fn read_points(path: &Path) -> Result<Vec<Vector3<f64>>> {
    match Format::from_path(path)? {
        Format::Obj => read_obj_vertices(path),
        Format::Csv => read_csv_points(path),
        Format::Json => bail!("JSON is an output format: {}", path.display()),
    }
}

pub fn read_obj_vertices(path: &Path) -> Result<Vec<Vector3<f64>>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_obj_vertices(&text).with_context(|| format!("parsing {}", path.display()))
}

fn parse_obj_vertices(text: &str) -> Result<Vec<Vector3<f64>>> {
    let mut out = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let mut fields = line.split_whitespace();
        if fields.next() != Some("v") {
            continue;
        }
        let mut xyz = [0.0f64; 3];
        for c in xyz.iter_mut() {
            let raw = fields
                .next()
                .ok_or_else(|| anyhow!("line {}: vertex needs 3 coordinates", lineno + 1))?;
            *c = raw
                .parse()
                .with_context(|| format!("line {}: bad coordinate {raw:?}", lineno + 1))?;
        }
        out.push(Vector3::new(xyz[0], xyz[1], xyz[2]));
    }
    Ok(out)
}

pub fn read_csv_points(path: &Path) -> Result<Vec<Vector3<f64>>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
            col("z").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x,y,z columns of {}", path.display()))?;
    tracing::debug!(rows = df.height(), "csv points loaded");
    let x = df.column("x")?.f64()?;
    let y = df.column("y")?.f64()?;
    let z = df.column("z")?.f64()?;
    let mut out = Vec::with_capacity(df.height());
    for (row, ((x, y), z)) in x.into_iter().zip(y).zip(z).enumerate() {
        match (x, y, z) {
            (Some(x), Some(y), Some(z)) => out.push(Vector3::new(x, y, z)),
            _ => bail!("row {row}: missing coordinate"),
        }
    }
    Ok(out)
}

#[derive(Debug, Serialize)]
pub struct FaceDto {
    pub vertices: Vec<usize>,
    pub normal: [f64; 3],
    pub offset: f64,
}

/// JSON form of a built polytope.
#[derive(Debug, Serialize)]
pub struct PolytopeDto {
    pub k: u32,
    pub volume: f64,
    pub vertices: Vec<[f64; 3]>,
    pub faces: Vec<FaceDto>,
    pub edges: Vec<[usize; 2]>,
}

impl PolytopeDto {
    pub fn new(k: u32, poly: &Polytope) -> Self {
        Self {
            k,
            volume: poly.volume(),
            vertices: poly.vertices.iter().map(|v| [v.x, v.y, v.z]).collect(),
            faces: poly
                .faces
                .iter()
                .map(|f| FaceDto {
                    vertices: f.vertices.clone(),
                    normal: [f.plane.n.x, f.plane.n.y, f.plane.n.z],
                    offset: f.plane.c,
                })
                .collect(),
            edges: poly.edges().into_iter().map(|(a, b)| [a, b]).collect(),
        }
    }
}

/// Write `poly` as OBJ or JSON, chosen by extension.
pub fn write_polytope(path: &Path, k: u32, poly: &Polytope) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let bytes = match Format::from_path(path)? {
        Format::Obj => obj_text(k, poly).into_bytes(),
        Format::Json => serde_json::to_vec_pretty(&PolytopeDto::new(k, poly))?,
        Format::Csv => bail!("CSV is an input format: {}", path.display()),
    };
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

fn obj_text(k: u32, poly: &Polytope) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "# {k}-DOP");
    for v in &poly.vertices {
        let _ = writeln!(s, "v {} {} {}", v.x, v.y, v.z);
    }
    for f in &poly.faces {
        s.push('f');
        for i in &f.vertices {
            let _ = write!(s, " {}", i + 1);
        }
        s.push('\n');
    }
    if poly.faces.is_empty() && poly.vertices.len() == 2 {
        s.push_str("l 1 2\n");
    }
    s
}
