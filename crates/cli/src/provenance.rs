use anyhow::{Context, Result};
use kdop::api::Polytope;
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Build parameters and point sources recorded next to every written polytope.
pub struct Payload {
    pub params: Value,
    /// File path or sampler description.
    pub inputs: Vec<String>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            inputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.inputs.push(input.into());
        self
    }
}

/// Summary of one written k-DOP.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Artifact {
    pub path: PathBuf,
    pub k: u32,
    pub vertices: usize,
    pub faces: usize,
    pub volume: f64,
}

impl Artifact {
    pub fn new(path: &Path, k: u32, poly: &Polytope) -> Self {
        Self {
            path: path.to_path_buf(),
            k,
            vertices: poly.vertices.len(),
            faces: poly.faces.len(),
            volume: poly.volume(),
        }
    }

    /// `<stem>.provenance.json` beside the output; `<k>-dop` when the path has no stem.
    pub fn sidecar_path(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}-dop", self.k));
        self.path.with_file_name(format!("{stem}.provenance.json"))
    }
}

/// Code revision, engine version, callsite, params and I/O as one JSON value.
pub fn document(payload: &Payload, outputs: &[Artifact], callsite: &Location<'_>) -> Value {
    json!({
        "code_rev": current_git_rev(),
        "kdop_version": kdop::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": payload.params,
        "inputs": payload.inputs,
        "outputs": outputs
    })
}

#[track_caller]
pub fn write_sidecar(artifact: &Artifact, payload: Payload) -> Result<PathBuf> {
    let path = artifact.sidecar_path();
    let doc = document(&payload, std::slice::from_ref(artifact), Location::caller());
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`, else "unknown".
pub fn current_git_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .or_else(|| {
            Command::new("git")
                .args(["rev-parse", "HEAD"])
                .output()
                .ok()
                .filter(|out| out.status.success())
                .and_then(|out| String::from_utf8(out.stdout).ok())
                .map(|s| s.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
