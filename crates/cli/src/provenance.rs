use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use window_pose::EstimatorCfg;

/// Estimator settings as recorded next to every artifact.
pub fn cfg_json(cfg: &EstimatorCfg) -> Value {
    json!({
        "extension_factor": cfg.extension_factor,
        "border_area_frac": cfg.border_area_frac,
        "fallback": cfg.fallback.as_str(),
        "area": cfg.area.as_str(),
        "ratio": cfg.ratio.as_str(),
    })
}

/// Provenance block: code revision, library version, settings, inputs, outputs.
pub fn document(cfg: &EstimatorCfg, inputs: &[&Path], outputs: &[&Path]) -> Value {
    let paths = |ps: &[&Path]| -> Vec<String> {
        ps.iter().map(|p| p.to_string_lossy().into_owned()).collect()
    };
    json!({
        "code_rev": current_git_rev(),
        "version": window_pose::VERSION,
        "cfg": cfg_json(cfg),
        "inputs": paths(inputs),
        "outputs": paths(outputs),
    })
}

/// Write `<artifact>.provenance.json` next to `artifact`.
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, doc: &Value) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }
    fs::write(&provenance_path, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

/// `results.csv` -> `results.provenance.json`; a path without a file name
/// gets `batch.provenance.json` inside it.
fn provenance_path(artifact: &Path) -> PathBuf {
    if artifact.file_name().is_some() {
        artifact.with_extension("provenance.json")
    } else {
        artifact.join("batch.provenance.json")
    }
}

/// Commit of the running binary: `GIT_COMMIT` (runtime, then build time),
/// else `git rev-parse HEAD`, else `"unknown"`.
pub fn current_git_rev() -> String {
    let pinned = std::env::var("GIT_COMMIT")
        .ok()
        .or_else(|| option_env!("GIT_COMMIT").map(str::to_owned))
        .filter(|rev| !rev.is_empty());
    if let Some(rev) = pinned {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|rev| rev.trim().to_owned())
        .filter(|rev| !rev.is_empty())
        .unwrap_or_else(|| "unknown".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_the_table() {
        assert_eq!(
            provenance_path(Path::new("/tmp/output/results.csv")),
            Path::new("/tmp/output/results.provenance.json")
        );
        assert_eq!(
            provenance_path(Path::new("runs/results")),
            Path::new("runs/results.provenance.json")
        );
        assert_eq!(
            provenance_path(Path::new("/")),
            Path::new("/batch.provenance.json")
        );
    }

    #[test]
    fn sidecar_records_cfg_and_paths() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("results.csv");
        fs::write(&artifact, "id\n").unwrap();
        let input = dir.path().join("frames.jsonl");
        let doc = document(&EstimatorCfg::default(), &[input.as_path()], &[artifact.as_path()]);
        let prov_path = write_sidecar(&artifact, &doc).unwrap();
        assert!(prov_path.exists());
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["cfg"]["fallback"], "not-found");
        assert_eq!(parsed["cfg"]["border_area_frac"], 0.97);
    }
}
