//! `depwalk init`: write a starter manifest.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::{DepwalkManifest, MANIFEST_FILE};

/// Write a `depwalk.toml` into `dir`, creating the directory if needed.
pub fn run(dir: &Path) -> Result<()> {
    create_manifest(dir)?;
    println!("Created {}", dir.join(MANIFEST_FILE).display());
    Ok(())
}

pub(crate) fn create_manifest(dir: &Path) -> Result<()> {
    let path = dir.join(MANIFEST_FILE);
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let name = dir
        .canonicalize()
        .ok()
        .and_then(|abs| abs.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "dependencies".to_string());
    fs::write(&path, DepwalkManifest::template(&name))
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("solution");

        create_manifest(&project).unwrap();

        let manifest = DepwalkManifest::load(&project.join(MANIFEST_FILE)).unwrap();
        assert_eq!(manifest.graph.name, "solution");
        assert_eq!(manifest.dependencies.len(), 7);
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "[graph]\n").unwrap();

        let err = create_manifest(dir.path()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        let content = fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        assert_eq!(content, "[graph]\n");
    }
}
