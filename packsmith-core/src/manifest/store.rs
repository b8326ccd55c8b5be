//! Reading and writing `manifest.json`.

use super::Manifest;
use crate::error::{PackError, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// File name of the descriptor inside the working directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Serializes with tab indentation, matching the files the consuming
/// application ships.
fn to_json(manifest: &Manifest) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    manifest.serialize(&mut serializer)?;
    Ok(buf)
}

/// Writes `manifest.json` directly inside `dir`.
pub fn save(dir: &Path, manifest: &Manifest) -> Result<()> {
    let path = dir.join(MANIFEST_FILE);

    let json = to_json(manifest).map_err(|err| {
        tracing::error!(%err, "manifest serialization failed");
        PackError::Persist
    })?;

    fs::write(&path, json).map_err(|err| {
        tracing::error!(%err, path = %path.display(), "could not write manifest");
        PackError::Persist
    })?;

    tracing::info!(path = %path.display(), "manifest written");
    Ok(())
}

/// Reads and parses `manifest.json` from `dir`. The result is a fresh,
/// independent value; callers decide how to react to failure.
pub fn load(dir: &Path) -> Result<Manifest> {
    let path = dir.join(MANIFEST_FILE);

    let content = fs::read_to_string(&path).map_err(|err| {
        tracing::error!(%err, path = %path.display(), "could not read manifest");
        PackError::ManifestRead
    })?;

    serde_json::from_str(&content).map_err(|err| {
        tracing::error!(%err, path = %path.display(), "manifest does not parse");
        PackError::ManifestRead
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{FormatVersion, Header, Module, ModuleType, PackVersion};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn sample_manifest() -> Manifest {
        Manifest {
            format_version: FormatVersion::V1,
            header: Header {
                name: "Oak Furniture".to_string(),
                description: "Furniture behaviors".to_string(),
                uuid: Uuid::new_v4(),
                version: PackVersion::new(0, 3, 1),
                min_engine_version: PackVersion::new(1, 13, 0),
            },
            modules: vec![Module {
                uuid: Uuid::new_v4(),
                description: "Furniture behaviors".to_string(),
                version: PackVersion::new(0, 3, 1),
                kind: ModuleType::Data,
            }],
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let manifest = sample_manifest();

        save(dir.path(), &manifest).unwrap();
        let loaded = load(dir.path()).unwrap();

        assert_eq!(loaded, manifest);
    }

    #[test]
    fn output_is_tab_indented() {
        let dir = TempDir::new().unwrap();
        save(dir.path(), &sample_manifest()).unwrap();

        let content = std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        assert!(content.contains("\n\t\"format_version\""));
        assert!(content.contains("\n\t\t\"name\""));
    }

    #[test]
    fn file_lands_inside_dir_despite_trailing_separator() {
        let dir = TempDir::new().unwrap();
        let with_separator = format!("{}/", dir.path().display());

        save(Path::new(&with_separator), &sample_manifest()).unwrap();

        assert!(dir.path().join(MANIFEST_FILE).is_file());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load(dir.path()), Err(PackError::ManifestRead));
    }

    #[test]
    fn load_reports_malformed_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "{not json").unwrap();
        assert_eq!(load(dir.path()), Err(PackError::ManifestRead));
    }

    #[test]
    fn load_reports_missing_fields() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), r#"{"format_version": 2}"#).unwrap();
        assert_eq!(load(dir.path()), Err(PackError::ManifestRead));
    }

    #[test]
    fn save_reports_unwritable_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no-such-subdir");
        assert_eq!(save(&missing, &sample_manifest()), Err(PackError::Persist));
    }
}
