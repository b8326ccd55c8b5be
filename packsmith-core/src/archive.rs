//! Zipping the working directory for distribution.
//!
//! The archive is named after the pack (`<header.name>.zip`) and lands
//! inside the working directory itself, so the tree being zipped must skip
//! the archive file while it is being written.

use crate::error::{PackError, Result};
use crate::manifest::store;
use crate::wizard::prompt::{collect, Attempt, Prompt};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Exports `<workdir>/<header.name>.zip` holding the working directory's
/// full tree, manifest included. Returns the archive path.
pub fn run(prompt: &mut dyn Prompt, workdir: &Path) -> Result<PathBuf> {
    let manifest = store::load(workdir)?;
    let archive_path = workdir.join(format!("{}.zip", manifest.header.name));

    collect(prompt, PackError::Archive, |_p| {
        Ok(match write_archive(workdir, &archive_path) {
            Ok(()) => Attempt::Valid(()),
            Err(err) => Attempt::Invalid(format!("Archive creation failed: {err}.")),
        })
    })?;

    tracing::info!(path = %archive_path.display(), "archive written");
    Ok(archive_path)
}

fn write_archive(workdir: &Path, archive_path: &Path) -> ZipResult<()> {
    let file = File::create(archive_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(workdir) {
        let entry = entry.map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        let path = entry.path();
        if path == workdir || path == archive_path {
            continue;
        }

        let relative = path
            .strip_prefix(workdir)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        let name = entry_name(relative);

        if entry.file_type().is_dir() {
            writer.add_directory(name, options)?;
        } else {
            writer.start_file(name, options)?;
            io::copy(&mut File::open(path)?, &mut writer)?;
        }
    }

    writer.finish()?;
    Ok(())
}

/// Archive entry name with forward slashes on every platform.
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
