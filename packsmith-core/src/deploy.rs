//! Resolving where a pack installs and copying it there.
//!
//! The destination is `<game data root>/<category folder>/<pack name>`. The
//! root is fixed per platform family; the category folder comes from the
//! governing module's type. Copying is file-level last-writer-wins over
//! whatever is already installed; there is no rollback if a copy fails
//! partway, only a retry of the copy step.

use crate::error::{PackError, Result};
use crate::manifest::{store, Manifest, Module, ModuleType};
use crate::wizard::prompt::{collect, transport, Attempt, Prompt};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Platform families with a known game data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    Android,
}

impl Platform {
    /// Maps an OS identifier (as in `std::env::consts::OS`) to a supported
    /// family.
    pub fn from_os(os: &str) -> Option<Self> {
        match os {
            "windows" => Some(Self::Windows),
            "linux" => Some(Self::Linux),
            "android" => Some(Self::Android),
            _ => None,
        }
    }

    /// The family this process is running on, if supported.
    pub fn detect() -> Option<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Game data root for this family. Android uses a fixed shared-storage
    /// path; the other families live under the user's home directory.
    pub fn data_root(self, home: &Path) -> PathBuf {
        match self {
            Self::Windows => home
                .join("AppData")
                .join("Local")
                .join("Packages")
                .join("Microsoft.MinecraftUWP_8wekyb3d8bbwe")
                .join("LocalState")
                .join("games")
                .join("com.mojang"),
            Self::Linux => home
                .join(".local")
                .join("share")
                .join("mcpelauncher")
                .join("games")
                .join("com.mojang"),
            Self::Android => PathBuf::from("/sdcard/games/com.mojang"),
        }
    }
}

/// Installation category folders recognized by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackCategory {
    Resource,
    Behavior,
    Skin,
}

impl PackCategory {
    /// Folder name under the game data root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Resource => "resource_packs",
            Self::Behavior => "behavior_packs",
            Self::Skin => "skin_packs",
        }
    }

    /// Category a module type installs into; `None` for unrecognized
    /// tokens, which deployment resolves interactively.
    pub fn for_module(kind: &ModuleType) -> Option<Self> {
        match kind {
            ModuleType::Resources => Some(Self::Resource),
            ModuleType::Data => Some(Self::Behavior),
            ModuleType::SkinPack => Some(Self::Skin),
            ModuleType::Unrecognized(_) => None,
        }
    }
}

/// Full deployment flow: resolve the game data root, pick the governing
/// module, and copy the working directory into place.
pub fn run(prompt: &mut dyn Prompt, workdir: &Path) -> Result<()> {
    let root = resolve_data_root()?;
    deploy_into(prompt, workdir, &root)
}

/// Locates the game data directory for this machine. Unsupported platforms
/// and a missing installation are hard failures; no user input can fix
/// either, so no retry is offered.
pub fn resolve_data_root() -> Result<PathBuf> {
    resolve_data_root_for(std::env::consts::OS)
}

fn resolve_data_root_for(os: &str) -> Result<PathBuf> {
    let platform = Platform::from_os(os).ok_or_else(|| {
        tracing::error!(os, "no game data root known for this platform");
        PackError::PlatformLookup
    })?;

    let root = match platform {
        Platform::Android => platform.data_root(Path::new("")),
        Platform::Windows | Platform::Linux => {
            let home = dirs::home_dir().ok_or_else(|| {
                tracing::error!("home directory could not be determined");
                PackError::PlatformLookup
            })?;
            platform.data_root(&home)
        }
    };

    if !root.is_dir() {
        tracing::error!(root = %root.display(), "game data directory does not exist");
        return Err(PackError::PlatformMissing);
    }

    tracing::debug!(root = %root.display(), "game data directory resolved");
    Ok(root)
}

/// Deployment against an already-resolved game data root.
pub fn deploy_into(prompt: &mut dyn Prompt, workdir: &Path, root: &Path) -> Result<()> {
    let manifest = store::load(workdir)?;

    let module = choose_module(prompt, &manifest)?;
    let category = resolve_category(prompt, module)?;

    let dest = root.join(category.dir_name()).join(&manifest.header.name);

    if dest.exists() {
        let replace = transport(
            prompt.confirm(&format!(
                "A pack named `{}` is already installed in {}. Replace it?",
                manifest.header.name,
                category.dir_name()
            )),
            PackError::Conflict,
        )?;

        if !replace {
            tracing::info!(dest = %dest.display(), "existing install kept");
            return Err(PackError::Conflict);
        }
    }

    collect(prompt, PackError::DeployCopy, |_p| {
        Ok(match copy_tree(workdir, &dest) {
            Ok(()) => Attempt::Valid(()),
            Err(err) => Attempt::Invalid(format!("Copy failed: {err}.")),
        })
    })?;

    tracing::info!(dest = %dest.display(), "pack deployed");
    prompt.notify(&format!("Pack deployed to `{}`.", dest.display()));
    Ok(())
}

/// Picks the module whose type governs deployment: a single module is used
/// directly, several are disambiguated by the operator, and none is a fatal
/// precondition failure.
fn choose_module<'a>(prompt: &mut dyn Prompt, manifest: &'a Manifest) -> Result<&'a Module> {
    match manifest.modules.len() {
        0 => {
            tracing::error!("manifest declares no modules; nothing determines a category");
            Err(PackError::PackType)
        }
        1 => Ok(&manifest.modules[0]),
        count => {
            let labels: Vec<String> = manifest
                .modules
                .iter()
                .enumerate()
                .map(|(index, module)| format!("module {index}: {}", module.kind))
                .collect();
            let options: Vec<&str> = labels.iter().map(String::as_str).collect();

            let index = collect(prompt, PackError::PackType, |p| {
                let choice = p.select("Which module's type governs deployment?", &options)?;
                Ok(match choice {
                    Some(index) if index < count => Attempt::Valid(index),
                    _ => Attempt::Invalid("That is not one of the listed modules.".to_string()),
                })
            })?;

            Ok(&manifest.modules[index])
        }
    }
}

/// Maps the module type to its category folder, asking the operator when
/// the token matches none of the known kinds.
fn resolve_category(prompt: &mut dyn Prompt, module: &Module) -> Result<PackCategory> {
    if let Some(category) = PackCategory::for_module(&module.kind) {
        return Ok(category);
    }

    tracing::warn!(token = %module.kind, "unrecognized module type");
    collect(prompt, PackError::PackType, |p| {
        let choice = p.select(
            "The module type is not recognized. Choose an installation category:",
            &["Resource pack", "Behavior pack", "Skin pack"],
        )?;

        Ok(match choice {
            Some(0) => Attempt::Valid(PackCategory::Resource),
            Some(1) => Attempt::Valid(PackCategory::Behavior),
            Some(2) => Attempt::Valid(PackCategory::Skin),
            _ => Attempt::Invalid("That is not one of the three categories.".to_string()),
        })
    })
}

/// Recursive copy; existing destination files are overwritten, files only
/// present in the destination are left alone.
fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }

    Ok(())
}
