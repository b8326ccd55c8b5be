//! Top-level action loop.
//!
//! Owns the one piece of mutable session state, the working directory, and
//! dispatches menu choices to the wizard, the archiver, and the deployer.
//! It never inspects manifest contents itself. Whatever error an action
//! returns ends the session and becomes the process exit code.

use crate::archive;
use crate::deploy;
use crate::error::{PackError, Result};
use crate::manifest::store;
use crate::wizard;
use crate::wizard::prompt::{collect, Attempt, Prompt};
use std::path::{Path, PathBuf};

const MENU: [&str; 4] = [
    "Create manifest",
    "Export archive",
    "Deploy pack for testing",
    "Reselect working directory",
];

/// Runs a full interactive session.
///
/// `initial_dir` pre-seeds the working directory (from the command line);
/// when absent or not a directory, the operator is asked. A clean return
/// means exit code 0; an error names the category the process exits with.
pub fn run(prompt: &mut dyn Prompt, initial_dir: Option<PathBuf>) -> Result<()> {
    let mut workdir = match initial_dir {
        Some(dir) if dir.is_dir() => dir,
        Some(dir) => {
            prompt.notify(&format!(
                "`{}` doesn't exist or is invalid. Please specify a valid directory.",
                dir.display()
            ));
            select_working_dir(prompt)?
        }
        None => select_working_dir(prompt)?,
    };
    announce_workdir(prompt, &workdir);

    loop {
        let choice = match prompt.select("Choose mode:", &MENU) {
            Ok(choice) => choice,
            Err(err) => {
                // The operator went away (e.g. stdin closed); quitting at
                // the menu is not a failure.
                tracing::debug!(%err, "menu prompt lost; ending session");
                return Ok(());
            }
        };

        match choice {
            Some(0) => {
                let manifest = wizard::run(prompt)?;
                collect(prompt, PackError::Persist, |_p| {
                    Ok(match store::save(&workdir, &manifest) {
                        Ok(()) => Attempt::Valid(()),
                        Err(_) => Attempt::Invalid(
                            "Failed to create manifest at directory.".to_string(),
                        ),
                    })
                })?;
                prompt.notify("Manifest successfully generated.");
            }
            Some(1) => {
                let path = archive::run(prompt, &workdir)?;
                prompt.notify(&format!("Archive exported to `{}`.", path.display()));
            }
            Some(2) => {
                deploy::run(prompt, &workdir)?;
            }
            Some(3) => {
                workdir = select_working_dir(prompt)?;
                announce_workdir(prompt, &workdir);
            }
            _ => {
                let redo = prompt
                    .confirm(wizard::prompt::REDO_QUESTION)
                    .unwrap_or(false);
                if !redo {
                    return Ok(());
                }
            }
        }
    }
}

fn select_working_dir(prompt: &mut dyn Prompt) -> Result<PathBuf> {
    collect(prompt, PackError::WorkingDir, |p| {
        let input = p.line("Insert working directory here:")?;

        if input.is_empty() {
            return Ok(Attempt::Invalid(
                "Directory not specified. Please specify a valid directory.".to_string(),
            ));
        }

        let dir = PathBuf::from(&input);
        Ok(if dir.is_dir() {
            Attempt::Valid(dir)
        } else {
            Attempt::Invalid(
                "Directory doesn't exist or is invalid. Please specify a valid directory."
                    .to_string(),
            )
        })
    })
}

fn announce_workdir(prompt: &mut dyn Prompt, workdir: &Path) {
    prompt.notify(&format!(
        "The following directory has been set as the working directory:\n{}",
        workdir.display()
    ));
    tracing::info!(workdir = %workdir.display(), "working directory set");
}
