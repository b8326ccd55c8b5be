//! Interactive construction of a manifest.
//!
//! Strict sequence: format version, then header, then zero or more modules.
//! There are no backward transitions; a rejected input only ever re-runs
//! the field it was given for, via the redo contract in [`prompt`].

pub mod prompt;

use crate::error::{PackError, Result};
use crate::manifest::{FormatVersion, Header, Manifest, Module, ModuleType, PackVersion};
use prompt::{collect, transport, Attempt, Prompt};
use uuid::Uuid;

/// Runs the full wizard and returns the completed manifest. The caller is
/// responsible for persisting it.
pub fn run(prompt: &mut dyn Prompt) -> Result<Manifest> {
    let format_version = select_format_version(prompt)?;
    let header = build_header(prompt, format_version)?;
    let modules = build_modules(prompt, &header)?;

    tracing::debug!(
        format_version = %format_version,
        modules = modules.len(),
        "manifest assembled"
    );

    Ok(Manifest {
        format_version,
        header,
        modules,
    })
}

fn select_format_version(prompt: &mut dyn Prompt) -> Result<FormatVersion> {
    collect(prompt, PackError::FormatVersion, |p| {
        let choice = p.select(
            "Choose your format version:",
            &[
                "Format version 1 (engines up to 1.13; deprecated)",
                "Format version 2 (engines 1.14 and newer; preferred)",
            ],
        )?;

        Ok(match choice {
            Some(0) => Attempt::Valid(FormatVersion::V1),
            Some(1) => Attempt::Valid(FormatVersion::V2),
            _ => Attempt::Invalid(
                "Specified format version is unknown or invalid. \
                 Please specify a valid format version."
                    .to_string(),
            ),
        })
    })
}

fn build_header(prompt: &mut dyn Prompt, format_version: FormatVersion) -> Result<Header> {
    let uuid = Uuid::new_v4();

    let name = collect(prompt, PackError::Header, |p| {
        let name = p.line("Pack name:")?;
        Ok(if name.is_empty() {
            Attempt::Invalid("No name specified. Please specify a valid name.".to_string())
        } else {
            Attempt::Valid(name)
        })
    })?;

    let description = collect(prompt, PackError::Header, |p| {
        let description = p.line("Pack description:")?;
        Ok(if description.is_empty() {
            Attempt::Invalid(
                "No description specified. Please specify a valid description.".to_string(),
            )
        } else {
            Attempt::Valid(description)
        })
    })?;

    let version = collect_version(
        prompt,
        "Pack version [default: 1.0.0]:",
        PackVersion::new(1, 0, 0),
        PackError::Header,
    )?;

    let floor = format_version.engine_floor();
    let min_engine_version = collect(prompt, PackError::Header, |p| {
        let input = p.line(&format!("Pack minimum engine version [default: {floor}]:"))?;

        let engine_version = if input.is_empty() {
            floor
        } else {
            match input.parse::<PackVersion>() {
                Ok(version) => version,
                Err(err) => return Ok(Attempt::Invalid(format!("{err}."))),
            }
        };

        Ok(if format_version.accepts_engine_version(engine_version) {
            Attempt::Valid(engine_version)
        } else {
            Attempt::Invalid(format!(
                "Minimum engine version {engine_version} is not supported by \
                 format version {format_version}."
            ))
        })
    })?;

    Ok(Header {
        name,
        description,
        uuid,
        version,
        min_engine_version,
    })
}

fn build_modules(prompt: &mut dyn Prompt, header: &Header) -> Result<Vec<Module>> {
    let mut modules = Vec::new();

    while transport(prompt.confirm("Add new module?"), PackError::Module)? {
        modules.push(build_module(prompt, header)?);
        prompt.notify("Module added.");
    }

    Ok(modules)
}

fn build_module(prompt: &mut dyn Prompt, header: &Header) -> Result<Module> {
    let uuid = Uuid::new_v4();

    let input = transport(
        prompt.line("Module description [default: same as the pack]:"),
        PackError::Module,
    )?;
    let description = if input.is_empty() {
        header.description.clone()
    } else {
        input
    };

    let version = collect_version(
        prompt,
        &format!("Module version [default: {}]:", header.version),
        header.version,
        PackError::Module,
    )?;

    let kind = collect(prompt, PackError::Module, |p| {
        let choice = p.select(
            "Module type:",
            &["Resource Pack", "Behavior Pack", "Skin Pack"],
        )?;

        Ok(match choice {
            Some(0) => Attempt::Valid(ModuleType::Resources),
            Some(1) => Attempt::Valid(ModuleType::Data),
            Some(2) => Attempt::Valid(ModuleType::SkinPack),
            _ => Attempt::Invalid(
                "Module type unknown or invalid. Please specify a valid module type.".to_string(),
            ),
        })
    })?;

    Ok(Module {
        uuid,
        description,
        version,
        kind,
    })
}

/// Collects a version field where blank input means `default`.
fn collect_version(
    prompt: &mut dyn Prompt,
    question: &str,
    default: PackVersion,
    on_abort: PackError,
) -> Result<PackVersion> {
    collect(prompt, on_abort, |p| {
        let input = p.line(question)?;

        if input.is_empty() {
            return Ok(Attempt::Valid(default));
        }

        Ok(match input.parse::<PackVersion>() {
            Ok(version) => Attempt::Valid(version),
            Err(err) => Attempt::Invalid(format!("{err}.")),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt::ScriptedPrompt;

    /// Answers for a format-2 header with defaulted versions.
    fn header_script(prompt: ScriptedPrompt) -> ScriptedPrompt {
        prompt
            .with_select(Some(1))
            .with_line("Lantern Pack")
            .with_line("Handheld lanterns")
            .with_line("")
            .with_line("")
    }

    #[test]
    fn builds_manifest_with_defaults_and_no_modules() {
        let mut prompt = header_script(ScriptedPrompt::new()).with_confirm(false);

        let manifest = run(&mut prompt).unwrap();

        assert_eq!(manifest.format_version, FormatVersion::V2);
        assert_eq!(manifest.header.name, "Lantern Pack");
        assert_eq!(manifest.header.description, "Handheld lanterns");
        assert_eq!(manifest.header.version, PackVersion::new(1, 0, 0));
        assert_eq!(manifest.header.min_engine_version, PackVersion::new(1, 16, 0));
        assert!(manifest.modules.is_empty());
    }

    #[test]
    fn builds_module_with_header_defaults() {
        let mut prompt = header_script(ScriptedPrompt::new())
            .with_confirm(true)
            .with_line("")
            .with_line("")
            .with_select(Some(1))
            .with_confirm(false);

        let manifest = run(&mut prompt).unwrap();

        assert_eq!(manifest.modules.len(), 1);
        let module = &manifest.modules[0];
        assert_eq!(module.description, manifest.header.description);
        assert_eq!(module.version, manifest.header.version);
        assert_eq!(module.kind, ModuleType::Data);
        assert_ne!(module.uuid, manifest.header.uuid);
    }

    #[test]
    fn collects_multiple_modules_in_order() {
        let mut prompt = header_script(ScriptedPrompt::new())
            .with_confirm(true)
            .with_line("textures")
            .with_line("")
            .with_select(Some(0))
            .with_confirm(true)
            .with_line("scripts")
            .with_line("2.0.0")
            .with_select(Some(1))
            .with_confirm(false);

        let manifest = run(&mut prompt).unwrap();

        assert_eq!(manifest.modules.len(), 2);
        assert_eq!(manifest.modules[0].kind, ModuleType::Resources);
        assert_eq!(manifest.modules[0].description, "textures");
        assert_eq!(manifest.modules[1].kind, ModuleType::Data);
        assert_eq!(manifest.modules[1].version, PackVersion::new(2, 0, 0));
    }

    #[test]
    fn aborts_with_format_category_on_declined_retry() {
        let mut prompt = ScriptedPrompt::new().with_select(None).with_confirm(false);
        assert_eq!(run(&mut prompt), Err(PackError::FormatVersion));
    }

    #[test]
    fn aborts_with_header_category_on_empty_name() {
        let mut prompt = ScriptedPrompt::new()
            .with_select(Some(1))
            .with_line("")
            .with_confirm(false);

        assert_eq!(run(&mut prompt), Err(PackError::Header));
    }

    #[test]
    fn retries_only_the_rejected_field() {
        let mut prompt = ScriptedPrompt::new()
            .with_select(Some(1))
            .with_line("Lantern Pack")
            .with_line("Handheld lanterns")
            .with_line("not-a-version")
            .with_confirm(true)
            .with_line("1.2.3")
            .with_line("")
            .with_confirm(false);

        let manifest = run(&mut prompt).unwrap();

        // The name and description were asked exactly once.
        assert_eq!(manifest.header.name, "Lantern Pack");
        assert_eq!(manifest.header.version, PackVersion::new(1, 2, 3));
        let asked = prompt
            .transcript
            .iter()
            .filter(|line| line.as_str() == "Pack name:")
            .count();
        assert_eq!(asked, 1);
    }

    #[test]
    fn format_two_rejects_engine_minor_thirteen() {
        let mut prompt = ScriptedPrompt::new()
            .with_select(Some(1))
            .with_line("Lantern Pack")
            .with_line("Handheld lanterns")
            .with_line("")
            .with_line("1.13.0")
            .with_confirm(false);

        assert_eq!(run(&mut prompt), Err(PackError::Header));
    }

    #[test]
    fn format_two_accepts_engine_minor_fourteen() {
        let mut prompt = ScriptedPrompt::new()
            .with_select(Some(1))
            .with_line("Lantern Pack")
            .with_line("Handheld lanterns")
            .with_line("")
            .with_line("1.14.0")
            .with_confirm(false);

        let manifest = run(&mut prompt).unwrap();
        assert_eq!(manifest.header.min_engine_version, PackVersion::new(1, 14, 0));
    }

    #[test]
    fn format_one_accepts_old_engine_lines() {
        let mut prompt = ScriptedPrompt::new()
            .with_select(Some(0))
            .with_line("Lantern Pack")
            .with_line("Handheld lanterns")
            .with_line("")
            .with_line("1.2.0")
            .with_confirm(false);

        let manifest = run(&mut prompt).unwrap();
        assert_eq!(manifest.format_version, FormatVersion::V1);
        assert_eq!(manifest.header.min_engine_version, PackVersion::new(1, 2, 0));
    }

    #[test]
    fn module_type_retry_then_abort_keeps_module_category() {
        let mut prompt = header_script(ScriptedPrompt::new())
            .with_confirm(true)
            .with_line("")
            .with_line("")
            .with_select(None)
            .with_confirm(false);

        assert_eq!(run(&mut prompt), Err(PackError::Module));
    }
}
