//! Preset management commands.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use freqgate_config::{
    FACTORY_PRESET_NAMES, GatePreset, factory_preset, is_factory_preset, label_for,
    list_user_presets, load_preset, preset_file_name, user_presets_dir,
};
use freqgate_effects::GateParam;

use super::common::GateOptions;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show the parameter values of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save a parameter set as a preset
    Save {
        /// Name for the new preset
        name: String,

        /// Destination file (defaults to the user preset directory)
        path: Option<PathBuf>,

        #[command(flatten)]
        gate: GateOptions,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Overwrite if the file already exists
        #[arg(long)]
        force: bool,
    },

    /// Show the user preset directory
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list(factory, user),
        PresetsCommand::Show { name } => show(&name),
        PresetsCommand::Save {
            name,
            path,
            gate,
            description,
            force,
        } => save(&name, path, &gate, description, force),
        PresetsCommand::Paths => {
            println!("User presets: {}", user_presets_dir().display());
            Ok(())
        }
    }
}

fn list(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    let show_factory = !user_only || factory_only;
    let show_user = !factory_only || user_only;

    if show_factory {
        println!("Factory presets:");
        for name in FACTORY_PRESET_NAMES {
            let description = factory_preset(name)
                .and_then(|p| p.description)
                .unwrap_or_default();
            println!("  {name:<14} {description}");
        }
    }

    if show_user {
        if show_factory {
            println!();
        }
        println!("User presets ({}):", user_presets_dir().display());
        let names = list_user_presets()?;
        if names.is_empty() {
            println!("  (none)");
        }
        for name in names {
            let shadow = if is_factory_preset(&name) {
                "  (overrides factory)"
            } else {
                ""
            };
            println!("  {name}{shadow}");
        }
    }

    Ok(())
}

fn show(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name).with_context(|| format!("loading preset '{name}'"))?;
    let settings = preset
        .to_settings()
        .with_context(|| format!("preset '{name}'"))?;

    println!("{}", preset.name);
    if let Some(description) = &preset.description {
        println!("  {description}");
    }
    println!();
    for (param, value) in GateParam::ALL.into_iter().zip(settings.to_values()) {
        let desc = param.descriptor();
        let shown = label_for(param, value).map_or_else(
            || format!("{value}{}", desc.unit.suffix()),
            str::to_string,
        );
        println!("  {:<12} {shown}", desc.string_id);
    }
    Ok(())
}

fn save(
    name: &str,
    path: Option<PathBuf>,
    gate: &GateOptions,
    description: Option<String>,
    force: bool,
) -> anyhow::Result<()> {
    let settings = gate.settings()?;
    let path = path.unwrap_or_else(|| user_presets_dir().join(preset_file_name(name)));
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let mut preset = GatePreset::from_settings(name, &settings);
    if let Some(description) = description {
        preset = preset.with_description(description);
    }
    preset.save(&path)?;
    println!("Saved preset '{name}' to {}", path.display());
    Ok(())
}
