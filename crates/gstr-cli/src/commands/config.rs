//! Config command - inspect and edit the configuration file.
//!
//! Every subcommand acts on one file: `--config` when given, otherwise the
//! per-user default. `init --output` writes elsewhere without changing that.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;
use tracing::debug;

use gstr_core::models::config::GstrConfig;

use super::default_config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write a configuration file with default values
    Init(InitArgs),

    /// Print one value by dotted key (e.g. "export.file_name")
    Get {
        /// Dotted configuration key
        key: String,
    },

    /// Change one value by dotted key
    Set {
        /// Dotted configuration key
        key: String,
        /// New value, as JSON or a bare string
        value: String,
    },

    /// Print the configuration file location
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Write to this path instead
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Replace an existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let file = ConfigFile::resolve(config_path);
    debug!("Config command on {}", file.path.display());

    match args.command {
        ConfigCommand::Show => file.show(),
        ConfigCommand::Init(init) => file.init(init),
        ConfigCommand::Get { key } => file.get(&key),
        ConfigCommand::Set { key, value } => file.set(&key, &value),
        ConfigCommand::Path => file.describe(),
    }
}

/// The configuration file a config subcommand works on.
struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    fn resolve(config_path: Option<&str>) -> Self {
        let path = config_path
            .map(PathBuf::from)
            .unwrap_or_else(default_config_path);
        Self { path }
    }

    /// Stored settings, or defaults when the file has not been created.
    fn load(&self) -> anyhow::Result<GstrConfig> {
        if self.path.exists() {
            Ok(GstrConfig::from_file(&self.path)?)
        } else {
            Ok(GstrConfig::default())
        }
    }

    fn show(&self) -> anyhow::Result<()> {
        if !self.path.exists() {
            eprintln!(
                "{} {} does not exist, showing defaults.",
                style("ℹ").blue(),
                self.path.display()
            );
        }
        println!("{}", serde_json::to_string_pretty(&self.load()?)?);
        Ok(())
    }

    fn init(&self, args: InitArgs) -> anyhow::Result<()> {
        let target = args.output.unwrap_or_else(|| self.path.clone());

        if target.exists() && !args.force {
            anyhow::bail!(
                "Config file already exists at {}. Use --force to overwrite.",
                target.display()
            );
        }

        write_config(&target, &GstrConfig::default())?;
        println!(
            "{} Created configuration file at {}",
            style("✓").green(),
            target.display()
        );
        Ok(())
    }

    fn get(&self, key: &str) -> anyhow::Result<()> {
        let json = serde_json::to_value(self.load()?)?;
        let value = lookup(&json, key)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn set(&self, key: &str, raw: &str) -> anyhow::Result<()> {
        // Bare words are taken as strings
        let value: Value =
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

        let mut json = serde_json::to_value(self.load()?)?;
        assign(&mut json, key, value.clone())?;

        let updated: GstrConfig = serde_json::from_value(json)
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
        write_config(&self.path, &updated)?;

        println!(
            "{} Set {} = {} in {}",
            style("✓").green(),
            key,
            serde_json::to_string(&value)?,
            self.path.display()
        );
        Ok(())
    }

    fn describe(&self) -> anyhow::Result<()> {
        println!("Configuration file: {}", self.path.display());

        if self.path.exists() {
            println!("Status: {}", style("exists").green());
        } else {
            println!("Status: {}", style("not created").yellow());
            println!();
            println!("Run 'gstr config init' to create a configuration file.");
        }
        Ok(())
    }
}

fn write_config(path: &Path, config: &GstrConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

/// Follow a dotted key through nested objects.
fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |node, part| node.get(part))
}

/// Replace the value at an existing dotted key. New keys are rejected so
/// typos surface instead of being silently ignored on load.
fn assign(json: &mut Value, key: &str, value: Value) -> anyhow::Result<()> {
    let (parent_key, leaf) = match key.rsplit_once('.') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        anyhow::bail!("Empty configuration key");
    }

    let mut node = json;
    if let Some(parent_key) = parent_key {
        for part in parent_key.split('.') {
            node = node
                .get_mut(part)
                .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
        }
    }

    let Some(object) = node.as_object_mut() else {
        anyhow::bail!("Cannot set value at non-object path: {}", key);
    };
    match object.get_mut(leaf) {
        Some(slot) => {
            *slot = value;
            Ok(())
        }
        None => anyhow::bail!("Configuration key not found: {}", key),
    }
}
