//! Config command - manage configuration.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use bonex_core::models::config::BonexConfig;

/// Keys addressable through `config get` and `config set`.
const CONFIG_KEYS: [&str; 4] = [
    "engine.model",
    "engine.timeout_secs",
    "engine.max_output_tokens",
    "extraction.language",
];

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a configuration value
    Get {
        /// Configuration key (e.g., "engine.model")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(),
        ConfigCommand::Init(init_args) => init_config(init_args),
        ConfigCommand::Get { key } => get_config(&key),
        ConfigCommand::Set { key, value } => set_config(&key, &value),
        ConfigCommand::Path => show_path(),
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bonex")
        .join("config.json")
}

fn load_or_default(path: &PathBuf) -> anyhow::Result<BonexConfig> {
    if path.exists() {
        Ok(BonexConfig::from_file(path)?)
    } else {
        Ok(BonexConfig::default())
    }
}

/// Read one known key from the typed config.
fn get_value(config: &BonexConfig, key: &str) -> anyhow::Result<String> {
    match key {
        "engine.model" => Ok(config.engine.model.clone()),
        "engine.timeout_secs" => Ok(config.engine.timeout_secs.to_string()),
        "engine.max_output_tokens" => Ok(config.engine.max_output_tokens.to_string()),
        "extraction.language" => Ok(config.extraction.language.clone()),
        _ => anyhow::bail!(
            "Unknown configuration key '{}'. Valid keys: {}",
            key,
            CONFIG_KEYS.join(", ")
        ),
    }
}

/// Write one known key on the typed config, parsing numeric fields.
fn set_value(config: &mut BonexConfig, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "engine.model" => config.engine.model = value.to_string(),
        "engine.timeout_secs" => {
            config.engine.timeout_secs = value.parse().map_err(|_| {
                anyhow::anyhow!(
                    "engine.timeout_secs expects a whole number of seconds, got '{}'",
                    value
                )
            })?;
        }
        "engine.max_output_tokens" => {
            config.engine.max_output_tokens = value.parse().map_err(|_| {
                anyhow::anyhow!(
                    "engine.max_output_tokens expects a whole number, got '{}'",
                    value
                )
            })?;
        }
        "extraction.language" => config.extraction.language = value.to_string(),
        _ => anyhow::bail!(
            "Unknown configuration key '{}'. Valid keys: {}",
            key,
            CONFIG_KEYS.join(", ")
        ),
    }

    Ok(())
}

fn show_config() -> anyhow::Result<()> {
    let config_path = default_config_path();

    if config_path.exists() {
        println!(
            "{} Configuration from {}",
            style("ℹ").blue(),
            config_path.display()
        );
    } else {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }

    let config = load_or_default(&config_path)?;

    println!();
    for key in CONFIG_KEYS {
        println!("  {:<26} {}", key, get_value(&config, key)?);
    }

    Ok(())
}

fn init_config(args: InitArgs) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(default_config_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    BonexConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(key: &str) -> anyhow::Result<()> {
    let config = load_or_default(&default_config_path())?;

    println!("{}", get_value(&config, key)?);

    Ok(())
}

fn set_config(key: &str, value: &str) -> anyhow::Result<()> {
    let config_path = default_config_path();

    let mut config = load_or_default(&config_path)?;
    set_value(&mut config, key, value)?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(&config_path)?;

    println!("{} Set {} = {}", style("✓").green(), key, value);

    Ok(())
}

fn show_path() -> anyhow::Result<()> {
    let config_path = default_config_path();

    println!("Configuration file: {}", config_path.display());

    if config_path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'bonex config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_reads_every_known_key() {
        let config = BonexConfig::default();

        assert_eq!(
            get_value(&config, "engine.model").unwrap(),
            "gemini-1.5-flash"
        );
        assert_eq!(get_value(&config, "engine.timeout_secs").unwrap(), "30");
        assert_eq!(
            get_value(&config, "engine.max_output_tokens").unwrap(),
            "2048"
        );
        assert_eq!(
            get_value(&config, "extraction.language").unwrap(),
            "Bulgarian"
        );
    }

    #[test]
    fn test_get_rejects_unknown_key() {
        let config = BonexConfig::default();

        let err = get_value(&config, "engine.temperature").unwrap_err();
        assert!(err.to_string().contains("engine.temperature"));
        assert!(err.to_string().contains("extraction.language"));
    }

    #[test]
    fn test_set_updates_string_fields() {
        let mut config = BonexConfig::default();

        set_value(&mut config, "engine.model", "gemini-1.5-pro").unwrap();
        set_value(&mut config, "extraction.language", "Polish").unwrap();

        assert_eq!(config.engine.model, "gemini-1.5-pro");
        assert_eq!(config.extraction.language, "Polish");
    }

    #[test]
    fn test_set_parses_numeric_fields() {
        let mut config = BonexConfig::default();

        set_value(&mut config, "engine.timeout_secs", "45").unwrap();
        set_value(&mut config, "engine.max_output_tokens", "4096").unwrap();

        assert_eq!(config.engine.timeout_secs, 45);
        assert_eq!(config.engine.max_output_tokens, 4096);
    }

    #[test]
    fn test_set_rejects_non_numeric_timeout() {
        let mut config = BonexConfig::default();

        let err = set_value(&mut config, "engine.timeout_secs", "fast").unwrap_err();
        assert!(err.to_string().contains("whole number"));
        assert_eq!(config.engine.timeout_secs, 30);
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let mut config = BonexConfig::default();

        let err = set_value(&mut config, "engine.temperature", "0.7").unwrap_err();
        assert!(err.to_string().contains("Valid keys"));
    }
}
