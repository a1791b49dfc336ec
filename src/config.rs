use crate::error::StoryError;
use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_PAD: usize = 30;

#[derive(Parser, Debug, Default)]
#[clap(name = "storylog", version, about)]
pub struct Cli {
    /// Path to configuration file
    #[clap(long, default_value = "./storylog.toml")]
    pub config: PathBuf,

    /// Override header pad width
    #[clap(long)]
    pub pad: Option<usize>,

    /// Emit the flattened key/value mapping as JSON instead of the report
    #[clap(long)]
    pub flat: bool,

    /// Keep entries after a dump
    #[clap(long)]
    pub no_reset: bool,

    /// Render dumps without writing them to stdout
    #[clap(long)]
    pub quiet: bool,

    /// Enable debug process logs
    #[clap(long)]
    pub verbose: bool,
}

/// Buffer behaviour. The defaults give the report buffer; `story()` gives
/// the flattened, non-draining one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    pub pad: usize,
    pub reset_on_dump: bool,
    pub sentinels: bool,
    pub print: bool,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            pad: DEFAULT_PAD,
            reset_on_dump: true,
            sentinels: true,
            print: true,
        }
    }
}

impl BufferConfig {
    pub fn story() -> Self {
        Self {
            reset_on_dump: false,
            sentinels: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), StoryError> {
        if self.pad == 0 {
            return Err(StoryError::ConfigError(
                "pad must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    buffer: BufferConfig,
}

pub fn parse_config(content: &str) -> Result<BufferConfig> {
    let file: ConfigFile = toml::from_str(content).context("Failed to parse config file")?;
    Ok(file.buffer)
}

pub fn load_config(cli: &Cli) -> Result<BufferConfig> {
    let mut config = if cli.config.exists() {
        let config_content = fs::read_to_string(&cli.config)
            .with_context(|| format!("Failed to read config file: {:?}", cli.config))?;
        parse_config(&config_content)?
    } else {
        log::debug!("No config file at {:?}, using defaults", cli.config);
        BufferConfig::default()
    };

    // Apply CLI overrides
    if let Some(pad) = cli.pad {
        config.pad = pad;
    }

    if cli.no_reset {
        config.reset_on_dump = false;
    }

    if cli.quiet {
        config.print = false;
    }

    config.validate()?;

    Ok(config)
}
