use crate::cli::Cli;
use crate::record::TimeZoneConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory read when none is configured
pub const DEFAULT_INPUT_DIR: &str = "bibxml3";

/// Trait for abstracting environment variable access
pub trait EnvProvider {
    fn get(&self, key: &str) -> Option<String>;
}

/// System environment variable provider for production use
pub struct SystemEnvProvider;

impl EnvProvider for SystemEnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Environment variable error: {0}")]
    Environment(String),

    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub dates: DateConfig,
    pub output: OutputConfig,
}

/// Where references are read from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Directory of bibxml reference files
    pub directory: PathBuf,
}

/// Timestamp synthesis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct DateConfig {
    /// Time zone used to turn publication dates into epoch seconds
    pub timezone: TimeZoneConfig,
    /// Seed for the time-of-day generator; random when unset
    pub seed: Option<u64>,
}

/// Diagnostics on stderr (stdout always carries only log lines)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Print a run summary after the last file
    pub summary: bool,
    /// Verbose diagnostics
    pub verbose: bool,
    /// Errors only
    pub quiet: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_INPUT_DIR),
        }
    }
}

/// Configuration manager for loading and merging configurations
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration with precedence: file -> environment -> CLI
    pub fn load_config(cli: &Cli) -> Result<Config> {
        Self::load_config_with(&SystemEnvProvider, cli)
    }

    /// Load configuration with a custom environment provider
    pub fn load_config_with(env: &impl EnvProvider, cli: &Cli) -> Result<Config> {
        let mut config = Config::default();

        if let Some(config_path) = &cli.config {
            config = Self::load_from_file(config_path)?;
        } else if let Some(found_config) = Self::find_config_file()? {
            config = found_config;
        }

        config = Self::apply_environment_overrides_with(env, config)?;
        config = Self::merge_with_cli(config, cli);

        Self::validate_config(&config)?;

        Ok(config)
    }

    /// Load configuration from a file (TOML or JSON)
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => {
                // Try to parse as TOML first, then JSON
                if let Ok(config) = toml::from_str::<Config>(&content) {
                    Ok(config)
                } else {
                    Ok(serde_json::from_str(&content)?)
                }
            }
        }
    }

    /// Find configuration file in standard locations
    pub fn find_config_file() -> Result<Option<Config>> {
        let config_names = ["id-log.toml", "id-log.json", ".id-log.toml", ".id-log.json"];

        for name in &config_names {
            let path = PathBuf::from(name);
            if path.exists() {
                return Ok(Some(Self::load_from_file(&path)?));
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let app_config_dir = config_dir.join("id-log");
            for name in &config_names {
                let path = app_config_dir.join(name);
                if path.exists() {
                    return Ok(Some(Self::load_from_file(&path)?));
                }
            }
        }

        Ok(None)
    }

    /// Apply environment variable overrides with a custom environment provider
    pub fn apply_environment_overrides_with(
        env: &impl EnvProvider,
        mut config: Config,
    ) -> Result<Config> {
        if let Some(dir) = env.get("ID_LOG_DIR") {
            config.input.directory = PathBuf::from(dir);
        }

        if let Some(timezone) = env.get("ID_LOG_TIMEZONE") {
            config.dates.timezone = parse_timezone(&timezone).ok_or_else(|| {
                ConfigError::Environment(format!("Invalid ID_LOG_TIMEZONE value: {}", timezone))
            })?;
        }

        if let Some(seed) = env.get("ID_LOG_SEED") {
            config.dates.seed = Some(seed.parse().map_err(|_| {
                ConfigError::Environment(format!("Invalid ID_LOG_SEED value: {}", seed))
            })?);
        }

        if let Some(summary) = env.get("ID_LOG_SUMMARY") {
            config.output.summary = summary.parse().map_err(|_| {
                ConfigError::Environment(format!("Invalid ID_LOG_SUMMARY value: {}", summary))
            })?;
        }

        if let Some(verbose) = env.get("ID_LOG_VERBOSE") {
            config.output.verbose = verbose.parse().map_err(|_| {
                ConfigError::Environment(format!("Invalid ID_LOG_VERBOSE value: {}", verbose))
            })?;
        }

        if let Some(quiet) = env.get("ID_LOG_QUIET") {
            config.output.quiet = quiet.parse().map_err(|_| {
                ConfigError::Environment(format!("Invalid ID_LOG_QUIET value: {}", quiet))
            })?;
        }

        Ok(config)
    }

    /// Merge CLI arguments with configuration; only options given on the
    /// command line take precedence
    pub fn merge_with_cli(mut config: Config, cli: &Cli) -> Config {
        if let Some(dir) = &cli.dir {
            config.input.directory = dir.clone();
        }
        if cli.utc {
            config.dates.timezone = TimeZoneConfig::Utc;
        }
        if cli.seed.is_some() {
            config.dates.seed = cli.seed;
        }
        if cli.summary {
            config.output.summary = true;
        }
        if cli.verbose {
            config.output.verbose = true;
            config.output.quiet = false;
        }
        if cli.quiet {
            config.output.quiet = true;
            config.output.verbose = false;
        }

        config
    }

    /// Validate configuration values
    pub fn validate_config(config: &Config) -> Result<()> {
        if config.input.directory.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "Input directory must not be empty".to_string(),
            ));
        }

        if config.output.verbose && config.output.quiet {
            return Err(ConfigError::Validation(
                "Cannot enable both verbose and quiet modes".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_timezone(value: &str) -> Option<TimeZoneConfig> {
    match value.to_lowercase().as_str() {
        "local" => Some(TimeZoneConfig::Local),
        "utc" => Some(TimeZoneConfig::Utc),
        _ => None,
    }
}
