use config::{Config, ConfigError, Environment, File as ConfigFile, FileFormat};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

const CONFIG_FILE: &str = "Config.toml";
const ENV_PREFIX: &str = "MEDIASORT";

/// What to do when a file cannot be stat'ed or read while fingerprinting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashErrorPolicy {
    /// Stop the whole run.
    #[default]
    Abort,
    /// Log the file and leave it out of the run.
    Skip,
}

impl std::str::FromStr for HashErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(HashErrorPolicy::Abort),
            "skip" => Ok(HashErrorPolicy::Skip),
            other => Err(format!("unknown hash error policy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub source: PathBuf,
    pub dest: PathBuf,
    #[serde(default)]
    pub on_hash_error: HashErrorPolicy,
    #[serde(default)]
    pub dry_run: bool,
}

/// Values given on the command line. They take precedence over `Config.toml`
/// and `MEDIASORT_*` environment variables.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub source: Option<String>,
    pub dest: Option<String>,
    pub on_hash_error: Option<String>,
    pub dry_run: Option<bool>,
}

pub fn load_configuration(overrides: &Overrides) -> Result<AppConfig, ConfigError> {
    for source in settings_sources(Path::new(CONFIG_FILE), env::vars()) {
        info!("Reading settings from {}", source);
    }
    load_from(
        ConfigFile::new(CONFIG_FILE, FileFormat::Toml).required(false),
        overrides,
    )
}

/// Settings sources besides the command line that will supply values: the
/// config file if present, then each `MEDIASORT_*` variable by name.
pub fn settings_sources<I>(config_file: &Path, vars: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut sources = Vec::new();
    if config_file.is_file() {
        sources.push(config_file.display().to_string());
    }
    let prefix = format!("{}_", ENV_PREFIX);
    let mut names: Vec<String> = vars
        .into_iter()
        .map(|(name, _)| name)
        .filter(|name| name.starts_with(&prefix))
        .map(|name| format!("environment variable {}", name))
        .collect();
    names.sort();
    sources.extend(names);
    sources
}

fn load_from<S>(file: S, overrides: &Overrides) -> Result<AppConfig, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let builder = Config::builder()
        .set_default("on_hash_error", "abort")?
        .set_default("dry_run", false)?
        .add_source(file)
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .set_override_option("source", overrides.source.clone())?
        .set_override_option("dest", overrides.dest.clone())?
        .set_override_option("on_hash_error", overrides.on_hash_error.clone())?
        .set_override_option("dry_run", overrides.dry_run)?
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
