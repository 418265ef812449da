use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV: &str = "NEBULA_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `table.json` and `users.json`.
    pub data_dir: PathBuf,
    pub bot_policy: String,
    /// Fixed shuffle seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 4000,
            data_dir: PathBuf::from("data"),
            bot_policy: nebula_ai::DEFAULT_POLICY.into(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfigSources {
    pub host: ValueSource,
    pub port: ValueSource,
    pub data_dir: ValueSource,
    pub bot_policy: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            host: ValueSource::Default,
            port: ValueSource::Default,
            data_dir: ValueSource::Default,
            bot_policy: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: ServerConfig,
    pub sources: ConfigSources,
}

/// Values given on the command line; they win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub data_dir: Option<PathBuf>,
    pub bot_policy: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    data_dir: Option<PathBuf>,
    #[serde(default)]
    bot_policy: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
}

impl ServerConfig {
    pub fn for_tests(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            port: 0,
            data_dir: data_dir.into(),
            seed: Some(42),
            ..Self::default()
        }
    }

    /// Resolves configuration from the process environment.
    ///
    /// `config_file` takes precedence over a file named by `NEBULA_CONFIG`.
    pub fn load(config_file: Option<&Path>) -> Result<ConfigResolved, ConfigError> {
        Self::from_lookup(config_file, |key| std::env::var(key).ok())
    }

    /// Resolution with an injectable environment, lowest to highest: defaults,
    /// TOML file, environment.
    pub fn from_lookup<F>(config_file: Option<&Path>, lookup: F) -> Result<ConfigResolved, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = ServerConfig::default();
        let mut sources = ConfigSources::default();
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let file_path = config_file
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_ENV).map(PathBuf::from));
        if let Some(path) = file_path {
            let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            let file: FileConfig = toml::from_str(&text)?;
            if let Some(v) = file.host {
                cfg.host = v;
                sources.host = ValueSource::File;
            }
            if let Some(v) = file.port {
                cfg.port = v;
                sources.port = ValueSource::File;
            }
            if let Some(v) = file.data_dir {
                cfg.data_dir = v;
                sources.data_dir = ValueSource::File;
            }
            if let Some(v) = file.bot_policy {
                cfg.bot_policy = v;
                sources.bot_policy = ValueSource::File;
            }
            if let Some(v) = file.seed {
                cfg.seed = Some(v);
                sources.seed = ValueSource::File;
            }
        }

        if let Some(host) = env("NEBULA_HOST") {
            cfg.host = host;
            sources.host = ValueSource::Env;
        }
        if let Some(port) = env("PORT") {
            cfg.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: port,
            })?;
            sources.port = ValueSource::Env;
        }
        if let Some(dir) = env("NEBULA_DATA_DIR") {
            cfg.data_dir = PathBuf::from(dir);
            sources.data_dir = ValueSource::Env;
        }
        if let Some(policy) = env("NEBULA_BOT_POLICY") {
            cfg.bot_policy = policy;
            sources.bot_policy = ValueSource::Env;
        }
        if let Some(seed) = env("NEBULA_SEED") {
            cfg.seed = Some(seed.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "NEBULA_SEED",
                value: seed,
            })?);
            sources.seed = ValueSource::Env;
        }

        cfg.validate()?;
        Ok(ConfigResolved {
            config: cfg,
            sources,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".into()));
        }
        if nebula_ai::create_policy(&self.bot_policy).is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown bot policy `{}` (available: {})",
                self.bot_policy,
                nebula_ai::available_policies().join(", ")
            )));
        }
        Ok(())
    }
}

impl ConfigResolved {
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(v) = overrides.host {
            self.config.host = v;
            self.sources.host = ValueSource::Cli;
        }
        if let Some(v) = overrides.port {
            self.config.port = v;
            self.sources.port = ValueSource::Cli;
        }
        if let Some(v) = overrides.data_dir {
            self.config.data_dir = v;
            self.sources.data_dir = ValueSource::Cli;
        }
        if let Some(v) = overrides.bot_policy {
            self.config.bot_policy = v;
            self.sources.bot_policy = ValueSource::Cli;
        }
        if let Some(v) = overrides.seed {
            self.config.seed = Some(v);
            self.sources.seed = ValueSource::Cli;
        }
        self.config.validate()?;
        Ok(self)
    }
}
