// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub const APP_NAME: &str = "atcfreq";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_BASE_URL: &str = "http://localhost:8790/api";
const DEFAULT_TIMEOUT: &str = "10s";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Http,
    Demo,
}

impl Backend {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "http" => Some(Self::Http),
            "demo" => Some(Self::Demo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub lookup: Lookup,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            lookup: Lookup::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Lookup {
    pub backend: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<String>,
}

impl Default for Lookup {
    fn default() -> Self {
        Self {
            backend: Some("http".to_owned()),
            base_url: Some(DEFAULT_BASE_URL.to_owned()),
            timeout: Some(DEFAULT_TIMEOUT.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub default_tab: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub path: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            path: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("ATCFREQ_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set ATCFREQ_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [lookup], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(backend) = &self.lookup.backend
            && Backend::parse(backend).is_none()
        {
            bail!(
                "lookup.backend in {} must be \"http\" or \"demo\", got {:?}",
                path.display(),
                backend
            );
        }

        if let Some(base_url) = &self.lookup.base_url
            && base_url.trim().is_empty()
        {
            bail!(
                "lookup.base_url in {} must not be empty; remove it to use {}",
                path.display(),
                DEFAULT_BASE_URL
            );
        }

        if let Some(timeout) = &self.lookup.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "lookup.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        if let Some(level) = &self.log.level {
            EnvFilter::try_new(level).with_context(|| {
                format!(
                    "log.level in {} is not a valid filter {:?}; use a level such as \"info\" or \"debug\"",
                    path.display(),
                    level
                )
            })?;
        }

        Ok(())
    }

    pub fn backend(&self) -> Result<Backend> {
        let raw = self.lookup.backend.as_deref().unwrap_or("http");
        Backend::parse(raw).ok_or_else(|| anyhow!("unknown lookup backend {raw:?}"))
    }

    pub fn base_url(&self) -> &str {
        self.lookup
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn timeout(&self) -> Result<Duration> {
        parse_duration(self.lookup.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    /// Raw tab id from `[ui].default_tab`; unknown ids are resolved by the caller.
    pub fn default_tab(&self) -> Option<&str> {
        self.ui
            .default_tab
            .as_deref()
            .map(str::trim)
            .filter(|tab| !tab.is_empty())
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.path {
            return Ok(PathBuf::from(path));
        }
        let data_root = dirs::data_local_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].path in the config file")
        })?;
        Ok(data_root.join(APP_NAME).join(format!("{APP_NAME}.log")))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# atcfreq config\n# Place this file at: {}\n\nversion = 1\n\n[lookup]\n# \"http\" queries a facility-data service; \"demo\" uses built-in EDDB/UUMI data\nbackend = \"http\"\nbase_url = \"{}\"\ntimeout = \"{}\"\n\n[ui]\n# One of: frequencies, weather\ndefault_tab = \"frequencies\"\n\n[log]\n# Overridden by the ATCFREQ_LOG environment variable\nlevel = \"{}\"\n# Optional. Default is the platform data dir (for example ~/.local/share/atcfreq/atcfreq.log)\n# path = \"/absolute/path/to/atcfreq.log\"\n",
            path.display(),
            DEFAULT_BASE_URL,
            DEFAULT_TIMEOUT,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins.saturating_mul(60)));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 10s)")
}
