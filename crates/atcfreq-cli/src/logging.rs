// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, prelude::*};

pub const LOG_ENV: &str = "ATCFREQ_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// The TUI owns the terminal, so its logs go to a file.
    File(PathBuf),
}

/// `ATCFREQ_LOG` wins over the configured level.
fn filter(configured_level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(configured_level))
        .with_context(|| format!("invalid log filter {configured_level:?}"))
}

pub fn init(configured_level: &str, target: &LogTarget) -> Result<()> {
    let filter_layer = filter(configured_level)?;

    match target {
        LogTarget::Stderr => {
            let format_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(io::stderr);
            tracing_subscriber::registry()
                .with(filter_layer)
                .with(format_layer)
                .try_init()
                .context("install log subscriber")?;
        }
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            let format_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(filter_layer)
                .with(format_layer)
                .try_init()
                .context("install log subscriber")?;
        }
    }
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| {
            format!(
                "open log file {}; set [log].path to a writable location",
                path.display()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::open_log_file;
    use anyhow::Result;
    use std::io::Write;

    #[test]
    fn log_file_parent_directories_are_created() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("nested").join("atcfreq.log");

        let mut file = open_log_file(&path)?;
        writeln!(file, "first")?;
        drop(file);
        let mut file = open_log_file(&path)?;
        writeln!(file, "second")?;

        assert_eq!(std::fs::read_to_string(&path)?, "first\nsecond\n");
        Ok(())
    }

    #[test]
    fn unwritable_log_path_names_the_config_key() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let error = open_log_file(temp.path()).expect_err("a directory is not a log file");
        assert!(error.to_string().contains("[log].path"));
        Ok(())
    }
}
