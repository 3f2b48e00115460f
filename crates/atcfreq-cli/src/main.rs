// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod commands;
mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use atcfreq_app::{AppCommand, AppEvent, AppState, TabKind};
use atcfreq_lookup::{Catalog, Client, Service};
use config::{Backend, Config};
use logging::LogTarget;
use runtime::LookupRuntime;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `atcfreq --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let log_target = if options.command.is_some() || options.check_only {
        LogTarget::Stderr
    } else {
        LogTarget::File(config.log_path()?)
    };
    logging::init(config.log_level(), &log_target)?;

    let service = build_service(&config, options.demo).with_context(|| {
        format!(
            "invalid [lookup] config in {}; fix backend/base_url/timeout values",
            options.config_path.display()
        )
    })?;
    if options.check_only {
        config.log_path()?;
        if let Some(tab) = config.default_tab() {
            TabKind::from_id(tab).with_context(|| {
                format!("invalid ui.default_tab in {}", options.config_path.display())
            })?;
        }
        return Ok(());
    }

    match options.command {
        Some(Command::Freq(icao)) => {
            commands::print_frequencies(&service, &icao, &mut io::stdout().lock())
        }
        Some(Command::Weather(waypoints)) => {
            commands::print_weather(&waypoints, &mut io::stdout().lock())
        }
        None => {
            info!(config = %options.config_path.display(), demo = options.demo, "starting atcfreq");
            let mut state = initial_state(&config, &options.config_path);
            let mut runtime = LookupRuntime::new(service);
            atcfreq_tui::run_app(&mut state, &mut runtime)
        }
    }
}

fn build_service(config: &Config, demo: bool) -> Result<Service> {
    let backend = if demo { Backend::Demo } else { config.backend()? };
    match backend {
        Backend::Demo => {
            let catalog = Catalog::demo();
            info!(airports = ?catalog.airports().collect::<Vec<_>>(), "using demo catalog");
            Ok(Service::new(catalog))
        }
        Backend::Http => {
            let client = Client::new(config.base_url(), config.timeout()?)?;
            info!(base_url = client.base_url(), timeout = ?client.timeout(), "using HTTP lookup");
            Ok(Service::new(client))
        }
    }
}

fn initial_state(config: &Config, config_path: &Path) -> AppState {
    let mut state = AppState::default();
    let Some(tab) = config.default_tab() else {
        return state;
    };

    for event in state.dispatch(AppCommand::SelectTabId(tab.to_owned())) {
        if let AppEvent::UnknownTab(id) = event {
            warn!(
                tab = %id,
                config = %config_path.display(),
                "ui.default_tab names no known tab; expected frequencies or weather"
            );
        }
    }
    state
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Freq(String),
    Weather(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
    command: Option<Command>,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
        command: None,
    };
    let mut positional = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            flag if flag.starts_with('-') => {
                bail!("unknown argument {flag:?}; run with --help to see supported options");
            }
            value => positional.push(value.to_owned()),
        }
    }

    options.command = parse_command(&positional)?;
    Ok(options)
}

fn parse_command(positional: &[String]) -> Result<Option<Command>> {
    let Some((name, rest)) = positional.split_first() else {
        return Ok(None);
    };

    match name.as_str() {
        "freq" => match rest {
            [icao] => Ok(Some(Command::Freq(icao.clone()))),
            _ => bail!("freq requires exactly one ICAO code argument, for example `atcfreq freq EDDB`"),
        },
        "weather" => match rest {
            [waypoints] => Ok(Some(Command::Weather(waypoints.clone()))),
            _ => bail!(
                "weather requires exactly one argument (comma-separated waypoints), for example `atcfreq weather EDDB,UUMI`"
            ),
        },
        unknown => {
            bail!("unknown argument {unknown:?}; run with --help to see supported options")
        }
    }
}

fn print_help() {
    println!("atcfreq: airport frequencies and weather");
    println!("usage: atcfreq [options] [freq <ICAO> | weather <wp1,wp2,...>]");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --demo                   Use the built-in demo catalog (EDDB, UUMI)");
    println!("  --check                  Validate config + lookup backend settings");
    println!("  --help                   Show this help");
    println!("  freq <ICAO>              Print all frequencies for an airport");
    println!("  weather <wp1,wp2,...>    Print weather for comma-separated waypoints");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, Command, initial_state, parse_cli_args};
    use crate::config::Config;
    use anyhow::Result;
    use atcfreq_app::TabKind;
    use std::path::{Path, PathBuf};

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/atcfreq-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                print_config_path: false,
                demo: false,
                print_example: false,
                check_only: false,
                show_help: false,
                command: None,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_config_value() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        for args in [vec!["--wat"], vec!["metar", "EDDB"]] {
            let error = parse_cli_args(args, default_options_path())
                .expect_err("unknown arg should fail");
            let message = error.to_string();
            assert!(message.contains("unknown argument"));
            assert!(message.contains("--help"));
        }
    }

    #[test]
    fn parse_cli_args_sets_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check", "--demo"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(options.demo);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_reads_subcommands() -> Result<()> {
        let options = parse_cli_args(vec!["--demo", "freq", "eddb"], default_options_path())?;
        assert_eq!(options.command, Some(Command::Freq("eddb".to_owned())));
        assert!(options.demo);

        let options = parse_cli_args(vec!["weather", "EDDB,UUMI"], default_options_path())?;
        assert_eq!(
            options.command,
            Some(Command::Weather("EDDB,UUMI".to_owned()))
        );
        Ok(())
    }

    #[test]
    fn subcommands_require_exactly_one_argument() {
        let error = parse_cli_args(vec!["freq"], default_options_path())
            .expect_err("missing ICAO should fail");
        assert!(error.to_string().contains("exactly one ICAO code"));

        let error = parse_cli_args(vec!["weather", "EDDB", "UUMI"], default_options_path())
            .expect_err("two arguments should fail");
        assert!(error.to_string().contains("exactly one argument"));
    }

    #[test]
    fn initial_state_honors_default_tab() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");

        std::fs::write(&path, "version = 1\n[ui]\ndefault_tab = \"weather\"\n")?;
        let state = initial_state(&Config::load(&path)?, &path);
        assert_eq!(state.active_tab, TabKind::Weather);

        std::fs::write(&path, "version = 1\n[ui]\ndefault_tab = \"radar\"\n")?;
        let state = initial_state(&Config::load(&path)?, &path);
        assert_eq!(state.active_tab, TabKind::Frequencies);

        let state = initial_state(&Config::default(), Path::new("unused.toml"));
        assert_eq!(state.active_tab, TabKind::Frequencies);
        Ok(())
    }
}
