//! Agenda layout CLI.
//!
//! # Responsibility
//! - Read a JSON activity snapshot from a file or stdin.
//! - Print the per-day positioned layout as JSON for inspection.
//!
//! Usage: `agenda [--base-z N] [--log-dir DIR] [PATH|-]`

use agenda_core::{
    core_version, default_log_level, flush_logging, init_logging, ActivityRecord, LayoutOptions,
    LayoutService,
};
use log::info;
use std::io::Read;
use std::process::ExitCode;

const USAGE: &str = "usage: agenda [--base-z N] [--log-dir DIR] [PATH|-]";

#[derive(Debug, Default)]
struct CliArgs {
    base_z_index: Option<i32>,
    log_dir: Option<String>,
    input: Option<String>,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("agenda: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<String, String> {
    let cli = parse_args(args)?;
    if cli.show_version {
        return Ok(format!("agenda_core {}", core_version()));
    }
    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(default_log_level(), log_dir)?;
    }

    let raw = read_input(cli.input.as_deref())?;
    let records: Vec<ActivityRecord> =
        serde_json::from_str(&raw).map_err(|err| format!("invalid activity JSON: {err}"))?;

    let mut options = LayoutOptions::default();
    if let Some(base_z_index) = cli.base_z_index {
        options.base_z_index = base_z_index;
    }
    let days = LayoutService::new(options)
        .layout_records(&records)
        .map_err(|err| err.to_string())?;
    info!(
        "event=cli_layout module=cli status=ok records={} days={}",
        records.len(),
        days.len()
    );
    flush_logging();

    serde_json::to_string_pretty(&days).map_err(|err| format!("failed to encode layout: {err}"))
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-V" => cli.show_version = true,
            "--base-z" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("--base-z needs a value\n{USAGE}"))?;
                let parsed = value
                    .parse::<i32>()
                    .map_err(|err| format!("invalid --base-z `{value}`: {err}"))?;
                cli.base_z_index = Some(parsed);
            }
            "--log-dir" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("--log-dir needs a value\n{USAGE}"))?;
                cli.log_dir = Some(value.clone());
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown option `{flag}`\n{USAGE}"));
            }
            path => {
                if cli.input.is_some() {
                    return Err(format!("only one input path is accepted\n{USAGE}"));
                }
                cli.input = Some(path.to_string());
            }
        }
    }
    Ok(cli)
}

fn read_input(path: Option<&str>) -> Result<String, String> {
    match path {
        None | Some("-") => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .map_err(|err| format!("failed to read stdin: {err}"))?;
            Ok(raw)
        }
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read `{path}`: {err}")),
    }
}
