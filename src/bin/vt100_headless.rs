//! Headless Terminal Runner
//!
//! Feeds a byte stream from stdin or a file through the terminal and
//! prints the resulting screen state.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use vt100_term::app::Config;
use vt100_term::core::Snapshot;
use vt100_term::Terminal;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut cols: Option<usize> = None;
    let mut rows: Option<usize> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut input_file: Option<String> = None;
    let mut output_format = OutputFormat::Text;
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            flag @ ("-c" | "--cols" | "-r" | "--rows") => {
                i += 1;
                let value = match parse_count(flag, args.get(i)) {
                    Ok(value) => value,
                    Err(message) => {
                        eprintln!("Error: {}", message);
                        return ExitCode::FAILURE;
                    },
                };
                if matches!(flag, "-c" | "--cols") {
                    cols = Some(value);
                } else {
                    rows = Some(value);
                }
            },
            "--config" => {
                i += 1;
                config_path = args.get(i).map(PathBuf::from);
            },
            "-j" | "--json" => {
                output_format = OutputFormat::Json;
            },
            "-t" | "--text" => {
                output_format = OutputFormat::Text;
            },
            "-h" | "--help" => {
                show_help = true;
            },
            _ => {
                // Treat as input file if no flag
                if input_file.is_none() && !args[i].starts_with('-') {
                    input_file = Some(args[i].clone());
                }
            },
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let mut config = match &config_path {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            },
        },
        None => Config::load_or_default(),
    };
    if let Some(cols) = cols {
        config.width = cols;
    }
    if let Some(rows) = rows {
        config.height = rows;
    }

    let mut terminal = match Terminal::from_config(&config) {
        Ok(terminal) => terminal,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        },
    };

    // Read input
    let input_data = match &input_file {
        Some(path) => match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => {
            let mut data = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut data) {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::FAILURE;
            }
            data
        },
    };

    terminal.feed_bytes(&input_data);
    tracing::debug!(bytes = input_data.len(), "input processed");

    let snapshot = Snapshot::from_terminal(&terminal);
    match output_format {
        OutputFormat::Text => {
            print!("{}", snapshot.to_text());
        },
        OutputFormat::Json => match snapshot.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing snapshot: {}", e);
                return ExitCode::FAILURE;
            },
        },
    }

    ExitCode::SUCCESS
}

/// Parse the value following a geometry flag
fn parse_count(flag: &str, value: Option<&String>) -> Result<usize, String> {
    let value = value.ok_or_else(|| format!("{} requires a value", flag))?;
    value
        .parse()
        .map_err(|_| format!("invalid value '{}' for {}", value, flag))
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn print_help() {
    println!("vt100-term Headless Runner");
    println!();
    println!("Usage: vt100-headless [OPTIONS] [INPUT_FILE]");
    println!();
    println!("Options:");
    println!("  -c, --cols <N>       Set terminal width (default: 80)");
    println!("  -r, --rows <N>       Set terminal height (default: 40)");
    println!("      --config <PATH>  Load settings from a JSON config file");
    println!("  -j, --json           Output snapshot as JSON");
    println!("  -t, --text           Output snapshot as text (default)");
    println!("  -h, --help           Show this help message");
    println!();
    println!("If no input file is specified, reads from stdin.");
    println!();
    println!("Examples:");
    println!("  printf 'Hello\\033[31mWorld\\033[0m' | vt100-headless");
    println!("  vt100-headless -c 40 -r 10 input.txt");
    println!("  vt100-headless --json < test.bin > snapshot.json");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("-c", Some(&"40".to_string())), Ok(40));
        assert_eq!(
            parse_count("-c", Some(&"abc".to_string())),
            Err("invalid value 'abc' for -c".to_string())
        );
        assert_eq!(
            parse_count("--rows", None),
            Err("--rows requires a value".to_string())
        );
    }
}
