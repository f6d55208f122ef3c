//! restyle - print C-like source with syntax highlighting

use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use restyle::{dump, logging, render, Config, RenderOptions, RestyleError, Result, Session};

fn main() {
    logging::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Command line settings; `None` leaves the config file's choice in place
#[derive(Debug, Default)]
struct Args {
    line_numbers: Option<bool>,
    max_width: Option<usize>,
    no_color: bool,
    dump: bool,
    config: Option<PathBuf>,
    file: Option<PathBuf>,
}

enum Action {
    Run(Args),
    Help,
    Version,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Action> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Action::Help),
            "--version" | "-V" => return Ok(Action::Version),
            "--line-numbers" | "-n" => parsed.line_numbers = Some(true),
            "--no-color" => parsed.no_color = true,
            "--dump" => parsed.dump = true,
            "--width" | "-w" => {
                let value = args
                    .next()
                    .ok_or_else(|| RestyleError::Usage(format!("{arg} needs a value")))?;
                let width: usize = value
                    .parse()
                    .map_err(|_| RestyleError::Usage(format!("invalid width: {value}")))?;
                parsed.max_width = Some(width);
            }
            "--config" | "-c" => {
                let value = args
                    .next()
                    .ok_or_else(|| RestyleError::Usage(format!("{arg} needs a value")))?;
                parsed.config = Some(PathBuf::from(value));
            }
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(RestyleError::Usage(format!("unknown option: {arg}")));
            }
            _ if parsed.file.is_some() => {
                return Err(RestyleError::Usage(format!("unexpected argument: {arg}")));
            }
            _ => parsed.file = Some(PathBuf::from(arg)),
        }
    }
    Ok(Action::Run(parsed))
}

fn run() -> Result<()> {
    let args = match parse_args(env::args().skip(1))? {
        Action::Help => {
            print_usage();
            return Ok(());
        }
        Action::Version => {
            print_version();
            return Ok(());
        }
        Action::Run(args) => args,
    };

    let config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load()?,
    };

    // Read standard input when no file (or `-`) is given
    let session = match &args.file {
        Some(path) if path.as_os_str() != "-" => Session::open(path)?,
        _ => {
            let mut text = Vec::new();
            io::Read::read_to_end(&mut io::stdin(), &mut text)?;
            Session::with_text(text)?
        }
    };

    let mut out = io::stdout().lock();
    if args.dump {
        return dump(&mut out, session.text(), session.tags());
    }

    let options = RenderOptions {
        line_numbers: args.line_numbers.unwrap_or(config.show_line_numbers),
        max_width: match args.max_width {
            Some(0) => None,
            Some(width) => Some(width),
            None => config.max_width,
        },
        color: config.color && !args.no_color,
    };
    render(&mut out, session.text(), session.tags(), &config.styles, &options)
}

fn print_usage() {
    println!("restyle {} - incremental syntax highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: restyle [OPTIONS] [FILE]");
    println!();
    println!("Reads standard input when FILE is missing or `-`.");
    println!();
    println!("Options:");
    println!("  -n, --line-numbers  Prefix lines with their numbers");
    println!("  -w, --width N       Truncate lines to N columns (0 = unlimited)");
    println!("      --no-color      Print without colors or attributes");
    println!("      --dump          Print one style code per byte instead of text");
    println!("  -c, --config PATH   Read settings from PATH instead of ~/.restyle.toml");
    println!("  -h, --help          Show this help message");
    println!("  -V, --version       Show version information");
    println!();
    println!("Set RUST_LOG=debug for diagnostics on stderr.");
}

fn print_version() {
    println!("restyle {}", env!("CARGO_PKG_VERSION"));
}
