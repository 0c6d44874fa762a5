//! CLI front-end for the rexcap match extractor.
//!
//! Two invocation forms are accepted:
//!
//! - `rexcap <pattern> <text> <flags>` prints the structured match list as
//!   a single JSON object on stdout.
//! - `rexcap getFlag <flagName> <_> <_>` prints the numeric value of a
//!   symbolic flag name; the two trailing arguments are ignored.
//!
//! Diagnostics go to stderr only. An unknown flag name and a malformed
//! pattern are tolerated: the process still exits 0 with the sentinel `0`
//! or an empty match list respectively.

use std::process::exit;

use clap::{command, value_parser, Arg, Command};
use log::error;
use rexcap::{extract_matches, flags};

fn build_command() -> Command {
    command!()
        .override_usage(
            "rexcap <pattern> <text> <flags>\n       rexcap getFlag <flagName> <_> <_>",
        )
        .arg(
            Arg::new("args")
                .value_parser(value_parser!(String))
                .num_args(0..)
                .allow_hyphen_values(true)
                .value_name("ARGS")
                .help("Either <pattern> <text> <flags>, or getFlag <flagName> <_> <_>"),
        )
}

fn main() {
    // Always log warnings and errors to stderr, RUST_LOG can raise the
    // verbosity.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    handle_help_and_version();

    let mut matches = build_command().get_matches();
    let args: Vec<String> = matches
        .remove_many::<String>("args")
        .map(Iterator::collect)
        .unwrap_or_default();

    match args.as_slice() {
        [subcommand, flag_name, _, _] if subcommand == "getFlag" => {
            println!("{}", resolve_flag_or_zero(flag_name));
        }
        [pattern, text, flags_arg] => {
            let Ok(mask) = flags_arg.parse::<u32>() else {
                eprintln!("Invalid flags value: {flags_arg}");
                exit(1);
            };
            print_matches(pattern, text, mask);
        }
        _ => {
            eprintln!("Usage: rexcap <pattern> <text> <flags>");
            eprintln!("       rexcap getFlag <flagName> <_> <_>");
            exit(1);
        }
    }
}

/// Print help or version when it is the only argument, then exit.
///
/// Patterns and texts may legitimately start with a hyphen, so the
/// positional list accepts hyphen-leading tokens and would otherwise
/// swallow these two flags.
fn handle_help_and_version() {
    let mut argv = std::env::args_os().skip(1);
    let (first, rest) = (argv.next(), argv.next());
    if rest.is_some() {
        return;
    }

    match first.as_deref().and_then(std::ffi::OsStr::to_str) {
        Some("-h" | "--help") => {
            if let Err(err) = build_command().print_help() {
                eprintln!("cannot print help: {err}");
            }
            exit(0);
        }
        Some("-V" | "--version") => {
            print!("{}", build_command().render_version());
            exit(0);
        }
        _ => (),
    }
}

/// Resolve a flag name, degrading an unknown name to the 0 sentinel.
fn resolve_flag_or_zero(name: &str) -> u32 {
    match flags::resolve_flag(name) {
        Some(value) => value,
        None => {
            error!("Invalid flag name: {name}");
            0
        }
    }
}

fn print_matches(pattern: &str, text: &str, mask: u32) {
    let result = extract_matches(pattern, text, mask);

    match serde_json::to_string(&result) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("cannot serialize matches: {err}");
            exit(1);
        }
    }
}
