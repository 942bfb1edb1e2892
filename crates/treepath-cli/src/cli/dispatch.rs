//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs are populated from clap, ignoring hidden flags
//! - `Into<*Args>` impls bridge dispatch to the command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use treepath::{DEFAULT_RECURSION_FUEL, Verbosity};

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::exec::ExecArgs;
use crate::commands::tokens::TokensArgs;

pub struct ExecParams {
    pub path: String,
    pub document_path: Option<PathBuf>,
    pub document_text: Option<String>,
    pub compact: bool,
    pub trace: bool,
    pub verbose: u8,
    pub recursion_fuel: u32,
    pub color: ColorChoice,
}

impl ExecParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            path: parse_path(m),
            document_path: m.get_one::<PathBuf>("document_path").cloned(),
            document_text: m.get_one::<String>("document_text").cloned(),
            compact: m.get_flag("compact"),
            trace: m.get_flag("trace"),
            verbose: m.get_count("verbose"),
            recursion_fuel: parse_recursion_fuel(m),
            color: parse_color(m),
        }
    }
}

impl From<ExecParams> for ExecArgs {
    fn from(p: ExecParams) -> Self {
        // Pretty by default when stdout is a TTY, unless --compact is passed
        let pretty = !p.compact && std::io::IsTerminal::is_terminal(&std::io::stdout());

        // -v without --trace still asks for a trace
        let trace = match (p.trace, p.verbose) {
            (false, 0) => None,
            (_, 0) => Some(Verbosity::Default),
            _ => Some(Verbosity::Verbose),
        };

        Self {
            path: p.path,
            document_path: p.document_path,
            document_text: p.document_text,
            pretty,
            trace,
            recursion_fuel: fuel_limit(p.recursion_fuel),
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub path: String,
    pub recursion_fuel: u32,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            path: parse_path(m),
            recursion_fuel: parse_recursion_fuel(m),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            path: p.path,
            recursion_fuel: fuel_limit(p.recursion_fuel),
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub path: String,
    pub recursion_fuel: u32,
    pub color: ColorChoice,
    // document and exec flags are parsed but not extracted (unified flags)
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            path: parse_path(m),
            recursion_fuel: parse_recursion_fuel(m),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            path: p.path,
            recursion_fuel: fuel_limit(p.recursion_fuel),
            color: p.color.should_colorize(),
        }
    }
}

pub struct TokensParams {
    pub path: String,
}

impl TokensParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            path: parse_path(m),
        }
    }
}

impl From<TokensParams> for TokensArgs {
    fn from(p: TokensParams) -> Self {
        Self { path: p.path }
    }
}

fn parse_path(m: &ArgMatches) -> String {
    m.get_one::<String>("path").cloned().unwrap_or_default()
}

fn parse_recursion_fuel(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("recursion_fuel")
        .copied()
        .unwrap_or(DEFAULT_RECURSION_FUEL)
}

/// `0` on the command line means no limit.
fn fuel_limit(fuel: u32) -> Option<u32> {
    (fuel != 0).then_some(fuel)
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
