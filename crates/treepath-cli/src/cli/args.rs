//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands,
//! visible or hidden (via `.hide(true)`).

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Path expression (positional, required).
pub fn path_arg() -> Arg {
    Arg::new("path")
        .value_name("PATH")
        .required(true)
        .help("Path expression, e.g. '$.store.book[?(@.price < 10)]'")
}

/// Document file (positional). `-` reads stdin.
pub fn document_path_arg() -> Arg {
    Arg::new("document_path")
        .value_name("DOCUMENT")
        .value_parser(value_parser!(PathBuf))
        .help("JSON document file (stdin if omitted or '-')")
}

/// Inline document text (-d/--document).
pub fn document_text_arg() -> Arg {
    Arg::new("document_text")
        .short('d')
        .long("document")
        .value_name("TEXT")
        .conflicts_with("document_path")
        .help("Inline JSON document")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty when stdout is a TTY)")
}

/// Trace evaluation to stderr (--trace).
pub fn trace_arg() -> Arg {
    Arg::new("trace")
        .long("trace")
        .action(ArgAction::SetTrue)
        .help("Print a stage-by-stage evaluation trace to stderr")
}

/// Verbosity level (-v).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v also traces filter sub-paths)")
}

/// Nesting limit for filters and groups (--recursion-fuel).
pub fn recursion_fuel_arg() -> Arg {
    Arg::new("recursion_fuel")
        .long("recursion-fuel")
        .value_name("N")
        .default_value("128")
        .value_parser(value_parser!(u32))
        .help("Maximum nesting of filters and parenthesised groups (0 = unlimited)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}
