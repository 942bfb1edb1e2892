//! Command builders for the CLI.
//!
//! Every command accepts the flags of every other command so that switching
//! the subcommand on a shell history line just works. Flags a command ignores
//! are hidden from its `--help`.

use clap::Command;

use super::args::*;

/// Add hidden document input args (for commands that don't evaluate).
fn with_hidden_document_args(cmd: Command) -> Command {
    cmd.arg(document_path_arg().hide(true))
        .arg(document_text_arg().hide(true))
}

/// Add hidden exec output args (for commands that don't produce JSON).
fn with_hidden_exec_args(cmd: Command) -> Command {
    cmd.arg(compact_arg().hide(true))
        .arg(trace_arg().hide(true))
        .arg(verbose_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("treepath")
        .about("JSONPath-style queries with filter expressions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(exec_command())
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(tokens_command())
}

/// Evaluate a path against a JSON document.
pub fn exec_command() -> Command {
    Command::new("exec")
        .about("Evaluate a path against a JSON document and print the matches")
        .override_usage(
            "\
  treepath exec <PATH> [DOCUMENT]
  treepath exec <PATH> -d <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  treepath exec '$..author' store.json
  treepath exec '$[?(@.n > 1)]' -d '[{"n": 1}, {"n": 2}]'
  cat store.json | treepath exec '$.store.*' --compact
  treepath exec '$[?(@.a)]' doc.json --trace -v"#,
        )
        .arg(path_arg())
        .arg(document_path_arg())
        .arg(document_text_arg())
        .arg(compact_arg())
        .arg(trace_arg())
        .arg(verbose_arg())
        .arg(recursion_fuel_arg())
        .arg(color_arg())
}

/// Validate a path.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a path")
        .after_help(
            r#"EXAMPLES:
  treepath check '$.store.book[0]'
  treepath check '$.a[1:2:3:4]'         # error: too many colons"#,
        )
        .arg(path_arg())
        .arg(recursion_fuel_arg())
        .arg(color_arg());

    with_hidden_exec_args(with_hidden_document_args(cmd))
}

/// Show the compiled pipeline.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the compiled pipeline")
        .arg(path_arg())
        .arg(recursion_fuel_arg())
        .arg(color_arg());

    with_hidden_exec_args(with_hidden_document_args(cmd))
}

/// Show the lexeme stream.
pub fn tokens_command() -> Command {
    let cmd = Command::new("tokens")
        .about("Show the lexeme stream of a path")
        .arg(path_arg())
        .arg(recursion_fuel_arg().hide(true))
        .arg(color_arg().hide(true));

    with_hidden_exec_args(with_hidden_document_args(cmd))
}
