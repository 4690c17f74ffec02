//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("reql")
        .about("Inspect, dump and re-encode ReQL term trees")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(inspect_command())
        .subcommand(dump_command())
        .subcommand(encode_command())
        .subcommand(decode_command())
}

/// Read the query envelope without building any term.
pub fn inspect_command() -> Command {
    Command::new("inspect")
        .about("Show query type and global optargs")
        .after_help(
            r#"EXAMPLES:
  reql inspect query.json
  echo '[1, [24, [1, 2]], {"noreply": true}]' | reql inspect -"#,
        )
        .arg(query_path_arg())
        .arg(reql_version_arg())
}

/// Preprocess a query and print its term tree.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the term tree of a query")
        .after_help(
            r#"EXAMPLES:
  reql dump query.json
  reql dump query.json --array-limit 10 --reql-version 1.16"#,
        )
        .arg(query_path_arg())
        .arg(reql_version_arg())
        .arg(array_limit_arg())
}

/// Encode the root term of a query.
pub fn encode_command() -> Command {
    Command::new("encode")
        .about("Encode the term tree of a query for a cluster version")
        .after_help(
            r#"EXAMPLES:
  reql encode query.json --wire-version v2 -o query.bin"#,
        )
        .arg(query_path_arg())
        .arg(wire_version_arg())
        .arg(reql_version_arg())
        .arg(output_arg())
}

/// Decode an encoded term tree and print it.
pub fn decode_command() -> Command {
    Command::new("decode")
        .about("Decode an encoded term tree and show it")
        .after_help(
            r#"EXAMPLES:
  reql decode query.bin --wire-version v2"#,
        )
        .arg(encoded_path_arg())
        .arg(wire_version_arg())
}
