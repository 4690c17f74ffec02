//! Shared argument builders for CLI commands.

use std::path::PathBuf;

use clap::{Arg, value_parser};
use reql_core::ReqlVersion;
use reql_term::ClusterVersion;

/// JSON query file, `-` for stdin (positional).
pub fn query_path_arg() -> Arg {
    Arg::new("query_path")
        .value_name("QUERY")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Query file in JSON (`-` reads stdin)")
}

/// Encoded term tree, `-` for stdin (positional).
pub fn encoded_path_arg() -> Arg {
    Arg::new("encoded_path")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Encoded term tree (`-` reads stdin)")
}

/// Output file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to a file instead of stdout")
}

/// Wire format (--wire-version). Never defaulted.
pub fn wire_version_arg() -> Arg {
    Arg::new("wire_version")
        .long("wire-version")
        .value_name("VERSION")
        .value_parser(value_parser!(ClusterVersion))
        .required(true)
        .help("Cluster wire format (v1, v2)")
}

/// Literal parsing rules (--reql-version).
pub fn reql_version_arg() -> Arg {
    Arg::new("reql_version")
        .long("reql-version")
        .value_name("VERSION")
        .value_parser(value_parser!(ReqlVersion))
        .default_value(ReqlVersion::LATEST.as_str())
        .help("ReQL version for literal parsing (1.16, 2.0)")
}

/// Array size limit override (--array-limit).
pub fn array_limit_arg() -> Arg {
    Arg::new("array_limit")
        .long("array-limit")
        .value_name("N")
        .value_parser(value_parser!(u64).range(1..))
        .help("Largest array literal accepted (overrides the query's array_limit)")
}
