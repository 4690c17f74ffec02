//! Extract params from `ArgMatches` and convert them to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use reql_core::ReqlVersion;
use reql_term::ClusterVersion;

use crate::commands::decode::DecodeArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::encode::EncodeArgs;
use crate::commands::inspect::InspectArgs;

pub struct InspectParams {
    pub query_path: PathBuf,
    pub reql_version: ReqlVersion,
}

impl InspectParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: query_path(m),
            reql_version: reql_version(m),
        }
    }
}

impl From<InspectParams> for InspectArgs {
    fn from(p: InspectParams) -> Self {
        Self {
            query_path: p.query_path,
            reql_version: p.reql_version,
        }
    }
}

pub struct DumpParams {
    pub query_path: PathBuf,
    pub reql_version: ReqlVersion,
    pub array_limit: Option<usize>,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: query_path(m),
            reql_version: reql_version(m),
            array_limit: m
                .get_one::<u64>("array_limit")
                .map(|&n| usize::try_from(n).unwrap_or(usize::MAX)),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            query_path: p.query_path,
            reql_version: p.reql_version,
            array_limit: p.array_limit,
        }
    }
}

pub struct EncodeParams {
    pub query_path: PathBuf,
    pub wire_version: ClusterVersion,
    pub reql_version: ReqlVersion,
    pub output: Option<PathBuf>,
}

impl EncodeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: query_path(m),
            wire_version: wire_version(m),
            reql_version: reql_version(m),
            output: m.get_one::<PathBuf>("output").cloned(),
        }
    }
}

impl From<EncodeParams> for EncodeArgs {
    fn from(p: EncodeParams) -> Self {
        Self {
            query_path: p.query_path,
            wire_version: p.wire_version,
            reql_version: p.reql_version,
            output: p.output,
        }
    }
}

pub struct DecodeParams {
    pub encoded_path: PathBuf,
    pub wire_version: ClusterVersion,
}

impl DecodeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            encoded_path: m
                .get_one::<PathBuf>("encoded_path")
                .cloned()
                .expect("encoded_path is required"),
            wire_version: wire_version(m),
        }
    }
}

impl From<DecodeParams> for DecodeArgs {
    fn from(p: DecodeParams) -> Self {
        Self {
            encoded_path: p.encoded_path,
            wire_version: p.wire_version,
        }
    }
}

// Required or defaulted, so clap guarantees a value.

fn query_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("query_path")
        .cloned()
        .expect("query_path is required")
}

fn reql_version(m: &ArgMatches) -> ReqlVersion {
    m.get_one::<ReqlVersion>("reql_version")
        .copied()
        .expect("--reql-version has a default")
}

fn wire_version(m: &ArgMatches) -> ClusterVersion {
    m.get_one::<ClusterVersion>("wire_version")
        .copied()
        .expect("--wire-version is required")
}
