use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use reql_core::ReqlVersion;
use reql_term::{ClusterVersion, QueryTermStore, TermStore, encode_term_tree};

use super::input::{fail, load_query};

pub struct EncodeArgs {
    pub query_path: PathBuf,
    pub wire_version: ClusterVersion,
    pub reql_version: ReqlVersion,
    pub output: Option<PathBuf>,
}

pub fn run(args: EncodeArgs) {
    let store = load_query(&args.query_path, args.reql_version).unwrap_or_else(|e| fail(e));
    let bytes = encode(&store, args.wire_version).unwrap_or_else(|e| fail(e));

    let written = match &args.output {
        Some(path) => fs::write(path, &bytes)
            .map_err(|e| format!("failed to write '{}': {}", path.display(), e)),
        None => io::stdout()
            .write_all(&bytes)
            .map_err(|e| format!("failed to write stdout: {}", e)),
    };
    if let Err(e) = written {
        fail(e);
    }
}

pub fn encode(store: &QueryTermStore, version: ClusterVersion) -> Result<Vec<u8>, String> {
    let root = store.root_term().map_err(|e| e.to_string())?;
    encode_term_tree(root, version).map_err(|e| e.to_string())
}
