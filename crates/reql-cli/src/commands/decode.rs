use std::path::PathBuf;

use reql_term::{ClusterVersion, TermStore, deserialize_term_tree, dump};

use super::input::{fail, read_input};

pub struct DecodeArgs {
    pub encoded_path: PathBuf,
    pub wire_version: ClusterVersion,
}

pub fn run(args: DecodeArgs) {
    let bytes = read_input(&args.encoded_path).unwrap_or_else(|e| fail(e));
    match render(&bytes, args.wire_version) {
        Ok(out) => print!("{}", out),
        Err(e) => fail(e),
    }
}

pub fn render(bytes: &[u8], version: ClusterVersion) -> Result<String, String> {
    let store = deserialize_term_tree(bytes, version).map_err(|e| e.to_string())?;
    let root = store.root_term().map_err(|e| e.to_string())?;
    dump(root).map_err(|e| e.to_string())
}
