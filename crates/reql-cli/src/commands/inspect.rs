use std::fmt::Write as _;
use std::path::PathBuf;

use reql_core::ReqlVersion;
use reql_term::{QueryTermStore, TermStore};

use super::input::{fail, load_query};

pub struct InspectArgs {
    pub query_path: PathBuf,
    pub reql_version: ReqlVersion,
}

pub fn run(args: InspectArgs) {
    let store = load_query(&args.query_path, args.reql_version).unwrap_or_else(|e| fail(e));
    match render(&store) {
        Ok(out) => print!("{}", out),
        Err(e) => fail(e),
    }
}

/// Envelope summary; never builds the root term.
pub fn render(store: &QueryTermStore) -> Result<String, String> {
    let query_type = store.query_type().map_err(|e| e.to_string())?;
    let global = store.global_optargs().map_err(|e| e.to_string())?;
    let noreply = store
        .static_optarg_as_bool("noreply", false)
        .map_err(|e| e.to_string())?;
    let limits = global.configured_limits().map_err(|e| e.to_string())?;

    let mut out = String::new();
    writeln!(out, "type: {}", query_type).unwrap();
    writeln!(out, "version: {}", store.version()).unwrap();
    let names: Vec<_> = global.names().collect();
    if names.is_empty() {
        writeln!(out, "global optargs: (none)").unwrap();
    } else {
        writeln!(out, "global optargs: {}", names.join(", ")).unwrap();
    }
    writeln!(out, "noreply: {}", noreply).unwrap();
    writeln!(out, "array limit: {}", limits.array_size_limit).unwrap();
    Ok(out)
}
