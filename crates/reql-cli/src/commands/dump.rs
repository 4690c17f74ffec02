use std::path::PathBuf;

use reql_core::{ConfiguredLimits, ReqlVersion};
use reql_term::{QueryTermStore, RawTerm, TermStore, dump};

use super::input::{fail, load_query};

pub struct DumpArgs {
    pub query_path: PathBuf,
    pub reql_version: ReqlVersion,
    pub array_limit: Option<usize>,
}

pub fn run(args: DumpArgs) {
    let mut store = load_query(&args.query_path, args.reql_version).unwrap_or_else(|e| fail(e));
    match render(&mut store, args.array_limit) {
        Ok(out) => print!("{}", out),
        Err(e) => fail(e),
    }
}

/// Preprocess the query, check every literal against the effective limits
/// and dump the tree.
pub fn render(store: &mut QueryTermStore, array_limit: Option<usize>) -> Result<String, String> {
    store.preprocess().map_err(|e| e.to_string())?;

    let mut limits = store
        .global_optargs()
        .and_then(|global| global.configured_limits())
        .map_err(|e| e.to_string())?;
    if let Some(limit) = array_limit {
        limits = limits.with_array_size_limit(limit);
    }

    let root = store.root_term().map_err(|e| e.to_string())?;
    check_literals(root, &limits, store.version()).map_err(|e| e.to_string())?;
    dump(root).map_err(|e| e.to_string())
}

fn check_literals(
    term: RawTerm<'_>,
    limits: &ConfiguredLimits,
    version: ReqlVersion,
) -> reql_term::Result<()> {
    term.datum(limits, version)?;
    for arg in term.args() {
        check_literals(arg?, limits, version)?;
    }
    for optarg in term.optargs() {
        check_literals(optarg?, limits, version)?;
    }
    Ok(())
}
