use std::fs;
use std::io::{self, Read};
use std::path::Path;

use reql_core::ReqlVersion;
use reql_term::QueryTermStore;

/// Read a whole file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<Vec<u8>, String> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        return Ok(buf);
    }
    fs::read(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}

pub fn load_query(path: &Path, version: ReqlVersion) -> Result<QueryTermStore, String> {
    let data = read_input(path)?;
    if data.iter().all(u8::is_ascii_whitespace) {
        return Err("query cannot be empty".to_string());
    }
    QueryTermStore::parse(data, version).map_err(|e| e.to_string())
}

/// Print the error and exit with status 1.
pub fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", msg);
    std::process::exit(1);
}
