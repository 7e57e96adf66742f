//! src/sim/registry.rs
//!
//! Loads the router list from `routers.json` at startup.
//!
//! Records only contribute `id`/`ip`/`port`; any interface, BGP, or status
//! data present in the source is ignored and every router starts in the
//! default state (interfaces down, BGP empty).

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::router::Router;

/// Fatal startup errors. The process does not start on any of these.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read router file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed router file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate router id {0:?}")]
    DuplicateId(String),
}

/// On-disk shape of one router record. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct RouterRecord {
    id: String,
    ip: String,
    port: u16,
}

/// Parse a JSON array of router records into default-state routers.
pub fn parse(input: &str) -> Result<Vec<Router>, LoadError> {
    let records: Vec<RouterRecord> = serde_json::from_str(input)?;
    let mut seen = HashSet::new();
    let mut routers = Vec::with_capacity(records.len());
    for rec in records {
        if !seen.insert(rec.id.clone()) {
            return Err(LoadError::DuplicateId(rec.id));
        }
        routers.push(Router::new(rec.id, rec.ip, rec.port));
    }
    Ok(routers)
}

/// Read and parse the router file.
pub fn load(path: &Path) -> Result<Vec<Router>, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content)
}
