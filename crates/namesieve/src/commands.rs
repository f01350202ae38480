//! Command implementations behind the `namesieve` binary.
//!
//! Each command maps to one boundary operation. Request documents are read
//! from a file, or stdin when the path is `-`.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

use namesieve_core::service::{
    AddDatabaseRequest, FindRequest, FindResponse, RemoveDatabaseRequest, Searcher,
};
use namesieve_core::storage::CacheStore;
use namesieve_core::{IndexStats, Normalizer};
use namesieve_fs::FileStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;

/// Open the file cache named by `config`
pub fn open_searcher(config: &Config) -> Result<Searcher<FileStore>> {
    let store = FileStore::open(&config.cache_dir)?;
    info!(cache_dir = %config.cache_dir.display(), "cache directory ready");
    Ok(Searcher::with_config(
        store,
        Arc::new(Normalizer::default()),
        config.index_config(),
    ))
}

/// Parse a JSON request document from `path` (`-` for stdin)
pub fn read_request<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };
    debug!(path = %path.display(), bytes = raw.len(), "request read");
    Ok(serde_json::from_str(&raw)?)
}

/// Write `value` as pretty JSON to `path`, or to `out` when no path is given
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>, out: &mut impl Write) -> Result<()> {
    match path {
        Some(path) => {
            let json = serde_json::to_string_pretty(value)?;
            fs::write(path, json)?;
            info!(path = %path.display(), "response written");
        }
        None => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// `AddDatabase`: index the request's records into their database
pub fn add<S: CacheStore>(searcher: &mut Searcher<S>, request: AddDatabaseRequest) -> Result<IndexStats> {
    Ok(searcher.add_database(request)?)
}

/// `RemoveDatabase`: drop one database's cache entry
pub fn remove<S: CacheStore>(searcher: &mut Searcher<S>, database_id: &str) -> Result<bool> {
    let removed = searcher.remove_database(&RemoveDatabaseRequest {
        database_id: database_id.to_string(),
    })?;
    Ok(removed)
}

/// Drop every database
pub fn clear<S: CacheStore>(searcher: &mut Searcher<S>) -> Result<()> {
    Ok(searcher.remove_all_databases()?)
}

/// `FindInDatabase`: run every query of the request
pub fn find<S: CacheStore>(searcher: &Searcher<S>, request: &FindRequest) -> Result<FindResponse> {
    Ok(searcher.find_in_database(request)?)
}

/// Stored database ids
pub fn list<S: CacheStore>(searcher: &Searcher<S>) -> Result<Vec<String>> {
    Ok(searcher.database_ids()?)
}

/// One line of `normalize` output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedName {
    pub input: String,
    pub rewritten: String,
    pub key: String,
}

/// Show each pipeline stage for `texts`
pub fn normalize(normalizer: &Normalizer, texts: &[String]) -> Vec<NormalizedName> {
    texts
        .iter()
        .map(|text| NormalizedName {
            input: text.clone(),
            rewritten: normalizer.rewrite(text),
            key: normalizer.normalize(text),
        })
        .collect()
}
