//! File-backed cache store implementing the CacheStore trait

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use namesieve_core::fuzzy::IndexSnapshot;
use namesieve_core::storage::{CacheStore, StoreResult};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{FsError, Result};

const FILE_PREFIX: &str = "cache_";
const FILE_SUFFIX: &str = ".json";

/// One JSON file per database under a cache directory
///
/// Files are named `cache_<database id>.json`. Writes go to a temporary file
/// in the same directory which is then renamed over the old entry, so readers
/// see either the previous snapshot or the new one.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "opened cache directory");
        Ok(Self { dir })
    }

    /// Cache directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cache file for `database_id`
    pub fn path_for(&self, database_id: &str) -> Result<PathBuf> {
        validate_id(database_id)?;
        Ok(self
            .dir
            .join(format!("{}{}{}", FILE_PREFIX, database_id, FILE_SUFFIX)))
    }

    fn write_snapshot(&self, database_id: &str, snapshot: &IndexSnapshot) -> Result<()> {
        let path = self.path_for(database_id)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, snapshot)?;
            writer.flush()?;
        }
        tmp.persist(&path).map_err(|e| FsError::Io(e.error))?;
        debug!(database_id, path = %path.display(), keys = snapshot.len(), "cache written");
        Ok(())
    }

    fn read_snapshot(&self, database_id: &str) -> Result<IndexSnapshot> {
        let path = self.path_for(database_id)?;
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FsError::NotFound(database_id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let snapshot = serde_json::from_reader(BufReader::new(file))?;
        Ok(snapshot)
    }

    fn delete(&self, database_id: &str) -> Result<bool> {
        let path = self.path_for(database_id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn cache_files(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(id) = database_id_of(name) {
                files.push((id.to_string(), entry.path()));
            }
        }
        files.sort();
        Ok(files)
    }

    fn delete_all(&self) -> Result<usize> {
        let mut removed = 0;
        for (id, path) in self.cache_files()? {
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!(database_id = %id, "cache vanished during clear")
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(removed)
    }
}

/// Database id encoded in a cache file name, if it is one
fn database_id_of(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(FILE_PREFIX)?
        .strip_suffix(FILE_SUFFIX)
        .filter(|id| !id.is_empty())
}

fn validate_id(database_id: &str) -> Result<()> {
    if database_id.is_empty()
        || database_id.contains(['/', '\\', '\0'])
        || database_id == "."
        || database_id == ".."
    {
        return Err(FsError::InvalidId(database_id.to_string()));
    }
    Ok(())
}

impl CacheStore for FileStore {
    fn exists(&self, database_id: &str) -> StoreResult<bool> {
        Ok(self.path_for(database_id)?.is_file())
    }

    fn save(&mut self, database_id: &str, snapshot: &IndexSnapshot) -> StoreResult<()> {
        Ok(self.write_snapshot(database_id, snapshot)?)
    }

    fn load(&self, database_id: &str) -> StoreResult<IndexSnapshot> {
        Ok(self.read_snapshot(database_id)?)
    }

    fn remove(&mut self, database_id: &str) -> StoreResult<bool> {
        Ok(self.delete(database_id)?)
    }

    fn remove_all(&mut self) -> StoreResult<()> {
        let removed = self.delete_all()?;
        debug!(removed, dir = %self.dir.display(), "cache directory cleared");
        Ok(())
    }

    fn ids(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .cache_files()?
            .into_iter()
            .map(|(id, _)| id)
            .collect())
    }
}
