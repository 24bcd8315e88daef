//! JSON document persistence for indices, bounds and stats

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub const WORD_INDEX_FILE: &str = "tanach_word_index.json";
pub const VERSE_INDEX_FILE: &str = "tanach_verse_index.json";
pub const BOUNDS_FILE: &str = "tanach_gematria_bounds.json";
pub const STATS_FILE: &str = "tanach_stats.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error in {}: {}", .path.display(), .source)]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Locations of the persisted documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPaths {
    pub word_index: PathBuf,
    pub verse_index: PathBuf,
    pub bounds: PathBuf,
    pub stats: PathBuf,
}

impl DocumentPaths {
    /// Default file names inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            word_index: dir.join(WORD_INDEX_FILE),
            verse_index: dir.join(VERSE_INDEX_FILE),
            bounds: dir.join(BOUNDS_FILE),
            stats: dir.join(STATS_FILE),
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn json_error(path: &Path) -> impl FnOnce(serde_json::Error) -> StoreError + '_ {
    move |source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    }
}

pub fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> StoreResult<T> {
    let path = path.as_ref();
    let file = File::open(path).map_err(io_error(path))?;
    let document = serde_json::from_reader(BufReader::new(file)).map_err(json_error(path))?;
    tracing::debug!(path = %path.display(), "document loaded");
    Ok(document)
}

/// Write `document` as pretty-printed UTF-8 JSON, creating parent directories
pub fn save_json<T: Serialize, P: AsRef<Path>>(path: P, document: &T) -> StoreResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document).map_err(json_error(path))?;
    writer.write_all(b"\n").map_err(io_error(path))?;
    writer.flush().map_err(io_error(path))?;
    tracing::debug!(path = %path.display(), "document saved");
    Ok(())
}
