use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::StoreError;
use crate::models::{Customer, Reservation, Room, TableRow};

/// A record kind that owns one data file.
pub trait Record: TableRow + Serialize + DeserializeOwned + Clone {
    /// File name inside the data directory.
    const FILE_NAME: &'static str;
    /// Plural noun used in log lines.
    const KIND: &'static str;
}

impl Record for Room {
    const FILE_NAME: &'static str = "rooms.json";
    const KIND: &'static str = "rooms";
}

impl Record for Customer {
    const FILE_NAME: &'static str = "customers.json";
    const KIND: &'static str = "customers";
}

impl Record for Reservation {
    const FILE_NAME: &'static str = "reservations.json";
    const KIND: &'static str = "reservations";
}

/// Whole-collection snapshot store. Every save rewrites the full file and every
/// load reads it back in one go; there is no index, journal or versioning.
#[derive(Debug, Clone)]
pub struct Store {
    /// Directory holding one JSON file per record kind.
    dir: PathBuf,
}

impl Store {
    /// Bind the store to `dir`, creating the directory when needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory {}", dir.display()))?;
        log::info!("data directory: {}", dir.display());
        Ok(Self { dir })
    }

    /// Directory the store reads from and writes to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute path of the file backing `R`.
    pub fn path_for<R: Record>(&self) -> PathBuf {
        self.dir.join(R::FILE_NAME)
    }

    /// Serialize `records` over the previous file contents. The file is
    /// truncated before writing, so a failure part-way leaves a partial file.
    pub fn try_save<R: Record>(&self, records: &[R]) -> Result<(), StoreError> {
        let path = self.path_for::<R>();
        let file = File::create(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records).map_err(|source| {
            if source.is_io() {
                StoreError::Io {
                    path: path.clone(),
                    source: source.into(),
                }
            } else {
                StoreError::Encode {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        writer
            .flush()
            .map_err(|source| StoreError::Io { path, source })?;
        Ok(())
    }

    /// Persist `records`, logging instead of raising on failure. Callers carry
    /// on with their in-memory list either way.
    pub fn save<R: Record>(&self, records: &[R]) {
        match self.try_save(records) {
            Ok(()) => log::debug!("saved {} {}", records.len(), R::KIND),
            Err(err) => log::error!("persistence error: {err}"),
        }
    }

    /// Read the collection back, reporting a missing file separately from an
    /// unreadable one.
    pub fn try_load<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        let path = self.path_for::<R>();
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StoreError::Missing { path });
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            if source.is_io() {
                StoreError::Io {
                    path,
                    source: source.into(),
                }
            } else {
                StoreError::Corrupt { path, source }
            }
        })
    }

    /// Read the collection, falling back to an empty list on any failure.
    /// A corrupt file is indistinguishable from a first run here; the
    /// warning in the log is the only trace.
    pub fn load<R: Record>(&self) -> Vec<R> {
        match self.try_load() {
            Ok(records) => {
                log::info!("loaded {} {}", records.len(), R::KIND);
                records
            }
            Err(err) if err.is_missing() => {
                log::debug!("{err}; starting with no {}", R::KIND);
                Vec::new()
            }
            Err(err) => {
                log::warn!("{err}; starting with no {}", R::KIND);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::models::{BedType, RoomType};

    fn room(id: &str, price: i64) -> Room {
        Room {
            id: id.to_string(),
            room_type: RoomType::Double,
            bed: BedType::King,
            price,
        }
    }

    #[test]
    fn save_then_load_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path()).unwrap();

        let rooms = vec![room("R2", 250), room("R1", 100), room("R3", 90)];
        store.try_save(&rooms).unwrap();

        assert_eq!(store.load::<Room>(), rooms);
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path()).unwrap();

        store.try_save(&[room("R1", 100), room("R2", 200)]).unwrap();
        store.try_save(&[room("R9", 900)]).unwrap();

        assert_eq!(store.load::<Room>(), vec![room("R9", 900)]);
    }

    #[test]
    fn missing_file_loads_empty_but_reports_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path()).unwrap();

        assert!(store.load::<Customer>().is_empty());
        assert!(store.try_load::<Customer>().unwrap_err().is_missing());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path()).unwrap();
        fs::write(store.path_for::<Room>(), b"not json at all").unwrap();

        assert!(store.load::<Room>().is_empty());
        assert!(matches!(
            store.try_load::<Room>(),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn open_creates_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let store = Store::open(&nested).unwrap();

        assert!(nested.is_dir());
        assert_eq!(store.path_for::<Room>(), nested.join("rooms.json"));
    }

    #[test]
    fn save_into_missing_directory_fails_quietly() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path().join("gone")).unwrap();
        fs::remove_dir(store.dir()).unwrap();

        store.save(&[room("R1", 100)]);
        assert!(store.try_save(&[room("R1", 100)]).is_err());
        assert!(store.load::<Room>().is_empty());
    }
}
