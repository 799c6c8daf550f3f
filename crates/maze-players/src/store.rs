//! Storage handles for submissions and quota counters
//!
//! A store is created by the caller at startup, passed to the service, and
//! closed at shutdown. There is no process-wide connection.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rate::RateRecord;
use crate::submission::PlayerRecord;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store is closed")]
    Closed,
}

/// Persistence for player records and rate-limit counters
pub trait PlayerStore {
    fn insert_player(&mut self, record: PlayerRecord) -> Result<(), StoreError>;

    /// Up to `n` distinct records in random order
    fn sample_players<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<PlayerRecord>, StoreError>;

    fn rate_record(&self, client: &str) -> Result<Option<RateRecord>, StoreError>;

    fn put_rate_record(&mut self, client: &str, record: RateRecord) -> Result<(), StoreError>;

    /// Release the store. Later calls fail with [`StoreError::Closed`].
    fn close(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Record plus the identifier it is stored under; the id never leaves the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredPlayer {
    id: u64,
    record: PlayerRecord,
}

/// In-memory store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    next_id: u64,
    players: Vec<StoredPlayer>,
    rate_limits: HashMap<String, RateRecord>,
    #[serde(skip)]
    closed: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

impl PlayerStore for MemoryStore {
    fn insert_player(&mut self, record: PlayerRecord) -> Result<(), StoreError> {
        self.ensure_open()?;
        let id = self.next_id;
        self.next_id += 1;
        self.players.push(StoredPlayer { id, record });
        Ok(())
    }

    fn sample_players<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<PlayerRecord>, StoreError> {
        self.ensure_open()?;
        Ok(self
            .players
            .choose_multiple(rng, n)
            .map(|p| p.record.clone())
            .collect())
    }

    fn rate_record(&self, client: &str) -> Result<Option<RateRecord>, StoreError> {
        self.ensure_open()?;
        Ok(self.rate_limits.get(client).copied())
    }

    fn put_rate_record(&mut self, client: &str, record: RateRecord) -> Result<(), StoreError> {
        self.ensure_open()?;
        self.rate_limits.insert(client.to_string(), record);
        Ok(())
    }

    fn close(&mut self) -> Result<(), StoreError> {
        self.closed = true;
        Ok(())
    }
}

/// JSON document store on disk.
///
/// The whole document is loaded by [`FileStore::open`] and rewritten after
/// every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: MemoryStore,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            serde_json::from_reader(reader)?
        } else {
            MemoryStore::new()
        };
        log::info!(
            "opened player store {} ({} players)",
            path.display(),
            data.player_count()
        );
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn player_count(&self) -> usize {
        self.data.player_count()
    }

    fn flush(&self) -> Result<(), StoreError> {
        write_document(&self.path, &self.data)
    }

    /// Apply a change to a copy of the data and keep it only once it is on disk
    fn commit<F>(&mut self, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut MemoryStore) -> Result<(), StoreError>,
    {
        let mut staged = self.data.clone();
        change(&mut staged)?;
        write_document(&self.path, &staged)?;
        self.data = staged;
        Ok(())
    }
}

fn write_document(path: &Path, data: &MemoryStore) -> Result<(), StoreError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, data)?;
    writer.flush()?;
    Ok(())
}

impl PlayerStore for FileStore {
    fn insert_player(&mut self, record: PlayerRecord) -> Result<(), StoreError> {
        self.commit(|data| data.insert_player(record))
    }

    fn sample_players<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<PlayerRecord>, StoreError> {
        self.data.sample_players(n, rng)
    }

    fn rate_record(&self, client: &str) -> Result<Option<RateRecord>, StoreError> {
        self.data.rate_record(client)
    }

    fn put_rate_record(&mut self, client: &str, record: RateRecord) -> Result<(), StoreError> {
        self.commit(|data| data.put_rate_record(client, record))
    }

    fn close(&mut self) -> Result<(), StoreError> {
        self.data.ensure_open()?;
        self.flush()?;
        self.data.close()?;
        log::info!("closed player store {}", self.path.display());
        Ok(())
    }
}
