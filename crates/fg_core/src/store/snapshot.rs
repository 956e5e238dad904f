//! Snapshot-backed store
//!
//! In-memory sessions, persisted in full after every write.
//! File format: MessagePack(named) → LZ4 (size prepended) → SHA256 trailer (32 bytes).
//! Writes go to a temp file, are fsynced, then renamed over the snapshot.
//! A write only reaches memory once it is on disk.
//! Sessions older than yesterday are dropped on write.

use chrono::{Days, NaiveDate};
use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs::{rename, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

use super::{GameSession, GameStore, MemoryStore, StoreError};

pub const SNAPSHOT_VERSION: u32 = 1;

const CHECKSUM_LEN: usize = 32;

/// Days before the written session's date that stay in the snapshot.
const RETAINED_PAST_DAYS: u64 = 1;

#[derive(Serialize, Deserialize, Debug, Clone)]
struct SnapshotFile {
    version: u32,
    next_game_id: u64,
    sessions: Vec<GameSession>,
}

impl SnapshotFile {
    fn validate(&self) -> Result<(), StoreError> {
        let mut keys = HashSet::new();
        for session in &self.sessions {
            if session.game_id > self.next_game_id || !keys.insert(session.key()) {
                return Err(StoreError::Corrupted);
            }
        }
        Ok(())
    }
}

fn serialize_and_compress(snapshot: &SnapshotFile) -> Result<Vec<u8>, StoreError> {
    let msgpack = to_vec_named(snapshot)?;
    let mut bytes = compress_prepend_size(&msgpack);

    let checksum = Sha256::digest(&bytes);
    bytes.extend_from_slice(&checksum);
    Ok(bytes)
}

fn decompress_and_deserialize(bytes: &[u8]) -> Result<SnapshotFile, StoreError> {
    // size header + checksum
    if bytes.len() < 4 + CHECKSUM_LEN {
        return Err(StoreError::Corrupted);
    }

    let (payload, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if Sha256::digest(payload).as_slice() != checksum {
        return Err(StoreError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| StoreError::Decompression)?;
    let snapshot: SnapshotFile = from_slice(&msgpack)?;

    if snapshot.version > SNAPSHOT_VERSION {
        return Err(StoreError::VersionMismatch {
            found: snapshot.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    snapshot.validate()?;

    Ok(snapshot)
}

/// Store that survives restarts by snapshotting to a single file.
#[derive(Debug)]
pub struct SnapshotStore {
    memory: MemoryStore,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SnapshotStore {
    /// Open the snapshot at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let memory = if path.exists() {
            let bytes = std::fs::read(&path)?;
            let snapshot = decompress_and_deserialize(&bytes)?;
            info!(
                sessions = snapshot.sessions.len(),
                "Loaded session snapshot from {}",
                path.display()
            );
            MemoryStore::from_sessions(snapshot.next_game_id, snapshot.sessions)
        } else {
            info!("No session snapshot at {}, starting empty", path.display());
            MemoryStore::new()
        };

        Ok(Self {
            memory,
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the snapshot with `session` applied, then commit it to memory.
    /// Memory is left untouched when the write fails.
    /// Caller holds `write_lock`.
    fn write_then_commit(
        &self,
        next_game_id: u64,
        session: GameSession,
    ) -> Result<(), StoreError> {
        let cutoff = retention_cutoff(session.date);
        let (current_next, mut sessions) = self.memory.export();
        let key = session.key();
        sessions.retain(|s| s.date >= cutoff && s.key() != key);
        sessions.push(session.clone());

        let next_game_id = next_game_id.max(current_next);
        self.write_file(&SnapshotFile {
            version: SNAPSHOT_VERSION,
            next_game_id,
            sessions,
        })?;

        self.memory.commit(next_game_id, session);
        let pruned = self.memory.prune_before(cutoff);
        if pruned > 0 {
            debug!(pruned, %cutoff, "Dropped sessions from past days");
        }
        Ok(())
    }

    fn write_file(&self, snapshot: &SnapshotFile) -> Result<(), StoreError> {
        let data = serialize_and_compress(snapshot)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, &self.path)?;

        debug!("Saved {} bytes to {:?}", data.len(), self.path);
        Ok(())
    }
}

/// Oldest day still kept when writing sessions for `date`.
fn retention_cutoff(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(RETAINED_PAST_DAYS)).unwrap_or(NaiveDate::MIN)
}

impl GameStore for SnapshotStore {
    fn find(&self, session_id: &str, date: NaiveDate) -> Result<Option<GameSession>, StoreError> {
        self.memory.find(session_id, date)
    }

    fn create(
        &self,
        session_id: &str,
        date: NaiveDate,
        daily_player_id: u32,
    ) -> Result<GameSession, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let game_id = self.memory.next_game_id() + 1;
        let session = GameSession::new(game_id, session_id, date, daily_player_id);
        self.write_then_commit(game_id, session.clone())?;
        Ok(session)
    }

    fn save(&self, session: &GameSession) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.write_then_commit(session.game_id, session.clone())
    }
}
