//! Persisted conversion history.

use crate::core::history::HistoryEntry;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use std::sync::RwLock;
use tracing::{debug, warn};

/// Maximum number of entries the log retains.
pub const HISTORY_LIMIT: usize = 50;

/// The single slot holding the serialized entry sequence, newest first.
const HISTORY_SLOT: &str = "conversions";

/// Bounded, persisted log of past conversions, newest first.
///
/// Persistence is best-effort: when the keyspace cannot be opened the store
/// degrades to memory-only, and a failed write leaves the in-memory log
/// authoritative for the rest of the process. Reads of an absent or corrupt
/// slot fall back to an empty log.
pub struct HistoryStore {
    keyspace: Option<Keyspace>,
    partition: Option<PartitionHandle>,
    entries: RwLock<Vec<HistoryEntry>>,
}

impl HistoryStore {
    /// Opens the store at `path` and loads the persisted log.
    pub fn open(path: &Path) -> Self {
        let keyspace = match fjall::Config::new(path).open() {
            Ok(keyspace) => Some(keyspace),
            Err(e) => {
                warn!(
                    error = %e,
                    path = %path.display(),
                    "Could not open history keyspace, history will not persist"
                );
                None
            }
        };

        let partition = keyspace.as_ref().and_then(|ks| {
            ks.open_partition("history", PartitionCreateOptions::default())
                .map_err(|e| warn!(error = %e, "Could not open history partition"))
                .ok()
        });

        let entries = partition.as_ref().map_or_else(Vec::new, load_slot);
        Self {
            keyspace,
            partition,
            entries: RwLock::new(entries),
        }
    }

    #[cfg(test)]
    pub(crate) fn ephemeral() -> Self {
        Self {
            keyspace: None,
            partition: None,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Prepends `entry`, keeps the newest `HISTORY_LIMIT` entries and
    /// persists the resulting sequence before returning.
    pub fn append(&self, entry: HistoryEntry) {
        let mut entries = self.entries.write().unwrap();
        entries.insert(0, entry);
        entries.truncate(HISTORY_LIMIT);
        self.persist(&entries);
    }

    /// Empties the log and persists the empty state.
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap();
        entries.clear();
        self.persist(&entries);
    }

    /// Snapshot of the log, newest first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    // Called with the entry lock held so persisted state never interleaves
    // between concurrent appends.
    fn persist(&self, entries: &[HistoryEntry]) {
        let (Some(keyspace), Some(partition)) = (&self.keyspace, &self.partition) else {
            return;
        };
        let res: anyhow::Result<()> = (|| {
            partition.insert(HISTORY_SLOT, serde_json::to_vec(entries)?)?;
            keyspace.persist(PersistMode::SyncAll)?;
            Ok(())
        })();
        if let Err(e) = res {
            debug!(error = %e, "History write failed, keeping the in-memory log");
        }
    }
}

fn load_slot(partition: &PartitionHandle) -> Vec<HistoryEntry> {
    let bytes = match partition.get(HISTORY_SLOT) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Vec::new(),
        Err(e) => {
            debug!(error = %e, "History read failed, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_slice::<Vec<HistoryEntry>>(&bytes) {
        Ok(mut entries) => {
            entries.truncate(HISTORY_LIMIT);
            entries
        }
        Err(e) => {
            warn!(error = %e, "History slot is unreadable, starting empty");
            Vec::new()
        }
    }
}
