use crate::ports::outbound::{CommandBatch, RecordStore, StoreCommand};
use crate::shared::error::StoreError;
use crate::shared::StoreResult;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const WRONG_TYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";
const INVALID_EXPIRE: &str = "ERR invalid expire time in 'pexpire' command";

#[derive(Debug, Clone)]
enum StoredValue {
    Hash(HashMap<String, String>),
    SortedSet(HashMap<String, f64>),
}

#[derive(Debug, Clone)]
struct Entry {
    value: StoredValue,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }
}

/// InMemoryStore adapter - a process-local store with Redis semantics
///
/// Hashes and sorted sets live in a `DashMap`. Expiry is lazy: an expired
/// key is dropped the next time it is touched. Batches run command by
/// command like a Redis pipeline, so a failing command leaves the commands
/// before and after it applied and the batch reports the first failure.
///
/// Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<DashMap<String, Entry>>,
    closed: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining time-to-live of a key. `None` for missing or persistent keys.
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        self.evict_if_expired(key);
        let now = Instant::now();
        self.entries
            .get(key)
            .and_then(|entry| entry.expires_at)
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.evict_if_expired(key);
        self.entries.contains_key(key)
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::ConnectionClosed);
        }
        Ok(())
    }

    fn evict_if_expired(&self, key: &str) {
        let now = Instant::now();
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
    }

    fn apply(&self, command: &StoreCommand) -> Result<(), String> {
        match command {
            StoreCommand::HashSet { key, field, value } => {
                self.evict_if_expired(key);
                let mut entry = self.entries.entry(key.clone()).or_insert_with(|| Entry {
                    value: StoredValue::Hash(HashMap::new()),
                    expires_at: None,
                });
                match &mut entry.value {
                    StoredValue::Hash(fields) => {
                        fields.insert(field.clone(), value.clone());
                        Ok(())
                    }
                    StoredValue::SortedSet(_) => Err(WRONG_TYPE.to_string()),
                }
            }
            StoreCommand::SortedSetAdd { key, member, score } => {
                self.evict_if_expired(key);
                let mut entry = self.entries.entry(key.clone()).or_insert_with(|| Entry {
                    value: StoredValue::SortedSet(HashMap::new()),
                    expires_at: None,
                });
                match &mut entry.value {
                    StoredValue::SortedSet(members) => {
                        members.insert(member.clone(), *score);
                        Ok(())
                    }
                    StoredValue::Hash(_) => Err(WRONG_TYPE.to_string()),
                }
            }
            StoreCommand::Expire { key, ttl } => {
                self.evict_if_expired(key);
                let deadline = Instant::now()
                    .checked_add(*ttl)
                    .ok_or_else(|| INVALID_EXPIRE.to_string())?;
                if let Some(mut entry) = self.entries.get_mut(key) {
                    entry.expires_at = Some(deadline);
                }
                Ok(())
            }
            StoreCommand::Persist { key } => {
                self.evict_if_expired(key);
                if let Some(mut entry) = self.entries.get_mut(key) {
                    entry.expires_at = None;
                }
                Ok(())
            }
        }
    }

    fn read_hash(&self, key: &str) -> StoreResult<HashMap<String, String>> {
        self.evict_if_expired(key);
        match self.entries.get(key) {
            None => Ok(HashMap::new()),
            Some(entry) => match &entry.value {
                StoredValue::Hash(fields) => Ok(fields.clone()),
                StoredValue::SortedSet(_) => Err(StoreError::ReadFailed {
                    key: key.to_string(),
                    details: WRONG_TYPE.to_string(),
                }),
            },
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        self.ensure_open()
    }

    async fn execute(&self, batch: CommandBatch) -> StoreResult<()> {
        self.ensure_open()?;

        let mut first_failure = None;
        for command in batch.commands() {
            if let Err(details) = self.apply(command) {
                first_failure.get_or_insert(details);
            }
        }

        match first_failure {
            None => Ok(()),
            Some(details) => Err(StoreError::BatchExecFailed {
                label: batch.label().to_string(),
                committed: 0,
                details,
            }),
        }
    }

    async fn hash_get_all(&self, key: &str) -> StoreResult<HashMap<String, String>> {
        self.ensure_open()?;
        self.read_hash(key)
    }

    async fn hash_get_all_many(
        &self,
        keys: &[String],
    ) -> StoreResult<Vec<HashMap<String, String>>> {
        self.ensure_open()?;
        keys.iter().map(|key| self.read_hash(key)).collect()
    }

    async fn sorted_set_members(&self, key: &str) -> StoreResult<Vec<String>> {
        self.ensure_open()?;
        self.evict_if_expired(key);

        let Some(entry) = self.entries.get(key) else {
            return Ok(Vec::new());
        };
        let StoredValue::SortedSet(members) = &entry.value else {
            return Err(StoreError::ReadFailed {
                key: key.to_string(),
                details: WRONG_TYPE.to_string(),
            });
        };

        let mut ranked: Vec<(&String, f64)> =
            members.iter().map(|(member, score)| (member, *score)).collect();
        ranked.sort_by(|(a_member, a_score), (b_member, b_score)| {
            a_score.total_cmp(b_score).then_with(|| a_member.cmp(b_member))
        });
        Ok(ranked.into_iter().map(|(member, _)| member.clone()).collect())
    }

    async fn close(&self) -> StoreResult<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
