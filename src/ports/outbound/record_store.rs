use crate::cve_tracking::domain::RetentionPolicy;
use crate::shared::StoreResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// A single write command understood by every store adapter
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCommand {
    /// Set one field of a hash
    HashSet {
        key: String,
        field: String,
        value: String,
    },
    /// Add a member to a sorted set
    SortedSetAdd {
        key: String,
        member: String,
        score: f64,
    },
    /// Set a time-to-live on a key
    Expire { key: String, ttl: Duration },
    /// Remove any time-to-live from a key
    Persist { key: String },
}

/// Ordered list of write commands sent to the store together.
///
/// Batches are pipelines, not transactions: commands are sent and
/// acknowledged together, and a failing command fails the batch without
/// undoing the commands that already took effect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandBatch {
    label: String,
    commands: Vec<StoreCommand>,
}

impl CommandBatch {
    /// Creates an empty batch. The label names the batch in errors and logs.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            commands: Vec::new(),
        }
    }

    pub fn hash_set(
        &mut self,
        key: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.commands.push(StoreCommand::HashSet {
            key: key.into(),
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn sorted_set_add(
        &mut self,
        key: impl Into<String>,
        member: impl Into<String>,
        score: f64,
    ) -> &mut Self {
        self.commands.push(StoreCommand::SortedSetAdd {
            key: key.into(),
            member: member.into(),
            score,
        });
        self
    }

    /// Applies the retention policy to a key: EXPIRE for a finite policy,
    /// PERSIST otherwise.
    pub fn retain(&mut self, key: impl Into<String>, policy: RetentionPolicy) -> &mut Self {
        let key = key.into();
        let command = match policy.ttl() {
            Some(ttl) => StoreCommand::Expire { key, ttl },
            None => StoreCommand::Persist { key },
        };
        self.commands.push(command);
        self
    }

    pub fn push(&mut self, command: StoreCommand) -> &mut Self {
        self.commands.push(command);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn commands(&self) -> &[StoreCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// RecordStore port for the key/value + sorted-set store holding CVE records
///
/// Implementations must be `Send + Sync` and safe to call concurrently; a
/// single command is atomic, a batch is not.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Liveness probe
    async fn ping(&self) -> StoreResult<()>;

    /// Executes a batch as one pipeline
    ///
    /// # Errors
    /// Returns `BatchExecFailed` if any command of the batch fails. Commands
    /// before the failing one may already have been applied.
    async fn execute(&self, batch: CommandBatch) -> StoreResult<()>;

    /// Reads every field of a hash. A missing key yields an empty map.
    async fn hash_get_all(&self, key: &str) -> StoreResult<HashMap<String, String>>;

    /// Reads several hashes in one pipelined round trip.
    /// The result has one map per key, in key order.
    async fn hash_get_all_many(&self, keys: &[String])
        -> StoreResult<Vec<HashMap<String, String>>>;

    /// All members of a sorted set, lowest score first
    async fn sorted_set_members(&self, key: &str) -> StoreResult<Vec<String>>;

    /// Releases the connection. Closing twice is a no-op.
    async fn close(&self) -> StoreResult<()>;
}
