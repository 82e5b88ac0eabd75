use async_trait::async_trait;
use cve_store::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// RecordStore wrapper that fails the Nth batch (0-based) and every read
/// once `fail_reads` is set. Everything else is delegated to an
/// InMemoryStore.
#[derive(Clone)]
pub struct FailingStore {
    inner: InMemoryStore,
    fail_batch: Option<usize>,
    fail_reads: bool,
    batches: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl FailingStore {
    pub fn new(inner: InMemoryStore) -> Self {
        Self {
            inner,
            fail_batch: None,
            fail_reads: false,
            batches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing_batch(mut self, index: usize) -> Self {
        self.fail_batch = Some(index);
        self
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn batches_seen(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }

    fn read_error(&self, key: &str) -> StoreResult<()> {
        if self.fail_reads {
            return Err(StoreError::ReadFailed {
                key: key.to_string(),
                details: "simulated read failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FailingStore {
    async fn ping(&self) -> StoreResult<()> {
        self.inner.ping().await
    }

    async fn execute(&self, batch: CommandBatch) -> StoreResult<()> {
        let index = self.batches.fetch_add(1, Ordering::SeqCst);
        if self.fail_batch == Some(index) {
            return Err(StoreError::BatchExecFailed {
                label: batch.label().to_string(),
                committed: 0,
                details: "simulated pipeline failure".to_string(),
            });
        }
        self.inner.execute(batch).await
    }

    async fn hash_get_all(&self, key: &str) -> StoreResult<HashMap<String, String>> {
        self.read_error(key)?;
        self.inner.hash_get_all(key).await
    }

    async fn hash_get_all_many(
        &self,
        keys: &[String],
    ) -> StoreResult<Vec<HashMap<String, String>>> {
        self.read_error(&format!("{} record(s)", keys.len()))?;
        self.inner.hash_get_all_many(keys).await
    }

    async fn sorted_set_members(&self, key: &str) -> StoreResult<Vec<String>> {
        self.read_error(key)?;
        self.inner.sorted_set_members(key).await
    }

    async fn close(&self) -> StoreResult<()> {
        self.inner.close().await
    }
}
