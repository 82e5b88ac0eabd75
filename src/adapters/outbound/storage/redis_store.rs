use crate::ports::outbound::{CommandBatch, RecordStore, StoreCommand};
use crate::shared::error::StoreError;
use crate::shared::StoreResult;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// RedisStore adapter - the connection manager for a Redis server
///
/// Holds one multiplexed connection. Clones share it, so concurrent calls
/// are pipelined over a single socket without in-process locking beyond
/// the open/closed state.
#[derive(Clone)]
pub struct RedisStore {
    inner: Arc<Inner>,
}

struct Inner {
    display_url: String,
    connection: RwLock<Option<MultiplexedConnection>>,
}

impl RedisStore {
    /// Opens a connection and verifies it with PING.
    ///
    /// Accepts `redis://[:password@]host:port[/db]`, `rediss://` and
    /// `unix://` URLs.
    ///
    /// # Errors
    /// Returns `ConnectionFailed` if the URL is invalid, the server is
    /// unreachable, or PING fails.
    pub async fn open(url: &str) -> StoreResult<Self> {
        let display_url = redact_url(url);
        let connection_failed = |e: redis::RedisError| StoreError::ConnectionFailed {
            url: display_url.clone(),
            details: e.to_string(),
        };

        let client = Client::open(url).map_err(connection_failed)?;
        let mut connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(connection_failed)?;
        let _: String = redis::cmd("PING")
            .query_async(&mut connection)
            .await
            .map_err(connection_failed)?;

        tracing::info!(url = %display_url, "Connected to store");
        Ok(Self {
            inner: Arc::new(Inner {
                display_url,
                connection: RwLock::new(Some(connection)),
            }),
        })
    }

    /// Connection URL with any password removed
    pub fn url(&self) -> &str {
        &self.inner.display_url
    }

    /// No-op: keys are created on first write and there is no schema to migrate
    pub async fn migrate(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn connection(&self) -> StoreResult<MultiplexedConnection> {
        self.inner
            .connection
            .read()
            .await
            .clone()
            .ok_or(StoreError::ConnectionClosed)
    }
}

#[async_trait]
impl RecordStore for RedisStore {
    async fn ping(&self) -> StoreResult<()> {
        let mut connection = self.connection().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut connection)
            .await
            .map_err(|e| StoreError::ReadFailed {
                key: "PING".to_string(),
                details: e.to_string(),
            })?;
        Ok(())
    }

    async fn execute(&self, batch: CommandBatch) -> StoreResult<()> {
        let mut connection = self.connection().await?;
        if batch.is_empty() {
            return Ok(());
        }

        let mut pipe = redis::pipe();
        for command in batch.commands() {
            match command {
                StoreCommand::HashSet { key, field, value } => {
                    pipe.hset(key, field, value).ignore();
                }
                StoreCommand::SortedSetAdd { key, member, score } => {
                    pipe.zadd(key, member, *score).ignore();
                }
                StoreCommand::Expire { key, ttl } => {
                    let millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
                    pipe.pexpire(key, millis).ignore();
                }
                StoreCommand::Persist { key } => {
                    pipe.persist(key).ignore();
                }
            }
        }

        tracing::debug!(batch = batch.label(), commands = batch.len(), "Executing pipeline");
        let () = pipe
            .query_async(&mut connection)
            .await
            .map_err(|e| StoreError::BatchExecFailed {
                label: batch.label().to_string(),
                committed: 0,
                details: e.to_string(),
            })?;
        Ok(())
    }

    async fn hash_get_all(&self, key: &str) -> StoreResult<HashMap<String, String>> {
        let mut connection = self.connection().await?;
        connection
            .hgetall(key)
            .await
            .map_err(|e| StoreError::ReadFailed {
                key: key.to_string(),
                details: e.to_string(),
            })
    }

    async fn hash_get_all_many(
        &self,
        keys: &[String],
    ) -> StoreResult<Vec<HashMap<String, String>>> {
        let mut connection = self.connection().await?;
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut pipe = redis::pipe();
        for key in keys {
            pipe.hgetall(key);
        }
        pipe.query_async(&mut connection)
            .await
            .map_err(|e| StoreError::ReadFailed {
                key: format!("{} record(s)", keys.len()),
                details: e.to_string(),
            })
    }

    async fn sorted_set_members(&self, key: &str) -> StoreResult<Vec<String>> {
        let mut connection = self.connection().await?;
        connection
            .zrange(key, 0, -1)
            .await
            .map_err(|e| StoreError::ReadFailed {
                key: key.to_string(),
                details: e.to_string(),
            })
    }

    async fn close(&self) -> StoreResult<()> {
        if self.inner.connection.write().await.take().is_some() {
            tracing::debug!(url = %self.inner.display_url, "Closed store connection");
        }
        Ok(())
    }
}

/// Hides the credentials of a connection URL for logs and errors
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cve_tracking::domain::RetentionPolicy;
    use std::time::Duration;

    #[test]
    fn test_redact_url() {
        assert_eq!(
            redact_url("redis://:secret@localhost:6379/0"),
            "redis://***@localhost:6379/0"
        );
        assert_eq!(
            redact_url("redis://127.0.0.1:6379/0"),
            "redis://127.0.0.1:6379/0"
        );
        assert_eq!(redact_url("unix:///tmp/redis.sock"), "unix:///tmp/redis.sock");
    }

    #[tokio::test]
    async fn test_open_invalid_url() {
        let result = RedisStore::open("not a url").await;
        match result {
            Err(StoreError::ConnectionFailed { url, .. }) => assert_eq!(url, "not a url"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected connection failure"),
        }
    }

    #[tokio::test]
    async fn test_open_unreachable_server() {
        let result = RedisStore::open("redis://:hunter2@127.0.0.1:1/0").await;
        match result {
            Err(StoreError::ConnectionFailed { url, .. }) => {
                assert_eq!(url, "redis://***@127.0.0.1:1/0");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected connection failure"),
        }
    }

    /// Needs a disposable Redis database, e.g.
    /// `CVE_STORE_TEST_REDIS_URL=redis://127.0.0.1:6379/15 cargo test -- --ignored`
    #[tokio::test]
    #[ignore]
    async fn test_round_trip_against_redis() {
        let Ok(url) = std::env::var("CVE_STORE_TEST_REDIS_URL") else {
            return;
        };
        let store = RedisStore::open(&url).await.unwrap();
        store.ping().await.unwrap();
        store.migrate().await.unwrap();

        let mut batch = CommandBatch::new("CVE-TEST-0001");
        batch
            .hash_set("CVE#CVE-TEST-0001", "Debian", "{}")
            .retain("CVE#CVE-TEST-0001", RetentionPolicy::from_seconds(30))
            .sorted_set_add("CVE#D#cve-store-test", "CVE-TEST-0001", 0.0)
            .retain("CVE#D#cve-store-test", RetentionPolicy::from_seconds(30));
        store.execute(batch).await.unwrap();

        let record = store.hash_get_all("CVE#CVE-TEST-0001").await.unwrap();
        assert_eq!(record["Debian"], "{}");
        let records = store
            .hash_get_all_many(&["CVE#CVE-TEST-0001".to_string(), "CVE#nope".to_string()])
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[1].is_empty());
        assert_eq!(
            store
                .sorted_set_members("CVE#D#cve-store-test")
                .await
                .unwrap(),
            vec!["CVE-TEST-0001"]
        );

        let mut connection = store.connection().await.unwrap();
        let ttl: i64 = connection.ttl("CVE#CVE-TEST-0001").await.unwrap();
        assert!(ttl > 0 && ttl <= Duration::from_secs(30).as_secs() as i64);

        store.close().await.unwrap();
        store.close().await.unwrap();
        assert!(matches!(
            store.ping().await,
            Err(StoreError::ConnectionClosed)
        ));
    }
}
