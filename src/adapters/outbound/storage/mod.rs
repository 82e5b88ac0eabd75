/// Record store adapters: Redis and an in-process store with Redis semantics
pub mod in_memory_store;
pub mod redis_store;

pub use in_memory_store::InMemoryStore;
pub use redis_store::RedisStore;
