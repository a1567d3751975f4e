//! Prepared statement caching keyed by rendered SQL.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tokio_postgres::{Client, Row, Statement};

use crate::error::{SqlError, SqlResult};
use crate::runner::{Runner, params_ref};
use crate::value::Value;

/// Statement cache options.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached statements. 0 disables caching.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// LRU map from SQL text to a prepared handle.
///
/// Every hit stamps the entry with a fresh tick; eviction drops the entry with
/// the oldest stamp. `insert_if_absent` keeps the first handle stored for a
/// key, so concurrent preparers converge on one statement.
#[derive(Debug)]
pub struct StatementCache<S> {
    inner: Mutex<CacheInner<S>>,
}

#[derive(Debug)]
struct CacheInner<S> {
    capacity: usize,
    tick: u64,
    entries: HashMap<String, (S, u64)>,
}

impl<S: Clone> StatementCache<S> {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                capacity: config.capacity,
                tick: 0,
                entries: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner<S>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached handle for `key`, marking it most recently used.
    pub fn get(&self, key: &str) -> Option<S> {
        let mut inner = self.lock();
        let tick = inner.next_tick();
        let (stmt, used) = inner.entries.get_mut(key)?;
        *used = tick;
        Some(stmt.clone())
    }

    /// Store `stmt` unless `key` is already cached; returns the cached handle.
    pub fn insert_if_absent(&self, key: String, stmt: S) -> S {
        let mut inner = self.lock();
        if inner.capacity == 0 {
            return stmt;
        }

        let tick = inner.next_tick();
        if let Some((existing, used)) = inner.entries.get_mut(&key) {
            *used = tick;
            return existing.clone();
        }

        if inner.entries.len() >= inner.capacity {
            inner.evict_oldest();
        }
        inner.entries.insert(key, (stmt.clone(), tick));
        stmt
    }

    pub fn remove(&self, key: &str) -> Option<S> {
        self.lock().entries.remove(key).map(|(stmt, _)| stmt)
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> CacheInner<S> {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, (_, used))| *used)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            tracing::trace!(target: "sqlfluent.sql", sql = %key, "statement cache eviction");
            self.entries.remove(&key);
        }
    }
}

/// A [`Runner`] that prepares each distinct SQL text once per connection.
#[derive(Debug)]
pub struct StmtCacher {
    client: Client,
    cache: StatementCache<Statement>,
}

impl StmtCacher {
    pub fn new(client: Client) -> Self {
        Self::with_config(client, CacheConfig::default())
    }

    pub fn with_config(client: Client, config: CacheConfig) -> Self {
        Self {
            client,
            cache: StatementCache::new(config),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn into_inner(self) -> Client {
        self.client
    }

    /// Drop every cached statement.
    pub fn clear(&self) {
        self.cache.clear();
    }

    async fn prepared(&self, sql: &str) -> SqlResult<Statement> {
        if let Some(stmt) = self.cache.get(sql) {
            tracing::trace!(target: "sqlfluent.sql", sql, "statement cache hit");
            return Ok(stmt);
        }
        tracing::trace!(target: "sqlfluent.sql", sql, "statement cache miss");
        let stmt = self.client.prepare(sql).await?;
        Ok(self.cache.insert_if_absent(sql.to_string(), stmt))
    }
}

impl Runner for StmtCacher {
    type Row = Row;

    async fn execute(&self, sql: &str, args: &[Value]) -> SqlResult<u64> {
        let stmt = self.prepared(sql).await?;
        let params = params_ref(args);
        Ok(self.client.execute(&stmt, &params).await?)
    }

    async fn query(&self, sql: &str, args: &[Value]) -> SqlResult<Vec<Row>> {
        let stmt = self.prepared(sql).await?;
        let params = params_ref(args);
        Ok(self.client.query(&stmt, &params).await?)
    }

    async fn query_row(&self, sql: &str, args: &[Value]) -> SqlResult<Row> {
        let stmt = self.prepared(sql).await?;
        let params = params_ref(args);
        self.client
            .query_opt(&stmt, &params)
            .await?
            .ok_or_else(|| SqlError::not_found("query_row returned no rows"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> StatementCache<String> {
        StatementCache::new(CacheConfig::new().with_capacity(capacity))
    }

    #[test]
    fn test_insert_if_absent_keeps_first() {
        let c = cache(4);
        assert_eq!(c.insert_if_absent("q".into(), "first".into()), "first");
        assert_eq!(c.insert_if_absent("q".into(), "second".into()), "first");
        assert_eq!(c.get("q").as_deref(), Some("first"));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_lru_eviction() {
        let c = cache(2);
        c.insert_if_absent("a".into(), "1".into());
        c.insert_if_absent("b".into(), "2".into());
        // touch "a" so "b" is the oldest
        assert!(c.get("a").is_some());
        c.insert_if_absent("c".into(), "3".into());

        assert!(c.get("b").is_none());
        assert!(c.get("a").is_some());
        assert!(c.get("c").is_some());
    }

    #[test]
    fn test_zero_capacity_disables() {
        let c = cache(0);
        assert_eq!(c.insert_if_absent("a".into(), "1".into()), "1");
        assert!(c.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let c = cache(4);
        c.insert_if_absent("a".into(), "1".into());
        c.insert_if_absent("b".into(), "2".into());
        assert_eq!(c.remove("a").as_deref(), Some("1"));
        assert!(c.remove("a").is_none());
        c.clear();
        assert!(c.is_empty());
    }

    #[test]
    fn test_concurrent_inserts_converge() {
        let c = std::sync::Arc::new(cache(8));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let c = std::sync::Arc::clone(&c);
                std::thread::spawn(move || c.insert_if_absent("same".into(), format!("v{i}")))
            })
            .collect();
        let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.iter().all(|r| r == &results[0]));
        assert_eq!(c.len(), 1);
    }
}
