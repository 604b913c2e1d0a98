//! Redis-backed cache for food search results
//!
//! Caching is best-effort: when Redis is unreachable or disabled every
//! lookup is a miss and every store is a no-op. Errors are logged, never
//! returned to callers.

use calorie_tracker_shared::types::FoodSearchResult;
use redis::aio::ConnectionManager;
use tracing::{debug, warn};

const KEY_PREFIX: &str = "food_search";

/// Cache key for a search query, case-insensitive
pub fn search_key(query: &str) -> String {
    format!("{}:{}", KEY_PREFIX, query.trim().to_lowercase())
}

/// Food search cache
#[derive(Clone)]
pub struct SearchCache {
    conn: Option<ConnectionManager>,
    ttl_secs: u64,
}

impl SearchCache {
    pub fn new(conn: Option<ConnectionManager>, ttl_secs: u64) -> Self {
        Self { conn, ttl_secs }
    }

    /// A cache that never stores anything
    pub fn disabled() -> Self {
        Self {
            conn: None,
            ttl_secs: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.conn.is_some() && self.ttl_secs > 0
    }

    /// Look up cached results for a query
    pub async fn get(&self, query: &str) -> Option<Vec<FoodSearchResult>> {
        if !self.is_enabled() {
            return None;
        }
        let mut conn = self.conn.clone()?;
        let key = search_key(query);

        let cached: Option<String> = match redis::cmd("GET")
            .arg(&key)
            .query_async::<_, Option<String>>(&mut conn)
            .await
        {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, key = %key, "Search cache read failed");
                return None;
            }
        };

        match serde_json::from_str(&cached?) {
            Ok(results) => {
                debug!(key = %key, "Search cache hit");
                Some(results)
            }
            Err(e) => {
                warn!(error = %e, key = %key, "Discarding unreadable cache entry");
                None
            }
        }
    }

    /// Store results for a query with the configured TTL
    pub async fn put(&self, query: &str, results: &[FoodSearchResult]) {
        if !self.is_enabled() {
            return;
        }
        let Some(mut conn) = self.conn.clone() else {
            return;
        };
        let key = search_key(query);

        let payload = match serde_json::to_string(results) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to serialize search results for cache");
                return;
            }
        };

        if let Err(e) = redis::cmd("SET")
            .arg(&key)
            .arg(payload)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await
        {
            warn!(error = %e, key = %key, "Search cache write failed");
        }
    }
}
