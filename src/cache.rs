// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Auth Gateway Authors

//! In-process TTL store for short-lived derived credentials.
//!
//! Holds the per-session service token and user id written at login. Entries
//! expire independently; an expired entry reads as absent and is evicted on
//! the way out. The store is bounded, so long-dead sessions fall off the end
//! instead of accumulating.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;

/// Default number of live sessions the cache will hold.
const DEFAULT_CAPACITY: usize = 1024;

/// Cached entry: value + absolute expiry.
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// Process-wide key-value store with per-entry TTL.
pub struct CredentialCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
}

impl CredentialCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap()),
            )),
        }
    }

    /// Read a key. Returns `None` if the key is missing or its TTL elapsed.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().ok()?;
        if let Some(entry) = entries.get(key) {
            if Instant::now() < entry.expires_at {
                return Some(entry.value.clone());
            }
            // Expired - remove it
            entries.pop(key);
        }
        None
    }

    /// Write a key, overwriting unconditionally.
    pub fn set(&self, key: &str, value: impl Into<String>, ttl: Duration) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(
                key.to_string(),
                CacheEntry {
                    value: value.into(),
                    expires_at: Instant::now() + ttl,
                },
            );
        }
    }
}

impl Default for CredentialCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_value() {
        let cache = CredentialCache::new();
        assert!(cache.get("service_token:abc").is_none());

        cache.set("service_token:abc", "jwt", Duration::from_secs(300));
        assert_eq!(cache.get("service_token:abc").as_deref(), Some("jwt"));
    }

    #[test]
    fn get_on_unset_key_is_absent() {
        let cache = CredentialCache::new();
        assert!(cache.get("never-written").is_none());
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = CredentialCache::new();
        cache.set("service_token:abc", "jwt", Duration::from_millis(1));

        std::thread::sleep(Duration::from_millis(5));

        assert!(cache.get("service_token:abc").is_none());
    }

    #[test]
    fn set_overwrites_existing_entry() {
        let cache = CredentialCache::new();
        cache.set("current_user:abc", "user-1", Duration::from_secs(300));
        cache.set("current_user:abc", "user-2", Duration::from_secs(300));

        assert_eq!(cache.get("current_user:abc").as_deref(), Some("user-2"));
    }

    #[test]
    fn keys_expire_independently() {
        let cache = CredentialCache::new();
        cache.set("a", "1", Duration::from_millis(1));
        cache.set("b", "2", Duration::from_secs(300));

        std::thread::sleep(Duration::from_millis(5));

        assert!(cache.get("a").is_none());
        assert_eq!(cache.get("b").as_deref(), Some("2"));
    }
}
