//! Answer cache in front of the resolution engine.
//!
//! Entries map a question to the answer records of its last successful
//! resolution, expiring after the TTL of the first answer. The backing
//! store sits behind [`CacheStore`], so a network KV with get /
//! set-if-absent / expire semantics can replace the in-process map without
//! touching the engine. The cache is lossy: every store fault degrades to
//! a miss or a non-committing write.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::warn;

use crate::error::CacheError;
use crate::wire::{Question, Record};

/// Outcome of a conditional store write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Stored,
    AlreadyPresent,
}

/// Key-value seam between the cache and its backing store.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores `value` under `key` for `ttl` unless an unexpired value is
    /// already present.
    async fn set_if_absent(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<SetOutcome, CacheError>;

    async fn clear(&self) -> Result<(), CacheError>;
}

struct StoredEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

/// In-process store: concurrent map with absolute expiry instants and lazy
/// eviction on read.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, StoredEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > Instant::now() {
                return Ok(Some(entry.value.clone()));
            }
        } else {
            return Ok(None);
        }
        self.entries.remove(key);
        Ok(None)
    }

    async fn set_if_absent(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<SetOutcome, CacheError> {
        let entry = StoredEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().expires_at > Instant::now() {
                    Ok(SetOutcome::AlreadyPresent)
                } else {
                    occupied.insert(entry);
                    Ok(SetOutcome::Stored)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(entry);
                Ok(SetOutcome::Stored)
            }
        }
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.entries.clear();
        Ok(())
    }
}

/// TTL-bounded mapping from question to answer set.
pub struct AnswerCache {
    store: Arc<dyn CacheStore>,
}

impl AnswerCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Cache key: lowercased qname, numeric qtype and qclass.
    pub(crate) fn key(question: &Question) -> String {
        format!(
            "{}:{}:{}",
            question.name.to_lowercase(),
            question.qtype.to_u16(),
            question.qclass.to_u16()
        )
    }

    /// Looks up the cached answers for `question`. Store and codec faults
    /// are logged and reported as a miss.
    pub async fn get(&self, question: &Question) -> Option<Vec<Record>> {
        let key = Self::key(question);
        let bytes = match self.store.get(&key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(error) => {
                warn!(%key, %error, "cache read failed, treating as miss");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(records) => Some(records),
            Err(error) => {
                warn!(%key, %error, "cache entry undecodable, treating as miss");
                None
            }
        }
    }

    /// Stores `answers` for `question` unless the key already holds an
    /// unexpired entry. The entry lives for the TTL of the first answer.
    /// An empty answer list is a no-op.
    pub async fn set(&self, question: &Question, answers: &[Record]) -> Option<SetOutcome> {
        let first = answers.first()?;
        let key = Self::key(question);
        let value = match serde_json::to_vec(answers) {
            Ok(value) => value,
            Err(error) => {
                warn!(%key, %error, "cache entry unencodable, skipping write");
                return None;
            }
        };
        let ttl = Duration::from_secs(u64::from(first.ttl));
        match self.store.set_if_absent(&key, value, ttl).await {
            Ok(outcome) => Some(outcome),
            Err(error) => {
                warn!(%key, %error, "cache write failed");
                None
            }
        }
    }

    pub async fn clear(&self) {
        if let Err(error) = self.store.clear().await {
            warn!(%error, "cache clear failed");
        }
    }
}
