//! Statistics tracking for the resolver.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Atomic counters for resolver activity.
pub struct Stats {
    pub queries: AtomicU64,
    pub cache_hits: AtomicU64,
    pub resolved: AtomicU64,
    pub failed: AtomicU64,
    pub upstream_queries: AtomicU64,
    /// Cumulative response time in microseconds for averaging.
    total_response_time_us: AtomicU64,
}

impl Stats {
    pub fn new() -> Self {
        Self {
            queries: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            resolved: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            upstream_queries: AtomicU64::new(0),
            total_response_time_us: AtomicU64::new(0),
        }
    }

    pub fn record_query(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self, response_time_ms: f64) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
        self.total_response_time_us
            .fetch_add((response_time_ms * 1000.0) as u64, Ordering::Relaxed);
    }

    pub fn record_resolved(&self, response_time_ms: f64) {
        self.resolved.fetch_add(1, Ordering::Relaxed);
        self.total_response_time_us
            .fetch_add((response_time_ms * 1000.0) as u64, Ordering::Relaxed);
    }

    pub fn record_failed(&self, response_time_ms: f64) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        self.total_response_time_us
            .fetch_add((response_time_ms * 1000.0) as u64, Ordering::Relaxed);
    }

    pub fn record_upstream_query(&self) {
        self.upstream_queries.fetch_add(1, Ordering::Relaxed);
    }

    /// Cumulative snapshot since startup.
    pub fn snapshot(&self) -> StatsSnapshot {
        let queries = self.queries.load(Ordering::Relaxed);
        let total_us = self.total_response_time_us.load(Ordering::Relaxed);

        let avg_response_ms = if queries > 0 {
            (total_us as f64 / queries as f64) / 1000.0
        } else {
            0.0
        };

        StatsSnapshot {
            queries,
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            resolved: self.resolved.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            upstream_queries: self.upstream_queries.load(Ordering::Relaxed),
            avg_response_ms,
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub queries: u64,
    pub cache_hits: u64,
    pub resolved: u64,
    pub failed: u64,
    pub upstream_queries: u64,
    pub avg_response_ms: f64,
}
