//! Self-healing proxy pool.
//!
//! One shared, stateful resource next to an otherwise pure core: the request
//! layer asks for a proxy per outbound attempt and reports the outcome back.
//! Failures blacklist a proxy, a later success on the same identifier lifts
//! the blacklist, and rotation keeps traffic spread across whatever is still
//! healthy. The pool never grows or shrinks after loading.

use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::error::Result;

/// Counters and pool sizes for external reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProxyStats {
    pub total_requests: u64,
    pub successful: u64,
    pub failed: u64,
    pub blacklisted_proxies: usize,
    pub available_proxies: usize,
}

#[derive(Debug, Default)]
struct PoolState {
    cursor: usize,
    blacklist: HashSet<String>,
    total: u64,
    success: u64,
    failed: u64,
}

/// Rotating set of outbound proxy endpoints with blacklist-on-failure and
/// recovery-on-success.
///
/// Membership is fixed at load time; only the blacklist subset and the
/// counters change. All mutable state sits behind a single mutex, so
/// [`acquire`](Self::acquire) and the two report calls are atomic with
/// respect to each other however many in-flight requests share the pool.
#[derive(Debug)]
pub struct ProxyPool {
    proxies: Vec<String>,
    state: Mutex<PoolState>,
}

impl ProxyPool {
    pub fn new(proxies: Vec<String>) -> Self {
        Self {
            proxies,
            state: Mutex::new(PoolState::default()),
        }
    }

    /// Load a pool from a line-oriented list. Blank lines and `#` comment
    /// lines are ignored.
    pub fn load(reader: impl BufRead) -> Result<Self> {
        let mut proxies = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            proxies.push(line.to_string());
        }
        info!(count = proxies.len(), "loaded proxy list");
        Ok(Self::new(proxies))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(BufReader::new(File::open(path)?))
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    // A poisoned lock only means another thread panicked mid-update of
    // counters; the pool data itself stays usable.
    fn state(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Next proxy in rotation order that is not blacklisted, scanning at most
    /// once around the pool. `None` when the pool is empty or everything is
    /// blacklisted; the caller decides whether to go direct or fail.
    pub fn acquire(&self) -> Option<String> {
        if self.proxies.is_empty() {
            return None;
        }
        let mut state = self.state();
        for _ in 0..self.proxies.len() {
            let idx = state.cursor % self.proxies.len();
            state.cursor = state.cursor.wrapping_add(1);
            let proxy = &self.proxies[idx];
            if !state.blacklist.contains(proxy) {
                state.total += 1;
                debug!(proxy, "proxy acquired");
                return Some(proxy.clone());
            }
        }
        None
    }

    /// Record a successful use. A blacklisted proxy that works again is
    /// recovered into rotation.
    pub fn report_success(&self, proxy: &str) {
        let mut state = self.state();
        state.success += 1;
        if state.blacklist.remove(proxy) {
            info!(proxy, "proxy recovered, removed from blacklist");
        }
    }

    /// Record a failed use and blacklist the proxy.
    pub fn report_failure(&self, proxy: &str) {
        let mut state = self.state();
        state.failed += 1;
        if state.blacklist.insert(proxy.to_string()) {
            warn!(proxy, "proxy blacklisted after failure");
        }
    }

    /// Whether at least one non-blacklisted proxy remains, i.e. whether a
    /// failure policy can still transparently retry a request.
    pub fn has_available(&self) -> bool {
        self.state().blacklist.len() < self.proxies.len()
    }

    pub fn stats(&self) -> ProxyStats {
        let state = self.state();
        ProxyStats {
            total_requests: state.total,
            successful: state.success,
            failed: state.failed,
            blacklisted_proxies: state.blacklist.len(),
            available_proxies: self.proxies.len() - state.blacklist.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn pool() -> ProxyPool {
        ProxyPool::new(vec![
            "http://p1:8080".to_string(),
            "http://p2:8080".to_string(),
            "http://p3:8080".to_string(),
        ])
    }

    #[test]
    fn load_skips_blanks_and_comments() {
        let list = "# upstream list\nhttp://p1:8080\n\n  \nhttp://p2:8080\n# trailing\n";
        let pool = ProxyPool::load(Cursor::new(list)).unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn rotation_visits_distinct_proxies() {
        let pool = pool();
        let seen: HashSet<String> = (0..6).filter_map(|_| pool.acquire()).collect();
        assert!(seen.len() >= 2, "rotation should not pin a single proxy");
    }

    #[test]
    fn blacklisted_proxy_is_skipped() {
        let pool = pool();
        pool.report_failure("http://p1:8080");
        for _ in 0..10 {
            assert_ne!(pool.acquire().as_deref(), Some("http://p1:8080"));
        }
    }

    #[test]
    fn success_recovers_a_blacklisted_proxy() {
        let pool = pool();
        pool.report_failure("http://p1:8080");
        pool.report_success("http://p1:8080");
        let seen: HashSet<String> = (0..6).filter_map(|_| pool.acquire()).collect();
        assert!(seen.contains("http://p1:8080"));
    }

    #[test]
    fn exhausted_pool_returns_none() {
        let pool = pool();
        for p in ["http://p1:8080", "http://p2:8080", "http://p3:8080"] {
            pool.report_failure(p);
        }
        assert_eq!(pool.acquire(), None);
        assert!(!pool.has_available());

        // One recovery puts the pool back in business.
        pool.report_success("http://p2:8080");
        assert_eq!(pool.acquire().as_deref(), Some("http://p2:8080"));
        assert!(pool.has_available());
    }

    #[test]
    fn empty_pool_never_yields() {
        let pool = ProxyPool::new(Vec::new());
        assert_eq!(pool.acquire(), None);
        assert!(!pool.has_available());
    }

    #[test]
    fn stats_track_outcomes() {
        let pool = pool();
        let p = pool.acquire().unwrap();
        pool.report_success(&p);
        let p = pool.acquire().unwrap();
        pool.report_failure(&p);

        let stats = pool.stats();
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.successful, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.blacklisted_proxies, 1);
        assert_eq!(stats.available_proxies, 2);
    }

    #[test]
    fn concurrent_use_keeps_counters_consistent() {
        use std::sync::Arc;
        use std::thread;

        let pool = Arc::new(pool());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let pool = Arc::clone(&pool);
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    if let Some(p) = pool.acquire() {
                        if i % 3 == 0 {
                            pool.report_failure(&p);
                        } else {
                            pool.report_success(&p);
                        }
                        pool.report_success(&p);
                    }
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        // Every acquired proxy got exactly two reports, so no update was lost.
        let stats = pool.stats();
        assert_eq!(stats.total_requests, (stats.successful + stats.failed) / 2);
        assert!(stats.available_proxies + stats.blacklisted_proxies == 3);
    }
}
