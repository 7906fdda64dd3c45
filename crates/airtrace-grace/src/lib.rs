//! Airtrace Grace - Bounded grace period for vanishing series
//!
//! This crate provides the grace cache used with the reconciliation engine.
//! A series that stops showing up in scans is not removed from the chart
//! straight away; it trails towards the floor for a number of ticks first.
//!
//! # States
//!
//! Each tracked identity carries an explicit [`SeriesState`]:
//!
//! ```text
//!            reset                 add
//!   Active ◀────────── Vanishing ◀──────  Active / untracked
//!                        │  ▲
//!                        └──┘ add (not_seen + 1)
//!                        │
//!                        └──▶ expired on clear once not_seen > max_not_seen
//! ```
//!
//! # Example
//!
//! ```rust
//! use airtrace_core::{Detail, GraceCache};
//! use airtrace_grace::{GraceConfig, NotSeenCache};
//!
//! let mut cache = NotSeenCache::new(GraceConfig::bounded(2));
//! let detail = Detail::new("home", "aa:bb", -60);
//!
//! cache.add(&detail).unwrap();
//! cache.clear().unwrap();
//! assert!(cache.active().unwrap().contains(&detail));
//!
//! cache.reset(&detail).unwrap();
//! assert!(cache.active().unwrap().is_empty());
//! ```

use airtrace_core::{Detail, DetailKey, GraceCache, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// Ticks a series may stay missing before it is dropped
pub const MAX_NOT_SEEN_COUNT: u32 = 20;

/// How long vanishing series are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GracePolicy {
    /// Expire after more than `max_not_seen` consecutive missed ticks
    Bounded { max_not_seen: u32 },
    /// Keep until the series is seen again
    Unbounded,
}

impl Default for GracePolicy {
    fn default() -> Self {
        GracePolicy::Bounded {
            max_not_seen: MAX_NOT_SEEN_COUNT,
        }
    }
}

/// Configuration for [`NotSeenCache`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraceConfig {
    pub policy: GracePolicy,
}

impl GraceConfig {
    /// Expire after `max_not_seen` missed ticks
    pub fn bounded(max_not_seen: u32) -> Self {
        Self {
            policy: GracePolicy::Bounded { max_not_seen },
        }
    }

    /// Never expire
    pub fn unbounded() -> Self {
        Self {
            policy: GracePolicy::Unbounded,
        }
    }
}

/// Lifecycle of one series identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesState {
    /// Seen on the last tick that mentioned it
    Active,
    /// Missing for `not_seen` consecutive ticks
    Vanishing { not_seen: u32 },
}

#[derive(Debug, Clone)]
struct Entry {
    detail: Detail,
    state: SeriesState,
}

/// Grace cache counting consecutive missed ticks per series
#[derive(Debug, Default)]
pub struct NotSeenCache {
    entries: BTreeMap<DetailKey, Entry>,
    config: GraceConfig,
    expired_total: u64,
}

impl NotSeenCache {
    /// Create an empty cache
    pub fn new(config: GraceConfig) -> Self {
        Self {
            entries: BTreeMap::new(),
            config,
            expired_total: 0,
        }
    }

    /// Current state of a series, if tracked
    pub fn state(&self, key: &DetailKey) -> Option<SeriesState> {
        self.entries.get(key).map(|e| e.state)
    }

    /// Number of tracked series in any state
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn config(&self) -> &GraceConfig {
        &self.config
    }

    /// Get statistics about the cache
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            tracked: self.entries.len(),
            vanishing: self
                .entries
                .values()
                .filter(|e| matches!(e.state, SeriesState::Vanishing { .. }))
                .count(),
            expired_total: self.expired_total,
        }
    }

    fn within_grace(&self, state: SeriesState) -> bool {
        match (state, self.config.policy) {
            (SeriesState::Active, _) => false,
            (SeriesState::Vanishing { .. }, GracePolicy::Unbounded) => true,
            (SeriesState::Vanishing { not_seen }, GracePolicy::Bounded { max_not_seen }) => {
                not_seen <= max_not_seen
            }
        }
    }

    fn expired(&self, state: SeriesState) -> bool {
        matches!(state, SeriesState::Vanishing { .. }) && !self.within_grace(state)
    }
}

impl GraceCache for NotSeenCache {
    fn active(&self) -> Result<BTreeSet<Detail>> {
        Ok(self
            .entries
            .values()
            .filter(|e| self.within_grace(e.state))
            .map(|e| e.detail.clone())
            .collect())
    }

    fn add(&mut self, detail: &Detail) -> Result<()> {
        let entry = self
            .entries
            .entry(detail.key.clone())
            .or_insert_with(|| Entry {
                detail: detail.clone(),
                state: SeriesState::Active,
            });
        entry.state = match entry.state {
            SeriesState::Active => SeriesState::Vanishing { not_seen: 1 },
            SeriesState::Vanishing { not_seen } => SeriesState::Vanishing {
                not_seen: not_seen.saturating_add(1),
            },
        };
        trace!(series = %detail.key, state = ?entry.state, "not seen");
        Ok(())
    }

    fn reset(&mut self, detail: &Detail) -> Result<()> {
        let entry = Entry {
            detail: detail.clone(),
            state: SeriesState::Active,
        };
        if let Some(previous) = self.entries.insert(detail.key.clone(), entry) {
            if previous.state != SeriesState::Active {
                trace!(series = %detail.key, "seen again");
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let expired: Vec<DetailKey> = self
            .entries
            .iter()
            .filter(|(_, e)| self.expired(e.state))
            .map(|(k, _)| k.clone())
            .collect();
        for key in &expired {
            self.entries.remove(key);
            debug!(series = %key, "grace period expired");
        }
        self.expired_total += expired.len() as u64;
        Ok(())
    }
}

/// Statistics about a grace cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Series tracked in any state
    pub tracked: usize,
    /// Series currently vanishing (within grace or awaiting expiry)
    pub vanishing: usize,
    /// Series dropped since the cache was created
    pub expired_total: u64,
}
