//! Memoised position lookups.
//!
//! `PositionCache` is an explicit, injectable memo keyed by
//! `(graha, instant, zodiac mode)`. `CachedProvider` puts one in front of
//! any `PositionProvider`. Neither holds module-level state, so independent
//! scans can share a cache or use their own.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::trace;

use samaya_vedic_base::{ALL_GRAHAS, Graha};

use crate::error::ProviderError;
use crate::provider::{BodyState, GeoLocation, PositionProvider, ZodiacMode};

/// Default number of entries before the cache is flushed.
pub const DEFAULT_CACHE_CAPACITY: usize = 16_384;

/// Cache key: (graha, instant in ms since the Unix epoch, zodiac mode).
type CacheKey = (Graha, i64, ZodiacMode);

/// Hit/miss telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Memo of body states.
///
/// A stored `None` records that the provider had no such body at that
/// instant, so absent bodies are not re-queried either. When an insert
/// would exceed the capacity, the whole map is cleared first.
#[derive(Debug)]
pub struct PositionCache {
    entries: RwLock<HashMap<CacheKey, Option<BodyState>>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for PositionCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl PositionCache {
    /// Empty cache holding at most `capacity` entries (minimum 9).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: capacity.max(ALL_GRAHAS.len()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cached state of one body. `Some(None)` means "known to be absent".
    pub fn get(
        &self,
        graha: Graha,
        instant: DateTime<Utc>,
        mode: ZodiacMode,
    ) -> Option<Option<BodyState>> {
        let map = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&(graha, instant.timestamp_millis(), mode)).copied()
    }

    /// A full snapshot for `instant`, if every graha has an entry.
    pub fn snapshot(&self, instant: DateTime<Utc>, mode: ZodiacMode) -> Option<Vec<BodyState>> {
        let map = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let millis = instant.timestamp_millis();
        let mut states = Vec::with_capacity(ALL_GRAHAS.len());
        for graha in ALL_GRAHAS {
            if let Some(state) = map.get(&(graha, millis, mode))? {
                states.push(*state);
            }
        }
        Some(states)
    }

    /// Record a full snapshot. Grahas missing from `states` are stored as absent.
    pub fn store_snapshot(&self, instant: DateTime<Utc>, mode: ZodiacMode, states: &[BodyState]) {
        let mut map = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if map.len() + ALL_GRAHAS.len() > self.capacity {
            trace!(entries = map.len(), "position cache flushed");
            map.clear();
        }
        let millis = instant.timestamp_millis();
        for graha in ALL_GRAHAS {
            let state = states.iter().find(|s| s.graha == graha).copied();
            map.insert((graha, millis, mode), state);
        }
    }

    fn record(&self, hit: bool) {
        let counter = if hit { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

/// A provider with a memo in front of it. House cusps pass straight through.
#[derive(Debug, Clone)]
pub struct CachedProvider<P> {
    inner: P,
    cache: Arc<PositionCache>,
}

impl<P: PositionProvider> CachedProvider<P> {
    pub fn new(inner: P, cache: Arc<PositionCache>) -> Self {
        Self { inner, cache }
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<PositionCache> {
        &self.cache
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: PositionProvider> PositionProvider for CachedProvider<P> {
    fn body_states(
        &self,
        instant: DateTime<Utc>,
        mode: ZodiacMode,
    ) -> Result<Vec<BodyState>, ProviderError> {
        if let Some(states) = self.cache.snapshot(instant, mode) {
            self.cache.record(true);
            return Ok(states);
        }
        self.cache.record(false);
        let states = self.inner.body_states(instant, mode)?;
        self.cache.store_snapshot(instant, mode, &states);
        Ok(states)
    }

    fn house_cusps(
        &self,
        instant: DateTime<Utc>,
        location: &GeoLocation,
        mode: ZodiacMode,
    ) -> Result<[f64; 12], ProviderError> {
        self.inner.house_cusps(instant, location, mode)
    }

    fn body_state(
        &self,
        graha: Graha,
        instant: DateTime<Utc>,
        mode: ZodiacMode,
    ) -> Result<BodyState, ProviderError> {
        let cached = match self.cache.get(graha, instant, mode) {
            Some(entry) => {
                self.cache.record(true);
                entry
            }
            None => {
                self.cache.record(false);
                let states = self.inner.body_states(instant, mode)?;
                self.cache.store_snapshot(instant, mode, &states);
                states.into_iter().find(|s| s.graha == graha)
            }
        };
        cached.ok_or_else(|| ProviderError::MissingBody {
            graha: graha.english_name(),
            instant: instant.to_rfc3339(),
        })
    }
}
