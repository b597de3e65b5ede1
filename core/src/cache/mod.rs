//! Hash-consing cache of immutable backend state objects
//!
//! One [`StateCache`] per descriptor family. It guarantees:
//! - at most one live backend object per canonical descriptor,
//! - a backend object is never destroyed while referenced,
//! - unreferenced objects wait in a bounded FIFO spare list so that
//!   flip-flopping between a few states does not churn the backend.
//!
//! Entries live in a slab addressed by index. Buckets chain slab indices;
//! the spare list is intrusive (links stored in the entries).

#[cfg(test)]
mod tests;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU32, Ordering};

use glcompat_backend::{Backend, BackendError};
use smallvec::SmallVec;

use crate::error::{Result, StateError};
use crate::state::StateFamily;

/// A descriptor family the cache can intern.
///
/// Implementors define the don't-care rules through [`canonicalize`]; the
/// derived `Hash` and `Eq` are then applied to the canonical form only.
///
/// [`canonicalize`]: CachedState::canonicalize
pub trait CachedState: Clone + Eq + Hash + fmt::Debug {
    /// Owned backend handle of this family
    type Handle;

    const FAMILY: StateFamily;

    /// Overwrite don't-care fields with fixed defaults
    fn canonicalize(&mut self);

    /// Canonicalized copy
    fn canonical(&self) -> Self {
        let mut canonical = self.clone();
        canonical.canonicalize();
        canonical
    }

    /// Build the backend object for this (canonical) descriptor
    fn create<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
    ) -> std::result::Result<Self::Handle, BackendError>;

    fn destroy<B: Backend + ?Sized>(backend: &mut B, handle: Self::Handle);
}

/// Content hash of a canonical descriptor
pub fn hash_state<S: Hash>(state: &S) -> u64 {
    let mut hasher = xxhash_rust::xxh3::Xxh3::new();
    state.hash(&mut hasher);
    hasher.finish()
}

/// Source of per-cache ids, so an entry id never resolves in another cache
static NEXT_CACHE_ID: AtomicU32 = AtomicU32::new(0);

/// Stable identity of a cache entry.
///
/// Only for inspection: an id goes stale once its entry is evicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId {
    cache: u32,
    index: u32,
    generation: u32,
}

/// One counted reference to a cache entry.
///
/// Returned by [`StateCache::acquire`] and consumed by
/// [`StateCache::release`]. Not `Clone`: every reference is released exactly
/// once.
#[must_use = "cache references must be released"]
pub struct EntryRef<S> {
    id: EntryId,
    _state: PhantomData<fn() -> S>,
}

impl<S> EntryRef<S> {
    pub fn id(&self) -> EntryId {
        self.id
    }
}

impl<S> fmt::Debug for EntryRef<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntryRef").field(&self.id).finish()
    }
}

/// Counters for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub allocation_failures: u64,
}

struct Entry<S: CachedState> {
    state: S,
    handle: S::Handle,
    hash: u64,
    refs: u32,
    // Spare list links, toward the head (newer) and the tail (older)
    newer: Option<u32>,
    older: Option<u32>,
}

struct Slot<S: CachedState> {
    generation: u32,
    entry: Option<Entry<S>>,
}

/// Deduplicating, reference-counted cache for one state family
pub struct StateCache<S: CachedState> {
    id: u32,
    slots: Vec<Slot<S>>,
    vacant: Vec<u32>,
    buckets: Vec<SmallVec<[u32; 2]>>,
    spare_head: Option<u32>,
    spare_tail: Option<u32>,
    spare_len: usize,
    spare_limit: usize,
    live: usize,
    stats: CacheStats,
}

impl<S: CachedState> fmt::Debug for StateCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCache")
            .field("family", &S::FAMILY)
            .field("live", &self.live)
            .field("spare", &self.spare_len)
            .field("spare_limit", &self.spare_limit)
            .field("buckets", &self.buckets.len())
            .finish()
    }
}

impl<S: CachedState> StateCache<S> {
    /// Create an empty cache. A zero bucket count is treated as one.
    pub fn new(bucket_count: usize, spare_limit: usize) -> Self {
        let mut buckets = Vec::new();
        buckets.resize_with(bucket_count.max(1), SmallVec::new);
        Self {
            id: NEXT_CACHE_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            vacant: Vec::new(),
            buckets,
            spare_head: None,
            spare_tail: None,
            spare_len: 0,
            spare_limit,
            live: 0,
            stats: CacheStats::default(),
        }
    }

    // ========================================================================
    // Acquire / release
    // ========================================================================

    /// Get a referenced entry for `state`, creating the backend object on a
    /// miss.
    ///
    /// On failure the cache is left exactly as it was.
    pub fn acquire<B: Backend + ?Sized>(
        &mut self,
        backend: &mut B,
        state: &S,
    ) -> Result<EntryRef<S>> {
        let canonical = state.canonical();
        let hash = hash_state(&canonical);

        if let Some(index) = self.find_index(&canonical, hash) {
            self.stats.hits += 1;
            if self.entry(index).refs == 0 {
                self.unlink_spare(index);
            }
            let entry = self.entry_mut(index);
            entry.refs += 1;
            tracing::trace!(family = %S::FAMILY, refs = entry.refs, "state cache hit");
            return Ok(self.make_ref(index));
        }

        self.stats.misses += 1;
        let handle = match canonical.create(backend) {
            Ok(handle) => handle,
            Err(err) => {
                self.stats.allocation_failures += 1;
                tracing::warn!(family = %S::FAMILY, "backend allocation failed: {}", err);
                return Err(StateError::from_backend(S::FAMILY.name(), &err));
            }
        };

        let index = self.insert(Entry {
            state: canonical,
            handle,
            hash,
            refs: 1,
            newer: None,
            older: None,
        });
        let bucket = self.bucket_of(hash);
        self.buckets[bucket].push(index);
        self.live += 1;
        tracing::debug!(
            family = %S::FAMILY,
            live = self.live,
            "created backend state object"
        );
        Ok(self.make_ref(index))
    }

    /// Drop one reference. An entry with no references left joins the spare
    /// list; if that overflows, the oldest spare entry is destroyed.
    ///
    /// # Panics
    ///
    /// Panics if `entry` was not handed out by this cache.
    pub fn release<B: Backend + ?Sized>(&mut self, backend: &mut B, entry: EntryRef<S>) {
        let index = self.resolve(entry.id);
        let refs = self.entry(index).refs;
        if refs == 0 {
            tracing::error!(family = %S::FAMILY, "released an unreferenced cache entry");
            if cfg!(debug_assertions) {
                panic!("released an unreferenced {} entry", S::FAMILY);
            }
            return;
        }

        self.entry_mut(index).refs = refs - 1;
        if refs == 1 {
            self.push_spare(index);
            self.trim_spares(backend);
        }
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Backend handle of a referenced entry
    pub fn handle(&self, entry: &EntryRef<S>) -> &S::Handle {
        &self.entry(self.resolve(entry.id)).handle
    }

    /// Canonical descriptor of a referenced entry
    pub fn state(&self, entry: &EntryRef<S>) -> &S {
        &self.entry(self.resolve(entry.id)).state
    }

    /// Look up the live entry equal to `state` without touching its count
    pub fn find(&self, state: &S) -> Option<EntryId> {
        let canonical = state.canonical();
        let hash = hash_state(&canonical);
        self.find_index(&canonical, hash).map(|index| self.id_of(index))
    }

    /// Reference count of a live entry; `None` once it has been destroyed
    pub fn ref_count(&self, id: EntryId) -> Option<u32> {
        self.live_entry(id).map(|entry| entry.refs)
    }

    /// Whether a live entry currently sits in the spare list
    pub fn is_spare(&self, id: EntryId) -> bool {
        self.live_entry(id).is_some_and(|entry| entry.refs == 0)
    }

    /// Number of live entries (referenced or spare)
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn spare_len(&self) -> usize {
        self.spare_len
    }

    pub fn spare_limit(&self) -> usize {
        self.spare_limit
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    // ========================================================================
    // Tuning
    // ========================================================================

    /// Change the spare bound, evicting down to it immediately
    pub fn set_spare_limit<B: Backend + ?Sized>(&mut self, backend: &mut B, limit: usize) {
        tracing::debug!(
            family = %S::FAMILY,
            from = self.spare_limit,
            to = limit,
            "spare limit changed"
        );
        self.spare_limit = limit;
        self.trim_spares(backend);
    }

    /// Destroy every unreferenced entry. Returns how many were destroyed.
    pub fn purge<B: Backend + ?Sized>(&mut self, backend: &mut B) -> usize {
        let mut destroyed = 0;
        while self.evict_oldest(backend) {
            destroyed += 1;
        }
        destroyed
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn bucket_of(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    fn find_index(&self, canonical: &S, hash: u64) -> Option<u32> {
        self.buckets[self.bucket_of(hash)]
            .iter()
            .copied()
            .find(|&index| {
                let entry = self.entry(index);
                entry.hash == hash && entry.state == *canonical
            })
    }

    fn insert(&mut self, entry: Entry<S>) -> u32 {
        if let Some(index) = self.vacant.pop() {
            self.slots[index as usize].entry = Some(entry);
            return index;
        }
        let index = u32::try_from(self.slots.len())
            .unwrap_or_else(|_| panic!("{} cache exceeded u32::MAX entries", S::FAMILY));
        self.slots.push(Slot {
            generation: 0,
            entry: Some(entry),
        });
        index
    }

    fn id_of(&self, index: u32) -> EntryId {
        EntryId {
            cache: self.id,
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    fn make_ref(&self, index: u32) -> EntryRef<S> {
        EntryRef {
            id: self.id_of(index),
            _state: PhantomData,
        }
    }

    fn live_entry(&self, id: EntryId) -> Option<&Entry<S>> {
        if id.cache != self.id {
            return None;
        }
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entry.as_ref())
    }

    fn resolve(&self, id: EntryId) -> u32 {
        if self.live_entry(id).is_none() {
            panic!("{:?} does not belong to this {} cache", id, S::FAMILY);
        }
        id.index
    }

    fn entry(&self, index: u32) -> &Entry<S> {
        self.slots[index as usize]
            .entry
            .as_ref()
            .unwrap_or_else(|| panic!("{} cache slot {} is vacant", S::FAMILY, index))
    }

    fn entry_mut(&mut self, index: u32) -> &mut Entry<S> {
        self.slots[index as usize]
            .entry
            .as_mut()
            .unwrap_or_else(|| panic!("{} cache slot {} is vacant", S::FAMILY, index))
    }

    fn push_spare(&mut self, index: u32) {
        let head = self.spare_head;
        {
            let entry = self.entry_mut(index);
            entry.newer = None;
            entry.older = head;
        }
        match head {
            Some(head) => self.entry_mut(head).newer = Some(index),
            None => self.spare_tail = Some(index),
        }
        self.spare_head = Some(index);
        self.spare_len += 1;
    }

    fn unlink_spare(&mut self, index: u32) {
        let (newer, older) = {
            let entry = self.entry_mut(index);
            (entry.newer.take(), entry.older.take())
        };
        match newer {
            Some(newer) => self.entry_mut(newer).older = older,
            None => self.spare_head = older,
        }
        match older {
            Some(older) => self.entry_mut(older).newer = newer,
            None => self.spare_tail = newer,
        }
        self.spare_len -= 1;
    }

    fn trim_spares<B: Backend + ?Sized>(&mut self, backend: &mut B) {
        while self.spare_len > self.spare_limit {
            self.evict_oldest(backend);
        }
    }

    /// Destroy the oldest spare entry. Returns false if there was none.
    fn evict_oldest<B: Backend + ?Sized>(&mut self, backend: &mut B) -> bool {
        let Some(index) = self.spare_tail else {
            return false;
        };
        self.unlink_spare(index);

        let hash = self.entry(index).hash;
        let bucket = self.bucket_of(hash);
        if let Some(position) = self.buckets[bucket].iter().position(|&i| i == index) {
            self.buckets[bucket].swap_remove(position);
        }

        let slot = &mut self.slots[index as usize];
        let Some(entry) = slot.entry.take() else {
            return false;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(index);
        self.live -= 1;
        self.stats.evictions += 1;

        S::destroy(backend, entry.handle);
        tracing::debug!(
            family = %S::FAMILY,
            live = self.live,
            "evicted backend state object"
        );
        true
    }

    /// Check every structural invariant. Test-only.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut live = 0;
        let mut spare = 0;
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(entry) = &slot.entry else {
                continue;
            };
            live += 1;
            if entry.refs == 0 {
                spare += 1;
            }
            let index = index as u32;
            let holders = self
                .buckets
                .iter()
                .flatten()
                .filter(|&&i| i == index)
                .count();
            assert_eq!(holders, 1, "entry {index} must be in exactly one bucket");
            assert!(
                self.buckets[self.bucket_of(entry.hash)].contains(&index),
                "entry {index} is in the wrong bucket"
            );
            assert_eq!(entry.hash, hash_state(&entry.state));
        }
        assert_eq!(live, self.live);
        assert_eq!(spare, self.spare_len);
        assert!(self.spare_len <= self.spare_limit);

        // Walk the spare list head to tail
        let mut walked = 0;
        let mut cursor = self.spare_head;
        let mut previous = None;
        while let Some(index) = cursor {
            let entry = self.entry(index);
            assert_eq!(entry.refs, 0, "referenced entry {index} in spare list");
            assert_eq!(entry.newer, previous);
            previous = Some(index);
            cursor = entry.older;
            walked += 1;
        }
        assert_eq!(previous, self.spare_tail);
        assert_eq!(walked, self.spare_len);

        // No two live entries share a canonical value
        let states: Vec<&S> = self
            .slots
            .iter()
            .filter_map(|slot| slot.entry.as_ref())
            .map(|entry| &entry.state)
            .collect();
        for (i, a) in states.iter().enumerate() {
            for b in &states[i + 1..] {
                assert_ne!(a, b, "duplicate live entries");
            }
        }
    }
}

impl<S: CachedState> Drop for StateCache<S> {
    fn drop(&mut self) {
        if self.live > 0 {
            tracing::warn!(
                family = %S::FAMILY,
                live = self.live,
                "state cache dropped with live backend objects"
            );
        }
    }
}
