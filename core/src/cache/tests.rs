use glcompat_backend::{ObjectKind, SoftBackend};

use super::*;
use crate::gl;
use crate::state::{BlendAttachmentState, BlendState, SamplerState};
use crate::test_utils::{sampler, soft_backend};

fn sampler_cache(spare_limit: usize) -> StateCache<SamplerState> {
    StateCache::new(512, spare_limit)
}

fn live_samplers(backend: &SoftBackend) -> usize {
    backend.live_objects_of(ObjectKind::Sampler)
}

// ============================================================================
// Identity and reference counting
// ============================================================================

#[test]
fn test_equal_states_share_one_entry() {
    let mut backend = soft_backend();
    let mut cache = sampler_cache(4);

    let a = cache.acquire(&mut backend, &sampler(1)).unwrap();
    let b = cache.acquire(&mut backend, &sampler(1)).unwrap();

    assert_eq!(a.id(), b.id());
    assert_eq!(cache.handle(&a), cache.handle(&b));
    assert_eq!(cache.ref_count(a.id()), Some(2));
    assert_eq!(cache.len(), 1);
    assert_eq!(backend.stats().created, 1);

    cache.release(&mut backend, a);
    cache.release(&mut backend, b);
    cache.assert_invariants();
}

#[test]
fn test_distinct_states_get_distinct_entries() {
    let mut backend = soft_backend();
    let mut cache = sampler_cache(4);

    let a = cache.acquire(&mut backend, &sampler(1)).unwrap();
    let b = cache.acquire(&mut backend, &sampler(2)).unwrap();

    assert_ne!(a.id(), b.id());
    assert_ne!(cache.handle(&a).raw(), cache.handle(&b).raw());
    assert_eq!(live_samplers(&backend), 2);

    cache.release(&mut backend, a);
    cache.release(&mut backend, b);
    cache.assert_invariants();
}

#[test]
fn test_blend_acquire_release_scenario() {
    let mut backend = soft_backend();
    let mut cache: StateCache<BlendState> = StateCache::new(512, 8);

    let mut desc = BlendState::default();
    desc.attachments[0] = BlendAttachmentState {
        enable: true,
        src_rgb: gl::SRC_ALPHA,
        dst_rgb: gl::ONE_MINUS_SRC_ALPHA,
        ..BlendAttachmentState::default()
    };
    // Differs from `desc` only in a disabled attachment's factors
    let mut variant = desc.clone();
    variant.attachments[3].src_alpha = gl::DST_COLOR;

    let first = cache.acquire(&mut backend, &desc).unwrap();
    let second = cache.acquire(&mut backend, &desc).unwrap();
    let id = first.id();
    let raw = cache.handle(&first).raw();
    assert_eq!(backend.stats().created, 1);
    assert_eq!(cache.ref_count(id), Some(2));

    cache.release(&mut backend, first);
    assert_eq!(cache.ref_count(id), Some(1));
    assert!(backend.is_live(raw));

    cache.release(&mut backend, second);
    assert_eq!(cache.ref_count(id), Some(0));
    assert!(cache.is_spare(id));
    assert!(backend.is_live(raw));
    assert_eq!(backend.stats().destroyed, 0);

    let again = cache.acquire(&mut backend, &variant).unwrap();
    assert_eq!(again.id(), id);
    assert_eq!(cache.handle(&again).raw(), raw);
    assert!(!cache.is_spare(id));
    assert_eq!(cache.spare_len(), 0);
    assert_eq!(backend.stats().created, 1);

    cache.release(&mut backend, again);
    cache.assert_invariants();
}

#[test]
fn test_entry_stores_canonical_state() {
    let mut backend = soft_backend();
    let mut cache: StateCache<BlendState> = StateCache::new(512, 8);

    let mut desc = BlendState::default();
    desc.attachments[0].src_rgb = gl::CONSTANT_ALPHA;
    let entry = cache.acquire(&mut backend, &desc).unwrap();

    assert_eq!(cache.state(&entry), &BlendState::default());
    assert_eq!(cache.find(&BlendState::default()), Some(entry.id()));

    cache.release(&mut backend, entry);
}

// ============================================================================
// Spare list and eviction
// ============================================================================

#[test]
fn test_release_to_zero_does_not_free() {
    let mut backend = soft_backend();
    let mut cache = sampler_cache(4);

    let entry = cache.acquire(&mut backend, &sampler(7)).unwrap();
    let id = entry.id();
    let raw = cache.handle(&entry).raw();
    cache.release(&mut backend, entry);

    assert!(cache.is_spare(id));
    assert_eq!(cache.spare_len(), 1);
    assert_eq!(cache.len(), 1);
    assert!(backend.is_live(raw));
    cache.assert_invariants();
}

#[test]
fn test_spare_list_is_bounded_fifo() {
    let mut backend = soft_backend();
    let mut cache = sampler_cache(2);

    let mut ids = Vec::new();
    for n in 0..3 {
        let entry = cache.acquire(&mut backend, &sampler(n)).unwrap();
        ids.push(entry.id());
        cache.release(&mut backend, entry);
        cache.assert_invariants();
    }

    // Oldest spare went first
    assert_eq!(cache.ref_count(ids[0]), None);
    assert!(cache.is_spare(ids[1]));
    assert!(cache.is_spare(ids[2]));
    assert_eq!(live_samplers(&backend), 2);
    assert_eq!(cache.stats().evictions, 1);
}

#[test]
fn test_reacquired_spare_moves_to_head_on_release() {
    let mut backend = soft_backend();
    let mut cache = sampler_cache(2);

    let a = cache.acquire(&mut backend, &sampler(1)).unwrap();
    let b = cache.acquire(&mut backend, &sampler(2)).unwrap();
    let (a_id, b_id) = (a.id(), b.id());
    cache.release(&mut backend, a);
    cache.release(&mut backend, b);

    // Touch `a` so that `b` becomes the oldest spare
    let a = cache.acquire(&mut backend, &sampler(1)).unwrap();
    assert_eq!(cache.spare_len(), 1);
    cache.release(&mut backend, a);

    let c = cache.acquire(&mut backend, &sampler(3)).unwrap();
    cache.release(&mut backend, c);

    assert_eq!(cache.ref_count(b_id), None);
    assert!(cache.is_spare(a_id));
    cache.assert_invariants();
}

#[test]
fn test_referenced_entries_are_never_evicted() {
    let mut backend = soft_backend();
    let mut cache = sampler_cache(0);

    let held = cache.acquire(&mut backend, &sampler(0)).unwrap();
    for n in 1..10 {
        let entry = cache.acquire(&mut backend, &sampler(n)).unwrap();
        cache.release(&mut backend, entry);
    }

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.ref_count(held.id()), Some(1));
    assert!(backend.is_live(cache.handle(&held).raw()));

    cache.release(&mut backend, held);
    assert!(cache.is_empty());
    assert_eq!(live_samplers(&backend), 0);
}

#[test]
fn test_set_spare_limit_evicts_immediately() {
    let mut backend = soft_backend();
    let mut cache = sampler_cache(8);

    for n in 0..6 {
        let entry = cache.acquire(&mut backend, &sampler(n)).unwrap();
        cache.release(&mut backend, entry);
    }
    assert_eq!(cache.spare_len(), 6);

    cache.set_spare_limit(&mut backend, 2);
    assert_eq!(cache.spare_limit(), 2);
    assert_eq!(cache.spare_len(), 2);
    assert_eq!(live_samplers(&backend), 2);
    // The two most recent survive
    assert!(cache.find(&sampler(5)).is_some());
    assert!(cache.find(&sampler(4)).is_some());
    assert!(cache.find(&sampler(0)).is_none());
    cache.assert_invariants();
}

#[test]
fn test_purge_destroys_only_spares() {
    let mut backend = soft_backend();
    let mut cache = sampler_cache(8);

    let held = cache.acquire(&mut backend, &sampler(100)).unwrap();
    for n in 0..3 {
        let entry = cache.acquire(&mut backend, &sampler(n)).unwrap();
        cache.release(&mut backend, entry);
    }

    assert_eq!(cache.purge(&mut backend), 3);
    assert_eq!(cache.len(), 1);
    assert_eq!(live_samplers(&backend), 1);

    cache.release(&mut backend, held);
    assert_eq!(cache.purge(&mut backend), 1);
    assert!(cache.is_empty());
    assert_eq!(backend.live_objects(), 0);
}

// ============================================================================
// Failure handling
// ============================================================================

#[test]
fn test_allocation_failure_leaves_cache_unchanged() {
    let mut backend = soft_backend();
    let mut cache = sampler_cache(4);

    let kept = cache.acquire(&mut backend, &sampler(1)).unwrap();
    let spare = cache.acquire(&mut backend, &sampler(2)).unwrap();
    cache.release(&mut backend, spare);

    backend.fail_next_allocations(1);
    let err = cache.acquire(&mut backend, &sampler(3)).unwrap_err();
    assert_eq!(err, StateError::OutOfMemory { what: "sampler" });
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.spare_len(), 1);
    assert_eq!(cache.find(&sampler(3)), None);
    assert_eq!(cache.stats().allocation_failures, 1);
    cache.assert_invariants();

    // A hit never touches the backend allocator
    backend.fail_next_allocations(1);
    let hit = cache.acquire(&mut backend, &sampler(2)).unwrap();
    assert_eq!(cache.spare_len(), 0);

    cache.release(&mut backend, hit);
    cache.release(&mut backend, kept);
}

#[test]
#[should_panic(expected = "does not belong to this sampler cache")]
fn test_release_into_foreign_cache_panics() {
    let mut backend = SoftBackend::new();
    let mut cache = sampler_cache(4);
    let mut other = sampler_cache(4);

    let entry = cache.acquire(&mut backend, &sampler(1)).unwrap();
    other.release(&mut backend, entry);
}

#[test]
fn test_foreign_entry_never_frees_a_live_slot() {
    let mut backend = SoftBackend::new();
    let mut cache = sampler_cache(0);
    let mut other = sampler_cache(0);

    // Same slot index in both caches
    let ours = cache.acquire(&mut backend, &sampler(1)).unwrap();
    let theirs = other.acquire(&mut backend, &sampler(2)).unwrap();
    let theirs_raw = other.handle(&theirs).raw();

    assert_eq!(other.ref_count(ours.id()), None);
    assert!(!other.is_spare(ours.id()));

    let released = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        other.release(&mut backend, ours);
    }));
    assert!(released.is_err());
    assert_eq!(other.len(), 1);
    assert_eq!(other.ref_count(theirs.id()), Some(1));
    assert!(backend.is_live(theirs_raw));

    other.release(&mut backend, theirs);
    assert!(!backend.is_live(theirs_raw));
    assert_eq!(cache.len(), 1);
}

// ============================================================================
// Hashing
// ============================================================================

#[test]
fn test_single_bucket_chains_everything() {
    let mut backend = soft_backend();
    let mut cache: StateCache<SamplerState> = StateCache::new(1, 64);
    assert_eq!(cache.bucket_count(), 1);

    let refs: Vec<_> = (0..20)
        .map(|n| cache.acquire(&mut backend, &sampler(n)).unwrap())
        .collect();
    cache.assert_invariants();
    for n in 0..20 {
        assert!(cache.find(&sampler(n)).is_some());
    }
    assert_eq!(cache.find(&sampler(99)), None);

    for entry in refs {
        cache.release(&mut backend, entry);
    }
    cache.assert_invariants();
    cache.purge(&mut backend);
}

#[test]
fn test_dont_care_variants_hash_equal() {
    let a = BlendState::default();
    let mut b = BlendState::default();
    b.attachments[7].dst_alpha = gl::SRC_COLOR;
    b.logic_op = gl::SET;

    assert_eq!(hash_state(&a.canonical()), hash_state(&b.canonical()));
}

#[test]
fn test_zero_buckets_treated_as_one() {
    let cache: StateCache<SamplerState> = StateCache::new(0, 4);
    assert_eq!(cache.bucket_count(), 1);
}

// ============================================================================
// Mixed workload
// ============================================================================

#[test]
fn test_mixed_workload_keeps_invariants() {
    let mut backend = soft_backend();
    let mut cache = sampler_cache(3);
    let mut held: Vec<EntryRef<SamplerState>> = Vec::new();

    // Deterministic LCG so the sequence is reproducible
    let mut seed: u32 = 0x2545_F491;
    let mut next = || {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        seed >> 16
    };

    for _ in 0..2_000 {
        let roll = next();
        if roll % 3 != 0 || held.is_empty() {
            let entry = cache.acquire(&mut backend, &sampler(next() % 12)).unwrap();
            held.push(entry);
        } else {
            let index = next() as usize % held.len();
            let entry = held.swap_remove(index);
            cache.release(&mut backend, entry);
        }

        cache.assert_invariants();
        assert_eq!(live_samplers(&backend), cache.len());
        let distinct_held = {
            let mut ids: Vec<_> = held.iter().map(|entry| entry.id()).collect();
            ids.sort();
            ids.dedup();
            ids.len()
        };
        assert!(cache.len() <= distinct_held + cache.spare_limit());
    }

    for entry in held {
        cache.release(&mut backend, entry);
    }
    assert!(cache.spare_len() <= 3);
    cache.purge(&mut backend);
    assert_eq!(backend.live_objects(), 0);
}
