//! Behaviour tests for the hash ring.
//!
//! # Test Strategy
//!
//! 1. **Basic functionality**: Empty ring, add/lookup, remove
//! 2. **Multiple nodes**: Distribution, consistency, minimal remapping
//! 3. **Weights**: Replica caps and share monotonicity
//! 4. **Thread safety**: Lookups racing membership changes

use corelib::partitioner::{FnPartitioner, Partitioner, SipPartitioner};
use corelib::{Error, HashRing, RingBuilder, MIN_REPLICAS};
use std::collections::HashMap;
use std::sync::Arc;

fn keys(count: usize) -> impl Iterator<Item = String> {
    (0..count).map(|i| format!("key-{i}"))
}

fn shares(ring: &HashRing<&'static str>, count: usize) -> HashMap<&'static str, usize> {
    let mut counts = HashMap::new();
    for key in keys(count) {
        if let Some(node) = ring.get(&key) {
            *counts.entry(node).or_default() += 1;
        }
    }
    counts
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_empty_ring_lookup() {
    let ring: HashRing = HashRing::new();
    assert_eq!(ring.get("key1"), None);
    assert_eq!(ring.try_get("key1"), Err(Error::NotFound));
    assert!(ring.get_n("key1", 3).is_empty());
    assert_eq!(ring.node_count(), 0);
    assert_eq!(ring.vnode_count(), 0);
    assert!(ring.is_empty());
}

#[test]
fn test_single_node_is_stable() {
    let ring: HashRing = HashRing::custom(100, None);
    ring.add("A".to_string());

    for _ in 0..10 {
        assert_eq!(ring.get("foo"), Some("A".to_string()));
    }
    assert_eq!(ring.vnode_count(), 100);
}

#[test]
fn test_lifecycle_scenario() {
    let ring: HashRing<&str> = HashRing::custom(100, None);
    ring.add("A");
    assert_eq!(ring.get("foo"), Some("A"));

    ring.add("B");
    let counts = shares(&ring, 10_000);
    let a = counts.get("A").copied().unwrap_or(0);
    let b = counts.get("B").copied().unwrap_or(0);
    assert_eq!(a + b, 10_000);
    assert!(a > 2_000, "A only received {a} keys");
    assert!(b > 2_000, "B only received {b} keys");

    ring.remove(&"A");
    for key in keys(10_000) {
        assert_eq!(ring.get(&key), Some("B"));
    }

    ring.remove(&"B");
    for key in keys(10_000) {
        assert_eq!(ring.get(&key), None);
    }
    assert_eq!(ring.vnode_count(), 0);
    assert_eq!(ring.node_count(), 0);
}

#[test]
fn test_add_remove_add() {
    let ring: HashRing<&str> = HashRing::new();

    ring.add("node1");
    let before: Vec<_> = keys(500).map(|k| ring.get(&k)).collect();

    assert!(ring.remove(&"node1"));
    assert_eq!(ring.node_count(), 0);
    assert!(ring.is_empty());

    ring.add("node1");
    let after: Vec<_> = keys(500).map(|k| ring.get(&k)).collect();
    assert_eq!(before, after);
}

#[test]
fn test_idempotent_add() {
    let once: HashRing<&str> = HashRing::new();
    once.add("a");
    once.add("b");

    let twice: HashRing<&str> = HashRing::new();
    twice.add("a");
    twice.add("a");
    twice.add("b");

    assert_eq!(once.vnode_count(), twice.vnode_count());
    assert_eq!(twice.node_count(), 2);
    for key in keys(2_000) {
        assert_eq!(once.get(&key), twice.get(&key));
    }
}

// ============================================================================
// Multiple Nodes Tests
// ============================================================================

#[test]
fn test_removal_only_moves_removed_keys() {
    let ring: HashRing<&str> = HashRing::new();
    for node in ["a", "b", "c"] {
        ring.add(node);
    }
    let before: Vec<_> = keys(5_000).map(|k| ring.get(&k).unwrap()).collect();

    ring.remove(&"b");

    for (key, owner) in keys(5_000).zip(before) {
        let now = ring.get(&key).unwrap();
        assert_ne!(now, "b");
        if owner != "b" {
            assert_eq!(now, owner, "{key} moved although its owner stayed");
        }
    }
}

#[test]
fn test_adding_node_only_steals_keys() {
    let ring: HashRing<&str> = HashRing::new();
    ring.add("a");
    ring.add("b");
    let before: Vec<_> = keys(5_000).map(|k| ring.get(&k).unwrap()).collect();

    ring.add("c");

    let mut moved = 0;
    for (key, owner) in keys(5_000).zip(before) {
        let now = ring.get(&key).unwrap();
        if now != owner {
            assert_eq!(now, "c", "{key} moved between surviving nodes");
            moved += 1;
        }
    }
    assert!(moved > 0 && moved < 5_000);
}

#[test]
fn test_deterministic_across_instances() {
    let build = || {
        RingBuilder::new()
            .add_node("10.0.0.1:6379")
            .add_node("10.0.0.2:6379")
            .add_node_with_weight("10.0.0.3:6379", 60)
            .build()
    };
    let first = build();
    let second = build();

    for key in keys(2_000) {
        assert_eq!(first.get(&key), second.get(&key));
    }
}

#[test]
fn test_byte_keys() {
    let ring: HashRing<&str> = HashRing::new();
    ring.add("a");
    ring.add("b");
    assert_eq!(ring.get(b"raw-key"), ring.get("raw-key"));
    assert_eq!(ring.get(&b"raw-key".to_vec()), ring.get("raw-key"));
}

// ============================================================================
// Weight Tests
// ============================================================================

#[test]
fn test_weight_share_follows_weight() {
    let ring: HashRing<&str> = HashRing::new();
    ring.add_with_weight("light", 20);
    ring.add_with_weight("heavy", 100);

    let counts = shares(&ring, 20_000);
    let light = counts.get("light").copied().unwrap_or(0);
    let heavy = counts.get("heavy").copied().unwrap_or(0);
    assert!(heavy > light, "heavy={heavy} light={light}");
    assert!(light > 0);
}

#[test]
fn test_weight_above_top_is_capped() {
    let ring: HashRing<&str> = HashRing::custom(128, None);
    ring.add_with_weight("a", 1_000);
    assert_eq!(ring.vnode_count(), 128);
}

// ============================================================================
// Partitioner Tests
// ============================================================================

#[test]
fn test_custom_partitioner() {
    let constant: Arc<dyn Partitioner> = Arc::new(FnPartitioner::new(|_: &[u8]| 7));
    let ring: HashRing<&str> = HashRing::custom(100, Some(constant));
    ring.add("only");

    // Every vnode collides at 7; the single owner still wins every key.
    assert_eq!(ring.vnode_count(), 100);
    assert_eq!(ring.get("x"), Some("only"));
    assert_eq!(ring.partitioner_name(), "FnPartitioner");

    ring.remove(&"only");
    assert!(ring.is_empty());
    assert_eq!(ring.get("x"), None);
}

#[test]
fn test_sip_partitioner_ring() {
    let ring = RingBuilder::new()
        .with_partitioner(SipPartitioner)
        .add_node("a")
        .add_node("b")
        .build();
    assert_eq!(ring.vnode_count(), 2 * MIN_REPLICAS);
    assert!(ring.get("key").is_some());
}

// ============================================================================
// Thread Safety
// ============================================================================

#[test]
fn test_concurrent_lookups_during_churn() {
    let ring: Arc<HashRing<&str>> = Arc::new(HashRing::new());
    ring.add("stable");

    std::thread::scope(|s| {
        for _ in 0..4 {
            let ring = Arc::clone(&ring);
            s.spawn(move || {
                for key in keys(5_000) {
                    let owner = ring.get(&key).expect("stable node is always present");
                    assert!(owner == "stable" || owner == "flappy");
                }
            });
        }

        let ring = Arc::clone(&ring);
        s.spawn(move || {
            for i in 0..50 {
                ring.add_with_weight("flappy", (i % 3) * 50);
                ring.remove(&"flappy");
            }
        });
    });

    assert_eq!(ring.nodes(), vec!["stable"]);
    assert_eq!(ring.vnode_count(), MIN_REPLICAS);
}
