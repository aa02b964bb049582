// Tests for AssociativeStore placement and eviction
#[cfg(test)]
mod tests {
    use crate::core::config::ReplacementPolicyKind;
    use crate::core::errors::ConfigError;
    use crate::core::memory::{AssociativeStore, PolicyContext};
    use crate::core::types::AccessOutcome;

    /// Store with block size 1, so tag == address and index == address % slots
    fn store(slots: u64, policy: ReplacementPolicyKind) -> AssociativeStore {
        AssociativeStore::new("test", slots, 1, 3, policy).unwrap()
    }

    #[test]
    fn test_rejects_zero_slots() {
        let result = AssociativeStore::new("L1", 0, 8, 1, ReplacementPolicyKind::Fifo);
        assert_eq!(result.unwrap_err(), ConfigError::ZeroCapacity("L1".to_string()));
    }

    #[test]
    fn test_rejects_zero_block_size() {
        let result = AssociativeStore::new("L1", 8, 0, 1, ReplacementPolicyKind::Fifo);
        assert!(matches!(result, Err(ConfigError::NonPositive { .. })));
    }

    #[test]
    fn test_store_reports_its_configuration() {
        let store = AssociativeStore::new("L2", 4, 16, 5, ReplacementPolicyKind::Lru).unwrap();
        assert_eq!(store.name(), "L2");
        assert_eq!(store.policy_kind(), ReplacementPolicyKind::Lru);
        assert_eq!(store.access_time_ms(), 5);
        assert_eq!(store.slots().len(), 4);
        assert!(store.slots().iter().all(|slot| !slot.is_valid()));
    }

    #[test]
    fn test_out_of_range_index_wraps_to_capacity() {
        let mut ctx = PolicyContext::seeded(1);
        let mut store = store(4, ReplacementPolicyKind::Fifo);

        assert_eq!(store.insert_on_miss(9, 1, &mut ctx), None);
        assert_eq!(store.slots()[1].tag(), Some(1));
        assert!(store.lookup(9, 1, &mut ctx));
        assert!(store.lookup(1, 1, &mut ctx));
        assert_eq!(store.occupancy(), 1);
        assert_eq!(store.policy_len(), Some(1));
    }

    #[test]
    fn test_index_and_tag_mapping() {
        let store = AssociativeStore::new("L1", 8, 8, 1, ReplacementPolicyKind::Fifo).unwrap();
        assert_eq!(store.tag_of(77), 9);
        assert_eq!(store.index_of(77), 1);
        assert_eq!(store.index_of(64), 0);
    }

    #[test]
    fn test_hit_returns_access_time() {
        let mut ctx = PolicyContext::seeded(1);
        let mut store = store(4, ReplacementPolicyKind::Fifo);

        assert_eq!(store.access(2, &mut ctx), AccessOutcome::Miss);
        assert_eq!(store.access(2, &mut ctx), AccessOutcome::Hit(3));
    }

    #[test]
    fn test_fifo_evicts_first_inserted() {
        let mut ctx = PolicyContext::seeded(1);
        let mut store = store(4, ReplacementPolicyKind::Fifo);

        for tag in 0..4 {
            store.access(tag, &mut ctx);
        }
        // Touching the oldest tag does not save it under FIFO
        assert!(store.access(0, &mut ctx).is_hit());
        assert!(store.access(0, &mut ctx).is_hit());

        assert_eq!(store.access(5, &mut ctx), AccessOutcome::Miss);
        assert!(!store.contains(0));
        assert!(store.contains(1));
        assert!(store.contains(2));
        assert!(store.contains(3));
        assert!(store.contains(5));
        assert_eq!(store.policy_len(), Some(4));
    }

    #[test]
    fn test_fifo_eviction_order_continues() {
        let mut ctx = PolicyContext::seeded(1);
        let mut store = store(4, ReplacementPolicyKind::Fifo);

        for tag in 0..6 {
            store.access(tag, &mut ctx);
        }
        assert!(!store.contains(0));
        assert!(!store.contains(1));
        assert_eq!(store.occupancy(), 4);
    }

    #[test]
    fn test_lru_evicts_least_recently_used() {
        let mut ctx = PolicyContext::seeded(1);
        let mut store = store(2, ReplacementPolicyKind::Lru);
        let (a, b, c) = (0, 1, 2);

        store.access(a, &mut ctx);
        store.access(b, &mut ctx);
        assert!(store.access(a, &mut ctx).is_hit());
        store.access(c, &mut ctx);

        assert!(store.contains(a));
        assert!(!store.contains(b));
        assert!(store.contains(c));
        assert_eq!(store.policy_len(), Some(2));
    }

    #[test]
    fn test_lru_without_retouch_evicts_oldest() {
        let mut ctx = PolicyContext::seeded(1);
        let mut store = store(2, ReplacementPolicyKind::Lru);

        store.access(0, &mut ctx);
        store.access(1, &mut ctx);
        store.access(2, &mut ctx);

        assert!(!store.contains(0));
        assert!(store.contains(1));
    }

    #[test]
    fn test_lru_collision_keeps_one_entry_per_slot() {
        let mut ctx = PolicyContext::seeded(1);
        let mut store = store(4, ReplacementPolicyKind::Lru);

        // 1 and 5 share index 1
        store.access(1, &mut ctx);
        store.access(5, &mut ctx);

        assert_eq!(store.occupancy(), 1);
        assert_eq!(store.policy_len(), Some(1));
    }

    #[test]
    fn test_random_never_evicts_while_free_slots_remain() {
        for seed in 0..32 {
            let mut ctx = PolicyContext::seeded(seed);
            let mut store = store(8, ReplacementPolicyKind::Random);

            for tag in 0..8u64 {
                let index = store.index_of(tag);
                assert_eq!(store.insert_on_miss(index, tag, &mut ctx), None);
                assert_eq!(store.occupancy(), tag as usize + 1);
            }
            assert!(store.insert_on_miss(0, 100, &mut ctx).is_some());
            assert_eq!(store.occupancy(), 8);
        }
    }

    #[test]
    fn test_resident_address_hits_without_changing_occupancy() {
        for policy in [ReplacementPolicyKind::Fifo, ReplacementPolicyKind::Lru] {
            let mut ctx = PolicyContext::seeded(9);
            let mut store = store(4, policy);

            store.access(1, &mut ctx);
            store.access(2, &mut ctx);
            let occupancy = store.occupancy();
            let tracked = store.policy_len();

            for _ in 0..10 {
                assert!(store.access(2, &mut ctx).is_hit());
                assert_eq!(store.occupancy(), occupancy);
                assert_eq!(store.policy_len(), tracked);
            }
        }
    }

    #[test]
    fn test_single_slot_random_store_is_idempotent() {
        let mut ctx = PolicyContext::seeded(4);
        let mut store = store(1, ReplacementPolicyKind::Random);

        assert_eq!(store.access(7, &mut ctx), AccessOutcome::Miss);
        for _ in 0..10 {
            assert!(store.access(7, &mut ctx).is_hit());
            assert_eq!(store.occupancy(), 1);
        }
    }

    #[test]
    fn test_valid_slots_never_exceed_capacity() {
        for policy in [
            ReplacementPolicyKind::Fifo,
            ReplacementPolicyKind::Lru,
            ReplacementPolicyKind::Random,
        ] {
            let mut ctx = PolicyContext::seeded(21);
            let mut store = store(4, policy);
            for address in [3, 9, 1, 3, 12, 40, 7, 9, 2, 0, 33] {
                store.access(address, &mut ctx);
                assert!(store.occupancy() <= store.capacity());
                if let Some(tracked) = store.policy_len() {
                    assert_eq!(tracked, store.occupancy());
                }
            }
        }
    }
}
