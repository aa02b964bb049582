use log::debug;

use crate::core::config::{ReplacementPolicyKind, StoreConfig, TlbConfig};
use crate::core::errors::ConfigError;
use crate::core::memory::context::PolicyContext;
use crate::core::memory::policy::ReplacementPolicy;
use crate::core::types::{AccessOutcome, Address};

/// One resident tag, or nothing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slot {
    tag: Option<u64>,
}

impl Slot {
    pub fn holding(tag: u64) -> Self {
        Self { tag: Some(tag) }
    }

    pub fn is_valid(&self) -> bool {
        self.tag.is_some()
    }

    pub fn tag(&self) -> Option<u64> {
        self.tag
    }
}

/// Fixed-capacity tag store backing a cache level, RAM or the TLB
///
/// Addresses map to a slot by `(address / block_size) % num_slots`. For the
/// TLB the block size is the page size, so the stored tag is the page number.
#[derive(Debug, Clone)]
pub struct AssociativeStore {
    name: String,
    slots: Vec<Slot>,
    block_size: u64,
    access_time_ms: u64,
    policy: ReplacementPolicy,
}

impl AssociativeStore {
    /// Create an empty store, rejecting zero slots or a zero block size
    pub fn new(
        name: impl Into<String>,
        num_slots: u64,
        block_size: u64,
        access_time_ms: u64,
        policy: ReplacementPolicyKind,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if block_size == 0 {
            return Err(ConfigError::NonPositive {
                component: name,
                field: "block size",
            });
        }
        if num_slots == 0 {
            return Err(ConfigError::ZeroCapacity(name));
        }
        let num_slots = num_slots as usize;
        Ok(Self {
            name,
            slots: vec![Slot::default(); num_slots],
            block_size,
            access_time_ms,
            policy: ReplacementPolicy::new(policy, num_slots),
        })
    }

    /// Store for a cache level or RAM, one slot per block
    pub fn from_config(name: impl Into<String>, config: &StoreConfig) -> Result<Self, ConfigError> {
        Self::new(
            name,
            config.capacity(),
            config.block_size_bytes,
            config.access_time_ms,
            config.policy,
        )
    }

    /// Store for the TLB, one slot per entry
    pub fn tlb(config: &TlbConfig, page_size: u64) -> Result<Self, ConfigError> {
        Self::new(
            "TLB",
            config.entry_count,
            page_size,
            config.access_time_ms,
            config.policy,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    pub fn access_time_ms(&self) -> u64 {
        self.access_time_ms
    }

    pub fn policy_kind(&self) -> ReplacementPolicyKind {
        self.policy.kind()
    }

    /// Number of valid slots
    pub fn occupancy(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_valid()).count()
    }

    /// Number of slots tracked by the policy's auxiliary state
    pub fn policy_len(&self) -> Option<usize> {
        self.policy.tracked_slots()
    }

    /// Whether any slot holds `tag`, wherever it was placed
    pub fn contains(&self, tag: u64) -> bool {
        self.slots.iter().any(|slot| slot.tag == Some(tag))
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn tag_of(&self, address: Address) -> u64 {
        address / self.block_size
    }

    pub fn index_of(&self, address: Address) -> usize {
        (self.tag_of(address) % self.slots.len() as u64) as usize
    }

    /// True iff the slot at `index` is valid and holds `tag`; refreshes recency on a hit
    ///
    /// `index` is reduced modulo the capacity, as in [`AssociativeStore::insert_on_miss`].
    pub fn lookup(&mut self, index: usize, tag: u64, ctx: &mut PolicyContext) -> bool {
        let index = index % self.slots.len();
        let hit = self.slots[index].tag == Some(tag);
        if hit {
            self.policy.touch(index, ctx);
        }
        hit
    }

    /// Install `tag` after a miss at `index`, returning the evicted tag if any
    ///
    /// `index` is reduced modulo the capacity before the policy sees it.
    pub fn insert_on_miss(&mut self, index: usize, tag: u64, ctx: &mut PolicyContext) -> Option<u64> {
        let index = index % self.slots.len();
        let target = self.policy.place(&self.slots, index, ctx);
        let evicted = self.slots[target].tag.replace(tag);

        match evicted {
            Some(old) => debug!(
                "[{}] tag {:#x} evicted from slot {} for tag {:#x}",
                self.name, old, target, tag
            ),
            None => debug!("[{}] tag {:#x} installed in slot {}", self.name, tag, target),
        }
        evicted
    }

    /// Look up `address` and install it on a miss
    pub fn access(&mut self, address: Address, ctx: &mut PolicyContext) -> AccessOutcome {
        let index = self.index_of(address);
        let tag = self.tag_of(address);
        if self.lookup(index, tag, ctx) {
            AccessOutcome::Hit(self.access_time_ms)
        } else {
            self.insert_on_miss(index, tag, ctx);
            AccessOutcome::Miss
        }
    }
}
