use std::collections::{BTreeMap, VecDeque};

use crate::core::config::ReplacementPolicyKind;
use crate::core::memory::context::PolicyContext;
use crate::core::memory::store::Slot;

/// Replacement policy with its auxiliary state
///
/// The policy only decides which slot receives a new tag; the owning
/// [`AssociativeStore`](crate::core::memory::store::AssociativeStore) writes
/// the tag. Every valid slot appears exactly once in the FIFO queue or the LRU
/// map at all times.
#[derive(Debug, Clone)]
pub enum ReplacementPolicy {
    /// Occupied slot indices in insertion order, front is the oldest
    Fifo { queue: VecDeque<usize> },
    /// Occupied slot index -> last touch timestamp
    Lru { last_used: BTreeMap<usize, u64> },
    /// Permutation of all slot indices, reshuffled before every placement
    Random { order: Vec<usize> },
}

impl ReplacementPolicy {
    pub fn new(kind: ReplacementPolicyKind, num_slots: usize) -> Self {
        match kind {
            ReplacementPolicyKind::Fifo => ReplacementPolicy::Fifo {
                queue: VecDeque::with_capacity(num_slots),
            },
            ReplacementPolicyKind::Lru => ReplacementPolicy::Lru {
                last_used: BTreeMap::new(),
            },
            ReplacementPolicyKind::Random => ReplacementPolicy::Random {
                order: (0..num_slots).collect(),
            },
        }
    }

    pub fn kind(&self) -> ReplacementPolicyKind {
        match self {
            ReplacementPolicy::Fifo { .. } => ReplacementPolicyKind::Fifo,
            ReplacementPolicy::Lru { .. } => ReplacementPolicyKind::Lru,
            ReplacementPolicy::Random { .. } => ReplacementPolicyKind::Random,
        }
    }

    /// Record a hit on `slot`. Only recency-based policies care.
    pub fn touch(&mut self, slot: usize, ctx: &mut PolicyContext) {
        if let ReplacementPolicy::Lru { last_used } = self {
            if let Some(stamp) = last_used.get_mut(&slot) {
                *stamp = ctx.clock.tick();
            }
        }
    }

    /// Choose the slot that receives a tag which missed at `index`
    ///
    /// Updates the auxiliary state as if the tag has already been written.
    pub fn place(&mut self, slots: &[Slot], index: usize, ctx: &mut PolicyContext) -> usize {
        let num_slots = slots.len();
        match self {
            ReplacementPolicy::Fifo { queue } => {
                if queue.len() == num_slots {
                    if let Some(oldest) = queue.pop_front() {
                        queue.push_back(oldest);
                        return oldest;
                    }
                }
                // Overwriting before capacity is a fresh insertion for that slot
                if let Some(pos) = queue.iter().position(|&slot| slot == index) {
                    queue.remove(pos);
                }
                queue.push_back(index);
                index
            }
            ReplacementPolicy::Lru { last_used } => {
                let target = if last_used.len() == num_slots {
                    last_used
                        .iter()
                        .min_by_key(|&(_, &stamp)| stamp)
                        .map(|(&slot, _)| slot)
                        .unwrap_or(index)
                } else {
                    index
                };
                last_used.insert(target, ctx.clock.tick());
                target
            }
            ReplacementPolicy::Random { order } => {
                ctx.random.shuffle(order);
                order
                    .iter()
                    .copied()
                    .find(|&slot| !slots[slot].is_valid())
                    .unwrap_or_else(|| ctx.random.index(num_slots))
            }
        }
    }

    /// Number of slots the auxiliary state tracks, `None` for stateless policies
    pub fn tracked_slots(&self) -> Option<usize> {
        match self {
            ReplacementPolicy::Fifo { queue } => Some(queue.len()),
            ReplacementPolicy::Lru { last_used } => Some(last_used.len()),
            ReplacementPolicy::Random { .. } => None,
        }
    }
}
