#![allow(dead_code)]
//! Identifiers and simple allocators for poser-owned entities.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TransitionId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ChildId(pub u32);

/// Monotonic allocator for TransitionId and ChildId.
/// IDs are opaque externally; each poser allocates its own.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_transition: u32,
    next_child: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_transition(&mut self) -> TransitionId {
        let id = TransitionId(self.next_transition);
        self.next_transition = self.next_transition.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_child(&mut self) -> ChildId {
        let id = ChildId(self.next_child);
        self.next_child = self.next_child.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
