//! Index-based data structures shared by the policies.
//!
//! - [`SlotArena`] - slab with stable handles and slot reuse
//! - [`IntrusiveList`] - doubly linked list whose nodes live in a `SlotArena`
//! - [`LinkedSet`] - ordered set of keys with O(1) membership and reordering

mod intrusive_list;
mod linked_set;
mod slot_arena;

pub use intrusive_list::{IntrusiveList, Iter};
pub use linked_set::LinkedSet;
pub use slot_arena::{SlotArena, SlotId};
