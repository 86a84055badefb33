//! Generation-tagged slot arena backing the set's nodes.
//!
//! Tree edges (owning) and list edges (non-owning) are both plain `usize`
//! indices into this arena, so the two traversal graphs share one storage
//! and there are no reference cycles to manage. Removing a slot bumps its
//! generation counter; a position captured before the removal can then be
//! detected as stale instead of silently aliasing whatever node reuses the
//! slot.

/// A single storage slot: either a live item or a link in the vacant
/// free list. The generation survives the slot's whole lifetime and is
/// incremented each time the slot is vacated.
#[derive(Clone, Debug)]
enum Slot<N> {
    Occupied { generation: u32, item: N },
    Vacant { generation: u32, next_free: Option<usize> },
}

/// Index-based slot storage with a vacant free list.
///
/// Indices returned by [`Arena::insert`] stay valid until the same index is
/// passed to [`Arena::remove`]; vacated slots are recycled in LIFO order.
#[derive(Clone, Debug)]
pub(crate) struct Arena<N> {
    slots: Vec<Slot<N>>,
    free_head: Option<usize>,
    len: usize,
}

impl<N> Arena<N> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Number of live (occupied) slots.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Stores `item`, returning its slot index.
    ///
    /// Reuses the most recently vacated slot if one exists; otherwise the
    /// backing vector grows. Nothing else in the arena is touched, so a
    /// failed allocation cannot leave existing slots half-linked.
    pub(crate) fn insert(&mut self, item: N) -> usize {
        self.len += 1;
        match self.free_head {
            Some(index) => {
                let (generation, next_free) = match &self.slots[index] {
                    Slot::Vacant {
                        generation,
                        next_free,
                    } => (*generation, *next_free),
                    Slot::Occupied { .. } => {
                        unreachable!("free list points at an occupied slot")
                    }
                };
                self.free_head = next_free;
                self.slots[index] = Slot::Occupied { generation, item };
                index
            }
            None => {
                self.slots.push(Slot::Occupied {
                    generation: 0,
                    item,
                });
                self.slots.len() - 1
            }
        }
    }

    /// Vacates the slot at `index`, returning its item and bumping the
    /// slot's generation.
    ///
    /// # Panics
    ///
    /// Panics if the slot is already vacant; the caller must have unlinked
    /// the item from every graph that references it before removal.
    pub(crate) fn remove(&mut self, index: usize) -> N {
        let slot = std::mem::replace(
            &mut self.slots[index],
            Slot::Vacant {
                generation: 0,
                next_free: None,
            },
        );
        let Slot::Occupied { generation, item } = slot else {
            panic!("removed an already vacant arena slot")
        };
        self.slots[index] = Slot::Vacant {
            generation: generation.wrapping_add(1),
            next_free: self.free_head,
        };
        self.free_head = Some(index);
        self.len -= 1;
        item
    }

    /// Current generation of the slot at `index`.
    pub(crate) fn generation(&self, index: usize) -> u32 {
        match &self.slots[index] {
            Slot::Occupied { generation, .. } | Slot::Vacant { generation, .. } => *generation,
        }
    }

    /// Whether `generation` is still the live generation of `index`.
    pub(crate) fn is_live(&self, index: usize, generation: u32) -> bool {
        matches!(
            self.slots.get(index),
            Some(Slot::Occupied { generation: current, .. }) if *current == generation
        )
    }

    pub(crate) fn get(&self, index: usize) -> &N {
        match &self.slots[index] {
            Slot::Occupied { item, .. } => item,
            Slot::Vacant { .. } => panic!("accessed a vacant arena slot"),
        }
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut N {
        match &mut self.slots[index] {
            Slot::Occupied { item, .. } => item,
            Slot::Vacant { .. } => panic!("accessed a vacant arena slot"),
        }
    }
}

impl<N> std::ops::Index<usize> for Arena<N> {
    type Output = N;

    #[inline]
    fn index(&self, index: usize) -> &N {
        self.get(index)
    }
}

impl<N> std::ops::IndexMut<usize> for Arena<N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut N {
        self.get_mut(index)
    }
}
