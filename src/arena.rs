//! Slab allocator with stable handles.

use std::mem;
use std::ops::{Index, IndexMut};

/// A struct representing a handle to an object in `Arena<T>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Handle {
    index: usize,
}

enum Slot<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// An allocator for a single type of object that yields stable handles.
///
/// The arena owns every object allocated in it and destroys whatever is still
/// live when the arena itself is dropped. Objects may also be freed
/// individually through the handle returned at allocation; vacant slots are
/// chained into a free list and reused by later allocations, so handles stay
/// valid for exactly the lifetime of the object they were created for. The
/// underlying storage is a single `Vec` and no unsafe code is involved.
///
/// # Examples
///
/// ```
/// use balanced_collections::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena.free(x), 2);
/// ```
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// ```
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            head: None,
            len: 0,
        }
    }

    /// Constructs a new, empty `Arena<T>` with space reserved for `capacity`
    /// objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::with_capacity(1024);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            head: None,
            len: 0,
        }
    }

    /// Allocates an object in the arena and returns a handle to it. The
    /// handle can later be used to retrieve references to the object and to
    /// free it.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena[x], 0);
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                Handle {
                    index: self.slots.len() - 1,
                }
            }
            Some(index) => {
                let vacant_slot = mem::replace(&mut self.slots[index], Slot::Occupied(value));
                match vacant_slot {
                    Slot::Vacant(next_index) => {
                        self.head = next_index;
                        Handle { index }
                    }
                    Slot::Occupied(_) => panic!("Expected a vacant slot."),
                }
            }
        }
    }

    /// Frees an object in the arena and returns it. The slot it occupied is
    /// pushed onto the free list and reused by a later allocation.
    ///
    /// # Panics
    ///
    /// Panics if the handle corresponds to an invalid or vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, handle: Handle) -> T {
        if handle.index >= self.slots.len() {
            panic!("Error: attempting to free invalid slot.");
        }
        let old_slot = mem::replace(
            &mut self.slots[handle.index],
            Slot::Vacant(self.head.take()),
        );
        match old_slot {
            Slot::Vacant(_) => panic!("Error: attempting to free vacant slot."),
            Slot::Occupied(value) => {
                self.len -= 1;
                self.head = Some(handle.index);
                value
            }
        }
    }

    /// Returns an immutable reference to an object in the arena. Returns
    /// `None` if the handle does not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slots.get(handle.index) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena. Returns `None`
    /// if the handle does not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// *arena.get_mut(x).unwrap() = 1;
    /// assert_eq!(arena.get(x), Some(&1));
    /// ```
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.index) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects in the arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// arena.allocate(0);
    /// assert_eq!(arena.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena contains no live objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// assert!(arena.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes all objects from the arena and clears the free list.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// arena.allocate(0);
    /// arena.clear();
    /// assert!(arena.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}
