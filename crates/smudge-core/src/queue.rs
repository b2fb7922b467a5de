//! Fixed-capacity work queue with blocking backpressure.
//!
//! `BoundedQueue` is the single piece of shared mutable state in the
//! pipeline: producers block in [`BoundedQueue::push`] while the buffer is
//! full, consumers block in [`BoundedQueue::pop`] while it is empty, and
//! [`BoundedQueue::close`] wakes every waiter at once for shutdown.
//!
//! The waiting discipline uses two semaphores (one counting free slots,
//! one counting buffered items) around a ring buffer guarded by a plain
//! mutex. A permit is acquired *before* touching the ring, so while the
//! queue is open a waiter never has to re-check its condition against a
//! racing waiter, and there are no spurious wakeups to guard against.
//! Once `close()` has been called, drain pops bypass permit accounting,
//! so a popper that already holds a permit may find the ring empty; that
//! case is handled, not asserted. The mutex is only held for the index
//! arithmetic, never across an await point.

use std::sync::Mutex;

use tokio::sync::Semaphore;

/// Error returned by [`BoundedQueue::push`] once the queue is closed.
/// Carries the rejected item back to the caller so it is never silently
/// dropped.
#[derive(Debug, PartialEq, Eq)]
pub struct Closed<T>(pub T);

/// A fixed-capacity FIFO buffer shared by producer and consumer tasks.
///
/// Every pushed item is delivered to exactly one popper. After `close()`,
/// `push` fails fast while `pop` drains whatever is still buffered before
/// reporting closure (drain-then-close).
pub struct BoundedQueue<T> {
    /// One permit per free slot; `push` consumes one per insertion.
    space: Semaphore,
    /// One permit per buffered item; `pop` consumes one per removal.
    items: Semaphore,
    ring: Mutex<Ring<T>>,
    capacity: usize,
}

/// Circular buffer state. `head`/`tail` wrap modulo capacity, and `count`
/// is tracked explicitly because head == tail is ambiguous between empty
/// and full.
struct Ring<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    tail: usize,
    count: usize,
}

impl<T> Ring<T> {
    fn insert(&mut self, item: T) {
        // A violated bound here is a programming defect, not a runtime
        // state to tolerate.
        assert!(self.count < self.slots.len(), "bounded queue overfilled");
        let slot = &mut self.slots[self.tail];
        assert!(slot.is_none(), "bounded queue tail slot still occupied");
        *slot = Some(item);
        self.tail = (self.tail + 1) % self.slots.len();
        self.count += 1;
    }

    fn remove(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        let item = self.slots[self.head].take();
        assert!(item.is_some(), "bounded queue head slot empty");
        self.head = (self.head + 1) % self.slots.len();
        self.count -= 1;
        item
    }
}

impl<T> BoundedQueue<T> {
    /// Create a queue with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be positive");
        Self {
            space: Semaphore::new(capacity),
            items: Semaphore::new(0),
            ring: Mutex::new(Ring {
                slots: (0..capacity).map(|_| None).collect(),
                head: 0,
                tail: 0,
                count: 0,
            }),
            capacity,
        }
    }

    /// Enqueue an item, waiting while the queue is full.
    ///
    /// Returns `Err(Closed(item))` without blocking once the queue has
    /// been closed, handing the item back to the caller.
    pub async fn push(&self, item: T) -> std::result::Result<(), Closed<T>> {
        let permit = match self.space.acquire().await {
            Ok(permit) => permit,
            Err(_) => return Err(Closed(item)),
        };
        // The free slot this permit stood for is now handed to the item;
        // the matching permit is re-created on the items side instead.
        permit.forget();

        {
            let mut ring = self.ring.lock().expect("queue mutex poisoned");
            ring.insert(item);
        }

        // Signal one waiting popper that an item is available.
        self.items.add_permits(1);
        Ok(())
    }

    /// Dequeue the oldest item, waiting while the queue is empty.
    ///
    /// Returns `None` once the queue is closed *and* drained. Items that
    /// were buffered before `close()` are still delivered.
    pub async fn pop(&self) -> Option<T> {
        match self.items.acquire().await {
            Ok(permit) => {
                permit.forget();
                let item = {
                    let mut ring = self.ring.lock().expect("queue mutex poisoned");
                    ring.remove()
                };
                match item {
                    Some(item) => {
                        // Signal one waiting pusher that a slot is free.
                        self.space.add_permits(1);
                        Some(item)
                    }
                    // Only reachable once the queue is closed: between our
                    // acquire and the lock, a drain pop on the closed path
                    // claimed the item this permit stood for. No pusher is
                    // waiting on `space` anymore, so nothing to signal.
                    None => None,
                }
            }
            // Closed: serve remaining buffered items, then report closure.
            Err(_) => self.ring.lock().expect("queue mutex poisoned").remove(),
        }
    }

    /// Close the queue. Idempotent; wakes every blocked pusher and popper
    /// simultaneously. Subsequent `push` calls fail fast, `pop` drains
    /// buffered items and then returns `None`.
    pub fn close(&self) {
        self.space.close();
        self.items.close();
    }

    /// Whether `close()` has been called.
    pub fn is_closed(&self) -> bool {
        self.items.is_closed()
    }

    /// Number of items currently buffered.
    pub fn len(&self) -> usize {
        self.ring.lock().expect("queue mutex poisoned").count
    }

    /// Whether the queue is currently empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The fixed capacity chosen at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
