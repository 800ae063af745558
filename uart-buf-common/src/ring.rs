//! A fixed-capacity single-producer single-consumer byte ring.
//!
//! The ring is the hand-off point between main-line code and an interrupt
//! handler: exactly one context holds the producer role and exactly one holds
//! the consumer role. Under that discipline no mutual exclusion is needed;
//! each index has a single writer, and publication is ordered by
//! acquire/release pairs on the index that changed.
//!
//! Indices are single-byte atomics. The capacity `N` must be a power of two
//! no larger than 256; wraparound is a bitmask and one slot is kept free so
//! `head == tail` always means empty.

#[cfg(not(loom))]
use portable_atomic::{AtomicU8, Ordering};

#[cfg(loom)]
use loom::sync::atomic::{AtomicU8, Ordering};

/// A lock-free SPSC byte queue of `N - 1` usable slots.
///
/// `head` is advanced only by the producer role, `tail` only by the consumer
/// role. Violating the single-producer/single-consumer discipline cannot
/// cause undefined behavior (all shared state is atomic) but loses the FIFO
/// guarantee.
pub struct Ring<const N: usize> {
    /// Insert index, owned by the producer.
    head: AtomicU8,
    /// Remove index, owned by the consumer.
    tail: AtomicU8,
    /// Byte slots. Atomic so an overrunning producer and a lagging consumer
    /// can touch the same slot without a data race.
    storage: [AtomicU8; N],
}

impl<const N: usize> Ring<N> {
    const MASK: u8 = (N - 1) as u8;

    /// Create a new, empty ring.
    #[cfg(not(loom))]
    pub const fn new() -> Self {
        const {
            assert!(
                N.is_power_of_two() && N <= 256,
                "ring capacity must be a power of two of at most 256"
            )
        };

        Self {
            head: AtomicU8::new(0),
            tail: AtomicU8::new(0),
            storage: [const { AtomicU8::new(0) }; N],
        }
    }

    /// Create a new, empty ring.
    #[cfg(loom)]
    pub fn new() -> Self {
        assert!(
            N.is_power_of_two() && N <= 256,
            "ring capacity must be a power of two of at most 256"
        );

        Self {
            head: AtomicU8::new(0),
            tail: AtomicU8::new(0),
            storage: core::array::from_fn(|_| AtomicU8::new(0)),
        }
    }

    /// Is the ring empty?
    pub fn is_empty(&self) -> bool {
        self.head.load(Ordering::Acquire) == self.tail.load(Ordering::Acquire)
    }

    /// Is the ring full, i.e. would `push` be refused?
    pub fn is_full(&self) -> bool {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);

        head.wrapping_add(1) & Self::MASK == tail
    }

    /// Number of unread bytes in the ring.
    pub fn len(&self) -> u8 {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);

        head.wrapping_sub(tail) & Self::MASK
    }

    /// Reset both indices to zero.
    ///
    /// Takes `&mut self`: resetting while the other role is live would tear
    /// the occupancy state.
    pub fn reset(&mut self) {
        self.head.store(0, Ordering::Relaxed);
        self.tail.store(0, Ordering::Relaxed);
    }

    /// Producer role: append one byte, refusing when the ring is full.
    ///
    /// The rejected byte is handed back so a blocking caller can retry it.
    pub fn push(&self, byte: u8) -> Result<(), u8> {
        let head = self.head.load(Ordering::Relaxed);
        let next = head.wrapping_add(1) & Self::MASK;

        if next == self.tail.load(Ordering::Acquire) {
            return Err(byte);
        }

        self.storage[head as usize].store(byte, Ordering::Relaxed);
        // Publish the slot write to the consumer.
        self.head.store(next, Ordering::Release);

        Ok(())
    }

    /// Producer role: append one byte unconditionally.
    ///
    /// There is no full check: if the producer has lapped the consumer the
    /// write lands on the oldest unread byte and the occupancy wraps. In
    /// particular, after exactly `N` unread pushes `head` catches `tail`
    /// again and the ring reads as empty.
    pub fn push_overwrite(&self, byte: u8) {
        let head = self.head.load(Ordering::Relaxed);

        self.storage[head as usize].store(byte, Ordering::Relaxed);
        self.head
            .store(head.wrapping_add(1) & Self::MASK, Ordering::Release);
    }

    /// Consumer role: remove the oldest byte, if any.
    pub fn pop(&self) -> Option<u8> {
        let tail = self.tail.load(Ordering::Relaxed);

        if self.head.load(Ordering::Acquire) == tail {
            return None;
        }

        let byte = self.storage[tail as usize].load(Ordering::Relaxed);
        // Release the slot back to the producer.
        self.tail
            .store(tail.wrapping_add(1) & Self::MASK, Ordering::Release);

        Some(byte)
    }
}

impl<const N: usize> Default for Ring<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[cfg(not(loom))]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let ring = Ring::<8>::new();

        assert!(ring.is_empty());
        assert!(!ring.is_full());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn one_slot_stays_free() {
        let ring = Ring::<8>::new();

        for i in 0..7 {
            assert!(!ring.is_full());
            ring.push(i).unwrap();
        }

        assert!(ring.is_full());
        assert_eq!(ring.len(), 7);
        assert_eq!(ring.push(7), Err(7));
    }

    #[test]
    fn fifo_across_wraparound() {
        let ring = Ring::<8>::new();

        // Drive the indices around the ring several times.
        for i in 0..40u8 {
            ring.push(i).unwrap();
            if i % 2 == 0 {
                ring.push(100 + i).unwrap();
                assert_eq!(ring.pop(), Some(i));
                assert_eq!(ring.pop(), Some(100 + i));
            } else {
                assert_eq!(ring.pop(), Some(i));
            }
        }

        assert!(ring.is_empty());
    }

    #[test]
    fn overwrite_wraps_silently() {
        let ring = Ring::<8>::new();

        // N unread arrivals bring head back onto tail: the ring reads as
        // empty and everything written so far is unreachable.
        for i in 1..=8 {
            ring.push_overwrite(i);
        }
        assert!(ring.is_empty());
        assert_eq!(ring.pop(), None);

        // The next arrival is the only readable byte.
        ring.push_overwrite(9);
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.pop(), Some(9));
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn overwrite_below_capacity_is_lossless() {
        let ring = Ring::<8>::new();

        for i in 1..=7 {
            ring.push_overwrite(i);
        }

        for i in 1..=7 {
            assert_eq!(ring.pop(), Some(i));
        }
        assert!(ring.is_empty());
    }

    #[test]
    fn reset_discards_content() {
        let mut ring = Ring::<8>::new();

        ring.push(1).unwrap();
        ring.push(2).unwrap();
        ring.reset();

        assert!(ring.is_empty());
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn minimal_capacity() {
        let ring = Ring::<2>::new();

        ring.push(1).unwrap();
        assert!(ring.is_full());
        assert_eq!(ring.push(2), Err(2));
        assert_eq!(ring.pop(), Some(1));
        assert_eq!(ring.pop(), None);
    }
}
