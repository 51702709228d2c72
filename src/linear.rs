use std::{mem, ptr};
use std::ptr::NonNull;

use libc::{MAP_ANONYMOUS, MAP_FAILED, MAP_PRIVATE, PROT_READ, PROT_WRITE, c_void, mmap, munmap};

use crate::align_up;
use crate::error::AllocError;
use crate::page::page_size;

/// Bytes reserved at the front of the mapping for allocator bookkeeping.
/// Caller-visible memory begins immediately after this region.
const BOOKKEEPING_SIZE: usize = mem::size_of::<LinearAllocator>();

/// A fixed-capacity linear allocator over one anonymous memory mapping.
///
/// Hands out sequential, non-overlapping regions by bumping a cursor.
/// There is no per-object free: memory comes back only through
/// [`reset`](Self::reset) (rewind the cursor) or by dropping the
/// allocator (unmap the reservation).
///
/// The raw pointer fields make this type `!Send` and `!Sync`; sharing one
/// allocator across threads is not supported.
#[derive(Debug)]
pub struct LinearAllocator {
  base: *mut u8,
  start: *mut u8,
  cursor: *mut u8,
  capacity: usize,
  used: usize,
}

impl LinearAllocator {
  /// Reserves a fresh read-write mapping large enough for `capacity` bytes
  /// plus bookkeeping, rounded up to a whole number of pages.
  ///
  /// The usable capacity recorded on the allocator is the page-rounded
  /// total minus bookkeeping, so it may exceed the request. Fails with
  /// [`AllocError::InvalidArgument`] when `capacity` is zero and with
  /// [`AllocError::OutOfMemory`] when the OS refuses the reservation.
  pub fn with_capacity(capacity: usize) -> Result<Self, AllocError> {
    if capacity == 0 {
      return Err(AllocError::InvalidArgument { reason: "capacity must be nonzero" });
    }

    let page = page_size();
    let total = capacity
      .checked_add(BOOKKEEPING_SIZE)
      .and_then(|needed| needed.checked_add(page - 1))
      .map(|needed| needed & !(page - 1))
      .ok_or(AllocError::OutOfMemory { requested: capacity })?;

    let base = unsafe {
      mmap(
        ptr::null_mut(),
        total,
        PROT_READ | PROT_WRITE,
        MAP_PRIVATE | MAP_ANONYMOUS,
        -1,
        0,
      )
    };

    if base == MAP_FAILED {
      return Err(AllocError::OutOfMemory { requested: total });
    }

    let base = base as *mut u8;
    let start = unsafe { base.add(BOOKKEEPING_SIZE) };

    Ok(Self {
      base,
      start,
      cursor: start,
      capacity: total - BOOKKEEPING_SIZE,
      used: 0,
    })
  }

  /// Allocates `size` bytes aligned to `alignment`.
  ///
  /// The cursor is rounded up to the next `alignment` boundary and the
  /// footprint is `size` rounded up to `alignment` as well, so `used`
  /// grows by footprint plus padding. On failure the cursor and `used`
  /// are left untouched.
  ///
  /// Fails with [`AllocError::InvalidArgument`] when `size` is zero or
  /// `alignment` is not a power of two, and with
  /// [`AllocError::CapacityExceeded`] when the adjusted request does not
  /// fit in the remaining space.
  pub fn allocate(
    &mut self,
    size: usize,
    alignment: usize,
  ) -> Result<NonNull<u8>, AllocError> {
    if size == 0 {
      return Err(AllocError::InvalidArgument { reason: "size must be nonzero" });
    }

    if !alignment.is_power_of_two() {
      return Err(AllocError::InvalidArgument { reason: "alignment must be a power of two" });
    }

    let cursor_addr = self.cursor as usize;
    let aligned_addr = align_up!(cursor_addr, alignment);
    let padding = aligned_addr - cursor_addr;

    // A request so large the footprint arithmetic overflows can never fit.
    let aligned_size = size
      .checked_add(alignment - 1)
      .map(|needed| needed & !(alignment - 1))
      .ok_or(AllocError::CapacityExceeded { requested: size, available: self.available() })?;

    let end = self.start as usize + self.capacity;
    let fits = aligned_addr
      .checked_add(aligned_size)
      .is_some_and(|new_cursor| new_cursor <= end);

    if !fits {
      return Err(AllocError::CapacityExceeded {
        requested: aligned_size.saturating_add(padding),
        available: self.available(),
      });
    }

    let result = unsafe { self.cursor.add(padding) };
    self.cursor = unsafe { result.add(aligned_size) };
    self.used += aligned_size + padding;

    Ok(unsafe { NonNull::new_unchecked(result) })
  }

  /// Rewinds the cursor to the start of the arena, reclaiming everything
  /// at once.
  ///
  /// The underlying bytes are not zeroed; pointers handed out before the
  /// reset become logically invalid because future allocations may
  /// overwrite their memory.
  pub fn reset(&mut self) {
    self.cursor = self.start;
    self.used = 0;
  }

  /// Bytes remaining between the cursor and the end of the arena.
  pub fn available(&self) -> usize {
    self.capacity - (self.cursor as usize - self.start as usize)
  }

  /// Bytes consumed since the last reset, alignment padding included.
  pub fn used(&self) -> usize {
    self.used
  }

  /// Total usable capacity of the arena.
  pub fn total(&self) -> usize {
    self.capacity
  }
}

impl Drop for LinearAllocator {
  fn drop(&mut self) {
    unsafe {
      munmap(self.base as *mut c_void, BOOKKEEPING_SIZE + self.capacity);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_create_rounds_to_whole_pages() {
    let arena = LinearAllocator::with_capacity(1024).unwrap();

    assert!(arena.total() >= 1024);
    assert_eq!((arena.total() + BOOKKEEPING_SIZE) % page_size(), 0);
    assert_eq!(arena.used(), 0);
    assert_eq!(arena.available(), arena.total());

    let small = LinearAllocator::with_capacity(100).unwrap();
    let expected = align_up!(100 + BOOKKEEPING_SIZE, page_size()) - BOOKKEEPING_SIZE;

    assert_eq!(small.total(), expected);
  }

  #[test]
  fn test_create_zero_capacity_rejected() {
    let err = LinearAllocator::with_capacity(0).unwrap_err();

    assert!(matches!(err, AllocError::InvalidArgument { .. }));
  }

  #[test]
  fn test_first_allocation_returns_start() {
    let mut arena = LinearAllocator::with_capacity(1024).unwrap();

    let first = arena.allocate(40, 4).unwrap();

    assert_eq!(first.as_ptr(), arena.start);
    assert_eq!(arena.used(), 40);

    let second = arena.allocate(40, 4).unwrap();

    assert_eq!(second.as_ptr() as usize, first.as_ptr() as usize + 40);
    assert_eq!(arena.used(), 80);
  }

  #[test]
  fn test_allocations_are_usable_and_disjoint() {
    let mut arena = LinearAllocator::with_capacity(1024).unwrap();

    unsafe {
      let first = arena.allocate(mem::size_of::<u64>(), mem::align_of::<u64>()).unwrap();
      let first = first.cast::<u64>();
      first.write(3);

      assert_eq!(first.read(), 3);

      let count: usize = 6;
      let second = arena
        .allocate(count * mem::size_of::<u16>(), mem::align_of::<u16>())
        .unwrap();
      let second = second.cast::<u16>();

      for i in 0..count {
        second.add(i).write((i + 1) as u16);
      }

      assert_eq!(first.read(), 3);

      for i in 0..count {
        assert_eq!((i + 1) as u16, second.add(i).read());
      }
    }
  }

  #[test]
  fn test_padding_is_counted_as_used() {
    let mut arena = LinearAllocator::with_capacity(256).unwrap();

    arena.allocate(1, 1).unwrap();

    let block = arena.allocate(10, 8).unwrap();

    assert_eq!(block.as_ptr() as usize % 8, 0);
    // 1 byte, then 7 bytes of padding, then 10 rounded up to 16.
    assert_eq!(arena.used(), 1 + 7 + 16);
  }

  #[test]
  fn test_overfull_request_is_rejected_without_side_effects() {
    let mut arena = LinearAllocator::with_capacity(100).unwrap();
    let total = arena.total();

    let first_size = total * 9 / 10;
    arena.allocate(first_size, 1).unwrap();

    assert_eq!(arena.used(), first_size);

    let err = arena.allocate(total / 5, 1).unwrap_err();

    assert_eq!(
      err,
      AllocError::CapacityExceeded { requested: total / 5, available: total - first_size },
    );
    assert_eq!(arena.used(), first_size);
    assert_eq!(arena.available(), total - first_size);
  }

  #[test]
  fn test_exact_fill_leaves_nothing_available() {
    let mut arena = LinearAllocator::with_capacity(64).unwrap();

    arena.allocate(arena.total(), 1).unwrap();

    assert_eq!(arena.available(), 0);
    assert_eq!(arena.used(), arena.total());
    assert!(matches!(
      arena.allocate(1, 1),
      Err(AllocError::CapacityExceeded { .. }),
    ));
  }

  #[test]
  fn test_reset_reuses_the_same_addresses() {
    let mut arena = LinearAllocator::with_capacity(200).unwrap();

    let first = arena.allocate(50, 1).unwrap();

    assert_eq!(arena.used(), 50);

    arena.reset();

    assert_eq!(arena.used(), 0);
    assert_eq!(arena.available(), arena.total());

    let second = arena.allocate(50, 1).unwrap();

    assert_eq!(first, second);
  }

  #[test]
  fn test_non_power_of_two_alignment_rejected() {
    let mut arena = LinearAllocator::with_capacity(256).unwrap();

    let err = arena.allocate(10, 3).unwrap_err();

    assert!(matches!(err, AllocError::InvalidArgument { .. }));
    assert_eq!(arena.used(), 0);
    assert_eq!(arena.available(), arena.total());

    // Rejected regardless of how much space remains.
    arena.allocate(100, 1).unwrap();

    assert!(matches!(
      arena.allocate(10, 6),
      Err(AllocError::InvalidArgument { .. }),
    ));
    assert!(matches!(
      arena.allocate(10, 0),
      Err(AllocError::InvalidArgument { .. }),
    ));
  }

  #[test]
  fn test_zero_size_rejected() {
    let mut arena = LinearAllocator::with_capacity(256).unwrap();

    assert!(matches!(
      arena.allocate(0, 8),
      Err(AllocError::InvalidArgument { .. }),
    ));
    assert_eq!(arena.used(), 0);
  }

  #[test]
  fn test_oversized_request_cannot_overflow() {
    let mut arena = LinearAllocator::with_capacity(256).unwrap();

    assert!(matches!(
      arena.allocate(usize::MAX, 8),
      Err(AllocError::CapacityExceeded { .. }),
    ));
    assert!(matches!(
      arena.allocate(usize::MAX - 2, 2),
      Err(AllocError::CapacityExceeded { .. }),
    ));
    assert_eq!(arena.used(), 0);
  }
}
