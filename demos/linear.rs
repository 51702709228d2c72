use std::{mem, ptr, slice, str};

use lallocator::{AllocError, LinearAllocator};

fn main() {
  println!("Running the linear allocator demo");

  basic_functionality();
  alignment_after_odd_allocation();
  overflow_rejection();
  reset_and_reuse();
  alignment_ladder();

  println!("\nAll five scenarios passed.");
}

/// Allocates a few differently-typed blocks and uses them.
fn basic_functionality() {
  println!("\n=== 1) Basic functionality ===");

  let mut arena = LinearAllocator::with_capacity(1024).expect("create 1 KiB arena");
  println!("Created arena: {} usable bytes", arena.total());

  unsafe {
    // ------------------------------------------------------------------
    // An int array, a string buffer, and a double array, back to back.
    // ------------------------------------------------------------------
    let numbers = arena
      .allocate(10 * mem::size_of::<i32>(), mem::align_of::<i32>())
      .expect("allocate int[10]")
      .cast::<i32>();

    for i in 0..10 {
      numbers.add(i).write((i * i) as i32);
    }
    println!("Wrote an int[10] of squares, numbers[9] = {}", numbers.add(9).read());

    let text = arena.allocate(50, 1).expect("allocate a 50-byte string buffer");
    let message = "Hello from the linear allocator!";
    ptr::copy_nonoverlapping(message.as_ptr(), text.as_ptr(), message.len());

    let copied = str::from_utf8(slice::from_raw_parts(text.as_ptr(), message.len())).unwrap();
    println!("Wrote a string: {copied}");

    let values = arena
      .allocate(5 * mem::size_of::<f64>(), mem::align_of::<f64>())
      .expect("allocate double[5]")
      .cast::<f64>();

    for i in 0..5 {
      values.add(i).write(3.14 * i as f64);
    }
    println!("Wrote a double[5], values[4] = {}", values.add(4).read());
  }

  println!("Used: {}/{} bytes", arena.used(), arena.total());
}

/// Shows that an allocation stays aligned even after the cursor has been
/// pushed onto an odd address.
fn alignment_after_odd_allocation() {
  println!("\n=== 2) Alignment after an odd-sized allocation ===");

  let mut arena = LinearAllocator::with_capacity(256).expect("create arena");

  // Shift the cursor onto an unaligned address.
  arena.allocate(1, 1).expect("allocate 1 byte");

  let block = arena.allocate(10, 8).expect("allocate with 8-byte alignment");
  let addr = block.as_ptr() as usize;

  println!("Block address: {:p}", block.as_ptr());
  println!("Aligned to 8: {}", if addr % 8 == 0 { "yes" } else { "no" });
  assert_eq!(addr % 8, 0);
}

/// Fills most of the arena, then shows the next request being rejected.
fn overflow_rejection() {
  println!("\n=== 3) Overflow rejection ===");

  let mut arena = LinearAllocator::with_capacity(100).expect("create arena");
  println!("Real arena size: {} bytes", arena.total());

  let first = arena.total() * 9 / 10;
  arena.allocate(first, 1).expect("allocate 90% of the arena");
  println!("Block 1 allocated ({first} bytes)");

  let second = arena.total() / 5;
  match arena.allocate(second, 1) {
    Err(AllocError::CapacityExceeded { requested, available }) => {
      println!("Block 2 correctly rejected: need {requested} bytes, {available} available");
    }
    Ok(_) => panic!("block 2 unexpectedly fit"),
    Err(err) => panic!("unexpected error: {err}"),
  }

  println!("Used: {}/{} bytes", arena.used(), arena.total());
  assert_eq!(arena.used(), first);
}

/// Reclaims everything at once and allocates again from the start.
fn reset_and_reuse() {
  println!("\n=== 4) Bulk reset ===");

  let mut arena = LinearAllocator::with_capacity(200).expect("create arena");

  let first = arena.allocate(50, 1).expect("allocate 50 bytes");
  println!("Before reset: {} bytes used", arena.used());

  arena.reset();
  println!("After reset: {} bytes used", arena.used());
  assert_eq!(arena.used(), 0);

  let second = arena.allocate(50, 1).expect("allocate 50 bytes again");
  assert_eq!(first, second);
  println!("Memory is available again, same address handed out: {:p}", second.as_ptr());
}

/// Allocates blocks with increasing alignment requirements.
fn alignment_ladder() {
  println!("\n=== 5) A ladder of alignments ===");

  let mut arena = LinearAllocator::with_capacity(500).expect("create arena");

  for (i, (size, alignment)) in [(10, 1), (20, 4), (30, 8), (40, 16)].into_iter().enumerate() {
    let block = arena.allocate(size, alignment).expect("allocate block");
    let addr = block.as_ptr() as usize;

    println!(
      "Block {}: {:p}, aligned to {}: {}",
      i + 1,
      block.as_ptr(),
      alignment,
      if addr % alignment == 0 { "yes" } else { "no" },
    );
    assert_eq!(addr % alignment, 0);
  }
}
