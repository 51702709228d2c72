//! # lallocator - A Linear Arena Allocator Library
//!
//! This crate provides a fixed-capacity **linear allocator** (also known as an
//! arena or bump allocator) that manages a single anonymous memory mapping
//! obtained from the OS with `mmap`.
//!
//! ## Overview
//!
//! A linear allocator is one of the simplest memory allocation strategies:
//!
//! ```text
//!   Linear Allocator Concept:
//!
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                     ONE mmap RESERVATION                             │
//!   │                                                                      │
//!   │   ┌─────┬─────┬──┬─────┬─────┬────────────────────────────────────┐  │
//!   │   │ A1  │ A2  │▒▒│ A3  │ A4  │            Free Space              │  │
//!   │   └─────┴─────┴──┴─────┴─────┴────────────────────────────────────┘  │
//!   │                ▲              ▲                                 ▲    │
//!   │                │              │                                 │    │
//!   │            Padding          Cursor                          End of   │
//!   │         (alignment gap)  (next alloc)                      capacity  │
//!   │                                                                      │
//!   └──────────────────────────────────────────────────────────────────────┘
//!
//!   Each allocation bumps the cursor forward past an aligned region.
//!   Fast allocation: O(1) - just move the cursor.
//!   Fast reclamation: O(1) - reset rewinds the cursor to the start.
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   lallocator
//!   ├── align      - Alignment macro (align_up!)
//!   ├── error      - AllocError failure taxonomy
//!   ├── page       - Cached OS page size
//!   └── linear     - LinearAllocator implementation
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use std::mem;
//!
//! use lallocator::LinearAllocator;
//!
//! let mut arena = LinearAllocator::with_capacity(1024)?;
//!
//! // Allocate memory for a u64.
//! let ptr = arena.allocate(mem::size_of::<u64>(), mem::align_of::<u64>())?;
//! unsafe { ptr.cast::<u64>().write(42) };
//!
//! // Reclaim everything at once.
//! arena.reset();
//! assert_eq!(arena.used(), 0);
//! # Ok::<(), lallocator::AllocError>(())
//! ```
//!
//! ## How It Works
//!
//! The allocator reserves its entire capacity up front as one private
//! anonymous mapping, page-rounded and zero-filled by the OS:
//!
//! ```text
//!   Mapping Layout:
//!
//!   ┌───────────────────┬──────────────────────────────────────────────┐
//!   │    Bookkeeping    │              Usable Capacity                 │
//!   │   (fixed-size,    │                                              │
//!   │    reserved)      │   start            cursor                end │
//!   └───────────────────┴──────────────────────────────────────────────┘
//!   base                ▲
//!                       └── First pointer handed to callers
//!
//!   total mapping = round_up(bookkeeping + requested capacity, page size)
//!   capacity      = total mapping - bookkeeping
//! ```
//!
//! The mapping is released back to the OS in a single `munmap` when the
//! allocator is dropped.
//!
//! ## Features
//!
//! - **O(1) allocation**: aligning and bumping the cursor, nothing else
//! - **O(1) bulk reclamation**: `reset` rewinds the cursor
//! - **Proper alignment**: any power-of-two alignment per allocation
//! - **Explicit failures**: every fallible operation returns a `Result`
//!
//! ## Limitations
//!
//! - **No per-object free**: memory comes back only via reset or drop
//! - **Fixed capacity**: the arena never grows after creation
//! - **Single-threaded only**: the type is `!Send + !Sync` by construction
//! - **Unix-only**: requires `libc` (`mmap`, `munmap`, `sysconf`)
//!
//! ## Safety
//!
//! The allocator hands out raw `NonNull<u8>` pointers into memory it owns.
//! Reading and writing through them requires `unsafe`, and pointers
//! obtained before a `reset` must not be used afterwards.

pub mod align;
mod error;
mod linear;
mod page;

pub use error::AllocError;
pub use linear::LinearAllocator;
pub use page::page_size;
