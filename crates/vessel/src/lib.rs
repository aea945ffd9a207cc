//! Contiguous growable array built on explicitly managed raw storage.
//!
//! Vessel separates *reserved capacity* from *initialised extent*: one type
//! owns an uninitialised block, another tracks which prefix of that block
//! holds live values and is responsible for every construction and
//! destruction within it.
//!
//! # Architecture
//!
//! ```text
//! Vector<T> (lifetime, growth, mutation API)
//! ├── RawMemory<T> (allocation, capacity, ownership transfer)
//! ├── len          (live prefix [0, len) of the block)
//! └── GrowthPolicy (max(1, len * 2) when full)
//! ```
//!
//! # Failure model
//!
//! - **Allocation** failures are [`VectorError`] values from the `try_*`
//!   operations; the infallible operations panic on capacity overflow and
//!   route allocator failure to [`std::alloc::handle_alloc_error`].
//! - **Element** failures are panics from user `Default`, `Clone`, or
//!   constructor closures. The vector restores its invariants before the
//!   unwind continues: nothing leaks, nothing is dropped twice, and growth
//!   paths leave the vector unchanged.
//! - **Contract violations** (out-of-range positions) panic. Unchecked access
//!   is available only through `unsafe` methods.
//!
//! The container performs no synchronisation; `Vector<T>` is `Send`/`Sync`
//! exactly when `T` is.
//!
//! # Example
//!
//! ```
//! use vessel::Vector;
//!
//! let mut v = Vector::new();
//! v.push_back(1);
//! v.push_back(2);
//! v.push_back(3);
//! v.insert(1, 99);
//! assert_eq!(v.as_slice(), &[1, 99, 2, 3]);
//! v.erase(0);
//! assert_eq!(v.as_slice(), &[99, 2, 3]);
//! assert_eq!(v.len(), 3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod error;
pub mod iter;
pub mod raw;
pub mod vector;

// Public re-exports for the primary API surface.
pub use config::GrowthPolicy;
pub use error::VectorError;
pub use iter::IntoIter;
pub use raw::RawMemory;
pub use vector::Vector;
