//! Test doubles for Vessel development.
//!
//! The container promises that a panicking `Default`, `Clone`, or
//! constructor never leaks an element and never drops one twice. The
//! fixtures here make those promises observable:
//!
//! - [`LiveTracker`] / [`Tracked`] — count live instances.
//! - [`CloneBomb`] — panics on a chosen clone.
//! - [`DefaultBomb`] — panics once a per-thread construction budget runs out.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{panics, CloneBomb, CloneFuse, DefaultBomb, LiveTracker, Tracked};
