//! Language model adapter.
//!
//! Wraps an external text-completion service behind a single synchronous
//! (from the caller's view) `generate` call. Load happens once; a failed
//! load leaves the adapter `Unavailable` and every later generation attempt
//! fails with [`ModelError::Unavailable`].

mod client;

pub use client::*;
