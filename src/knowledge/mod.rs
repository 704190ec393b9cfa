//! Intent knowledge base.
//!
//! A static set of intents loaded once at startup. Each intent pairs trigger
//! patterns with candidate responses; matching is a case-insensitive
//! substring scan in sequence order.

mod intent;
mod loader;

pub use intent::*;
pub use loader::*;
