//! Configuration types
//!
//! The owner record is stored as postcard binary data; runtime tuning is
//! compiled in through `Default` implementations.

pub mod badge;
pub mod runtime;

pub use badge::*;
pub use runtime::*;
