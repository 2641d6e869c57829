//! Touch controller implementations

pub mod cap1296;

pub use cap1296::{Cap1296, Cap1296Config};
