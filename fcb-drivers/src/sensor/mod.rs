//! Temperature sensor implementations

pub mod adt75;

pub use adt75::Adt75;
