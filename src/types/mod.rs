//! Common types used across the Firi client library.

pub mod common;

pub use common::*;
