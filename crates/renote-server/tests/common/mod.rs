//! Common test utilities for REST integration tests.

pub mod assertions;
pub mod harness;

pub use assertions::*;
pub use harness::*;
