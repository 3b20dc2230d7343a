//! Shared test utilities for the bioportal integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod builders;
pub mod fake_bioportal;
pub mod fixtures;

pub use builders::*;
pub use fake_bioportal::FakeBioPortal;
pub use fixtures::*;
