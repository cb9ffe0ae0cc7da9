//! Integration test crate for the Grove staking workspace.
//!
//! This crate has no library code — it only contains integration tests
//! that exercise end-to-end staking flows across multiple workspace crates.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p grove-integration-tests
//! ```
