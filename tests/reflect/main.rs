//! Reflection Comparison Test Suite
//!
//! End-to-end coverage of the deep comparator through the public API:
//!
//! - `cycles`: reflexivity, symmetry and termination on cyclic graphs
//! - `modes`: numeric widening, ignore-defaults, lenient dates
//! - `collections`: positional and lenient-order collections, maps
//! - `objects`: class hierarchies, skipped fields, sealed classes, lazy proxies
//! - `assertions`: assertion reports, property paths, configuration
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test reflect
//!
//! # One module
//! cargo test --test reflect collections::
//! ```

#[path = "../common/mod.rs"]
mod common;

mod collections;
mod objects;
