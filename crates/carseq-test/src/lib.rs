//! Shared test fixtures for CarSeq crates.
//!
//! This crate stands in for the constraint engine the search core plugs
//! into. It is only ever used as a dev-dependency.
//!
//! - [`store`] - Trail-backed in-memory domain store
//! - [`driver`] - Depth-first search loop with binary branching
//! - [`instances`] - Small car-sequencing instances
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! carseq-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use carseq_test::{instances, TrailedStore};
//!
//! let problem = instances::textbook();
//! let (mut store, vars) = TrailedStore::for_sequence(&problem);
//! ```

pub mod driver;
pub mod instances;
pub mod store;

pub use driver::{check_assigned_prefix, DepthFirst};
pub use store::TrailedStore;
