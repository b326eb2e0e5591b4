//! Test utilities for pathset development.
//!
//! Provides ASCII grid fixtures and scripted implementations of the
//! world traits ([`GridGenerator`](pathset_world::GridGenerator),
//! [`PathOracle`](pathset_world::PathOracle)) so pipeline tests can
//! pin exactly which problems an episode or dataset sees.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    disconnected_sample, grid, path, FixedGenerator, FixedPathOracle, NoPathOracle,
    ScriptedGenerator,
};
