//! Grids and visibility regions for pathset.
//!
//! This crate defines the [`Grid`], the immutable wall/free world every
//! episode is synthesized from, and the [`Viewport`]/[`RegionMask`] pair
//! that decides which cells an agent can see from a given position.
//!
//! # Visibility
//!
//! A [`Viewport`] combines a [`Visibility`] radius (or unbounded sight)
//! with a [`Neighbourhood`] shape (Chebyshev square or Manhattan
//! diamond). It is compiled against a grid shape and a centre into a
//! [`RegionMask`] for per-cell lookups.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod region;

#[cfg(test)]
pub(crate) mod compliance;

pub use error::SpaceError;
pub use grid::{Cell, Grid};
pub use region::{Neighbourhood, RegionMask, Viewport, Visibility};
