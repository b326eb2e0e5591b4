//! Observation composition for pathset.
//!
//! Turns a [`Grid`](pathset_space::Grid) and an agent position into the
//! two-channel [`Frame`] tensor emitted at every timestep:
//!
//! - channel 0 ([`Frame::STATE`]): the partially observed grid, with
//!   [`WALL`], [`FREE`] and [`UNSEEN`] cells and the agent's own cell
//!   marked [`AGENT`];
//! - channel 1 ([`Frame::GOAL`]): zeros with [`GOAL`] at the goal cell.
//!
//! Which cells are visible is decided by an [`Observer`] configured with
//! an [`ObservationPolicy`] and a [`Viewport`](pathset_space::Viewport).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod channel;
pub mod compose;
pub mod frame;
pub mod goal;
pub mod policy;

pub use channel::{Channel, AGENT, FREE, GOAL, UNSEEN, WALL};
pub use compose::{mark_agent, observe};
pub use frame::Frame;
pub use goal::encode_goal;
pub use policy::{ObservationPolicy, Observer};
