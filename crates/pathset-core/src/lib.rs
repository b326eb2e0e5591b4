//! Core types for pathset.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace: grid
//! [`Position`]s, action labels, the fixed [`MovementVocabulary`] that
//! maps unit displacements to labels, and the error types of each
//! pipeline stage.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod movement;

pub use error::{EpisodeError, ObsError, PlanError, VocabularyError};
pub use id::{Action, Position};
pub use movement::{Movement, MovementVocabulary};
