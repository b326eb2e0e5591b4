//! Goal channel encoding.

use crate::channel::{Channel, GOAL};
use pathset_core::{ObsError, Position};

/// A `rows x cols` channel of zeros with [`GOAL`] at `goal`.
///
/// The goal channel does not depend on the agent, so a synthesizer
/// computes it once per episode and reuses it for every frame.
pub fn encode_goal(rows: u32, cols: u32, goal: Position) -> Result<Channel, ObsError> {
    let mut channel = Channel::filled(rows, cols, 0);
    channel.set(goal, GOAL)?;
    Ok(channel)
}
