//! The two-channel `(rows, cols, 2)` frame tensor.

use crate::channel::Channel;
use pathset_core::{ObsError, Position};

/// A `(rows, cols, 2)` `i8` tensor, row-major with the channel axis
/// innermost: element `(r, c, k)` lives at `(r * cols + c) * 2 + k`.
///
/// Channel [`Frame::STATE`] holds the observed state with the agent
/// marker; channel [`Frame::GOAL`] holds the goal marker.
///
/// # Examples
///
/// ```
/// use pathset_core::Position;
/// use pathset_obs::{encode_goal, Channel, Frame, FREE};
///
/// let state = Channel::filled(3, 3, FREE);
/// let goal = encode_goal(3, 3, Position::new(2, 2)).unwrap();
/// let frame = Frame::stack(&state, &goal).unwrap();
///
/// assert_eq!(frame.shape(), [3, 3, 2]);
/// assert_eq!(frame.get(Position::new(2, 2), Frame::GOAL), Some(10));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    rows: u32,
    cols: u32,
    data: Vec<i8>,
}

impl Frame {
    /// Number of channels.
    pub const CHANNELS: usize = 2;
    /// Index of the state channel.
    pub const STATE: usize = 0;
    /// Index of the goal channel.
    pub const GOAL: usize = 1;

    /// Interleave a state and a goal channel into a new frame.
    pub fn stack(state: &Channel, goal: &Channel) -> Result<Self, ObsError> {
        if state.shape() != goal.shape() {
            return Err(ObsError::ShapeMismatch {
                expected: state.shape(),
                actual: goal.shape(),
            });
        }
        let mut data = Vec::with_capacity(state.as_slice().len() * Self::CHANNELS);
        for (&s, &g) in state.as_slice().iter().zip(goal.as_slice()) {
            data.push(s);
            data.push(g);
        }
        Ok(Self {
            rows: state.rows(),
            cols: state.cols(),
            data,
        })
    }

    /// `[rows, cols, 2]`.
    pub fn shape(&self) -> [usize; 3] {
        [self.rows as usize, self.cols as usize, Self::CHANNELS]
    }

    /// Value of `channel` at `pos`, or `None` when either is out of range.
    pub fn get(&self, pos: Position, channel: usize) -> Option<i8> {
        if channel >= Self::CHANNELS
            || pos.row < 0
            || pos.col < 0
            || pos.row as u32 >= self.rows
            || pos.col as u32 >= self.cols
        {
            return None;
        }
        let cell = pos.row as usize * self.cols as usize + pos.col as usize;
        Some(self.data[cell * Self::CHANNELS + channel])
    }

    /// Copy one channel out of the frame. Returns `None` for an unknown
    /// channel index.
    pub fn channel(&self, channel: usize) -> Option<Channel> {
        (channel < Self::CHANNELS).then(|| self.extract(channel))
    }

    /// Copy of the state channel.
    pub fn state(&self) -> Channel {
        self.extract(Self::STATE)
    }

    /// Copy of the goal channel.
    pub fn goal(&self) -> Channel {
        self.extract(Self::GOAL)
    }

    fn extract(&self, channel: usize) -> Channel {
        let values = self
            .data
            .iter()
            .skip(channel)
            .step_by(Self::CHANNELS)
            .copied()
            .collect();
        Channel::from_raw(self.rows, self.cols, values)
    }

    /// Flat tensor in `(rows, cols, 2)` order.
    pub fn as_slice(&self) -> &[i8] {
        &self.data
    }

    /// Consume the frame, returning its flat buffer.
    pub fn into_vec(self) -> Vec<i8> {
        self.data
    }
}
