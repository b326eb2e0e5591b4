//! Visibility regions and compiled region masks.

use pathset_core::Position;
use serde::{Deserialize, Serialize};

/// Shape of the visible neighbourhood around the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Neighbourhood {
    /// Square window: cells with Chebyshev distance `<= radius`.
    #[default]
    Chebyshev,
    /// Diamond window: cells with Manhattan distance `<= radius`.
    Manhattan,
}

impl Neighbourhood {
    /// Distance between two positions under this neighbourhood's metric.
    pub fn distance(self, a: Position, b: Position) -> u32 {
        match self {
            Self::Chebyshev => a.chebyshev(b),
            Self::Manhattan => a.manhattan(b),
        }
    }
}

/// How far the agent can see.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Cells within this distance of the agent are visible; `0` shows
    /// only the agent's own cell.
    Radius(u32),
    /// The whole grid is visible.
    Unbounded,
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Radius(2)
    }
}

/// Visibility radius plus neighbourhood shape.
///
/// The default is a Chebyshev radius of 2, i.e. a 5x5 window centred on
/// the agent.
///
/// # Examples
///
/// ```
/// use pathset_core::Position;
/// use pathset_space::{Neighbourhood, Viewport, Visibility};
///
/// let vp = Viewport::new(Visibility::Radius(1), Neighbourhood::Manhattan);
/// assert!(vp.contains(Position::new(2, 2), Position::new(2, 3)));
/// assert!(!vp.contains(Position::new(2, 2), Position::new(3, 3)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Sight radius.
    pub visibility: Visibility,
    /// Window shape.
    pub neighbourhood: Neighbourhood,
}

impl Viewport {
    /// Create a viewport.
    pub fn new(visibility: Visibility, neighbourhood: Neighbourhood) -> Self {
        Self {
            visibility,
            neighbourhood,
        }
    }

    /// A viewport that sees everything.
    pub fn unbounded() -> Self {
        Self::new(Visibility::Unbounded, Neighbourhood::default())
    }

    /// Whether `cell` is visible from `center`.
    pub fn contains(&self, center: Position, cell: Position) -> bool {
        match self.visibility {
            Visibility::Unbounded => true,
            Visibility::Radius(r) => self.neighbourhood.distance(center, cell) <= r,
        }
    }
}

/// Compiled visibility mask over a `rows x cols` grid, row-major.
///
/// Created by [`RegionMask::around`] for a single centre, or combined
/// from several masks with [`RegionMask::union_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionMask {
    rows: u32,
    cols: u32,
    visible: Vec<bool>,
}

impl RegionMask {
    /// A mask with no visible cells.
    pub fn empty(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            visible: vec![false; rows as usize * cols as usize],
        }
    }

    /// A mask with every cell visible.
    pub fn full(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            visible: vec![true; rows as usize * cols as usize],
        }
    }

    /// Cells of a `rows x cols` grid visible from `center`.
    ///
    /// Only the bounding box of the window is scanned. A centre outside
    /// the grid is allowed; the mask then holds whatever part of the
    /// window overlaps the grid.
    pub fn around(rows: u32, cols: u32, center: Position, viewport: &Viewport) -> Self {
        let radius = match viewport.visibility {
            Visibility::Unbounded => return Self::full(rows, cols),
            Visibility::Radius(r) => i64::from(r),
        };
        let mut mask = Self::empty(rows, cols);
        let r_lo = (i64::from(center.row) - radius).max(0);
        let r_hi = (i64::from(center.row) + radius).min(i64::from(rows) - 1);
        let c_lo = (i64::from(center.col) - radius).max(0);
        let c_hi = (i64::from(center.col) + radius).min(i64::from(cols) - 1);
        for r in r_lo..=r_hi {
            for c in c_lo..=c_hi {
                let cell = Position::new(r as i32, c as i32);
                if viewport.contains(center, cell) {
                    mask.visible[r as usize * cols as usize + c as usize] = true;
                }
            }
        }
        mask
    }

    /// Mark every cell visible in `other` as visible in `self`.
    ///
    /// Both masks must cover the same grid shape.
    pub fn union_with(&mut self, other: &RegionMask) {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        for (a, &b) in self.visible.iter_mut().zip(&other.visible) {
            *a |= b;
        }
    }

    /// Whether `pos` is inside the grid and visible.
    pub fn is_visible(&self, pos: Position) -> bool {
        if pos.row < 0 || pos.col < 0 || pos.row as u32 >= self.rows || pos.col as u32 >= self.cols
        {
            return false;
        }
        self.visible[pos.row as usize * self.cols as usize + pos.col as usize]
    }

    /// Number of visible cells.
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|&&v| v).count()
    }

    /// Fraction of the grid that is visible.
    pub fn visible_ratio(&self) -> f64 {
        if self.visible.is_empty() {
            return 0.0;
        }
        self.visible_count() as f64 / self.visible.len() as f64
    }

    /// Row-major visibility flags.
    pub fn as_slice(&self) -> &[bool] {
        &self.visible
    }

    /// `(rows, cols)` covered by the mask.
    pub fn shape(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }
}
