//! Grid generation: the [`GridGenerator`] seam and the reference
//! [`RandomGridGenerator`].

use crate::error::WorldError;
use crate::maze;
use pathset_core::Position;
use pathset_space::{Cell, Grid};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// One sampled navigation problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    /// The world.
    pub grid: Grid,
    /// Where the agent starts. Always a free cell.
    pub start: Position,
    /// Where the agent must go. Always a free cell.
    pub goal: Position,
}

/// Source of navigation problems.
///
/// Implementations must draw all randomness from `rng` so that a dataset
/// driver seeding it per episode gets reproducible samples.
pub trait GridGenerator: Send + Sync {
    /// Draw a `rows x cols` grid with a start and a goal cell.
    fn sample(&self, rows: u32, cols: u32, rng: &mut dyn RngCore) -> Result<Sample, WorldError>;
}

/// Layout family of a [`RandomGridGenerator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridKind {
    /// No walls.
    #[default]
    Free,
    /// Independent random walls; may be disconnected.
    Obstacle,
    /// Depth-first maze; always connected.
    Maze,
}

impl GridKind {
    /// Lower-case name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Obstacle => "obstacle",
            Self::Maze => "maze",
        }
    }
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GridKind {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "obstacle" => Ok(Self::Obstacle),
            "maze" => Ok(Self::Maze),
            _ => Err(WorldError::UnknownGridKind { name: s.to_string() }),
        }
    }
}

/// Random grids with distinct free start and goal cells.
///
/// Constructed with [`RandomGridGenerator::new`] for default settings or
/// via [`RandomGridGenerator::builder`].
///
/// # Examples
///
/// ```
/// use pathset_world::{GridGenerator, GridKind, RandomGridGenerator};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let generator = RandomGridGenerator::builder()
///     .kind(GridKind::Obstacle)
///     .obstacle_density(0.3)
///     .build()
///     .unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(0);
/// let sample = generator.sample(9, 9, &mut rng).unwrap();
///
/// assert!(sample.grid.is_free(sample.start));
/// assert_ne!(sample.start, sample.goal);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeneratorSettings")]
pub struct RandomGridGenerator {
    kind: GridKind,
    obstacle_density: f64,
}

/// Unvalidated wire form; deserialization goes through the builder.
#[derive(Deserialize)]
struct GeneratorSettings {
    #[serde(default)]
    kind: GridKind,
    #[serde(default = "default_density")]
    obstacle_density: f64,
}

fn default_density() -> f64 {
    RandomGridGenerator::DEFAULT_DENSITY
}

impl TryFrom<GeneratorSettings> for RandomGridGenerator {
    type Error = WorldError;

    fn try_from(settings: GeneratorSettings) -> Result<Self, Self::Error> {
        RandomGridGenerator::builder()
            .kind(settings.kind)
            .obstacle_density(settings.obstacle_density)
            .build()
    }
}

/// Builder for [`RandomGridGenerator`].
pub struct RandomGridGeneratorBuilder {
    kind: GridKind,
    obstacle_density: f64,
}

impl RandomGridGenerator {
    /// Default wall probability for [`GridKind::Obstacle`].
    pub const DEFAULT_DENSITY: f64 = 0.2;

    /// A generator of `kind` with the default obstacle density.
    pub fn new(kind: GridKind) -> Self {
        Self {
            kind,
            obstacle_density: Self::DEFAULT_DENSITY,
        }
    }

    /// Create a new builder.
    pub fn builder() -> RandomGridGeneratorBuilder {
        RandomGridGeneratorBuilder {
            kind: GridKind::default(),
            obstacle_density: Self::DEFAULT_DENSITY,
        }
    }

    /// Layout family.
    pub fn kind(&self) -> GridKind {
        self.kind
    }

    /// Wall probability per cell for [`GridKind::Obstacle`].
    pub fn obstacle_density(&self) -> f64 {
        self.obstacle_density
    }

    fn layout(&self, rows: u32, cols: u32, rng: &mut dyn RngCore) -> Result<Grid, WorldError> {
        let grid = match self.kind {
            GridKind::Free => Grid::new(rows, cols)?,
            GridKind::Obstacle => {
                let density = self.obstacle_density;
                Grid::from_fn(rows, cols, |_| {
                    if rng.random_bool(density) {
                        Cell::Wall
                    } else {
                        Cell::Free
                    }
                })?
            }
            GridKind::Maze => maze::carve(rows, cols, rng)?,
        };
        Ok(grid)
    }
}

impl Default for RandomGridGenerator {
    fn default() -> Self {
        Self::new(GridKind::default())
    }
}

impl RandomGridGeneratorBuilder {
    /// Set the layout family (default: free).
    pub fn kind(mut self, kind: GridKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the wall probability for obstacle grids (default: 0.2).
    pub fn obstacle_density(mut self, density: f64) -> Self {
        self.obstacle_density = density;
        self
    }

    /// Build the generator.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDensity`] if the density is not in
    /// `[0, 1]`.
    pub fn build(self) -> Result<RandomGridGenerator, WorldError> {
        if !(0.0..=1.0).contains(&self.obstacle_density) {
            return Err(WorldError::InvalidDensity {
                reason: format!("must be in [0, 1], got {}", self.obstacle_density),
            });
        }
        Ok(RandomGridGenerator {
            kind: self.kind,
            obstacle_density: self.obstacle_density,
        })
    }
}

impl GridGenerator for RandomGridGenerator {
    fn sample(&self, rows: u32, cols: u32, rng: &mut dyn RngCore) -> Result<Sample, WorldError> {
        let grid = self.layout(rows, cols, rng)?;
        let free: Vec<Position> = grid.free_positions().collect();
        if free.len() < 2 {
            return Err(WorldError::NotEnoughFreeCells {
                rows,
                cols,
                free: free.len(),
            });
        }
        let (start, goal) = pick_distinct(&free, rng);
        trace!(kind = %self.kind, rows, cols, free = free.len(), %start, %goal, "sampled grid");
        Ok(Sample { grid, start, goal })
    }
}

/// Two distinct uniform elements of `cells`, which must hold at least two.
fn pick_distinct(cells: &[Position], rng: &mut dyn RngCore) -> (Position, Position) {
    let n = cells.len();
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    (cells[i], cells[j])
}
