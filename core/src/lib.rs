#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the wayfinder simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! changed. Systems read the world through borrowed views such as
//! [`TerrainView`] and never mutate it directly.

use std::ops::Neg;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single grid cell expressed as `(x, y)` coordinates.
///
/// `x` indexes the grid's rows and `y` its columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: u32,
    y: u32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based row coordinate.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based column coordinate.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Computes the Manhattan distance between two positions.
    ///
    /// Saturates at `u32::MAX` for positions far outside any grid.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    /// Signed displacement that moves `self` onto `other` without wrapping.
    #[must_use]
    pub fn delta_to(self, other: Position) -> GridDelta {
        GridDelta::new(
            i64::from(other.x) - i64::from(self.x),
            i64::from(other.y) - i64::from(self.y),
        )
    }
}

/// Signed integer displacement between two grid positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDelta {
    dx: i64,
    dy: i64,
}

impl GridDelta {
    /// Displacement that leaves every position unchanged.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a displacement from its components.
    #[must_use]
    pub const fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }

    /// Displacement along the row axis.
    #[must_use]
    pub const fn dx(&self) -> i64 {
        self.dx
    }

    /// Displacement along the column axis.
    #[must_use]
    pub const fn dy(&self) -> i64 {
        self.dy
    }

    /// Reports whether the displacement is zero on both axes.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Reports whether the displacement is a single 8-connected step.
    #[must_use]
    pub fn is_step(&self) -> bool {
        !self.is_zero() && self.dx.abs() <= 1 && self.dy.abs() <= 1
    }
}

impl Neg for GridDelta {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.dx, -self.dy)
    }
}

/// Stable identity of a cell, equal to its dense row-major index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey(usize);

impl CellKey {
    /// Wraps a dense index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Dense index into row-major grid storage.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// Dimensions of a rectangular grid measured in whole cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    rows: u32,
    cols: u32,
}

impl GridDimensions {
    /// Creates a new dimension descriptor.
    #[must_use]
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Number of rows, the extent of the `x` axis.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns, the extent of the `y` axis.
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of cells contained in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let count = u64::from(self.rows) * u64::from(self.cols);
        usize::try_from(count).unwrap_or(0)
    }

    /// Reports whether the grid has no cells at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x() < self.rows && position.y() < self.cols
    }

    /// Identity key of the provided position, if it lies inside the grid.
    #[must_use]
    pub fn key(&self, position: Position) -> Option<CellKey> {
        if !self.contains(position) {
            return None;
        }

        let x = usize::try_from(position.x()).ok()?;
        let y = usize::try_from(position.y()).ok()?;
        let cols = usize::try_from(self.cols).ok()?;
        Some(CellKey::new(x.checked_mul(cols)?.checked_add(y)?))
    }

    /// Position addressed by the provided key, if the key is in range.
    #[must_use]
    pub fn position(&self, key: CellKey) -> Option<Position> {
        if key.index() >= self.cell_count() {
            return None;
        }

        let cols = usize::try_from(self.cols).ok()?;
        let x = u32::try_from(key.index() / cols).ok()?;
        let y = u32::try_from(key.index() % cols).ok()?;
        Some(Position::new(x, y))
    }

    /// Maps arbitrary signed coordinates onto the torus.
    ///
    /// Uses a Euclidean modulo so negative coordinates wrap to the far edge.
    #[must_use]
    pub fn wrap(&self, x: i64, y: i64) -> Option<Position> {
        if self.is_empty() {
            return None;
        }

        let x = x.rem_euclid(i64::from(self.rows));
        let y = y.rem_euclid(i64::from(self.cols));
        Some(Position::new(
            u32::try_from(x).ok()?,
            u32::try_from(y).ok()?,
        ))
    }

    /// Translates a position by the provided delta, wrapping at the edges.
    #[must_use]
    pub fn offset(&self, position: Position, delta: GridDelta) -> Option<Position> {
        self.wrap(
            i64::from(position.x()) + delta.dx(),
            i64::from(position.y()) + delta.dy(),
        )
    }

    /// Iterates every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |x| (0..cols).map(move |y| Position::new(x, y)))
    }
}

/// Terrain classification assigned to every cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TerrainKind {
    /// Traversable ground.
    #[default]
    Open = 0,
    /// Impassable obstruction.
    Obstacle = 1,
    /// Rocky ground, impassable under the default obstacle set.
    Rock = 2,
}

impl TerrainKind {
    /// Every terrain kind in code order.
    pub const ALL: [TerrainKind; 3] = [Self::Open, Self::Obstacle, Self::Rock];

    /// Numeric code of the terrain kind.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Parses a map glyph as read by [`TerrainGrid::from_rows`].
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Self::Open),
            '#' => Some(Self::Obstacle),
            '^' => Some(Self::Rock),
            _ => None,
        }
    }

    const fn bit(self) -> u8 {
        1 << self.code()
    }
}

/// Set of terrain kinds treated as impassable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<TerrainKind>", into = "Vec<TerrainKind>")]
pub struct ObstacleSet {
    mask: u8,
}

impl ObstacleSet {
    /// Set that blocks nothing.
    pub const EMPTY: Self = Self { mask: 0 };

    /// Returns a copy of the set that additionally blocks `kind`.
    #[must_use]
    pub const fn with(self, kind: TerrainKind) -> Self {
        Self {
            mask: self.mask | kind.bit(),
        }
    }

    /// Reports whether the terrain kind is impassable.
    #[must_use]
    pub const fn contains(&self, kind: TerrainKind) -> bool {
        self.mask & kind.bit() != 0
    }

    /// Iterates the blocked kinds in code order.
    pub fn iter(&self) -> impl Iterator<Item = TerrainKind> + '_ {
        TerrainKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl Default for ObstacleSet {
    fn default() -> Self {
        Self::EMPTY
            .with(TerrainKind::Obstacle)
            .with(TerrainKind::Rock)
    }
}

impl From<Vec<TerrainKind>> for ObstacleSet {
    fn from(kinds: Vec<TerrainKind>) -> Self {
        kinds
            .into_iter()
            .fold(Self::EMPTY, |set, kind| set.with(kind))
    }
}

impl From<ObstacleSet> for Vec<TerrainKind> {
    fn from(set: ObstacleSet) -> Self {
        set.iter().collect()
    }
}

/// Read-only description of one grid square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    position: Position,
    kind: TerrainKind,
    key: CellKey,
}

impl Cell {
    /// Creates a cell description.
    #[must_use]
    pub const fn new(position: Position, kind: TerrainKind, key: CellKey) -> Self {
        Self {
            position,
            kind,
            key,
        }
    }

    /// Coordinates of the cell.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Terrain assigned to the cell.
    #[must_use]
    pub const fn kind(&self) -> TerrainKind {
        self.kind
    }

    /// Identity key of the cell.
    #[must_use]
    pub const fn key(&self) -> CellKey {
        self.key
    }
}

/// Failures raised while assembling a [`TerrainGrid`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TerrainError {
    /// Cell storage does not match the declared dimensions.
    #[error("terrain holds {actual} cells but {expected} were expected")]
    LengthMismatch {
        /// Number of cells implied by the dimensions.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },
    /// A textual row differs in width from the first row.
    #[error("terrain row {row} has {width} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Width of the offending row.
        width: usize,
        /// Width of the first row.
        expected: usize,
    },
    /// A textual row contains an unrecognised glyph.
    #[error("unknown terrain glyph `{glyph}`")]
    UnknownGlyph {
        /// Character that could not be parsed.
        glyph: char,
    },
}

/// Owned dense terrain grid produced by a world generator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TerrainGrid {
    dimensions: GridDimensions,
    cells: Vec<TerrainKind>,
}

impl TerrainGrid {
    /// Creates a grid where every cell carries the same terrain.
    #[must_use]
    pub fn filled(dimensions: GridDimensions, kind: TerrainKind) -> Self {
        Self {
            dimensions,
            cells: vec![kind; dimensions.cell_count()],
        }
    }

    /// Creates a grid by evaluating `kind_at` for every position.
    #[must_use]
    pub fn from_fn<F>(dimensions: GridDimensions, mut kind_at: F) -> Self
    where
        F: FnMut(Position) -> TerrainKind,
    {
        Self {
            dimensions,
            cells: dimensions.positions().map(|position| kind_at(position)).collect(),
        }
    }

    /// Wraps row-major cell storage, validating its length.
    pub fn from_cells(
        dimensions: GridDimensions,
        cells: Vec<TerrainKind>,
    ) -> Result<Self, TerrainError> {
        if cells.len() != dimensions.cell_count() {
            return Err(TerrainError::LengthMismatch {
                expected: dimensions.cell_count(),
                actual: cells.len(),
            });
        }

        Ok(Self { dimensions, cells })
    }

    /// Parses a grid from text rows, one string per `x` coordinate.
    ///
    /// `.` is open ground, `#` an obstacle and `^` rock.
    pub fn from_rows(rows: &[&str]) -> Result<Self, TerrainError> {
        let expected = rows.first().map_or(0, |row| row.chars().count());
        let mut cells = Vec::with_capacity(expected * rows.len());

        for (index, row) in rows.iter().enumerate() {
            let width = row.chars().count();
            if width != expected {
                return Err(TerrainError::RaggedRow {
                    row: index,
                    width,
                    expected,
                });
            }

            for glyph in row.chars() {
                let kind =
                    TerrainKind::from_glyph(glyph).ok_or(TerrainError::UnknownGlyph { glyph })?;
                cells.push(kind);
            }
        }

        let dimensions = GridDimensions::new(
            u32::try_from(rows.len()).unwrap_or(u32::MAX),
            u32::try_from(expected).unwrap_or(u32::MAX),
        );
        Self::from_cells(dimensions, cells)
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Row-major terrain storage.
    #[must_use]
    pub fn cells(&self) -> &[TerrainKind] {
        &self.cells
    }

    /// Terrain at the provided position, if it lies inside the grid.
    #[must_use]
    pub fn kind(&self, position: Position) -> Option<TerrainKind> {
        let key = self.dimensions.key(position)?;
        self.cells.get(key.index()).copied()
    }

    /// Overwrites the terrain at `position`. Returns `false` when out of bounds.
    pub fn set(&mut self, position: Position, kind: TerrainKind) -> bool {
        let Some(slot) = self
            .dimensions
            .key(position)
            .and_then(|key| self.cells.get_mut(key.index()))
        else {
            return false;
        };

        *slot = kind;
        true
    }

    /// Borrows the grid as a read-only view under the provided obstacle set.
    #[must_use]
    pub fn view(&self, obstacles: ObstacleSet, revision: u64) -> TerrainView<'_> {
        TerrainView::new(self.dimensions, &self.cells, obstacles, revision)
    }
}

/// Read-only view into the world's terrain.
#[derive(Clone, Copy, Debug)]
pub struct TerrainView<'a> {
    dimensions: GridDimensions,
    cells: &'a [TerrainKind],
    obstacles: ObstacleSet,
    revision: u64,
}

impl<'a> TerrainView<'a> {
    /// Captures a new view backed by the provided row-major cell slice.
    ///
    /// `revision` changes whenever the underlying terrain is replaced so
    /// readers can invalidate derived caches.
    #[must_use]
    pub fn new(
        dimensions: GridDimensions,
        cells: &'a [TerrainKind],
        obstacles: ObstacleSet,
        revision: u64,
    ) -> Self {
        Self {
            dimensions,
            cells,
            obstacles,
            revision,
        }
    }

    /// Dimensions of the terrain grid.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Kinds treated as impassable.
    #[must_use]
    pub const fn obstacles(&self) -> ObstacleSet {
        self.obstacles
    }

    /// Revision counter of the terrain backing this view.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Row-major terrain storage.
    #[must_use]
    pub fn cells(&self) -> &'a [TerrainKind] {
        self.cells
    }

    /// Terrain at the provided position, if it lies inside the grid.
    #[must_use]
    pub fn kind(&self, position: Position) -> Option<TerrainKind> {
        let key = self.dimensions.key(position)?;
        self.cells.get(key.index()).copied()
    }

    /// Full cell description at the provided position.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<Cell> {
        let key = self.dimensions.key(position)?;
        let kind = self.cells.get(key.index()).copied()?;
        Some(Cell::new(position, kind, key))
    }

    /// Terrain at signed coordinates wrapped onto the torus.
    ///
    /// Missing cells read as [`TerrainKind::Open`].
    #[must_use]
    pub fn kind_wrapped(&self, x: i64, y: i64) -> TerrainKind {
        self.dimensions
            .wrap(x, y)
            .and_then(|position| self.kind(position))
            .unwrap_or_default()
    }

    /// Reports whether the position is inside the grid and not obstructed.
    #[must_use]
    pub fn is_passable(&self, position: Position) -> bool {
        self.kind(position)
            .map_or(false, |kind| !self.obstacles.contains(kind))
    }
}

/// Read-only view into a belief distribution.
#[derive(Clone, Copy, Debug)]
pub struct BeliefView<'a> {
    dimensions: GridDimensions,
    values: &'a [f64],
}

impl<'a> BeliefView<'a> {
    /// Captures a view over row-major probabilities.
    #[must_use]
    pub fn new(dimensions: GridDimensions, values: &'a [f64]) -> Self {
        Self { dimensions, values }
    }

    /// Dimensions of the belief grid.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Row-major probabilities.
    #[must_use]
    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    /// Probability assigned to the provided position.
    #[must_use]
    pub fn probability(&self, position: Position) -> Option<f64> {
        let key = self.dimensions.key(position)?;
        self.values.get(key.index()).copied()
    }

    /// Sum of all probabilities.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Most probable position and its probability.
    ///
    /// Ties resolve to the first cell in row-major order.
    #[must_use]
    pub fn most_likely(&self) -> Option<(Position, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (index, value) in self.values.iter().copied().enumerate() {
            match best {
                Some((_, current)) if value <= current => {}
                _ => best = Some((index, value)),
            }
        }

        let (index, value) = best?;
        let position = self.dimensions.position(CellKey::new(index))?;
        Some((position, value))
    }
}

/// Likelihood weights applied when sensing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorModel {
    p_hit: f64,
    p_miss: f64,
}

impl SensorModel {
    /// Creates a sensor model from its hit and miss weights.
    #[must_use]
    pub const fn new(p_hit: f64, p_miss: f64) -> Self {
        Self { p_hit, p_miss }
    }

    /// Weight applied when the local terrain matches exactly.
    #[must_use]
    pub const fn p_hit(&self) -> f64 {
        self.p_hit
    }

    /// Weight applied on any mismatch.
    #[must_use]
    pub const fn p_miss(&self) -> f64 {
        self.p_miss
    }

    /// Weight for a sensing outcome.
    #[must_use]
    pub const fn weight(&self, matched: bool) -> f64 {
        if matched {
            self.p_hit
        } else {
            self.p_miss
        }
    }
}

/// Reasons a [`SimulationConfig`] is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// One of the grid dimensions is zero.
    #[error("grid must have at least one cell, got {rows}x{cols}")]
    EmptyGrid {
        /// Configured row count.
        rows: u32,
        /// Configured column count.
        cols: u32,
    },
    /// A sensor probability is outside `[0, 1]` or not finite.
    #[error("{name} must lie within [0, 1], got {value}")]
    ProbabilityOutOfRange {
        /// Name of the offending parameter.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Both sensor weights are zero, which erases every belief.
    #[error("p_hit and p_miss cannot both be zero")]
    DegenerateSensor,
    /// The blur factor is outside `[0, 1]` or not finite.
    #[error("blur must lie within [0, 1], got {value}")]
    BlurOutOfRange {
        /// Rejected value.
        value: f64,
    },
}

const DEFAULT_ROWS: u32 = 48;
const DEFAULT_COLS: u32 = 32;
const DEFAULT_P_HIT: f64 = 0.9;
const DEFAULT_P_MISS: f64 = 0.1;
const DEFAULT_BLUR: f64 = 0.5;
const DEFAULT_SEED: u64 = 0x5eed_7a1e_0bad_cafe;

/// Construction parameters of a simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of grid rows.
    pub rows: u32,
    /// Number of grid columns.
    pub cols: u32,
    /// Belief multiplier applied when the local terrain window matches.
    pub p_hit: f64,
    /// Belief multiplier applied otherwise.
    pub p_miss: f64,
    /// Diffusion strength in `[0, 1]`.
    pub blur: f64,
    /// Seed driving terrain generation.
    pub seed: u64,
    /// Terrain kinds the agent cannot enter.
    pub obstacles: ObstacleSet,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            p_hit: DEFAULT_P_HIT,
            p_miss: DEFAULT_P_MISS,
            blur: DEFAULT_BLUR,
            seed: DEFAULT_SEED,
            obstacles: ObstacleSet::default(),
        }
    }
}

impl SimulationConfig {
    /// Checks every parameter, reporting the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }

        check_probability("p_hit", self.p_hit)?;
        check_probability("p_miss", self.p_miss)?;
        if self.p_hit == 0.0 && self.p_miss == 0.0 {
            return Err(ConfigError::DegenerateSensor);
        }

        if !self.blur.is_finite() || !(0.0..=1.0).contains(&self.blur) {
            return Err(ConfigError::BlurOutOfRange { value: self.blur });
        }

        Ok(())
    }

    /// Grid dimensions described by the configuration.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        GridDimensions::new(self.rows, self.cols)
    }

    /// Sensor weights described by the configuration.
    #[must_use]
    pub const fn sensor_model(&self) -> SensorModel {
        SensorModel::new(self.p_hit, self.p_miss)
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Regenerates the terrain with the built-in noise generator.
    ConfigureWorld {
        /// Size of the new grid.
        dimensions: GridDimensions,
        /// Seed driving the generator.
        seed: u64,
        /// Terrain kinds the agent cannot enter.
        obstacles: ObstacleSet,
    },
    /// Installs terrain produced by an external generator.
    LoadTerrain {
        /// Terrain to install.
        terrain: TerrainGrid,
        /// Terrain kinds the agent cannot enter.
        obstacles: ObstacleSet,
    },
    /// Teleports the agent to the provided position.
    PlaceAgent {
        /// Destination of the agent.
        position: Position,
    },
    /// Sets or clears the navigation goal.
    SetGoal {
        /// New goal, or `None` to stop navigating.
        goal: Option<Position>,
    },
    /// Requests that the agent take one 8-connected step.
    MoveAgent {
        /// Cell the agent should step onto.
        to: Position,
    },
    /// Advances the simulation tick counter.
    Tick,
}

/// Events broadcast after commands are processed or systems run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that new terrain was installed.
    WorldConfigured {
        /// Size of the installed grid.
        dimensions: GridDimensions,
        /// Revision assigned to the installed terrain.
        revision: u64,
    },
    /// Confirms that the agent was placed.
    AgentPlaced {
        /// Position now occupied by the agent.
        position: Position,
    },
    /// Reports that a placement request was rejected.
    AgentPlacementRejected {
        /// Requested position.
        position: Position,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Announces that the goal changed.
    GoalChanged {
        /// Goal after processing the command.
        goal: Option<Position>,
    },
    /// Indicates that the tick counter advanced.
    TimeAdvanced {
        /// Tick index after advancing.
        tick: u64,
    },
    /// Confirms that the agent stepped between two cells.
    AgentMoved {
        /// Cell the agent occupied before moving.
        from: Position,
        /// Cell the agent occupies after moving.
        to: Position,
    },
    /// Reports that a step request was rejected.
    MoveRejected {
        /// Requested destination.
        to: Position,
        /// Specific reason the move failed.
        reason: MoveError,
    },
    /// Reports that the goal cannot be reached from the agent's cell.
    PathUnavailable {
        /// Cell the search started from.
        from: Position,
        /// Goal that could not be reached.
        goal: Position,
    },
    /// Announces that the agent stands on the goal.
    GoalReached {
        /// Goal that was reached.
        goal: Position,
    },
    /// Reports that the belief lost all mass and was reset to uniform.
    BeliefReset,
}

/// Reasons an agent placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum PlacementError {
    /// The position lies outside the grid.
    #[error("position lies outside the grid")]
    OutOfBounds,
    /// The position holds impassable terrain.
    #[error("position is obstructed")]
    Obstructed,
}

/// Reasons a step request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum MoveError {
    /// The world holds no agent yet.
    #[error("no agent has been placed")]
    NoAgent,
    /// The destination lies outside the grid.
    #[error("destination lies outside the grid")]
    OutOfBounds,
    /// The destination is not one 8-connected step away.
    #[error("destination is not adjacent")]
    NotAdjacent,
    /// The destination holds impassable terrain.
    #[error("destination is obstructed")]
    Obstructed,
}
