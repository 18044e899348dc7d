#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake Pilot engine.
//!
//! This crate defines the vocabulary that connects adapters, the
//! authoritative world, and pure systems. Adapters and controllers submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that systems react to deterministically. The two data structures with real
//! algorithmic weight live here as well: the [`BoundedHistory`] that models
//! the snake's body and the [`Grid`] it moves on.

mod grid;
mod history;

pub use grid::{Cell, Grid};
pub use history::BoundedHistory;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title shown by adapters when the experience boots.
pub const GAME_TITLE: &str = "Snake Pilot";

/// Points awarded per unit of body capacity.
pub const SCORE_PER_SEGMENT: u64 = 100;

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so that a prospective head position one step past
/// the left or top edge is representable and can be rejected by the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct CellCoord {
    column: i32,
    row: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Neighbouring coordinate one unit step away in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (column_delta, row_delta) = direction.delta();
        Self {
            column: self.column.saturating_add(column_delta),
            row: self.row.saturating_add(row_delta),
        }
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }
}

impl From<(i32, i32)> for CellCoord {
    fn from((column, row): (i32, i32)) -> Self {
        Self::new(column, row)
    }
}

impl From<CellCoord> for (i32, i32) {
    fn from(cell: CellCoord) -> Self {
        (cell.column, cell.row)
    }
}

/// Cardinal movement directions available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in the order the planner explores neighbours.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit vector as `(column_delta, row_delta)`.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Direction of the unit step from `from` to `to`, if they are 4-adjacent.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Self> {
        let column_delta = i64::from(to.column()) - i64::from(from.column());
        let row_delta = i64::from(to.row()) - i64::from(from.row());
        match (column_delta, row_delta) {
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }
}

/// Semantic tag attached to a grid cell, independent of rendering colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// Nothing of interest occupies the cell.
    #[default]
    Empty,
    /// The cell holds food that grows the snake when entered.
    Food,
}

/// Ordered sequence of 4-adjacent cells from a source to a target, both inclusive.
///
/// An empty path means no route exists; a single-cell path means the source
/// already is the target. Neither carries a movement decision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    cells: Vec<CellCoord>,
}

impl Path {
    /// Wraps the provided cells, which must already be 4-adjacent in order.
    #[must_use]
    pub fn new(cells: Vec<CellCoord>) -> Self {
        debug_assert!(
            cells
                .windows(2)
                .all(|pair| Direction::between(pair[0], pair[1]).is_some()),
            "path cells must be 4-adjacent"
        );
        Self { cells }
    }

    /// Path that signals "no route".
    #[must_use]
    pub const fn empty() -> Self {
        Self { cells: Vec::new() }
    }

    /// Cells composing the path, source first.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Number of cells in the path, endpoints included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the path holds no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether the path implies at least one move.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.cells.len() > 1
    }

    /// First cell of the path.
    #[must_use]
    pub fn source(&self) -> Option<CellCoord> {
        self.cells.first().copied()
    }

    /// Final cell of the path.
    #[must_use]
    pub fn target(&self) -> Option<CellCoord> {
        self.cells.last().copied()
    }

    /// Direction of the move from cell `index` to cell `index + 1`.
    #[must_use]
    pub fn step(&self, index: usize) -> Option<Direction> {
        let from = *self.cells.get(index)?;
        let to = *self.cells.get(index.checked_add(1)?)?;
        Direction::between(from, to)
    }

    /// Number of moves the path describes.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

/// Reasons a game ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalReason {
    /// The head left the grid.
    OutOfBounds,
    /// The head ran into the snake's own body.
    SelfCollided,
}

impl TerminalReason {
    /// Player-facing description of the terminal condition.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::OutOfBounds => "Snake hit a wall!",
            Self::SelfCollided => "Snake ate itself!",
        }
    }
}

/// Lifecycle state of the snake.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SnakeStatus {
    /// The snake can keep moving.
    #[default]
    Alive,
    /// The game has ended for the attached reason.
    Terminated(TerminalReason),
}

impl SnakeStatus {
    /// Reports whether the game has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Terminated(_))
    }

    /// Terminal reason, when the game has ended.
    #[must_use]
    pub const fn terminal_reason(self) -> Option<TerminalReason> {
        match self {
            Self::Alive => None,
            Self::Terminated(reason) => Some(reason),
        }
    }
}

/// Reasons a food placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementError {
    /// The requested cell lies outside the grid.
    OutOfBounds,
    /// The requested cell is covered by the snake.
    Occupied,
    /// Another food cell already exists.
    AlreadyPresent,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Records the heading used by subsequent advances.
    Steer {
        /// Requested direction of travel.
        direction: Direction,
    },
    /// Moves the snake a single step along its current heading.
    Advance,
    /// Requests that food be placed at the provided cell.
    PlaceFood {
        /// Cell that should receive the food marker.
        cell: CellCoord,
    },
    /// Removes every food marker from the grid.
    ClearFood,
    /// Rebuilds the grid and snake from the world's configuration.
    Reset,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms the snake's heading for the next advance.
    HeadingChanged {
        /// Direction the snake will travel.
        direction: Direction,
    },
    /// Reports that a reversing input was replaced by the last real movement.
    SteeringCorrected {
        /// Direction the input asked for.
        requested: Direction,
        /// Direction the snake will actually travel.
        applied: Direction,
    },
    /// Reports that an advance was skipped because no heading exists yet.
    SnakeIdle,
    /// Confirms that the snake's head moved between two cells.
    SnakeAdvanced {
        /// Head cell before the move.
        from: CellCoord,
        /// Head cell after the move.
        to: CellCoord,
        /// Tail cell released by the move, if the body did not grow.
        evicted: Option<CellCoord>,
    },
    /// Confirms that the snake consumed food.
    FoodEaten {
        /// Cell that held the food.
        cell: CellCoord,
        /// Body capacity after growing.
        capacity: usize,
    },
    /// Confirms that food was placed on the grid.
    FoodPlaced {
        /// Cell that received the food marker.
        cell: CellCoord,
    },
    /// Confirms that food markers were removed.
    FoodCleared {
        /// Number of cells whose marker was cleared.
        count: usize,
    },
    /// Reports that a food placement request was rejected.
    FoodPlacementRejected {
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Announces that the game reached a terminal state.
    GameOver {
        /// Condition that ended the game.
        reason: TerminalReason,
    },
    /// Confirms that the world returned to its configured starting state.
    WorldReset,
}

/// Explicit game configuration passed into world and session construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows.
    pub rows: u32,
    /// Starting body, head first.
    pub starting_body: Vec<CellCoord>,
    /// Seed for the food placement generator.
    pub food_seed: u64,
}

impl GameConfig {
    /// Checks that the configuration describes a playable board.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(CoreError::InvalidArgument(InvalidArgument::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            }));
        }

        if self.starting_body.is_empty() {
            return Err(CoreError::InvalidArgument(
                InvalidArgument::EmptyStartingBody,
            ));
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: 20,
            rows: 20,
            starting_body: vec![
                CellCoord::new(3, 3),
                CellCoord::new(3, 2),
                CellCoord::new(3, 1),
            ],
            food_seed: 0x5eed_5eed,
        }
    }
}

/// Errors raised by the core data structures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A coordinate lies outside the grid.
    #[error(
        "cell ({}, {}) lies outside the {columns}x{rows} grid",
        .cell.column(),
        .cell.row()
    )]
    OutOfBounds {
        /// Coordinate that failed the bounds check.
        cell: CellCoord,
        /// Number of columns on the grid.
        columns: u32,
        /// Number of rows on the grid.
        rows: u32,
    },
    /// A caller supplied an argument that violates an invariant.
    #[error("invalid argument: {0}")]
    InvalidArgument(InvalidArgument),
    /// Head or tail requested on an empty history.
    #[error("bounded history is empty")]
    EmptyCollection,
}

/// Specific argument violations reported through [`CoreError::InvalidArgument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    /// Capacity must be at least one.
    #[error("capacity must be at least 1 (received {requested})")]
    CapacityBelowOne {
        /// Capacity that failed validation.
        requested: usize,
    },
    /// Capacity can only grow.
    #[error("capacity delta must not be negative (received {delta})")]
    NegativeCapacityDelta {
        /// Delta that failed validation.
        delta: isize,
    },
    /// Grids need at least one cell along each axis.
    #[error("grid dimensions must be positive (received {columns}x{rows})")]
    EmptyGrid {
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
    /// The snake needs at least one starting cell.
    #[error("starting body must contain at least one cell")]
    EmptyStartingBody,
}

/// Read-only view of the snake handed to controllers.
#[derive(Clone, Copy, Debug)]
pub struct SnakeView<'a> {
    body: &'a BoundedHistory,
    heading: Option<Direction>,
    blocked: Option<Direction>,
    status: SnakeStatus,
}

impl<'a> SnakeView<'a> {
    /// Captures a new view over the provided snake state.
    #[must_use]
    pub const fn new(
        body: &'a BoundedHistory,
        heading: Option<Direction>,
        blocked: Option<Direction>,
        status: SnakeStatus,
    ) -> Self {
        Self {
            body,
            heading,
            blocked,
            status,
        }
    }

    /// Body cells, head first.
    #[must_use]
    pub const fn body(&self) -> &'a BoundedHistory {
        self.body
    }

    /// Head cell, if the body is non-empty.
    #[must_use]
    pub fn head(&self) -> Option<CellCoord> {
        self.body.first().ok()
    }

    /// Heading the next advance will use.
    #[must_use]
    pub const fn heading(&self) -> Option<Direction> {
        self.heading
    }

    /// Direction the snake may not reverse into.
    #[must_use]
    pub const fn blocked(&self) -> Option<Direction> {
        self.blocked
    }

    /// Lifecycle state of the snake.
    #[must_use]
    pub const fn status(&self) -> SnakeStatus {
        self.status
    }
}

/// Everything a controller may inspect when deciding the next direction.
#[derive(Clone, Copy, Debug)]
pub struct DecisionContext<'a> {
    /// Board the snake moves on.
    pub grid: &'a Grid,
    /// Snake state at the start of the cycle.
    pub snake: SnakeView<'a>,
    /// Directional input events observed during the cycle, oldest first.
    pub input: &'a [Direction],
}

/// Capability shared by human and automated players.
///
/// The orchestrator depends only on this interface; it never inspects which
/// implementation drives the snake.
pub trait Controller {
    /// Chooses the heading for the upcoming advance, or `None` to keep the current one.
    fn decide_next_direction(&mut self, context: &DecisionContext<'_>) -> Option<Direction>;

    /// Receives the events produced by the cycle's world mutations.
    fn observe(&mut self, _events: &[Event]) {}

    /// Route the controller is currently following, if it plans one.
    fn planned_path(&self) -> Option<&Path> {
        None
    }

    /// Forgets all per-game state.
    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Direction, GameConfig, Path};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, -3);
        assert_eq!(origin.manhattan_distance(destination), 7);
        assert_eq!(destination.manhattan_distance(origin), 7);
    }

    #[test]
    fn direction_between_neighbors() {
        let origin = CellCoord::new(3, 3);
        for direction in Direction::ALL {
            let neighbor = origin.step(direction);
            assert_eq!(Direction::between(origin, neighbor), Some(direction));
            assert_eq!(
                Direction::between(neighbor, origin),
                Some(direction.opposite())
            );
        }
        assert_eq!(Direction::between(origin, origin), None);
        assert_eq!(Direction::between(origin, CellCoord::new(4, 4)), None);
    }

    #[test]
    fn stepping_left_from_origin_leaves_the_grid_coordinates() {
        assert_eq!(
            CellCoord::new(0, 0).step(Direction::Left),
            CellCoord::new(-1, 0)
        );
    }

    #[test]
    fn path_steps_follow_consecutive_cells() {
        let path = Path::new(vec![
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            CellCoord::new(1, 1),
        ]);

        assert!(path.is_actionable());
        assert_eq!(path.step_count(), 2);
        assert_eq!(path.step(0), Some(Direction::Right));
        assert_eq!(path.step(1), Some(Direction::Down));
        assert_eq!(path.step(2), None);
        assert!(!Path::new(vec![CellCoord::new(2, 2)]).is_actionable());
        assert!(!Path::empty().is_actionable());
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn game_config_round_trips_through_bincode() {
        let mut config = GameConfig::default();
        config.starting_body.push(CellCoord::new(3, 0));
        assert_round_trip(&config);
    }

    #[test]
    fn default_config_is_playable() {
        assert!(GameConfig::default().validate().is_ok());
        let mut config = GameConfig::default();
        config.starting_body.clear();
        assert!(config.validate().is_err());
    }
}
