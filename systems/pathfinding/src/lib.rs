#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first shortest-path planner over the 4-connected grid.
//!
//! Every edge has unit weight, so a plain breadth-first search yields the
//! same path lengths as a uniform-cost search in `O(V + E)`. Neighbours are
//! explored in [`Direction::ALL`] order (up, right, down, left), which fixes
//! the route chosen among equally short alternatives.

use std::collections::{HashSet, VecDeque};

use snake_pilot_core::{CellCoord, Direction, Grid, Path};
use tracing::debug;

const UNVISITED: usize = usize::MAX;

/// Reusable breadth-first search workspace.
///
/// The predecessor buffer and frontier queue survive between searches so the
/// per-cycle replanning does not reallocate once the board size is known.
#[derive(Clone, Debug, Default)]
pub struct PathPlanner {
    columns: u32,
    rows: u32,
    predecessors: Vec<usize>,
    queue: VecDeque<CellCoord>,
    explored: usize,
}

impl PathPlanner {
    /// Creates an empty planner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells dequeued by the most recent search.
    #[must_use]
    pub fn explored(&self) -> usize {
        self.explored
    }

    /// Finds a shortest path from `source` to `target` avoiding `obstacles`.
    ///
    /// The source is always passable, even when it appears in `obstacles`.
    /// Returns `[source]` when both endpoints coincide and an empty path when
    /// the target cannot be reached or either endpoint lies off the grid.
    pub fn find_path(
        &mut self,
        grid: &Grid,
        obstacles: &HashSet<CellCoord>,
        source: CellCoord,
        target: CellCoord,
    ) -> Path {
        self.find_path_with(grid, source, target, |cell| obstacles.contains(&cell))
    }

    /// Finds a shortest path using a caller supplied blocking predicate.
    pub fn find_path_with<F>(
        &mut self,
        grid: &Grid,
        source: CellCoord,
        target: CellCoord,
        mut is_blocked: F,
    ) -> Path
    where
        F: FnMut(CellCoord) -> bool,
    {
        self.explored = 0;
        if !grid.contains(source) || !grid.contains(target) {
            return Path::empty();
        }

        if source == target {
            return Path::new(vec![source]);
        }

        self.prepare(grid);
        let width = self.width();
        let (Some(source_index), Some(target_index)) = (index(width, source), index(width, target))
        else {
            return Path::empty();
        };

        self.predecessors[source_index] = source_index;
        self.queue.push_back(source);

        let mut reached = false;
        while let Some(cell) = self.queue.pop_front() {
            self.explored += 1;
            if cell == target {
                reached = true;
                break;
            }

            let Some(current_index) = index(width, cell) else {
                continue;
            };

            for direction in Direction::ALL {
                let neighbor = cell.step(direction);
                if !grid.contains(neighbor) {
                    continue;
                }

                let Some(neighbor_index) = index(width, neighbor) else {
                    continue;
                };

                if self.predecessors[neighbor_index] != UNVISITED || is_blocked(neighbor) {
                    continue;
                }

                self.predecessors[neighbor_index] = current_index;
                self.queue.push_back(neighbor);
            }
        }

        if !reached {
            debug!(?source, ?target, explored = self.explored, "no path found");
            return Path::empty();
        }

        let path = self.reconstruct(source_index, target_index);
        debug!(
            ?source,
            ?target,
            length = path.len(),
            explored = self.explored,
            "path computed"
        );
        path
    }

    fn prepare(&mut self, grid: &Grid) {
        let cell_count = grid.cell_count();
        if self.columns != grid.columns()
            || self.rows != grid.rows()
            || self.predecessors.len() != cell_count
        {
            self.columns = grid.columns();
            self.rows = grid.rows();
            self.predecessors = vec![UNVISITED; cell_count];
        } else {
            self.predecessors.fill(UNVISITED);
        }
        self.queue.clear();
    }

    fn width(&self) -> usize {
        usize::try_from(self.columns).unwrap_or(0)
    }

    fn reconstruct(&self, source_index: usize, target_index: usize) -> Path {
        let width = self.width();
        let mut cells = Vec::new();
        let mut current = target_index;
        loop {
            cells.push(coord(width, current));
            if current == source_index {
                break;
            }
            let previous = self.predecessors[current];
            if previous == UNVISITED || previous == current {
                return Path::empty();
            }
            current = previous;
        }
        cells.reverse();
        Path::new(cells)
    }
}

/// Finds a shortest path with a throwaway planner.
///
/// Prefer a long-lived [`PathPlanner`] when planning every cycle.
pub fn find_path(
    grid: &Grid,
    obstacles: &HashSet<CellCoord>,
    source: CellCoord,
    target: CellCoord,
) -> Path {
    PathPlanner::new().find_path(grid, obstacles, source, target)
}

fn index(width: usize, cell: CellCoord) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}

fn coord(width: usize, index: usize) -> CellCoord {
    let width = width.max(1);
    let column = i32::try_from(index % width).unwrap_or(i32::MAX);
    let row = i32::try_from(index / width).unwrap_or(i32::MAX);
    CellCoord::new(column, row)
}
