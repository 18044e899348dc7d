//! Fixed-capacity, insertion-ordered record of the cells a snake occupies.

use std::collections::{HashSet, VecDeque};

use crate::{CellCoord, CoreError, InvalidArgument};

/// Ordered history of cell coordinates with an explicit capacity.
///
/// The newest coordinate sits at the front (the head) and the oldest retained
/// coordinate at the back (the tail). Once the history holds `capacity`
/// entries, every [`BoundedHistory::add`] evicts the tail so the length never
/// exceeds the capacity. Growth is expressed by raising the capacity, after
/// which the next additions fill the new room before eviction resumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundedHistory {
    cells: VecDeque<CellCoord>,
    capacity: usize,
}

impl BoundedHistory {
    /// Creates a history whose capacity equals the number of provided cells.
    ///
    /// The cells are given head first. Returns
    /// [`InvalidArgument::CapacityBelowOne`] when no cells are supplied.
    pub fn new<I>(cells: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        let cells: VecDeque<CellCoord> = cells.into_iter().collect();
        if cells.is_empty() {
            return Err(CoreError::InvalidArgument(
                InvalidArgument::CapacityBelowOne { requested: 0 },
            ));
        }

        let capacity = cells.len();
        Ok(Self { cells, capacity })
    }

    /// Prepends `cell`, evicting and returning the tail when already at capacity.
    pub fn add(&mut self, cell: CellCoord) -> Option<CellCoord> {
        let evicted = if self.is_full() {
            self.cells.pop_back()
        } else {
            None
        };
        self.cells.push_front(cell);
        evicted
    }

    /// Raises the capacity by `delta` without evicting anything.
    ///
    /// Negative deltas are rejected instead of being coerced to their
    /// magnitude.
    pub fn increase_capacity(&mut self, delta: isize) -> Result<(), CoreError> {
        let Ok(delta) = usize::try_from(delta) else {
            return Err(CoreError::InvalidArgument(
                InvalidArgument::NegativeCapacityDelta { delta },
            ));
        };

        self.capacity = self.capacity.saturating_add(delta);
        Ok(())
    }

    /// Replaces the capacity and truncates the history to its first `capacity` cells.
    ///
    /// Returns the dropped suffix, oldest last.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<Vec<CellCoord>, CoreError> {
        if capacity < 1 {
            return Err(CoreError::InvalidArgument(
                InvalidArgument::CapacityBelowOne {
                    requested: capacity,
                },
            ));
        }

        self.capacity = capacity;
        let keep = capacity.min(self.cells.len());
        Ok(self.cells.split_off(keep).into_iter().collect())
    }

    /// Most recently added cell.
    pub fn first(&self) -> Result<CellCoord, CoreError> {
        self.cells.front().copied().ok_or(CoreError::EmptyCollection)
    }

    /// Oldest retained cell.
    pub fn last(&self) -> Result<CellCoord, CoreError> {
        self.cells.back().copied().ok_or(CoreError::EmptyCollection)
    }

    /// Cell stored at `index`, counting from the head.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<CellCoord> {
        self.cells.get(index).copied()
    }

    /// Maximum number of cells retained before eviction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of cells currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the history holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether the next [`BoundedHistory::add`] will evict the tail.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.len() >= self.capacity
    }

    /// Reports whether `cell` appears anywhere in the history.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Reports whether any coordinate is stored more than once.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.cells.len());
        self.cells.iter().any(|cell| !seen.insert(*cell))
    }

    /// Iterator over the cells from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.iter().copied()
    }

    /// Collects the cells into a set, typically used as a planner obstacle set.
    #[must_use]
    pub fn to_set(&self) -> HashSet<CellCoord> {
        self.cells.iter().copied().collect()
    }
}
