//! Finite board of cells carrying per-cell markers.

use crate::{CellCoord, CoreError, InvalidArgument, Marker};

/// Single board cell together with its marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    coord: CellCoord,
    marker: Marker,
}

impl Cell {
    /// Location of the cell.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Marker currently attached to the cell.
    #[must_use]
    pub const fn marker(&self) -> Marker {
        self.marker
    }
}

/// Dense `columns` × `rows` board stored in row-major order.
///
/// Bounds checks treat both the lower edge (negative coordinates) and the
/// upper edge (coordinates at or beyond the stored dimension) of each axis as
/// outside the board. The snake's wall collision relies on exactly this check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an empty board with the provided dimensions.
    pub fn new(columns: u32, rows: u32) -> Result<Self, CoreError> {
        if columns == 0 || rows == 0 {
            return Err(CoreError::InvalidArgument(InvalidArgument::EmptyGrid {
                columns,
                rows,
            }));
        }

        let cells = row_major(columns, rows)
            .map(|coord| Cell {
                coord,
                marker: Marker::Empty,
            })
            .collect();

        Ok(Self {
            columns,
            rows,
            cells,
        })
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether `coord` lies on the board.
    #[must_use]
    pub fn contains(&self, coord: CellCoord) -> bool {
        self.index(coord).is_some()
    }

    /// Looks up the cell at `coord`, or `None` when it lies off the board.
    #[must_use]
    pub fn get(&self, coord: CellCoord) -> Option<&Cell> {
        self.index(coord).and_then(|index| self.cells.get(index))
    }

    /// Looks up the cell at `coord`, failing with [`CoreError::OutOfBounds`].
    pub fn cell_at(&self, coord: CellCoord) -> Result<&Cell, CoreError> {
        self.get(coord).ok_or(self.out_of_bounds(coord))
    }

    /// Marker attached to the cell at `coord`.
    pub fn marker_at(&self, coord: CellCoord) -> Result<Marker, CoreError> {
        self.cell_at(coord).map(Cell::marker)
    }

    /// Replaces the marker at `coord`, returning the previous marker.
    pub fn set_marker(&mut self, coord: CellCoord, marker: Marker) -> Result<Marker, CoreError> {
        let error = self.out_of_bounds(coord);
        let cell = self
            .index(coord)
            .and_then(|index| self.cells.get_mut(index))
            .ok_or(error)?;
        Ok(std::mem::replace(&mut cell.marker, marker))
    }

    /// Enumerates every coordinate, rows outer and columns inner.
    ///
    /// The iterator is cheap to clone, so callers can restart the enumeration.
    pub fn all_cells(&self) -> impl Iterator<Item = CellCoord> + Clone {
        row_major(self.columns, self.rows)
    }

    /// Coordinates carrying [`Marker::Food`], in row-major order.
    pub fn food_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells
            .iter()
            .filter(|cell| cell.marker == Marker::Food)
            .map(|cell| cell.coord)
    }

    /// Resets every marker to [`Marker::Empty`], returning how many cells changed.
    pub fn clear_markers(&mut self) -> usize {
        let mut cleared = 0;
        for cell in &mut self.cells {
            if cell.marker != Marker::Empty {
                cell.marker = Marker::Empty;
                cleared += 1;
            }
        }
        cleared
    }

    fn out_of_bounds(&self, cell: CellCoord) -> CoreError {
        CoreError::OutOfBounds {
            cell,
            columns: self.columns,
            rows: self.rows,
        }
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        let column = u32::try_from(coord.column()).ok()?;
        let row = u32::try_from(coord.row()).ok()?;
        if column >= self.columns || row >= self.rows {
            return None;
        }

        let width = usize::try_from(self.columns).ok()?;
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

fn row_major(columns: u32, rows: u32) -> impl Iterator<Item = CellCoord> + Clone {
    let columns = i32::try_from(columns).unwrap_or(i32::MAX);
    let rows = i32::try_from(rows).unwrap_or(i32::MAX);
    (0..rows).flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
}
