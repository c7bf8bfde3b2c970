use super::dir::Dir;
use num_integer::Integer;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::{Debug, Error, Formatter},
};

// row 0 is the top of the grid, col 0 is the left edge
#[derive(Eq, PartialEq, Copy, Clone, Add, Sub, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: isize,
    pub col: isize,
}

/// Grid extents, `row` is the number of rows and `col` the number of columns
pub type GridDim = Cell;

impl Cell {
    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub fn translate(self, dir: Dir, dist: usize) -> Self {
        let (dr, dc) = dir.delta();
        let dist = dist as isize;
        Self {
            row: self.row + dr * dist,
            col: self.col + dc * dist,
        }
    }

    // basically mod height, mod width
    // if the cell is n cells out of bounds, it will be n cells from the opposite edge
    #[must_use]
    pub fn wrap_around(self, grid_dim: GridDim) -> Self {
        Self {
            row: self.row.mod_floor(&grid_dim.row),
            col: self.col.mod_floor(&grid_dim.col),
        }
    }

    #[must_use]
    pub fn wrapping_translate(self, dir: Dir, dist: usize, grid_dim: GridDim) -> Self {
        self.translate(dir, dist).wrap_around(grid_dim)
    }

    // None if the two cells are not one wrapped step apart
    pub fn wrapping_dir_to(self, other: Self, grid_dim: GridDim) -> Option<Dir> {
        Dir::iter().find(|dir| self.wrapping_translate(*dir, 1, grid_dim) == other)
    }

    /// Packed row-major key, only meaningful for cells inside the grid
    pub fn index(self, grid_dim: GridDim) -> usize {
        (self.row * grid_dim.col + self.col) as usize
    }

    pub fn from_index(index: usize, grid_dim: GridDim) -> Self {
        let (row, col) = (index as isize).div_rem(&grid_dim.col);
        Self { row, col }
    }
}

impl GridDim {
    pub fn contains(self, cell: Cell) -> bool {
        (0..self.row).contains(&cell.row) && (0..self.col).contains(&cell.col)
    }

    // callers validate the grid with checked_area first
    pub fn area(self) -> usize {
        (self.row * self.col) as usize
    }

    /// None if an extent is negative or the cell count does not fit
    pub fn checked_area(self) -> Option<usize> {
        self.row
            .checked_mul(self.col)
            .and_then(|area| usize::try_from(area).ok())
    }

    pub fn center_row(self) -> isize {
        Integer::div_floor(&self.row, &2)
    }
}

impl Debug for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "<{}, {}>", self.row, self.col)
    }
}

impl From<(isize, isize)> for Cell {
    fn from((row, col): (isize, isize)) -> Self {
        Self { row, col }
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.row.cmp(&other.row) {
            Ordering::Equal => self.col.cmp(&other.col),
            ord => ord,
        }
    }
}
