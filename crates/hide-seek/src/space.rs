//! Discrete position spaces
//!
//! Every space enumerates its positions as linear indices `0..N`. The
//! rest of the engine works on indices and converts back to positions
//! only at its edges.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Capability contract shared by 1-D and 2-D worlds
pub trait PositionSpace: Clone + Debug {
    /// Position as the presentation layer sees it.
    type Position: Copy + Eq + Debug + Serialize;

    /// Number of distinct positions (N).
    fn position_count(&self) -> usize;

    /// Position to linear index. Fails if the position is outside the space.
    fn to_index(&self, pos: Self::Position) -> Result<usize, GameError>;

    /// Linear index to position. Fails if `idx >= position_count()`.
    fn from_index(&self, idx: usize) -> Result<Self::Position, GameError>;

    /// Distance between two valid indices: absolute difference on a line,
    /// Manhattan distance on a grid.
    fn distance(&self, a: usize, b: usize) -> usize;

    fn check_index(&self, idx: usize) -> Result<usize, GameError> {
        let count = self.position_count();
        if idx < count {
            Ok(idx)
        } else {
            Err(GameError::OutOfRange { index: idx, count })
        }
    }
}

/// A 1-D world of `size` positions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub size: usize,
}

impl Line {
    pub fn new(size: usize) -> Result<Self, GameError> {
        if size == 0 {
            return Err(GameError::InvalidDimensions { rows: 1, cols: 0 });
        }
        Ok(Self { size })
    }
}

impl PositionSpace for Line {
    type Position = usize;

    fn position_count(&self) -> usize {
        self.size
    }

    fn to_index(&self, pos: usize) -> Result<usize, GameError> {
        self.check_index(pos)
    }

    fn from_index(&self, idx: usize) -> Result<usize, GameError> {
        self.check_index(idx)
    }

    fn distance(&self, a: usize, b: usize) -> usize {
        a.abs_diff(b)
    }
}

/// A cell on a 2-D grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A 2-D world of `rows` x `cols` cells, indexed row-major
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GameError> {
        match rows.checked_mul(cols) {
            Some(count) if count > 0 => Ok(Self { rows, cols }),
            _ => Err(GameError::InvalidDimensions { rows, cols }),
        }
    }
}

impl PositionSpace for Grid {
    type Position = Cell;

    fn position_count(&self) -> usize {
        self.rows * self.cols
    }

    fn to_index(&self, cell: Cell) -> Result<usize, GameError> {
        if cell.row >= self.rows || cell.col >= self.cols {
            return Err(GameError::CellOutOfRange {
                row: cell.row,
                col: cell.col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(cell.row * self.cols + cell.col)
    }

    fn from_index(&self, idx: usize) -> Result<Cell, GameError> {
        let idx = self.check_index(idx)?;
        Ok(Cell::new(idx / self.cols, idx % self.cols))
    }

    fn distance(&self, a: usize, b: usize) -> usize {
        let (ar, ac) = (a / self.cols, a % self.cols);
        let (br, bc) = (b / self.cols, b % self.cols);
        ar.abs_diff(br) + ac.abs_diff(bc)
    }
}
