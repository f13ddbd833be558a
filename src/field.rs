use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::error::{GameError, Result};
use crate::geometry::{idx, in_bounds, neighbors, Pos};

/// Contents of one cell of the minefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Mine,
    /// Number of mines among the neighbouring cells.
    Count(u8),
}

impl Tile {
    pub fn is_mine(self) -> bool { matches!(self, Tile::Mine) }

    /// `-1` for a mine, otherwise the neighbour count.
    pub fn value(self) -> i8 {
        match self {
            Tile::Mine => -1,
            Tile::Count(n) => n as i8,
        }
    }
}

/// Mine layout of one round. Never changes once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    rows: usize,
    cols: usize,
    mines: usize,
    tiles: Vec<Tile>,
}

impl Field {
    /// Places `mines` mines uniformly at random by drawing coordinates until
    /// enough distinct ones have been collected.
    pub fn generate<R: Rng>(rows: usize, cols: usize, mines: usize, rng: &mut R) -> Result<Self> {
        check_size(rows, cols, mines)?;
        let mut positions: HashSet<Pos> = HashSet::with_capacity(mines);
        let mut draws = 0usize;
        while positions.len() < mines {
            draws += 1;
            positions.insert((rng.random_range(0..rows), rng.random_range(0..cols)));
        }
        debug!(rows, cols, mines, draws, "generated minefield");
        Ok(Self::build(rows, cols, &positions))
    }

    /// Builds a field with mines at exactly the given cells. Duplicates collapse.
    pub fn from_mines(rows: usize, cols: usize, mines: &[Pos]) -> Result<Self> {
        let positions: HashSet<Pos> = mines.iter().copied().collect();
        check_size(rows, cols, positions.len())?;
        if positions.iter().any(|&(r, c)| !in_bounds(rows, cols, r, c)) {
            return Err(GameError::InvalidCoords);
        }
        Ok(Self::build(rows, cols, &positions))
    }

    fn build(rows: usize, cols: usize, positions: &HashSet<Pos>) -> Self {
        let mut tiles = vec![Tile::Count(0); rows * cols];
        for &(r, c) in positions {
            tiles[idx(cols, r, c)] = Tile::Mine;
        }
        for &(r, c) in positions {
            for (nr, nc) in neighbors(r, c, rows, cols) {
                if let Tile::Count(n) = &mut tiles[idx(cols, nr, nc)] {
                    *n += 1;
                }
            }
        }
        Self { rows, cols, mines: positions.len(), tiles }
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn mines(&self) -> usize { self.mines }

    pub fn tile(&self, row: usize, col: usize) -> Option<Tile> {
        if in_bounds(self.rows, self.cols, row, col) { Some(self.tiles[idx(self.cols, row, col)]) } else { None }
    }

    /// Unchecked lookup for coordinates already known to be on the board.
    pub(crate) fn at(&self, (row, col): Pos) -> Tile {
        self.tiles[idx(self.cols, row, col)]
    }

    pub fn mine_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let cols = self.cols;
        self.tiles.iter().enumerate().filter(|(_, t)| t.is_mine()).map(move |(i, _)| (i / cols, i % cols))
    }
}

pub(crate) fn check_size(rows: usize, cols: usize, mines: usize) -> Result<()> {
    if rows == 0 || cols == 0 { return Err(GameError::EmptyBoard); }
    let cells = rows.checked_mul(cols).ok_or(GameError::BoardTooLarge)?;
    if mines >= cells { return Err(GameError::TooManyMines); }
    Ok(())
}
