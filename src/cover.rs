use crate::geometry::{idx, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CoverState {
    #[default]
    Covered,
    Uncovered,
    Flagged,
}

/// What the player can see of each cell. Parallel to the round's `Field`.
///
/// `Uncovered` is terminal: nothing in here ever covers a cell again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cover {
    rows: usize,
    cols: usize,
    cells: Vec<CoverState>,
}

impl Cover {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, cells: vec![CoverState::Covered; rows * cols] }
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    pub fn get(&self, (row, col): Pos) -> CoverState {
        self.cells[idx(self.cols, row, col)]
    }

    pub fn is_flagged(&self, pos: Pos) -> bool { self.get(pos) == CoverState::Flagged }
    pub fn is_uncovered(&self, pos: Pos) -> bool { self.get(pos) == CoverState::Uncovered }

    /// Covered <-> Flagged. Uncovered cells are left alone; returns whether
    /// anything changed.
    pub fn toggle_flag(&mut self, pos: Pos) -> bool {
        let cell = &mut self.cells[idx(self.cols, pos.0, pos.1)];
        match *cell {
            CoverState::Covered => { *cell = CoverState::Flagged; true }
            CoverState::Flagged => { *cell = CoverState::Covered; true }
            CoverState::Uncovered => false,
        }
    }

    /// Uncovers the cell unless it carries a flag. Returns whether the cell
    /// is uncovered afterwards.
    pub fn reveal(&mut self, pos: Pos) -> bool {
        let cell = &mut self.cells[idx(self.cols, pos.0, pos.1)];
        if *cell == CoverState::Flagged { return false; }
        *cell = CoverState::Uncovered;
        true
    }

    pub fn flags(&self) -> usize {
        self.cells.iter().filter(|&&c| c == CoverState::Flagged).count()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = CoverState> + '_ {
        self.cells.iter().copied()
    }
}
