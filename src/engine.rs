use std::fmt::{self, Write as _};

use rand::Rng;
use tracing::{debug, info};

use crate::cover::{Cover, CoverState};
use crate::error::{GameError, Result};
use crate::field::{Field, Tile};
use crate::geometry::{in_bounds, Pos};
use crate::reveal::{chord_reveal, uncover_from, Chord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

impl RoundStatus {
    pub fn is_over(self) -> bool { self != RoundStatus::InProgress }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Flagged cell, or the round is already over.
    Ignored,
    Revealed,
    /// The clicked number had its flags satisfied and its neighbours were opened.
    /// Also reported when every neighbour was already open.
    Chorded,
    Detonated(Pos),
}

/// Lost as soon as any mine is uncovered; won once every other cell is.
/// Flags play no part in either.
pub fn evaluate(cover: &Cover, field: &Field) -> RoundStatus {
    let mut all_clear = true;
    for (i, state) in cover.iter().enumerate() {
        let tile = field.at((i / field.cols(), i % field.cols()));
        match (tile, state) {
            (Tile::Mine, CoverState::Uncovered) => return RoundStatus::Lost,
            (Tile::Count(_), CoverState::Covered | CoverState::Flagged) => all_clear = false,
            _ => {}
        }
    }
    if all_clear { RoundStatus::Won } else { RoundStatus::InProgress }
}

/// One game: a minefield, what the player has uncovered of it, and how it ended.
pub struct Round {
    field: Field,
    cover: Cover,
    status: RoundStatus,
    moves: usize,
}

impl Round {
    /// Fresh round with a randomly generated field.
    pub fn new<R: Rng>(rows: usize, cols: usize, mines: usize, rng: &mut R) -> Result<Self> {
        let field = Field::generate(rows, cols, mines, rng)?;
        Ok(Self::from_field(field))
    }

    pub fn from_field(field: Field) -> Self {
        let cover = Cover::new(field.rows(), field.cols());
        debug!(rows = field.rows(), cols = field.cols(), mines = field.mines(), "new round");
        Self { field, cover, status: RoundStatus::InProgress, moves: 0 }
    }

    pub fn primary_click(&mut self, row: usize, col: usize) -> Result<ClickOutcome> {
        self.check(row, col)?;
        if self.status.is_over() { return Ok(ClickOutcome::Ignored); }
        let pos = (row, col);
        if !self.cover.reveal(pos) { return Ok(ClickOutcome::Ignored); }
        self.moves += 1;

        let outcome = match self.field.at(pos) {
            Tile::Mine => ClickOutcome::Detonated(pos),
            Tile::Count(0) => {
                uncover_from(pos, &mut self.cover, &self.field);
                ClickOutcome::Revealed
            }
            Tile::Count(_) => match chord_reveal(pos, &mut self.cover, &self.field) {
                Chord::Detonated(mine) => ClickOutcome::Detonated(mine),
                Chord::Opened => ClickOutcome::Chorded,
                Chord::Skipped => ClickOutcome::Revealed,
            },
        };
        self.refresh();
        Ok(outcome)
    }

    /// Toggles a flag. Returns whether the cell changed.
    pub fn secondary_click(&mut self, row: usize, col: usize) -> Result<bool> {
        self.check(row, col)?;
        if self.status.is_over() { return Ok(false); }
        Ok(self.cover.toggle_flag((row, col)))
    }

    fn refresh(&mut self) {
        let status = evaluate(&self.cover, &self.field);
        if status != self.status && status.is_over() {
            info!(?status, moves = self.moves, "round finished");
        }
        self.status = status;
    }

    fn check(&self, row: usize, col: usize) -> Result<()> {
        if in_bounds(self.rows(), self.cols(), row, col) { Ok(()) } else { Err(GameError::InvalidCoords) }
    }

    pub fn render(&self, show_all: bool, one_based: bool) -> String {
        let mut s = String::new();
        s.push_str("    ");
        for c in 0..self.cols() {
            let label = if one_based { c + 1 } else { c };
            let _ = write!(s, "{:>2} ", label);
        }
        s.push('\n');
        s.push_str("   ");
        s.push_str(&"-".repeat(self.cols() * 3 + 1));
        s.push('\n');

        for r in 0..self.rows() {
            let row_label = if one_based { r + 1 } else { r };
            let _ = write!(s, "{:>2} | ", row_label);
            for c in 0..self.cols() {
                let tile = self.field.at((r, c));
                let ch = match self.cover.get((r, c)) {
                    _ if show_all && tile.is_mine() => '*',
                    CoverState::Flagged => 'F',
                    CoverState::Covered => '.',
                    CoverState::Uncovered => tile_char(tile),
                };
                let _ = write!(s, "{}  ", ch);
            }
            s.push('\n');
        }
        s
    }
}

pub fn tile_char(tile: Tile) -> char {
    match tile {
        Tile::Mine => '*',
        Tile::Count(0) => ' ',
        Tile::Count(n) => char::from_digit(n as u32, 10).unwrap_or('?'),
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false, true))
    }
}

impl Round {
    pub fn rows(&self) -> usize { self.field.rows() }
    pub fn cols(&self) -> usize { self.field.cols() }
    pub fn mines(&self) -> usize { self.field.mines() }
    pub fn status(&self) -> RoundStatus { self.status }
    pub fn moves(&self) -> usize { self.moves }
    pub fn flags(&self) -> usize { self.cover.flags() }
    /// Mines minus flags placed; negative when the player over-flags.
    pub fn mines_left(&self) -> isize { self.mines() as isize - self.flags() as isize }
    pub fn field(&self) -> &Field { &self.field }
    pub fn cover(&self) -> &Cover { &self.cover }
}
