use std::collections::VecDeque;

use tracing::debug;

use crate::cover::Cover;
use crate::field::{Field, Tile};
use crate::geometry::{idx, neighbors, Pos};

/// Opens the zero region around `start` breadth-first, together with the
/// numbered cells bordering it. Expansion only continues through zero cells
/// and never touches flags.
///
/// `start` must hold a zero; uncovering `start` itself is the caller's job.
/// Returns how many cells went from covered to uncovered.
pub fn uncover_from(start: Pos, cover: &mut Cover, field: &Field) -> usize {
    let (rows, cols) = (field.rows(), field.cols());
    let mut visited = vec![false; rows * cols];
    let mut queue = VecDeque::from([start]);
    visited[idx(cols, start.0, start.1)] = true;
    let mut opened = 0usize;

    while let Some((r, c)) = queue.pop_front() {
        for n in neighbors(r, c, rows, cols) {
            let i = idx(cols, n.0, n.1);
            if visited[i] { continue; }
            visited[i] = true;
            if cover.is_flagged(n) { continue; }
            if !cover.is_uncovered(n) { opened += 1; }
            cover.reveal(n);
            if field.at(n) == Tile::Count(0) {
                queue.push_back(n);
            }
        }
    }
    debug!(row = start.0, col = start.1, opened, "flood fill");
    opened
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Chord {
    /// Flag count did not match the number; the cover is untouched.
    Skipped,
    Opened,
    /// A neighbour without a flag was a mine.
    Detonated(Pos),
}

/// Chord on an uncovered number: when exactly as many neighbours are flagged
/// as the number says, every other neighbour is uncovered. Stops at the first
/// mine uncovered this way, which means one of the flags was wrong.
pub fn chord_reveal(pos: Pos, cover: &mut Cover, field: &Field) -> Chord {
    let (rows, cols) = (field.rows(), field.cols());
    let Tile::Count(expected) = field.at(pos) else { return Chord::Skipped };
    if expected == 0 { return Chord::Skipped; }
    let flags = neighbors(pos.0, pos.1, rows, cols).filter(|&n| cover.is_flagged(n)).count();
    if flags != expected as usize {
        debug!(row = pos.0, col = pos.1, flags, expected, "chord skipped");
        return Chord::Skipped;
    }

    for n in neighbors(pos.0, pos.1, rows, cols) {
        if cover.is_flagged(n) { continue; }
        match field.at(n) {
            Tile::Mine => {
                cover.reveal(n);
                debug!(row = n.0, col = n.1, "chord hit a mine");
                return Chord::Detonated(n);
            }
            Tile::Count(0) => {
                cover.reveal(n);
                uncover_from(n, cover, field);
            }
            Tile::Count(_) => { cover.reveal(n); }
        }
    }
    Chord::Opened
}
