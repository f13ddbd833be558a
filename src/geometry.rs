/// A cell address as `(row, col)`.
pub type Pos = (usize, usize);

/// Cells adjacent to `(row, col)` in all eight directions, clipped to a
/// `rows` x `cols` board. The caller guarantees `(row, col)` is on the board.
pub fn neighbors(row: usize, col: usize, rows: usize, cols: usize) -> impl Iterator<Item = Pos> {
    let r = row as isize; let c = col as isize;
    let h = rows as isize; let w = cols as isize;
    let mut out = Vec::with_capacity(8);
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 { continue; }
            let nr = r + dr; let nc = c + dc;
            if nr >= 0 && nc >= 0 && nr < h && nc < w {
                out.push((nr as usize, nc as usize));
            }
        }
    }
    out.into_iter()
}

pub(crate) fn idx(cols: usize, row: usize, col: usize) -> usize { row * cols + col }

pub(crate) fn in_bounds(rows: usize, cols: usize, row: usize, col: usize) -> bool {
    row < rows && col < cols
}
