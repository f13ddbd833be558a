use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::Result;
use crate::field::check_size;

pub const ROWS: usize = 20;
pub const COLS: usize = 20;
pub const MINES: usize = 75;

/// How long a finished board stays on screen before the next round starts.
pub const LOSS_PAUSE: Duration = Duration::from_secs(5);
pub const WIN_PAUSE: Duration = Duration::from_secs(7);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
    /// Fixed seed for reproducible boards; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self { rows: ROWS, cols: COLS, mines: MINES, seed: None }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        check_size(self.rows, self.cols, self.mines)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
