use rand::rngs::StdRng;

use crate::config::Config;
use crate::engine::Round;
use crate::error::Result;

/// Owns the current round and the generator that lays out every following one.
pub struct Game {
    config: Config,
    rng: StdRng,
    round: Round,
}

impl Game {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let mut rng = config.rng();
        let round = Round::new(config.rows, config.cols, config.mines, &mut rng)?;
        Ok(Self { config, rng, round })
    }

    /// Discards the current round and deals a fresh one.
    pub fn reset(&mut self) -> Result<()> {
        self.round = Round::new(self.config.rows, self.config.cols, self.config.mines, &mut self.rng)?;
        Ok(())
    }

    pub fn config(&self) -> &Config { &self.config }
    pub fn round(&self) -> &Round { &self.round }
    pub fn round_mut(&mut self) -> &mut Round { &mut self.round }
}
