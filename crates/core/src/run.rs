//! A whole playthrough: seeded rng, current level settings, and the level being played.

use log::info;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::config::EngineConfig;
use crate::entities::Player;
use crate::error::GenerationError;
use crate::level::Level;
use crate::mapgen::LevelSettings;
use crate::types::{Command, TickOutcome};

pub struct Run {
    seed: u64,
    rng: ChaCha8Rng,
    settings: LevelSettings,
    level: Level,
    over: bool,
}

impl Run {
    pub fn new(seed: u64, config: EngineConfig) -> Result<Self, GenerationError> {
        Self::starting_at(seed, LevelSettings::starting().level, config)
    }

    /// Starts directly on `level` with a fresh player, using that level's scaled settings.
    pub fn starting_at(
        seed: u64,
        level: u32,
        config: EngineConfig,
    ) -> Result<Self, GenerationError> {
        let player = Player::new(&config);
        Self::with_player(seed, level, player, config)
    }

    pub fn with_player(
        seed: u64,
        level: u32,
        player: Player,
        config: EngineConfig,
    ) -> Result<Self, GenerationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let settings = LevelSettings::for_level(level);
        let level = Level::generate(&settings, player, config, &mut rng)?;
        info!("run {seed} started on level {}", settings.level);
        Ok(Self { seed, rng, settings, level, over: false })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_number(&self) -> u32 {
        self.settings.level
    }

    pub fn settings(&self) -> &LevelSettings {
        &self.settings
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Advances the current level. On completion the next level is generated and the player
    /// carries over health, damage, luck, health cap and inventory. Once the player's death
    /// delay has passed every further tick reports [`TickOutcome::GameOver`].
    pub fn tick(
        &mut self,
        command: Option<Command>,
        elapsed_ms: u64,
    ) -> Result<TickOutcome, GenerationError> {
        if self.over {
            return Ok(TickOutcome::GameOver);
        }
        let outcome = self.level.tick(command, elapsed_ms);
        match outcome {
            TickOutcome::LevelComplete => self.advance_level()?,
            TickOutcome::GameOver => {
                self.over = true;
                info!("run {} ended on level {}", self.seed, self.settings.level);
            }
            TickOutcome::Continue => {}
        }
        Ok(outcome)
    }

    fn advance_level(&mut self) -> Result<(), GenerationError> {
        let next = self.settings.next();
        let player = self.level.player().clone();
        let config = self.level.config().clone();
        self.level = Level::generate(&next, player, config, &mut self.rng)?;
        self.settings = next;
        info!("entered level {}", self.settings.level);
        Ok(())
    }
}
