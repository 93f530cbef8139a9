//! Session state machine
//!
//! StartScreen -> Playing -> GameOver | LevelComplete -> Playing (retry) or
//! StartScreen (menu). The session owns the world and the pending-frame
//! request; the host calls [`Session::advance_frame`] once per animation
//! frame and stops when it returns [`LoopControl::Halt`].

use rand::Rng;
use serde::Serialize;

use crate::input::Intent;
use crate::settings::{ConfigError, GameConfig};
use crate::sim::{
    ChunkLibrary, Coin, Difficulty, GamePhase, Obstacle, Platform, Player, StepOutcome, World, tick,
};

/// Whether the host should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Halt,
}

/// Read-only snapshot handed to renderers each frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub score: u64,
    pub player: &'a Player,
    pub platforms: &'a [Platform],
    pub coins: &'a [Coin],
    pub obstacles: &'a [Obstacle],
}

/// One player's game: phase, current run and frame scheduling
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    library: ChunkLibrary,
    phase: GamePhase,
    world: World,
    /// A next-frame request is outstanding
    frame_pending: bool,
}

impl Session {
    /// Session on the start screen using the built-in levels
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_library(config, ChunkLibrary::builtin())
    }

    pub fn with_library(config: GameConfig, library: ChunkLibrary) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = next_seed(&config);
        let world = World::new(Difficulty::default(), config.viewport(), seed);
        Ok(Self {
            config,
            library,
            phase: GamePhase::StartScreen,
            world,
            frame_pending: false,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Difficulty of the current (or last) run
    pub fn difficulty(&self) -> Difficulty {
        self.world.difficulty
    }

    pub fn score(&self) -> u64 {
        self.world.score
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn library(&self) -> &ChunkLibrary {
        &self.library
    }

    /// A frame is scheduled and the next `advance_frame` will step
    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Reset the world for `difficulty` and start playing
    pub fn start_game(&mut self, difficulty: Difficulty) {
        let seed = next_seed(&self.config);
        self.world = World::new(difficulty, self.config.viewport(), seed);
        self.phase = GamePhase::Playing;
        self.frame_pending = true;
        log::info!(
            "Starting {} run ({} chunks, seed {})",
            difficulty.as_str(),
            self.library.chunks_for(difficulty).len(),
            seed
        );
    }

    /// Replay the same difficulty after a run ended. Returns false (and does
    /// nothing) in any other phase.
    pub fn retry(&mut self) -> bool {
        if !self.phase.is_terminal() {
            log::debug!("Ignoring retry in {:?}", self.phase);
            return false;
        }
        self.start_game(self.world.difficulty);
        true
    }

    /// Back to the start screen, cancelling any scheduled frame
    pub fn go_to_menu(&mut self) {
        self.frame_pending = false;
        if self.phase != GamePhase::StartScreen {
            log::info!("Returning to menu from {:?}", self.phase);
        }
        self.phase = GamePhase::StartScreen;
    }

    /// Reverse gravity. Only honoured while playing; picked up by the next step.
    pub fn flip(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.world.player.flip();
        true
    }

    /// Route a player intent through the state machine. Returns whether it
    /// applied in the current phase.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match (intent, self.phase) {
            (Intent::Flip, _) => self.flip(),
            (Intent::Start(difficulty), GamePhase::StartScreen) => {
                self.start_game(difficulty);
                true
            }
            (Intent::Retry, _) => self.retry(),
            (Intent::Menu, phase) if phase != GamePhase::StartScreen => {
                self.go_to_menu();
                true
            }
            (intent, phase) => {
                log::debug!("Ignoring {:?} in {:?}", intent, phase);
                false
            }
        }
    }

    /// Run the scheduled frame, if any
    pub fn advance_frame(&mut self) -> LoopControl {
        if !self.frame_pending || self.phase != GamePhase::Playing {
            self.frame_pending = false;
            return LoopControl::Halt;
        }

        let chunks = self.library.chunks_for(self.world.difficulty);
        match tick(&mut self.world, chunks) {
            StepOutcome::Continue => LoopControl::Continue,
            StepOutcome::GameOver => {
                log::info!(
                    "Game over on frame {} with score {}",
                    self.world.frame + 1,
                    self.world.score
                );
                self.halt(GamePhase::GameOver)
            }
            StepOutcome::LevelComplete => {
                log::info!(
                    "{} level complete with score {}",
                    self.world.difficulty.as_str(),
                    self.world.score
                );
                self.halt(GamePhase::LevelComplete)
            }
        }
    }

    fn halt(&mut self, phase: GamePhase) -> LoopControl {
        self.phase = phase;
        self.frame_pending = false;
        LoopControl::Halt
    }

    /// Snapshot for drawing
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            phase: self.phase,
            difficulty: self.world.difficulty,
            score: self.world.score,
            player: &self.world.player,
            platforms: &self.world.platforms,
            coins: &self.world.coins,
            obstacles: &self.world.obstacles,
        }
    }
}

/// Configured seed, or a fresh one per run
fn next_seed(config: &GameConfig) -> u64 {
    config.seed.unwrap_or_else(|| rand::rng().random())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(GameConfig::default().with_seed(5)).unwrap()
    }

    #[test]
    fn test_starts_on_menu_without_frames() {
        let mut session = session();
        assert_eq!(session.phase(), GamePhase::StartScreen);
        assert_eq!(session.difficulty(), Difficulty::Medium);
        assert!(!session.is_frame_pending());
        assert_eq!(session.advance_frame(), LoopControl::Halt);
        assert_eq!(session.world().frame, 0);
    }

    #[test]
    fn test_flip_ignored_outside_playing() {
        let mut session = session();
        let gravity = session.world().player.gravity;
        assert!(!session.flip());
        assert_eq!(session.world().player.gravity, gravity);

        session.start_game(Difficulty::Easy);
        assert!(session.flip());
        assert_eq!(session.world().player.gravity, -gravity);
    }

    #[test]
    fn test_intents_follow_state_machine() {
        let mut session = session();
        assert!(!session.apply(Intent::Retry));
        assert!(!session.apply(Intent::Menu));
        assert!(session.apply(Intent::Start(Difficulty::Hard)));
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.difficulty(), Difficulty::Hard);

        // Difficulty buttons only live on the start screen
        assert!(!session.apply(Intent::Start(Difficulty::Easy)));
        assert!(!session.apply(Intent::Retry));
        assert!(session.apply(Intent::Menu));
        assert_eq!(session.phase(), GamePhase::StartScreen);
    }

    #[test]
    fn test_game_over_halts_and_retry_restarts_same_difficulty() {
        let mut session = session();
        session.start_game(Difficulty::Hard);
        // Never flip: the player lands on the floor and eventually hits something
        let mut frames = 0;
        while session.advance_frame() == LoopControl::Continue {
            frames += 1;
            assert!(frames < 100_000, "run never ended");
        }
        assert!(session.phase().is_terminal());
        assert!(!session.is_frame_pending());

        let frame = session.world().frame;
        assert_eq!(session.advance_frame(), LoopControl::Halt);
        assert_eq!(session.world().frame, frame);

        assert!(session.retry());
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.difficulty(), Difficulty::Hard);
        assert_eq!(session.score(), 0);
        assert_eq!(session.world().frame, 0);
    }

    #[test]
    fn test_view_reflects_world() {
        let mut session = session();
        session.start_game(Difficulty::Easy);
        session.advance_frame();
        let view = session.view();
        assert_eq!(view.phase, GamePhase::Playing);
        assert_eq!(view.difficulty, Difficulty::Easy);
        assert_eq!(view.platforms.len(), session.world().platforms.len());
        assert_eq!(view.player, &session.world().player);

        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"phase\":\"Playing\""));
    }

    #[test]
    fn test_rejects_invalid_viewport() {
        let config = GameConfig {
            viewport_width: -1.0,
            ..Default::default()
        };
        assert!(Session::new(config).is_err());
    }
}
