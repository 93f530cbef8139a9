//! World state and core simulation types
//!
//! Everything one run mutates lives in [`World`]; the step function takes it
//! by exclusive reference and nothing else touches it mid-frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Level difficulty, picks the chunk sequence and scroll speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// World scroll per frame
    pub fn scroll_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 3.5,
            Difficulty::Medium => 5.0,
            Difficulty::Hard => 6.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Difficulty selection
    #[default]
    StartScreen,
    /// Simulation running
    Playing,
    /// Player died
    GameOver,
    /// Chunk sequence exhausted and the last platform passed
    LevelComplete,
}

impl GamePhase {
    /// Run has ended (retry or menu are the only ways out)
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::LevelComplete)
    }
}

/// The player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity_y: f32,
    /// Signed, magnitude is always GRAVITY_STRENGTH
    pub gravity: f32,
    /// Drawn rotation (radians), eased toward target_rotation
    pub visual_rotation: f32,
    /// Accumulates ±π per flip
    pub target_rotation: f32,
}

impl Player {
    /// Fresh player at the start position, falling toward the floor
    pub fn new(viewport_height: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, viewport_height / 2.0),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            velocity_y: 0.0,
            gravity: GRAVITY_STRENGTH,
            visual_rotation: 0.0,
            target_rotation: 0.0,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Reverse gravity and push off the current rail
    pub fn flip(&mut self) {
        let was_falling_down = self.gravity > 0.0;
        self.gravity = -self.gravity;
        self.velocity_y = if was_falling_down { -FLIP_IMPULSE } else { FLIP_IMPULSE };
        self.target_rotation += std::f32::consts::PI;
    }

    /// Ease visual rotation toward the target, snapping when close
    pub fn ease_rotation(&mut self) {
        let diff = self.target_rotation - self.visual_rotation;
        if diff.abs() > ROTATION_SNAP {
            self.visual_rotation += diff * ROTATION_EASING;
        } else {
            self.visual_rotation = self.target_rotation;
        }
    }

    /// Symplectic Euler: velocity first, then position
    pub fn integrate(&mut self) {
        self.velocity_y += self.gravity;
        self.pos.y += self.velocity_y;
    }
}

/// A walkable floor or ceiling strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
            height: PLATFORM_HEIGHT,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    /// Platforms on the top rail; anything else is treated as a floor
    #[inline]
    pub fn is_ceiling(&self) -> bool {
        self.pos.y <= 0.0
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
}

impl Coin {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            radius: COIN_RADIUS,
        }
    }

    /// Some part still at or right of the left viewport edge
    #[inline]
    pub fn on_screen(&self) -> bool {
        self.pos.x + self.radius > 0.0
    }
}

/// Back-and-forth motion along one axis between inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    pub speed: f32,
    /// +1 or -1
    pub direction: f32,
    pub min: f32,
    pub max: f32,
}

impl Oscillation {
    pub fn new(speed: f32, min: f32, max: f32) -> Self {
        Self {
            speed,
            direction: 1.0,
            min,
            max,
        }
    }

    /// Bounce-then-move: if this frame's move would leave [min, max], the
    /// direction flips first and the move is taken in the new direction.
    pub fn advance(&mut self, value: &mut f32) {
        let next = *value + self.speed * self.direction;
        if next > self.max || next < self.min {
            self.direction = -self.direction;
        }
        *value += self.speed * self.direction;
    }

    /// Move both bounds by dx
    #[inline]
    pub fn shift(&mut self, dx: f32) {
        self.min += dx;
        self.max += dx;
    }
}

/// Obstacle behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Static,
    /// Oscillates in y; bounds fixed relative to the owning platform
    MovingVertical(Oscillation),
    /// Oscillates in x; bounds are world coordinates and scroll with the world
    MovingHorizontal(Oscillation),
}

/// A lethal obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Scroll left by dx, dragging horizontal bounds along
    pub fn scroll(&mut self, dx: f32) {
        self.pos.x -= dx;
        if let ObstacleKind::MovingHorizontal(ref mut osc) = self.kind {
            osc.shift(-dx);
        }
    }

    /// Self-motion for moving kinds
    pub fn advance(&mut self) {
        match self.kind {
            ObstacleKind::Static => {}
            ObstacleKind::MovingVertical(ref mut osc) => osc.advance(&mut self.pos.y),
            ObstacleKind::MovingHorizontal(ref mut osc) => osc.advance(&mut self.pos.x),
        }
    }
}

/// Progress through the active difficulty's chunk sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnCursor {
    /// Next chunk to materialize
    pub chunk_index: usize,
    /// Set once a step finds no chunk left
    pub level_exhausted: bool,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct World {
    pub difficulty: Difficulty,
    /// Viewport size, fixed for the session
    pub viewport: Vec2,
    /// Frames simulated this run
    pub frame: u64,
    pub score: u64,
    pub player: Player,
    /// Live platforms, in spawn order
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub obstacles: Vec<Obstacle>,
    pub cursor: SpawnCursor,
    /// Run seed for the layout RNG
    pub seed: u64,
    /// Layout RNG (floor/ceiling choice, coin heights)
    pub rng: Pcg32,
}

impl World {
    /// Fresh run: player at the start position, floor and ceiling spanning
    /// the viewport, nothing else.
    pub fn new(difficulty: Difficulty, viewport: Vec2, seed: u64) -> Self {
        let span = viewport.x + 2.0 * BOUNDARY_OVERHANG;
        let platforms = vec![
            Platform::new(-BOUNDARY_OVERHANG, viewport.y - PLATFORM_HEIGHT, span),
            Platform::new(-BOUNDARY_OVERHANG, 0.0, span),
        ];

        Self {
            difficulty,
            viewport,
            frame: 0,
            score: 0,
            player: Player::new(viewport.y),
            platforms,
            coins: Vec::new(),
            obstacles: Vec::new(),
            cursor: SpawnCursor::default(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// y of the floor rail's top edge
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.viewport.y - PLATFORM_HEIGHT
    }

    /// Rightmost platform edge, if any platform is live
    pub fn spawn_frontier(&self) -> Option<f32> {
        self.platforms
            .iter()
            .map(Platform::right)
            .reduce(f32::max)
    }
}
