//! Authored level chunks
//!
//! A chunk is a short run of platforms (with their obstacles) that the
//! spawner materializes in one go. Each difficulty has a finite, ordered
//! chunk sequence; running out of chunks is what ends a level.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::state::Difficulty;
use crate::settings::ConfigError;

/// Obstacle behaviour as authored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleSpecKind {
    Static,
    MovingVertical,
    MovingHorizontal,
}

/// An obstacle attached to a platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    /// From the platform's left edge
    pub offset_x: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ObstacleSpecKind,
    /// Only meaningful for moving kinds; a moving obstacle without one stays put
    #[serde(default)]
    pub speed: Option<f32>,
}

impl ObstacleSpec {
    pub fn fixed(offset_x: f32, width: f32, height: f32) -> Self {
        Self {
            offset_x,
            width,
            height,
            kind: ObstacleSpecKind::Static,
            speed: None,
        }
    }

    pub fn vertical(offset_x: f32, width: f32, height: f32, speed: f32) -> Self {
        Self {
            offset_x,
            width,
            height,
            kind: ObstacleSpecKind::MovingVertical,
            speed: Some(speed),
        }
    }

    pub fn horizontal(offset_x: f32, width: f32, height: f32, speed: f32) -> Self {
        Self {
            offset_x,
            width,
            height,
            kind: ObstacleSpecKind::MovingHorizontal,
            speed: Some(speed),
        }
    }
}

/// One platform in a chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    /// Empty space before this platform
    pub gap_before: f32,
    pub width: f32,
    /// Fixed top edge; otherwise a coin flip between ceiling and floor
    #[serde(default)]
    pub fixed_y: Option<f32>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
}

impl PlatformSpec {
    pub fn new(gap_before: f32, width: f32) -> Self {
        Self {
            gap_before,
            width,
            fixed_y: None,
            obstacles: Vec::new(),
        }
    }

    pub fn at_y(mut self, y: f32) -> Self {
        self.fixed_y = Some(y);
        self
    }

    pub fn with(mut self, obstacle: ObstacleSpec) -> Self {
        self.obstacles.push(obstacle);
        self
    }
}

/// Platforms spawned together in one spawner step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chunk {
    pub platforms: Vec<PlatformSpec>,
}

impl Chunk {
    pub fn new(platforms: Vec<PlatformSpec>) -> Self {
        Self { platforms }
    }

    /// Horizontal distance the chunk covers (gaps plus widths)
    pub fn span(&self) -> f32 {
        self.platforms.iter().map(|p| p.gap_before + p.width).sum()
    }
}

/// Chunk sequences for every difficulty. Read-only for a session's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkLibrary {
    #[serde(default)]
    pub easy: Vec<Chunk>,
    #[serde(default)]
    pub medium: Vec<Chunk>,
    #[serde(default)]
    pub hard: Vec<Chunk>,
}

impl Default for ChunkLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ChunkLibrary {
    /// Ordered chunk sequence for a difficulty
    pub fn chunks_for(&self, difficulty: Difficulty) -> &[Chunk] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Parse a library from JSON (`{"easy": [[platform, ...], ...], ...}`)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a library from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let library = Self::from_json(&json)?;
        log::info!(
            "Loaded chunk library from {}: {} easy, {} medium, {} hard",
            path.display(),
            library.easy.len(),
            library.medium.len(),
            library.hard.len()
        );
        Ok(library)
    }

    /// The shipped levels
    pub fn builtin() -> Self {
        Self {
            easy: easy_chunks(),
            medium: medium_chunks(),
            hard: hard_chunks(),
        }
    }
}

fn easy_chunks() -> Vec<Chunk> {
    use ObstacleSpec as O;
    use PlatformSpec as P;

    vec![
        Chunk::new(vec![
            P::new(200.0, 300.0),
            P::new(150.0, 250.0).at_y(300.0),
            P::new(150.0, 350.0).with(O::fixed(150.0, 40.0, 40.0)),
            P::new(200.0, 400.0).with(O::horizontal(20.0, 60.0, 20.0, 1.5)),
        ]),
        Chunk::new(vec![
            P::new(250.0, 450.0).with(O::vertical(200.0, 50.0, 60.0, 1.5)),
            P::new(280.0, 500.0),
        ]),
        Chunk::new(vec![
            P::new(180.0, 250.0).at_y(350.0),
            P::new(180.0, 250.0).at_y(250.0),
            P::new(200.0, 300.0).with(O::fixed(100.0, 30.0, 30.0)),
            P::new(180.0, 350.0).with(O::horizontal(20.0, 80.0, 20.0, 2.0)),
        ]),
    ]
}

fn medium_chunks() -> Vec<Chunk> {
    use ObstacleSpec as O;
    use PlatformSpec as P;

    vec![
        Chunk::new(vec![
            P::new(150.0, 200.0).with(O::fixed(80.0, 40.0, 40.0)),
            P::new(160.0, 280.0).with(O::horizontal(10.0, 50.0, 20.0, 2.5)),
            P::new(150.0, 220.0)
                .at_y(300.0)
                .with(O::vertical(110.0, 50.0, 80.0, 2.0)),
            P::new(160.0, 200.0),
        ]),
        Chunk::new(vec![
            P::new(200.0, 350.0),
            P::new(150.0, 150.0).with(O::fixed(50.0, 50.0, 50.0)),
            P::new(150.0, 150.0).at_y(400.0),
            P::new(220.0, 400.0).with(O::vertical(180.0, 60.0, 90.0, 2.5)),
        ]),
        Chunk::new(vec![
            P::new(120.0, 150.0).at_y(200.0),
            P::new(120.0, 150.0).at_y(400.0),
            P::new(120.0, 400.0)
                .with(O::fixed(150.0, 40.0, 40.0))
                .with(O::horizontal(20.0, 70.0, 20.0, 3.0)),
        ]),
    ]
}

fn hard_chunks() -> Vec<Chunk> {
    use ObstacleSpec as O;
    use PlatformSpec as P;

    vec![
        Chunk::new(vec![
            P::new(120.0, 100.0).with(O::vertical(30.0, 40.0, 60.0, 3.0)),
            P::new(130.0, 220.0)
                .at_y(300.0)
                .with(O::horizontal(10.0, 40.0, 20.0, 4.0)),
            P::new(120.0, 100.0).with(O::fixed(30.0, 40.0, 40.0)),
            P::new(130.0, 120.0),
            P::new(120.0, 100.0),
        ]),
        Chunk::new(vec![
            P::new(100.0, 150.0).at_y(450.0),
            P::new(100.0, 150.0).at_y(150.0),
            P::new(100.0, 250.0)
                .with(O::vertical(50.0, 50.0, 100.0, 3.5))
                .with(O::horizontal(150.0, 50.0, 20.0, 3.0)),
        ]),
        Chunk::new(vec![
            P::new(150.0, 250.0),
            P::new(100.0, 100.0).with(O::fixed(20.0, 60.0, 60.0)),
            P::new(100.0, 220.0)
                .at_y(300.0)
                .with(O::horizontal(10.0, 60.0, 20.0, 4.5)),
            P::new(180.0, 120.0).with(O::fixed(40.0, 40.0, 40.0)),
        ]),
        Chunk::new(vec![
            P::new(80.0, 80.0).with(O::vertical(20.0, 40.0, 40.0, 4.0)),
            P::new(80.0, 80.0).at_y(200.0),
            P::new(80.0, 180.0).with(O::horizontal(10.0, 50.0, 20.0, 5.0)),
            P::new(80.0, 80.0).at_y(400.0),
            P::new(80.0, 80.0),
        ]),
    ]
}
