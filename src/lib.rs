//! Flip Runner - gravity-flip side-scroller simulation core
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (physics, spawning, collisions)
//! - `session`: Menu / playing / game-over state machine and frame scheduling
//! - `input`: Player intents and default key bindings
//! - `settings`: Viewport and seed configuration

pub mod input;
pub mod session;
pub mod settings;
pub mod sim;

pub use input::Intent;
pub use session::{FrameView, LoopControl, Session};
pub use settings::{ConfigError, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Player bounding box
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Player spawn x (y is half the viewport height)
    pub const PLAYER_START_X: f32 = 100.0;

    /// Gravity magnitude (units/frame²); only the sign ever changes
    pub const GRAVITY_STRENGTH: f32 = 0.4;
    /// Vertical speed applied against the new gravity on a flip
    pub const FLIP_IMPULSE: f32 = 10.0;

    /// Rotation easing factor per frame
    pub const ROTATION_EASING: f32 = 0.2;
    /// Below this the visual rotation snaps to its target
    pub const ROTATION_SNAP: f32 = 0.01;

    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const COIN_RADIUS: f32 = 10.0;

    /// One coin per this many units of gap
    pub const COIN_SPACING: f32 = 80.0;
    /// Coins stay this many radii clear of either rail
    pub const COIN_RAIL_CLEARANCE: f32 = 4.0;

    /// Spawn the next chunk once the rightmost platform ends within this of the viewport edge
    pub const SPAWN_LOOKAHEAD: f32 = 200.0;

    /// Boundary platforms start this far left of the viewport (and overhang the right edge as much)
    pub const BOUNDARY_OVERHANG: f32 = 50.0;

    /// Default viewport (matches the original canvas)
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1500.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 670.0;
}

/// Axis-aligned rectangle overlap (strict, touching edges don't count)
#[inline]
pub fn rects_overlap(a_pos: glam::Vec2, a_size: glam::Vec2, b_pos: glam::Vec2, b_size: glam::Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}
