//! One simulation step per rendered frame
//!
//! Order within a step:
//!   1. Scroll platforms, coins and obstacles; drop what left the screen
//!   2. Obstacle self-motion
//!   3. Spawn the next chunk if needed
//!   4. Ease the flip rotation
//!   5. Integrate the player and resolve platform contact
//!   6. Lethal checks (out of bounds, obstacle overlap)
//!   7. Coin pickup
//!   8. Level complete (wins ties with death), then game over

use super::chunks::Chunk;
use super::collision::{collect_coins, hits_obstacle, out_of_bounds, resolve_platform_contact};
use super::spawn::spawn_ahead;
use super::state::World;

/// What the host loop should do after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Schedule another frame
    Continue,
    /// Player died; stop stepping
    GameOver,
    /// Chunks exhausted and every platform passed; stop stepping
    LevelComplete,
}

impl StepOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepOutcome::Continue)
    }
}

/// Advance the world by one frame.
///
/// On a terminal outcome only the score of this frame is kept; the rest of
/// the world stays at the last committed frame.
pub fn tick(world: &mut World, chunks: &[Chunk]) -> StepOutcome {
    let mut next = world.clone();
    let outcome = step(&mut next, chunks);

    if outcome.is_terminal() {
        world.score = next.score;
    } else {
        *world = next;
    }
    outcome
}

fn step(world: &mut World, chunks: &[Chunk]) -> StepOutcome {
    world.frame += 1;

    scroll(world);

    for obstacle in &mut world.obstacles {
        obstacle.advance();
    }

    spawn_ahead(world, chunks);

    let player = &mut world.player;
    player.ease_rotation();
    player.integrate();
    resolve_platform_contact(player, &world.platforms);

    let lethal = out_of_bounds(&world.player, world.viewport.y)
        || hits_obstacle(&world.player, &world.obstacles);

    let collected = collect_coins(&world.player, &mut world.coins);
    if collected > 0 {
        world.score += u64::from(collected);
        log::trace!("Frame {}: +{} coins, score {}", world.frame, collected, world.score);
    }

    let player_x = world.player.pos.x;
    let platforms_ahead = world.platforms.iter().any(|p| p.pos.x > player_x);
    if world.cursor.level_exhausted && !platforms_ahead {
        return StepOutcome::LevelComplete;
    }
    if lethal {
        return StepOutcome::GameOver;
    }
    StepOutcome::Continue
}

/// Move the world left by the difficulty's scroll speed
fn scroll(world: &mut World) {
    let speed = world.difficulty.scroll_speed();

    for platform in &mut world.platforms {
        platform.pos.x -= speed;
    }
    world.platforms.retain(|p| p.right() > 0.0);

    // Coins are pruned during pickup
    for coin in &mut world.coins {
        coin.pos.x -= speed;
    }

    for obstacle in &mut world.obstacles {
        obstacle.scroll(speed);
    }
    world.obstacles.retain(|o| o.right() > 0.0);
}
