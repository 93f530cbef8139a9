//! Procedural spawner
//!
//! Streams chunks from the library into the live world, one chunk per
//! frame, whenever the rightmost platform gets close to the viewport's
//! right edge.

use glam::Vec2;
use rand::Rng;

use super::chunks::{Chunk, ObstacleSpec, ObstacleSpecKind};
use super::state::{Coin, Obstacle, ObstacleKind, Oscillation, Platform, World};
use crate::consts::*;

/// Materialize the next chunk if the world needs one.
///
/// Returns true when a chunk was consumed. Once the sequence is used up the
/// first call that finds nothing left raises `cursor.level_exhausted`.
pub fn spawn_ahead(world: &mut World, chunks: &[Chunk]) -> bool {
    let Some(chunk) = chunks.get(world.cursor.chunk_index) else {
        if !world.cursor.level_exhausted {
            world.cursor.level_exhausted = true;
            log::debug!(
                "Frame {}: all {} chunks spawned, level exhausted",
                world.frame,
                chunks.len()
            );
        }
        return false;
    };

    // Nothing to attach to; the run is about to end anyway
    let Some(frontier) = world.spawn_frontier() else {
        return false;
    };
    if frontier >= world.viewport.x + SPAWN_LOOKAHEAD {
        return false;
    }

    log::debug!(
        "Frame {}: spawning chunk {} ({} platforms) at x={:.1}",
        world.frame,
        world.cursor.chunk_index,
        chunk.platforms.len(),
        frontier
    );
    materialize_chunk(world, chunk, frontier);
    world.cursor.chunk_index += 1;
    true
}

/// Lay out one chunk starting at `frontier`
fn materialize_chunk(world: &mut World, chunk: &Chunk, mut frontier: f32) {
    let floor_y = world.floor_y();

    for spec in &chunk.platforms {
        frontier += spec.gap_before;

        let y = match spec.fixed_y {
            Some(y) => y,
            None => {
                if world.rng.random_bool(0.5) {
                    0.0
                } else {
                    floor_y
                }
            }
        };
        let platform = Platform::new(frontier, y, spec.width);

        spawn_gap_coins(world, platform.pos.x, spec.gap_before);

        for obstacle in &spec.obstacles {
            let obstacle = place_obstacle(&platform, obstacle, world.viewport.y);
            world.obstacles.push(obstacle);
        }

        world.platforms.push(platform);
        frontier += spec.width;
    }
}

/// Evenly space `floor(gap / COIN_SPACING)` coins across the gap that ends
/// at `gap_end`, at random heights inside the safe band.
fn spawn_gap_coins(world: &mut World, gap_end: f32, gap: f32) {
    let count = (gap / COIN_SPACING).floor().max(0.0) as usize;
    if count == 0 {
        return;
    }

    let clearance = PLATFORM_HEIGHT + COIN_RADIUS * COIN_RAIL_CLEARANCE;
    let safe_top = clearance;
    let safe_bottom = world.viewport.y - clearance;
    let step = gap / (count + 1) as f32;
    let gap_start = gap_end - gap;

    for i in 1..=count {
        let x = gap_start + i as f32 * step;
        let y = if safe_bottom > safe_top {
            world.rng.random_range(safe_top..safe_bottom)
        } else {
            world.viewport.y / 2.0
        };
        world.coins.push(Coin::new(x, y));
    }
}

/// Position an obstacle on its platform: on top of floors, hanging under ceilings
fn place_obstacle(platform: &Platform, spec: &ObstacleSpec, viewport_height: f32) -> Obstacle {
    let size = Vec2::new(spec.width, spec.height);
    let x = platform.pos.x + spec.offset_x;
    let y = if platform.is_ceiling() {
        platform.bottom()
    } else {
        platform.pos.y - spec.height
    };
    let speed = spec.speed.unwrap_or(0.0);

    let kind = match spec.kind {
        ObstacleSpecKind::Static => ObstacleKind::Static,
        ObstacleSpecKind::MovingVertical => {
            // From the platform's inner edge to the opposite rail
            let (min, max) = if platform.is_ceiling() {
                (platform.bottom(), viewport_height - PLATFORM_HEIGHT - spec.height)
            } else {
                (PLATFORM_HEIGHT, platform.pos.y - spec.height)
            };
            ObstacleKind::MovingVertical(Oscillation::new(speed, min, max.max(min)))
        }
        ObstacleSpecKind::MovingHorizontal => {
            let min = platform.pos.x;
            let max = platform.right() - spec.width;
            ObstacleKind::MovingHorizontal(Oscillation::new(speed, min, max.max(min)))
        }
    };

    Obstacle {
        pos: Vec2::new(x, y),
        size,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::chunks::{ChunkLibrary, PlatformSpec};
    use crate::sim::state::Difficulty;

    fn world() -> World {
        World::new(Difficulty::Easy, Vec2::new(1000.0, 500.0), 42)
    }

    /// Slide everything so the frontier sits at the viewport edge
    fn pull_frontier_in(world: &mut World) {
        let frontier = world.spawn_frontier().unwrap_or(0.0);
        let dx = frontier - world.viewport.x;
        for p in &mut world.platforms {
            p.pos.x -= dx;
        }
    }

    #[test]
    fn test_spawns_one_chunk_at_frontier() {
        let mut world = world();
        let chunks = vec![
            Chunk::new(vec![
                PlatformSpec::new(100.0, 200.0).at_y(300.0),
                PlatformSpec::new(50.0, 100.0).at_y(250.0),
            ]),
            Chunk::new(vec![PlatformSpec::new(100.0, 200.0)]),
        ];

        assert!(spawn_ahead(&mut world, &chunks));
        assert_eq!(world.cursor.chunk_index, 1);
        assert_eq!(world.platforms.len(), 4);
        // Boundary platforms end at 1050
        assert_eq!(world.platforms[2].pos, Vec2::new(1150.0, 300.0));
        assert_eq!(world.platforms[3].pos, Vec2::new(1400.0, 250.0));
        assert_eq!(world.spawn_frontier(), Some(1500.0));
    }

    #[test]
    fn test_waits_for_lookahead() {
        let mut world = world();
        let chunks = vec![
            Chunk::new(vec![PlatformSpec::new(100.0, 500.0)]),
            Chunk::new(vec![PlatformSpec::new(100.0, 500.0)]),
        ];
        assert!(spawn_ahead(&mut world, &chunks));
        // Frontier now 1650, well past 1000 + 200
        assert!(!spawn_ahead(&mut world, &chunks));
        assert_eq!(world.cursor.chunk_index, 1);
    }

    #[test]
    fn test_exhaustion_sets_flag_once_sequence_is_used_up() {
        let mut world = world();
        let chunks = vec![Chunk::new(vec![PlatformSpec::new(100.0, 100.0)])];

        assert!(spawn_ahead(&mut world, &chunks));
        assert!(!world.cursor.level_exhausted);
        assert!(!spawn_ahead(&mut world, &chunks));
        assert!(world.cursor.level_exhausted);
    }

    #[test]
    fn test_empty_sequence_is_exhausted_immediately() {
        let mut world = world();
        assert!(!spawn_ahead(&mut world, &[]));
        assert!(world.cursor.level_exhausted);
        assert_eq!(world.platforms.len(), 2);
    }

    #[test]
    fn test_runs_every_builtin_chunk_once_in_order() {
        let library = ChunkLibrary::builtin();
        for difficulty in Difficulty::ALL {
            let chunks = library.chunks_for(difficulty);
            let mut world = World::new(difficulty, Vec2::new(1000.0, 500.0), 3);
            let mut spawned = 0;
            while spawn_ahead(&mut world, chunks) {
                spawned += 1;
                assert_eq!(world.cursor.chunk_index, spawned);
                pull_frontier_in(&mut world);
            }
            assert_eq!(spawned, chunks.len());
            assert!(world.cursor.level_exhausted);

            let expected: usize = chunks.iter().map(|c| c.platforms.len()).sum();
            assert_eq!(world.platforms.len(), 2 + expected);
            // Widths come out in authored order
            let widths: Vec<f32> = world.platforms[2..].iter().map(|p| p.width).collect();
            let authored: Vec<f32> = chunks
                .iter()
                .flat_map(|c| c.platforms.iter().map(|p| p.width))
                .collect();
            assert_eq!(widths, authored);
        }
    }

    #[test]
    fn test_coins_fill_gap_inside_safe_band() {
        let mut world = world();
        let chunks = vec![Chunk::new(vec![PlatformSpec::new(250.0, 100.0)])];
        spawn_ahead(&mut world, &chunks);

        // floor(250 / 80) = 3 coins over [1050, 1300]
        assert_eq!(world.coins.len(), 3);
        let xs: Vec<f32> = world.coins.iter().map(|c| c.pos.x).collect();
        assert_eq!(xs, vec![1112.5, 1175.0, 1237.5]);
        for coin in &world.coins {
            assert!(coin.pos.y >= 60.0 && coin.pos.y < 440.0);
        }
    }

    #[test]
    fn test_unpinned_platforms_land_on_a_rail() {
        let mut world = world();
        let chunks = vec![Chunk::new(
            (0..20).map(|_| PlatformSpec::new(10.0, 10.0)).collect(),
        )];
        spawn_ahead(&mut world, &chunks);
        for p in &world.platforms[2..] {
            assert!(p.pos.y == 0.0 || p.pos.y == 480.0);
        }
    }

    #[test]
    fn test_obstacle_placement_floor_and_ceiling() {
        let ceiling = Platform::new(1000.0, 0.0, 300.0);
        let floor = Platform::new(1000.0, 480.0, 300.0);

        let fixed = ObstacleSpec::fixed(50.0, 40.0, 30.0);
        let hanging = place_obstacle(&ceiling, &fixed, 500.0);
        assert_eq!(hanging.pos, Vec2::new(1050.0, 20.0));
        assert_eq!(hanging.kind, ObstacleKind::Static);

        let resting = place_obstacle(&floor, &fixed, 500.0);
        assert_eq!(resting.pos, Vec2::new(1050.0, 450.0));
    }

    #[test]
    fn test_moving_obstacle_ranges() {
        let ceiling = Platform::new(1000.0, 0.0, 300.0);
        let floor = Platform::new(1000.0, 480.0, 300.0);

        let vertical = ObstacleSpec::vertical(10.0, 40.0, 60.0, 2.0);
        match place_obstacle(&ceiling, &vertical, 500.0).kind {
            ObstacleKind::MovingVertical(osc) => {
                assert_eq!((osc.min, osc.max), (20.0, 420.0));
                assert_eq!(osc.direction, 1.0);
                assert_eq!(osc.speed, 2.0);
            }
            other => panic!("unexpected kind {other:?}"),
        }
        match place_obstacle(&floor, &vertical, 500.0).kind {
            ObstacleKind::MovingVertical(osc) => assert_eq!((osc.min, osc.max), (20.0, 420.0)),
            other => panic!("unexpected kind {other:?}"),
        }

        let horizontal = ObstacleSpec::horizontal(10.0, 50.0, 20.0, 3.0);
        match place_obstacle(&floor, &horizontal, 500.0).kind {
            ObstacleKind::MovingHorizontal(osc) => {
                assert_eq!((osc.min, osc.max), (1000.0, 1250.0));
                assert_eq!(osc.direction, 1.0);
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let chunks = ChunkLibrary::builtin().easy;
        let mut a = world();
        let mut b = world();
        spawn_ahead(&mut a, &chunks);
        spawn_ahead(&mut b, &chunks);
        assert_eq!(a.platforms, b.platforms);
        assert_eq!(a.coins, b.coins);
        assert_eq!(a.obstacles, b.obstacles);
    }
}
