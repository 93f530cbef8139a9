//! Collision detection and response
//!
//! Platforms are one-way: they only stop the player when it moves into them
//! from the open side. Obstacles and leaving the viewport are lethal.

use super::state::{Coin, Obstacle, Platform, Player};
use crate::rects_overlap;

/// How the player met a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Moving down onto a platform's top surface
    Landed,
    /// Moving up into a platform's underside
    Underside,
}

/// Snap the player onto the first platform it ran into this frame.
///
/// Platforms are checked in list order and the first hit wins; there is no
/// deepest-penetration tie-break.
pub fn resolve_platform_contact(player: &mut Player, platforms: &[Platform]) -> Option<Contact> {
    for platform in platforms {
        let overlaps_x = player.pos.x < platform.right() && player.right() > platform.pos.x;
        if !overlaps_x {
            continue;
        }

        let bottom = player.bottom();
        if player.velocity_y > 0.0 && bottom >= platform.pos.y && bottom <= platform.bottom() {
            player.pos.y = platform.pos.y - player.size.y;
            player.velocity_y = 0.0;
            return Some(Contact::Landed);
        }

        let top = player.top();
        if player.velocity_y < 0.0 && top <= platform.bottom() && top >= platform.pos.y {
            player.pos.y = platform.bottom();
            player.velocity_y = 0.0;
            return Some(Contact::Underside);
        }
    }
    None
}

/// Player entirely above or below the viewport
#[inline]
pub fn out_of_bounds(player: &Player, viewport_height: f32) -> bool {
    player.bottom() < 0.0 || player.top() > viewport_height
}

/// Any obstacle overlapping the player's box, whatever its kind
pub fn hits_obstacle(player: &Player, obstacles: &[Obstacle]) -> bool {
    obstacles
        .iter()
        .any(|o| rects_overlap(player.pos, player.size, o.pos, o.size))
}

/// Remove every coin within pickup range and return how many were taken.
/// Coins that scrolled off the left edge are dropped as well.
pub fn collect_coins(player: &Player, coins: &mut Vec<Coin>) -> u32 {
    let center = player.center();
    let reach = player.size.x / 2.0;
    let mut collected = 0;

    coins.retain(|coin| {
        if center.distance(coin.pos) < reach + coin.radius {
            collected += 1;
            return false;
        }
        coin.on_screen()
    });

    collected
}
