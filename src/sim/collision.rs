//! Collision detection between the player and lane traffic
//!
//! Hitboxes are axis-aligned rectangles shrunk by a small inset on every
//! side, so brushing past a vehicle by a pixel or two stays survivable.
//! Safe-zone immunity is resolved here too: no overlap counts while the
//! player stands in the home rows or level with a rest stop.

use glam::Vec2;

use super::state::{GameState, Player, Vehicle};
use crate::consts::*;

/// Inset axis-aligned hitbox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub min: Vec2,
    pub max: Vec2,
}

impl Hitbox {
    /// Box centered on `center`, shrunk by [`HITBOX_INSET`] on every side
    pub fn around(center: Vec2, width: f32, height: f32) -> Self {
        let half = Vec2::new(width / 2.0 - HITBOX_INSET, height / 2.0 - HITBOX_INSET);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap test; boxes that merely touch do not intersect
    #[inline]
    pub fn intersects(&self, other: &Hitbox) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// The player's hitbox, one tile square before the inset
pub fn player_hitbox(player: &Player) -> Hitbox {
    Hitbox::around(player.pos, TILE_SIZE, TILE_SIZE)
}

/// A vehicle's hitbox around its body center
pub fn vehicle_hitbox(vehicle: &Vehicle) -> Hitbox {
    Hitbox::around(
        Vec2::new(vehicle.x, vehicle.y),
        VEHICLE_WIDTH,
        VEHICLE_HEIGHT,
    )
}

/// Whether the player currently stands on safe ground: the home rows, or
/// within half a tile vertically of any safe lane. Pure query, re-derivable
/// at any point in a tick.
pub fn player_in_safe_zone(state: &GameState) -> bool {
    if state.player_lane().abs() <= HOME_RADIUS {
        return true;
    }
    let player_y = state.player.pos.y;
    state
        .lanes
        .values()
        .any(|lane| lane.is_safe() && (lane.y - player_y).abs() < TILE_SIZE / 2.0)
}

/// Existence test over all live vehicles. Order across vehicles cannot
/// affect the outcome.
pub fn player_hit_by_vehicle(state: &GameState) -> bool {
    if player_in_safe_zone(state) {
        return false;
    }

    let player_box = player_hitbox(&state.player);
    let p = state.player.pos;

    state.vehicles.iter().any(|v| {
        // Broad phase: the real boxes always fit inside these margins.
        (v.y - p.y).abs() < TILE_SIZE
            && (v.x - p.x).abs() < VEHICLE_WIDTH + TILE_SIZE
            && vehicle_hitbox(v).intersects(&player_box)
    })
}
