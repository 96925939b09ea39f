//! Fixed timestep simulation tick.
//!
//! One call advances the world by exactly one step. The pass order is part
//! of the contract: the death line may end the run before any traffic moves,
//! and a vehicle spawned this tick can collide this tick.

use super::state::{GameState, LossCause};
use super::{collision, traffic, worldgen};
use crate::consts::*;

/// A single hop request, applied between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCommand {
    Up,
    Down,
    Left,
    Right,
}

/// Apply one movement command to the player.
///
/// Moves are tile-quantized: every hop is exactly one tile, so the player's
/// position always sits on the lane grid. Horizontal hops are swallowed at
/// the world bounds rather than clamped, keeping the grid alignment exact.
pub fn apply_move(state: &mut GameState, command: MoveCommand) {
    if !state.is_running() {
        return;
    }

    let pos = &mut state.player.pos;
    match command {
        MoveCommand::Up => pos.y -= TILE_SIZE,
        MoveCommand::Down => pos.y += TILE_SIZE,
        MoveCommand::Left => {
            if pos.x > WORLD_LEFT_BOUND {
                pos.x -= TILE_SIZE;
            }
        }
        MoveCommand::Right => {
            if pos.x < WORLD_RIGHT_BOUND {
                pos.x += TILE_SIZE;
            }
        }
    }
}

/// Advance the world by one fixed step.
///
/// Returns `Some(cause)` on the tick the run ends, `None` otherwise.
/// After the run ends this is a no-op.
pub fn advance_tick(state: &mut GameState) -> Option<LossCause> {
    if !state.is_running() {
        return None;
    }

    state.tick_count += 1;

    // --- Death line wake-up ---
    state.death_line.maybe_activate(state.player.pos.y);

    // --- Camera ---
    let look_ahead = state.tuning.camera_look_ahead;
    let rate = state.tuning.camera_follow_rate;
    state.camera.follow(state.player.pos.y, look_ahead, rate);

    // --- Death line advance and catch ---
    if state.death_line.active {
        state.death_line.advance(state.tuning.death_line_speed);
        if state.death_line.has_caught(state.player.pos.y) {
            state.end_run(LossCause::DeathLineOvertake);
            return Some(LossCause::DeathLineOvertake);
        }
    }

    // --- World and traffic ---
    worldgen::extend(state);
    traffic::spawn_step(state);
    traffic::advance(state);
    worldgen::prune(state);

    // --- Collision ---
    if collision::player_hit_by_vehicle(state) {
        state.end_run(LossCause::VehicleCollision);
        return Some(LossCause::VehicleCollision);
    }

    // --- Score ---
    // Only forward progress pays; backward play never refunds it.
    let progress = (-state.player.pos.y / TILE_SIZE).max(0.0) as u32;
    state.score = state.score.max(progress);

    None
}
