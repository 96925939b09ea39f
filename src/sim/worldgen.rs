//! Infinite lane field maintenance
//!
//! Keeps a sliding window of lanes alive around the player: extends the
//! frontier across the generation window, decides safe zones with a
//! sequential spacing rule, seeds fresh road lanes with traffic, and prunes
//! everything that falls out of the retention window.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Direction, GameState, Lane, Traffic, Vehicle};
use crate::consts::*;
use crate::lane_y;
use crate::tuning::Tuning;

/// Ensure every lane in the generation window exists.
///
/// Existing lanes are never touched; only the frontiers grow. A fresh field
/// is walked in ascending index order.
pub fn extend(state: &mut GameState) {
    let player_lane = state.player_lane();
    let lo = player_lane - GEN_LANES_AHEAD;
    let hi = player_lane + GEN_LANES_BEHIND;

    let frontier = match (state.lanes.first_key_value(), state.lanes.last_key_value()) {
        (Some((&min, _)), Some((&max, _))) => Some((min, max)),
        _ => None,
    };

    match frontier {
        None => {
            for index in lo..=hi {
                create_lane(state, index);
            }
        }
        Some((min, max)) => {
            // Ahead frontier grows up the screen, toward smaller indices.
            for index in (lo..min).rev() {
                create_lane(state, index);
            }
            for index in (max + 1)..=hi {
                create_lane(state, index);
            }
        }
    }
}

/// Drop lanes outside the retention window, plus any vehicle whose lane
/// handle left it. The horizontal cull in `traffic` handles the rest.
pub fn prune(state: &mut GameState) {
    let player_lane = state.player_lane();
    let lo = player_lane - KEEP_LANES_AHEAD;
    let hi = player_lane + KEEP_LANES_BEHIND;

    state.lanes.retain(|&index, _| (lo..=hi).contains(&index));
    state.vehicles.retain(|v| (lo..=hi).contains(&v.lane));
}

fn create_lane(state: &mut GameState, index: i32) {
    let home = index.abs() <= HOME_RADIUS;
    let safe = decide_safe_zone(state, index);

    let traffic = if home || safe {
        None
    } else {
        Some(roll_traffic(&mut state.rng, &state.tuning))
    };

    let lane = Lane {
        index,
        y: lane_y(index),
        traffic,
    };
    if traffic.is_some() {
        seed_vehicles(&mut state.rng, &state.tuning, &lane, &mut state.vehicles);
    }
    state.lanes.insert(index, lane);
}

/// Sequential safe-zone rule. Home rows are never randomly safe and do not
/// touch the bookkeeping; a yes anywhere else records the lane index.
fn decide_safe_zone(state: &mut GameState, index: i32) -> bool {
    if index.abs() <= HOME_RADIUS {
        return false;
    }

    let distance = (index - state.generation.last_safe_zone_index).abs();
    if distance < state.tuning.min_safe_zone_interval {
        return false;
    }

    // At or past the maximum interval the zone is forced, no draw consumed.
    let safe = distance >= state.tuning.max_safe_zone_interval
        || state.rng.random_bool(state.tuning.safe_zone_probability);
    if safe {
        state.generation.last_safe_zone_index = index;
    }
    safe
}

/// Traffic parameters for a fresh road lane, fixed for its lifetime.
fn roll_traffic(rng: &mut Pcg32, tuning: &Tuning) -> Traffic {
    let direction = if rng.random_bool(0.5) {
        Direction::Right
    } else {
        Direction::Left
    };
    let speed = rng.random_range(tuning.lane_speed_min..tuning.lane_speed_max);
    let spawn_interval = rng.random_range(tuning.spawn_interval_min..tuning.spawn_interval_max);
    let spawn_timer = rng.random_range(0..spawn_interval);

    Traffic {
        direction,
        speed,
        spawn_timer,
        spawn_interval,
    }
}

/// Seed a fresh road lane with vehicles already mid-journey. The band is
/// twice the world width and biased downstream, so a few spawn beyond the
/// cull margin and vanish on the first advance pass.
fn seed_vehicles(rng: &mut Pcg32, tuning: &Tuning, lane: &Lane, vehicles: &mut Vec<Vehicle>) {
    let Some(traffic) = lane.traffic else {
        return;
    };

    let count = rng.random_range(tuning.initial_cars_min..=tuning.initial_cars_max);
    for _ in 0..count {
        let x = match traffic.direction {
            Direction::Right => rng.random_range(-WORLD_WIDTH..WORLD_WIDTH),
            Direction::Left => rng.random_range(-WORLD_WIDTH / 2.0..1.5 * WORLD_WIDTH),
        };
        vehicles.push(Vehicle {
            x,
            y: lane.y,
            lane: lane.index,
            direction: traffic.direction,
            speed: traffic.speed,
        });
    }
}
