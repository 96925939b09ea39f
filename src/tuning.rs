//! Data-driven game balance
//!
//! Every number a designer would want to nudge lives here. Structural
//! constants (tile size, generation windows, hitboxes) stay in
//! [`crate::consts`] and are not tunable.

use serde::{Deserialize, Serialize};

/// Balance values for one run, fixed at session start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    // === Safe zones ===
    /// Chance a candidate lane becomes a rest stop
    pub safe_zone_probability: f64,
    /// Lanes since the last safe zone below which a new one is never placed
    pub min_safe_zone_interval: i32,
    /// Lanes since the last safe zone beyond which one is forced
    pub max_safe_zone_interval: i32,

    // === Traffic ===
    /// Lane speed range in pixels per tick, half-open [min, max)
    pub lane_speed_min: f32,
    pub lane_speed_max: f32,
    /// Spawn interval range in ticks, half-open [min, max)
    pub spawn_interval_min: u32,
    pub spawn_interval_max: u32,
    /// Below this occupancy a timed spawn attempt always succeeds
    pub min_cars_per_lane: u32,
    /// Above this occupancy a lane never spawns; an attempt at exactly this
    /// count may still land
    pub max_cars_per_lane: u32,
    /// Spawn probability when the player is close and approaching from behind
    pub near_spawn_probability: f64,
    /// Spawn probability otherwise
    pub far_spawn_probability: f64,
    /// "Close" means strictly less than this many lanes from the player
    pub near_player_lanes: i32,
    /// Vehicles seeded onto a fresh road lane, inclusive range
    pub initial_cars_min: u32,
    pub initial_cars_max: u32,

    // === Camera ===
    /// Fraction of the remaining gap the camera closes per tick
    pub camera_follow_rate: f32,
    /// The player sits this fraction of the way down the viewport
    pub camera_look_ahead: f32,

    // === Death line ===
    /// Climb speed in pixels per tick
    pub death_line_speed: f32,
    /// Starting distance behind the player's start row
    pub death_line_start_offset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            // Safe zones
            safe_zone_probability: 0.15,
            min_safe_zone_interval: 8,
            max_safe_zone_interval: 15,

            // Traffic
            lane_speed_min: 1.5,
            lane_speed_max: 4.0,
            spawn_interval_min: 30,
            spawn_interval_max: 120,
            min_cars_per_lane: 1,
            max_cars_per_lane: 4,
            near_spawn_probability: 0.8,
            far_spawn_probability: 0.6,
            near_player_lanes: 10,
            initial_cars_min: 2,
            initial_cars_max: 4,

            // Camera
            camera_follow_rate: 0.08,
            camera_look_ahead: 0.7,

            // Death line
            death_line_speed: 0.8,
            death_line_start_offset: 200.0,
        }
    }
}

impl Tuning {
    /// Parse a tuning override from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize for hosts that let players keep custom balance files
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
