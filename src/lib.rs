//! Jaywalk - an endless cross-the-road arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world generation, traffic, collisions, game state)
//! - `session`: Host-facing lifecycle facade (commands in, snapshots and events out)
//! - `tuning`: Data-driven game balance
//! - `highscores`: In-memory leaderboard for finished runs
//!
//! Rendering, audio, and window/input plumbing live in host layers that
//! consume [`sim::Snapshot`] and [`session::GameEvent`].

pub mod highscores;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use session::{GameEvent, GameSession, InputLatch};
pub use sim::{MoveCommand, Snapshot};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal host tick cadence. The sim counts ticks; pacing is the host's job.
    pub const TICK_HZ: u32 = 60;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;
    /// One lane row; every move is exactly one tile
    pub const TILE_SIZE: f32 = 40.0;

    /// Vehicle body (1.5 tiles wide, one lane tall)
    pub const VEHICLE_WIDTH: f32 = 60.0;
    pub const VEHICLE_HEIGHT: f32 = 40.0;
    /// Hitboxes shrink by this much on every side (forgiving near-misses)
    pub const HITBOX_INSET: f32 = 2.0;

    /// Permanent start zone spans lane indices [-HOME_RADIUS, HOME_RADIUS]
    pub const HOME_RADIUS: i32 = 3;

    /// Horizontal player clamp, one world-width past each screen edge
    pub const WORLD_LEFT_BOUND: f32 = -WORLD_WIDTH;
    pub const WORLD_RIGHT_BOUND: f32 = 2.0 * WORLD_WIDTH;

    /// Generation window: lanes guaranteed to exist around the player.
    /// Ahead is up the screen, toward smaller lane indices.
    pub const GEN_LANES_AHEAD: i32 = 10;
    pub const GEN_LANES_BEHIND: i32 = 25;
    /// Retention window: lanes outside it are dropped
    pub const KEEP_LANES_AHEAD: i32 = 20;
    pub const KEEP_LANES_BEHIND: i32 = 40;

    /// Vehicles are culled past this margin outside [0, WORLD_WIDTH]
    pub const VEHICLE_CULL_MARGIN: f32 = 2.0 * VEHICLE_WIDTH;
}

/// World Y owned by a lane index
#[inline]
pub fn lane_y(index: i32) -> f32 {
    index as f32 * consts::TILE_SIZE
}

/// Lane index owning a world Y. Tile-quantized positions land exactly.
#[inline]
pub fn lane_index_of(y: f32) -> i32 {
    (y / consts::TILE_SIZE).round() as i32
}
