//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (lanes are keyed by index)
//! - No rendering or platform dependencies
//!
//! Identical seed plus identical command timeline gives identical state,
//! snapshot for snapshot.

pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod traffic;
pub mod worldgen;

pub use collision::{Hitbox, player_hit_by_vehicle, player_in_safe_zone};
pub use snapshot::{DeathLineView, LaneView, PlayerView, Snapshot, VehicleView};
pub use state::{
    Camera, DeathLine, Direction, GamePhase, GameState, Lane, LaneKind, LossCause, Player,
    Traffic, Vehicle,
};
pub use tick::{MoveCommand, advance_tick, apply_move};
