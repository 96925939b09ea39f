//! Game state and core simulation types
//!
//! Every value the simulation mutates lives on [`GameState`]; the modules
//! beside this file are passes over it.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::lane_index_of;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended
    GameOver { cause: LossCause },
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Player overlapped a vehicle on a road lane
    VehicleCollision,
    /// The death line caught up to the player
    DeathLineOvertake,
}

/// Traffic flow direction along a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Signed unit step along +X
    #[inline]
    pub fn dx(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Traffic parameters of a road lane, fixed at lane creation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Traffic {
    pub direction: Direction,
    /// Pixels per tick for every vehicle on the lane
    pub speed: f32,
    /// Ticks accumulated toward the next spawn attempt
    pub spawn_timer: u32,
    /// Ticks between spawn attempts
    pub spawn_interval: u32,
}

/// What a lane is, as seen from outside the sim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneKind {
    /// Permanent start zone row
    Home,
    /// Randomly placed rest stop
    Rest,
    /// Road carrying traffic
    Road,
}

/// One horizontal world row
#[derive(Debug, Clone)]
pub struct Lane {
    /// Stable handle; vehicles refer to their lane by this index
    pub index: i32,
    /// World Y of the row (`index * TILE_SIZE`)
    pub y: f32,
    /// `None` for safe lanes (home rows and rest stops never carry traffic)
    pub traffic: Option<Traffic>,
}

impl Lane {
    /// Home rows and rest stops are both safe
    #[inline]
    pub fn is_safe(&self) -> bool {
        self.traffic.is_none()
    }

    pub fn kind(&self) -> LaneKind {
        if self.index.abs() <= HOME_RADIUS {
            LaneKind::Home
        } else if self.traffic.is_none() {
            LaneKind::Rest
        } else {
            LaneKind::Road
        }
    }
}

/// A vehicle moving along its lane
#[derive(Debug, Clone, Copy)]
pub struct Vehicle {
    pub x: f32,
    /// Equal to the owning lane's Y forever; vehicles never change rows
    pub y: f32,
    /// Owning lane handle
    pub lane: i32,
    pub direction: Direction,
    /// Pixels per tick, inherited from the lane
    pub speed: f32,
}

impl Vehicle {
    /// Advance one tick along the lane direction
    pub fn advance(&mut self) {
        self.x += self.direction.dx() * self.speed;
    }

    /// True once the vehicle has left the cull margin
    pub fn off_world(&self) -> bool {
        self.x < -VEHICLE_CULL_MARGIN || self.x > WORLD_WIDTH + VEHICLE_CULL_MARGIN
    }
}

/// The player
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub pos: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(WORLD_WIDTH / 2.0, 0.0),
        }
    }
}

impl Player {
    /// Lane index under the player. Moves are tile-quantized, so this is exact.
    #[inline]
    pub fn lane_index(&self) -> i32 {
        lane_index_of(self.pos.y)
    }
}

/// Smooth-follow camera; `y` is the top edge of the viewport
#[derive(Debug, Clone, Copy, Default)]
pub struct Camera {
    pub y: f32,
    pub target_y: f32,
}

impl Camera {
    /// Center on the player instantly (reset path)
    pub fn snap_to(&mut self, player_y: f32, look_ahead: f32) {
        self.target_y = player_y - VIEWPORT_HEIGHT * look_ahead;
        self.y = self.target_y;
    }

    /// Exponential follow. For rates in (0, 1] the camera approaches the
    /// target monotonically and never overshoots.
    pub fn follow(&mut self, player_y: f32, look_ahead: f32, rate: f32) {
        self.target_y = player_y - VIEWPORT_HEIGHT * look_ahead;
        self.y += (self.target_y - self.y) * rate;
    }
}

/// The line of doom rising from below the start zone
#[derive(Debug, Clone, Copy)]
pub struct DeathLine {
    /// World Y of the line's leading edge
    pub world_y: f32,
    /// Dormant until the player first leaves the home rows going forward
    pub active: bool,
}

impl DeathLine {
    /// Dormant, offset behind the player's start row
    pub fn new(player_y: f32, start_offset: f32) -> Self {
        Self {
            world_y: player_y + start_offset,
            active: false,
        }
    }

    /// One-shot dormant to active transition: fires the first time the
    /// player's Y is above the home rows. Returns true on the tick it fires.
    pub fn maybe_activate(&mut self, player_y: f32) -> bool {
        if !self.active && player_y < -(HOME_RADIUS as f32) * TILE_SIZE {
            self.active = true;
            return true;
        }
        false
    }

    /// Advance one tick. The line never pauses and never retreats.
    pub fn advance(&mut self, speed: f32) {
        self.world_y -= speed;
    }

    /// The run ends when the player falls level with the line
    #[inline]
    pub fn has_caught(&self, player_y: f32) -> bool {
        player_y >= self.world_y
    }
}

/// Safe-zone bookkeeping for the sequential placement rule
#[derive(Debug, Clone, Copy)]
pub struct GenerationState {
    /// Lane index of the most recent safe decision. Starts at a sentinel far
    /// enough out that the first frontier lane of a fresh field is forced safe.
    pub last_safe_zone_index: i32,
}

impl Default for GenerationState {
    fn default() -> Self {
        Self {
            last_safe_zone_index: -100,
        }
    }
}

/// Complete simulation state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// The only randomness source in the sim
    pub rng: Pcg32,
    /// Balance values, fixed for the run
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub tick_count: u64,
    /// Highest forward lane count reached
    pub score: u32,
    pub player: Player,
    pub camera: Camera,
    pub death_line: DeathLine,
    /// Live lanes keyed by index: uniqueness and iteration order for free
    pub lanes: BTreeMap<i32, Lane>,
    /// Live vehicles in spawn order
    pub vehicles: Vec<Vehicle>,
    /// Safe-zone placement bookkeeping
    pub generation: GenerationState,
}

impl GameState {
    /// Fresh state with an empty field; `worldgen::extend` populates it
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let player = Player::default();
        let mut camera = Camera::default();
        camera.snap_to(player.pos.y, tuning.camera_look_ahead);
        let death_line = DeathLine::new(player.pos.y, tuning.death_line_start_offset);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Running,
            tick_count: 0,
            score: 0,
            player,
            camera,
            death_line,
            lanes: BTreeMap::new(),
            vehicles: Vec::new(),
            generation: GenerationState::default(),
        }
    }

    /// Lane index under the player
    #[inline]
    pub fn player_lane(&self) -> i32 {
        self.player.lane_index()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Running)
    }

    /// Terminal transition; the score freezes as-is
    pub fn end_run(&mut self, cause: LossCause) {
        self.phase = GamePhase::GameOver { cause };
    }

    /// Live vehicles per lane handle, recomputed from scratch every call
    pub fn occupancy(&self) -> BTreeMap<i32, u32> {
        let mut counts = BTreeMap::new();
        for vehicle in &self.vehicles {
            *counts.entry(vehicle.lane).or_insert(0u32) += 1;
        }
        counts
    }
}
