//! Read-only render view of the world.
//!
//! What a host layer consumes each frame: the rows and vehicles the camera
//! can currently see, plus the run scalars. Capturing never mutates the sim
//! and the result is serde-friendly for out-of-process hosts.

use serde::{Deserialize, Serialize};

use super::collision;
use super::state::{Direction, GameState, LaneKind};
use crate::consts::*;

/// One visible lane row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneView {
    pub index: i32,
    pub y: f32,
    pub kind: LaneKind,
    pub safe: bool,
}

/// One visible vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleView {
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub in_safe_zone: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeathLineView {
    pub world_y: f32,
    pub active: bool,
}

/// Complete render view for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Top edge of the viewport in world space
    pub camera_y: f32,
    /// Visible rows in ascending index order
    pub lanes: Vec<LaneView>,
    pub vehicles: Vec<VehicleView>,
    pub player: PlayerView,
    pub death_line: DeathLineView,
    pub score: u32,
    pub running: bool,
}

/// Project the state onto the camera viewport.
///
/// Rows are kept with a one-tile margin past both viewport edges; vehicles
/// additionally need `x` within a vehicle width of the world span.
pub fn capture(state: &GameState) -> Snapshot {
    let camera_y = state.camera.y;
    let row_visible = |y: f32| {
        let screen_y = y - camera_y;
        screen_y > -TILE_SIZE && screen_y < VIEWPORT_HEIGHT + TILE_SIZE
    };

    let lanes = state
        .lanes
        .values()
        .filter(|lane| row_visible(lane.y))
        .map(|lane| LaneView {
            index: lane.index,
            y: lane.y,
            kind: lane.kind(),
            safe: lane.is_safe(),
        })
        .collect();

    let vehicles = state
        .vehicles
        .iter()
        .filter(|v| row_visible(v.y) && v.x >= -VEHICLE_WIDTH && v.x <= WORLD_WIDTH + VEHICLE_WIDTH)
        .map(|v| VehicleView {
            x: v.x,
            y: v.y,
            direction: v.direction,
        })
        .collect();

    Snapshot {
        camera_y,
        lanes,
        vehicles,
        player: PlayerView {
            x: state.player.pos.x,
            y: state.player.pos.y,
            in_safe_zone: collision::player_in_safe_zone(state),
        },
        death_line: DeathLineView {
            world_y: state.death_line.world_y,
            active: state.death_line.active,
        },
        score: state.score,
        running: state.is_running(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Vehicle;
    use crate::sim::worldgen;
    use crate::tuning::Tuning;

    fn populated_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        worldgen::extend(&mut state);
        state
    }

    #[test]
    fn test_lanes_culled_to_viewport_margin() {
        let state = populated_state(11);
        let snap = capture(&state);

        assert!(!snap.lanes.is_empty());
        for lane in &snap.lanes {
            let screen_y = lane.y - snap.camera_y;
            assert!(screen_y > -TILE_SIZE && screen_y < VIEWPORT_HEIGHT + TILE_SIZE);
        }
        // The generation window is taller than the viewport, so part of it
        // must have been culled.
        assert!(snap.lanes.len() < state.lanes.len());
    }

    #[test]
    fn test_lanes_ascend_by_index() {
        let snap = capture(&populated_state(12));
        assert!(snap.lanes.len() > 1);
        for pair in snap.lanes.windows(2) {
            assert!(pair[0].index < pair[1].index);
        }
    }

    #[test]
    fn test_vehicle_horizontal_culling() {
        let mut state = populated_state(13);
        state.vehicles.clear();
        // A row in the middle of the viewport.
        let y = state.camera.y + VIEWPORT_HEIGHT / 2.0;
        for x in [
            -VEHICLE_WIDTH,
            -VEHICLE_WIDTH - 1.0,
            WORLD_WIDTH + VEHICLE_WIDTH,
            WORLD_WIDTH + VEHICLE_WIDTH + 1.0,
        ] {
            state.vehicles.push(Vehicle {
                x,
                y,
                lane: 0,
                direction: Direction::Right,
                speed: 2.0,
            });
        }

        let snap = capture(&state);
        let xs: Vec<f32> = snap.vehicles.iter().map(|v| v.x).collect();
        assert_eq!(xs, vec![-VEHICLE_WIDTH, WORLD_WIDTH + VEHICLE_WIDTH]);
    }

    #[test]
    fn test_vehicles_on_offscreen_rows_culled() {
        let mut state = populated_state(14);
        state.vehicles.clear();
        // Well past the bottom viewport margin.
        state.vehicles.push(Vehicle {
            x: WORLD_WIDTH / 2.0,
            y: state.camera.y + VIEWPORT_HEIGHT + 2.0 * TILE_SIZE,
            lane: 30,
            direction: Direction::Left,
            speed: 2.0,
        });
        assert!(capture(&state).vehicles.is_empty());
    }

    #[test]
    fn test_player_view_flags_home_immunity() {
        let state = populated_state(15);
        let snap = capture(&state);
        assert_eq!(snap.player.x, state.player.pos.x);
        assert_eq!(snap.player.y, 0.0);
        assert!(snap.player.in_safe_zone);
        assert!(snap.running);
        assert!(!snap.death_line.active);
    }

    #[test]
    fn test_snapshot_is_json_friendly() {
        let snap = capture(&populated_state(16));
        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
