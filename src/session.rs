//! Host-facing session facade.
//!
//! Owns one [`GameState`] plus the event queue a host drains each frame.
//! A renderer, audio layer, or bot talks to [`GameSession`]; the `sim`
//! modules behind it stay free of host concerns.

use log::info;
use rand::Rng;

use crate::sim::{self, GameState, LossCause, MoveCommand, Snapshot, worldgen};
use crate::tuning::Tuning;

/// Session lifecycle notification for host layers.
///
/// Hosts map these onto presentation: start the ambient loop on
/// `SessionStarted`, play the one-shot defeat sting for the reported cause
/// on `SessionEnded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    SessionStarted,
    SessionEnded { score: u32, cause: LossCause },
}

/// A live run plus the notifications it has emitted.
pub struct GameSession {
    state: GameState,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a session with default balance values.
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Start a session with custom balance values.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = GameState::new(seed, tuning);
        worldgen::extend(&mut state);
        info!("Session started with seed: {}", seed);
        Self {
            state,
            events: vec![GameEvent::SessionStarted],
        }
    }

    /// Advance the run by one fixed step.
    pub fn tick(&mut self) {
        if let Some(cause) = sim::advance_tick(&mut self.state) {
            let score = self.state.score;
            info!("Session ended: {:?} at score {}", cause, score);
            self.events.push(GameEvent::SessionEnded { score, cause });
        }
    }

    /// Apply one move immediately. Ignored once the run has ended.
    pub fn handle_input(&mut self, command: MoveCommand) {
        sim::apply_move(&mut self.state, command);
    }

    /// Start over on a fresh field.
    ///
    /// The replacement state is built whole and swapped in, so no caller can
    /// observe a half-reset world. The next seed is drawn from the current
    /// RNG: replaying a session from its original seed reproduces every
    /// following run too. Pending events survive the swap.
    pub fn reset(&mut self) {
        let seed = self.state.rng.random::<u64>();
        let tuning = self.state.tuning.clone();
        self.state = GameState::new(seed, tuning);
        worldgen::extend(&mut self.state);
        info!("Session reset with seed: {}", seed);
        self.events.push(GameEvent::SessionStarted);
    }

    /// Render view of the current state.
    pub fn snapshot(&self) -> Snapshot {
        sim::snapshot::capture(&self.state)
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Read access for hosts that want more than the snapshot.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Edge trigger for hosts that report held keys every frame.
///
/// `press` yields the command once per physical key-down; holding the key
/// yields nothing more until `release`.
#[derive(Debug, Default)]
pub struct InputLatch {
    held: [bool; 4],
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a key as down. Returns the command on the first report only.
    pub fn press(&mut self, command: MoveCommand) -> Option<MoveCommand> {
        let slot = Self::slot(command);
        if self.held[slot] {
            None
        } else {
            self.held[slot] = true;
            Some(command)
        }
    }

    /// Report a key as up again.
    pub fn release(&mut self, command: MoveCommand) {
        self.held[Self::slot(command)] = false;
    }

    fn slot(command: MoveCommand) -> usize {
        match command {
            MoveCommand::Up => 0,
            MoveCommand::Down => 1,
            MoveCommand::Left => 2,
            MoveCommand::Right => 3,
        }
    }
}
