//! Headless demo entry point
//!
//! Drives a few bot-played sessions against the engine and prints the
//! resulting leaderboard. Doubles as a smoke test for the public surface:
//! everything here goes through [`GameSession`] the way a real host would.

use jaywalk::consts::*;
use jaywalk::{GameEvent, GameSession, HighScores, MoveCommand};

const RUNS: u32 = 3;
/// Cap per run, so an unusually lucky bot still terminates
const MAX_TICKS: u64 = 60 * TICK_HZ as u64;
/// Minimum ticks between hops, roughly a human mashing pace
const HOP_COOLDOWN: u64 = 12;

fn main() {
    env_logger::init();

    // Optional seed argument; the default keeps repeated invocations identical.
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);

    log::info!("Jaywalk demo starting with seed: {}", seed);

    let mut scores = HighScores::new();
    let mut session = GameSession::new(seed);

    for run in 1..=RUNS {
        play_one_run(&mut session);

        for event in session.drain_events() {
            if let GameEvent::SessionEnded { score, cause } = event {
                log::info!(
                    "Run {} ended by {:?}: {} lanes in {} ticks",
                    run,
                    cause,
                    score,
                    session.state().tick_count
                );
                let name = format!("bot-{}", run);
                scores.add_score(&name, score, session.state().tick_count);
            }
        }

        if run < RUNS {
            session.reset();
        }
    }

    println!("\nLeaderboard after {} runs:", RUNS);
    if scores.is_empty() {
        println!("  (no run left the start zone)");
    }
    for (i, entry) in scores.entries.iter().enumerate() {
        println!(
            "  {:>2}. {:<8} {:>4} lanes  ({} ticks)",
            i + 1,
            entry.name,
            entry.score,
            entry.tick_count
        );
    }
}

/// Hop forward whenever the next row looks clear, at most once per cooldown
/// window. No retreating; the death line punishes hesitation on its own.
fn play_one_run(session: &mut GameSession) {
    let mut last_hop: u64 = 0;
    let mut ticks: u64 = 0;

    while session.is_running() && ticks < MAX_TICKS {
        if ticks.saturating_sub(last_hop) >= HOP_COOLDOWN && forward_is_clear(session) {
            session.handle_input(MoveCommand::Up);
            last_hop = ticks;
        }
        session.tick();
        ticks += 1;
    }
}

/// True when the row ahead is safe ground or free of nearby vehicles.
fn forward_is_clear(session: &GameSession) -> bool {
    let state = session.state();
    let target = state.player_lane() - 1;
    let Some(lane) = state.lanes.get(&target) else {
        return false;
    };
    if lane.is_safe() {
        return true;
    }

    let px = state.player.pos.x;
    state
        .vehicles
        .iter()
        .filter(|v| v.lane == target)
        .all(|v| (v.x - px).abs() > 2.0 * VEHICLE_WIDTH)
}
