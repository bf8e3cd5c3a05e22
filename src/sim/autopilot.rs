//! Demo autopilot
//!
//! Flies the hero through the next gap so the game can play itself on the
//! title screen and in headless runs. Pure function of the state, so demo
//! runs stay deterministic.

use super::state::{EntityKind, GamePhase, GameState, PipeSide};
use super::tick::TickInput;
use crate::consts::BOARD_HEIGHT;

/// Altitude the autopilot steers toward: the centre of the nearest gap not
/// yet cleared, or the middle of the board when no pipe is ahead.
pub fn target_altitude(state: &GameState) -> f32 {
    let player_left = state.player.pos.x;
    state
        .pipes
        .iter()
        .find(|pipe| {
            matches!(
                pipe.kind,
                EntityKind::Pipe {
                    side: PipeSide::Top,
                    passed: false,
                    ..
                }
            ) && pipe.pos.x + pipe.size.x >= player_left
        })
        .map(|top| top.bounds().bottom() + state.tuning.pipe_gap * 0.5)
        .unwrap_or(BOARD_HEIGHT * 0.5)
}

/// Decide this tick's inputs from the current state
pub fn plan(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    match state.phase {
        GamePhase::Idle => input.start = true,
        GamePhase::GameOver => input.restart = true,
        GamePhase::Running => {
            let target = target_altitude(state);
            let sag = state.tuning.pipe_gap * 0.25;
            let below = state.player.bounds().bottom() > target + sag;
            // Never stack flaps while still climbing
            input.jump = below && state.player.vel_y >= 0.0;
        }
        GamePhase::Countdown | GamePhase::Paused => {}
    }
    input
}

/// Merge the autopilot's plan into player input. Pause and resume stay with
/// the player.
pub fn assist(state: &GameState, input: &TickInput) -> TickInput {
    let plan = plan(state);
    TickInput {
        start: input.start || plan.start,
        jump: input.jump || plan.jump,
        restart: input.restart || plan.restart,
        ..input.clone()
    }
}
