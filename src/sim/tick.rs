//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically, one display
//! frame per tick.

use super::autopilot;
use super::collision::{Aabb, detect_collision};
use super::difficulty;
use super::spawn;
use super::state::{CrashCause, EntityKind, GameEvent, GamePhase, GameState};
use crate::consts::{BOARD_HEIGHT, FRAME_MS};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Leave the title screen and start the countdown
    pub start: bool,
    /// Flap upward
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    /// Resume from pause (never pauses)
    pub resume: bool,
    /// Leave the game-over screen for the title screen
    pub restart: bool,
    /// Demo mode - autopilot plays the game
    pub demo: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    let input = if input.demo {
        autopilot::assist(state, input)
    } else {
        input.clone()
    };

    match state.phase {
        GamePhase::Idle => {
            if input.start {
                start_run(state);
            }
        }

        GamePhase::Countdown => tick_countdown(state),

        GamePhase::Running => {
            if input.pause {
                pause(state);
                return;
            }
            tick_running(state, input.jump);
        }

        GamePhase::Paused => {
            if input.pause || input.resume {
                resume(state);
            }
        }

        GamePhase::GameOver => {
            if input.restart {
                return_to_title(state);
            }
        }
    }
}

fn start_run(state: &mut GameState) {
    state.reset_run();
    state.phase = GamePhase::Countdown;
    state.emit(GameEvent::CountdownStarted);
    log::info!("Countdown started (seed {})", state.seed);
}

fn tick_countdown(state: &mut GameState) {
    state.countdown -= state.countdown_step;
    if state.countdown <= 0.0 {
        state.countdown = 0.0;
        state.phase = GamePhase::Running;
        let interval = difficulty::pipe_interval_ms(state.level, &state.tuning);
        state.spawn.arm_pipes(state.clock_ms, interval);
        state.emit(GameEvent::RunStarted);
        log::info!("Run started, pipes every {interval}ms");
    }
}

fn pause(state: &mut GameState) {
    state.phase = GamePhase::Paused;
    state.spawn.disarm_pipes();
    state.emit(GameEvent::Paused);
    log::info!("Paused at score {}", state.display_score());
}

fn resume(state: &mut GameState) {
    state.phase = GamePhase::Running;
    let interval = difficulty::pipe_interval_ms(state.level, &state.tuning);
    state.spawn.arm_pipes(state.clock_ms, interval);
    state.emit(GameEvent::Resumed);
    log::info!("Resumed");
}

fn return_to_title(state: &mut GameState) {
    state.reset_run();
    state.phase = GamePhase::Idle;
    state.emit(GameEvent::ReturnedToTitle);
}

fn end_run(state: &mut GameState, cause: CrashCause, crash: Aabb) {
    state.phase = GamePhase::GameOver;
    state.spawn.disarm_pipes();
    state.crash = Some(crash);

    let score = state.display_score();
    state.emit(GameEvent::Crashed { cause, score });
    if score > state.high_score {
        state.high_score = score;
        state.new_record = true;
        state.emit(GameEvent::NewHighScore { score });
        log::info!("New high score: {score}");
    }
    log::info!("Run over ({cause:?}) with score {score} at level {}", state.level);
}

fn tick_running(state: &mut GameState, jump: bool) {
    state.ticks += 1;
    state.clock_ms += FRAME_MS;
    let now = state.clock_ms;

    // Difficulty follows the score from the previous tick
    let level = difficulty::level_for_score(state.score, &state.tuning);
    if level != state.level {
        state.level = level;
        state.velocity_x = difficulty::scroll_velocity(level, &state.tuning);
        let interval = difficulty::pipe_interval_ms(level, &state.tuning);
        state.spawn.arm_pipes(now, interval);
        state.level_banner_since_ms = Some(now);
        state.emit(GameEvent::LevelUp { level });
        log::info!(
            "Level {level}: scroll {} px/tick, pipes every {interval}ms",
            state.velocity_x
        );
    }

    // Player physics
    if jump {
        state.player.vel_y = state.tuning.jump_velocity;
        state.emit(GameEvent::Jumped);
    }
    state.player.vel_y += state.tuning.gravity;
    state.player.pos.y = (state.player.pos.y + state.player.vel_y).max(0.0);
    if state.player.pos.y > BOARD_HEIGHT {
        let crash = state.player.bounds();
        end_run(state, CrashCause::Ground, crash);
        return;
    }

    let player = state.player.bounds();
    let vx = state.velocity_x;

    // Pipes: scroll, score, collide
    let mut pipe_hit = false;
    for pipe in state.pipes.iter_mut() {
        pipe.pos.x += vx;
        let trailing_edge = pipe.pos.x + pipe.size.x;
        if let EntityKind::Pipe { passed, .. } = &mut pipe.kind {
            if !*passed && player.left() > trailing_edge {
                *passed = true;
                state.score += 0.5;
            }
        }
        pipe_hit |= detect_collision(&player, &pipe.bounds(), state.shield.active);
    }
    if pipe_hit {
        end_run(state, CrashCause::Pipe, player);
        return;
    }

    while state.pipes.front().is_some_and(|pipe| pipe.is_off_screen()) {
        state.pipes.pop_front();
    }

    if let Some(since) = state.level_banner_since_ms {
        if now - since >= state.tuning.level_banner_ms {
            state.level_banner_since_ms = None;
        }
    }

    if state.shield.active && now > state.shield.ends_at_ms {
        state.shield.active = false;
        state.emit(GameEvent::ShieldExpired);
    }

    // Power-ups: scroll, pick up, evict
    let shield_ms = state.tuning.shield_duration_ms;
    let shield = &mut state.shield;
    let mut gained = false;
    state.power_ups.retain_mut(|power_up| {
        power_up.pos.x += vx;
        if detect_collision(&player, &power_up.bounds(), shield.active) {
            shield.grant(now, shield_ms);
            gained = true;
            false
        } else {
            !power_up.is_off_screen()
        }
    });
    if gained {
        state.emit(GameEvent::ShieldGained);
    }

    // Enemies: fly at their own speed
    let shielded = state.shield.active;
    let mut enemy_hit = false;
    state.enemies.retain_mut(|enemy| {
        if let EntityKind::Enemy { speed } = enemy.kind {
            enemy.pos.x += speed;
        }
        if detect_collision(&player, &enemy.bounds(), shielded) {
            enemy_hit = true;
            false
        } else {
            !enemy.is_off_screen()
        }
    });
    if enemy_hit {
        end_run(state, CrashCause::Enemy, player);
        return;
    }

    // Spawners
    if state
        .spawn
        .power_up_due(now, state.tuning.power_up_interval_ms)
    {
        spawn::spawn_power_up(state);
    }
    if state.spawn.enemy_due(now, state.tuning.enemy_interval_ms) {
        spawn::spawn_enemy(state);
    }
    for _ in 0..state.spawn.take_due_pipes(now) {
        spawn::place_pipes(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Entity, PipeSide, PipeStyle};
    use crate::tuning::Tuning;

    fn start() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    /// A state that has just finished its countdown, with power-up and enemy
    /// spawners held off so tests control every entity
    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default(), 0);
        tick(&mut state, &start());
        while state.phase == GamePhase::Countdown {
            tick(&mut state, &TickInput::default());
        }
        state.spawn.last_power_up_ms = Some(0.0);
        state.spawn.last_enemy_ms = Some(0.0);
        state.take_events();
        state
    }

    fn pipe_at(x: f32, y: f32) -> Entity {
        Entity::new(
            x,
            y,
            64.0,
            512.0,
            EntityKind::Pipe {
                side: PipeSide::Top,
                style: PipeStyle::Classic,
                passed: false,
            },
        )
    }

    #[test]
    fn test_idle_to_countdown_to_running() {
        let mut state = GameState::new(12345, Tuning::default(), 0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Idle);

        tick(&mut state, &start());
        assert_eq!(state.phase, GamePhase::Countdown);
        assert_eq!(state.take_events(), vec![GameEvent::CountdownStarted]);

        let mut countdown_ticks = 0;
        while state.phase == GamePhase::Countdown {
            tick(&mut state, &TickInput::default());
            countdown_ticks += 1;
        }
        // 3.0 / 0.016 rounds up to 188 ticks
        assert!((187..=189).contains(&countdown_ticks));
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.spawn.pipes_armed());
        assert_eq!(state.spawn.next_pipe_due_ms, Some(1700.0));
        assert!(state.take_events().contains(&GameEvent::RunStarted));
    }

    #[test]
    fn test_countdown_ignores_jump_and_pause() {
        let mut state = GameState::new(1, Tuning::default(), 0);
        tick(&mut state, &start());
        let y = state.player.pos.y;
        tick(
            &mut state,
            &TickInput {
                jump: true,
                pause: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Countdown);
        assert_eq!(state.player.pos.y, y);
    }

    #[test]
    fn test_gravity_pulls_player_down() {
        let mut state = running_state(1);
        let y0 = state.player.pos.y;
        tick(&mut state, &TickInput::default());
        assert!((state.player.vel_y - 0.4).abs() < 1e-6);
        assert!((state.player.pos.y - (y0 + 0.4)).abs() < 1e-4);
    }

    #[test]
    fn test_jump_sets_velocity_and_clamps_to_ceiling() {
        let mut state = running_state(1);
        state.player.pos.y = 2.0;
        tick(
            &mut state,
            &TickInput {
                jump: true,
                ..Default::default()
            },
        );
        assert!((state.player.vel_y - (-5.6)).abs() < 1e-6);
        assert_eq!(state.player.pos.y, 0.0);
        assert!(state.take_events().contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_falling_off_board_ends_run() {
        let mut state = running_state(1);
        state.player.pos.y = 639.0;
        state.player.vel_y = 5.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.spawn.pipes_armed());
        assert!(state.take_events().contains(&GameEvent::Crashed {
            cause: CrashCause::Ground,
            score: 0,
        }));
    }

    #[test]
    fn test_pipe_scores_half_point_once() {
        let mut state = running_state(1);
        // Far above the player; trailing edge crosses x=45 on this tick
        state.pipes.push_back(pipe_at(-18.0, -600.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 0.5);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 0.5);
    }

    #[test]
    fn test_pipe_collision_ends_run() {
        let mut state = running_state(1);
        state.pipes.push_back(pipe_at(50.0, 0.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.crash.is_some());
    }

    #[test]
    fn test_shield_ignores_pipe_collision() {
        let mut state = running_state(1);
        state.shield.grant(state.clock_ms, 5000.0);
        state.pipes.push_back(pipe_at(50.0, 0.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_shielded_player_cannot_collect_power_up() {
        let mut state = running_state(1);
        state.shield.grant(state.clock_ms, 5000.0);
        let ends_at = state.shield.ends_at_ms;
        let y = state.player.pos.y;
        state
            .power_ups
            .push(Entity::new(60.0, y, 40.0, 40.0, EntityKind::PowerUp));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.shield.ends_at_ms, ends_at);
        assert!(!state.take_events().contains(&GameEvent::ShieldGained));
    }

    #[test]
    fn test_shield_ignores_enemy_collision() {
        let mut state = running_state(1);
        state.shield.grant(state.clock_ms, 5000.0);
        let y = state.player.pos.y;
        state.enemies.push(Entity::new(
            60.0,
            y,
            60.0,
            40.0,
            EntityKind::Enemy { speed: -4.0 },
        ));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_shield_expires() {
        let mut state = running_state(1);
        state.shield.grant(state.clock_ms, 20.0);
        tick(&mut state, &TickInput::default());
        assert!(state.shield.active);
        tick(&mut state, &TickInput::default());
        assert!(!state.shield.active);
        assert!(state.take_events().contains(&GameEvent::ShieldExpired));
    }

    #[test]
    fn test_power_up_grants_shield() {
        let mut state = running_state(1);
        let y = state.player.pos.y;
        state
            .power_ups
            .push(Entity::new(60.0, y, 40.0, 40.0, EntityKind::PowerUp));
        tick(&mut state, &TickInput::default());
        assert!(state.shield.active);
        assert!(state.power_ups.is_empty());
        assert!((state.shield.ends_at_ms - (state.clock_ms + 5000.0)).abs() < 1e-6);
        assert!(state.take_events().contains(&GameEvent::ShieldGained));
    }

    #[test]
    fn test_enemy_collision_ends_run() {
        let mut state = running_state(1);
        let y = state.player.pos.y;
        state.enemies.push(Entity::new(
            60.0,
            y,
            60.0,
            40.0,
            EntityKind::Enemy { speed: -4.0 },
        ));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_off_screen_entities_evicted() {
        let mut state = running_state(1);
        state.pipes.push_back(pipe_at(-63.0, -600.0));
        state
            .power_ups
            .push(Entity::new(-39.0, 600.0, 40.0, 40.0, EntityKind::PowerUp));
        state.enemies.push(Entity::new(
            -59.0,
            600.0,
            60.0,
            40.0,
            EntityKind::Enemy { speed: -4.0 },
        ));
        tick(&mut state, &TickInput::default());
        assert!(state.pipes.is_empty());
        assert!(state.power_ups.is_empty());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_first_running_tick_spawns_power_up_and_enemy() {
        let mut state = running_state(5);
        state.spawn.reset_timers();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_pipes_spawn_on_interval() {
        let mut state = running_state(9);
        // 1700ms at 16.67ms per tick is 102 ticks
        for _ in 0..101 {
            tick(&mut state, &TickInput::default());
            state.player.pos.y = 320.0;
            state.player.vel_y = 0.0;
        }
        assert!(state.pipes.is_empty());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.pipes.len(), 2);
    }

    #[test]
    fn test_pause_freezes_and_resume_rearms() {
        let mut state = running_state(1);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        let clock = state.clock_ms;
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(!state.spawn.pipes_armed());

        let y = state.player.pos.y;
        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.clock_ms, clock);
        assert_eq!(state.player.pos.y, y);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.spawn.next_pipe_due_ms, Some(clock + 1700.0));
    }

    #[test]
    fn test_level_up_changes_difficulty_once() {
        let mut state = running_state(1);
        state.score = 15.0;
        tick(&mut state, &TickInput::default());
        let now = state.clock_ms;
        assert_eq!(state.level, 1);
        assert_eq!(state.velocity_x, -2.5);
        assert_eq!(state.spawn.pipe_interval_ms, 1500.0);
        assert_eq!(state.spawn.next_pipe_due_ms, Some(now + 1500.0));
        assert!(state.level_banner_since_ms.is_some());
        let events = state.take_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
                .count(),
            1
        );

        tick(&mut state, &TickInput::default());
        assert!(
            !state
                .take_events()
                .iter()
                .any(|e| matches!(e, GameEvent::LevelUp { .. }))
        );
    }

    #[test]
    fn test_new_high_score_recorded_at_game_end() {
        let mut state = running_state(1);
        state.high_score = 3;
        state.score = 4.5;
        state.player.pos.y = 700.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.high_score, 4);
        assert!(state.new_record);
        assert!(
            state
                .take_events()
                .contains(&GameEvent::NewHighScore { score: 4 })
        );
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = running_state(1);
        state.score = 20.0;
        state.pipes.push_back(pipe_at(50.0, 0.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.level, 0);
        assert!(state.pipes.is_empty() && state.power_ups.is_empty() && state.enemies.is_empty());
        assert_eq!(state.player.pos.y, 320.0);
        assert!(!state.spawn.pipes_armed());
        assert!(!state.shield.active);
        assert!(!state.new_record);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut a = GameState::new(99999, Tuning::default(), 0);
        let mut b = GameState::new(99999, Tuning::default(), 0);
        let demo = TickInput {
            demo: true,
            ..Default::default()
        };
        for _ in 0..2000 {
            tick(&mut a, &demo);
            tick(&mut b, &demo);
        }
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.pipes, b.pipes);
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.player, b.player);
    }
}
