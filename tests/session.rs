//! End-to-end session tests driving `Game<MemoryStore>` frame by frame

use hero_flight::consts::SIM_DT;
use hero_flight::platform::{KeyValueStore, MemoryStore};
use hero_flight::sim::{CrashCause, GameEvent, GamePhase};
use hero_flight::{Command, Game, HighScore, Tuning};

fn running_game(seed: u64, store: MemoryStore) -> Game<MemoryStore> {
    let mut game = Game::new(seed, store, Tuning::default());
    game.handle(Command::Start);
    while game.phase() == GamePhase::Countdown {
        game.advance(SIM_DT);
    }
    game
}

/// Keep the hero mid-air with nothing to hit
fn hover(game: &mut Game<MemoryStore>) {
    let state = game.state_mut();
    state.player.pos.y = 320.0;
    state.player.vel_y = 0.0;
    state.pipes.clear();
    state.enemies.clear();
}

/// Drop the hero off the bottom of the board with the given score
fn crash_with_score(game: &mut Game<MemoryStore>, score: f32) -> Vec<GameEvent> {
    let state = game.state_mut();
    state.score = score;
    state.player.pos.y = 700.0;
    game.advance(SIM_DT)
}

#[test]
fn level_threshold_raises_difficulty_once() {
    let mut game = running_game(11, MemoryStore::new());
    hover(&mut game);
    game.state_mut().score = 15.0;

    let mut level_ups = 0;
    let mut interval_changes = 0;
    let mut last_interval = game.state().spawn.pipe_interval_ms;
    for _ in 0..300 {
        let events = game.advance(SIM_DT);
        level_ups += events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { level: 1 }))
            .count();
        let interval = game.state().spawn.pipe_interval_ms;
        if interval != last_interval {
            interval_changes += 1;
            last_interval = interval;
        }
        hover(&mut game);
    }

    assert_eq!(level_ups, 1);
    assert_eq!(interval_changes, 1);
    assert_eq!(last_interval, 1500.0);
    assert_eq!(game.state().velocity_x, -2.5);
}

#[test]
fn high_score_written_once_per_run() {
    let mut game = running_game(3, MemoryStore::new());
    let events = crash_with_score(&mut game, 5.5);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert!(events.contains(&GameEvent::Crashed {
        cause: CrashCause::Ground,
        score: 5,
    }));
    assert!(events.contains(&GameEvent::NewHighScore { score: 5 }));
    assert_eq!(game.store().writes(), 1);
    assert_eq!(
        game.store().get(HighScore::STORAGE_KEY).as_deref(),
        Some("5")
    );

    // Game over frames do not write again
    for _ in 0..30 {
        game.advance(SIM_DT);
    }
    assert_eq!(game.store().writes(), 1);

    // A worse run leaves storage alone
    game.handle(Command::Restart);
    game.handle(Command::Start);
    while game.phase() == GamePhase::Countdown {
        game.advance(SIM_DT);
    }
    crash_with_score(&mut game, 3.0);
    assert_eq!(game.store().writes(), 1);

    // A better one writes exactly once more
    game.handle(Command::Restart);
    game.handle(Command::Start);
    while game.phase() == GamePhase::Countdown {
        game.advance(SIM_DT);
    }
    crash_with_score(&mut game, 9.0);
    assert_eq!(game.store().writes(), 2);
    assert_eq!(game.high_score(), HighScore(9));
}

#[test]
fn stored_record_must_be_beaten() {
    let store = MemoryStore::new().with_entry(HighScore::STORAGE_KEY, "20");
    let mut game = running_game(5, store);
    let events = crash_with_score(&mut game, 20.0);
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
    );
    assert_eq!(game.store().writes(), 0);
}

#[test]
fn restart_returns_clean_title_screen() {
    let mut game = running_game(8, MemoryStore::new());
    for _ in 0..200 {
        game.advance(SIM_DT);
        hover(&mut game);
    }
    crash_with_score(&mut game, 12.0);
    assert_eq!(game.phase(), GamePhase::GameOver);

    let events = game.handle(Command::Restart);
    assert_eq!(events, vec![GameEvent::ReturnedToTitle]);
    let state = game.state();
    assert_eq!(state.phase, GamePhase::Idle);
    assert_eq!(state.score, 0.0);
    assert_eq!(state.level, 0);
    assert!(state.pipes.is_empty());
    assert!(state.power_ups.is_empty());
    assert!(state.enemies.is_empty());
    assert_eq!(state.player.pos.y, 320.0);
    assert!(!state.shield.active);
    assert!(!state.spawn.pipes_armed());
    assert!(!game.wants_frames());
    // The record survives the reset
    assert_eq!(state.high_score, 12);
}

#[test]
fn pause_halts_simulation_and_spawning() {
    let mut game = running_game(21, MemoryStore::new());
    for _ in 0..60 {
        game.advance(SIM_DT);
        hover(&mut game);
    }
    game.handle(Command::TogglePause);
    assert_eq!(game.phase(), GamePhase::Paused);
    let clock = game.state().clock_ms;

    // Several seconds of wall time pass while paused
    for _ in 0..600 {
        game.advance(SIM_DT);
    }
    assert_eq!(game.state().clock_ms, clock);
    assert!(game.state().pipes.is_empty());

    game.handle(Command::Resume);
    assert_eq!(game.state().spawn.next_pipe_due_ms, Some(clock + 1700.0));

    // Nothing spawns until a full interval after resuming
    for _ in 0..100 {
        game.advance(SIM_DT);
        let state = game.state_mut();
        state.player.pos.y = 320.0;
        state.player.vel_y = 0.0;
        state.enemies.clear();
    }
    assert!(game.state().pipes.is_empty());
}

#[test]
fn mute_toggle_persists_across_sessions() {
    let mut game = Game::new(1, MemoryStore::new(), Tuning::default());
    game.handle(Command::ToggleMute);
    let store = game.store().clone();

    let reloaded = Game::new(2, store, Tuning::default());
    assert!(!reloaded.settings().sound_enabled);
}

#[test]
fn same_seed_same_demo_run() {
    let play = |seed: u64| {
        let mut game = Game::new(seed, MemoryStore::new(), Tuning::default());
        game.handle(Command::ToggleDemo);
        let mut log = Vec::new();
        for _ in 0..3_000 {
            log.extend(game.advance(SIM_DT));
        }
        (log, game.state().score, game.state().player.pos)
    };
    assert_eq!(play(77), play(77));
}
