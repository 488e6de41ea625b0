//! Integration tests for the game progression.

use tower_stack::core::{GameController, GameEvent};
use tower_stack::types::{Axis, GamePhase, MOVE_AMOUNT};

/// Tick until the swinging block is within `eps` of the top block.
fn align(game: &mut GameController, eps: f64) {
    for _ in 0..10_000 {
        let tower = game.tower();
        let current = tower.current().unwrap();
        let axis = current.axis();
        if (current.position().get(axis) - tower.top().position().get(axis)).abs() < eps {
            return;
        }
        game.on_tick();
    }
    panic!("never aligned");
}

fn started(seed: u32) -> GameController {
    let mut game = GameController::new(seed);
    game.load();
    assert!(game.on_action());
    game.drain_events().for_each(drop);
    game
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameController::new(12345);
    assert_eq!(game.phase(), GamePhase::Loading);
    assert!(!game.on_action(), "actions are ignored while loading");

    game.load();
    assert_eq!(game.phase(), GamePhase::Ready);
    assert_eq!(game.tower().len(), 1);
    assert!(game.tower().current().is_none());

    assert!(game.on_action());
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.score(), 0);

    let current = game.tower().current().unwrap();
    assert_eq!(current.index(), 1);
    assert_eq!(current.axis(), Axis::X);
    assert_eq!(current.position().x.abs(), MOVE_AMOUNT);
}

#[test]
fn test_axes_alternate() {
    let mut game = started(9);
    for expected in [Axis::X, Axis::Z, Axis::X, Axis::Z] {
        assert_eq!(game.tower().current().unwrap().axis(), expected);
        align(&mut game, 0.2);
        game.on_action();
    }
    assert_eq!(game.score(), 4);
}

#[test]
fn test_first_drop_without_ticks_misses() {
    let mut game = started(3);
    // Spawned at ±12 against a 10-wide base.
    assert!(game.on_action());
    assert_eq!(game.phase(), GamePhase::Ended);
    assert_eq!(game.score(), 0);

    let events: Vec<_> = game.drain_events().collect();
    assert!(matches!(events[0], GameEvent::Missed { index: 1, .. }));
    assert_eq!(events[1], GameEvent::Ended { score: 0 });
    assert_eq!(events.len(), 2);
}

#[test]
fn test_score_counts_placements() {
    let mut game = started(77);
    for n in 1..=6 {
        align(&mut game, 1.0);
        game.on_action();
        assert_eq!(game.score(), n);
        assert_eq!(game.tower().len(), n as usize + 1);
        assert_eq!(game.phase(), GamePhase::Playing);
    }
}

#[test]
fn test_reset_restores_base_only() {
    let mut game = started(5);
    for _ in 0..3 {
        align(&mut game, 1.0);
        game.on_action();
    }
    let base = game.tower().base().clone();
    // A just-spawned block is already past the tower.
    game.on_action();
    assert_eq!(game.phase(), GamePhase::Ended);
    assert_eq!(game.score(), 3);

    assert!(game.on_action());
    assert_eq!(game.phase(), GamePhase::Resetting);
    let teardown = game.teardown().unwrap();
    assert_eq!(teardown.removed(), 3);
    assert_eq!(teardown.duration_ms(), 2 * 200 + 3 * 20);
    assert_eq!(game.score(), 0);
    assert_eq!(game.tower().len(), 1);

    assert!(!game.on_action(), "actions are ignored while resetting");
    assert!(!game.on_teardown_complete(teardown.id() + 1));
    assert!(game.on_teardown_complete(teardown.id()));
    assert!(!game.on_teardown_complete(teardown.id()), "completion fires once");

    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.tower().len(), 1);
    assert_eq!(game.tower().base(), &base);
    assert_eq!(game.score(), 0);
    assert_eq!(game.tower().current().unwrap().index(), 1);
}

#[test]
fn test_same_seed_same_run() {
    let run = |seed| {
        let mut game = started(seed);
        let mut log = Vec::new();
        for _ in 0..5 {
            align(&mut game, 0.8);
            game.on_action();
            log.extend(game.drain_events());
        }
        log
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn test_snapshot_reflects_tower() {
    let mut game = started(11);
    align(&mut game, 1.0);
    game.on_action();

    let snap = game.snapshot();
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.score, 1);
    assert_eq!(snap.blocks.len(), 2);
    assert_eq!(snap.current.unwrap().index, 2);
    assert_eq!(snap.camera_target, game.camera_target());
    assert!(snap.show_instructions);

    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["phase"], "playing");
    assert_eq!(json["score"], 1);
}
