use break_bricks::autopilot::Autopilot;
use break_bricks::config::{BrickLayout, BrickRow, GameConfig};
use break_bricks::render::{HudState, Presenter, RecordingCanvas, ShapeKind};
use break_bricks::sim::{
    Direction, GameEvent, GamePhase, GameState, Prompt, Sign, TickOutcome, advance,
    check_collisions, start, tick,
};
use break_bricks::{Game, Input, VirtualClock};
use glam::Vec2;
use proptest::prelude::*;

fn layout(rows: Vec<BrickRow>, right_margin: f32) -> GameConfig {
    GameConfig {
        layout: BrickLayout {
            rows,
            right_margin,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn playing(config: &GameConfig) -> GameState {
    let mut state = GameState::new(config).unwrap();
    assert!(start(&mut state));
    state.drain_events();
    state
}

#[test]
fn scenario_a_top_left_corner_reflects_both_axes() {
    let mut state = playing(&GameConfig::default());
    state.ball.body.center = Vec2::ZERO;
    state.ball.direction = Direction::new(Sign::Neg, Sign::Neg);

    advance(&mut state.ball, state.arena);
    assert_eq!(state.ball.direction, Direction::new(Sign::Pos, Sign::Pos));
    assert_eq!(state.ball.body.center, Vec2::new(5.0, 5.0));
}

#[test]
fn scenario_b_single_brick_hit_removes_and_scores() {
    // Two one-hit bricks so the round keeps going
    let config = layout(vec![BrickRow { y: 50.0, hits: 1 }], 455.0);
    let mut state = playing(&config);
    assert_eq!(state.bricks.len(), 2);
    let target = state.bricks[0].id;

    state.ball.body.center = Vec2::new(42.5, 65.0);
    state.ball.direction = Direction::new(Sign::Pos, Sign::Neg);

    assert_eq!(tick(&mut state, &config), TickOutcome::Continue);
    assert_eq!(state.bricks.len(), 1);
    assert!(state.bricks.iter().all(|b| b.id != target));
    assert_eq!(state.score, 10);
    assert_eq!(state.ball.direction, Direction::new(Sign::Pos, Sign::Pos));

    let events = state.drain_events();
    assert!(events.contains(&GameEvent::Despawned { id: target }));
    assert!(events.contains(&GameEvent::ScoreChanged { score: 10 }));
}

#[test]
fn scenario_c_paddle_edge_forces_horizontal_direction() {
    let mut state = playing(&GameConfig::default());
    assert!(state.move_paddle(-5.0));
    assert_eq!(state.paddle.bounds().min.x, 260.0);
    assert_eq!(state.paddle.bounds().max.x, 340.0);

    state.ball.body.center = Vec2::new(350.0, 315.0);
    state.ball.direction = Direction::new(Sign::Neg, Sign::Pos);

    let report = check_collisions(&mut state, 10);
    assert_eq!(report.contacts, 1);
    assert_eq!(report.points, 0);
    assert_eq!(state.ball.direction, Direction::new(Sign::Pos, Sign::Pos));
}

#[test]
fn scenario_d_no_lives_left_means_lost() {
    let config = GameConfig::default();
    let mut state = playing(&config);
    state.lives = 0;
    state.ball.body.center = Vec2::new(100.0, 395.0);

    assert_eq!(tick(&mut state, &config), TickOutcome::Lost);
    assert_eq!(state.phase, GamePhase::Lost);
    assert_ne!(state.phase, GamePhase::LifeLostPause);
}

#[test]
fn scenario_e_win_beats_simultaneous_bottom_exit() {
    // One brick sitting on the floor
    let config = layout(vec![BrickRow { y: 390.0, hits: 1 }], 530.0);
    let mut state = playing(&config);
    assert_eq!(state.bricks.len(), 1);

    state.ball.body.center = Vec2::new(42.5, 392.0);
    state.ball.direction = Direction::new(Sign::Pos, Sign::Pos);
    assert!(state.ball.bounds().max.y >= state.arena.y);

    assert_eq!(tick(&mut state, &config), TickOutcome::Won);
    assert_eq!(state.phase, GamePhase::Won);
    assert_eq!(state.lives, config.initial_lives);
    assert!(state.drain_events().contains(&GameEvent::PromptShown(Prompt::Won)));
}

#[test]
fn three_hit_brick_takes_three_ticks() {
    let config = layout(vec![BrickRow { y: 50.0, hits: 3 }], 455.0);
    let mut state = playing(&config);
    let id = state.bricks[0].id;

    for expected in [2, 1] {
        state.ball.body.center = Vec2::new(42.5, 65.0);
        tick(&mut state, &config);
        let brick = state.bricks.iter().find(|b| b.id == id).unwrap();
        assert_eq!(brick.hits(), expected);
    }

    state.ball.body.center = Vec2::new(42.5, 65.0);
    tick(&mut state, &config);
    assert!(state.bricks.iter().all(|b| b.id != id));
    assert_eq!(state.score, 30);

    // Removed bricks are never scanned again
    state.ball.body.center = Vec2::new(42.5, 65.0);
    let report = check_collisions(&mut state, 10);
    assert_eq!(report.bricks_hit, 0);
    assert_eq!(state.score, 30);
}

#[test]
fn autopilot_keeps_presentation_in_sync() {
    let config = GameConfig::default();
    let mut game = Game::new(config.clone(), VirtualClock::new()).unwrap();
    let mut presenter = Presenter::new(
        RecordingCanvas::new(config.arena_width),
        HudState::default(),
        config.arena(),
    );
    let mut pilot = Autopilot::new(config.paddle_step, 0);

    for _ in 0..5_000 {
        if let Some(input) = pilot.next_input(game.state()) {
            game.handle_input(input);
        }
        presenter.apply_all(&game.drain_events());
        if game.phase().is_over() {
            break;
        }
        if game.phase() != GamePhase::AwaitingStart {
            assert!(game.fire_next().is_some(), "stalled in {:?}", game.phase());
        }
    }
    presenter.apply_all(&game.drain_events());

    let state = game.state();
    assert!(state.score > 0);
    assert_eq!(state.score % 10, 0);
    assert_eq!(presenter.hud().score, state.score);
    assert_eq!(presenter.hud().lives, state.lives);

    // One rectangle per live brick plus the paddle, one ball
    let canvas = presenter.canvas();
    assert_eq!(canvas.count(&ShapeKind::Rectangle), state.bricks.len() + 1);
    assert_eq!(canvas.count(&ShapeKind::Oval), 1);
    let ball = presenter.handle(state.ball.id).unwrap();
    assert_eq!(canvas.get(ball).unwrap().bounds, state.ball.bounds());
}

#[test]
fn restart_resets_score_and_lives_but_not_bricks() {
    let config = GameConfig {
        initial_lives: 0,
        ..Default::default()
    };
    let mut game = Game::new(config, VirtualClock::new()).unwrap();
    game.handle_input(Input::Start);

    // Knock out a brick, then drop the ball out of the arena
    game.state_mut().ball.body.center = Vec2::new(42.5, 105.0);
    game.state_mut().ball.direction = Direction::new(Sign::Pos, Sign::Neg);
    game.fire_next();
    assert_eq!(game.state().score, 10);
    game.state_mut().ball.body.center = Vec2::new(100.0, 395.0);
    game.fire_next();
    assert_eq!(game.phase(), GamePhase::Lost);
    assert!(game.scheduler().is_idle());
    let bricks = game.state().bricks.len();

    game.handle_input(Input::Restart);
    assert_eq!(game.phase(), GamePhase::AwaitingStart);
    assert_eq!(game.state().score, 0);
    assert_eq!(game.state().lives, 0);
    assert_eq!(game.state().bricks.len(), bricks);
    assert_eq!(game.state().paddle.carried, Some(game.state().ball.id));
}

proptest! {
    #[test]
    fn paddle_moves_only_within_arena(
        start_offset in -260.0f32..260.0,
        offset in -700.0f32..700.0,
        carried in any::<bool>(),
    ) {
        let mut state = GameState::new(&GameConfig::default()).unwrap();
        state.paddle.body.center.x += start_offset;
        state.ball.body.center.x += start_offset;
        if !carried {
            state.paddle.carried = None;
        }

        let paddle_before = state.paddle.bounds();
        let ball_before = state.ball.body.center;
        let fits = paddle_before.min.x + offset >= 0.0
            && paddle_before.max.x + offset <= state.arena.x;

        let moved = state.move_paddle(offset);
        prop_assert_eq!(moved, fits);

        let expected_paddle = if fits {
            paddle_before.min.x + offset
        } else {
            paddle_before.min.x
        };
        prop_assert!((state.paddle.bounds().min.x - expected_paddle).abs() < 1e-3);
        prop_assert!(state.paddle.bounds().min.x >= -1e-3);
        prop_assert!(state.paddle.bounds().max.x <= state.arena.x + 1e-3);

        let ball_dx = state.ball.body.center.x - ball_before.x;
        if fits && carried {
            prop_assert!((ball_dx - offset).abs() < 1e-3);
        } else {
            prop_assert_eq!(ball_dx, 0.0);
        }
        prop_assert_eq!(state.ball.body.center.y, ball_before.y);
    }
}
