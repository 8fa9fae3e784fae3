mod common;

use canvas_arcade::render::DrawCommand;
use canvas_arcade::sim::Rect;
use canvas_arcade::{GameKind, GameState, LifecycleState};

use common::{SharedSurface, game_session};

#[test]
fn test_every_game_renders_hud_and_ready_banner() {
    for kind in GameKind::ALL {
        let (mut session, surface) = game_session(kind.as_str(), 3);
        session.start();
        let texts = surface.texts();
        assert!(texts.contains(&"Score: 0".to_string()), "{}", kind.as_str());
        assert!(texts.contains(&"Ready".to_string()), "{}", kind.as_str());
        assert_eq!(session.game_state(), GameState::Waiting);
    }
}

#[test]
fn test_breakout_launch_and_in_game_pause() {
    let (mut session, surface) = game_session("breakout", 1);
    session.start();
    session.key_down(" ");
    assert_eq!(session.game_state(), GameState::Playing);
    session.pump_frames(5);

    session.key_down("p");
    assert_eq!(session.game_state(), GameState::Paused);
    // The engine keeps running; only the game is paused
    session.pump_frames(5);
    assert_eq!(session.lifecycle(), LifecycleState::Running);
    assert_eq!(session.game_state(), GameState::Paused);
    assert!(surface.texts().iter().any(|t| t == "Paused"));

    session.key_up("p");
    session.key_down("p");
    assert_eq!(session.game_state(), GameState::Playing);
}

#[test]
fn test_breakout_scores_without_paddle_play() {
    let (mut session, _) = game_session("breakout", 1);
    session.start();
    // Relaunch every time the ball is lost; nobody moves the paddle
    for _ in 0..200 {
        if session.game_state() == GameState::Waiting {
            session.key_down("Enter");
            session.key_up("Enter");
        }
        session.pump_frames(30);
        if session.game_state() == GameState::GameOver {
            break;
        }
    }
    assert_ne!(session.game_state(), GameState::Won);
    assert!(session.game().score() > 0);
}

#[test]
fn test_snake_runs_into_wall_then_restarts() {
    let (mut session, _) = game_session("snake", 4);
    session.start();
    session.key_down("Enter");
    session.key_up("Enter");
    assert_eq!(session.game_state(), GameState::Playing);

    session.pump_frames(150);
    assert_eq!(session.game_state(), GameState::GameOver);
    assert_eq!(session.game().lives(), 0);

    session.key_down("Enter");
    assert_eq!(session.game_state(), GameState::Playing);
    assert_eq!(session.game().lives(), 1);
    assert_eq!(session.game().score(), 0);
}

#[test]
fn test_snake_does_not_jump_after_engine_pause() {
    let (mut session, surface) = game_session("snake", 4);
    session.start();
    session.key_down("Enter");
    session.key_up("Enter");
    // Anchor the step timer, short of one step
    session.pump_frames(3);
    let before = snake_cells(&surface);

    session.pause();
    session.scheduler_mut().advance(60_000.0);
    session.pump_frames(10);
    assert_eq!(session.frames(), 4);

    session.resume();
    session.pump_frames(5);
    assert_eq!(session.game_state(), GameState::Playing);
    assert_eq!(snake_cells(&surface), before);

    session.pump_frames(10);
    assert_ne!(snake_cells(&surface), before);
}

/// Square cell fills of the latest frame (the snake body)
fn snake_cells(surface: &SharedSurface) -> Vec<Rect> {
    surface
        .0
        .borrow()
        .last_frame()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillRect { rect, .. } if rect.w == rect.h => Some(*rect),
            _ => None,
        })
        .collect()
}

#[test]
fn test_maze_player_eats_pellets() {
    let (mut session, _) = game_session("pacman", 8);
    session.start();
    session.key_down("Enter");
    session.key_down("ArrowLeft");
    session.pump_frames(40);

    assert_eq!(session.game_state(), GameState::Playing);
    assert!(session.game().score() >= 10);
    assert_eq!(session.game().lives(), 3);
}

#[test]
fn test_asteroids_draws_ship_and_rocks() {
    let (mut session, surface) = game_session("asteroids", 2);
    session.start();
    session.key_down("Enter");
    session.key_down(" ");
    session.pump_frames(20);

    let recording = surface.0.borrow();
    let frame = recording.last_frame();
    assert!(frame.iter().any(|c| matches!(c, DrawCommand::StrokeCircle { .. })), "rocks");
    assert!(frame.iter().any(|c| matches!(c, DrawCommand::FillCircle { .. })), "bullets");
    // The ship blinks while invulnerable, so look across all frames
    assert!(
        recording
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::StrokePolygon { .. }))
    );
}

#[test]
fn test_game_state_strings() {
    let (mut session, _) = game_session("maze", 1);
    session.start();
    assert_eq!(session.game_state().as_str(), "waiting");
    assert_eq!(session.lifecycle().as_str(), "running");
    session.key_down("Enter");
    assert_eq!(session.game_state().as_str(), "playing");
}
