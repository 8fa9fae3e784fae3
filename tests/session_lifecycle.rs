mod common;

use canvas_arcade::{
    Action, Config, EngineError, FrameTarget, GameSession, LifecycleState, ManualScheduler,
    TouchInput, TouchPhase, create_game,
};

use common::{SharedSurface, probe_session};

#[test]
fn test_start_runs_first_frame_immediately() {
    let (mut session, probe, _) = probe_session(Config::default());
    assert_eq!(session.lifecycle(), LifecycleState::Stopped);

    session.start();
    assert_eq!(session.lifecycle(), LifecycleState::Running);
    assert_eq!(session.frames(), 1);
    assert_eq!(probe.borrow().updates, 1);
    assert_eq!(probe.borrow().renders, 1);
    assert!(session.scheduler().pending().is_some());
}

#[test]
fn test_pause_halts_and_resume_continues_frame_count() {
    let (mut session, probe, _) = probe_session(Config::default());
    session.start();
    assert_eq!(session.pump_frames(3), 3);
    assert_eq!(session.frames(), 4);

    session.pause();
    assert_eq!(session.lifecycle(), LifecycleState::Paused);
    // The queued callback fires and aborts; nothing new gets queued
    assert!(session.pump());
    assert!(!session.pump());
    assert_eq!(session.frames(), 4);
    assert_eq!(probe.borrow().updates, 4);

    session.resume();
    assert_eq!(session.lifecycle(), LifecycleState::Running);
    assert_eq!(session.frames(), 5);
    assert_eq!(session.pump_frames(2), 2);
    assert_eq!(session.frames(), 7);
    assert_eq!(probe.borrow().updates, 7);
}

#[test]
fn test_frames_see_host_timestamps() {
    let (mut session, probe, _) = probe_session(Config::default());
    session.start();
    session.pump_frames(2);
    let stamps = probe.borrow().timestamps.clone();
    assert_eq!(stamps.len(), 3);
    assert!(stamps.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_stale_ticket_after_stop_does_nothing() {
    let (mut session, probe, _) = probe_session(Config::default());
    session.start();
    let stale = session.scheduler().pending().unwrap();

    session.stop();
    assert_eq!(session.lifecycle(), LifecycleState::Stopped);
    assert_eq!(session.scheduler().cancels(), 1);
    assert!(session.scheduler().pending().is_none());

    session.on_frame(stale, 1_000.0);
    assert_eq!(session.frames(), 1);
    assert_eq!(probe.borrow().updates, 1);
}

#[test]
fn test_stale_ticket_after_restart_does_nothing() {
    let (mut session, probe, _) = probe_session(Config::default());
    session.start();
    let old = session.scheduler().pending().unwrap();
    session.stop();
    session.start();
    assert_eq!(session.frames(), 2);

    session.on_frame(old, 1_000.0);
    assert_eq!(probe.borrow().updates, 2);
}

#[test]
fn test_start_is_noop_unless_stopped() {
    let (mut session, probe, _) = probe_session(Config::default());
    session.start();
    session.start();
    assert_eq!(probe.borrow().updates, 1);

    session.pause();
    session.start();
    assert_eq!(session.lifecycle(), LifecycleState::Paused);
    assert_eq!(probe.borrow().updates, 1);
}

#[test]
fn test_destroy_releases_everything() {
    let (mut session, probe, surface) = probe_session(Config::default());
    session.start();
    let stale = session.scheduler().pending().unwrap();

    session.destroy();
    assert!(session.is_destroyed());
    assert!(surface.is_released());
    assert!(!session.input().is_attached());
    assert_eq!(session.lifecycle(), LifecycleState::Stopped);

    session.on_frame(stale, 1_000.0);
    session.start();
    assert_eq!(session.frames(), 1);
    assert_eq!(probe.borrow().updates, 1);
    assert_eq!(session.key_down(" "), None);
}

#[test]
fn test_actions_reach_game_only_while_running() {
    let (mut session, probe, _) = probe_session(Config::default());

    assert_eq!(session.key_down(" "), Some(Action::Fire));
    assert!(probe.borrow().actions.is_empty(), "stopped");
    session.key_up(" ");

    session.start();
    assert_eq!(session.key_down("ArrowLeft"), Some(Action::Left));
    assert!(session.input().is_held(Action::Left));

    session.pause();
    assert_eq!(session.key_down("p"), Some(Action::Pause));
    assert_eq!(probe.borrow().actions, vec![Action::Left]);

    assert_eq!(session.key_down("q"), None);
    assert!(session.input().is_key_down("q"));
}

#[test]
fn test_touch_forwarded_while_running() {
    let (mut session, probe, _) = probe_session(Config::default());
    session.touch(TouchInput::new(TouchPhase::Start, 10.0, 20.0));
    assert!(probe.borrow().touches.is_empty());

    session.start();
    session.touch(TouchInput::new(TouchPhase::Move, 30.0, 40.0));
    assert_eq!(probe.borrow().touches.len(), 1);
    assert!(session.input().active_touch().is_some());

    session.touch(TouchInput::new(TouchPhase::End, 30.0, 40.0));
    assert!(session.input().active_touch().is_none());
}

#[test]
fn test_disabled_inputs_are_ignored() {
    let config = Config::from_json(r#"{"useKeyboard": false, "useMobile": false}"#).unwrap();
    let (mut session, probe, _) = probe_session(config);
    session.start();
    assert_eq!(session.key_down(" "), None);
    session.touch(TouchInput::new(TouchPhase::Start, 1.0, 1.0));
    assert!(probe.borrow().actions.is_empty());
    assert!(probe.borrow().touches.is_empty());
}

#[test]
fn test_custom_bindings_route_through_session() {
    let config = Config::from_json(r#"{"keyBindings": {"FIRE": "x"}}"#).unwrap();
    let (mut session, probe, _) = probe_session(config);
    session.start();
    assert_eq!(session.key_down("X"), Some(Action::Fire));
    assert_eq!(session.key_down(" "), None);
    assert_eq!(probe.borrow().actions, vec![Action::Fire]);
}

#[test]
fn test_setup_errors() {
    assert!(matches!(
        Config::from_json(r#"{"width": 0}"#),
        Err(EngineError::InvalidConfig(_))
    ));
    assert!(matches!(
        Config::from_json("{not json"),
        Err(EngineError::ConfigParse(_))
    ));
    assert!(matches!(
        create_game("pong", &Config::default(), 0),
        Err(EngineError::UnknownGame(_))
    ));

    let mut bad = Config::default();
    bad.key_bindings.insert(Action::Up, " ".into());
    let game = create_game("snake", &Config::default(), 0).unwrap();
    let result = GameSession::new(
        bad,
        game,
        Box::new(SharedSurface::new(10.0, 10.0)),
        ManualScheduler::default(),
    );
    assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
}
