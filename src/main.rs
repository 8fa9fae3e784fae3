//! Canvas Arcade - headless native runner
//!
//! Runs one game for a number of frames against a recording surface and logs
//! the outcome. The browser build is driven through `ArcadeHandle` instead.
//!
//! Usage: `canvas-arcade [game] [frames] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = native::run(std::env::args().skip(1).collect()) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::init; this only satisfies the bin target
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use canvas_arcade::{
        Action, Config, EngineError, GameSession, ManualScheduler, RecordingSurface, Result,
        create_game,
    };

    const DEFAULT_GAME: &str = "breakout";
    const DEFAULT_FRAMES: usize = 600;
    const DEFAULT_SEED: u64 = 42;

    pub fn run(args: Vec<String>) -> Result<()> {
        let game_name = args.first().map(String::as_str).unwrap_or(DEFAULT_GAME);
        let frames = parse_arg(args.get(1), DEFAULT_FRAMES)?;
        let seed = parse_arg(args.get(2), DEFAULT_SEED)?;

        let config = Config::default();
        let game = create_game(game_name, &config, seed)?;
        let surface = RecordingSurface::new(config.width as f32, config.height as f32);
        let start_key = config.key_for(Action::Start).unwrap_or("Enter").to_string();

        let mut session = GameSession::new(config, game, Box::new(surface), ManualScheduler::default())?;
        log::info!("Running {game_name} for {frames} frames (seed {seed})");

        session.start();
        session.key_down(&start_key);
        session.key_up(&start_key);
        session.pump_frames(frames);

        log::info!(
            "{}: {} frames, state {}, score {}, lives {}",
            session.game().name(),
            session.frames(),
            session.game_state().as_str(),
            session.game().score(),
            session.game().lives()
        );

        session.destroy();
        Ok(())
    }

    fn parse_arg<T: std::str::FromStr>(arg: Option<&String>, default: T) -> Result<T> {
        match arg {
            Some(raw) => raw
                .parse()
                .map_err(|_| EngineError::InvalidConfig(format!("not a number: {raw:?}"))),
            None => Ok(default),
        }
    }
}
