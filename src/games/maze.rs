//! Maze chase: eat every pellet while four ghosts hunt you
//!
//! Ghosts cycle Scatter -> Chase -> Scatter on timers. A power pellet forces
//! every ghost into Frightened, during which touching one eats it.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{action_direction, held_direction};
use crate::config::Action;
use crate::consts::DEFAULT_LIVES;
use crate::error::{EngineError, Result};
use crate::input::{InputRouter, TouchInput, TouchPhase};
use crate::render::{DrawSurface, draw_hud, draw_phase_overlay, palette};
use crate::sim::{
    BehaviorMode, Cooldown, Direction, Frame, GameState, GridPos, LifeLoss, Live, ModeTimer, Rect,
    Scoreboard, Simulation, Steering, choose_direction, compact, seeded_rng,
};

/// `#` wall, `.` pellet, `o` power pellet, `G` ghost spawn, `P` player, space floor
pub const DEFAULT_LAYOUT: &str = "\
###################
#o.......#.......o#
#.##.###.#.###.##.#
#.................#
#.##.#.#####.#.##.#
#....#...#...#....#
####.### # ###.####
#.......GGGG......#
####.#.#####.#.####
#........#........#
#.##.###.#.###.##.#
#o.#.....P.....#.o#
#..#.#...#...#.#..#
#.................#
###################";

pub const PELLET_POINTS: u64 = 10;
pub const POWER_PELLET_POINTS: u64 = 50;
pub const GHOST_POINTS: u64 = 200;

/// Frames between player steps
pub const PLAYER_STEP_FRAMES: i32 = 8;
/// Frames between ghost steps
pub const GHOST_STEP_FRAMES: i32 = 10;
/// Frightened ghosts crawl
pub const FRIGHTENED_STEP_FRAMES: i32 = 16;

/// Space reserved above the maze for the HUD
const HUD_HEIGHT: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostMode {
    Scatter,
    Chase,
    Frightened,
}

impl BehaviorMode for GhostMode {
    fn next(self) -> Self {
        match self {
            GhostMode::Scatter => GhostMode::Chase,
            GhostMode::Chase => GhostMode::Scatter,
            GhostMode::Frightened => GhostMode::Chase,
        }
    }

    fn duration(self) -> u32 {
        match self {
            GhostMode::Scatter => 420,
            GhostMode::Chase => 1200,
            GhostMode::Frightened => 360,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pellet {
    pub pos: GridPos,
    pub power: bool,
    pub active: bool,
}

impl Live for Pellet {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Parsed maze: static walls plus the initial pellet and spawn placement
#[derive(Debug, Clone, PartialEq)]
pub struct Maze {
    pub cols: i32,
    pub rows: i32,
    walls: Vec<bool>,
    pub pellets: Vec<Pellet>,
    pub player_spawn: GridPos,
    pub ghost_spawns: Vec<GridPos>,
}

impl Maze {
    pub fn parse(layout: &str) -> Result<Self> {
        let lines: Vec<&str> = layout.lines().filter(|l| !l.is_empty()).collect();
        let cols = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        if cols == 0 {
            return Err(EngineError::InvalidLayout("empty layout".into()));
        }

        let mut walls = Vec::with_capacity(cols * lines.len());
        let mut pellets = Vec::new();
        let mut player_spawn = None;
        let mut ghost_spawns = Vec::new();

        for (y, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(EngineError::InvalidLayout(format!(
                    "row {y} has {} cells, expected {cols}",
                    line.chars().count()
                )));
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = GridPos::new(x as i32, y as i32);
                walls.push(ch == '#');
                match ch {
                    '#' | ' ' => {}
                    '.' | 'o' => pellets.push(Pellet {
                        pos,
                        power: ch == 'o',
                        active: true,
                    }),
                    'G' => ghost_spawns.push(pos),
                    'P' if player_spawn.is_some() => {
                        return Err(EngineError::InvalidLayout("more than one player".into()));
                    }
                    'P' => player_spawn = Some(pos),
                    other => {
                        return Err(EngineError::InvalidLayout(format!(
                            "unknown cell {other:?} at ({x}, {y})"
                        )));
                    }
                }
            }
        }

        let player_spawn =
            player_spawn.ok_or_else(|| EngineError::InvalidLayout("no player spawn".into()))?;
        if pellets.is_empty() {
            return Err(EngineError::InvalidLayout("no pellets".into()));
        }

        Ok(Self {
            cols: cols as i32,
            rows: lines.len() as i32,
            walls,
            pellets,
            player_spawn,
            ghost_spawns,
        })
    }

    /// Walkable and inside the grid
    pub fn is_open(&self, pos: GridPos) -> bool {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.cols || pos.y >= self.rows {
            return false;
        }
        !self.walls[(pos.y * self.cols + pos.x) as usize]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ghost {
    pub pos: GridPos,
    pub home: GridPos,
    pub timer: ModeTimer<GhostMode>,
    pub step: Cooldown,
}

impl Ghost {
    pub fn new(home: GridPos) -> Self {
        Self {
            pos: home,
            home,
            timer: ModeTimer::new(GhostMode::Scatter),
            step: Cooldown::new(GHOST_STEP_FRAMES),
        }
    }

    pub fn mode(&self) -> GhostMode {
        self.timer.mode()
    }

    /// One tick: move by the mode in force now, then run the mode timer.
    /// Returns the direction moved, if the ghost stepped.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        target: GridPos,
        maze: &Maze,
        rng: &mut R,
    ) -> Option<Direction> {
        self.step.tick();
        let moved = if self.step.try_fire() {
            let steering = match self.timer.mode() {
                GhostMode::Chase => Steering::Toward(target),
                GhostMode::Scatter => Steering::Away(target),
                GhostMode::Frightened => Steering::Wander,
            };
            let dir = choose_direction(self.pos, steering, |p| maze.is_open(p), rng);
            if let Some(dir) = dir {
                self.pos = self.pos.step(dir);
            }
            dir
        } else {
            None
        };

        if let Some(mode) = self.timer.tick() {
            self.set_pace(mode);
            log::trace!("ghost at ({}, {}) -> {:?}", self.pos.x, self.pos.y, mode);
        }
        moved
    }

    pub fn frighten(&mut self) {
        self.timer.force(GhostMode::Frightened);
        self.set_pace(GhostMode::Frightened);
    }

    /// Back to the spawn cell with a fresh Scatter cycle; waits one step period
    pub fn send_home(&mut self) {
        self.pos = self.home;
        self.timer = ModeTimer::new(GhostMode::Scatter);
        self.step = Cooldown::primed(GHOST_STEP_FRAMES);
    }

    fn set_pace(&mut self, mode: GhostMode) {
        self.step.set_period(match mode {
            GhostMode::Frightened => FRIGHTENED_STEP_FRAMES,
            _ => GHOST_STEP_FRAMES,
        });
    }
}

/// Same cell, or the two swapped cells during the tick
pub fn caught(player_prev: GridPos, player: GridPos, ghost_prev: GridPos, ghost: GridPos) -> bool {
    ghost == player || (ghost == player_prev && ghost_prev == player)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: GridPos,
    pub heading: Option<Direction>,
    /// Turn taken at the next step where it is legal
    pub queued: Option<Direction>,
    pub step: Cooldown,
}

impl Player {
    fn spawn(pos: GridPos) -> Self {
        Self {
            pos,
            heading: None,
            queued: None,
            step: Cooldown::new(PLAYER_STEP_FRAMES),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MazeChase {
    layout: Maze,
    pellets: Vec<Pellet>,
    player: Player,
    ghosts: Vec<Ghost>,
    board: Scoreboard,
    state: GameState,
    rng: Pcg32,
    cell: f32,
    origin: Vec2,
}

impl MazeChase {
    pub fn new(width: f32, height: f32, seed: u64) -> Result<Self> {
        Self::with_layout(width, height, DEFAULT_LAYOUT, seed)
    }

    pub fn with_layout(width: f32, height: f32, layout: &str, seed: u64) -> Result<Self> {
        let layout = Maze::parse(layout)?;
        let cell = (width / layout.cols as f32)
            .min((height - HUD_HEIGHT) / layout.rows as f32)
            .floor()
            .max(1.0);
        let origin = Vec2::new(
            ((width - cell * layout.cols as f32) / 2.0).max(0.0),
            HUD_HEIGHT,
        );

        let mut game = Self {
            pellets: Vec::new(),
            player: Player::spawn(layout.player_spawn),
            ghosts: Vec::new(),
            layout,
            board: Scoreboard::new(DEFAULT_LIVES),
            state: GameState::Waiting,
            rng: seeded_rng(seed),
            cell,
            origin,
        };
        game.reset();
        Ok(game)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn pellets_left(&self) -> usize {
        self.pellets.iter().filter(|p| p.active).count()
    }

    fn reset(&mut self) {
        self.board = Scoreboard::new(DEFAULT_LIVES);
        self.pellets = self.layout.pellets.clone();
        self.respawn();
    }

    /// Everyone back to their spawn cells; pellets and score stay
    fn respawn(&mut self) {
        self.player = Player::spawn(self.layout.player_spawn);
        self.ghosts = self
            .layout
            .ghost_spawns
            .iter()
            .map(|home| Ghost::new(*home))
            .collect();
    }

    fn cell_center(&self, pos: GridPos) -> Vec2 {
        self.origin + (Vec2::new(pos.x as f32, pos.y as f32) + 0.5) * self.cell
    }

    fn move_player(&mut self, input: &InputRouter) {
        if let Some(dir) = held_direction(input) {
            self.player.queued = Some(dir);
        }

        self.player.step.tick();
        if !self.player.step.try_fire() {
            return;
        }

        if let Some(turn) = self.player.queued {
            if self.layout.is_open(self.player.pos.step(turn)) {
                self.player.heading = Some(turn);
                self.player.queued = None;
            }
        }
        if let Some(dir) = self.player.heading {
            let next = self.player.pos.step(dir);
            if self.layout.is_open(next) {
                self.player.pos = next;
            }
        }
    }

    fn eat_pellet(&mut self) {
        let pos = self.player.pos;
        let Some(pellet) = self.pellets.iter_mut().find(|p| p.active && p.pos == pos) else {
            return;
        };
        pellet.active = false;

        if pellet.power {
            self.board.add(POWER_PELLET_POINTS);
            self.ghosts.iter_mut().for_each(Ghost::frighten);
            log::debug!("maze: power pellet, ghosts frightened");
        } else {
            self.board.add(PELLET_POINTS);
        }
    }

    /// Returns true when the player lost a life
    fn resolve_contacts(&mut self, player_prev: GridPos, ghost_prev: &[GridPos]) -> bool {
        let player = self.player.pos;
        let mut hit = false;
        for (ghost, prev) in self.ghosts.iter_mut().zip(ghost_prev) {
            if !caught(player_prev, player, *prev, ghost.pos) {
                continue;
            }
            if ghost.mode() == GhostMode::Frightened {
                ghost.send_home();
                self.board.add(GHOST_POINTS);
                log::debug!("maze: ghost eaten");
            } else {
                hit = true;
                break;
            }
        }
        if !hit {
            return false;
        }

        match self.board.lose_life() {
            LifeLoss::Respawn => {
                log::debug!("maze: caught, {} lives left", self.board.lives);
                self.respawn();
            }
            LifeLoss::GameOver => {
                log::info!("maze: game over with {} points", self.board.score);
                self.state = GameState::GameOver;
            }
        }
        true
    }

    fn ghost_positions(&self) -> Vec<GridPos> {
        self.ghosts.iter().map(|g| g.pos).collect()
    }

    fn begin(&mut self) {
        match self.state {
            GameState::Waiting => self.state = GameState::Playing,
            GameState::GameOver | GameState::Won => self.restart(),
            _ => {}
        }
    }
}

impl Simulation for MazeChase {
    fn name(&self) -> &'static str {
        "maze"
    }

    fn state(&self) -> GameState {
        self.state
    }

    fn score(&self) -> u64 {
        self.board.score
    }

    fn lives(&self) -> u8 {
        self.board.lives
    }

    fn update(&mut self, frame: &Frame<'_>) {
        if self.state != GameState::Playing {
            return;
        }

        // Player first, then contacts against where the ghosts stand now
        let player_prev = self.player.pos;
        self.move_player(frame.input);
        self.eat_pellet();
        let standing = self.ghost_positions();
        if !self.resolve_contacts(self.player.pos, &standing) {
            let target = self.player.pos;
            for ghost in &mut self.ghosts {
                ghost.advance(target, &self.layout, &mut self.rng);
            }
            self.resolve_contacts(player_prev, &standing);
        }

        // A pellet eaten on the catch tick is dropped too
        compact(&mut self.pellets);
        if self.state == GameState::Playing && self.pellets.is_empty() {
            log::info!("maze: cleared with {} points", self.board.score);
            self.state = GameState::Won;
        }
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        surface.clear(palette::BACKGROUND);

        for y in 0..self.layout.rows {
            for x in 0..self.layout.cols {
                let pos = GridPos::new(x, y);
                if !self.layout.is_open(pos) {
                    let corner = self.cell_center(pos) - self.cell / 2.0;
                    surface.fill_rect(
                        Rect::new(corner.x, corner.y, self.cell, self.cell),
                        palette::WALL,
                    );
                }
            }
        }

        for pellet in self.pellets.iter().filter(|p| p.active) {
            let radius = if pellet.power { self.cell * 0.3 } else { self.cell * 0.1 };
            surface.fill_circle(self.cell_center(pellet.pos), radius, palette::FOREGROUND);
        }

        surface.fill_circle(
            self.cell_center(self.player.pos),
            self.cell * 0.45,
            palette::PICKUP,
        );

        for (i, ghost) in self.ghosts.iter().enumerate() {
            let color = match ghost.mode() {
                GhostMode::Frightened => palette::FRIGHTENED,
                _ => palette::GHOSTS[i % palette::GHOSTS.len()],
            };
            surface.fill_circle(self.cell_center(ghost.pos), self.cell * 0.45, color);
        }

        draw_hud(surface, self.board.score, self.board.lives, self.board.level);
        draw_phase_overlay(surface, self.state, "Press ENTER or tap to start");
    }

    fn on_action(&mut self, action: Action) {
        match action {
            Action::Pause => self.state = self.state.toggle_pause(),
            Action::Start | Action::Fire => self.begin(),
            other => {
                if let Some(dir) = action_direction(other) {
                    self.player.queued = Some(dir);
                }
            }
        }
    }

    fn on_touch(&mut self, touch: &TouchInput) {
        if touch.phase == TouchPhase::End {
            return;
        }
        if self.state != GameState::Playing {
            if touch.phase == TouchPhase::Start {
                self.begin();
            }
            return;
        }
        let offset = touch.pos - self.cell_center(self.player.pos);
        if let Some(dir) = Direction::from_offset(offset.x, offset.y) {
            self.player.queued = Some(dir);
        }
    }

    fn restart(&mut self) {
        self.reset();
        self.state = GameState::Playing;
        log::info!("maze: restart");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::render::{DrawCommand, RecordingSurface};

    const CORRIDOR: &str = "\
#######
#P...G#
#######";

    fn frame(input: &InputRouter) -> Frame<'_> {
        Frame { input, now_ms: 0.0 }
    }

    fn playing(layout: &str) -> MazeChase {
        let mut game = MazeChase::with_layout(480.0, 320.0, layout, 7).unwrap();
        game.on_action(Action::Start);
        game
    }

    #[test]
    fn test_default_layout_parses() {
        let maze = Maze::parse(DEFAULT_LAYOUT).unwrap();
        assert_eq!((maze.cols, maze.rows), (19, 15));
        assert_eq!(maze.ghost_spawns.len(), 4);
        assert_eq!(maze.pellets.iter().filter(|p| p.power).count(), 4);
        assert_eq!(maze.player_spawn, GridPos::new(9, 11));
        assert!(!maze.is_open(GridPos::new(0, 0)));
        assert!(!maze.is_open(GridPos::new(-1, 3)));
        assert!(maze.is_open(GridPos::new(8, 6)));
    }

    #[test]
    fn test_bad_layouts_are_rejected() {
        for layout in ["", "###\n#P#\n##", "#####\n#.x.#\n#####", "###\n#.#\n###", "#####\n#PP.#\n#####"] {
            assert!(
                matches!(Maze::parse(layout), Err(EngineError::InvalidLayout(_))),
                "{layout:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_chase_timer_expiry_switches_to_scatter_after_moving() {
        let maze = Maze::parse("#######\n#.....#\n#.....#\n#..P..#\n#######").unwrap();
        let mut ghost = Ghost::new(GridPos::new(1, 1));
        ghost.timer = ModeTimer::with_remaining(GhostMode::Chase, 1);
        let mut rng = seeded_rng(1);

        let moved = ghost.advance(GridPos::new(3, 3), &maze, &mut rng);

        // Down and Right both close the gap; Down comes first
        assert_eq!(moved, Some(Direction::Down));
        assert_eq!(ghost.pos, GridPos::new(1, 2));
        assert_eq!(ghost.mode(), GhostMode::Scatter);
        assert_eq!(ghost.timer.remaining(), GhostMode::Scatter.duration());
    }

    #[test]
    fn test_scatter_moves_away_from_target() {
        let maze = Maze::parse(CORRIDOR).unwrap();
        let mut ghost = Ghost::new(GridPos::new(3, 1));
        let mut rng = seeded_rng(1);
        assert_eq!(
            ghost.advance(GridPos::new(1, 1), &maze, &mut rng),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_boxed_in_ghost_holds_position() {
        let maze = Maze::parse("#####\n#P.##\n###G#\n#####").unwrap();
        let mut ghost = Ghost::new(maze.ghost_spawns[0]);
        let mut rng = seeded_rng(1);
        assert_eq!(ghost.advance(maze.player_spawn, &maze, &mut rng), None);
        assert_eq!(ghost.pos, GridPos::new(3, 2));
    }

    #[test]
    fn test_ghost_steps_on_cooldown() {
        let maze = Maze::parse(CORRIDOR).unwrap();
        let mut ghost = Ghost::new(GridPos::new(5, 1));
        ghost.timer.force(GhostMode::Chase);
        let mut rng = seeded_rng(1);
        let steps = (0..GHOST_STEP_FRAMES * 2)
            .filter(|_| ghost.advance(GridPos::new(1, 1), &maze, &mut rng).is_some())
            .count();
        assert_eq!(steps, 2);
    }

    #[test]
    fn test_swap_counts_as_caught() {
        let a = GridPos::new(1, 1);
        let b = GridPos::new(2, 1);
        assert!(caught(a, b, b, a));
        assert!(caught(a, b, a, b));
        assert!(!caught(a, a, b, b));
    }

    #[test]
    fn test_pellets_score() {
        let input = InputRouter::new(&Config::default());
        let mut game = playing(CORRIDOR);
        game.on_action(Action::Right);
        game.update(&frame(&input));
        assert_eq!(game.player().pos, GridPos::new(2, 1));
        assert_eq!(game.score(), PELLET_POINTS);
        assert_eq!(game.pellets_left(), 2);
    }

    #[test]
    fn test_power_pellet_frightens_ghosts() {
        let input = InputRouter::new(&Config::default());
        let mut game = playing("#######\n#Po..G#\n#######");
        game.on_action(Action::Right);
        game.update(&frame(&input));
        assert_eq!(game.score(), POWER_PELLET_POINTS);
        assert!(game.ghosts().iter().all(|g| g.mode() == GhostMode::Frightened));
    }

    #[test]
    fn test_touching_ghost_costs_life_and_respawns() {
        let input = InputRouter::new(&Config::default());
        let mut game = playing(CORRIDOR);
        game.ghosts[0].pos = GridPos::new(2, 1);
        game.on_action(Action::Right);
        game.update(&frame(&input));

        assert_eq!(game.lives(), DEFAULT_LIVES - 1);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.player().pos, GridPos::new(1, 1));
        assert_eq!(game.ghosts()[0].pos, GridPos::new(5, 1));
    }

    #[test]
    fn test_pellet_eaten_on_fatal_catch_is_not_drawn() {
        let input = InputRouter::new(&Config::default());
        let mut game = playing(CORRIDOR);
        game.board.lives = 1;
        game.ghosts[0].pos = GridPos::new(2, 1);
        game.on_action(Action::Right);
        game.update(&frame(&input));

        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.score(), PELLET_POINTS);
        assert!(game.pellets.iter().all(|p| p.active));
        assert_eq!(game.pellets_left(), 2);

        let mut surface = RecordingSurface::new(480.0, 320.0);
        game.render(&mut surface);
        let pellet_radius = game.cell * 0.1;
        let drawn = surface
            .commands()
            .iter()
            .filter(|c| {
                matches!(c, DrawCommand::FillCircle { radius, .. } if *radius == pellet_radius)
            })
            .count();
        assert_eq!(drawn, 2);
    }

    #[test]
    fn test_pellet_eaten_on_respawn_catch_is_compacted() {
        let input = InputRouter::new(&Config::default());
        let mut game = playing(CORRIDOR);
        game.ghosts[0].pos = GridPos::new(2, 1);
        game.on_action(Action::Right);
        game.update(&frame(&input));

        assert_eq!(game.lives(), DEFAULT_LIVES - 1);
        assert_eq!(game.pellets.len(), 2);
        assert_eq!(game.pellets_left(), 2);
    }

    #[test]
    fn test_frightened_ghost_is_eaten() {
        let input = InputRouter::new(&Config::default());
        let mut game = playing(CORRIDOR);
        game.ghosts[0].pos = GridPos::new(2, 1);
        game.ghosts[0].frighten();
        game.on_action(Action::Right);
        game.update(&frame(&input));

        assert_eq!(game.lives(), DEFAULT_LIVES);
        assert_eq!(game.score(), PELLET_POINTS + GHOST_POINTS);
        assert_eq!(game.ghosts()[0].pos, GridPos::new(5, 1));
        assert_eq!(game.ghosts()[0].mode(), GhostMode::Scatter);
    }

    #[test]
    fn test_last_pellet_wins() {
        let input = InputRouter::new(&Config::default());
        let mut game = playing("######\n#P.#G#\n######");
        game.on_action(Action::Right);
        game.update(&frame(&input));
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn test_last_life_ends_game_and_restart_is_fresh() {
        let input = InputRouter::new(&Config::default());
        let mut game = playing(CORRIDOR);
        for _ in 0..DEFAULT_LIVES {
            game.ghosts[0].pos = GridPos::new(2, 1);
            game.player.queued = Some(Direction::Right);
            game.player.step = Cooldown::new(PLAYER_STEP_FRAMES);
            game.update(&frame(&input));
        }
        assert_eq!(game.state(), GameState::GameOver);

        for _ in 0..2 {
            game.on_action(Action::Start);
            assert_eq!(game.state(), GameState::Playing);
            assert_eq!(game.lives(), DEFAULT_LIVES);
            assert_eq!(game.score(), 0);
            assert_eq!(game.pellets_left(), 3);
            game.state = GameState::GameOver;
        }
    }

    #[test]
    fn test_update_is_noop_unless_playing() {
        let input = InputRouter::new(&Config::default());
        let mut game = MazeChase::new(480.0, 320.0, 3).unwrap();
        let ghosts = game.ghosts().to_vec();
        for _ in 0..30 {
            game.update(&frame(&input));
        }
        assert_eq!(game.ghosts(), ghosts.as_slice());

        game.on_action(Action::Start);
        game.on_action(Action::Pause);
        for _ in 0..30 {
            game.update(&frame(&input));
        }
        assert_eq!(game.ghosts(), ghosts.as_slice());
    }

    #[test]
    fn test_touch_queues_direction_relative_to_player() {
        let mut game = playing(CORRIDOR);
        let center = game.cell_center(game.player().pos);
        game.on_touch(&TouchInput::new(TouchPhase::Start, center.x + 50.0, center.y + 5.0));
        assert_eq!(game.player().queued, Some(Direction::Right));
    }
}
