//! Asteroids: rotate, thrust and shoot on a wrapping playfield
//!
//! Rocks split into smaller rocks when shot. A saucer shows up now and then;
//! it patrols, and while alert it fires at the ship if the ship is close.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::Action;
use crate::consts::DEFAULT_LIVES;
use crate::input::{InputRouter, TouchInput, TouchPhase};
use crate::render::{DrawSurface, draw_hud, draw_phase_overlay, palette};
use crate::sim::{
    BehaviorMode, Cooldown, Entity, Frame, GameState, LifeLoss, Live, ModeTimer, Scoreboard,
    Simulation, circle_overlap, compact, seeded_rng, wrap_toroidal,
};

pub const SHIP_RADIUS: f32 = 10.0;
/// Radians per frame
pub const ROTATE_SPEED: f32 = 0.08;
pub const THRUST: f32 = 0.12;
pub const DRAG: f32 = 0.99;
pub const MAX_SPEED: f32 = 6.0;
pub const INVULNERABLE_FRAMES: u32 = 120;

pub const BULLET_RADIUS: f32 = 2.0;
pub const BULLET_SPEED: f32 = 7.0;
/// Frames before a bullet expires
pub const BULLET_LIFE: u32 = 60;
pub const MAX_BULLETS: usize = 5;
pub const FIRE_COOLDOWN: i32 = 10;

pub const SAUCER_RADIUS: f32 = 12.0;
pub const SAUCER_SPEED: f32 = 1.5;
pub const SAUCER_BULLET_SPEED: f32 = 4.0;
pub const SAUCER_FIRE_COOLDOWN: i32 = 45;
/// Frames between a saucer leaving and the next one arriving
pub const SAUCER_SPAWN_FRAMES: i32 = 600;
pub const SAUCER_POINTS: u64 = 200;
/// The saucer only shoots at a ship inside this radius
pub const DETECT_RADIUS: f32 = 200.0;

pub const FIRST_WAVE_ROCKS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RockSize {
    Large,
    Medium,
    Small,
}

impl RockSize {
    pub fn radius(self) -> f32 {
        match self {
            RockSize::Large => 32.0,
            RockSize::Medium => 18.0,
            RockSize::Small => 9.0,
        }
    }

    pub fn points(self) -> u64 {
        match self {
            RockSize::Large => 20,
            RockSize::Medium => 50,
            RockSize::Small => 100,
        }
    }

    fn speed(self) -> f32 {
        match self {
            RockSize::Large => 1.0,
            RockSize::Medium => 1.6,
            RockSize::Small => 2.4,
        }
    }

    /// What a hit breaks this rock into
    pub fn split(self) -> Option<RockSize> {
        match self {
            RockSize::Large => Some(RockSize::Medium),
            RockSize::Medium => Some(RockSize::Small),
            RockSize::Small => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rock {
    pub body: Entity,
    pub size: RockSize,
}

impl Rock {
    pub fn new(pos: Vec2, size: RockSize, vel: Vec2) -> Self {
        Self {
            body: Entity::circle(pos, size.radius()).with_velocity(vel),
            size,
        }
    }
}

impl Live for Rock {
    fn is_active(&self) -> bool {
        self.body.active
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub body: Entity,
    pub life: u32,
    /// Fired by the saucer
    pub hostile: bool,
}

impl Live for Bullet {
    fn is_active(&self) -> bool {
        self.body.active
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub body: Entity,
    /// Heading in radians, canvas space (0 = +x, -PI/2 = up)
    pub angle: f32,
    pub invulnerable: u32,
}

impl Ship {
    fn spawn(center: Vec2, invulnerable: u32) -> Self {
        Self {
            body: Entity::circle(center, SHIP_RADIUS),
            angle: -std::f32::consts::FRAC_PI_2,
            invulnerable,
        }
    }

    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Nose, left wing, right wing
    fn hull(&self) -> [Vec2; 3] {
        let pos = self.body.pos;
        let nose = self.forward();
        let left = Vec2::from_angle(self.angle + 2.5);
        let right = Vec2::from_angle(self.angle - 2.5);
        [
            pos + nose * SHIP_RADIUS * 1.4,
            pos + left * SHIP_RADIUS,
            pos + right * SHIP_RADIUS,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaucerMode {
    Patrol,
    Alert,
}

impl BehaviorMode for SaucerMode {
    fn next(self) -> Self {
        match self {
            SaucerMode::Patrol => SaucerMode::Alert,
            SaucerMode::Alert => SaucerMode::Patrol,
        }
    }

    fn duration(self) -> u32 {
        match self {
            SaucerMode::Patrol => 240,
            SaucerMode::Alert => 150,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Saucer {
    pub body: Entity,
    pub timer: ModeTimer<SaucerMode>,
    pub gun: Cooldown,
}

impl Saucer {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            body: Entity::circle(pos, SAUCER_RADIUS).with_velocity(vel),
            timer: ModeTimer::new(SaucerMode::Patrol),
            gun: Cooldown::primed(SAUCER_FIRE_COOLDOWN),
        }
    }

    pub fn mode(&self) -> SaucerMode {
        self.timer.mode()
    }

    /// Shot aimed at `target`, if alert, in range and the gun is ready
    pub fn aim(&mut self, target: Vec2) -> Option<Bullet> {
        self.gun.tick();
        if self.mode() != SaucerMode::Alert
            || !circle_overlap(self.body.pos, DETECT_RADIUS, target, 0.0)
            || !self.gun.try_fire()
        {
            return None;
        }
        let dir = (target - self.body.pos).normalize_or_zero();
        Some(Bullet {
            body: Entity::circle(self.body.pos, BULLET_RADIUS)
                .with_velocity(dir * SAUCER_BULLET_SPEED),
            life: BULLET_LIFE,
            hostile: true,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Asteroids {
    width: f32,
    height: f32,
    ship: Ship,
    rocks: Vec<Rock>,
    bullets: Vec<Bullet>,
    saucer: Option<Saucer>,
    saucer_spawn: Cooldown,
    fire: Cooldown,
    board: Scoreboard,
    state: GameState,
    rng: Pcg32,
}

impl Asteroids {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let mut game = Self {
            width,
            height,
            ship: Ship::spawn(Vec2::new(width, height) / 2.0, 0),
            rocks: Vec::new(),
            bullets: Vec::new(),
            saucer: None,
            saucer_spawn: Cooldown::primed(SAUCER_SPAWN_FRAMES),
            fire: Cooldown::new(FIRE_COOLDOWN),
            board: Scoreboard::new(DEFAULT_LIVES),
            state: GameState::Waiting,
            rng: seeded_rng(seed),
        };
        game.reset();
        game
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn rocks(&self) -> &[Rock] {
        &self.rocks
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn saucer(&self) -> Option<&Saucer> {
        self.saucer.as_ref()
    }

    pub fn wave(&self) -> u32 {
        self.board.level
    }

    fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) / 2.0
    }

    fn reset(&mut self) {
        self.board = Scoreboard::new(DEFAULT_LIVES);
        self.start_wave();
    }

    /// Fresh rocks along the edges, ship centered, no saucer
    fn start_wave(&mut self) {
        self.ship = Ship::spawn(self.center(), 0);
        self.bullets.clear();
        self.saucer = None;
        self.saucer_spawn = Cooldown::primed(SAUCER_SPAWN_FRAMES);
        self.fire = Cooldown::new(FIRE_COOLDOWN);

        let count = FIRST_WAVE_ROCKS + self.board.level as usize - 1;
        self.rocks = (0..count)
            .map(|_| {
                let pos = if self.rng.random_bool(0.5) {
                    Vec2::new(self.rng.random_range(0.0..self.width), 0.0)
                } else {
                    Vec2::new(0.0, self.rng.random_range(0.0..self.height))
                };
                let vel = random_heading(&mut self.rng) * RockSize::Large.speed();
                Rock::new(pos, RockSize::Large, vel)
            })
            .collect();
        log::debug!("asteroids: wave {} with {} rocks", self.board.level, count);
    }

    fn begin(&mut self) {
        match self.state {
            GameState::Waiting => self.state = GameState::Playing,
            GameState::LevelComplete => {
                self.board.level += 1;
                self.start_wave();
                self.state = GameState::Playing;
                log::info!("asteroids: wave {}", self.board.level);
            }
            GameState::GameOver | GameState::Won => self.restart(),
            GameState::Playing | GameState::Paused => {}
        }
    }

    /// Gated by the fire cooldown and the bullet cap
    fn shoot(&mut self) -> bool {
        let own = self.bullets.iter().filter(|b| !b.hostile && b.body.active).count();
        if own >= MAX_BULLETS || !self.fire.try_fire() {
            return false;
        }
        let dir = self.ship.forward();
        self.bullets.push(Bullet {
            body: Entity::circle(self.ship.body.pos + dir * SHIP_RADIUS, BULLET_RADIUS)
                .with_velocity(self.ship.body.vel + dir * BULLET_SPEED),
            life: BULLET_LIFE,
            hostile: false,
        });
        true
    }

    fn steer(&mut self, input: &InputRouter) {
        if input.is_held(Action::Left) {
            self.ship.angle -= ROTATE_SPEED;
        }
        if input.is_held(Action::Right) {
            self.ship.angle += ROTATE_SPEED;
        }
        if input.is_held(Action::Up) {
            self.ship.body.vel += self.ship.forward() * THRUST;
        }
        self.ship.body.vel = (self.ship.body.vel * DRAG).clamp_length_max(MAX_SPEED);
        self.ship.body.integrate();
        self.ship.body.pos = wrap_toroidal(self.ship.body.pos, self.width, self.height);
        self.ship.invulnerable = self.ship.invulnerable.saturating_sub(1);
    }

    fn drift(&mut self) {
        let (w, h) = (self.width, self.height);
        for bullet in &mut self.bullets {
            bullet.body.integrate();
            bullet.body.pos = wrap_toroidal(bullet.body.pos, w, h);
            bullet.life = bullet.life.saturating_sub(1);
            if bullet.life == 0 {
                bullet.body.active = false;
            }
        }
        for rock in &mut self.rocks {
            rock.body.integrate();
            rock.body.pos = wrap_toroidal(rock.body.pos, w, h);
        }
    }

    fn update_saucer(&mut self) {
        if self.saucer.is_none() {
            self.saucer_spawn.tick();
            if self.saucer_spawn.try_fire() {
                let y = self.rng.random_range(0.0..self.height);
                self.saucer = Some(Saucer::new(Vec2::new(0.0, y), Vec2::new(SAUCER_SPEED, 0.0)));
                log::debug!("asteroids: saucer arrives");
            }
            return;
        }
        let Some(saucer) = self.saucer.as_mut() else {
            return;
        };

        saucer.body.integrate();
        saucer.body.pos = wrap_toroidal(saucer.body.pos, self.width, self.height);
        if let Some(shot) = saucer.aim(self.ship.body.pos) {
            self.bullets.push(shot);
        }
        if let Some(mode) = saucer.timer.tick() {
            // New leg: random vertical drift
            saucer.body.vel.y = self.rng.random_range(-1.0..1.0);
            log::trace!("saucer -> {mode:?}");
        }
    }

    /// Player bullets against rocks and the saucer
    fn resolve_shots(&mut self) {
        let mut fragments = Vec::new();
        for bullet in self.bullets.iter_mut().filter(|b| !b.hostile) {
            if !bullet.body.active {
                continue;
            }
            if let Some(rock) = self
                .rocks
                .iter_mut()
                .find(|rock| rock.body.touches(&bullet.body))
            {
                bullet.body.active = false;
                rock.body.active = false;
                self.board.add(rock.size.points());
                if let Some(smaller) = rock.size.split() {
                    fragments.push((rock.body.pos, smaller));
                }
                continue;
            }
            let saucer_hit = self
                .saucer
                .as_ref()
                .is_some_and(|saucer| saucer.body.touches(&bullet.body));
            if saucer_hit {
                bullet.body.active = false;
                self.board.add(SAUCER_POINTS);
                self.saucer = None;
                self.saucer_spawn = Cooldown::primed(SAUCER_SPAWN_FRAMES);
                log::debug!("asteroids: saucer destroyed");
            }
        }

        for (pos, size) in fragments {
            for _ in 0..2 {
                let vel = random_heading(&mut self.rng) * size.speed();
                self.rocks.push(Rock::new(pos, size, vel));
            }
        }
    }

    fn ship_is_hit(&self) -> bool {
        let ship = &self.ship.body;
        self.rocks.iter().any(|rock| rock.body.touches(ship))
            || self
                .bullets
                .iter()
                .any(|b| b.hostile && b.body.touches(ship))
            || self.saucer.as_ref().is_some_and(|s| s.body.touches(ship))
    }

    fn lose_ship(&mut self) {
        match self.board.lose_life() {
            LifeLoss::Respawn => {
                log::debug!("asteroids: ship lost, {} lives left", self.board.lives);
                self.ship = Ship::spawn(self.center(), INVULNERABLE_FRAMES);
                self.bullets.retain(|b| !b.hostile);
            }
            LifeLoss::GameOver => {
                log::info!("asteroids: game over with {} points", self.board.score);
                self.state = GameState::GameOver;
            }
        }
    }
}

fn random_heading(rng: &mut Pcg32) -> Vec2 {
    Vec2::from_angle(rng.random_range(0.0..std::f32::consts::TAU))
}

impl Simulation for Asteroids {
    fn name(&self) -> &'static str {
        "asteroids"
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

        self.fire.tick();
        self.steer(frame.input);
        if frame.input.is_held(Action::Fire) {
            self.shoot();
        }
        self.drift();
        self.update_saucer();
        self.resolve_shots();

        if self.ship.invulnerable == 0 && self.ship_is_hit() {
            self.lose_ship();
        }

        compact(&mut self.bullets);
        compact(&mut self.rocks);
        if self.state == GameState::Playing && self.rocks.is_empty() {
            log::info!("asteroids: wave {} cleared", self.board.level);
            self.state = GameState::LevelComplete;
        }
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        surface.clear(palette::BACKGROUND);

        for rock in &self.rocks {
            surface.stroke_circle(rock.body.pos, rock.size.radius(), palette::FOREGROUND, 2.0);
        }

        for bullet in &self.bullets {
            let color = if bullet.hostile {
                palette::HAZARD
            } else {
                palette::FOREGROUND
            };
            surface.fill_circle(bullet.body.pos, BULLET_RADIUS, color);
        }

        if let Some(saucer) = &self.saucer {
            let c = saucer.body.pos;
            let r = SAUCER_RADIUS;
            let hull = [
                c + Vec2::new(-r, 0.0),
                c + Vec2::new(-r / 2.0, -r / 2.0),
                c + Vec2::new(r / 2.0, -r / 2.0),
                c + Vec2::new(r, 0.0),
                c + Vec2::new(r / 2.0, r / 2.0),
                c + Vec2::new(-r / 2.0, r / 2.0),
            ];
            let color = match saucer.mode() {
                SaucerMode::Patrol => palette::ACCENT,
                SaucerMode::Alert => palette::HAZARD,
            };
            surface.stroke_polygon(&hull, color, 2.0);
        }

        // Blink while invulnerable
        if (self.ship.invulnerable / 8) % 2 == 0 {
            surface.stroke_polygon(&self.ship.hull(), palette::FOREGROUND, 2.0);
        }

        draw_hud(surface, self.board.score, self.board.lives, self.board.level);
        draw_phase_overlay(surface, self.state, "Press ENTER or tap to start");
    }

    fn on_action(&mut self, action: Action) {
        match action {
            Action::Pause => self.state = self.state.toggle_pause(),
            Action::Start => self.begin(),
            Action::Fire if self.state == GameState::Playing => {
                self.shoot();
            }
            Action::Fire => self.begin(),
            _ => {}
        }
    }

    /// Touch aims the ship at the finger; a new touch also fires
    fn on_touch(&mut self, touch: &TouchInput) {
        if self.state != GameState::Playing {
            if touch.phase == TouchPhase::Start {
                self.begin();
            }
            return;
        }
        if touch.phase == TouchPhase::End {
            return;
        }
        let offset = touch.pos - self.ship.body.pos;
        if offset != Vec2::ZERO {
            self.ship.angle = offset.y.atan2(offset.x);
        }
        if touch.phase == TouchPhase::Start {
            self.shoot();
        }
    }

    fn restart(&mut self) {
        self.reset();
        self.state = GameState::Playing;
        log::info!("asteroids: restart");
    }
}
