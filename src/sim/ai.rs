//! NPC behavior: timed mode cycles and grid steering
//!
//! Every NPC carries a mode and a countdown. Movement is picked from the moves
//! the terrain allows; ties go to the first direction in `Direction::ALL`.

use rand::Rng;

/// Grid directions, in tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Dominant axis of a screen-space offset (touch relative to the player)
    pub fn from_offset(dx: f32, dy: f32) -> Option<Direction> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(if dx.abs() > dy.abs() {
            if dx > 0.0 { Direction::Right } else { Direction::Left }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

/// Integer cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(&self, dir: Direction) -> GridPos {
        let (dx, dy) = dir.delta();
        GridPos::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(&self, other: GridPos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// A behavior mode with a fixed successor and duration
pub trait BehaviorMode: Copy + Eq + std::fmt::Debug {
    /// Mode entered when this one's timer runs out
    fn next(self) -> Self;
    /// Duration in frames
    fn duration(self) -> u32;
}

/// Mode plus countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTimer<M> {
    mode: M,
    remaining: u32,
}

impl<M: BehaviorMode> ModeTimer<M> {
    pub fn new(mode: M) -> Self {
        Self {
            mode,
            remaining: mode.duration(),
        }
    }

    pub fn with_remaining(mode: M, remaining: u32) -> Self {
        Self { mode, remaining }
    }

    pub fn mode(&self) -> M {
        self.mode
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Decrement; on reaching zero switch to the next mode and reset.
    /// Returns the new mode when a transition happened.
    pub fn tick(&mut self) -> Option<M> {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.mode = self.mode.next();
            self.remaining = self.mode.duration();
            Some(self.mode)
        } else {
            None
        }
    }

    /// Jump straight into a mode (e.g. frightened on power pellet)
    pub fn force(&mut self, mode: M) {
        self.mode = mode;
        self.remaining = mode.duration();
    }
}

/// How an NPC picks its next cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    /// Minimize distance to the target
    Toward(GridPos),
    /// Maximize distance from the target
    Away(GridPos),
    /// Uniform pick among legal moves
    Wander,
}

/// Choose a direction from `from`, or `None` when boxed in
pub fn choose_direction<R, F>(from: GridPos, steering: Steering, is_open: F, rng: &mut R) -> Option<Direction>
where
    R: Rng + ?Sized,
    F: Fn(GridPos) -> bool,
{
    let legal: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|dir| is_open(from.step(*dir)))
        .collect();

    if legal.is_empty() {
        return None;
    }

    match steering {
        Steering::Toward(target) => pick_by_distance(from, &legal, target, |d, best| d < best),
        Steering::Away(target) => pick_by_distance(from, &legal, target, |d, best| d > best),
        Steering::Wander => Some(legal[rng.random_range(0..legal.len())]),
    }
}

/// Strict comparison keeps the earliest direction on ties
fn pick_by_distance(
    from: GridPos,
    legal: &[Direction],
    target: GridPos,
    better: impl Fn(i32, i32) -> bool,
) -> Option<Direction> {
    let mut best: Option<(Direction, i32)> = None;
    for dir in legal {
        let dist = from.step(*dir).manhattan(target);
        match best {
            Some((_, best_dist)) if !better(dist, best_dist) => {}
            _ => best = Some((*dir, dist)),
        }
    }
    best.map(|(dir, _)| dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Guard {
        Patrol,
        Alert,
    }

    impl BehaviorMode for Guard {
        fn next(self) -> Self {
            match self {
                Guard::Patrol => Guard::Alert,
                Guard::Alert => Guard::Patrol,
            }
        }

        fn duration(self) -> u32 {
            match self {
                Guard::Patrol => 3,
                Guard::Alert => 2,
            }
        }
    }

    fn open_everywhere(_: GridPos) -> bool {
        true
    }

    #[test]
    fn test_mode_timer_cycles() {
        let mut timer = ModeTimer::new(Guard::Patrol);
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.tick(), Some(Guard::Alert));
        assert_eq!(timer.remaining(), 2);
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.tick(), Some(Guard::Patrol));
    }

    #[test]
    fn test_toward_ties_prefer_iteration_order() {
        let mut rng = Pcg32::seed_from_u64(1);
        // Target diagonal: Down and Right both shorten the distance equally
        let dir = choose_direction(
            GridPos::new(0, 0),
            Steering::Toward(GridPos::new(3, 3)),
            open_everywhere,
            &mut rng,
        );
        assert_eq!(dir, Some(Direction::Down));

        // Target up-left: Up wins over Left
        let dir = choose_direction(
            GridPos::new(5, 5),
            Steering::Toward(GridPos::new(0, 0)),
            open_everywhere,
            &mut rng,
        );
        assert_eq!(dir, Some(Direction::Up));
    }

    #[test]
    fn test_away_maximizes_distance() {
        let mut rng = Pcg32::seed_from_u64(1);
        let dir = choose_direction(
            GridPos::new(5, 5),
            Steering::Away(GridPos::new(5, 0)),
            open_everywhere,
            &mut rng,
        );
        assert_eq!(dir, Some(Direction::Down));
    }

    #[test]
    fn test_blocked_moves_are_skipped() {
        let mut rng = Pcg32::seed_from_u64(1);
        let walls = [GridPos::new(5, 4), GridPos::new(5, 6)];
        let dir = choose_direction(
            GridPos::new(5, 5),
            Steering::Toward(GridPos::new(5, 9)),
            |p| !walls.contains(&p),
            &mut rng,
        );
        // Up and Down are walled; Left and Right tie, Left comes first
        assert_eq!(dir, Some(Direction::Left));
    }

    #[test]
    fn test_boxed_in_holds_position() {
        let mut rng = Pcg32::seed_from_u64(1);
        let dir = choose_direction(GridPos::new(1, 1), Steering::Wander, |_| false, &mut rng);
        assert_eq!(dir, None);
    }

    #[test]
    fn test_wander_only_picks_legal_moves() {
        let mut rng = Pcg32::seed_from_u64(7);
        let only_open = GridPos::new(2, 1);
        for _ in 0..20 {
            let dir = choose_direction(GridPos::new(1, 1), Steering::Wander, |p| p == only_open, &mut rng);
            assert_eq!(dir, Some(Direction::Right));
        }
    }

    #[test]
    fn test_direction_from_offset() {
        assert_eq!(Direction::from_offset(10.0, 2.0), Some(Direction::Right));
        assert_eq!(Direction::from_offset(-1.0, -5.0), Some(Direction::Up));
        assert_eq!(Direction::from_offset(0.0, 0.0), None);
    }
}
