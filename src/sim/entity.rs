//! Entities with a liveness flag
//!
//! Entities are never removed mid-frame. Clearing `active` marks them dead and
//! `compact` drops them once the update pass is done.

use glam::Vec2;

use super::collision::{Rect, circle_overlap};

/// Bounding geometry of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    /// `pos` is the top-left corner
    Rect { w: f32, h: f32 },
    /// `pos` is the center
    Circle { r: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub pos: Vec2,
    pub vel: Vec2,
    pub bounds: Bounds,
    pub active: bool,
}

impl Entity {
    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            bounds: Bounds::Rect { w, h },
            active: true,
        }
    }

    pub fn circle(center: Vec2, r: f32) -> Self {
        Self {
            pos: center,
            vel: Vec2::ZERO,
            bounds: Bounds::Circle { r },
            active: true,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Advance by one frame of velocity
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    pub fn aabb(&self) -> Rect {
        match self.bounds {
            Bounds::Rect { w, h } => Rect::new(self.pos.x, self.pos.y, w, h),
            Bounds::Circle { r } => Rect::around_circle(self.pos, r),
        }
    }

    pub fn center(&self) -> Vec2 {
        match self.bounds {
            Bounds::Rect { w, h } => self.pos + Vec2::new(w, h) / 2.0,
            Bounds::Circle { .. } => self.pos,
        }
    }

    /// Radius for circle tests (half the larger side for boxes)
    pub fn radius(&self) -> f32 {
        match self.bounds {
            Bounds::Rect { w, h } => w.max(h) / 2.0,
            Bounds::Circle { r } => r,
        }
    }

    pub fn size(&self) -> Vec2 {
        match self.bounds {
            Bounds::Rect { w, h } => Vec2::new(w, h),
            Bounds::Circle { r } => Vec2::splat(r * 2.0),
        }
    }

    /// Circle test between two live entities; dead entities never collide
    pub fn touches(&self, other: &Entity) -> bool {
        self.active
            && other.active
            && circle_overlap(self.center(), self.radius(), other.center(), other.radius())
    }
}

/// Anything that can be logically destroyed and compacted away
pub trait Live {
    fn is_active(&self) -> bool;
}

impl Live for Entity {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Post-update compaction pass. Returns how many entries were dropped.
pub fn compact<T: Live>(entities: &mut Vec<T>) -> usize {
    let before = entities.len();
    entities.retain(Live::is_active);
    before - entities.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_aabb_is_centered() {
        let ball = Entity::circle(Vec2::new(50.0, 40.0), 5.0);
        assert_eq!(ball.aabb(), Rect::new(45.0, 35.0, 10.0, 10.0));
        assert_eq!(ball.center(), Vec2::new(50.0, 40.0));
    }

    #[test]
    fn test_integrate_moves_by_velocity() {
        let mut e = Entity::rect(0.0, 0.0, 4.0, 4.0).with_velocity(Vec2::new(3.0, -4.0));
        e.integrate();
        e.integrate();
        assert_eq!(e.pos, Vec2::new(6.0, -8.0));
    }

    #[test]
    fn test_inactive_entities_never_touch() {
        let a = Entity::circle(Vec2::ZERO, 5.0);
        let mut b = Entity::circle(Vec2::new(1.0, 0.0), 5.0);
        assert!(a.touches(&b));
        b.active = false;
        assert!(!a.touches(&b));
    }

    #[test]
    fn test_compact_drops_only_inactive() {
        let mut list = vec![
            Entity::circle(Vec2::ZERO, 1.0),
            Entity::circle(Vec2::ONE, 1.0),
            Entity::circle(Vec2::new(2.0, 2.0), 1.0),
        ];
        list[1].active = false;
        assert_eq!(compact(&mut list), 1);
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|e| e.active));
    }
}
