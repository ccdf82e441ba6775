use std::rc::Rc;

use macroquad::color::Color;
use ultraviolet::{Rotor2, Vec2};

use crate::curve::Outline;
use crate::settings::consts::PLAYER_SIZE;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// True when the boxes share a region of positive area; touching edges do not count
    pub fn intersects(&self, other: &Bounds) -> bool {
        let lo = self.min.max_by_component(other.min);
        let hi = self.max.min_by_component(other.max);

        lo.x < hi.x && lo.y < hi.y
    }
}

pub fn aabb<I: IntoIterator<Item = Vec2>>(points: I) -> Bounds {
    let (min, max) = points.into_iter().fold(
        (Vec2::broadcast(f32::MAX), Vec2::broadcast(f32::MIN)),
        |(min, max), point| (min.min_by_component(point), max.max_by_component(point)),
    );

    Bounds::new(min, max)
}

pub trait Bounded {
    fn bounds(&self) -> Bounds;
}

/// The keyboard-driven square. Its origin is its centre.
pub struct Player {
    pub pos: Vec2,
    /// Degrees, growing by one every tick
    pub rotation: f32,
    pub color: Color,
}

impl Player {
    pub fn new(pos: Vec2, color: Color) -> Self {
        Self {
            pos,
            rotation: 0.0,
            color,
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.rotation = (self.rotation + degrees) % 360.0;
    }

    /// Corners in screen space, in winding order
    pub fn corners(&self) -> [Vec2; 4] {
        let half = PLAYER_SIZE * 0.5;
        let rotor = Rotor2::from_angle(self.rotation.to_radians());

        [
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ]
        .map(|corner| self.pos + corner.rotated_by(rotor))
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Bounds {
        aabb(self.corners())
    }
}

/// One falling heart
pub struct Petal {
    pub outline: Rc<Outline>,
    pub color: Color,
    pub scale: f32,
    /// Where the outline's local origin sits on screen
    pub pos: Vec2,
}

impl Petal {
    /// Moves down by `1 + speed` while above `floor`; once past it, wraps back to the top.
    pub fn fall(&mut self, speed: f32, floor: f32) {
        if self.pos.y < floor {
            self.pos.y += 1.0 + speed;
        } else {
            self.pos.y = 0.0;
        }
    }

    /// Outline points in screen space
    pub fn points(&self) -> impl ExactSizeIterator<Item = Vec2> + Clone + '_ {
        self.outline.points().iter().map(|&p| self.pos + p * self.scale)
    }

    pub fn fan_center(&self) -> Vec2 {
        self.pos + self.outline.center() * self.scale
    }
}

impl Bounded for Petal {
    fn bounds(&self) -> Bounds {
        let local = self.outline.bounds();
        Bounds::new(self.pos + local.min * self.scale, self.pos + local.max * self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::color::RED;

    fn petal_at(x: f32, y: f32, scale: f32) -> Petal {
        Petal {
            outline: Rc::new(Outline::heart(300)),
            color: RED,
            scale,
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_bounds_intersect() {
        let a = Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Bounds::new(Vec2::new(5.0, 5.0), Vec2::new(15.0, 15.0));
        let touching = Bounds::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        let apart = Bounds::new(Vec2::new(30.0, 30.0), Vec2::new(40.0, 40.0));

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&touching));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn test_player_bounds_grow_with_rotation() {
        let mut player = Player::new(Vec2::new(100.0, 100.0), RED);

        let flat = player.bounds();
        assert!(((flat.max.x - flat.min.x) - PLAYER_SIZE).abs() < 1e-3);
        assert!((flat.center() - player.pos).mag() < 1e-3);

        player.rotate(45.0);
        let diagonal = PLAYER_SIZE * core::f32::consts::SQRT_2;
        let turned = player.bounds();
        let size = turned.max - turned.min;
        assert!((size.x - diagonal).abs() < 1e-2);
        assert!((size.y - diagonal).abs() < 1e-2);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut player = Player::new(Vec2::zero(), RED);
        for _ in 0..361 {
            player.rotate(1.0);
        }
        assert!((player.rotation - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_petal_falls_then_wraps() {
        let mut petal = petal_at(300.0, 1078.0, 2.0);

        petal.fall(1.0, 1080.0);
        assert_eq!(petal.pos.y, 1080.0);

        // At the floor it wraps instead of falling further
        petal.fall(1.0, 1080.0);
        assert_eq!(petal.pos.y, 0.0);
        assert_eq!(petal.pos.x, 300.0);
    }

    #[test]
    fn test_petal_bounds_scale() {
        let petal = petal_at(100.0, 200.0, 3.0);
        let bounds = petal.bounds();

        assert!((bounds.min.x - (100.0 - 48.0)).abs() < 1e-2);
        assert!((bounds.max.x - (100.0 + 48.0)).abs() < 1e-2);
        assert!((bounds.max.y - (200.0 + 51.0)).abs() < 1e-2);
    }
}
