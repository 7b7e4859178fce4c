use core::ops::Add;
use serde::{Deserialize, Serialize};

use crate::*;

/// Units per second the reference scene moves swapped tiles at.
pub const DEFAULT_SWAP_SPEED: f32 = 5.0;

/// Animators never move slower than this, so a swap always converges.
pub const MIN_SPEED: f32 = 0.1;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Moves towards `target` along a straight line by at most `max_delta` on the
    /// longer axis, landing exactly on `target` once it is within reach.
    pub fn move_towards(self, target: Point, max_delta: f32) -> Point {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        let span = dx.abs().max(dy.abs());
        if span <= max_delta {
            target
        } else {
            Point::new(
                self.x + dx / span * max_delta,
                self.y + dy / span * max_delta,
            )
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Self) -> Self::Output {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Maps grid coordinates to scene points: row 0 at the top, the grid centred on the
/// origin the same way the reference scene places its tiles.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pivot: Point,
}

impl Layout {
    pub fn new((width, height): Coord2) -> Self {
        let pivot = Point::new(-(f32::from(width / 2) - 0.5), f32::from(height / 2) - 0.5);
        Self { pivot }
    }

    pub fn slot_point(&self, (x, y): Coord2) -> Point {
        self.pivot + Point::new(f32::from(x), -f32::from(y))
    }
}

/// Visual movement of one tile towards the slot it is being swapped into.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub tile: TileId,
    pub current: Point,
    pub target: Point,
}

impl Motion {
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    pub fn settle(&mut self) {
        self.current = self.target;
    }
}

/// Advances in-flight motions once per scheduler tick.
pub trait Animator {
    /// Moves every motion for a tick of `dt` seconds and reports whether all of them
    /// have reached their targets.
    fn step(&mut self, motions: &mut [Motion], dt: f32) -> bool;
}

/// Constant speed movement, the reference scene's swap animation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinearAnimator {
    speed: f32,
}

impl LinearAnimator {
    pub fn new(speed: f32) -> Self {
        // also catches NaN
        if !(speed >= MIN_SPEED) {
            log::warn!("Swap speed {} too slow, using {}", speed, MIN_SPEED);
            return Self { speed: MIN_SPEED };
        }
        Self { speed }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

impl Default for LinearAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_SWAP_SPEED)
    }
}

impl Animator for LinearAnimator {
    fn step(&mut self, motions: &mut [Motion], dt: f32) -> bool {
        let max_delta = self.speed * dt.max(0.0);
        for motion in motions.iter_mut() {
            motion.current = motion.current.move_towards(motion.target, max_delta);
        }
        motions.iter().all(Motion::is_settled)
    }
}

/// Lands every motion on its target in a single tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct InstantAnimator;

impl Animator for InstantAnimator {
    fn step(&mut self, motions: &mut [Motion], _dt: f32) -> bool {
        motions.iter_mut().for_each(Motion::settle);
        true
    }
}
