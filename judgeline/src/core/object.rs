use super::{Construct, Event, EventQueue, FadeTo, Matrix, MoveTo, Point, RotateTo, Vector};
use nalgebra::Rotation2;

/// Pixel area the chart is mapped onto. Chart space spans `[-1, 1]` on both
/// axes with `y` pointing up; screen space has its origin at the top left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.,
            height: 720.,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn to_screen(&self, p: Point) -> Point {
        Point::new((p.x + 1.) * self.width / 2., (1. - p.y) * self.height / 2.)
    }

    /// Chart-space lengths along and across a line, in pixels.
    pub fn scale(&self) -> Vector {
        Vector::new(self.width / 2., self.height / 2.)
    }
}

#[derive(Clone, Debug)]
pub struct Object {
    pub translation: EventQueue<MoveTo>,
    pub rotation: EventQueue<RotateTo>,
    pub alpha: EventQueue<FadeTo>,
}

impl Object {
    pub fn new(construct: &Construct, moves: Vec<Event<MoveTo>>, rotates: Vec<Event<RotateTo>>, fades: Vec<Event<FadeTo>>) -> Self {
        Self {
            translation: EventQueue::new(moves, Vector::new(construct.x, construct.y)),
            rotation: EventQueue::new(rotates, construct.angle),
            alpha: EventQueue::new(fades, construct.alpha),
        }
    }

    pub fn set_tick(&mut self, tick: f32) {
        self.translation.set_tick(tick);
        self.rotation.set_tick(tick);
        self.alpha.set_tick(tick);
    }

    pub fn reset(&mut self) {
        self.translation.reset();
        self.rotation.reset();
        self.alpha.reset();
    }

    /// Position in chart space.
    #[inline]
    pub fn now_translation(&self) -> Vector {
        self.translation.now()
    }

    /// Clockwise rotation as displayed, in radians.
    #[inline]
    pub fn now_rotation(&self) -> f32 {
        self.rotation.now().to_radians()
    }

    #[inline]
    pub fn now_alpha(&self) -> f32 {
        self.alpha.now()
    }

    /// Screen-space transform: rotate about the line origin, then move it into place.
    pub fn now(&self, viewport: &Viewport) -> Matrix {
        let tr = viewport.to_screen(Point::from(self.now_translation()));
        Rotation2::new(self.now_rotation()).to_homogeneous().append_translation(&tr.coords)
    }
}
