use super::{Easing, Vector, EPS};
use std::fmt::Debug;

/// Payload of an event that drives one judge line attribute.
pub trait Interpolate {
    type Value: Copy + Debug;

    /// Value once the event has completed.
    fn target(&self) -> Self::Value;

    /// Value at progress `t` of the event, starting from `from`.
    fn interpolate(&self, from: Self::Value, t: f32) -> Self::Value;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Event<P> {
    pub start_tick: f32,
    pub end_tick: f32,
    pub properties: P,
}

impl<P> Event<P> {
    pub fn new(start_tick: f32, end_tick: f32, properties: P) -> Self {
        Self {
            start_tick,
            end_tick,
            properties,
        }
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.end_tick - self.start_tick
    }

    /// Progress at `tick`, clamped into `[0, 1]`. Zero-length events are
    /// always complete.
    pub fn progress(&self, tick: f32) -> f32 {
        let span = self.span();
        if span < EPS {
            1.
        } else {
            (tick - self.start_tick).clamp(0., span) / span
        }
    }
}

impl<P: Interpolate> Event<P> {
    pub fn value_at(&self, from: P::Value, tick: f32) -> P::Value {
        self.properties.interpolate(from, self.progress(tick))
    }
}

/// Initial state and lifetime of a judge line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Construct {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub alpha: f32,
    pub speed: f32,
}

impl Default for Construct {
    fn default() -> Self {
        Self {
            x: 0.,
            y: 0.,
            angle: 0.,
            alpha: 1.,
            speed: 0.1,
        }
    }
}

impl Construct {
    /// Stand-in for a line that has no construct event: visible for the whole chart.
    pub fn fallback() -> Event<Self> {
        Event::new(f32::NEG_INFINITY, f32::INFINITY, Self::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveTo {
    pub x: f32,
    pub y: f32,
    pub ease_x: Easing,
    pub ease_y: Easing,
}

impl Interpolate for MoveTo {
    type Value = Vector;

    fn target(&self) -> Vector {
        Vector::new(self.x, self.y)
    }

    fn interpolate(&self, from: Vector, t: f32) -> Vector {
        Vector::new(self.ease_x.between(from.x, self.x, t), self.ease_y.between(from.y, self.y, t))
    }
}

/// Target angle in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotateTo {
    pub angle: f32,
    pub ease: Easing,
}

impl Interpolate for RotateTo {
    type Value = f32;

    fn target(&self) -> f32 {
        self.angle
    }

    fn interpolate(&self, from: f32, t: f32) -> f32 {
        self.ease.between(from, self.angle, t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeTo {
    pub alpha: f32,
    pub ease: Easing,
}

impl Interpolate for FadeTo {
    type Value = f32;

    fn target(&self) -> f32 {
        self.alpha
    }

    fn interpolate(&self, from: f32, t: f32) -> f32 {
        self.ease.between(from, self.alpha, t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedTo {
    pub speed: f32,
    pub ease: Easing,
}

impl Interpolate for SpeedTo {
    type Value = f32;

    fn target(&self) -> f32 {
        self.speed
    }

    fn interpolate(&self, from: f32, t: f32) -> f32 {
        self.ease.between(from, self.speed, t)
    }
}

/// Shows or hides the notes of a line from the event's start on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteVisibility {
    pub visible: bool,
}

impl Interpolate for NoteVisibility {
    type Value = bool;

    fn target(&self) -> bool {
        self.visible
    }

    fn interpolate(&self, _from: bool, _t: f32) -> bool {
        self.visible
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LineEvent {
    Construct(Event<Construct>),
    Move(Event<MoveTo>),
    Rotate(Event<RotateTo>),
    Fade(Event<FadeTo>),
    Speed(Event<SpeedTo>),
    NoteVisibility(Event<NoteVisibility>),
}

impl LineEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Construct(_) => "construct",
            Self::Move(_) => "move",
            Self::Rotate(_) => "rotate",
            Self::Fade(_) => "fade",
            Self::Speed(_) => "speed",
            Self::NoteVisibility(_) => "notevis",
        }
    }

    pub fn ticks(&self) -> (f32, f32) {
        fn of<P>(e: &Event<P>) -> (f32, f32) {
            (e.start_tick, e.end_tick)
        }
        match self {
            Self::Construct(e) => of(e),
            Self::Move(e) => of(e),
            Self::Rotate(e) => of(e),
            Self::Fade(e) => of(e),
            Self::Speed(e) => of(e),
            Self::NoteVisibility(e) => of(e),
        }
    }
}
