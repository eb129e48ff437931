use anyhow::{anyhow, Error};
use phf::phf_map;
use std::{fmt, str::FromStr};

pub type TweenId = u8;

const PI: f32 = std::f32::consts::PI;

macro_rules! f1 {
    ($fn:ident) => {
        $fn
    };
}

macro_rules! f2 {
    ($fn:ident) => {
        |x| (1. - $fn(1. - x))
    };
}

macro_rules! f3 {
    ($fn:ident) => {
        |x| {
            let x = x * 2.;
            if x < 1. {
                $fn(x) / 2.
            } else {
                1. - $fn(2. - x) / 2.
            }
        }
    };
}

// Antiderivatives of the In/Out/InOut variants, built from the antiderivative
// `F` of the In curve with `F(0) = 0`.

macro_rules! g1 {
    ($int:ident) => {
        $int
    };
}

macro_rules! g2 {
    ($int:ident) => {
        |x| x - ($int(1.) - $int(1. - x))
    };
}

macro_rules! g3 {
    ($int:ident) => {
        |x| {
            if x < 0.5 {
                $int(x * 2.) / 4.
            } else {
                x - 0.5 + $int(2. - x * 2.) / 4.
            }
        }
    };
}

#[inline]
fn sine(x: f32) -> f32 {
    1. - ((x * PI) / 2.).cos()
}

#[inline]
fn sine_int(x: f32) -> f32 {
    x - 2. / PI * ((x * PI) / 2.).sin()
}

#[inline]
fn quad(x: f32) -> f32 {
    x * x
}

#[inline]
fn quad_int(x: f32) -> f32 {
    x.powi(3) / 3.
}

#[inline]
fn cubic(x: f32) -> f32 {
    x * x * x
}

#[inline]
fn cubic_int(x: f32) -> f32 {
    x.powi(4) / 4.
}

#[inline]
fn quart(x: f32) -> f32 {
    x * x * x * x
}

#[inline]
fn quart_int(x: f32) -> f32 {
    x.powi(5) / 5.
}

#[inline]
fn quint(x: f32) -> f32 {
    x * x * x * x * x
}

#[inline]
fn quint_int(x: f32) -> f32 {
    x.powi(6) / 6.
}

const EXPO_RATE: f32 = 10. * std::f32::consts::LN_2;

#[inline]
fn expo(x: f32) -> f32 {
    if x <= 0. {
        0.
    } else {
        (2.0_f32).powf(10. * (x - 1.))
    }
}

#[inline]
fn expo_int(x: f32) -> f32 {
    ((2.0_f32).powf(10. * (x - 1.)) - (2.0_f32).powi(-10)) / EXPO_RATE
}

#[inline]
fn circ(x: f32) -> f32 {
    1. - (1. - x * x).max(0.).sqrt()
}

#[inline]
fn circ_int(x: f32) -> f32 {
    let x = x.clamp(-1., 1.);
    x - (x * (1. - x * x).max(0.).sqrt() + x.asin()) / 2.
}

const C1: f32 = 1.70158;
const C3: f32 = C1 + 1.;

#[inline]
fn back(x: f32) -> f32 {
    (C3 * x - C1) * x * x
}

#[inline]
fn back_int(x: f32) -> f32 {
    C3 * x.powi(4) / 4. - C1 * x.powi(3) / 3.
}

const C4: f32 = (2. * PI) / 3.;

#[inline]
fn elastic(x: f32) -> f32 {
    -((2.0_f32).powf(10. * x - 10.) * ((x * 10. - 10.75) * C4).sin())
}

#[inline]
fn elastic_int(x: f32) -> f32 {
    // d/dx [e^(ax) (a sin(bx + c) - b cos(bx + c)) / (a^2 + b^2)] = e^(ax) sin(bx + c)
    fn primitive(x: f32) -> f32 {
        let (a, b) = (EXPO_RATE, 10. * C4);
        let theta = (x * 10. - 10.75) * C4;
        (2.0_f32).powf(10. * x - 10.) * (a * theta.sin() - b * theta.cos()) / (a * a + b * b)
    }
    -(primitive(x) - primitive(0.))
}

const N1: f32 = 7.5625;
const D1: f32 = 2.75;

// (start, end, center, lift) of each parabola `N1 * (x - center)^2 + lift`
const BOUNCE_PIECES: [(f32, f32, f32, f32); 4] = [
    (0., 1. / D1, 0., 0.),
    (1. / D1, 2. / D1, 1.5 / D1, 0.75),
    (2. / D1, 2.5 / D1, 2.25 / D1, 0.9375),
    (2.5 / D1, f32::INFINITY, 2.625 / D1, 0.984375),
];

#[inline]
fn bounce_out(x: f32) -> f32 {
    let (_, _, center, lift) = BOUNCE_PIECES
        .iter()
        .copied()
        .find(|(_, end, _, _)| x < *end)
        .unwrap_or(BOUNCE_PIECES[3]);
    N1 * (x - center).powi(2) + lift
}

fn bounce_out_int(x: f32) -> f32 {
    let mut sum = 0.;
    for (start, end, center, lift) in BOUNCE_PIECES {
        if x <= start {
            break;
        }
        let to = x.min(end);
        sum += N1 * ((to - center).powi(3) - (start - center).powi(3)) / 3. + lift * (to - start);
    }
    sum
}

#[inline]
fn bounce(x: f32) -> f32 {
    1. - bounce_out(1. - x)
}

#[inline]
fn bounce_int(x: f32) -> f32 {
    x - (bounce_out_int(1.) - bounce_out_int(1. - x))
}

#[rustfmt::skip]
pub static TWEEN_FUNCTIONS: [fn(f32) -> f32; 33] = [
	|_| 0., |_| 1., |x| x,
	f1!(sine), f2!(sine), f3!(sine),
	f1!(quad), f2!(quad), f3!(quad),
	f1!(cubic), f2!(cubic), f3!(cubic),
	f1!(quart), f2!(quart), f3!(quart),
	f1!(quint), f2!(quint), f3!(quint),
	f1!(expo), f2!(expo), f3!(expo),
	f1!(circ), f2!(circ), f3!(circ),
	f1!(back), f2!(back), f3!(back),
	f1!(elastic), f2!(elastic), f3!(elastic),
	f1!(bounce), f2!(bounce), f3!(bounce),
];

/// `TWEEN_INTEGRALS[i](x)` is the area under `TWEEN_FUNCTIONS[i]` over `[0, x]`.
#[rustfmt::skip]
pub static TWEEN_INTEGRALS: [fn(f32) -> f32; 33] = [
	|_| 0., |x| x, |x| x * x / 2.,
	g1!(sine_int), g2!(sine_int), g3!(sine_int),
	g1!(quad_int), g2!(quad_int), g3!(quad_int),
	g1!(cubic_int), g2!(cubic_int), g3!(cubic_int),
	g1!(quart_int), g2!(quart_int), g3!(quart_int),
	g1!(quint_int), g2!(quint_int), g3!(quint_int),
	g1!(expo_int), g2!(expo_int), g3!(expo_int),
	g1!(circ_int), g2!(circ_int), g3!(circ_int),
	g1!(back_int), g2!(back_int), g3!(back_int),
	g1!(elastic_int), g2!(elastic_int), g3!(elastic_int),
	g1!(bounce_int), g2!(bounce_int), g3!(bounce_int),
];

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenMajor {
    Plain,
    Sine,
    Quad,
    Cubic,
    Quart,
    Quint,
    Expo,
    Circ,
    Back,
    Elastic,
    Bounce,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenMinor {
    In,
    Out,
    InOut,
}

pub const fn easing_from(major: TweenMajor, minor: TweenMinor) -> TweenId {
    major as u8 * 3 + minor as u8
}

static EASING_NAMES: phf::Map<&'static str, TweenId> = phf_map! {
    "hold" => 0,
    "jump" => 1,
    "linear" => 2,
    "easeInSine" => 3, "easeOutSine" => 4, "easeInOutSine" => 5,
    "easeInQuad" => 6, "easeOutQuad" => 7, "easeInOutQuad" => 8,
    "easeInCubic" => 9, "easeOutCubic" => 10, "easeInOutCubic" => 11,
    "easeInQuart" => 12, "easeOutQuart" => 13, "easeInOutQuart" => 14,
    "easeInQuint" => 15, "easeOutQuint" => 16, "easeInOutQuint" => 17,
    "easeInExpo" => 18, "easeOutExpo" => 19, "easeInOutExpo" => 20,
    "easeInCirc" => 21, "easeOutCirc" => 22, "easeInOutCirc" => 23,
    "easeInBack" => 24, "easeOutBack" => 25, "easeInOutBack" => 26,
    "easeInElastic" => 27, "easeOutElastic" => 28, "easeInOutElastic" => 29,
    "easeInBounce" => 30, "easeOutBounce" => 31, "easeInOutBounce" => 32,
};

/// A curve from the fixed easing catalog.
///
/// `hold` keeps the start value until the very end of the interval, `jump`
/// switches to the target as soon as the interval begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Easing(TweenId);

impl Default for Easing {
    fn default() -> Self {
        Self::LINEAR
    }
}

impl Easing {
    pub const HOLD: Self = Self(0);
    pub const JUMP: Self = Self(1);
    pub const LINEAR: Self = Self(2);

    pub const fn new(major: TweenMajor, minor: TweenMinor) -> Self {
        Self(easing_from(major, minor))
    }

    pub fn from_id(id: TweenId) -> Option<Self> {
        ((id as usize) < TWEEN_FUNCTIONS.len()).then_some(Self(id))
    }

    pub fn id(self) -> TweenId {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..TWEEN_FUNCTIONS.len() as TweenId).map(Self)
    }

    pub fn name(self) -> &'static str {
        EASING_NAMES
            .entries()
            .find(|(_, id)| **id == self.0)
            .map(|(name, _)| *name)
            .unwrap_or("linear")
    }

    /// Eased fraction for progress `x`, which is clamped into `[0, 1]`.
    pub fn y(self, x: f32) -> f32 {
        TWEEN_FUNCTIONS[self.0 as usize](x.clamp(0., 1.))
    }

    /// Value between `a` and `b` at progress `t`. The endpoints are returned
    /// exactly, whatever the curve evaluates to there.
    pub fn between(self, a: f32, b: f32, t: f32) -> f32 {
        if t <= 0. {
            a
        } else if t >= 1. {
            b
        } else {
            a + (b - a) * TWEEN_FUNCTIONS[self.0 as usize](t)
        }
    }

    /// Definite integral of `between(a, b, t)` for `t` over `[t0, t1]`.
    ///
    /// Both bounds are clamped into `[0, 1]`. Multiply by the interval's length
    /// to get the area in tick units.
    pub fn integral(self, a: f32, b: f32, t0: f32, t1: f32) -> f32 {
        let (t0, t1) = (t0.clamp(0., 1.), t1.clamp(0., 1.));
        let int = TWEEN_INTEGRALS[self.0 as usize];
        a * (t1 - t0) + (b - a) * (int(t1) - int(t0))
    }
}

impl FromStr for Easing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EASING_NAMES.get(s).map(|id| Self(*id)).ok_or_else(|| anyhow!("Unknown easing {s}"))
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
