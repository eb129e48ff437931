use super::{EventQueue, SpeedTo, EPS};

/// Scroll distance covered between `from` and `to`, i.e. the area under the
/// line's speed curve.
///
/// Only events still in the queue are walked, starting from its baseline speed,
/// so the result is exact for any `from` at or after the tick the queue was last
/// advanced to. A reversed interval yields the negated distance.
pub fn scroll_distance(speed: &EventQueue<SpeedTo>, from: f32, to: f32) -> f32 {
    if to < from {
        return -scroll_distance(speed, to, from);
    }
    let mut sum = 0.;
    let mut cursor = from;
    let mut current = speed.baseline();
    for event in speed.remaining() {
        if event.start_tick > to {
            break;
        }
        sum += current * (event.start_tick - cursor).max(0.);
        let span = event.span();
        let (lo, hi) = (cursor.max(event.start_tick), to.min(event.end_tick));
        if span >= EPS && hi > lo {
            let (t0, t1) = ((lo - event.start_tick) / span, (hi - event.start_tick) / span);
            sum += event.properties.ease.integral(current, event.properties.speed, t0, t1) * span;
        }
        if to < event.end_tick {
            return sum;
        }
        cursor = cursor.max(event.end_tick);
        current = event.properties.speed;
    }
    sum + current * (to - cursor)
}
