use super::{Event, Interpolate};
use crate::ext::NotNanExt;
use log::warn;

/// Sorted, head-first queue of events driving one attribute.
///
/// Events are never removed: consuming one moves `cursor` past it, so the queue
/// can be rewound with [`EventQueue::reset`] and replayed.
#[derive(Clone, Debug)]
pub struct EventQueue<P: Interpolate> {
    events: Vec<Event<P>>,
    cursor: usize,
    initial: P::Value,
    baseline: P::Value,
    now: P::Value,
}

impl<P: Interpolate> EventQueue<P> {
    /// Builds a queue from events with finite ticks and `start_tick <= end_tick`.
    pub fn new(mut events: Vec<Event<P>>, initial: P::Value) -> Self {
        events.sort_by_key(|it| it.start_tick.not_nan());
        if let Some(pair) = events.windows(2).find(|pair| pair[1].start_tick < pair[0].end_tick) {
            warn!(
                "Overlapping events: [{}, {}] and [{}, {}], the later one waits for the earlier",
                pair[0].start_tick, pair[0].end_tick, pair[1].start_tick, pair[1].end_tick
            );
        }
        Self {
            events,
            cursor: 0,
            initial,
            baseline: initial,
            now: initial,
        }
    }

    pub fn set_tick(&mut self, tick: f32) {
        while let Some(event) = self.events.get(self.cursor) {
            if event.start_tick > tick {
                break;
            }
            if event.end_tick < tick {
                self.baseline = event.properties.target();
                self.now = self.baseline;
                self.cursor += 1;
                continue;
            }
            self.now = event.value_at(self.baseline, tick);
            break;
        }
    }

    /// Value at the last tick passed to [`EventQueue::set_tick`].
    #[inline]
    pub fn now(&self) -> P::Value {
        self.now
    }

    /// Value the head event interpolates from.
    #[inline]
    pub fn baseline(&self) -> P::Value {
        self.baseline
    }

    /// Events that have not been consumed yet, head first.
    pub fn remaining(&self) -> &[Event<P>] {
        &self.events[self.cursor..]
    }

    pub fn events(&self) -> &[Event<P>] {
        &self.events
    }

    pub fn dead(&self) -> bool {
        self.cursor == self.events.len()
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.baseline = self.initial;
        self.now = self.initial;
    }
}
