use anyhow::{ensure, Result};

/// Ticks per beat-per-minute per second of playback.
///
/// A chart playing at `bpm` advances `bpm * TICK_SCALE` ticks every second.
pub const TICK_SCALE: f32 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TempoSegment {
    pub start_tick: f32,
    pub bpm: f32,
}

impl TempoSegment {
    pub fn new(start_tick: f32, bpm: f32) -> Self {
        Self { start_tick, bpm }
    }
}

/// Tempo map of a chart.
///
/// The first segment's tempo applies from tick 0 until the second segment
/// starts, whatever the first segment's own start tick says.
#[derive(Clone, Debug)]
pub struct Timing {
    segments: Vec<TempoSegment>,
    pub offset: f32,
    tick_scale: f32,
}

impl Timing {
    pub fn new(segments: Vec<TempoSegment>, offset: f32) -> Result<Self> {
        ensure!(!segments.is_empty(), "Tempo list is empty");
        for (id, seg) in segments.iter().enumerate() {
            ensure!(seg.start_tick.is_finite(), "Tempo segment #{id} starts at a non-finite tick");
            ensure!(seg.bpm.is_finite() && seg.bpm > 0., "Tempo segment #{id} has invalid bpm {}", seg.bpm);
        }
        for (id, pair) in segments.windows(2).enumerate() {
            ensure!(
                pair[0].start_tick < pair[1].start_tick,
                "Tempo segment #{} does not start after #{id} ({} <= {})",
                id + 1,
                pair[1].start_tick,
                pair[0].start_tick
            );
        }
        ensure!(offset.is_finite(), "Tick offset must be finite");
        Ok(Self {
            segments,
            offset,
            tick_scale: TICK_SCALE,
        })
    }

    pub fn with_tick_scale(mut self, tick_scale: f32) -> Result<Self> {
        ensure!(tick_scale.is_finite() && tick_scale > 0., "Tick scale must be positive, got {tick_scale}");
        self.tick_scale = tick_scale;
        Ok(self)
    }

    pub fn segments(&self) -> &[TempoSegment] {
        &self.segments
    }

    pub fn tick_scale(&self) -> f32 {
        self.tick_scale
    }

    pub fn initial_bpm(&self) -> f32 {
        self.segments[0].bpm
    }

    /// Ticks per second while `bpm` is in effect.
    #[inline]
    pub fn tick_rate(&self, bpm: f32) -> f32 {
        bpm * self.tick_scale
    }

    /// End tick of segment `index`, infinite for the last one.
    fn segment_end(&self, index: usize) -> f32 {
        self.segments.get(index + 1).map_or(f32::INFINITY, |it| it.start_tick)
    }

    /// Chart tick reached after `time` seconds of audio, offset applied.
    ///
    /// Negative times are clamped to zero.
    pub fn to_tick(&self, time: f32) -> f32 {
        let mut remaining = time.max(0.);
        let mut tick = 0.;
        for (index, seg) in self.segments.iter().enumerate() {
            let rate = self.tick_rate(seg.bpm);
            let span = (self.segment_end(index) - tick).max(0.);
            let duration = span / rate;
            if remaining <= duration {
                tick += rate * remaining;
                break;
            }
            tick += span;
            remaining -= duration;
        }
        tick - self.offset
    }

    /// Audio time at which chart tick `tick` is reached. Inverse of [`Timing::to_tick`]
    /// for ticks at or after the start of playback.
    pub fn time_at(&self, tick: f32) -> f32 {
        let target = (tick + self.offset).max(0.);
        let mut time = 0.;
        let mut cursor = 0.;
        for (index, seg) in self.segments.iter().enumerate() {
            let rate = self.tick_rate(seg.bpm);
            let end = self.segment_end(index).max(cursor);
            if target <= end {
                return time + (target - cursor) / rate;
            }
            time += (end - cursor) / rate;
            cursor = end;
        }
        time
    }

    /// Index of the segment governing `tick` (offset applied) and its bpm.
    pub fn segment_at(&self, tick: f32) -> (usize, f32) {
        let raw = tick + self.offset;
        let index = self.segments.iter().skip(1).take_while(|it| it.start_tick <= raw).count();
        (index, self.segments[index].bpm)
    }
}
