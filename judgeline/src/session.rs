use crate::{
    config::Config,
    core::{Chart, LineState, NoteId, PlaybackContext},
};
use anyhow::{ensure, Result};
use log::debug;

/// One playback of a chart: owns the chart's runtime state together with the
/// tick, the combo and the tempo cursor.
///
/// The host calls [`Session::advance`] once per frame with the elapsed real time.
pub struct Session {
    pub chart: Chart,
    ctx: PlaybackContext,
    rate: f32,
    paused: bool,

    tempo_cursor: usize,
    bpm: f32,
}

impl Session {
    pub fn new(mut chart: Chart, config: &Config) -> Result<Self> {
        ensure!(config.rate.is_finite() && config.rate > 0., "Playback rate must be positive, got {}", config.rate);
        ensure!(config.offset.is_finite(), "Offset must be finite");
        chart.timing = chart.timing.clone().with_tick_scale(config.tick_scale)?;
        chart.timing.offset += config.offset;
        let bpm = chart.timing.initial_bpm();
        let mut res = Self {
            chart,
            ctx: PlaybackContext::default(),
            rate: config.rate,
            paused: false,

            tempo_cursor: 0,
            bpm,
        };
        res.seek_time(config.start_time);
        Ok(res)
    }

    #[inline]
    pub fn tick(&self) -> f32 {
        self.ctx.tick
    }

    #[inline]
    pub fn combo(&self) -> u32 {
        self.ctx.combo
    }

    #[inline]
    pub fn combo_total(&self) -> u32 {
        self.chart.combo_total()
    }

    #[inline]
    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Notes retired by the last update.
    pub fn retired(&self) -> &[NoteId] {
        &self.ctx.retired
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Every line retired, or nothing left to happen.
    pub fn finished(&self) -> bool {
        self.chart.finished() || self.ctx.tick > self.chart.end_tick()
    }

    pub fn line_states(&self) -> impl Iterator<Item = LineState> + '_ {
        self.chart.lines.iter().map(|it| it.state())
    }

    fn consume_tempo(&mut self) {
        let timing = &self.chart.timing;
        while let Some(seg) = timing.segments().get(self.tempo_cursor + 1) {
            if seg.start_tick - timing.offset > self.ctx.tick {
                break;
            }
            self.tempo_cursor += 1;
            self.bpm = seg.bpm;
        }
    }

    /// Moves playback forward by `dt` seconds of real time and updates every line.
    pub fn advance(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        let mut remaining = dt.max(0.) * self.rate;
        loop {
            self.consume_tempo();
            let timing = &self.chart.timing;
            let rate = timing.tick_rate(self.bpm);
            let boundary = timing.segments().get(self.tempo_cursor + 1).map(|it| it.start_tick - timing.offset);
            match boundary {
                Some(boundary) if self.ctx.tick + rate * remaining >= boundary => {
                    remaining -= (boundary - self.ctx.tick) / rate;
                    self.ctx.tick = boundary;
                }
                _ => {
                    self.ctx.tick += rate * remaining;
                    break;
                }
            }
        }
        self.chart.update(&mut self.ctx);
    }

    /// Ticks playback may be placed at.
    pub fn domain(&self) -> (f32, f32) {
        let start = self.chart.timing.to_tick(0.);
        (start, self.chart.end_tick().max(start))
    }

    /// Jumps to `tick`, clamped into [`Session::domain`], by rewinding every queue
    /// and replaying the chart up to it.
    pub fn seek_tick(&mut self, tick: f32) {
        let (start, end) = self.domain();
        let tick = tick.clamp(start, end);
        debug!("Seeking to tick {tick}");
        self.chart.reset();
        self.ctx = PlaybackContext::new(tick);
        (self.tempo_cursor, self.bpm) = self.chart.timing.segment_at(tick);
        self.chart.update(&mut self.ctx);
    }

    pub fn seek_time(&mut self, time: f32) {
        self.seek_tick(self.chart.timing.to_tick(time));
    }
}
