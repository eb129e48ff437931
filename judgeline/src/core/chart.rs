use super::{JudgeLine, PlaybackContext, Timing};
use log::debug;

#[derive(Clone, Debug)]
pub struct Chart {
    pub timing: Timing,
    pub lines: Vec<JudgeLine>,
    /// Lines whose window or notes are still ahead.
    pub order: Vec<usize>,
    combo_total: u32,
}

impl Chart {
    pub fn new(timing: Timing, lines: Vec<JudgeLine>) -> Self {
        let combo_total = lines.iter().flat_map(|it| it.notes.iter()).filter(|it| it.counted()).count() as u32;
        let order = (0..lines.len()).collect();
        Self {
            timing,
            lines,
            order,
            combo_total,
        }
    }

    /// Number of notes that count towards combo.
    pub fn combo_total(&self) -> u32 {
        self.combo_total
    }

    pub fn reset(&mut self) {
        for line in &mut self.lines {
            line.reset();
        }
        self.order = (0..self.lines.len()).collect();
    }

    /// Advances every live line to `ctx.tick`. `ctx.retired` is refilled with the
    /// notes retired by this call.
    pub fn update(&mut self, ctx: &mut PlaybackContext) {
        ctx.retired.clear();
        let lines = &mut self.lines;
        self.order.retain(|id| {
            let line = &mut lines[*id];
            line.update(ctx, *id);
            if line.done(ctx.tick) {
                debug!("Judge line #{id} retired at tick {}", ctx.tick);
                false
            } else {
                true
            }
        });
    }

    /// Last tick at which anything in the chart changes, `NEG_INFINITY` for an empty chart.
    pub fn end_tick(&self) -> f32 {
        self.lines.iter().map(JudgeLine::last_tick).fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn finished(&self) -> bool {
        self.order.is_empty()
    }
}
