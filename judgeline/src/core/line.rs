use super::{
    scroll_distance, Construct, Event, EventQueue, LineEvent, Matrix, Note, NoteId, NoteState, NoteVisibility, Object, PlaybackContext, Point,
    SpeedTo, Viewport,
};
use crate::ext::NotNanExt;
use anyhow::{ensure, Context, Result};
use log::warn;

fn check_ticks(start: f32, end: f32) -> Result<()> {
    ensure!(start.is_finite() && end.is_finite(), "Non-finite tick range [{start}, {end}]");
    ensure!(start <= end, "Ends before it starts ([{start}, {end}])");
    Ok(())
}

#[derive(Clone, Debug)]
pub struct JudgeLineCache {
    update_order: Vec<u32>,
}

impl JudgeLineCache {
    pub fn new(notes: &mut [Note]) -> Self {
        notes.sort_by_key(|it| (it.start_tick.not_nan(), it.kind.order()));
        let mut res = Self { update_order: Vec::new() };
        res.reset(notes);
        res
    }

    pub(crate) fn reset(&mut self, notes: &[Note]) {
        self.update_order = (0..notes.len() as u32).collect();
    }

    /// Indices of the notes that have not been retired yet.
    pub fn active(&self) -> impl Iterator<Item = usize> + '_ {
        self.update_order.iter().map(|it| *it as usize)
    }
}

/// Current look of a judge line, as handed to a renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineState {
    pub x: f32,
    pub y: f32,
    /// Radians, clockwise as displayed.
    pub rotation: f32,
    pub alpha: f32,
    pub visible: bool,
    pub notes_visible: bool,
}

#[derive(Clone, Debug)]
pub struct JudgeLine {
    pub construct: Event<Construct>,
    pub object: Object,
    pub speed: EventQueue<SpeedTo>,
    pub note_visibility: EventQueue<NoteVisibility>,
    pub notes: Vec<Note>,
    pub visible: bool,

    pub cache: JudgeLineCache,
}

impl JudgeLine {
    pub fn new(events: Vec<LineEvent>, mut notes: Vec<Note>) -> Result<Self> {
        let mut construct = None;
        let (mut moves, mut rotates, mut fades, mut speeds, mut visibility) = (Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new());
        for (id, event) in events.into_iter().enumerate() {
            let (start, end) = event.ticks();
            check_ticks(start, end).with_context(|| format!("In {} event #{id}", event.kind()))?;
            match event {
                LineEvent::Construct(e) => {
                    let p = &e.properties;
                    ensure!(
                        [p.x, p.y, p.angle, p.alpha, p.speed].iter().all(|it| it.is_finite()),
                        "Construct event #{id} has non-finite properties"
                    );
                    if construct.is_some() {
                        warn!("Multiple construct events, using the one that starts last");
                    }
                    // ties go to the later one in load order
                    if construct.as_ref().map_or(true, |it: &Event<Construct>| e.start_tick >= it.start_tick) {
                        construct = Some(e);
                    }
                }
                LineEvent::Move(e) => moves.push(e),
                LineEvent::Rotate(e) => rotates.push(e),
                LineEvent::Fade(e) => fades.push(e),
                LineEvent::Speed(e) => speeds.push(e),
                LineEvent::NoteVisibility(e) => visibility.push(e),
            }
        }
        let construct = construct.unwrap_or_else(|| {
            warn!("Missing construct event, falling back to defaults");
            Construct::fallback()
        });
        for (id, note) in notes.iter().enumerate() {
            check_ticks(note.start_tick, note.end_tick).with_context(|| format!("In note #{id}"))?;
            ensure!(note.lane_offset.is_finite(), "Note #{id} has a non-finite lane offset");
        }
        let initial = construct.properties;
        let cache = JudgeLineCache::new(&mut notes);
        Ok(Self {
            object: Object::new(&initial, moves, rotates, fades),
            speed: EventQueue::new(speeds, initial.speed),
            note_visibility: EventQueue::new(visibility, true),
            construct,
            notes,
            visible: false,

            cache,
        })
    }

    #[inline]
    pub fn in_window(&self, tick: f32) -> bool {
        self.construct.start_tick <= tick && tick <= self.construct.end_tick
    }

    /// Lines are retired once their window has passed, and never come back.
    #[inline]
    pub fn retired(&self, tick: f32) -> bool {
        tick > self.construct.end_tick
    }

    /// Whether the window has passed and every note has been retired.
    #[inline]
    pub fn done(&self, tick: f32) -> bool {
        self.retired(tick) && self.cache.update_order.is_empty()
    }

    /// Notes are swept on every update, hidden or not, so a step that jumps
    /// past the window still retires them.
    pub fn update(&mut self, ctx: &mut PlaybackContext, id: usize) {
        let tick = ctx.tick;
        self.visible = self.in_window(tick);
        if self.visible {
            self.object.set_tick(tick);
            self.speed.set_tick(tick);
            self.note_visibility.set_tick(tick);
        }
        let notes = &self.notes;
        self.cache.update_order.retain(|note| {
            let n = &notes[*note as usize];
            if tick <= n.end_tick {
                return true;
            }
            if n.counted() {
                ctx.combo += 1;
            }
            ctx.retired.push(NoteId { line: id, note: *note as usize });
            false
        });
    }

    pub fn reset(&mut self) {
        self.object.reset();
        self.speed.reset();
        self.note_visibility.reset();
        self.cache.reset(&self.notes);
        self.visible = false;
    }

    pub fn state(&self) -> LineState {
        let tr = self.object.now_translation();
        LineState {
            x: tr.x,
            y: tr.y,
            rotation: self.object.now_rotation(),
            alpha: self.object.now_alpha(),
            visible: self.visible,
            notes_visible: self.note_visibility.now(),
        }
    }

    /// Scroll distance between two ticks, following this line's speed events.
    pub fn distance(&self, from: f32, to: f32) -> f32 {
        scroll_distance(&self.speed, from, to)
    }

    pub fn note_state(&self, note: &Note, tick: f32) -> NoteState {
        NoteState {
            distance: self.distance(tick, note.start_tick),
            tail_distance: note.is_hold().then(|| self.distance(tick, note.end_tick)),
        }
    }

    /// States of the notes not yet retired, in tick order.
    pub fn note_states(&self, tick: f32) -> impl Iterator<Item = (usize, NoteState)> + '_ {
        self.cache.active().map(move |id| (id, self.note_state(&self.notes[id], tick)))
    }

    pub fn matrix(&self, viewport: &Viewport) -> Matrix {
        self.object.now(viewport)
    }

    /// Screen position of a note `distance` away from this line.
    pub fn note_position(&self, note: &Note, distance: f32, viewport: &Viewport) -> Point {
        let scale = viewport.scale();
        self.matrix(viewport)
            .transform_point(&Point::new(note.lane_offset * scale.x, -distance * scale.y))
    }

    /// Last tick at which anything on this line changes.
    pub fn last_tick(&self) -> f32 {
        let note_end = self.notes.iter().map(|it| it.end_tick).fold(f32::NEG_INFINITY, f32::max);
        if self.construct.end_tick.is_finite() {
            return self.construct.end_tick.max(note_end);
        }
        let ends = self.object.translation.events().iter().map(|it| it.end_tick);
        ends.chain(self.object.rotation.events().iter().map(|it| it.end_tick))
            .chain(self.object.alpha.events().iter().map(|it| it.end_tick))
            .chain(self.speed.events().iter().map(|it| it.end_tick))
            .chain(self.note_visibility.events().iter().map(|it| it.end_tick))
            .chain(self.notes.iter().map(|it| it.end_tick))
            .fold(f32::NEG_INFINITY, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Easing, FadeTo, NoteKind};

    fn construct(start: f32, end: f32, alpha: f32) -> LineEvent {
        LineEvent::Construct(Event::new(start, end, Construct { alpha, ..Default::default() }))
    }

    #[test]
    fn test_construct_fallback() {
        let line = JudgeLine::new(Vec::new(), Vec::new()).unwrap();
        assert!(line.in_window(-1e6) && line.in_window(1e6));
        assert_eq!(line.speed.now(), 0.1);
        assert_eq!(line.last_tick(), f32::NEG_INFINITY);
    }

    #[test]
    fn test_latest_construct_wins() {
        let line = JudgeLine::new(vec![construct(0., 100., 0.2), construct(10., 200., 0.7)], Vec::new()).unwrap();
        assert_eq!(line.construct.end_tick, 200.);
        assert_eq!(line.state().alpha, 0.7);
        assert_eq!(line.last_tick(), 200.);
    }

    #[test]
    fn test_construct_starting_last_wins() {
        let line = JudgeLine::new(vec![construct(10., 200., 0.7), construct(0., 100., 0.2)], Vec::new()).unwrap();
        assert_eq!(line.construct.end_tick, 200.);
        assert_eq!(line.state().alpha, 0.7);

        let line = JudgeLine::new(vec![construct(0., 100., 0.2), construct(0., 300., 0.5)], Vec::new()).unwrap();
        assert_eq!(line.construct.end_tick, 300.);
    }

    #[test]
    fn test_notes_retire_past_window() {
        let notes = vec![
            Note::new(NoteKind::Click, 50., 50., 0., false),
            Note::new(NoteKind::Click, 60., 60., 0., true),
            Note::new(NoteKind::Hold, 80., 400., 0., false),
        ];
        let mut line = JudgeLine::new(vec![construct(0., 100., 1.)], notes).unwrap();
        assert_eq!(line.last_tick(), 400.);

        let mut ctx = PlaybackContext::new(300.);
        line.update(&mut ctx, 0);
        assert!(!line.visible);
        assert_eq!(ctx.combo, 1);
        assert_eq!(ctx.retired.len(), 2);
        assert!(line.retired(300.) && !line.done(300.));

        ctx.tick = 401.;
        line.update(&mut ctx, 0);
        assert_eq!(ctx.combo, 2);
        assert!(line.done(401.));
    }

    #[test]
    fn test_rejects_malformed() {
        let fade = LineEvent::Fade(Event::new(50., 40., FadeTo { alpha: 0., ease: Easing::LINEAR }));
        let err = JudgeLine::new(vec![construct(0., 100., 1.), fade], Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("fade event #1"));

        let note = Note::new(NoteKind::Hold, 30., f32::NAN, 0., false);
        assert!(JudgeLine::new(Vec::new(), vec![note]).is_err());
    }

    #[test]
    fn test_hidden_lines_freeze() {
        let fade = LineEvent::Fade(Event::new(0., 100., FadeTo { alpha: 0., ease: Easing::LINEAR }));
        let mut line = JudgeLine::new(vec![construct(50., 80., 1.), fade], Vec::new()).unwrap();
        let mut ctx = PlaybackContext::new(20.);
        line.update(&mut ctx, 0);
        assert!(!line.visible);
        assert_eq!(line.state().alpha, 1.);

        ctx.tick = 60.;
        line.update(&mut ctx, 0);
        assert!(line.visible);
        assert!((line.state().alpha - 0.4).abs() < 1e-6);
        assert!(!line.retired(80.) && line.retired(80.5));
    }

    #[test]
    fn test_hold_tail() {
        let hold = Note::new(NoteKind::Hold, 100., 300., 0., false);
        let line = JudgeLine::new(vec![construct(0., 1000., 1.)], vec![hold]).unwrap();
        let states: Vec<_> = line.note_states(0.).collect();
        assert_eq!(states.len(), 1);
        // default speed 0.1
        assert!((states[0].1.distance - 10.).abs() < 1e-4);
        assert!((states[0].1.tail_distance.unwrap() - 30.).abs() < 1e-4);
    }
}
