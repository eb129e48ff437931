#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteKind {
    Click,
    Hold,
    Flick,
    Drag,
}

impl NoteKind {
    pub fn order(&self) -> i8 {
        match self {
            Self::Click => 0,
            Self::Hold => 1,
            Self::Flick => 2,
            Self::Drag => 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Note {
    pub kind: NoteKind,
    pub start_tick: f32,
    /// Tick after which the note is retired. For non-hold notes this closes
    /// the hit window.
    pub end_tick: f32,
    /// Offset along the line, in chart units.
    pub lane_offset: f32,
    pub fake: bool,
}

impl Note {
    pub fn new(kind: NoteKind, start_tick: f32, end_tick: f32, lane_offset: f32, fake: bool) -> Self {
        Self {
            kind,
            start_tick,
            end_tick,
            lane_offset,
            fake,
        }
    }

    /// Whether the note counts towards combo.
    #[inline]
    pub fn counted(&self) -> bool {
        !self.fake
    }

    pub fn is_hold(&self) -> bool {
        matches!(self.kind, NoteKind::Hold)
    }
}

/// Placement of a live note relative to its line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteState {
    /// Scroll distance still to cover before the note reaches the line.
    pub distance: f32,
    /// Same for the tail of a hold note.
    pub tail_distance: Option<f32>,
}
