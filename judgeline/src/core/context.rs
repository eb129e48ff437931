#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NoteId {
    pub line: usize,
    pub note: usize,
}

/// Mutable state of one playback session, handed to every update.
#[derive(Clone, Debug, Default)]
pub struct PlaybackContext {
    pub tick: f32,
    pub combo: u32,
    /// Notes retired by the last `Chart::update`.
    pub retired: Vec<NoteId>,
}

impl PlaybackContext {
    pub fn new(tick: f32) -> Self {
        Self {
            tick,
            ..Default::default()
        }
    }
}
