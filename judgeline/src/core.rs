pub const EPS: f32 = 1e-5;

pub type Point = nalgebra::Point2<f32>;
pub type Vector = nalgebra::Vector2<f32>;
pub type Matrix = nalgebra::Matrix3<f32>;

mod chart;
pub use chart::Chart;

mod context;
pub use context::{NoteId, PlaybackContext};

mod distance;
pub use distance::scroll_distance;

mod event;
pub use event::{Construct, Event, FadeTo, Interpolate, LineEvent, MoveTo, NoteVisibility, RotateTo, SpeedTo};

mod line;
pub use line::{JudgeLine, JudgeLineCache, LineState};

mod note;
pub use note::{Note, NoteKind, NoteState};

mod object;
pub use object::{Object, Viewport};

mod queue;
pub use queue::EventQueue;

mod timing;
pub use timing::{TempoSegment, Timing, TICK_SCALE};

mod tween;
pub use tween::{easing_from, Easing, TweenId, TweenMajor, TweenMinor, TWEEN_FUNCTIONS, TWEEN_INTEGRALS};
