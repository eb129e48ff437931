use crate::core::{
    Chart, Construct, Easing, Event, FadeTo, JudgeLine, LineEvent, MoveTo, Note, NoteKind, NoteVisibility, RotateTo, SpeedTo, TempoSegment,
    Timing, TweenId,
};
use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum EasingForm {
    Id(TweenId),
    Name(String),
}

impl Default for EasingForm {
    fn default() -> Self {
        Self::Id(Easing::LINEAR.id())
    }
}

impl TryFrom<EasingForm> for Easing {
    type Error = anyhow::Error;

    fn try_from(value: EasingForm) -> Result<Self> {
        match value {
            EasingForm::Id(id) => Easing::from_id(id).ok_or_else(|| anyhow!("Unknown easing id {id}")),
            EasingForm::Name(name) => name.parse(),
        }
    }
}

#[derive(Deserialize)]
struct JsonBpm {
    time: f32,
    bpm: f32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonTiming {
    #[serde(default)]
    offset: f32,
    bpm_list: Vec<JsonBpm>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonEvent<P> {
    start_time: f32,
    end_time: f32,
    properties: P,
}

#[derive(Deserialize)]
#[serde(default)]
struct JsonConstruct {
    x: f32,
    y: f32,
    angle: f32,
    alpha: f32,
    speed: f32,
}

impl Default for JsonConstruct {
    fn default() -> Self {
        let Construct { x, y, angle, alpha, speed } = Construct::default();
        Self { x, y, angle, alpha, speed }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonMove {
    x: f32,
    y: f32,
    #[serde(default)]
    ease_x: EasingForm,
    #[serde(default)]
    ease_y: EasingForm,
}

#[derive(Deserialize)]
struct JsonRotate {
    angle: f32,
    #[serde(default)]
    ease: EasingForm,
}

#[derive(Deserialize)]
struct JsonFade {
    alpha: f32,
    #[serde(default)]
    ease: EasingForm,
}

#[derive(Deserialize)]
struct JsonSpeed {
    speed: f32,
    #[serde(default)]
    ease: EasingForm,
}

#[derive(Deserialize)]
struct JsonNoteVis {
    visibility: bool,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum JsonLineEvent {
    Construct(JsonEvent<JsonConstruct>),
    Move(JsonEvent<JsonMove>),
    Rotate(JsonEvent<JsonRotate>),
    Fade(JsonEvent<JsonFade>),
    Speed(JsonEvent<JsonSpeed>),
    #[serde(rename = "notevis")]
    NoteVis(JsonEvent<JsonNoteVis>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonNote {
    #[serde(rename = "type")]
    kind: String,
    start_time: f32,
    end_time: Option<f32>,
    #[serde(default)]
    is_fake: bool,
    #[serde(default)]
    x: f32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonJudgeLine {
    #[serde(default)]
    event_list: Vec<JsonLineEvent>,
    #[serde(default)]
    note_list: Vec<JsonNote>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonChart {
    timing: JsonTiming,
    judge_line_list: Vec<JsonJudgeLine>,
}

fn event<P, Q>(e: JsonEvent<P>, f: impl FnOnce(P) -> Result<Q>) -> Result<Event<Q>> {
    Ok(Event::new(e.start_time, e.end_time, f(e.properties)?))
}

fn parse_event(e: JsonLineEvent) -> Result<LineEvent> {
    Ok(match e {
        JsonLineEvent::Construct(e) => LineEvent::Construct(event(e, |p| {
            Ok(Construct {
                x: p.x,
                y: p.y,
                angle: p.angle,
                alpha: p.alpha,
                speed: p.speed,
            })
        })?),
        JsonLineEvent::Move(e) => LineEvent::Move(event(e, |p| {
            Ok(MoveTo {
                x: p.x,
                y: p.y,
                ease_x: p.ease_x.try_into()?,
                ease_y: p.ease_y.try_into()?,
            })
        })?),
        JsonLineEvent::Rotate(e) => LineEvent::Rotate(event(e, |p| {
            Ok(RotateTo {
                angle: p.angle,
                ease: p.ease.try_into()?,
            })
        })?),
        JsonLineEvent::Fade(e) => LineEvent::Fade(event(e, |p| {
            Ok(FadeTo {
                alpha: p.alpha,
                ease: p.ease.try_into()?,
            })
        })?),
        JsonLineEvent::Speed(e) => LineEvent::Speed(event(e, |p| {
            Ok(SpeedTo {
                speed: p.speed,
                ease: p.ease.try_into()?,
            })
        })?),
        JsonLineEvent::NoteVis(e) => LineEvent::NoteVisibility(event(e, |p| Ok(NoteVisibility { visible: p.visibility }))?),
    })
}

fn parse_note(note: JsonNote) -> Result<Note> {
    let kind = match note.kind.as_str() {
        "tap" | "click" => NoteKind::Click,
        "drag" => NoteKind::Drag,
        "flick" => NoteKind::Flick,
        "hold" => NoteKind::Hold,
        _ => bail!("Unknown note type: {}", note.kind),
    };
    let end_tick = note.end_time.unwrap_or(note.start_time);
    Ok(Note::new(kind, note.start_time, end_tick, note.x, note.is_fake))
}

fn parse_judge_line(json: JsonJudgeLine) -> Result<JudgeLine> {
    let events = json
        .event_list
        .into_iter()
        .enumerate()
        .map(|(id, e)| parse_event(e).with_context(|| format!("In event #{id}")))
        .collect::<Result<Vec<_>>>()?;
    let notes = json
        .note_list
        .into_iter()
        .enumerate()
        .map(|(id, n)| parse_note(n).with_context(|| format!("In note #{id}")))
        .collect::<Result<Vec<_>>>()?;
    JudgeLine::new(events, notes)
}

pub fn parse_json(source: &str) -> Result<Chart> {
    let json: JsonChart = serde_json::from_str(source).context("Failed to parse JSON")?;
    let timing = Timing::new(
        json.timing.bpm_list.into_iter().map(|it| TempoSegment::new(it.time, it.bpm)).collect(),
        json.timing.offset,
    )
    .context("Invalid timing")?;
    let lines = json
        .judge_line_list
        .into_iter()
        .enumerate()
        .map(|(id, line)| parse_judge_line(line).with_context(|| format!("In judge line #{id}")))
        .collect::<Result<Vec<_>>>()?;
    Ok(Chart::new(timing, lines))
}
