use judgeline::{
    config::Config,
    core::{
        Chart, Construct, Easing, Event, JudgeLine, LineEvent, MoveTo, Note, NoteKind, PlaybackContext, Point, SpeedTo, TempoSegment, Timing,
        Viewport,
    },
    Session,
};

fn construct(start: f32, end: f32, speed: f32) -> LineEvent {
    LineEvent::Construct(Event::new(start, end, Construct { speed, ..Default::default() }))
}

fn timing(bpm: f32) -> Timing {
    Timing::new(vec![TempoSegment::new(0., bpm)], 0.).unwrap()
}

fn move_chart() -> Chart {
    let line = JudgeLine::new(
        vec![
            construct(0., 10000., 1.),
            LineEvent::Move(Event::new(
                1000.,
                2000.,
                MoveTo {
                    x: 1.,
                    y: 0.,
                    ease_x: Easing::LINEAR,
                    ease_y: Easing::LINEAR,
                },
            )),
        ],
        Vec::new(),
    )
    .unwrap();
    Chart::new(timing(100.), vec![line])
}

fn notes_chart() -> Chart {
    let notes = vec![
        Note::new(NoteKind::Click, 500., 500., 0., true),
        Note::new(NoteKind::Click, 500., 500., 0.5, false),
    ];
    let line = JudgeLine::new(vec![construct(0., 1000., 1.)], notes).unwrap();
    Chart::new(timing(100.), vec![line])
}

#[test]
fn move_event_midpoint_and_end() {
    let mut chart = move_chart();
    let mut ctx = PlaybackContext::new(1500.);
    chart.update(&mut ctx);
    assert!((chart.lines[0].state().x - 0.5).abs() < 1e-6);

    for tick in [2000., 2500., 9000.] {
        ctx.tick = tick;
        chart.update(&mut ctx);
        assert_eq!(chart.lines[0].state().x, 1.);
    }
}

#[test]
fn move_event_through_session() {
    let config = Config {
        tick_scale: 1.,
        ..Default::default()
    };
    let mut session = Session::new(move_chart(), &config).unwrap();
    session.seek_tick(1500.);
    assert!((session.chart.lines[0].state().x - 0.5).abs() < 1e-6);
    // 100 ticks per second
    session.advance(5.);
    assert_eq!(session.tick(), 2000.);
    assert_eq!(session.chart.lines[0].state().x, 1.);
}

#[test]
fn linear_speed_ramp_distance() {
    let line = JudgeLine::new(
        vec![
            construct(0., 10000., 1.),
            LineEvent::Speed(Event::new(
                0.,
                1000.,
                SpeedTo {
                    speed: 2.,
                    ease: Easing::LINEAR,
                },
            )),
        ],
        Vec::new(),
    )
    .unwrap();
    assert!((line.distance(0., 1000.) - 1500.).abs() < 1e-2);
    let stepped: f32 = (0..10).map(|i| line.distance(i as f32 * 100., (i + 1) as f32 * 100.)).sum();
    assert!((stepped - 1500.).abs() < 1e-2);
    assert!((line.distance(0., 2000.) - 3500.).abs() < 1e-2);
}

#[test]
fn fake_note_does_not_count() {
    let mut chart = notes_chart();
    assert_eq!(chart.combo_total(), 1);
    let mut ctx = PlaybackContext::new(400.);
    chart.update(&mut ctx);
    assert_eq!(ctx.combo, 0);
    ctx.tick = 501.;
    chart.update(&mut ctx);
    assert_eq!(ctx.combo, 1);
    assert_eq!(ctx.retired.len(), 2);
    assert_eq!(chart.lines[0].cache.active().count(), 0);
}

#[test]
fn repeated_update_is_idempotent() {
    let mut chart = notes_chart();
    let mut ctx = PlaybackContext::new(600.);
    chart.update(&mut ctx);
    let state = chart.lines[0].state();
    let combo = ctx.combo;
    assert_eq!(ctx.retired.len(), 2);
    chart.update(&mut ctx);
    assert_eq!(chart.lines[0].state(), state);
    assert_eq!(ctx.combo, combo);
    assert!(ctx.retired.is_empty());
}

#[test]
fn full_run_reaches_combo_total() {
    let mut session = Session::new(notes_chart(), &Config::default()).unwrap();
    let mut frames = 0;
    while !session.finished() {
        session.advance(1. / 60.);
        assert!(session.combo() <= session.combo_total());
        frames += 1;
        assert!(frames < 10_000);
    }
    assert_eq!(session.combo(), session.combo_total());
    assert!(session.chart.finished());
}

#[test]
fn advance_splits_at_tempo_change() {
    let timing = Timing::new(vec![TempoSegment::new(0., 100.), TempoSegment::new(240., 200.)], 0.).unwrap();
    let line = JudgeLine::new(vec![construct(0., 10000., 1.)], Vec::new()).unwrap();
    let mut session = Session::new(Chart::new(timing, vec![line]), &Config::default()).unwrap();
    session.advance(3.);
    assert!((session.tick() - 480.).abs() < 1e-3);
    assert_eq!(session.bpm(), 200.);
    assert!((session.chart.timing.time_at(session.tick()) - 3.).abs() < 1e-4);
}

#[test]
fn pause_freezes_and_rate_scales() {
    let config = Config {
        rate: 2.,
        ..Default::default()
    };
    let mut session = Session::new(move_chart(), &config).unwrap();
    session.pause();
    session.advance(1.);
    assert_eq!(session.tick(), 0.);
    session.resume();
    session.advance(1.);
    assert!((session.tick() - 240.).abs() < 1e-3);
}

#[test]
fn seek_replays_and_clamps() {
    let mut session = Session::new(notes_chart(), &Config::default()).unwrap();
    session.seek_tick(800.);
    assert_eq!(session.combo(), 1);
    session.seek_tick(100.);
    assert_eq!(session.combo(), 0);
    assert_eq!(session.chart.lines[0].cache.active().count(), 2);

    session.seek_tick(-50.);
    assert_eq!(session.tick(), 0.);
    session.seek_tick(1e9);
    assert_eq!(session.tick(), 1000.);

    session.seek_time(5.);
    assert!((session.tick() - 600.).abs() < 1e-3);
}

fn short_and_long_lines() -> Chart {
    let short = JudgeLine::new(vec![construct(0., 1000., 1.)], vec![Note::new(NoteKind::Click, 500., 500., 0., false)]).unwrap();
    let long = JudgeLine::new(vec![construct(0., 5000., 1.)], Vec::new()).unwrap();
    Chart::new(timing(100.), vec![short, long])
}

#[test]
fn seek_past_finished_line_keeps_its_combo() {
    let mut session = Session::new(short_and_long_lines(), &Config::default()).unwrap();
    session.seek_tick(2000.);
    assert_eq!(session.combo(), 1);
    assert_eq!(session.combo_total(), 1);
    assert!(!session.chart.lines[0].visible);
    assert_eq!(session.chart.order, [1]);
}

#[test]
fn long_step_over_line_end_keeps_its_combo() {
    let mut session = Session::new(short_and_long_lines(), &Config::default()).unwrap();
    session.seek_tick(400.);
    assert_eq!(session.combo(), 0);
    // 120 ticks per second, lands past both the note and the short line's end
    session.advance(6.);
    assert!(session.tick() > 1000.);
    assert_eq!(session.combo(), 1);
    assert_eq!(session.retired().len(), 1);
    while !session.finished() {
        session.advance(1.);
    }
    assert_eq!(session.combo(), 1);
}

#[test]
fn rejects_bad_rate() {
    let config = Config {
        rate: 0.,
        ..Default::default()
    };
    assert!(Session::new(move_chart(), &config).is_err());
}

#[test]
fn line_hidden_outside_window() {
    let mut chart = notes_chart();
    let mut ctx = PlaybackContext::new(1001.);
    chart.update(&mut ctx);
    assert!(!chart.lines[0].visible);
    assert!(chart.finished());
}

#[test]
fn note_lands_on_line() {
    let mut chart = notes_chart();
    let mut ctx = PlaybackContext::new(500.);
    chart.update(&mut ctx);
    let line = &chart.lines[0];
    let viewport = Viewport::default();
    let (id, state) = line.note_states(ctx.tick).next().unwrap();
    assert_eq!(state.distance, 0.);
    let pos = line.note_position(&line.notes[id], state.distance, &viewport);
    let center = viewport.to_screen(Point::origin());
    assert!((pos.y - center.y).abs() < 1e-3);
}
