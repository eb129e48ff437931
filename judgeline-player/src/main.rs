use anyhow::{bail, Context, Result};
use judgeline::{config::Config, core::Point, parse::parse_json, Session};
use log::{debug, info, warn};

fn main() -> Result<()> {
    env_logger::builder().filter_level(log::LevelFilter::Info).parse_default_env().init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "judgeline-player".to_owned());
    let Some(path) = args.next() else {
        bail!("Usage: {program} <chart.json> [config.yml]");
    };
    let config = match args.next() {
        Some(config_path) => Config::load(config_path)?,
        None => Config::default(),
    };
    if config.fps == 0 {
        bail!("Frame rate must be positive");
    }

    let source = std::fs::read_to_string(&path).with_context(|| format!("Cannot read chart from {path}"))?;
    let chart = parse_json(&source).with_context(|| format!("Failed to load chart {path}"))?;
    let viewport = config.viewport();
    let mut session = Session::new(chart, &config)?;
    let end_tick = session.chart.end_tick();
    if !end_tick.is_finite() {
        warn!("Chart has nothing to play");
    }
    info!(
        "Loaded {} judge lines, {} notes to combo, ending at tick {end_tick} ({:.2}s)",
        session.chart.lines.len(),
        session.combo_total(),
        session.chart.timing.time_at(end_tick),
    );

    let dt = 1. / config.fps as f32;
    let mut frame = 0u64;
    while !session.finished() {
        session.advance(dt);
        frame += 1;
        if frame % config.fps as u64 == 0 {
            let visible = session.line_states().filter(|it| it.visible).count();
            info!(
                "t={:>4}s tick={:.1} bpm={} combo={}/{} visible lines={visible}",
                frame / config.fps as u64,
                session.tick(),
                session.bpm(),
                session.combo(),
                session.combo_total(),
            );
            for (id, line) in session.chart.lines.iter().enumerate().filter(|(_, it)| it.visible) {
                let origin = viewport.to_screen(Point::from(line.object.now_translation()));
                debug!("line #{id} at ({:.1}, {:.1}) {:?}", origin.x, origin.y, line.state());
            }
        }
    }
    info!(
        "Finished after {frame} frames at tick {:.1}, combo {}/{}",
        session.tick(),
        session.combo(),
        session.combo_total()
    );
    Ok(())
}
