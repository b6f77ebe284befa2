use stroke_engine::config::{self, Config};
use stroke_engine::driver::{self, Driver};
use stroke_engine::{MonotonicClock, Pattern, PatternKind};

use serde::Serialize;
use std::io::Write;

/// One accepted move as written to stdout.
#[derive(Serialize)]
struct MoveLine<'a> {
    index: u32,
    #[serde(flatten)]
    command: &'a stroke_engine::MotionCommand,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("stroke-engine v{} starting...", env!("CARGO_PKG_VERSION"));

    let path = config::config_file_path(std::env::args().nth(1));
    let cfg = Config::load(&path);

    let kind = match PatternKind::from_name(&cfg.pattern) {
        Ok(kind) => kind,
        Err(e) => {
            let known: Vec<&str> = PatternKind::ALL.iter().map(|k| k.name()).collect();
            log::error!("{e}. Known patterns: {}", known.join(", "));
            std::process::exit(1);
        }
    };

    let clock = MonotonicClock::shared();
    let mut pattern = match cfg.name.as_deref() {
        Some(name) => match Pattern::with_name(kind, name, clock) {
            Ok(p) => p,
            Err(e) => {
                log::error!("Invalid pattern name: {e}");
                std::process::exit(1);
            }
        },
        None => Pattern::new(kind, clock),
    };

    let pattern_cfg = cfg.pattern_config();
    if let Err(e) = pattern_cfg.validate() {
        log::error!("Invalid configuration: {e}");
        std::process::exit(1);
    }
    pattern.configure(pattern_cfg);

    log::info!(
        "Pattern: {} (stroke {}, depth {}, cycle {}s, sensation {})",
        pattern.name(),
        pattern_cfg.stroke,
        pattern_cfg.depth,
        pattern_cfg.cycle_time,
        pattern_cfg.sensation
    );
    if cfg.strokes == 0 {
        log::info!("Running until interrupted");
    }

    let mut motion = Driver::new(pattern, cfg.strokes);
    let stdout = std::io::stdout();
    driver::run(&mut motion, cfg.poll_interval_ms, |index, command| {
        let line = MoveLine { index, command };
        match serde_json::to_string(&line) {
            Ok(json) => {
                let mut out = stdout.lock();
                if let Err(e) = writeln!(out, "{json}") {
                    log::warn!("Failed to write move {index}: {e}");
                }
            }
            Err(e) => log::warn!("Failed to encode move {index}: {e}"),
        }
        log::debug!("Move {index}: {command:?}");
    })
    .await;
}
