/// Slammin': an aggressive in move, a pause at depth, then a slower way out.
///
/// Sensation controls the out move: positive slows it down, negative speeds it
/// up. The out speed scales with stroke length so long strokes do not crawl.
/// The pause after each in move grows with the square root of cycle time.

use crate::motion::{MotionCommand, PatternConfig, cycle_pause_ms, stroke_scale, to_steps};
use crate::pattern::{StrokePattern, Tick};
use crate::scale::fscale;

/// Out moves never go slower than this.
const MIN_OUT_SPEED: i32 = 100;
const PAUSE_OFFSET_MS: f32 = 125.0;

#[derive(Debug)]
pub struct Slammin {
    out_speed: i32,
    last: MotionCommand,
}

impl Default for Slammin {
    fn default() -> Self {
        Self { out_speed: MIN_OUT_SPEED, last: MotionCommand::move_to(0, 0, 0) }
    }
}

impl StrokePattern for Slammin {
    fn configure(&mut self, config: &PatternConfig) {
        // -100 -> 1.0, 0 -> 0.65, 100 -> 0.3
        let sensation_factor = fscale(-100.0, 100.0, 1.0, 0.3, config.sensation, 0.0);
        let base_speed = 1.5 * config.stroke as f32 / config.half_time();
        let speed = to_steps(base_speed * sensation_factor * stroke_scale(config.stroke));
        self.out_speed = speed.max(MIN_OUT_SPEED);
        log::debug!("Slammin': out speed {}", self.out_speed);
    }

    fn next_target(&mut self, index: u32, tick: Tick<'_>) -> MotionCommand {
        if tick.gate.is_pending() {
            return self.last.skipped();
        }

        let config = tick.config;
        let time = config.half_time();
        self.last = if index % 2 == 1 {
            let acceleration = to_steps(1.1 * self.out_speed as f32 / time);
            MotionCommand::move_to(config.retracted(), self.out_speed, acceleration)
        } else {
            let speed = to_steps(1.6 * config.stroke as f32 / time);
            let acceleration = to_steps(2.8 * speed as f32 / time);
            tick.gate.arm(cycle_pause_ms(config.cycle_time, PAUSE_OFFSET_MS));
            MotionCommand::move_to(config.depth, speed, acceleration)
        };
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::delay::DelayGate;

    fn config(stroke: i32, sensation: f32) -> PatternConfig {
        PatternConfig { stroke, depth: 1000, cycle_time: 2.0, sensation, ..Default::default() }
    }

    fn out_speed(cfg: &PatternConfig) -> i32 {
        let mut pattern = Slammin::default();
        pattern.configure(cfg);
        pattern.out_speed
    }

    #[test]
    fn in_move_is_fast_and_pauses() {
        let cfg = config(1000, 0.0);
        let clock = ManualClock::new();
        let mut gate = DelayGate::new(clock.shared());
        let mut pattern = Slammin::default();
        pattern.configure(&cfg);

        let slam = pattern.next_target(0, Tick { config: &cfg, gate: &mut gate });
        assert_eq!(slam, MotionCommand::move_to(1000, 1600, 4480));
        assert!(gate.is_pending());

        let waiting = pattern.next_target(1, Tick { config: &cfg, gate: &mut gate });
        assert!(waiting.skip);

        // sqrt(350000 * 2 + 60000) + 125 = 996 ms
        clock.advance(996);
        assert!(pattern.next_target(1, Tick { config: &cfg, gate: &mut gate }).skip);
        clock.advance(1);
        let out = pattern.next_target(1, Tick { config: &cfg, gate: &mut gate });
        assert!(!out.skip);
        assert_eq!(out.target_position, 0);
    }

    #[test]
    fn out_speed_follows_sensation() {
        // 1500 base * 0.65 * 1.5 stroke scale
        let neutral = out_speed(&config(1000, 0.0));
        assert!((1461..=1462).contains(&neutral), "{neutral}");
        assert!(out_speed(&config(1000, 100.0)) < neutral);
        assert!(out_speed(&config(1000, -100.0)) > neutral);
        assert_eq!(out_speed(&config(1000, -100.0)), 2250);
    }

    #[test]
    fn out_speed_has_a_floor() {
        assert_eq!(out_speed(&config(0, 0.0)), MIN_OUT_SPEED);
        assert_eq!(out_speed(&config(20, 100.0)), MIN_OUT_SPEED);
    }

    #[test]
    fn out_acceleration_tracks_out_speed() {
        let cfg = config(1000, -100.0);
        let clock = ManualClock::new();
        let mut gate = DelayGate::new(clock.shared());
        let mut pattern = Slammin::default();
        pattern.configure(&cfg);
        let out = pattern.next_target(1, Tick { config: &cfg, gate: &mut gate });
        assert_eq!(out.speed, 2250);
        assert_eq!(out.acceleration, 2475);
        assert!(!gate.is_pending(), "only in moves pause");
    }
}
