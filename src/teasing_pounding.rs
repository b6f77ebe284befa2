/// Teasing or Pounding: sensation shifts time between the in and the out move
/// while the full cycle keeps its length.
///
/// Positive sensation makes the in move up to 5x faster (pounding), negative
/// makes the out move faster (teasing).

use crate::motion::{MotionCommand, PatternConfig, trapezoid};
use crate::pattern::{StrokePattern, Tick};
use crate::scale::fscale;

/// Time budget of the in and the out move, derived from cycle time and
/// sensation. Shared with Half'n'Half.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitTiming {
    pub time_in: f32,
    pub time_out: f32,
}

impl Default for SplitTiming {
    fn default() -> Self {
        Self { time_in: 1.0, time_out: 1.0 }
    }
}

impl SplitTiming {
    pub fn from_config(config: &PatternConfig) -> Self {
        let ratio = fscale(0.0, 100.0, 1.0, 5.0, config.sensation.abs(), 0.0);
        let fast = config.half_time() / ratio;
        let slow = config.cycle_time - fast;
        let timing = if config.sensation > 0.0 {
            Self { time_in: fast, time_out: slow }
        } else {
            Self { time_in: slow, time_out: fast }
        };
        log::debug!("Split timing: in {:.3}s, out {:.3}s", timing.time_in, timing.time_out);
        timing
    }

    /// Speed and acceleration for a move of `distance` in the given direction.
    pub fn profile(&self, distance: f32, outward: bool) -> (i32, i32) {
        let time = if outward { self.time_out } else { self.time_in };
        trapezoid(distance, time)
    }
}

#[derive(Debug, Default)]
pub struct TeasingPounding {
    timing: SplitTiming,
}

impl StrokePattern for TeasingPounding {
    fn configure(&mut self, config: &PatternConfig) {
        self.timing = SplitTiming::from_config(config);
    }

    fn next_target(&mut self, index: u32, tick: Tick<'_>) -> MotionCommand {
        let config = tick.config;
        let outward = index % 2 == 1;
        let (speed, acceleration) = self.timing.profile(config.stroke as f32, outward);
        let target = if outward { config.retracted() } else { config.depth };
        MotionCommand::move_to(target, speed, acceleration)
    }
}
