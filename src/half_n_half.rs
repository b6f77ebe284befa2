/// Half'n'Half: Teasing or Pounding timing, but every other in/out pair only
/// travels half the stroke. The first pair is the short one.
///
/// Every stroke keeps the same time budget, so the half strokes are also half
/// as fast.

use crate::motion::{MotionCommand, PatternConfig};
use crate::pattern::{StrokePattern, Tick};
use crate::teasing_pounding::SplitTiming;

#[derive(Debug)]
pub struct HalfNHalf {
    timing: SplitTiming,
    half: bool,
}

impl Default for HalfNHalf {
    fn default() -> Self {
        Self { timing: SplitTiming::default(), half: true }
    }
}

impl StrokePattern for HalfNHalf {
    fn configure(&mut self, config: &PatternConfig) {
        self.timing = SplitTiming::from_config(config);
    }

    fn next_target(&mut self, index: u32, tick: Tick<'_>) -> MotionCommand {
        let config = tick.config;
        if index == 0 {
            // Fresh start, begin gentle
            self.half = true;
        }

        let length = if self.half { config.stroke / 2 } else { config.stroke };
        let outward = index % 2 == 1;
        let (speed, acceleration) = self.timing.profile(length as f32, outward);

        if outward {
            self.half = !self.half;
            MotionCommand::move_to(config.retracted(), speed, acceleration)
        } else {
            MotionCommand::move_to(config.retracted() + length, speed, acceleration)
        }
    }
}
