/// Deeper: insertion depth ramps up stroke by stroke until it reaches the full
/// stroke, then starts over. Sensation sets how many strokes a ramp takes.

use crate::motion::{MotionCommand, PatternConfig, trapezoid};
use crate::pattern::{StrokePattern, Tick};
use crate::scale::map_range;

#[derive(Debug)]
pub struct Deeper {
    strokes_per_ramp: i32,
}

impl Default for Deeper {
    fn default() -> Self {
        Self { strokes_per_ramp: 11 }
    }
}

impl Deeper {
    /// -100 -> 2 strokes, 0 -> 11, 100 -> 32. Never below 1.
    fn ramp_length(sensation: f32) -> i32 {
        let n = if sensation < 0.0 {
            map_range(sensation, -100, 0, 2, 11)
        } else {
            map_range(sensation, 0, 100, 11, 32)
        };
        n.clamp(1, i32::MAX as i64) as i32
    }
}

impl StrokePattern for Deeper {
    fn configure(&mut self, config: &PatternConfig) {
        self.strokes_per_ramp = Self::ramp_length(config.sensation);
        log::debug!("Deeper: {} strokes per ramp", self.strokes_per_ramp);
    }

    fn next_target(&mut self, index: u32, tick: Tick<'_>) -> MotionCommand {
        let config = tick.config;
        let n = self.strokes_per_ramp;
        let slope = config.stroke / n;
        // Two half-strokes per stroke, position 1..=n within the ramp
        let position = ((index / 2) % n as u32) as i32 + 1;
        // Jumps if sensation changes mid-ramp
        let amplitude = slope * position;

        let (speed, acceleration) = trapezoid(amplitude as f32, config.half_time());
        let target = if index % 2 == 1 {
            config.retracted()
        } else {
            config.retracted() + amplitude
        };
        MotionCommand::move_to(target, speed, acceleration)
    }
}
