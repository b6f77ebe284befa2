/// Simple Stroke: symmetric trapezoid, in and out take half a cycle each.
/// Sensation has no effect.

use crate::motion::{MotionCommand, trapezoid};
use crate::pattern::{StrokePattern, Tick};

#[derive(Debug, Default)]
pub struct SimpleStroke;

impl StrokePattern for SimpleStroke {
    fn next_target(&mut self, index: u32, tick: Tick<'_>) -> MotionCommand {
        let config = tick.config;
        let (speed, acceleration) = trapezoid(config.stroke as f32, config.half_time());
        let target = if index % 2 == 1 { config.retracted() } else { config.depth };
        MotionCommand::move_to(target, speed, acceleration)
    }
}
