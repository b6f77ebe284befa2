/// Robo Stroke: sensation sets how much of each move is spent accelerating.
///
/// Neutral is Simple Stroke's 1/3. Positive sensation shortens the ramps down
/// to 5% of the move, close to constant speed and robotic. Negative lengthens
/// them up to 50%, a triangular profile.

use crate::motion::{MotionCommand, PatternConfig, to_steps};
use crate::pattern::{StrokePattern, Tick};
use crate::scale::fscale;

const NEUTRAL_RAMP: f32 = 1.0 / 3.0;
const SHORTEST_RAMP: f32 = 0.05;
const LONGEST_RAMP: f32 = 0.5;

#[derive(Debug)]
pub struct RoboStroke {
    /// Fraction of the half-stroke time spent accelerating.
    ramp: f32,
}

impl Default for RoboStroke {
    fn default() -> Self {
        Self { ramp: NEUTRAL_RAMP }
    }
}

impl StrokePattern for RoboStroke {
    fn configure(&mut self, config: &PatternConfig) {
        let s = config.sensation;
        self.ramp = if s >= 0.0 {
            fscale(0.0, 100.0, NEUTRAL_RAMP, SHORTEST_RAMP, s, 0.0)
        } else {
            fscale(0.0, 100.0, NEUTRAL_RAMP, LONGEST_RAMP, -s, 0.0)
        };
        log::debug!("Robo Stroke: sensation {s:.0} -> ramp fraction {:.6}", self.ramp);
    }

    fn next_target(&mut self, index: u32, tick: Tick<'_>) -> MotionCommand {
        let config = tick.config;
        let time = config.half_time();
        let speed = config.stroke as f32 / ((1.0 - self.ramp) * time);
        let acceleration = speed / (self.ramp * time);
        let target = if index % 2 == 1 { config.retracted() } else { config.depth };
        MotionCommand::move_to(target, to_steps(speed), to_steps(acceleration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::delay::DelayGate;

    fn run(sensation: f32, index: u32) -> MotionCommand {
        let config = PatternConfig {
            stroke: 1000,
            depth: 1000,
            cycle_time: 2.0,
            sensation,
            ..Default::default()
        };
        let mut gate = DelayGate::new(ManualClock::new().shared());
        let mut pattern = RoboStroke::default();
        pattern.configure(&config);
        pattern.next_target(index, Tick { config: &config, gate: &mut gate })
    }

    #[test]
    fn neutral_is_a_thirds_trapezoid() {
        assert_eq!(run(0.0, 0), MotionCommand::move_to(1000, 1500, 4500));
        assert_eq!(run(0.0, 1), MotionCommand::move_to(0, 1500, 4500));
    }

    #[test]
    fn ramp_fraction_bounds() {
        let mut pattern = RoboStroke::default();
        let mut config = PatternConfig::default();
        for (s, expected) in [(100.0, 0.05), (-100.0, 0.5), (0.0, 1.0 / 3.0)] {
            config.sensation = s;
            pattern.configure(&config);
            assert!((pattern.ramp - expected).abs() < 1e-6, "s={s}");
        }
    }

    #[test]
    fn positive_sensation_approaches_constant_speed() {
        let robotic = run(100.0, 0);
        // 1000 / (0.95 * 1.0) and a very steep ramp
        assert_eq!(robotic.speed, 1052);
        assert!(robotic.acceleration > 20_000);

        let triangle = run(-100.0, 0);
        // 1000 / (0.5 * 1.0), reached at half time
        assert_eq!(triangle.speed, 2000);
        assert_eq!(triangle.acceleration, 4000);
    }
}
