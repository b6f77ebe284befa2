/// Insist: sensation shortens the stroke but keeps the speed of a full one,
/// which turns into a vibrating motion at high values. Positive sensation
/// keeps the short stroke at the front (near `depth`), negative at the back.

use crate::motion::{MotionCommand, PatternConfig, to_steps, trapezoid};
use crate::pattern::{StrokePattern, Tick};

#[derive(Debug)]
pub struct Insist {
    speed: i32,
    acceleration: i32,
    /// Length actually travelled.
    real_stroke: i32,
    fraction: f32,
    in_front: bool,
}

impl Default for Insist {
    fn default() -> Self {
        Self { speed: 0, acceleration: 0, real_stroke: 0, fraction: 1.0, in_front: false }
    }
}

impl StrokePattern for Insist {
    fn configure(&mut self, config: &PatternConfig) {
        let s = config.sensation;
        self.fraction = (100.0 - s.abs()) / 100.0;
        self.in_front = s > 0.0;

        // Speed and acceleration of the full stroke, whatever the fraction
        (self.speed, self.acceleration) = trapezoid(config.stroke as f32, config.half_time());
        self.real_stroke = to_steps(config.stroke as f32 * self.fraction);
        log::debug!(
            "Insist: stroke {} of {}, speed {}, acceleration {}",
            self.real_stroke,
            config.stroke,
            self.speed,
            self.acceleration
        );
    }

    fn next_target(&mut self, index: u32, tick: Tick<'_>) -> MotionCommand {
        let config = tick.config;
        let outward = index % 2 == 1;
        let target = match (self.in_front, outward) {
            (true, true) => config.depth - self.real_stroke,
            (true, false) => config.depth,
            (false, true) => config.retracted(),
            (false, false) => config.retracted() + self.real_stroke,
        };
        MotionCommand::move_to(target, self.speed, self.acceleration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::delay::DelayGate;

    fn moves(sensation: f32) -> (MotionCommand, MotionCommand) {
        let cfg = PatternConfig {
            stroke: 1000,
            depth: 1500,
            cycle_time: 2.0,
            sensation,
            ..Default::default()
        };
        let mut gate = DelayGate::new(ManualClock::new().shared());
        let mut pattern = Insist::default();
        pattern.configure(&cfg);
        let inward = pattern.next_target(0, Tick { config: &cfg, gate: &mut gate });
        let outward = pattern.next_target(1, Tick { config: &cfg, gate: &mut gate });
        (inward, outward)
    }

    #[test]
    fn neutral_is_a_full_stroke() {
        let (inward, outward) = moves(0.0);
        assert_eq!(inward, MotionCommand::move_to(1500, 1500, 4500));
        assert_eq!(outward, MotionCommand::move_to(500, 1500, 4500));
    }

    #[test]
    fn positive_sensation_stays_in_front() {
        let (inward, outward) = moves(75.0);
        assert_eq!(inward.target_position, 1500);
        assert_eq!(outward.target_position, 1250);
        assert_eq!(inward.speed, 1500);
        assert_eq!(inward.acceleration, 4500);
    }

    #[test]
    fn negative_sensation_stays_at_the_back() {
        let (inward, outward) = moves(-75.0);
        assert_eq!(inward.target_position, 750);
        assert_eq!(outward.target_position, 500);
        assert_eq!(outward.speed, 1500);
    }

    #[test]
    fn full_sensation_collapses_the_stroke() {
        let (inward, outward) = moves(-100.0);
        assert_eq!(inward.target_position, outward.target_position);
        assert_eq!(inward, MotionCommand::move_to(500, 1500, 4500));
    }

    #[test]
    fn speed_and_acceleration_ignore_sensation() {
        let cfg = PatternConfig { stroke: 1000, depth: 1000, cycle_time: 2.0, ..Default::default() };
        let mut gate = DelayGate::new(ManualClock::new().shared());
        for sensation in [-100.0, -75.0, 0.0, 75.0, 100.0] {
            let cfg = PatternConfig { sensation, ..cfg };
            let mut pattern = Insist::default();
            pattern.configure(&cfg);
            for index in 0..2 {
                let cmd = pattern.next_target(index, Tick { config: &cfg, gate: &mut gate });
                assert_eq!((cmd.speed, cmd.acceleration), (1500, 4500), "sensation {sensation}");
            }
        }
    }
}
