/// Knot: a five-phase cycle that feels like a knot passing through.
///
///   0  full out move at normal speed
///   1  70% of the way in, a bit slower
///   2  pause
///   3  rest of the way in, slow (sensation controlled)
///   4  pause
///
/// The phase is `index % 5`. A pause phase arms the delay gate and holds the
/// current position; the following index is skipped until the gate opens.
/// Larger |sensation| makes the final push slower.

use crate::motion::{MotionCommand, PatternConfig, cycle_pause_ms, stroke_scale, to_steps};
use crate::pattern::{StrokePattern, Tick};
use crate::scale::fscale;

/// Final push never goes slower than this.
const MIN_SLOW_SPEED: i32 = 50;
const PAUSE_OFFSET_MS: f32 = 550.0;
/// First push covers this many tenths of the stroke.
const PARTIAL_IN_TENTHS: i64 = 7;

/// One step of the knot cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnotPhase {
    Out,
    PartialIn,
    FirstPause,
    FinishIn,
    SecondPause,
}

impl KnotPhase {
    pub fn for_index(index: u32) -> Self {
        match index % 5 {
            0 => KnotPhase::Out,
            1 => KnotPhase::PartialIn,
            2 => KnotPhase::FirstPause,
            3 => KnotPhase::FinishIn,
            _ => KnotPhase::SecondPause,
        }
    }
}

#[derive(Debug)]
pub struct Knot {
    slow_speed: i32,
    last: Option<MotionCommand>,
}

impl Default for Knot {
    fn default() -> Self {
        Self { slow_speed: MIN_SLOW_SPEED, last: None }
    }
}

impl StrokePattern for Knot {
    fn configure(&mut self, config: &PatternConfig) {
        // |s| 0 -> 0.5x, 100 -> 0.05x
        let sensation_factor = fscale(0.0, 100.0, 0.5, 0.05, config.sensation.abs(), 0.0);
        let base_speed = config.stroke as f32 / config.half_time();
        let speed = to_steps(base_speed * sensation_factor * stroke_scale(config.stroke));
        self.slow_speed = speed.max(MIN_SLOW_SPEED);
        log::debug!("Knot: final push speed {}", self.slow_speed);
    }

    fn next_target(&mut self, index: u32, tick: Tick<'_>) -> MotionCommand {
        let config = tick.config;
        // Nothing moved yet: hold at the retracted end
        let held = self
            .last
            .unwrap_or_else(|| MotionCommand::move_to(config.retracted(), 0, 0));

        if tick.gate.is_pending() {
            return held.skipped();
        }

        let time = config.half_time();
        let stroke = config.stroke as f32;
        let command = match KnotPhase::for_index(index) {
            KnotPhase::Out => {
                let speed = to_steps(stroke / time);
                MotionCommand::move_to(config.retracted(), speed, to_steps(2.0 * speed as f32 / time))
            }
            KnotPhase::PartialIn => {
                let speed = to_steps(0.8 * stroke / time);
                let target = partial_in_target(config);
                MotionCommand::move_to(target, speed, to_steps(2.0 * speed as f32 / time))
            }
            KnotPhase::FinishIn => {
                let speed = self.slow_speed;
                MotionCommand::move_to(config.depth, speed, to_steps(2.3 * speed as f32 / time))
            }
            KnotPhase::FirstPause | KnotPhase::SecondPause => {
                let pause = cycle_pause_ms(config.cycle_time, PAUSE_OFFSET_MS);
                log::debug!("Knot: pausing {pause} ms at {}", held.target_position);
                tick.gate.arm(pause);
                held
            }
        };

        self.last = Some(command);
        command
    }
}

/// 70% of the way from `depth - stroke` to `depth`, in integer steps.
fn partial_in_target(config: &PatternConfig) -> i32 {
    let target = config.retracted() as i64 + config.stroke as i64 * PARTIAL_IN_TENTHS / 10;
    target.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
