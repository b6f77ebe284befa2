/// Motion data shared by every pattern: the command a pattern emits, the
/// configuration it reads, and the trapezoid arithmetic most patterns use.

use serde::Serialize;

use crate::pattern::PatternError;

/// One move for the actuator, in actuator-native units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MotionCommand {
    /// Absolute target position.
    pub target_position: i32,
    /// Peak speed in units/s.
    pub speed: i32,
    /// Acceleration and deceleration in units/s².
    pub acceleration: i32,
    /// No valid move this tick. Re-poll with the same index.
    pub skip: bool,
}

impl MotionCommand {
    pub fn move_to(target_position: i32, speed: i32, acceleration: i32) -> Self {
        Self { target_position, speed, acceleration, skip: false }
    }

    /// Same command, flagged as "nothing to do yet".
    pub fn skipped(self) -> Self {
        Self { skip: true, ..self }
    }
}

/// Machine limits handed down by the motion controller. Stored, never applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpeedLimits {
    pub max_speed: u32,
    pub max_acceleration: u32,
    pub steps_per_unit: u32,
}

impl SpeedLimits {
    /// True if `command` asks for more than these limits allow. A zero limit
    /// means "unknown" and never trips.
    pub fn exceeded_by(&self, command: &MotionCommand) -> bool {
        let over = |value: i32, limit: u32| limit > 0 && value > 0 && value as u32 > limit;
        over(command.speed, self.max_speed) || over(command.acceleration, self.max_acceleration)
    }
}

/// Everything a pattern reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternConfig {
    /// Maximum throw of one excursion.
    pub stroke: i32,
    /// Innermost position. `depth - stroke` is the outermost.
    pub depth: i32,
    /// Seconds for one full in-and-out cycle.
    pub cycle_time: f32,
    /// -100..=100, 0 is neutral.
    pub sensation: f32,
    pub limits: SpeedLimits,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            stroke: 0,
            depth: 0,
            cycle_time: 1.0,
            sensation: 0.0,
            limits: SpeedLimits::default(),
        }
    }
}

impl PatternConfig {
    /// Outermost position of the stroke.
    pub fn retracted(&self) -> i32 {
        self.depth.saturating_sub(self.stroke)
    }

    /// Half of the cycle time, the time budget of one in or out move.
    pub fn half_time(&self) -> f32 {
        0.5 * self.cycle_time
    }

    /// Check the preconditions patterns rely on. Patterns never call this
    /// themselves; a configuration that fails here yields saturated speeds or
    /// positions outside `[depth - stroke, depth]`.
    pub fn validate(&self) -> Result<(), PatternError> {
        if !self.cycle_time.is_finite() || self.cycle_time <= 0.0 {
            return Err(PatternError::InvalidCycleTime(self.cycle_time));
        }
        if self.stroke < 0 {
            return Err(PatternError::NegativeStroke(self.stroke));
        }
        if self.depth < self.stroke {
            return Err(PatternError::DepthShallowerThanStroke {
                depth: self.depth,
                stroke: self.stroke,
            });
        }
        if !self.sensation.is_finite() {
            return Err(PatternError::InvalidSensation(self.sensation));
        }
        Ok(())
    }
}

/// Truncate toward zero. Infinities saturate at the `i32` bounds and NaN
/// becomes 0, which is what a zero cycle time turns into.
pub fn to_steps(value: f32) -> i32 {
    value as i32
}

/// Peak speed and acceleration of a move spending 1/3 of `time` accelerating,
/// 1/3 coasting and 1/3 decelerating. The acceleration is derived from the
/// already truncated speed.
pub fn trapezoid(distance: f32, time: f32) -> (i32, i32) {
    let speed = to_steps(1.5 * distance / time);
    let acceleration = to_steps(3.0 * speed as f32 / time);
    (speed, acceleration)
}

/// `sqrt(stroke / 1000) + 0.5`: keeps long strokes from crawling when a
/// pattern slows a move down. 1.0 for an empty stroke.
pub(crate) fn stroke_scale(stroke: i32) -> f32 {
    if stroke > 0 {
        (stroke as f32 / 1000.0).sqrt() + 0.5
    } else {
        1.0
    }
}

/// Pause used by the gated patterns, grows with the square root of the
/// cycle time.
pub(crate) fn cycle_pause_ms(cycle_time: f32, offset_ms: f32) -> u64 {
    let ms = (350_000.0 * cycle_time + 60_000.0).sqrt() + offset_ms;
    to_steps(ms).max(0) as u64
}
