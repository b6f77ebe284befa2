/// Stroke pattern generator for linear actuators.
///
/// A motion controller picks a pattern, configures it in actuator-native units
/// and calls `next_target` once per half stroke. Each call returns the target
/// position, speed and acceleration of the next move, or a `skip` while the
/// pattern is pausing.
///
/// ```text
/// let mut pattern = Pattern::new(PatternKind::SimpleStroke, MonotonicClock::shared());
/// pattern.set_stroke(1000);
/// pattern.set_depth(1000);
/// pattern.set_cycle_time(2.0);
/// let cmd = pattern.next_target(0); // in: 1000 @ 1500/s, 4500/s²
/// ```
///
/// Speed and acceleration limits are stored but never applied; clamping is
/// the controller's job.

pub use clock::{Clock, ManualClock, MonotonicClock, SharedClock};
pub use delay::DelayGate;
pub use motion::{MotionCommand, PatternConfig, SpeedLimits};
pub use pattern::{Pattern, PatternError, PatternKind, PatternName, StrokePattern, Tick};
pub use scale::{fscale, map_range};

pub mod clock;
pub mod config;
pub mod deeper;
pub mod delay;
pub mod driver;
pub mod half_n_half;
pub mod insist;
pub mod knot;
pub mod motion;
pub mod pattern;
pub mod robo_stroke;
pub mod scale;
pub mod simple_stroke;
pub mod slammin;
pub mod stop_n_go;
pub mod teasing_pounding;
