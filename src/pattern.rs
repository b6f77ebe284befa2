/// Pattern contract and the handle motion controllers drive.
///
/// Each variant is a `StrokePattern`: it owns its own progress state, derives
/// timing from a `PatternConfig` in `configure`, and answers `next_target`.
/// `Pattern` wraps one variant together with its configuration, its delay
/// gate and its name, and exposes the setter interface:
///
///   set_cycle_time / set_stroke / set_depth / set_sensation / set_speed_limit
///   next_target(index) -> MotionCommand
///
/// Even indices move in (toward `depth`), odd indices move out (toward
/// `depth - stroke`). A command with `skip` set did not consume its index.

use crate::clock::SharedClock;
use crate::deeper::Deeper;
use crate::delay::DelayGate;
use crate::half_n_half::HalfNHalf;
use crate::insist::Insist;
use crate::knot::Knot;
use crate::motion::{MotionCommand, PatternConfig, SpeedLimits};
use crate::robo_stroke::RoboStroke;
use crate::simple_stroke::SimpleStroke;
use crate::slammin::Slammin;
use crate::stop_n_go::StopNGo;
use crate::teasing_pounding::TeasingPounding;

/// Longest accepted pattern name, in bytes.
pub const MAX_NAME_LEN: usize = 63;

/// What a variant sees on each query.
pub struct Tick<'a> {
    pub config: &'a PatternConfig,
    pub gate: &'a mut DelayGate,
}

/// Behavior shared by all variants.
pub trait StrokePattern {
    /// Recompute anything derived from the configuration. Called after every
    /// configuration change; must not reset stroke progress.
    fn configure(&mut self, _config: &PatternConfig) {}

    /// Produce the move for half-stroke `index`.
    fn next_target(&mut self, index: u32, tick: Tick<'_>) -> MotionCommand;
}

/// Errors from building or validating a pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternError {
    EmptyName,
    NameTooLong { len: usize, max: usize },
    UnknownPattern(String),
    InvalidCycleTime(f32),
    NegativeStroke(i32),
    DepthShallowerThanStroke { depth: i32, stroke: i32 },
    InvalidSensation(f32),
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternError::EmptyName => f.write_str("pattern name is empty"),
            PatternError::NameTooLong { len, max } => {
                write!(f, "pattern name is {len} bytes, at most {max} allowed")
            }
            PatternError::UnknownPattern(name) => write!(f, "unknown pattern: {name:?}"),
            PatternError::InvalidCycleTime(t) => {
                write!(f, "cycle time must be a positive number of seconds, got {t}")
            }
            PatternError::NegativeStroke(stroke) => write!(f, "stroke is negative: {stroke}"),
            PatternError::DepthShallowerThanStroke { depth, stroke } => {
                write!(f, "depth {depth} is shallower than stroke {stroke}")
            }
            PatternError::InvalidSensation(s) => write!(f, "sensation is not finite: {s}"),
        }
    }
}

impl std::error::Error for PatternError {}

/// The fixed set of available patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    SimpleStroke,
    TeasingPounding,
    RoboStroke,
    HalfNHalf,
    Deeper,
    StopNGo,
    Insist,
    Slammin,
    Knot,
}

impl PatternKind {
    /// All patterns, in menu order.
    pub const ALL: [PatternKind; 9] = [
        PatternKind::SimpleStroke,
        PatternKind::TeasingPounding,
        PatternKind::RoboStroke,
        PatternKind::HalfNHalf,
        PatternKind::Deeper,
        PatternKind::StopNGo,
        PatternKind::Insist,
        PatternKind::Slammin,
        PatternKind::Knot,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PatternKind::SimpleStroke => "Simple Stroke",
            PatternKind::TeasingPounding => "Teasing or Pounding",
            PatternKind::RoboStroke => "Robo Stroke",
            PatternKind::HalfNHalf => "Half'n'Half",
            PatternKind::Deeper => "Deeper",
            PatternKind::StopNGo => "Stop'n'Go",
            PatternKind::Insist => "Insist",
            PatternKind::Slammin => "Slammin'",
            PatternKind::Knot => "Knot",
        }
    }

    /// Look a pattern up by display name. Case-insensitive, surrounding
    /// whitespace ignored.
    pub fn from_name(name: &str) -> Result<Self, PatternError> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PatternError::UnknownPattern(wanted.to_string()))
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Owned pattern label, 1 to `MAX_NAME_LEN` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternName(String);

impl PatternName {
    pub fn new(name: &str) -> Result<Self, PatternError> {
        if name.is_empty() {
            return Err(PatternError::EmptyName);
        }
        if name.len() > MAX_NAME_LEN {
            return Err(PatternError::NameTooLong { len: name.len(), max: MAX_NAME_LEN });
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PatternName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

enum Variant {
    SimpleStroke(SimpleStroke),
    TeasingPounding(TeasingPounding),
    RoboStroke(RoboStroke),
    HalfNHalf(HalfNHalf),
    Deeper(Deeper),
    StopNGo(StopNGo),
    Insist(Insist),
    Slammin(Slammin),
    Knot(Knot),
}

impl Variant {
    fn new(kind: PatternKind) -> Self {
        match kind {
            PatternKind::SimpleStroke => Variant::SimpleStroke(SimpleStroke::default()),
            PatternKind::TeasingPounding => Variant::TeasingPounding(TeasingPounding::default()),
            PatternKind::RoboStroke => Variant::RoboStroke(RoboStroke::default()),
            PatternKind::HalfNHalf => Variant::HalfNHalf(HalfNHalf::default()),
            PatternKind::Deeper => Variant::Deeper(Deeper::default()),
            PatternKind::StopNGo => Variant::StopNGo(StopNGo::default()),
            PatternKind::Insist => Variant::Insist(Insist::default()),
            PatternKind::Slammin => Variant::Slammin(Slammin::default()),
            PatternKind::Knot => Variant::Knot(Knot::default()),
        }
    }

    fn as_pattern(&mut self) -> &mut dyn StrokePattern {
        match self {
            Variant::SimpleStroke(p) => p,
            Variant::TeasingPounding(p) => p,
            Variant::RoboStroke(p) => p,
            Variant::HalfNHalf(p) => p,
            Variant::Deeper(p) => p,
            Variant::StopNGo(p) => p,
            Variant::Insist(p) => p,
            Variant::Slammin(p) => p,
            Variant::Knot(p) => p,
        }
    }
}

/// A configured pattern instance. Drive it from a single caller.
pub struct Pattern {
    kind: PatternKind,
    name: PatternName,
    config: PatternConfig,
    gate: DelayGate,
    variant: Variant,
}

impl Pattern {
    /// Build `kind` with its display name and a default configuration.
    pub fn new(kind: PatternKind, clock: SharedClock) -> Self {
        let name = PatternName(kind.name().to_string());
        Self::build(kind, name, clock)
    }

    /// Build `kind` under a custom label.
    pub fn with_name(kind: PatternKind, name: &str, clock: SharedClock) -> Result<Self, PatternError> {
        Ok(Self::build(kind, PatternName::new(name)?, clock))
    }

    fn build(kind: PatternKind, name: PatternName, clock: SharedClock) -> Self {
        let mut pattern = Self {
            kind,
            name,
            config: PatternConfig::default(),
            gate: DelayGate::new(clock),
            variant: Variant::new(kind),
        };
        pattern.reconfigure();
        pattern
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Whether a pause is currently holding the pattern back.
    pub fn is_paused(&self) -> bool {
        self.gate.is_pending()
    }

    /// Milliseconds left on the current pause.
    pub fn pause_remaining_ms(&self) -> u64 {
        self.gate.remaining_ms()
    }

    /// Replace the whole configuration at once.
    pub fn configure(&mut self, config: PatternConfig) {
        self.config = config;
        self.reconfigure();
    }

    /// Seconds for one full in-and-out cycle.
    pub fn set_cycle_time(&mut self, seconds: f32) {
        self.config.cycle_time = seconds;
        self.reconfigure();
    }

    pub fn set_stroke(&mut self, units: i32) {
        self.config.stroke = units;
        self.reconfigure();
    }

    pub fn set_depth(&mut self, units: i32) {
        self.config.depth = units;
        self.reconfigure();
    }

    /// -100..=100, neutral at 0. Not clamped.
    pub fn set_sensation(&mut self, value: f32) {
        self.config.sensation = value;
        self.reconfigure();
    }

    /// Record the machine limits. Commands are not clamped against them.
    pub fn set_speed_limit(&mut self, max_speed: u32, max_acceleration: u32, steps_per_unit: u32) {
        self.config.limits = SpeedLimits { max_speed, max_acceleration, steps_per_unit };
    }

    /// Advance the pattern and return the move for half-stroke `index`.
    pub fn next_target(&mut self, index: u32) -> MotionCommand {
        let tick = Tick { config: &self.config, gate: &mut self.gate };
        self.variant.as_pattern().next_target(index, tick)
    }

    fn reconfigure(&mut self) {
        self.variant.as_pattern().configure(&self.config);
    }
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pattern")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("config", &self.config)
            .field("gate", &self.gate)
            .finish()
    }
}
