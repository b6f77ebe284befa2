/// Reference motion controller: polls a pattern once per half stroke.
///
/// A skipped tick keeps its index and is re-polled after `poll_interval_ms`;
/// an accepted command advances the index and the driver waits for the move
/// to finish before asking again. Limits are checked and logged, not applied.

use tokio::time::{sleep, Duration};

use crate::motion::MotionCommand;
use crate::pattern::Pattern;

/// Outcome of one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// A move was accepted; wait `duration_ms` for it to complete.
    Move { index: u32, command: MotionCommand, duration_ms: u64 },
    /// The pattern is pausing; re-poll the same index later.
    Wait { index: u32 },
    /// The configured number of half strokes has run.
    Done,
}

pub struct Driver {
    pattern: Pattern,
    index: u32,
    /// 0 = unlimited
    strokes: u32,
    position: i32,
    skipped: u32,
}

impl Driver {
    /// The actuator is assumed to start fully retracted.
    pub fn new(pattern: Pattern, strokes: u32) -> Self {
        let position = pattern.config().retracted();
        Self { pattern, index: 0, strokes, position, skipped: 0 }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn pattern_mut(&mut self) -> &mut Pattern {
        &mut self.pattern
    }

    /// Next index to be polled.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Skipped ticks since the last accepted move.
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    pub fn poll(&mut self) -> Poll {
        if self.strokes > 0 && self.index >= self.strokes {
            return Poll::Done;
        }

        let index = self.index;
        let command = self.pattern.next_target(index);
        if command.skip {
            if self.skipped == 0 && self.pattern.is_paused() {
                log::debug!(
                    "{}: paused at index {index} ({} ms left)",
                    self.pattern.name(),
                    self.pattern.pause_remaining_ms()
                );
            }
            self.skipped += 1;
            return Poll::Wait { index };
        }

        if self.pattern.config().limits.exceeded_by(&command) {
            log::warn!(
                "{}: index {index} asks for {} units/s, {} units/s² beyond machine limits {:?}",
                self.pattern.name(),
                command.speed,
                command.acceleration,
                self.pattern.config().limits
            );
        }

        let distance = (command.target_position - self.position).unsigned_abs();
        let duration_ms = estimate_move_ms(distance, command.speed, command.acceleration);
        self.position = command.target_position;
        self.index = self.index.wrapping_add(1);
        self.skipped = 0;
        Poll::Move { index, command, duration_ms }
    }
}

/// Time for a trapezoidal move of `distance` at peak `speed` with symmetric
/// `acceleration`, falling back to a triangle when the peak is never reached.
pub fn estimate_move_ms(distance: u32, speed: i32, acceleration: i32) -> u64 {
    if distance == 0 || speed <= 0 || acceleration <= 0 {
        return 0;
    }
    let d = distance as f64;
    let v = speed as f64;
    let a = acceleration as f64;
    // Distance spent ramping up and down to `v`
    let ramps = v * v / a;
    let seconds = if d >= ramps {
        d / v + v / a
    } else {
        2.0 * (d / a).sqrt()
    };
    (seconds * 1000.0).round() as u64
}

/// Run the driver until `Poll::Done`, handing every accepted move to `emit`.
pub async fn run<F>(driver: &mut Driver, poll_interval_ms: u64, mut emit: F)
where
    F: FnMut(u32, &MotionCommand),
{
    loop {
        match driver.poll() {
            Poll::Move { index, command, duration_ms } => {
                emit(index, &command);
                sleep(Duration::from_millis(duration_ms)).await;
            }
            Poll::Wait { .. } => {
                sleep(Duration::from_millis(poll_interval_ms)).await;
            }
            Poll::Done => {
                log::info!("{}: {} half strokes done", driver.pattern().name(), driver.index());
                return;
            }
        }
    }
}
