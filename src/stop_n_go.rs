/// Stop'n'Go: series of strokes separated by pauses.
///
/// Series length walks 1, 2, 3, 4, 5, 4, 3, 2, 1, 2, ... Sensation sets the
/// pause between series: 10 s at -100, 100 ms at 100.

use crate::motion::{MotionCommand, PatternConfig, trapezoid};
use crate::pattern::{StrokePattern, Tick};
use crate::scale::map_range;

const MAX_SERIES: u32 = 5;

#[derive(Debug)]
pub struct StopNGo {
    pause_ms: u64,
    /// Strokes in the current series.
    series: u32,
    /// Inward strokes done in the current series.
    done: u32,
    counting_up: bool,
    last: MotionCommand,
}

impl Default for StopNGo {
    fn default() -> Self {
        Self {
            pause_ms: 5050,
            series: 1,
            done: 0,
            counting_up: true,
            last: MotionCommand::move_to(0, 0, 0),
        }
    }
}

impl StopNGo {
    fn pause_for(sensation: f32) -> u64 {
        map_range(sensation, -100, 100, 10_000, 100).max(0) as u64
    }

    /// Length of the series currently running.
    pub fn series_length(&self) -> u32 {
        self.series
    }

    fn finish_series(&mut self) {
        self.done = 0;
        if self.series >= MAX_SERIES {
            self.counting_up = false;
        }
        if self.series <= 1 {
            self.counting_up = true;
        }
        if self.counting_up {
            self.series += 1;
        } else {
            self.series -= 1;
        }
    }
}

impl StrokePattern for StopNGo {
    fn configure(&mut self, config: &PatternConfig) {
        self.pause_ms = Self::pause_for(config.sensation);
        log::debug!("Stop'n'Go: {} ms between series", self.pause_ms);
    }

    fn next_target(&mut self, index: u32, tick: Tick<'_>) -> MotionCommand {
        if tick.gate.is_pending() {
            return self.last.skipped();
        }

        let config = tick.config;
        let (speed, acceleration) = trapezoid(config.stroke as f32, config.half_time());

        let target = if index % 2 == 1 {
            if self.done >= self.series {
                log::debug!("Stop'n'Go: series of {} done, pausing {} ms", self.series, self.pause_ms);
                self.finish_series();
                tick.gate.arm(self.pause_ms);
            }
            config.retracted()
        } else {
            self.done += 1;
            config.depth
        };

        self.last = MotionCommand::move_to(target, speed, acceleration);
        self.last
    }
}
