use crate::error::{Error, Result};

/// Rate capture files are recorded at unless configured otherwise.
pub const DEFAULT_TARGET_RATE: f64 = 30.0;

/// Slack for floating point error, so that steps adding up to a whole number
/// of intervals emit exactly that many ticks however they were chunked.
const TICK_EPSILON: f64 = 1e-9;

/// Highest accepted target rate. Keeps the tick interval well above the
/// resolution of the accumulator.
pub const MAX_TARGET_RATE: f64 = 1_000_000.0;

/// Accumulate `dt` seconds on top of `accumulated` and count whole `interval`s.
/// The signed remainder is kept, not zeroed, so the phase survives irregular polling.
/// The count saturates at `u32::MAX`.
pub fn step(accumulated: f64, dt: f64, interval: f64) -> (f64, u32) {
    let total = accumulated + dt;
    let whole = ((total + TICK_EPSILON) / interval).floor().max(0.0);
    if whole < 1.0 {
        return (total, 0);
    }
    let ticks = whole.min(u32::MAX as f64) as u32;
    (total - whole * interval, ticks)
}

/// A rate is usable when it is finite, positive and at most [`MAX_TARGET_RATE`].
pub fn validate_target_rate(rate: f64) -> Result<()> {
    if !rate.is_finite() || rate <= 0.0 || rate > MAX_TARGET_RATE {
        return Err(Error::InvalidTargetRate { rate });
    }
    Ok(())
}

/// Fixed-rate ticker, independent of how often the host calls it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackClock {
    target_rate: f64,
    interval: f64,
    accumulated: f64,
}

impl PlaybackClock {
    pub fn new(target_rate: f64) -> Result<Self> {
        validate_target_rate(target_rate)?;
        Ok(PlaybackClock {
            target_rate,
            interval: 1.0 / target_rate,
            accumulated: 0.0,
        })
    }

    /// Time advanced by `dt` seconds; returns how many ticks are due.
    /// Negative or non-finite steps are ignored.
    pub fn advance(&mut self, dt: f64) -> u32 {
        if !dt.is_finite() || dt < 0.0 {
            return 0;
        }
        let (accumulated, ticks) = step(self.accumulated, dt, self.interval);
        self.accumulated = accumulated;
        ticks
    }

    pub fn target_rate(&self) -> f64 {
        self.target_rate
    }

    /// Seconds between two ticks.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Seconds accumulated since the last tick.
    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        PlaybackClock {
            target_rate: DEFAULT_TARGET_RATE,
            interval: 1.0 / DEFAULT_TARGET_RATE,
            accumulated: 0.0,
        }
    }
}
