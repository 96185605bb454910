/// Strictly increasing timestamp source
///
/// Hands out the current value, then moves forward by a random 1..=100 step.

use crate::protocol::EPOCH_TIMESTAMP;
use crate::random::RandomSource;

pub const MIN_TICK_INCREMENT: i64 = 1;
pub const MAX_TICK_INCREMENT: i64 = 100;

#[derive(Debug, Clone)]
pub struct TimestampSequencer {
    current: u64,
}

impl TimestampSequencer {
    pub fn new() -> Self {
        Self::starting_at(EPOCH_TIMESTAMP)
    }

    pub fn starting_at(epoch: u64) -> Self {
        TimestampSequencer { current: epoch }
    }

    /// Return the current timestamp and advance past it
    pub fn next<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> u64 {
        let ts = self.current;
        let step = rng.next_int(MIN_TICK_INCREMENT, MAX_TICK_INCREMENT) as u64;
        self.current += step;
        ts
    }

    /// Value the next call to `next` will return
    pub fn peek(&self) -> u64 {
        self.current
    }
}

impl Default for TimestampSequencer {
    fn default() -> Self {
        Self::new()
    }
}
