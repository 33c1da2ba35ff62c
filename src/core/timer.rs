//=========================================================================
// Game Timer
//=========================================================================
//
// Round countdown and the beat oscillator used for zoom pulsing.
//
// Each frame:
//   advance(real_dt) ──> remaining -= real_dt
//                    ──> whole-second ticks from the tick accumulator
//                    ──> expired_now (true on exactly one frame)
//
// The timer keeps counting below zero after expiry so callers can gate
// post-round behavior on "seconds since the end".
//
//=========================================================================

use std::f32::consts::TAU;

//=== TimerStep ===========================================================

/// What happened during one [`GameTimer::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerStep {
    /// Whole tick intervals elapsed this frame (economy ticks to run).
    pub ticks: u32,

    /// True on the single frame where the countdown crosses zero.
    pub expired_now: bool,
}

//=== GameTimer ===========================================================

/// Countdown clock for one round.
#[derive(Debug, Clone)]
pub struct GameTimer {
    round_length: f32,
    tick_interval: f32,
    remaining: f32,
    tick_accumulator: f32,
    expired: bool,
}

impl GameTimer {
    /// Creates a timer for a round of `round_length` seconds that ticks
    /// every `tick_interval` seconds.
    ///
    /// # Panics
    ///
    /// Panics if either value is not positive.
    pub fn new(round_length: f32, tick_interval: f32) -> Self {
        assert!(round_length > 0.0, "Round length must be positive, got {}", round_length);
        assert!(tick_interval > 0.0, "Tick interval must be positive, got {}", tick_interval);

        Self {
            round_length,
            tick_interval,
            remaining: round_length,
            tick_accumulator: 0.0,
            expired: false,
        }
    }

    /// Advances the countdown by real elapsed time.
    ///
    /// Ticks are only produced while the round is running. The frame that
    /// crosses zero still reports the ticks it accumulated.
    pub fn advance(&mut self, real_dt: f32) -> TimerStep {
        let real_dt = real_dt.max(0.0);
        self.remaining -= real_dt;

        if self.expired {
            return TimerStep::default();
        }

        self.tick_accumulator += real_dt;
        let mut ticks = 0;
        while self.tick_accumulator >= self.tick_interval {
            self.tick_accumulator -= self.tick_interval;
            ticks += 1;
        }

        let expired_now = self.remaining < 0.0;
        if expired_now {
            self.expired = true;
        }

        TimerStep { ticks, expired_now }
    }

    //--- Queries ----------------------------------------------------------

    /// Seconds left; negative after expiry.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Seconds since the round began.
    pub fn round_elapsed(&self) -> f32 {
        self.round_length - self.remaining
    }

    /// True once the countdown has crossed zero.
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Seconds since expiry, or 0 while the round is running.
    pub fn overtime(&self) -> f32 {
        if self.expired {
            -self.remaining
        } else {
            0.0
        }
    }

    /// Countdown label, e.g. `2:05 remaining`.
    pub fn label(&self) -> String {
        let total = self.remaining.max(0.0) as u32;
        format!("{}:{:02} remaining", total / 60, total % 60)
    }
}

//=== Beat Oscillator =====================================================

/// Cosmetic beat pulse in `[0, 1]` for the given total time and tempo.
///
/// Pure function of its inputs; callers decide when it is engaged.
pub fn beat_signal(total_seconds: f32, bpm: f32) -> f32 {
    (total_seconds * TAU * (bpm / 60.0)).sin().clamp(0.0, 1.0)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_once_per_whole_second() {
        let mut timer = GameTimer::new(160.0, 1.0);
        let mut ticks = 0;
        for _ in 0..250 {
            ticks += timer.advance(0.02).ticks;
        }
        // 5 seconds, allowing for float accumulation on the last tick.
        assert!((4..=5).contains(&ticks));
    }

    #[test]
    fn long_frame_yields_several_ticks() {
        let mut timer = GameTimer::new(160.0, 1.0);
        assert_eq!(timer.advance(3.5).ticks, 3);
        assert_eq!(timer.advance(0.5).ticks, 1);
    }

    #[test]
    fn expiry_is_reported_exactly_once() {
        let mut timer = GameTimer::new(2.0, 1.0);
        let mut expirations = 0;
        for _ in 0..10 {
            if timer.advance(0.5).expired_now {
                expirations += 1;
            }
        }
        assert_eq!(expirations, 1);
        assert!(timer.is_expired());
        assert!(timer.remaining() < 0.0);
    }

    #[test]
    fn no_ticks_after_expiry() {
        let mut timer = GameTimer::new(1.0, 1.0);
        let step = timer.advance(1.5);
        assert!(step.expired_now);
        assert_eq!(timer.advance(5.0), TimerStep::default());
        assert_eq!(timer.overtime(), 5.5);
    }

    #[test]
    fn label_formats_minutes_and_seconds() {
        let mut timer = GameTimer::new(160.0, 1.0);
        assert_eq!(timer.label(), "2:40 remaining");
        timer.advance(155.5);
        assert_eq!(timer.label(), "0:04 remaining");
    }

    #[test]
    fn beat_signal_is_bounded() {
        for i in 0..1000 {
            let value = beat_signal(i as f32 * 0.013, 132.0);
            assert!((0.0..=1.0).contains(&value));
        }
        assert_eq!(beat_signal(0.0, 132.0), 0.0);
    }

    #[test]
    #[should_panic(expected = "Round length must be positive")]
    fn rejects_empty_round() {
        GameTimer::new(0.0, 1.0);
    }
}
