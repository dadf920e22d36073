use std::time::{Duration, Instant};

use crate::debug;

/// Longest frame time passed to updates, a stalled or suspended loop does not make the scene jump.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

#[derive(Clone, Debug)]
pub struct Tick {
    pub order: u64,
    pub time: Instant,
    pub delta: Duration,
}

/// Clock advanced once per rendered frame
///  - measures time between frames
///  - measures frames per second of the loop it is driven by
#[derive(Debug)]
pub struct FrameClock {
    current_tick: Tick,

    // FPS measurement
    elapsed_seconds: f32,
    frame_counter: u32,
}

impl FrameClock {
    pub fn new(time: Instant) -> Self {
        Self {
            current_tick: Tick {
                order: 0,
                time,
                delta: Duration::ZERO,
            },
            elapsed_seconds: 0.0,
            frame_counter: 0,
        }
    }

    /// Advances the clock to `time` and returns the new tick.
    ///  - time going backwards yields zero delta
    ///  - delta is capped to `MAX_FRAME_DELTA`
    pub fn advance(&mut self, time: Instant) -> &Tick {
        let delta = time
            .saturating_duration_since(self.current_tick.time)
            .min(MAX_FRAME_DELTA);

        self.current_tick.order += 1;
        self.current_tick.delta = delta;
        self.current_tick.time = self.current_tick.time.max(time);

        self.elapsed_seconds += delta.as_secs_f32();
        self.frame_counter += 1;
        if self.elapsed_seconds > 1.0 {
            debug!("Frames per second: {}", self.frame_counter);
            self.elapsed_seconds -= 1.0;
            self.frame_counter = 0;
        }

        &self.current_tick
    }

    pub fn current_tick(&self) -> &Tick {
        &self.current_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_measures_delta_between_frames() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);

        let tick = clock.advance(start + Duration::from_millis(16));
        assert_eq!(tick.order, 1);
        assert_eq!(tick.delta, Duration::from_millis(16));

        let tick = clock.advance(start + Duration::from_millis(33));
        assert_eq!(tick.order, 2);
        assert_eq!(tick.delta, Duration::from_millis(17));
    }

    #[test]
    fn advance_caps_long_stalls() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        let tick = clock.advance(start + Duration::from_secs(5));
        assert_eq!(tick.delta, MAX_FRAME_DELTA);
    }

    #[test]
    fn advance_ignores_time_going_backwards() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::new(start);
        let tick = clock.advance(start - Duration::from_millis(10));
        assert_eq!(tick.delta, Duration::ZERO);
        assert_eq!(tick.time, start);
    }
}
