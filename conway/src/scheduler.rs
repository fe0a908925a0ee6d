// scheduler.rs - Run state, throttled step clock and steps-per-second counter
//
// Time is whatever the host's frame callback reports as "now", measured from
// an arbitrary origin. Nothing here sleeps; every check is a poll.

use std::time::Duration;

/// Step interval for a speed level: 2000 ms at level 1 falling
/// logarithmically to 20 ms at level 10.
pub fn interval_for_level(level: u32) -> Duration {
    let ms = (2000.0 - 1980.0 * f64::from(level.max(1)).log10()).round();
    Duration::from_millis(ms.max(0.0) as u64)
}

/// Discrete speed levels with their precomputed intervals.
#[derive(Debug, Clone)]
pub struct SpeedTable {
    min_level: u32,
    intervals: Vec<Duration>,
}

impl SpeedTable {
    pub fn new(min_level: u32, max_level: u32) -> Self {
        let min_level = min_level.max(1);
        let max_level = max_level.max(min_level);
        Self {
            min_level,
            intervals: (min_level..=max_level).map(interval_for_level).collect(),
        }
    }

    #[inline]
    pub fn min_level(&self) -> u32 {
        self.min_level
    }

    #[inline]
    pub fn max_level(&self) -> u32 {
        self.min_level + self.intervals.len() as u32 - 1
    }

    pub fn clamp(&self, level: u32) -> u32 {
        level.clamp(self.min_level(), self.max_level())
    }

    pub fn interval(&self, level: u32) -> Duration {
        self.intervals[(self.clamp(level) - self.min_level) as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Counts applied steps and publishes the count once per window.
#[derive(Debug, Clone)]
pub struct RateCounter {
    window: Duration,
    window_start: Option<Duration>,
    count: u32,
    published: Option<u32>,
}

impl RateCounter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            window_start: None,
            count: 0,
            published: None,
        }
    }

    /// Count one step. The first tick after a flush opens a new window.
    pub fn tick(&mut self, now: Duration) {
        self.count += 1;
        self.window_start.get_or_insert(now);
    }

    /// Flush when the open window has elapsed. Returns the published value
    /// when a flush happened.
    pub fn poll(&mut self, now: Duration) -> Option<u32> {
        let start = self.window_start?;
        if now.saturating_sub(start) < self.window {
            return None;
        }
        self.published = Some(self.count);
        self.count = 0;
        self.window_start = None;
        self.published
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.window_start = None;
        self.published = Some(0);
    }

    pub fn steps_per_second(&self) -> Option<u32> {
        self.published
    }
}

/// Stopped/Running state machine plus the step throttle.
#[derive(Debug, Clone)]
pub struct Scheduler {
    state: RunState,
    speeds: SpeedTable,
    level: u32,
    last_update: Option<Duration>,
    rate: RateCounter,
}

impl Scheduler {
    pub fn new(speeds: SpeedTable, level: u32, rate_window: Duration) -> Self {
        let level = speeds.clamp(level);
        Self {
            state: RunState::Stopped,
            speeds,
            level,
            last_update: None,
            rate: RateCounter::new(rate_window),
        }
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Returns `false` when already running.
    pub fn run(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = RunState::Running;
        true
    }

    /// Returns `false` when already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = RunState::Stopped;
        self.rate.reset();
        true
    }

    #[inline]
    pub fn speed_level(&self) -> u32 {
        self.level
    }

    pub fn speeds(&self) -> &SpeedTable {
        &self.speeds
    }

    /// Takes effect on the next elapsed-time check; a running loop is not restarted.
    pub fn set_speed(&mut self, level: u32) -> u32 {
        self.level = self.speeds.clamp(level);
        self.level
    }

    pub fn interval(&self) -> Duration {
        self.speeds.interval(self.level)
    }

    /// Whether a step is due at `now`. A due check consumes the interval.
    pub fn due(&mut self, now: Duration) -> bool {
        let elapsed = self
            .last_update
            .map_or(Duration::MAX, |last| now.saturating_sub(last));
        if elapsed < self.interval() {
            return false;
        }
        self.last_update = Some(now);
        true
    }

    pub fn rate(&self) -> &RateCounter {
        &self.rate
    }

    pub fn rate_mut(&mut self) -> &mut RateCounter {
        &mut self.rate
    }
}
