use std::time::{Duration, Instant};

use tracing::info;

/// Interval between display refreshes.
pub const TICK_INTERVAL: Duration = Duration::from_millis(500);

/// What the timer widget shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerDisplay {
    pub minutes: u64,
    pub seconds: u64,
    /// Opacity of the blinking separator dot.
    pub dot_opacity: f32,
    /// Elapsed time is past the planned talk length.
    pub overtime: bool,
}

impl TimerDisplay {
    fn from_elapsed(elapsed: Duration, talk_length: Option<Duration>) -> Self {
        let secs = elapsed.as_secs();
        Self {
            minutes: secs / 60,
            seconds: secs % 60,
            dot_opacity: if secs % 2 == 1 { 0.35 } else { 1.0 },
            overtime: talk_length.is_some_and(|limit| elapsed > limit),
        }
    }

    /// `MM:SS`, minutes growing past two digits if needed.
    pub fn text(&self) -> String {
        format!("{:02}:{:02}", self.minutes, self.seconds)
    }
}

impl Default for TimerDisplay {
    fn default() -> Self {
        Self::from_elapsed(Duration::ZERO, None)
    }
}

/// Pacing timer. Starts on the first forward move and is never stopped.
#[derive(Debug, Clone)]
pub struct PacingTimer {
    talk_length: Option<Duration>,
    started: Option<Instant>,
    last_tick: Option<Instant>,
    display: TimerDisplay,
}

impl PacingTimer {
    pub fn new(talk_length: Option<Duration>) -> Self {
        Self {
            talk_length,
            started: None,
            last_tick: None,
            display: TimerDisplay::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Starts the timer unless it already runs.
    pub fn start(&mut self, now: Instant) {
        if self.started.is_none() {
            info!("pacing timer started");
            self.started = Some(now);
            self.last_tick = Some(now);
        }
    }

    /// Refreshes the display once per [`TICK_INTERVAL`]. Returns whether the
    /// display was refreshed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let (Some(started), Some(last_tick)) = (self.started, self.last_tick) else {
            return false;
        };
        if now.saturating_duration_since(last_tick) < TICK_INTERVAL {
            return false;
        }
        self.last_tick = Some(now);
        let elapsed = now.saturating_duration_since(started);
        self.display = TimerDisplay::from_elapsed(elapsed, self.talk_length);
        true
    }

    pub fn display(&self) -> TimerDisplay {
        self.display
    }
}
