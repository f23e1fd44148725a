use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// How wall-clock seconds become the animation parameter `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockMode {
    /// `t` is the wall-clock reading itself (seconds since the Unix epoch).
    #[default]
    Epoch,
    /// `t` counts from the first sample.
    SinceStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub mode: ClockMode,
    /// Multiplier applied to elapsed time.
    pub time_scale: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            mode: ClockMode::Epoch,
            time_scale: 1.0,
        }
    }
}

/// Converts wall-clock seconds into a monotonic animation time.
/// A wall clock that steps backwards holds `t` at its last value.
#[derive(Debug, Clone)]
pub struct Clock {
    config: ClockConfig,
    start: Option<f64>,
    last: Option<f64>,
}

impl Clock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            start: None,
            last: None,
        }
    }

    /// Animation time for a wall-clock reading.
    /// A non-finite reading is skipped and holds the last time (0 before any).
    pub fn sample(&mut self, wall_seconds: f64) -> f64 {
        if !wall_seconds.is_finite() {
            return self.last.unwrap_or(0.0);
        }
        let raw = match self.config.mode {
            ClockMode::Epoch => wall_seconds * self.config.time_scale,
            ClockMode::SinceStart => {
                let start = *self.start.get_or_insert(wall_seconds);
                (wall_seconds - start) * self.config.time_scale
            }
        };
        let t = match self.last {
            Some(prev) if !(raw >= prev) => prev,
            _ => raw,
        };
        self.last = Some(t);
        t
    }

    /// The most recent sampled time, if any.
    pub fn last(&self) -> Option<f64> {
        self.last
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

/// Seconds since the Unix epoch, from the system clock.
/// A clock set before 1970 reads as 0.
pub fn wall_clock_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Bounded wait between frames.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    wait: Duration,
}

impl FramePacer {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait: Duration::from_millis(wait_ms),
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Sleep for the configured wait. A zero wait returns immediately.
    pub fn pace(&self) {
        if !self.wait.is_zero() {
            std::thread::sleep(self.wait);
        }
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(10)
    }
}
