use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::camera::Viewport;

/// How the HUD shows the animation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HudClock {
    Hidden,
    /// Wall-clock time as a UTC date and time, whatever the animation clock does.
    #[default]
    Utc,
    /// `t` shown as plain seconds.
    Elapsed,
}

/// Screen-space text drawn over the scene: title and clock at top-left,
/// controls help at top-right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    pub enabled: bool,
    pub title: String,
    pub clock: HudClock,
    pub controls: Vec<String>,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Orrery".to_string(),
            clock: HudClock::Utc,
            controls: [
                "Controls:",
                "- Left click + drag: Rotate view",
                "- Mouse wheel: Zoom in/out",
                "- Number keys 1-9: Select planet",
                "- R: Reset view",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

const MARGIN_LEFT: f32 = 20.0;
const TITLE_TOP: f32 = 40.0;
const CLOCK_TOP: f32 = 70.0;
const CONTROLS_WIDTH: f32 = 250.0;
const LINE_SPACING: f32 = 25.0;

/// HUD lines with their window-pixel anchors. Empty when disabled.
/// `t` is the animation time, `wall_seconds` the Unix time of the frame.
pub fn hud_lines(config: &HudConfig, viewport: &Viewport, t: f64, wall_seconds: f64) -> Vec<(String, Vec2)> {
    if !config.enabled {
        return Vec::new();
    }
    let mut lines = Vec::with_capacity(2 + config.controls.len());
    if !config.title.is_empty() {
        lines.push((config.title.clone(), Vec2::new(MARGIN_LEFT, TITLE_TOP)));
    }
    let clock = match config.clock {
        HudClock::Hidden => None,
        HudClock::Utc => Some(format_utc(wall_seconds)),
        HudClock::Elapsed => Some(format!("t = {t:.1} s")),
    };
    if let Some(text) = clock {
        lines.push((text, Vec2::new(MARGIN_LEFT, CLOCK_TOP)));
    }
    let right = viewport.width - CONTROLS_WIDTH;
    for (i, line) in config.controls.iter().enumerate() {
        lines.push((line.clone(), Vec2::new(right, TITLE_TOP + i as f32 * LINE_SPACING)));
    }
    lines
}

/// Format Unix seconds as `YYYY-MM-DD HH:MM:SS` (UTC, proleptic Gregorian).
pub fn format_utc(unix_seconds: f64) -> String {
    if !unix_seconds.is_finite() {
        return "----------".to_string();
    }
    let secs = unix_seconds.floor() as i64;
    let days = secs.div_euclid(86_400);
    let of_day = secs.rem_euclid(86_400);
    let (year, month, day) = civil_date(days);
    format!(
        "{year:04}-{month:02}-{day:02} {:02}:{:02}:{:02}",
        of_day / 3600,
        (of_day / 60) % 60,
        of_day % 60
    )
}

/// Days since 1970-01-01 to (year, month, day), via the Julian day number.
fn civil_date(days_since_epoch: i64) -> (i64, u32, u32) {
    let z = days_since_epoch + 2_440_588;
    let a = if z < 2_299_161 {
        z
    } else {
        let alpha = ((z as f64 - 1_867_216.25) / 36_524.25).floor() as i64;
        z + 1 + alpha - alpha.div_euclid(4)
    };
    let b = a + 1524;
    let c = ((b as f64 - 122.1) / 365.25).floor() as i64;
    let d = (365.25 * c as f64).floor() as i64;
    let e = ((b - d) as f64 / 30.6001).floor() as i64;

    let day = (b - d - (30.6001 * e as f64).floor() as i64) as u32;
    let month = if e < 14 { (e - 1) as u32 } else { (e - 13) as u32 };
    let year = if month > 2 { c - 4716 } else { c - 4715 };
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_formatting() {
        assert_eq!(format_utc(0.0), "1970-01-01 00:00:00");
        assert_eq!(format_utc(1_700_000_000.0), "2023-11-14 22:13:20");
        assert_eq!(format_utc(951_782_400.5), "2000-02-29 00:00:00");
    }

    #[test]
    fn layout_matches_screen_corners() {
        let config = HudConfig {
            title: "Solar System Simulation".into(),
            ..Default::default()
        };
        let lines = hud_lines(&config, &Viewport::default(), 0.0, 0.0);
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], ("Solar System Simulation".to_string(), Vec2::new(20.0, 40.0)));
        assert_eq!(lines[1].1, Vec2::new(20.0, 70.0));
        assert_eq!(lines[2].1, Vec2::new(950.0, 40.0));
        assert_eq!(lines[6], ("- R: Reset view".to_string(), Vec2::new(950.0, 140.0)));
    }

    #[test]
    fn disabled_hud_is_empty() {
        let config = HudConfig { enabled: false, ..Default::default() };
        assert!(hud_lines(&config, &Viewport::default(), 5.0, 5.0).is_empty());
    }

    #[test]
    fn elapsed_clock() {
        let config = HudConfig {
            clock: HudClock::Elapsed,
            controls: vec![],
            ..Default::default()
        };
        let lines = hud_lines(&config, &Viewport::default(), 12.34, 1_700_000_000.0);
        assert_eq!(lines[1].0, "t = 12.3 s");
    }

    #[test]
    fn utc_clock_reads_wall_time_not_animation_time() {
        let config = HudConfig { controls: vec![], ..Default::default() };
        // A scaled or restarted animation clock must not show up as a date.
        let lines = hud_lines(&config, &Viewport::default(), 3.5, 1_700_000_000.0);
        assert_eq!(lines[1].0, "2023-11-14 22:13:20");
    }
}
