use orrery_engine::{
    pack_frame, CommandBuffer, InputEvent, Key, LabelBuffer, LoopControl, Orrery, PackedCounts,
    PointerButton, ProtocolLayout, ScrollDirection,
};

/// Browser key code for `R`.
pub const KEY_CODE_RESET: u32 = 82;
/// Browser key codes for `1`..`9`.
pub const KEY_CODE_DIGIT_1: u32 = 49;
pub const KEY_CODE_DIGIT_9: u32 = 57;

/// Map a browser `keyCode` to an engine key.
pub fn key_from_code(key_code: u32) -> Key {
    match key_code {
        KEY_CODE_RESET => Key::Reset,
        KEY_CODE_DIGIT_1..=KEY_CODE_DIGIT_9 => Key::Digit((key_code - KEY_CODE_DIGIT_1 + 1) as u8),
        other => Key::Other(other),
    }
}

/// Map a DOM `MouseEvent.button` value.
pub fn pointer_button(button: u32) -> PointerButton {
    match button {
        0 => PointerButton::Primary,
        1 => PointerButton::Middle,
        2 => PointerButton::Secondary,
        other => PointerButton::Other(other),
    }
}

/// Map a wheel `deltaY`. Negative (wheel away from the user) zooms in.
pub fn scroll_direction(delta_y: f32) -> Option<ScrollDirection> {
    if delta_y < 0.0 {
        Some(ScrollDirection::Up)
    } else if delta_y > 0.0 {
        Some(ScrollDirection::Down)
    } else {
        None
    }
}

/// Drives an [`Orrery`] from browser callbacks.
///
/// The page creates one runner in a `thread_local!` and calls `frame` from
/// `requestAnimationFrame`. After each frame the packed buffer and the label
/// JSON describe everything the canvas needs to draw.
pub struct WebRunner {
    orrery: Orrery,
    commands: CommandBuffer,
    labels: LabelBuffer,
    layout: ProtocolLayout,
    buffer: Vec<f32>,
    labels_json: String,
    frame_counter: u64,
    packed: PackedCounts,
    failed_frames: u64,
}

impl WebRunner {
    pub fn new(orrery: Orrery) -> Self {
        let layout = ProtocolLayout::from_config(&orrery.config().capacity);
        let buffer = layout.allocate();
        Self {
            orrery,
            commands: CommandBuffer::new(),
            labels: LabelBuffer::new(),
            layout,
            buffer,
            labels_json: "[]".to_string(),
            frame_counter: 0,
            packed: PackedCounts::default(),
            failed_frames: 0,
        }
    }

    /// Run one frame at `now_ms` (milliseconds since the Unix epoch, as `Date.now()`).
    /// Returns false once a quit was requested.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        self.frame_counter += 1;

        let control = match self.orrery.frame(now_ms / 1000.0, &mut self.commands, &mut self.labels) {
            Ok(outcome) => outcome.control,
            Err(err) => {
                self.failed_frames += 1;
                log::warn!("Frame {} abandoned: {}", self.frame_counter, err);
                self.commands.clear();
                self.labels.clear();
                if self.orrery.quit_requested() {
                    LoopControl::Quit
                } else {
                    LoopControl::Continue
                }
            }
        };

        self.packed = match pack_frame(&self.layout, self.frame_counter, &self.commands, &mut self.buffer) {
            Ok(counts) => counts,
            Err(err) => {
                log::error!("Packing frame {} failed: {}", self.frame_counter, err);
                PackedCounts::default()
            }
        };

        self.labels_json = match self.labels.to_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("Serializing labels failed: {}", err);
                "[]".to_string()
            }
        };

        control == LoopControl::Continue
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.orrery.push_input(event);
    }

    pub fn pointer_down(&mut self, button: u32, x: f32, y: f32) {
        self.push_input(InputEvent::PointerDown { button: pointer_button(button), x, y });
    }

    pub fn pointer_up(&mut self, button: u32, x: f32, y: f32) {
        self.push_input(InputEvent::PointerUp { button: pointer_button(button), x, y });
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.push_input(InputEvent::PointerMove { x, y });
    }

    pub fn scroll(&mut self, delta_y: f32) {
        if let Some(direction) = scroll_direction(delta_y) {
            self.push_input(InputEvent::Scroll { direction });
        }
    }

    pub fn key_down(&mut self, key_code: u32) {
        self.push_input(InputEvent::KeyDown { key: key_from_code(key_code) });
    }

    pub fn quit(&mut self) {
        self.push_input(InputEvent::Quit);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.orrery.resize(width, height);
    }

    pub fn orrery(&self) -> &Orrery {
        &self.orrery
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    pub fn labels_json(&self) -> &str {
        &self.labels_json
    }

    pub fn draw_count(&self) -> u32 {
        self.packed.draws as u32
    }

    pub fn star_count(&self) -> u32 {
        self.packed.stars as u32
    }

    pub fn failed_frames(&self) -> u64 {
        self.failed_frames
    }

    // ---- Capacity accessors ----

    pub fn max_draws(&self) -> u32 {
        self.layout.max_draws as u32
    }

    pub fn max_stars(&self) -> u32 {
        self.layout.max_stars as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::bridge::protocol::{HEADER_DRAW_COUNT, HEADER_FRAME_COUNTER};
    use orrery_engine::{CelestialBody, EngineConfig, Rgba, StarfieldConfig, SystemConfig};

    fn runner() -> WebRunner {
        let system = SystemConfig {
            bodies: vec![
                CelestialBody::new("Sun", 5.0, Rgba::WHITE),
                CelestialBody::new("Earth", 0.7, Rgba::WHITE).with_orbit(12.0, 0.01),
            ],
            satellites: vec![],
        };
        let config = EngineConfig {
            starfield: StarfieldConfig { count: 8, ..Default::default() },
            ..Default::default()
        };
        WebRunner::new(Orrery::new(system, config).unwrap())
    }

    #[test]
    fn key_codes_map_to_keys() {
        assert_eq!(key_from_code(82), Key::Reset);
        assert_eq!(key_from_code(49), Key::Digit(1));
        assert_eq!(key_from_code(57), Key::Digit(9));
        assert_eq!(key_from_code(48), Key::Other(48));
    }

    #[test]
    fn mouse_buttons_and_wheel() {
        assert_eq!(pointer_button(0), PointerButton::Primary);
        assert_eq!(pointer_button(2), PointerButton::Secondary);
        assert_eq!(scroll_direction(-120.0), Some(ScrollDirection::Up));
        assert_eq!(scroll_direction(53.0), Some(ScrollDirection::Down));
        assert_eq!(scroll_direction(0.0), None);
    }

    #[test]
    fn frame_packs_buffer_and_labels() {
        let mut r = runner();
        r.key_down(50);
        assert!(r.frame(1_700_000_000_000.0));
        // stars, sun, earth path, highlight, earth
        assert_eq!(r.draw_count(), 5);
        assert_eq!(r.star_count(), 8);
        assert_eq!(r.buffer()[HEADER_DRAW_COUNT], 5.0);
        assert_eq!(r.buffer()[HEADER_FRAME_COUNTER], 1.0);
        assert!(r.labels_json().contains("Earth - 12.0 AU"));
        assert!(r.labels_json().contains("2023-11-14 22:13:20"));
    }

    #[test]
    fn labels_json_holds_one_frame() {
        let mut r = runner();
        r.frame(1_700_000_000_000.0);
        let first = r.labels_json().to_string();
        r.frame(1_700_000_000_000.0);
        assert_eq!(r.labels_json(), first);
    }

    #[test]
    fn quit_stops_the_runner() {
        let mut r = runner();
        r.quit();
        assert!(!r.frame(0.0));
    }
}
