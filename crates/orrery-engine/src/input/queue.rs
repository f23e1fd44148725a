/// Pointer button identity. Only `Primary` drives the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Keys with meaning to the simulation. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Restore the default camera and clear the selection.
    Reset,
    /// Digit key 1..=9.
    Digit(u8),
    Other(u32),
}

impl Key {
    /// Zero-based primary index selected by this key, if it is a digit 1..=9.
    pub fn selection_index(self) -> Option<usize> {
        match self {
            Key::Digit(d @ 1..=9) => Some(d as usize - 1),
            _ => None,
        }
    }
}

/// Input events the engine understands.
/// Pointer positions are window pixels, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The window asked to close.
    Quit,
    PointerDown { button: PointerButton, x: f32, y: f32 },
    PointerUp { button: PointerButton, x: f32, y: f32 },
    /// Absolute pointer position.
    PointerMove { x: f32, y: f32 },
    Scroll { direction: ScrollDirection },
    KeyDown { key: Key },
}

/// A queue of input events.
/// The windowing side pushes events between frames; the engine drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { button: PointerButton::Primary, x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key: Key::Reset });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], InputEvent::KeyDown { key: Key::Reset });
        assert!(q.is_empty());
    }

    #[test]
    fn iter_does_not_consume() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Quit);
        assert_eq!(q.iter().count(), 1);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn digit_keys_map_to_zero_based_indices() {
        assert_eq!(Key::Digit(1).selection_index(), Some(0));
        assert_eq!(Key::Digit(9).selection_index(), Some(8));
        assert_eq!(Key::Digit(0).selection_index(), None);
        assert_eq!(Key::Reset.selection_index(), None);
        assert_eq!(Key::Other(65).selection_index(), None);
    }
}
