//! The mutable half of the engine: camera plus selection, advanced by input.

use glam::Vec2;

use crate::input::queue::{InputEvent, Key};
use crate::systems::camera::{CameraConfig, CameraController};
use crate::systems::selection::Selection;

/// Whether the frame loop should keep going after this batch of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub camera: CameraController,
    pub selection: Selection,
}

impl SimulationState {
    pub fn new(camera: CameraConfig) -> Self {
        Self {
            camera: CameraController::new(camera),
            selection: Selection::new(),
        }
    }

    /// Apply one event. Events that do not fit the current state are dropped.
    pub fn apply(&mut self, event: &InputEvent, primary_count: usize) -> LoopControl {
        match *event {
            InputEvent::Quit => return LoopControl::Quit,
            InputEvent::PointerDown { button, x, y } => {
                self.camera.pointer_down(button, Vec2::new(x, y));
            }
            InputEvent::PointerUp { button, .. } => self.camera.pointer_up(button),
            InputEvent::PointerMove { x, y } => self.camera.pointer_move(Vec2::new(x, y)),
            InputEvent::Scroll { direction } => self.camera.scroll(direction),
            InputEvent::KeyDown { key: Key::Reset } => self.reset(),
            InputEvent::KeyDown { key } => {
                if let Some(index) = key.selection_index() {
                    if !self.selection.select(index, primary_count) {
                        log::trace!("Ignoring selection of body {index} (only {primary_count})");
                    }
                }
            }
        }
        LoopControl::Continue
    }

    /// Pure transition: fold a batch of events into a new state.
    /// Every event in the batch is applied, even after a quit.
    pub fn advance<'a, I>(mut self, events: I, primary_count: usize) -> (Self, LoopControl)
    where
        I: IntoIterator<Item = &'a InputEvent>,
    {
        let mut control = LoopControl::Continue;
        for event in events {
            if self.apply(event, primary_count) == LoopControl::Quit {
                control = LoopControl::Quit;
            }
        }
        (self, control)
    }

    /// Default camera, nothing selected.
    pub fn reset(&mut self) {
        self.camera.reset();
        self.selection.clear();
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}
