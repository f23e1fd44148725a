use crate::api::orrery::Orrery;
use crate::core::time::FramePacer;
use crate::input::queue::InputEvent;
use crate::renderer::traits::{Backend, TextOverlay};

/// Windowing collaborator for the native loop.
pub trait Window {
    /// Events that arrived since the last poll.
    fn poll_events(&mut self) -> Vec<InputEvent>;
    /// Wall-clock seconds.
    fn now_seconds(&self) -> f64;
    /// Show the finished frame.
    fn present(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    FrameLimit,
}

/// How and when the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopExit {
    pub reason: ExitReason,
    pub frames: u64,
    /// Frames whose render was abandoned.
    pub failed_frames: u64,
}

/// Single-threaded cooperative loop: poll, frame, present, pace.
pub struct FrameLoop {
    pacer: FramePacer,
    max_frames: Option<u64>,
}

impl FrameLoop {
    pub fn new(pacer: FramePacer) -> Self {
        Self {
            pacer,
            max_frames: None,
        }
    }

    /// Stop after this many frames even without a quit event.
    pub fn with_max_frames(mut self, max_frames: u64) -> Self {
        self.max_frames = Some(max_frames);
        self
    }

    /// Run until a quit event or the frame limit. A failed render is logged
    /// and skipped; the next iteration draws a fresh frame.
    pub fn run<W, B, O>(&self, orrery: &mut Orrery, window: &mut W, backend: &mut B, overlay: &mut O) -> LoopExit
    where
        W: Window + ?Sized,
        B: Backend + ?Sized,
        O: TextOverlay + ?Sized,
    {
        let mut frames = 0u64;
        let mut failed_frames = 0u64;

        loop {
            if let Some(max) = self.max_frames {
                if frames >= max {
                    log::info!("Frame limit of {max} reached");
                    return LoopExit {
                        reason: ExitReason::FrameLimit,
                        frames,
                        failed_frames,
                    };
                }
            }

            for event in window.poll_events() {
                orrery.push_input(event);
            }

            let now = window.now_seconds();
            match orrery.frame(now, backend, overlay) {
                Ok(_) => window.present(),
                Err(err) => {
                    failed_frames += 1;
                    log::warn!("Frame {frames} abandoned: {err}");
                }
            }
            frames += 1;

            if orrery.quit_requested() {
                return LoopExit {
                    reason: ExitReason::Quit,
                    frames,
                    failed_frames,
                };
            }

            self.pacer.pace();
        }
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(FramePacer::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::EngineConfig;
    use crate::api::types::Rgba;
    use crate::core::scene::{CelestialBody, SystemConfig};
    use crate::input::queue::{Key, ScrollDirection};
    use crate::renderer::command::{CommandBuffer, LabelBuffer};
    use std::collections::VecDeque;

    /// Replays scripted events one batch per frame.
    struct ScriptedWindow {
        batches: VecDeque<Vec<InputEvent>>,
        clock: f64,
        presented: u32,
    }

    impl ScriptedWindow {
        fn new(batches: Vec<Vec<InputEvent>>) -> Self {
            Self {
                batches: batches.into(),
                clock: 0.0,
                presented: 0,
            }
        }
    }

    impl Window for ScriptedWindow {
        fn poll_events(&mut self) -> Vec<InputEvent> {
            self.clock += 0.016;
            self.batches.pop_front().unwrap_or_default()
        }

        fn now_seconds(&self) -> f64 {
            self.clock
        }

        fn present(&mut self) {
            self.presented += 1;
        }
    }

    fn orrery() -> Orrery {
        let system = SystemConfig {
            bodies: vec![
                CelestialBody::new("Sun", 5.0, Rgba::WHITE),
                CelestialBody::new("Earth", 0.7, Rgba::WHITE).with_orbit(12.0, 0.01),
            ],
            satellites: vec![],
        };
        Orrery::new(system, EngineConfig::default()).unwrap()
    }

    #[test]
    fn quit_ends_loop_at_iteration_boundary() {
        let mut orrery = orrery();
        let mut window = ScriptedWindow::new(vec![
            vec![InputEvent::Scroll { direction: ScrollDirection::Up }],
            vec![InputEvent::KeyDown { key: Key::Digit(2) }, InputEvent::Quit],
            vec![InputEvent::Scroll { direction: ScrollDirection::Up }],
        ]);
        let mut commands = CommandBuffer::new();
        let mut labels = LabelBuffer::new();
        let exit = FrameLoop::new(FramePacer::new(0)).run(&mut orrery, &mut window, &mut commands, &mut labels);

        assert_eq!(exit.reason, ExitReason::Quit);
        assert_eq!(exit.frames, 2);
        assert_eq!(window.presented, 2);
        // The quit frame still applied its other events; the third batch never ran.
        assert_eq!(orrery.state().selection.selected(), Some(1));
        assert_eq!(orrery.state().camera.zoom(), -49.0);
    }

    #[test]
    fn labels_do_not_accumulate_across_frames() {
        let mut orrery = orrery();
        let mut window = ScriptedWindow::new(vec![vec![InputEvent::KeyDown { key: Key::Digit(2) }]]);
        let mut commands = CommandBuffer::new();
        let mut labels = LabelBuffer::new();

        FrameLoop::new(FramePacer::new(0))
            .with_max_frames(1)
            .run(&mut orrery, &mut window, &mut commands, &mut labels);
        let per_frame = labels.labels().len();
        // Title, clock, five control lines and the selected body's label.
        assert_eq!(per_frame, 8);

        FrameLoop::new(FramePacer::new(0))
            .with_max_frames(50)
            .run(&mut orrery, &mut window, &mut commands, &mut labels);
        assert_eq!(labels.labels().len(), per_frame);
    }

    #[test]
    fn render_failures_are_counted_not_fatal() {
        let mut orrery = orrery();
        let mut window = ScriptedWindow::new(vec![]);
        let mut commands = CommandBuffer::new().refuse_after(1);
        let mut labels = LabelBuffer::new();
        let exit = FrameLoop::new(FramePacer::new(0))
            .with_max_frames(3)
            .run(&mut orrery, &mut window, &mut commands, &mut labels);

        assert_eq!(exit.reason, ExitReason::FrameLimit);
        assert_eq!(exit.frames, 3);
        assert_eq!(exit.failed_frames, 3);
        assert_eq!(window.presented, 0);
    }
}
