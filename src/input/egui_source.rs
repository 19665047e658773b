use egui::{Context, Event, PointerButton, Pos2, Rect, TouchId, TouchPhase};
use std::collections::VecDeque;

use super::{InputSource, SurfaceEvent};

/// Turns raw egui input into [`SurfaceEvent`]s for the canvas area.
///
/// Once a touch event shows up, touch becomes the only input source and the
/// pointer events the platform synthesizes from touches are dropped. Only the
/// first finger is followed.
#[derive(Debug, Default)]
pub struct EguiInput {
    queue: VecDeque<SurfaceEvent>,
    touch_only: bool,
    tracked_touch: Option<TouchId>,
    last_size: Option<[u32; 2]>,
}

impl EguiInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event produced elsewhere (e.g. by the toolbar)
    pub fn push(&mut self, event: impl Into<SurfaceEvent>) {
        self.queue.push_back(event.into());
    }

    pub fn is_touch_only(&self) -> bool {
        self.touch_only
    }

    /// Physical pixel size of `canvas`
    pub fn surface_size(canvas: Rect, pixels_per_point: f32) -> [u32; 2] {
        let size = canvas.size() * pixels_per_point;
        [size.x.round().max(0.0) as u32, size.y.round().max(0.0) as u32]
    }

    /// Collect this frame's events for `canvas`.
    ///
    /// Resizes are always reported. Presses and moves only count when
    /// `accept_pointer` is set (e.g. not while a modal covers the canvas),
    /// but releases always get through so a gesture can still end.
    pub fn gather(&mut self, ctx: &Context, canvas: Rect, accept_pointer: bool) {
        let pixels_per_point = ctx.pixels_per_point();

        // Report size changes
        let size = Self::surface_size(canvas, pixels_per_point);
        if self.last_size != Some(size) {
            self.last_size = Some(size);
            self.queue.push_back(SurfaceEvent::Resize {
                width: size[0],
                height: size[1],
            });
        }

        let events = ctx.input(|i| i.events.clone());
        if !self.touch_only && events.iter().any(|e| matches!(e, Event::Touch { .. })) {
            log::debug!("Touch input detected, ignoring mouse events from now on");
            self.touch_only = true;
        }

        // Screen points to surface pixels
        let to_surface = |pos: Pos2| ((pos - canvas.min) * pixels_per_point).to_pos2();

        for event in &events {
            match *event {
                Event::Touch { id, phase, pos, .. } => {
                    let starts_here = accept_pointer && canvas.contains(pos);
                    self.on_touch(id, phase, starts_here, accept_pointer, to_surface(pos));
                }
                _ if self.touch_only => {}
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if !pressed {
                        self.queue.push_back(SurfaceEvent::PointerUp);
                    } else if accept_pointer && canvas.contains(pos) {
                        self.queue.push_back(SurfaceEvent::PointerDown(to_surface(pos)));
                    }
                }
                Event::PointerMoved(pos) if accept_pointer => {
                    self.queue.push_back(SurfaceEvent::PointerMove(to_surface(pos)));
                }
                Event::PointerGone => self.queue.push_back(SurfaceEvent::PointerUp),
                _ => {}
            }
        }
    }

    fn on_touch(
        &mut self,
        id: TouchId,
        phase: TouchPhase,
        starts_here: bool,
        accept_move: bool,
        pos: Pos2,
    ) {
        match phase {
            TouchPhase::Start => {
                if self.tracked_touch.is_none() && starts_here {
                    self.tracked_touch = Some(id);
                    self.queue.push_back(SurfaceEvent::PointerDown(pos));
                }
            }
            TouchPhase::Move => {
                if accept_move && self.tracked_touch == Some(id) {
                    self.queue.push_back(SurfaceEvent::PointerMove(pos));
                }
            }
            TouchPhase::End | TouchPhase::Cancel => {
                if self.tracked_touch == Some(id) {
                    self.tracked_touch = None;
                    self.queue.push_back(SurfaceEvent::PointerUp);
                }
            }
        }
    }
}

impl InputSource for EguiInput {
    fn next_event(&mut self) -> Option<SurfaceEvent> {
        self.queue.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DrawingConfig;
    use crate::controller::DrawingController;
    use crate::surface::Surface;
    use egui::{Modifiers, RawInput, TouchDeviceId, pos2, vec2};

    fn canvas() -> Rect {
        Rect::from_min_size(pos2(0.0, 20.0), vec2(100.0, 80.0))
    }

    fn run_frame(input: &mut EguiInput, events: Vec<Event>) -> Vec<SurfaceEvent> {
        run_frame_with(input, events, true)
    }

    fn run_frame_with(
        input: &mut EguiInput,
        events: Vec<Event>,
        accept_pointer: bool,
    ) -> Vec<SurfaceEvent> {
        let ctx = Context::default();
        let raw = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(100.0, 100.0))),
            events,
            ..Default::default()
        };
        let _ = ctx.run(raw, |ctx| input.gather(ctx, canvas(), accept_pointer));
        std::iter::from_fn(|| input.next_event()).collect()
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::default(),
        }
    }

    fn touch(id: u64, phase: TouchPhase, pos: Pos2) -> Event {
        Event::Touch {
            device_id: TouchDeviceId(0),
            id: TouchId(id),
            phase,
            pos,
            force: None,
        }
    }

    #[test]
    fn test_first_frame_reports_size() {
        let mut input = EguiInput::new();
        let events = run_frame(&mut input, vec![]);
        assert_eq!(events, vec![SurfaceEvent::Resize { width: 100, height: 80 }]);

        // unchanged size is not reported again
        assert!(run_frame(&mut input, vec![]).is_empty());
    }

    #[test]
    fn test_mouse_gesture_in_surface_coordinates() {
        let mut input = EguiInput::new();
        run_frame(&mut input, vec![]);

        let events = run_frame(
            &mut input,
            vec![
                button(pos2(10.0, 30.0), true),
                Event::PointerMoved(pos2(15.0, 35.0)),
                button(pos2(15.0, 35.0), false),
            ],
        );
        assert_eq!(
            events,
            vec![
                SurfaceEvent::PointerDown(pos2(10.0, 10.0)),
                SurfaceEvent::PointerMove(pos2(15.0, 15.0)),
                SurfaceEvent::PointerUp,
            ]
        );
    }

    #[test]
    fn test_press_outside_canvas_is_ignored() {
        let mut input = EguiInput::new();
        run_frame(&mut input, vec![]);

        let events = run_frame(&mut input, vec![button(pos2(10.0, 5.0), true)]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_touch_takes_over_and_tracks_first_finger() {
        let mut input = EguiInput::new();
        run_frame(&mut input, vec![]);

        let events = run_frame(
            &mut input,
            vec![
                button(pos2(10.0, 30.0), true),
                touch(1, TouchPhase::Start, pos2(10.0, 30.0)),
                touch(2, TouchPhase::Start, pos2(50.0, 50.0)),
                touch(2, TouchPhase::Move, pos2(55.0, 55.0)),
                touch(1, TouchPhase::Move, pos2(12.0, 32.0)),
                Event::PointerMoved(pos2(12.0, 32.0)),
                touch(1, TouchPhase::End, pos2(12.0, 32.0)),
            ],
        );
        assert!(input.is_touch_only());
        assert_eq!(
            events,
            vec![
                SurfaceEvent::PointerDown(pos2(10.0, 10.0)),
                SurfaceEvent::PointerMove(pos2(12.0, 12.0)),
                SurfaceEvent::PointerUp,
            ]
        );
    }

    #[test]
    fn test_touch_cancel_ends_gesture() {
        let mut input = EguiInput::new();
        run_frame(&mut input, vec![]);

        let events = run_frame(
            &mut input,
            vec![
                touch(7, TouchPhase::Start, pos2(20.0, 40.0)),
                touch(7, TouchPhase::Cancel, pos2(20.0, 40.0)),
            ],
        );
        assert_eq!(events.last(), Some(&SurfaceEvent::PointerUp));
    }

    #[test]
    fn test_release_while_blocked_still_ends_gesture() {
        let config = DrawingConfig::default();
        let mut controller = DrawingController::new(Surface::new(100, 80).unwrap(), &config);
        let mut input = EguiInput::new();
        run_frame(&mut input, vec![]);

        // press on the canvas, then a modal opens before the release
        let pressed = run_frame(&mut input, vec![button(pos2(10.0, 30.0), true)]);
        input.queue.extend(pressed);
        controller.drain(&mut input);
        assert!(controller.gesture().is_painting());

        let blocked = run_frame_with(
            &mut input,
            vec![
                Event::PointerMoved(pos2(20.0, 40.0)),
                button(pos2(20.0, 40.0), false),
            ],
            false,
        );
        assert_eq!(blocked, vec![SurfaceEvent::PointerUp]);
        input.queue.extend(blocked);
        controller.drain(&mut input);
        assert!(!controller.gesture().is_painting());

        // hovering afterwards draws nothing
        let revision = controller.sink().revision();
        let hover = run_frame(&mut input, vec![Event::PointerMoved(pos2(80.0, 80.0))]);
        assert_eq!(hover, vec![SurfaceEvent::PointerMove(pos2(80.0, 60.0))]);
        input.queue.extend(hover);
        controller.drain(&mut input);
        assert_eq!(controller.sink().revision(), revision);
        assert_eq!(controller.sink().pixel(50, 50), Some(egui::Color32::WHITE));
    }

    #[test]
    fn test_blocked_frame_ignores_presses_and_touch_starts() {
        let mut input = EguiInput::new();
        run_frame(&mut input, vec![]);

        let events = run_frame_with(
            &mut input,
            vec![
                button(pos2(10.0, 30.0), true),
                Event::PointerMoved(pos2(15.0, 35.0)),
            ],
            false,
        );
        assert!(events.is_empty());

        let events = run_frame_with(
            &mut input,
            vec![touch(3, TouchPhase::Start, pos2(10.0, 30.0))],
            false,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_touch_end_gets_through_while_blocked() {
        let mut input = EguiInput::new();
        run_frame(&mut input, vec![]);
        run_frame(&mut input, vec![touch(4, TouchPhase::Start, pos2(10.0, 30.0))]);

        let events = run_frame_with(
            &mut input,
            vec![
                touch(4, TouchPhase::Move, pos2(30.0, 50.0)),
                touch(4, TouchPhase::End, pos2(30.0, 50.0)),
            ],
            false,
        );
        assert_eq!(events, vec![SurfaceEvent::PointerUp]);
    }

    #[test]
    fn test_surface_size_scales_with_pixels_per_point() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(100.5, 40.0));
        assert_eq!(EguiInput::surface_size(rect, 2.0), [201, 80]);
    }
}
