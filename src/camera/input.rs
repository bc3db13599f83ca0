//! winit event translation for the trackball camera.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use super::controller::TrackballCamera;

/// Translates winit window events into trackball camera input.
pub struct InputHandler {
    last_mouse_pos: Vec2,
    shift_pressed: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Create a handler with no pointer history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_mouse_pos: Vec2::ZERO,
            shift_pressed: false,
        }
    }

    /// Feed one window event to the camera. Returns `true` if the event was
    /// consumed.
    pub fn handle_event(
        &mut self,
        camera: &mut TrackballCamera,
        event: &WindowEvent,
    ) -> bool {
        match event {
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                if *state == ElementState::Pressed {
                    camera.pointer_down(self.last_mouse_pos);
                } else {
                    camera.pointer_up();
                }
                true
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift_pressed = modifiers.state().shift_key();
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                let current_pos =
                    Vec2::new(position.x as f32, position.y as f32);
                self.last_mouse_pos = current_pos;
                camera.pointer_move(current_pos, self.shift_pressed);
                true
            }
            // Leaving the surface cancels an in-flight drag.
            WindowEvent::CursorLeft { .. } => {
                camera.pointer_up();
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                camera.scroll(scroll);
                true
            }
            _ => false,
        }
    }
}
