use egui::{Context, Key, PointerButton, Pos2, Response};

mod viewport;
pub use viewport::{MAX_ZOOM, MIN_ZOOM, Viewport};

/// Input delivered to the editor, already in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved over the canvas
    PointerMove { world: Pos2 },
    /// Primary button pressed on the canvas
    PointerDown { world: Pos2 },
    KeyDown { key: Key },
}

/// Keys forwarded to the active tool
const TOOL_KEYS: [Key; 2] = [Key::Escape, Key::Enter];

/// Handles converting raw egui input on the canvas into [`InputEvent`]s.
///
/// Navigation (secondary-drag pan, scroll zoom) is applied to the viewport
/// directly and never reaches the tools.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_world_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_world_pos(&self) -> Option<Pos2> {
        self.last_world_pos
    }

    /// Process the canvas response for this frame
    pub fn process_input(&mut self, ctx: &Context, response: &Response, viewport: &mut Viewport) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if response.dragged_by(PointerButton::Secondary) {
            viewport.pan(response.drag_delta());
        }

        let hover_pos = response.hover_pos();
        if let Some(pos) = hover_pos {
            let scroll = ctx.input(|input| input.smooth_scroll_delta.y);
            if scroll != 0.0 {
                viewport.zoom_at(pos, (scroll * 0.002).exp());
            }
        }

        match hover_pos.map(|pos| viewport.screen_to_world(pos)) {
            Some(world) => {
                if Some(world) != self.last_world_pos {
                    events.push(InputEvent::PointerMove { world });
                }
                if ctx.input(|input| input.pointer.button_pressed(PointerButton::Primary)) {
                    events.push(InputEvent::PointerDown { world });
                }
                self.last_world_pos = Some(world);
            }
            None => self.last_world_pos = None,
        }

        if !ctx.wants_keyboard_input() {
            ctx.input(|input| {
                for key in TOOL_KEYS {
                    if input.key_pressed(key) {
                        events.push(InputEvent::KeyDown { key });
                    }
                }
            });
        }

        events
    }
}
