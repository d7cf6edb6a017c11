use crate::app_state::State;
use crate::drawing::Tool;
use crate::ui::ToolbarAction;

use winit::event::*;
use winit::keyboard::{KeyCode, PhysicalKey};

impl State {
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.gpu.reconfigure(new_size);
            self.canvas.resize(&self.gpu.queue, new_size);
            self.session.resize(new_size.width, new_size.height);
        }
    }

    /// Returns true when the event was consumed by the board.
    pub fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.input.modifiers = modifiers.state();
                false
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                match state {
                    ElementState::Pressed => {
                        let pos = self.input.mouse_pos;
                        if let Some(action) = self.toolbar.hit(pos) {
                            self.apply_toolbar_action(action);
                        } else if !self.toolbar.contains(pos) {
                            self.session.begin_stroke(pos);
                        }
                    }
                    ElementState::Released => self.session.end_stroke(),
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.mouse_pos = [position.x as f32, position.y as f32];

                if self.session.is_drawing() {
                    if self.toolbar.contains(self.input.mouse_pos) {
                        self.session.end_stroke();
                    } else {
                        self.session.extend_stroke(self.input.mouse_pos);
                    }
                }
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.session.end_stroke();
                true
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if key_event.state != ElementState::Pressed {
                    return false;
                }
                let PhysicalKey::Code(keycode) = key_event.physical_key else {
                    return false;
                };
                self.handle_key(keycode)
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, keycode: KeyCode) -> bool {
        let is_ctrl_or_cmd =
            self.input.modifiers.control_key() || self.input.modifiers.super_key();
        let shift = self.input.modifiers.shift_key();

        match keycode {
            KeyCode::Digit1 => self.apply_toolbar_action(ToolbarAction::SelectTool(Tool::Pencil)),
            KeyCode::Digit2 => self.apply_toolbar_action(ToolbarAction::SelectTool(Tool::Rectangle)),
            KeyCode::Digit3 => self.apply_toolbar_action(ToolbarAction::SelectTool(Tool::Ellipse)),
            KeyCode::Digit4 => self.apply_toolbar_action(ToolbarAction::SelectTool(Tool::Text)),
            KeyCode::Digit5 => self.apply_toolbar_action(ToolbarAction::SelectTool(Tool::Eraser)),
            KeyCode::KeyZ if is_ctrl_or_cmd && shift => self.apply_toolbar_action(ToolbarAction::Redo),
            KeyCode::KeyZ if is_ctrl_or_cmd => self.apply_toolbar_action(ToolbarAction::Undo),
            KeyCode::KeyY if is_ctrl_or_cmd => self.apply_toolbar_action(ToolbarAction::Redo),
            KeyCode::KeyS if is_ctrl_or_cmd => {
                self.export_snapshot();
            }
            _ => return false,
        }
        true
    }

    pub fn apply_toolbar_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::SelectTool(tool) => {
                log::debug!("Selected tool {}", tool.label());
                self.session.select_tool(tool);
            }
            ToolbarAction::SelectColor(color) => {
                log::debug!("Selected color {}", color);
                self.session.select_color(color);
            }
            ToolbarAction::Undo => {
                if !self.session.undo() {
                    log::debug!("Nothing to undo");
                }
            }
            ToolbarAction::Redo => {
                if !self.session.redo() {
                    log::debug!("Nothing to redo");
                }
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn export_snapshot(&self) {
        let file_name = chrono::Local::now()
            .format("crewboard-%Y%m%d-%H%M%S.png")
            .to_string();
        if let Err(err) = crate::export::export_png(
            self.session.strokes(),
            self.session.size(),
            std::path::Path::new(&file_name),
        ) {
            log::error!("Export failed: {:#}", err);
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn export_snapshot(&self) {
        log::warn!("PNG export is not available in the browser build");
    }
}
