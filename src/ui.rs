use crate::drawing::{Color, Point, Tool};
use crate::mesh::Geometry;

const PANEL_ORIGIN: Point = [5.0, 5.0];
const PANEL_PADDING: f32 = 5.0;
const BUTTON_SIZE: f32 = 40.0;
const BUTTON_GAP: f32 = 10.0;
const SWATCH_SIZE: f32 = 28.0;
const SWATCH_GAP: f32 = 8.0;
const GROUP_GAP: f32 = 16.0;

const PANEL_COLOR: [f32; 4] = [0.95, 0.95, 0.95, 0.9];
const BUTTON_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
const SELECTED_COLOR: [f32; 4] = [0.5, 0.7, 1.0, 1.0];
const ICON_COLOR: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
const DISABLED_ICON_COLOR: [f32; 4] = [0.6, 0.6, 0.6, 1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarAction {
    SelectTool(Tool),
    SelectColor(Color),
    Undo,
    Redo,
}

#[derive(Debug, Clone, Copy)]
struct Button {
    action: ToolbarAction,
    position: Point,
    size: [f32; 2],
}

impl Button {
    fn contains(&self, pos: Point) -> bool {
        pos[0] >= self.position[0]
            && pos[0] <= self.position[0] + self.size[0]
            && pos[1] >= self.position[1]
            && pos[1] <= self.position[1] + self.size[1]
    }

    fn center(&self) -> Point {
        [
            self.position[0] + self.size[0] / 2.0,
            self.position[1] + self.size[1] / 2.0,
        ]
    }
}

/// The strip of tool buttons, palette swatches and undo/redo drawn over the
/// top-left corner of the board.
pub struct Toolbar {
    buttons: Vec<Button>,
    panel_size: [f32; 2],
}

impl Toolbar {
    pub fn new(palette: &[Color]) -> Self {
        let mut buttons = Vec::new();
        let top = PANEL_ORIGIN[1] + PANEL_PADDING;
        let mut x = PANEL_ORIGIN[0] + PANEL_PADDING;

        for tool in Tool::ALL {
            buttons.push(Button {
                action: ToolbarAction::SelectTool(tool),
                position: [x, top],
                size: [BUTTON_SIZE; 2],
            });
            x += BUTTON_SIZE + BUTTON_GAP;
        }

        x += GROUP_GAP - BUTTON_GAP;
        let swatch_top = top + (BUTTON_SIZE - SWATCH_SIZE) / 2.0;
        for &color in palette {
            buttons.push(Button {
                action: ToolbarAction::SelectColor(color),
                position: [x, swatch_top],
                size: [SWATCH_SIZE; 2],
            });
            x += SWATCH_SIZE + SWATCH_GAP;
        }

        x += GROUP_GAP - SWATCH_GAP;
        for action in [ToolbarAction::Undo, ToolbarAction::Redo] {
            buttons.push(Button {
                action,
                position: [x, top],
                size: [BUTTON_SIZE; 2],
            });
            x += BUTTON_SIZE + BUTTON_GAP;
        }

        let panel_size = [
            x - BUTTON_GAP + PANEL_PADDING - PANEL_ORIGIN[0],
            BUTTON_SIZE + 2.0 * PANEL_PADDING,
        ];

        Self {
            buttons,
            panel_size,
        }
    }

    pub fn hit(&self, pos: Point) -> Option<ToolbarAction> {
        self.buttons
            .iter()
            .find(|button| button.contains(pos))
            .map(|button| button.action)
    }

    /// True anywhere over the panel, including the gaps between buttons.
    pub fn contains(&self, pos: Point) -> bool {
        pos[0] >= PANEL_ORIGIN[0]
            && pos[0] <= PANEL_ORIGIN[0] + self.panel_size[0]
            && pos[1] >= PANEL_ORIGIN[1]
            && pos[1] <= PANEL_ORIGIN[1] + self.panel_size[1]
    }

    pub fn geometry(
        &self,
        current_tool: Tool,
        current_color: Color,
        can_undo: bool,
        can_redo: bool,
    ) -> Geometry {
        let mut geometry = Geometry::default();
        geometry.push_rect(PANEL_ORIGIN, self.panel_size, PANEL_COLOR);

        for button in &self.buttons {
            let center = button.center();
            match button.action {
                ToolbarAction::SelectTool(tool) => {
                    let background = if tool == current_tool {
                        SELECTED_COLOR
                    } else {
                        BUTTON_COLOR
                    };
                    geometry.push_rect(button.position, button.size, background);
                    push_tool_icon(&mut geometry, tool, center);
                }
                ToolbarAction::SelectColor(color) => {
                    if color == current_color {
                        geometry.push_rect(
                            [button.position[0] - 3.0, button.position[1] - 3.0],
                            [button.size[0] + 6.0, button.size[1] + 6.0],
                            SELECTED_COLOR,
                        );
                    }
                    geometry.push_disc(center, button.size[0] / 2.0, color.to_rgba());
                }
                ToolbarAction::Undo | ToolbarAction::Redo => {
                    let undo = button.action == ToolbarAction::Undo;
                    let enabled = if undo { can_undo } else { can_redo };
                    let icon = if enabled { ICON_COLOR } else { DISABLED_ICON_COLOR };
                    geometry.push_rect(button.position, button.size, BUTTON_COLOR);
                    push_arrow_icon(&mut geometry, center, undo, icon);
                }
            }
        }

        geometry
    }
}

fn push_tool_icon(geometry: &mut Geometry, tool: Tool, center: Point) {
    let [cx, cy] = center;
    match tool {
        Tool::Pencil => {
            geometry.push_line([cx - 8.0, cy + 8.0], [cx + 8.0, cy - 8.0], 2.0, ICON_COLOR);
        }
        Tool::Rectangle => {
            let corners = [
                [cx - 8.0, cy - 6.0],
                [cx + 8.0, cy - 6.0],
                [cx + 8.0, cy + 6.0],
                [cx - 8.0, cy + 6.0],
            ];
            for i in 0..4 {
                geometry.push_line(corners[i], corners[(i + 1) % 4], 2.0, ICON_COLOR);
            }
        }
        Tool::Ellipse => {
            const SEGMENTS: u32 = 16;
            for i in 0..SEGMENTS {
                let a1 = i as f32 * std::f32::consts::TAU / SEGMENTS as f32;
                let a2 = (i + 1) as f32 * std::f32::consts::TAU / SEGMENTS as f32;
                geometry.push_line(
                    [cx + a1.cos() * 8.0, cy + a1.sin() * 8.0],
                    [cx + a2.cos() * 8.0, cy + a2.sin() * 8.0],
                    2.0,
                    ICON_COLOR,
                );
            }
        }
        Tool::Text => {
            geometry.push_line([cx - 6.0, cy - 8.0], [cx + 6.0, cy - 8.0], 2.0, ICON_COLOR);
            geometry.push_line([cx, cy - 8.0], [cx, cy + 8.0], 2.0, ICON_COLOR);
        }
        Tool::Eraser => {
            geometry.push_rect([cx - 6.0, cy - 4.0], [12.0, 8.0], ICON_COLOR);
        }
    }
}

fn push_arrow_icon(geometry: &mut Geometry, center: Point, pointing_left: bool, color: [f32; 4]) {
    let [cx, cy] = center;
    let dir = if pointing_left { -1.0 } else { 1.0 };
    let tip = [cx + 8.0 * dir, cy];
    geometry.push_line([cx - 8.0 * dir, cy], tip, 2.0, color);
    geometry.push_line(tip, [tip[0] - 5.0 * dir, cy - 5.0], 2.0, color);
    geometry.push_line(tip, [tip[0] - 5.0 * dir, cy + 5.0], 2.0, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toolbar() -> Toolbar {
        Toolbar::new(&Color::PALETTE)
    }

    #[test]
    fn tool_buttons_in_palette_order() {
        let toolbar = toolbar();
        for (i, tool) in Tool::ALL.into_iter().enumerate() {
            let x = 10.0 + i as f32 * (BUTTON_SIZE + BUTTON_GAP) + BUTTON_SIZE / 2.0;
            assert_eq!(toolbar.hit([x, 30.0]), Some(ToolbarAction::SelectTool(tool)));
        }
    }

    #[test]
    fn swatches_select_colors() {
        let toolbar = toolbar();
        let hits: Vec<_> = toolbar
            .buttons
            .iter()
            .filter_map(|b| match toolbar.hit(b.center()) {
                Some(ToolbarAction::SelectColor(c)) => Some(c),
                _ => None,
            })
            .collect();
        assert_eq!(hits, Color::PALETTE.to_vec());
    }

    #[test]
    fn undo_and_redo_come_last() {
        let toolbar = toolbar();
        let n = toolbar.buttons.len();
        assert_eq!(toolbar.hit(toolbar.buttons[n - 2].center()), Some(ToolbarAction::Undo));
        assert_eq!(toolbar.hit(toolbar.buttons[n - 1].center()), Some(ToolbarAction::Redo));
    }

    #[test]
    fn gaps_are_inside_the_panel_but_hit_nothing() {
        let toolbar = toolbar();
        let gap = [10.0 + BUTTON_SIZE + BUTTON_GAP / 2.0, 30.0];
        assert_eq!(toolbar.hit(gap), None);
        assert!(toolbar.contains(gap));
    }

    #[test]
    fn board_area_is_outside() {
        let toolbar = toolbar();
        assert!(!toolbar.contains([300.0, 300.0]));
        assert_eq!(toolbar.hit([300.0, 300.0]), None);
        assert!(!toolbar.contains([2.0, 2.0]));
    }

    #[test]
    fn every_button_fits_in_the_panel() {
        let toolbar = toolbar();
        for button in &toolbar.buttons {
            assert!(toolbar.contains(button.position));
            assert!(toolbar.contains([
                button.position[0] + button.size[0],
                button.position[1] + button.size[1],
            ]));
        }
    }

    #[test]
    fn selected_tool_is_highlighted() {
        let toolbar = toolbar();
        let geometry = toolbar.geometry(Tool::Ellipse, Color::BLACK, false, false);
        let highlighted = geometry
            .vertices
            .iter()
            .filter(|v| v.color == SELECTED_COLOR)
            .count();
        // One tool button plus the ring behind the black swatch.
        assert_eq!(highlighted, 8);
        assert!(!geometry.is_empty());
    }

    #[test]
    fn custom_palette_changes_layout() {
        let toolbar = Toolbar::new(&[Color::RED]);
        let colors = toolbar
            .buttons
            .iter()
            .filter(|b| matches!(b.action, ToolbarAction::SelectColor(_)))
            .count();
        assert_eq!(colors, 1);
        assert!(toolbar.panel_size[0] < super::Toolbar::new(&Color::PALETTE).panel_size[0]);
    }
}
