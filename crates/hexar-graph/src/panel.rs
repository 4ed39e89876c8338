use hexar_core::Vec2;

/// Width of the floating assistant panel.
pub const PANEL_WIDTH: f32 = 380.0;
/// Height of the panel strip that must stay inside the window.
pub const PANEL_MIN_VISIBLE_HEIGHT: f32 = 100.0;

/// Placement of the floating assistant panel.
///
/// The panel starts docked (`position == None`) and becomes floating on the
/// first header drag. Closing it docks it again.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantPanel {
    pub visible: bool,
    pub minimized: bool,
    position: Option<Vec2>,
}

impl Default for AssistantPanel {
    fn default() -> Self {
        Self {
            visible: true,
            minimized: false,
            position: None,
        }
    }
}

impl AssistantPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn is_floating(&self) -> bool {
        self.position.is_some()
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.position = None;
    }

    pub fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
    }

    /// Pin the panel at its current docked origin if it is not floating yet.
    pub fn begin_float(&mut self, docked_origin: Vec2) {
        if self.position.is_none() {
            self.position = Some(docked_origin);
        }
    }

    pub fn move_to(&mut self, pos: Vec2, window_size: Vec2) {
        self.position = Some(clamp_panel_position(pos, window_size));
    }

    /// Pull a floating panel back inside a window that has shrunk.
    pub fn keep_in_window(&mut self, window_size: Vec2) {
        if let Some(pos) = self.position {
            self.position = Some(clamp_panel_position(pos, window_size));
        }
    }
}

/// Keep the panel's header strip inside the window.
pub fn clamp_panel_position(pos: Vec2, window_size: Vec2) -> Vec2 {
    let max_x = (window_size.x - PANEL_WIDTH).max(0.0);
    let max_y = (window_size.y - PANEL_MIN_VISIBLE_HEIGHT).max(0.0);
    Vec2::new(pos.x.clamp(0.0, max_x), pos.y.clamp(0.0, max_y))
}
