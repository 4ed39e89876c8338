pub mod edge_router;
pub mod editor;
pub mod hit_tester;
pub mod interaction;
pub mod panel;
pub mod selection;
pub mod toolbar;
pub mod tree;
pub mod viewport;

pub use edge_router::{Connection, CubicBezier, route_connection, route_connections};
pub use editor::{EditorState, Outcome};
pub use hit_tester::{HitResult, HitTester, NodeAction, action_button_rect};
pub use interaction::{
    DEFAULT_DRAG_THRESHOLD, DragSession, EditKey, InputEvent, InteractionController,
    InteractionState, PointerTarget, Surface,
};
pub use panel::{AssistantPanel, PANEL_MIN_VISIBLE_HEIGHT, PANEL_WIDTH, clamp_panel_position};
pub use selection::{Selection, SelectionBridge, SelectionChange};
pub use toolbar::{ToolbarAction, ToolbarState};
pub use tree::{TreeError, TreeModel};
pub use viewport::{MAX_ZOOM, MIN_ZOOM, Viewport, ZOOM_STEP};
