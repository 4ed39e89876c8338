pub mod assistant_panel;
pub mod canvas;
pub mod notifications;
pub mod palette;
pub mod status_bar;
pub mod toolbar;
