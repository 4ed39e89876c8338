use egui_notify::{Anchor, Toast, Toasts};
use std::time::{Duration, Instant};

/// Repeats of the same text inside this window are dropped.
const DEDUP_WINDOW: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
}

/// Toast stack on top of egui-notify with short-window deduplication.
pub struct NotificationManager {
    toasts: Toasts,
    recent: Vec<(String, Instant)>,
}

impl NotificationManager {
    pub fn new() -> Self {
        let toasts = Toasts::new()
            .with_anchor(Anchor::BottomRight)
            .with_margin(egui::vec2(8.0, 32.0));

        Self {
            toasts,
            recent: Vec::new(),
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let message = message.into();
        if self.is_duplicate(&message) {
            return;
        }
        self.recent.push((message.clone(), Instant::now()));

        let mut toast = match level {
            NotificationLevel::Info => Toast::info(&message),
            NotificationLevel::Warning => Toast::warning(&message),
        };
        toast.duration(Some(match level {
            NotificationLevel::Info => Duration::from_secs(3),
            NotificationLevel::Warning => Duration::from_secs(5),
        }));
        self.toasts.add(toast);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Info, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Warning, message);
    }

    fn is_duplicate(&mut self, message: &str) -> bool {
        let now = Instant::now();
        self.recent
            .retain(|(_, shown)| now.duration_since(*shown) < DEDUP_WINDOW);
        self.recent.iter().any(|(msg, _)| msg == message)
    }

    /// Call once per frame.
    pub fn render(&mut self, ctx: &egui::Context) {
        self.toasts.show(ctx);
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}
