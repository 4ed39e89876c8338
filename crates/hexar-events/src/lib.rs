use crossbeam_channel::{Receiver, Sender, unbounded};
use hexar_core::{ComponentType, NodeId, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    // Tree
    NodeAdded {
        id: NodeId,
        kind: ComponentType,
        parent: Option<NodeId>,
    },
    /// `removed` is the full descendant closure, including `id`.
    NodeDeleted {
        id: NodeId,
        removed: Vec<NodeId>,
    },
    NodeMoved {
        id: NodeId,
        position: Vec2,
    },
    NodeRenamed {
        id: NodeId,
        label: String,
    },

    // Selection
    SelectionChanged {
        id: Option<NodeId>,
    },

    // Viewport
    ViewportChanged {
        zoom: f32,
        pan: Vec2,
    },

    // Notifications
    ShowInfo {
        message: String,
    },
    ShowWarning {
        message: String,
    },

    // Routing
    OpenProject {
        id: String,
    },
}

#[derive(Clone)]
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    pub fn receiver(&self) -> Receiver<Event> {
        self.rx.clone()
    }

    pub fn publish(&self, event: Event) {
        tracing::trace!("publish {:?}", event);
        let _ = self.tx.send(event);
    }

    /// Dispatch all pending events to a listener.
    /// Call once per frame from the UI loop.
    pub fn dispatch_to<L: EventListener>(&self, listener: &mut L) {
        while let Ok(event) = self.rx.try_recv() {
            listener.handle_event(&event);
        }
    }
}

/// Trait for components that respond to events.
pub trait EventListener {
    fn handle_event(&mut self, event: &Event);
}
