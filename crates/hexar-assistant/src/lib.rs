//! Troubleshooting assistant that reads the component tree.
//!
//! Replies are canned: keyword detection plus per-type checklists. The
//! assistant only ever sees the tree read-only, through `(nodes, selected)`.

pub mod checklist;

pub use checklist::{StepStatus, TroubleshootingStep, checklist_for};

use chrono::{DateTime, Local};
use hexar_core::{Node, NodeId};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const DEFAULT_REPLY_LATENCY: Duration = Duration::from_millis(1500);

pub const GREETING: &str = "Hello! I'm your Hexar AI Assistant. I can help you with fault \
diagnosis and troubleshooting. Select a component from your tree or describe an issue you're \
experiencing.";

const TROUBLESHOOTING_KEYWORDS: [&str; 8] = [
    "problem",
    "issue",
    "error",
    "fault",
    "not working",
    "broken",
    "diagnose",
    "troubleshoot",
];

/// Quick actions are offered until the transcript reaches this many messages.
const QUICK_ACTION_MESSAGE_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub query: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 3] = [
    QuickAction {
        label: "Diagnose Issue",
        query: "I have a problem with this component",
    },
    QuickAction {
        label: "Check Connections",
        query: "How do I check the connections?",
    },
    QuickAction {
        label: "Get Recommendations",
        query: "What are common issues to look for?",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    Assistant,
    User,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    /// `HH:MM`, as shown under each bubble.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

#[derive(Debug, Clone)]
struct PendingReply {
    query: String,
    due: Instant,
}

pub fn is_troubleshooting_query(query: &str) -> bool {
    let lowered = query.to_lowercase();
    TROUBLESHOOTING_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

#[derive(Debug)]
pub struct Assistant {
    messages: Vec<Message>,
    checklist: Option<Vec<TroubleshootingStep>>,
    pending: Option<PendingReply>,
    latency: Duration,
    last_selected: Option<NodeId>,
    rng: SmallRng,
    /// Text currently typed in the input box.
    pub input: String,
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_LATENCY)
    }
}

impl Assistant {
    pub fn new(latency: Duration) -> Self {
        Self::with_rng(latency, SmallRng::from_rng(&mut rand::rng()))
    }

    /// Deterministic template choice, for tests.
    pub fn with_seed(latency: Duration, seed: u64) -> Self {
        Self::with_rng(latency, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(latency: Duration, rng: SmallRng) -> Self {
        Self {
            messages: vec![Message::new(MessageRole::Assistant, GREETING)],
            checklist: None,
            pending: None,
            latency,
            last_selected: None,
            rng,
            input: String::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn checklist(&self) -> Option<&[TroubleshootingStep]> {
        self.checklist.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn set_latency(&mut self, latency: Duration) {
        self.latency = latency;
    }

    pub fn quick_actions(&self) -> &'static [QuickAction] {
        if self.messages.len() < QUICK_ACTION_MESSAGE_LIMIT {
            &QUICK_ACTIONS
        } else {
            &[]
        }
    }

    pub fn apply_quick_action(&mut self, action: &QuickAction) {
        self.input = action.query.to_string();
    }

    /// Called when the selection bridge reports a change.
    ///
    /// Appends one context message per newly selected node; clearing the
    /// selection is silent.
    pub fn on_selection_changed(&mut self, selected: Option<&Node>) {
        let selected_id = selected.map(|node| node.id.clone());
        if selected_id == self.last_selected {
            return;
        }
        self.last_selected = selected_id;
        if let Some(node) = selected {
            self.messages.push(Message::new(
                MessageRole::System,
                format!("Selected component: {} ({})", node.label, node.kind.token()),
            ));
        }
    }

    /// Queue `query` as a user message. Returns `false` if it was blank.
    ///
    /// A reply still pending for an earlier message is dropped.
    pub fn send(&mut self, query: &str, now: Instant) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        if self.pending.take().is_some() {
            tracing::debug!("Assistant reply superseded by a new message");
        }
        self.messages
            .push(Message::new(MessageRole::User, query.to_string()));
        self.checklist = None;
        self.pending = Some(PendingReply {
            query: query.to_string(),
            due: now + self.latency,
        });
        tracing::debug!("Assistant reply scheduled in {:?}", self.latency);
        true
    }

    /// Send the input box contents, clearing it when accepted.
    pub fn submit_input(&mut self, now: Instant) -> bool {
        let query = std::mem::take(&mut self.input);
        let sent = self.send(&query, now);
        if !sent {
            self.input = query;
        }
        sent
    }

    pub fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!("Assistant reply cancelled");
        }
    }

    /// Append the pending reply once it is due. Returns `true` if a reply landed.
    pub fn poll<'a, I>(&mut self, now: Instant, nodes: I, selected: Option<&Node>) -> bool
    where
        I: IntoIterator<Item = &'a Node>,
    {
        let Some(pending) = self.pending.as_ref() else {
            return false;
        };
        if now < pending.due {
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };
        let node_count = nodes.into_iter().count();
        let reply = self.compose_reply(&pending.query, node_count, selected);
        self.messages.push(Message::new(MessageRole::Assistant, reply));
        true
    }

    /// Time left until the pending reply is due, for repaint scheduling.
    pub fn time_until_reply(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|pending| pending.due.saturating_duration_since(now))
    }

    pub fn toggle_step(&mut self, index: usize) {
        if let Some(step) = self
            .checklist
            .as_mut()
            .and_then(|steps| steps.get_mut(index))
        {
            step.toggle();
        }
    }

    fn compose_reply(&mut self, query: &str, node_count: usize, selected: Option<&Node>) -> String {
        if let Some(node) = selected.filter(|_| is_troubleshooting_query(query)) {
            self.checklist = Some(checklist_for(node.kind));
            return format!(
                "I've analyzed the {} component. Here's a systematic troubleshooting guide:",
                node.label
            );
        }

        let subject = selected.map_or("system", |node| node.label.as_str());
        match self.rng.random_range(0..4) {
            0 => format!(
                "Based on your {node_count} component tree, I can help you identify potential \
                 issues. What specific behavior are you observing?"
            ),
            1 => format!(
                "For the {subject} component, common issues include connectivity problems, \
                 sensor calibration, and power supply irregularities. Would you like me to \
                 elaborate on any of these?"
            ),
            2 => "I recommend checking the following areas: component connections, power supply \
                  stability, and sensor readings. Shall I create a diagnostic checklist?"
                .to_string(),
            _ => "This type of issue often relates to the communication between components. \
                  Let's trace the signal path from the root to the affected component."
                .to_string(),
        }
    }
}
