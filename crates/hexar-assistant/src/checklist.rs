use hexar_core::ComponentType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TroubleshootingStep {
    pub number: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub status: StepStatus,
}

impl TroubleshootingStep {
    pub fn is_completed(&self) -> bool {
        self.status == StepStatus::Completed
    }

    pub fn toggle(&mut self) {
        self.status = match self.status {
            StepStatus::Pending => StepStatus::Completed,
            StepStatus::Completed => StepStatus::Pending,
        };
    }
}

type StepText = (&'static str, &'static str);

const SYSTEM_STEPS: [StepText; 4] = [
    (
        "Check System Power",
        "Verify the main power supply is connected and delivering correct voltage.",
    ),
    (
        "Review Error Logs",
        "Check system logs for any error messages or warnings.",
    ),
    (
        "Verify Connections",
        "Inspect all cable connections for loose or damaged wires.",
    ),
    (
        "Run Diagnostics",
        "Execute built-in diagnostic tests to identify failing components.",
    ),
];

const MECHANICAL_STEPS: [StepText; 4] = [
    (
        "Visual Inspection",
        "Look for physical damage, wear, or misalignment in mechanical parts.",
    ),
    (
        "Check Lubrication",
        "Ensure all moving parts are properly lubricated.",
    ),
    (
        "Test Movement",
        "Manually move components to check for binding or resistance.",
    ),
    (
        "Measure Tolerances",
        "Use measuring tools to verify components are within specification.",
    ),
];

const ELECTRICAL_STEPS: [StepText; 4] = [
    (
        "Check Power Supply",
        "Measure voltage at the component input terminals.",
    ),
    (
        "Test Continuity",
        "Use a multimeter to check wire continuity and resistance.",
    ),
    (
        "Inspect Connections",
        "Look for corroded, loose, or damaged electrical connections.",
    ),
    (
        "Verify Grounding",
        "Ensure proper grounding throughout the electrical system.",
    ),
];

const ELECTRONICS_STEPS: [StepText; 4] = [
    (
        "Check Power Rails",
        "Measure all voltage rails to ensure they are within tolerance.",
    ),
    (
        "Test Signal Integrity",
        "Use an oscilloscope to verify signal quality and timing.",
    ),
    (
        "Firmware Check",
        "Verify the firmware version and consider updating if outdated.",
    ),
    (
        "Temperature Check",
        "Monitor component temperatures under load conditions.",
    ),
];

const SOFTWARE_STEPS: [StepText; 4] = [
    (
        "Check Logs",
        "Review application logs for errors or exceptions.",
    ),
    (
        "Verify Configuration",
        "Ensure all configuration files are correct and up to date.",
    ),
    (
        "Test Connectivity",
        "Check network connections and API endpoints.",
    ),
    (
        "Restart Services",
        "Restart affected services and monitor for issues.",
    ),
];

/// Four-step diagnostic checklist for a component type, all steps pending.
pub fn checklist_for(kind: ComponentType) -> Vec<TroubleshootingStep> {
    let texts = match kind {
        ComponentType::System => &SYSTEM_STEPS,
        ComponentType::Mechanical => &MECHANICAL_STEPS,
        ComponentType::Electrical => &ELECTRICAL_STEPS,
        ComponentType::Electronics => &ELECTRONICS_STEPS,
        ComponentType::Software => &SOFTWARE_STEPS,
    };
    texts
        .iter()
        .zip(1u8..)
        .map(|(&(title, description), number)| TroubleshootingStep {
            number,
            title,
            description,
            status: StepStatus::Pending,
        })
        .collect()
}
