use hexar_core::Vec2;
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 2.0;
pub const ZOOM_STEP: f32 = 0.1;

// Zoom is held in whole steps so repeated in/out never drifts.
const MIN_STEPS: i32 = 5;
const MAX_STEPS: i32 = 20;
const STEPS_PER_UNIT: f32 = 10.0;

/// Pan/zoom of the scene layer: `screen = scene * zoom + pan`.
///
/// Screen coordinates here are canvas-local (pointer minus canvas origin).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pan: Vec2,
    zoom_steps: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom_steps: STEPS_PER_UNIT as i32,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom_steps as f32 / STEPS_PER_UNIT
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn set_pan(&mut self, pan: Vec2) {
        self.pan = pan;
    }

    /// Set zoom, snapped to the nearest step and clamped to [`MIN_ZOOM`, `MAX_ZOOM`].
    pub fn set_zoom(&mut self, zoom: f32) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom_steps = ((zoom * STEPS_PER_UNIT).round() as i32).clamp(MIN_STEPS, MAX_STEPS);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_steps = (self.zoom_steps + 1).min(MAX_STEPS);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_steps = (self.zoom_steps - 1).max(MIN_STEPS);
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom_steps < MAX_STEPS
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom_steps > MIN_STEPS
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.zoom_steps * 10) as u32
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn screen_to_scene(&self, screen: Vec2) -> Vec2 {
        (screen - self.pan) / self.zoom()
    }

    pub fn scene_to_screen(&self, scene: Vec2) -> Vec2 {
        scene * self.zoom() + self.pan
    }
}
