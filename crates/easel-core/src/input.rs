//! Input state management for pointer, wheel and keyboard events.
//!
//! Hosts translate their native events into the types here; the canvas only
//! ever sees screen-space positions and already-normalised key names.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// Use web_time for WASM compatibility
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
    /// The pointer left the interactive surface. Treated like a release of
    /// every held button.
    Leave { position: Point },
}

impl PointerEvent {
    /// Screen position carried by the event.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Leave { position } => *position,
        }
    }
}

/// Unit of a wheel delta as reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

/// A wheel (or trackpad scroll/pinch) event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    /// Pointer position in screen coordinates.
    pub position: Point,
    /// Raw delta in `mode` units.
    pub delta: Vec2,
    #[serde(default)]
    pub mode: DeltaMode,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl WheelEvent {
    /// A pixel-mode wheel event without modifiers.
    pub fn pixels(position: Point, delta: Vec2) -> Self {
        Self {
            position,
            delta,
            mode: DeltaMode::Pixel,
            modifiers: Modifiers::default(),
        }
    }

    /// Delta converted to screen pixels.
    pub fn pixel_delta(&self, line_px: f64, page_px: f64) -> Vec2 {
        match self.mode {
            DeltaMode::Pixel => self.delta,
            DeltaMode::Line => self.delta * line_px,
            DeltaMode::Page => self.delta * page_px,
        }
    }
}

/// Keyboard event type. Keys are named the way browsers name them
/// (`"Delete"`, `"Backspace"`, `"Escape"`, `"a"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME_MS: u128 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Tracks the current input state across frames.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Current pointer position in screen coordinates.
    pub pointer_position: Point,
    /// Previous pointer position for delta calculations.
    pub previous_pointer_position: Point,
    /// Currently pressed mouse buttons.
    pressed_buttons: HashSet<MouseButton>,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
    last_click_time: Option<Instant>,
    last_click_position: Option<Point>,
    double_click_detected: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer_position: Point::ZERO,
            previous_pointer_position: Point::ZERO,
            pressed_buttons: HashSet::new(),
            modifiers: Modifiers::default(),
            last_click_time: None,
            last_click_position: None,
            double_click_detected: false,
        }
    }
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the start of each frame to reset per-frame state.
    pub fn begin_frame(&mut self) {
        self.previous_pointer_position = self.pointer_position;
        self.double_click_detected = false;
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        self.handle_pointer_event_at(event, Instant::now());
    }

    /// Process a pointer event that happened at `now`.
    ///
    /// Releases always take effect; a non-finite position only leaves the
    /// tracked pointer position where it was.
    pub fn handle_pointer_event_at(&mut self, event: PointerEvent, now: Instant) {
        let position = event.position();
        if position.x.is_finite() && position.y.is_finite() {
            self.pointer_position = position;
        }
        match event {
            PointerEvent::Down { position, button } => {
                self.pressed_buttons.insert(button);
                if button == MouseButton::Left {
                    self.detect_double_click(position, now);
                }
            }
            PointerEvent::Up { button, .. } => {
                self.pressed_buttons.remove(&button);
            }
            PointerEvent::Move { .. } => {}
            PointerEvent::Leave { .. } => self.pressed_buttons.clear(),
        }
    }

    fn detect_double_click(&mut self, position: Point, now: Instant) {
        if let (Some(last_time), Some(last_pos)) = (self.last_click_time, self.last_click_position) {
            let elapsed = now.saturating_duration_since(last_time).as_millis();
            let distance = (position - last_pos).hypot();
            if elapsed < DOUBLE_CLICK_TIME_MS && distance < DOUBLE_CLICK_DISTANCE {
                self.double_click_detected = true;
                // A third click starts a new sequence rather than chaining.
                self.last_click_time = None;
                self.last_click_position = None;
                return;
            }
        }
        self.last_click_time = Some(now);
        self.last_click_position = Some(position);
    }

    /// Update modifier keys state.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Check if the last left press completed a double-click.
    pub fn is_double_click(&self) -> bool {
        self.double_click_detected
    }

    /// Get the pointer movement delta since last frame.
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer_position - self.previous_pointer_position
    }
}
