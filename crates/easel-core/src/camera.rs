//! Camera module for pan/zoom transforms.
//!
//! Zoom is expressed as a percentage (100 = one canvas unit per screen
//! pixel) and the pan offset is the screen-space position of the canvas
//! origin. The free functions are the pure transform; [`Camera`] wraps them
//! with the clamping and rejection rules of the viewport.

use crate::config::EditorConfig;
use crate::input::WheelEvent;
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom percentage on mount.
pub const DEFAULT_ZOOM: f64 = 100.0;
/// Lowest zoom percentage.
pub const MIN_ZOOM: f64 = 25.0;
/// Highest zoom percentage.
pub const MAX_ZOOM: f64 = 200.0;

/// Scale factor (screen pixels per canvas unit) for a zoom percentage.
pub fn zoom_scale(zoom: f64) -> f64 {
    zoom / 100.0
}

/// Clamp a zoom percentage into `[min, max]`.
///
/// NaN has no meaningful position in the range and maps to the default zoom
/// (itself clamped).
pub fn clamp_zoom_in(zoom: f64, min: f64, max: f64) -> f64 {
    if zoom.is_nan() {
        return DEFAULT_ZOOM.clamp(min, max);
    }
    zoom.clamp(min, max)
}

/// Clamp a zoom percentage into the standard `[25, 200]` range.
pub fn clamp_zoom(zoom: f64) -> f64 {
    clamp_zoom_in(zoom, MIN_ZOOM, MAX_ZOOM)
}

/// Convert a screen point to canvas coordinates.
pub fn to_canvas_point(screen: Point, zoom: f64, pan: Vec2) -> Point {
    let scale = zoom_scale(zoom);
    Point::new((screen.x - pan.x) / scale, (screen.y - pan.y) / scale)
}

/// Convert a canvas point to screen coordinates.
pub fn to_screen_point(canvas: Point, zoom: f64, pan: Vec2) -> Point {
    let scale = zoom_scale(zoom);
    Point::new(canvas.x * scale + pan.x, canvas.y * scale + pan.y)
}

/// Multiplicative zoom factor for a vertical wheel delta.
pub fn wheel_zoom_factor(delta_y: f64, sensitivity: f64) -> f64 {
    (-delta_y * sensitivity).exp()
}

/// Solve the pan offset that keeps `anchor` over the same canvas point when
/// moving from `old_zoom` to `new_zoom`.
pub fn anchored_pan(anchor: Point, old_zoom: f64, new_zoom: f64, pan: Vec2) -> Vec2 {
    let canvas = to_canvas_point(anchor, old_zoom, pan);
    let scale = zoom_scale(new_zoom);
    Vec2::new(anchor.x - canvas.x * scale, anchor.y - canvas.y * scale)
}

fn is_finite_vec(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

fn is_finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Camera manages the view transform for the canvas.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between screen coordinates and canvas coordinates. Mutators
/// return whether the state changed; invalid input leaves it untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Screen-space translation of the canvas origin (pan).
    pub offset: Vec2,
    /// Current zoom percentage.
    pub zoom: f64,
    /// Minimum allowed zoom percentage.
    pub min_zoom: f64,
    /// Maximum allowed zoom percentage.
    pub max_zoom: f64,
    /// Zoom percentage restored by [`Camera::reset`].
    pub default_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            default_zoom: DEFAULT_ZOOM,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera using the zoom limits of a configuration.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: config.default_zoom,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            default_zoom: config.default_zoom,
        }
    }

    /// Screen pixels per canvas unit.
    pub fn scale(&self) -> f64 {
        zoom_scale(self.zoom)
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts canvas coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale())
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to canvas coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale()) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        to_canvas_point(screen_point, self.zoom, self.offset)
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        to_screen_point(canvas_point, self.zoom, self.offset)
    }

    /// The canvas-space rectangle visible through a viewport of `size`.
    pub fn visible_canvas_rect(&self, size: Size) -> Rect {
        let top_left = self.screen_to_canvas(Point::ZERO);
        let bottom_right = self.screen_to_canvas(Point::new(size.width, size.height));
        Rect::from_points(top_left, bottom_right)
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) -> bool {
        let next = self.offset + delta;
        if !is_finite_vec(delta) || !is_finite_vec(next) {
            log::warn!("Rejected non-finite pan delta {delta:?}");
            return false;
        }
        if delta == Vec2::ZERO {
            return false;
        }
        self.offset = next;
        true
    }

    /// Set the zoom percentage, keeping the given screen point fixed.
    pub fn set_zoom_at(&mut self, screen_point: Point, zoom: f64) -> bool {
        if !zoom.is_finite() || !is_finite_point(screen_point) {
            log::warn!("Rejected non-finite zoom {zoom} at {screen_point:?}");
            return false;
        }
        let new_zoom = clamp_zoom_in(zoom, self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return false;
        }

        let new_offset = anchored_pan(screen_point, self.zoom, new_zoom, self.offset);
        if !is_finite_vec(new_offset) {
            log::warn!("Rejected zoom producing non-finite offset {new_offset:?}");
            return false;
        }

        self.zoom = new_zoom;
        self.offset = new_offset;
        true
    }

    /// Zoom the camera by a multiplicative factor, keeping the given screen
    /// point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("Rejected zoom factor {factor}");
            return false;
        }
        self.set_zoom_at(screen_point, self.zoom * factor)
    }

    /// Apply a wheel event: ctrl/meta zooms around the pointer, anything else
    /// pans by the (denormalised) delta.
    pub fn apply_wheel(&mut self, event: &WheelEvent, config: &EditorConfig) -> bool {
        let delta = event.pixel_delta(config.line_scroll_px, config.page_scroll_px);
        if !is_finite_vec(delta) || !is_finite_point(event.position) {
            log::warn!("Rejected non-finite wheel event {event:?}");
            return false;
        }

        if event.modifiers.ctrl || event.modifiers.meta {
            let factor = wheel_zoom_factor(delta.y, config.wheel_zoom_sensitivity);
            return self.zoom_at(event.position, factor);
        }

        let delta = if event.modifiers.shift && delta.x == 0.0 {
            Vec2::new(delta.y, 0.0)
        } else {
            delta
        };
        self.pan(-delta)
    }

    /// Zoom in by `step` percent, keeping the canvas point under the screen
    /// point `anchor` in place.
    pub fn zoom_in(&mut self, step: f64, anchor: Point) -> bool {
        self.set_zoom_at(anchor, self.zoom + step)
    }

    /// Zoom out by `step` percent around the screen point `anchor`.
    pub fn zoom_out(&mut self, step: f64, anchor: Point) -> bool {
        self.set_zoom_at(anchor, self.zoom - step)
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = self.default_zoom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{DeltaMode, Modifiers};

    fn wheel(position: Point, delta: Vec2, modifiers: Modifiers) -> WheelEvent {
        WheelEvent {
            position,
            delta,
            mode: DeltaMode::Pixel,
            modifiers,
        }
    }

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Modifiers::default()
        }
    }

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.zoom - DEFAULT_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_zoom_range() {
        for z in [-1e9, -5.0, 0.0, 10.0, 25.0, 99.0, 200.0, 201.0, 1e12, f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let clamped = clamp_zoom(z);
            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&clamped), "{z} -> {clamped}");
        }
        assert!((clamp_zoom(150.0) - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_canvas_with_offset() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(50.0, 100.0);
        let canvas = camera.screen_to_canvas(Point::new(100.0, 200.0));
        assert!((canvas.x - 50.0).abs() < f64::EPSILON);
        assert!((canvas.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_canvas_with_zoom() {
        let mut camera = Camera::new();
        camera.zoom = 200.0;
        let canvas = camera.screen_to_canvas(Point::new(100.0, 200.0));
        assert!((canvas.x - 50.0).abs() < f64::EPSILON);
        assert!((canvas.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let pans = [Vec2::ZERO, Vec2::new(30.0, -20.0), Vec2::new(-1234.5, 987.25)];
        let zooms = [25.0, 33.3, 100.0, 150.0, 200.0];
        let original = Point::new(123.0, 456.0);
        for &pan in &pans {
            for &zoom in &zooms {
                let canvas = to_canvas_point(original, zoom, pan);
                let back = to_screen_point(canvas, zoom, pan);
                assert!((back.x - original.x).abs() < 1e-9);
                assert!((back.y - original.y).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_transform_matches_point_functions() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(12.0, -7.0);
        camera.zoom = 150.0;
        let p = Point::new(40.0, 80.0);
        let via_affine = camera.transform() * p;
        let via_fn = camera.canvas_to_screen(p);
        assert!((via_affine.x - via_fn.x).abs() < 1e-9);
        assert!((via_affine.y - via_fn.y).abs() < 1e-9);
        let back = camera.inverse_transform() * via_affine;
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_zoom_preserves_anchor() {
        let config = EditorConfig::default();
        let mut camera = Camera::new();
        let anchor = Point::new(200.0, 200.0);
        let before = camera.screen_to_canvas(anchor);

        assert!(camera.apply_wheel(&wheel(anchor, Vec2::new(0.0, -100.0), ctrl()), &config));

        let expected = 100.0 * 0.1f64.exp();
        assert!((camera.zoom - expected).abs() < 1e-9);
        let after = camera.screen_to_canvas(anchor);
        assert!((after.x - before.x).abs() < 1e-9);
        assert!((after.y - before.y).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_preserved_from_any_start() {
        let starts = [(25.0, Vec2::new(-300.0, 40.0)), (80.0, Vec2::new(5.0, 5.0)), (190.0, Vec2::new(1000.0, -2.5))];
        let deltas = [-500.0, -120.0, -1.0, 3.0, 250.0, 900.0];
        let anchor = Point::new(321.0, 77.0);
        for &(zoom, pan) in &starts {
            for &dy in &deltas {
                let mut camera = Camera::new();
                camera.zoom = zoom;
                camera.offset = pan;
                let before = camera.screen_to_canvas(anchor);
                camera.zoom_at(anchor, wheel_zoom_factor(dy, 0.001));
                let after = camera.screen_to_canvas(anchor);
                assert!((after.x - before.x).abs() < 1e-6);
                assert!((after.y - before.y).abs() < 1e-6);
                assert!((MIN_ZOOM..=MAX_ZOOM).contains(&camera.zoom));
            }
        }
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 0.001);
        assert!((camera.zoom - MIN_ZOOM).abs() < f64::EPSILON);

        camera.zoom_at(Point::ZERO, 1000.0);
        assert!((camera.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_plain_wheel_pans() {
        let config = EditorConfig::default();
        let mut camera = Camera::new();
        assert!(camera.apply_wheel(&wheel(Point::ZERO, Vec2::new(10.0, 30.0), Modifiers::default()), &config));
        assert_eq!(camera.offset, Vec2::new(-10.0, -30.0));
        assert!((camera.zoom - DEFAULT_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_line_mode_wheel_is_denormalised() {
        let config = EditorConfig::default();
        let mut camera = Camera::new();
        let event = WheelEvent {
            position: Point::ZERO,
            delta: Vec2::new(0.0, 3.0),
            mode: DeltaMode::Line,
            modifiers: Modifiers::default(),
        };
        camera.apply_wheel(&event, &config);
        assert!((camera.offset.y + 3.0 * config.line_scroll_px).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let config = EditorConfig::default();
        let mut camera = Camera::new();
        camera.offset = Vec2::new(4.0, 2.0);

        assert!(!camera.pan(Vec2::new(f64::NAN, 0.0)));
        assert!(!camera.apply_wheel(&wheel(Point::ZERO, Vec2::new(0.0, f64::INFINITY), ctrl()), &config));
        assert!(!camera.apply_wheel(&wheel(Point::new(f64::NAN, 0.0), Vec2::new(0.0, -10.0), ctrl()), &config));
        assert!(!camera.set_zoom_at(Point::ZERO, f64::NAN));

        assert_eq!(camera.offset, Vec2::new(4.0, 2.0));
        assert!((camera.zoom - DEFAULT_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_steps_and_reset() {
        let mut camera = Camera::new();
        let centre = Point::new(400.0, 300.0);
        camera.pan(Vec2::new(40.0, -20.0));
        let before = camera.screen_to_canvas(centre);
        camera.zoom_in(10.0, centre);
        assert!((camera.zoom - 110.0).abs() < 1e-9);
        assert!((camera.screen_to_canvas(centre) - before).hypot() < 1e-9);
        for _ in 0..20 {
            camera.zoom_out(10.0, centre);
        }
        assert!((camera.screen_to_canvas(centre) - before).hypot() < 1e-9);
        assert!((camera.zoom - MIN_ZOOM).abs() < f64::EPSILON);

        camera.pan(Vec2::new(10.0, 20.0));
        camera.reset();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.zoom - DEFAULT_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_visible_rect() {
        let mut camera = Camera::new();
        camera.zoom = 200.0;
        camera.offset = Vec2::new(100.0, 0.0);
        let rect = camera.visible_canvas_rect(Size::new(800.0, 600.0));
        assert!((rect.x0 + 50.0).abs() < 1e-9);
        assert!((rect.x1 - 350.0).abs() < 1e-9);
        assert!((rect.y1 - 300.0).abs() < 1e-9);
    }
}
