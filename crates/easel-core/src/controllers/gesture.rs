//! Drag and resize gesture shared by every controller.

use super::{GestureContext, GestureState, PointerInput, Response};
use crate::camera::zoom_scale;
use crate::elements::Element;
use crate::input::MouseButton;
use crate::selection::{handle_tolerance, hit_test_handles, resize_from_handle};
use kurbo::{Point, Rect};

/// Transient drag/resize state for one element.
///
/// Only the press-time box and pointer position are kept. Every move places
/// the box computed from them onto the element as it currently stands, so
/// replaying the same move yields the same geometry and changes made to the
/// element mid-gesture survive.
#[derive(Debug, Clone, Default)]
pub struct Gesture {
    state: GestureState,
    /// Box of the element when the gesture started.
    origin: Option<Rect>,
    /// Screen position of the press.
    anchor: Point,
}

impl Gesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Dragging | GestureState::Resizing(_))
    }

    /// Handle a press on `element`.
    ///
    /// A primary press on a handle of the selected element starts a resize; a
    /// primary press anywhere else on the body starts a drag. Locked elements
    /// never start a gesture.
    pub fn pointer_down(
        &mut self,
        element: &Element,
        is_selected: bool,
        input: &PointerInput,
        ctx: &GestureContext,
    ) -> Response {
        if input.button != MouseButton::Left || self.state != GestureState::Idle {
            return Response::NotHandled;
        }
        if element.is_locked() {
            log::debug!("Ignoring press on locked element {}", element.id());
            return Response::NotHandled;
        }

        if is_selected {
            let tolerance = handle_tolerance(ctx.handle_size, ctx.zoom);
            if let Some(handle) = hit_test_handles(element, input.canvas, tolerance) {
                self.begin(element, input.screen, GestureState::Resizing(handle));
                return Response::Handled;
            }
        }

        if element.contains_point(input.canvas.x, input.canvas.y) {
            self.begin(element, input.screen, GestureState::Dragging);
            return Response::Handled;
        }
        Response::NotHandled
    }

    fn begin(&mut self, element: &Element, screen: Point, state: GestureState) {
        log::debug!("Element {} {:?}", element.id(), state);
        self.state = state;
        self.origin = Some(element.rect());
        self.anchor = screen;
    }

    /// Apply the current pointer position to `current`.
    ///
    /// An element that became locked since the press stops the gesture where
    /// it is.
    pub fn pointer_move(
        &mut self,
        current: &Element,
        input: &PointerInput,
        ctx: &GestureContext,
    ) -> Response {
        let Some(origin) = self.origin else {
            return Response::NotHandled;
        };
        if current.is_locked() {
            log::debug!("Element {} locked mid-gesture", current.id());
            self.end();
            return Response::Handled;
        }
        let scale = zoom_scale(ctx.zoom);
        let delta = (input.screen - self.anchor) / scale;
        if !delta.x.is_finite() || !delta.y.is_finite() {
            log::warn!("Rejected non-finite gesture delta {delta:?}");
            return Response::NotHandled;
        }

        let start = current.with_rect(origin);
        let next = match self.state {
            GestureState::Dragging => start.moved_to(origin.origin() + delta),
            GestureState::Resizing(handle) => {
                resize_from_handle(&start, handle, delta, input.modifiers.shift, ctx.min_size)
            }
            GestureState::Idle | GestureState::Editing => return Response::NotHandled,
        };
        Response::Replace(next)
    }

    /// Release or pointer-leave: keep whatever geometry the last move
    /// produced and return to idle.
    pub fn end(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        log::debug!("Committed {:?}", self.state);
        self.state = GestureState::Idle;
        self.origin = None;
        true
    }

    pub(crate) fn set_editing(&mut self, editing: bool) {
        self.origin = None;
        self.state = if editing {
            GestureState::Editing
        } else {
            GestureState::Idle
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementKind, Theme};
    use crate::input::Modifiers;
    use crate::selection::{Corner, HandleKind};

    fn ctx(zoom: f64) -> GestureContext {
        GestureContext {
            zoom,
            min_size: 20.0,
            handle_size: 10.0,
        }
    }

    fn input(screen: Point, zoom: f64) -> PointerInput {
        let scale = zoom / 100.0;
        PointerInput {
            screen,
            canvas: Point::new(screen.x / scale, screen.y / scale),
            button: MouseButton::Left,
            modifiers: Modifiers::default(),
            double_click: false,
        }
    }

    fn image_at(x: f64, y: f64) -> Element {
        Element::create(ElementKind::Image, Point::new(x, y), Theme::Light)
    }

    #[test]
    fn test_drag_at_half_zoom() {
        let element = image_at(50.0, 50.0);
        let mut gesture = Gesture::new();
        let press = Point::new(60.0, 60.0);

        assert_eq!(
            gesture.pointer_down(&element, true, &input(press, 50.0), &ctx(50.0)),
            Response::Handled
        );
        assert_eq!(gesture.state(), GestureState::Dragging);

        let moved = gesture.pointer_move(&element, &input(Point::new(100.0, 50.0), 50.0), &ctx(50.0));
        let Response::Replace(moved) = moved else {
            panic!("expected a replacement");
        };
        assert!((moved.base().x - 130.0).abs() < 1e-9);
        assert!((moved.base().y - 30.0).abs() < 1e-9);

        assert!(gesture.end());
        assert_eq!(gesture.state(), GestureState::Idle);
    }

    #[test]
    fn test_moves_are_idempotent() {
        let element = image_at(0.0, 0.0);
        let mut gesture = Gesture::new();
        gesture.pointer_down(&element, false, &input(Point::new(10.0, 10.0), 100.0), &ctx(100.0));

        let target = input(Point::new(40.0, 25.0), 100.0);
        let Response::Replace(first) = gesture.pointer_move(&element, &target, &ctx(100.0)) else {
            panic!("expected a replacement");
        };
        let second = gesture.pointer_move(&first, &target, &ctx(100.0));
        assert_eq!(second, Response::Replace(first));
    }

    #[test]
    fn test_locked_element_ignores_press() {
        let element = image_at(0.0, 0.0).toggled_lock();
        let mut gesture = Gesture::new();
        let response = gesture.pointer_down(&element, true, &input(Point::new(10.0, 10.0), 100.0), &ctx(100.0));
        assert_eq!(response, Response::NotHandled);
        assert_eq!(gesture.state(), GestureState::Idle);
    }

    #[test]
    fn test_handle_needs_selection() {
        let element = image_at(0.0, 0.0);
        let corner = Point::new(400.0, 300.0);

        let mut gesture = Gesture::new();
        gesture.pointer_down(&element, false, &input(corner, 100.0), &ctx(100.0));
        assert_eq!(gesture.state(), GestureState::Dragging);

        let mut gesture = Gesture::new();
        gesture.pointer_down(&element, true, &input(corner, 100.0), &ctx(100.0));
        assert_eq!(
            gesture.state(),
            GestureState::Resizing(HandleKind::Corner(Corner::BottomRight))
        );
    }

    #[test]
    fn test_resize_commits_floor() {
        let element = image_at(0.0, 0.0);
        let mut gesture = Gesture::new();
        gesture.pointer_down(&element, true, &input(Point::new(400.0, 300.0), 100.0), &ctx(100.0));

        let Response::Replace(resized) =
            gesture.pointer_move(&element, &input(Point::new(-500.0, -500.0), 100.0), &ctx(100.0))
        else {
            panic!("expected a replacement");
        };
        assert!((resized.base().width - 20.0).abs() < 1e-9);
        assert!((resized.base().height - 20.0).abs() < 1e-9);
        assert!(gesture.end());
        assert!(!gesture.end());
    }

    #[test]
    fn test_secondary_button_ignored() {
        let element = image_at(0.0, 0.0);
        let mut gesture = Gesture::new();
        let mut press = input(Point::new(10.0, 10.0), 100.0);
        press.button = MouseButton::Right;
        assert_eq!(gesture.pointer_down(&element, true, &press, &ctx(100.0)), Response::NotHandled);
    }

    #[test]
    fn test_move_keeps_mid_gesture_changes() {
        let element = image_at(0.0, 0.0);
        let mut gesture = Gesture::new();
        gesture.pointer_down(&element, false, &input(Point::new(10.0, 10.0), 100.0), &ctx(100.0));

        let current = element.with_opacity(0.4).rotated(30.0);
        let Response::Replace(moved) =
            gesture.pointer_move(&current, &input(Point::new(30.0, 10.0), 100.0), &ctx(100.0))
        else {
            panic!("expected a replacement");
        };
        assert!((moved.base().x - 20.0).abs() < 1e-9);
        assert!((moved.base().opacity - 0.4).abs() < 1e-9);
        assert!((moved.base().rotation - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_lock_mid_gesture_stops_it() {
        let element = image_at(0.0, 0.0);
        let mut gesture = Gesture::new();
        gesture.pointer_down(&element, false, &input(Point::new(10.0, 10.0), 100.0), &ctx(100.0));

        let locked = element.toggled_lock();
        let response = gesture.pointer_move(&locked, &input(Point::new(90.0, 90.0), 100.0), &ctx(100.0));
        assert_eq!(response, Response::Handled);
        assert_eq!(gesture.state(), GestureState::Idle);
        assert!(!gesture.end());
    }
}
