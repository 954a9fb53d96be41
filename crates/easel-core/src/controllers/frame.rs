//! Frame controller.

use super::Gesture;
use crate::elements::ElementId;

/// Controller for a frame element. Frames only move and resize; their eight
/// handles come from the selection module.
#[derive(Debug, Clone)]
pub struct FrameController {
    element_id: ElementId,
    gesture: Gesture,
}

impl FrameController {
    pub fn new(element_id: ElementId) -> Self {
        Self {
            element_id,
            gesture: Gesture::new(),
        }
    }

    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn gesture_mut(&mut self) -> &mut Gesture {
        &mut self.gesture
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::{GestureContext, GestureState, PointerInput, Response};
    use crate::elements::{Element, ElementKind, Theme};
    use crate::input::{Modifiers, MouseButton};
    use crate::selection::{Edge, HandleKind};
    use kurbo::Point;

    #[test]
    fn test_edge_handle_resizes_one_axis() {
        let frame = Element::create(ElementKind::Frame, Point::ZERO, Theme::Light);
        let mut controller = FrameController::new(frame.id());
        let ctx = GestureContext {
            zoom: 100.0,
            min_size: 20.0,
            handle_size: 10.0,
        };
        let at = |x: f64, y: f64| PointerInput {
            screen: Point::new(x, y),
            canvas: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers::default(),
            double_click: false,
        };

        // Right edge midpoint of a 400x300 frame.
        controller.gesture_mut().pointer_down(&frame, true, &at(400.0, 150.0), &ctx);
        assert_eq!(
            controller.gesture().state(),
            GestureState::Resizing(HandleKind::Edge(Edge::Right))
        );

        let Response::Replace(resized) = controller.gesture_mut().pointer_move(&frame, &at(450.0, 190.0), &ctx) else {
            panic!("expected a replacement");
        };
        assert!((resized.base().width - 450.0).abs() < 1e-9);
        assert!((resized.base().height - 300.0).abs() < 1e-9);
        assert!(controller.gesture_mut().end());
    }
}
