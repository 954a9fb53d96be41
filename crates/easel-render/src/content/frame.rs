//! Frame content: a rounded fill with a border.

use super::{ContentRenderer, RenderState};
use crate::output::{DrawCommand, StrokeStyle};
use easel_core::elements::FrameElement;

impl ContentRenderer for FrameElement {
    fn render_content(&self, _state: &RenderState, out: &mut Vec<DrawCommand>) {
        let outline = self.outline();
        let stroke = (self.border_width > 0.0)
            .then(|| StrokeStyle::solid(self.border_color, self.border_width));
        out.push(DrawCommand::RoundedRect {
            rect: outline.rect(),
            radius: outline.radii().top_left,
            fill: Some(self.background_color),
            stroke,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::elements::Theme;
    use kurbo::Point;

    fn state() -> RenderState {
        RenderState {
            is_selected: false,
            is_editing: false,
            theme: Theme::Light,
            zoom: 100.0,
            handle_size: 10.0,
        }
    }

    #[test]
    fn test_frame_fill_and_border() {
        let frame = FrameElement::new(Point::new(10.0, 10.0), Theme::Dark);
        let mut out = Vec::new();
        frame.render_content(&state(), &mut out);

        let [DrawCommand::RoundedRect { radius, fill, stroke, .. }] = out.as_slice() else {
            panic!("expected a rounded rect");
        };
        assert!((radius - 8.0).abs() < f64::EPSILON);
        assert_eq!(*fill, Some(Theme::Dark.frame_background()));
        assert_eq!(stroke.map(|s| s.color), Some(Theme::Dark.frame_border()));
    }

    #[test]
    fn test_borderless_frame() {
        let mut frame = FrameElement::new(Point::ZERO, Theme::Light);
        frame.border_width = 0.0;
        let mut out = Vec::new();
        frame.render_content(&state(), &mut out);
        assert!(matches!(out.as_slice(), [DrawCommand::RoundedRect { stroke: None, .. }]));
    }
}
