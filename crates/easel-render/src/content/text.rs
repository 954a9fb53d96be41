//! Text content: one text run per line, plus an outline while editing.

use super::{ContentRenderer, RenderState};
use crate::output::{DrawCommand, StrokeStyle};
use easel_core::elements::{SerializableColor, TextAlign, TextElement};
use kurbo::Point;

impl ContentRenderer for TextElement {
    fn render_content(&self, state: &RenderState, out: &mut Vec<DrawCommand>) {
        let rect = self.base.rect();
        let x = match self.text_align {
            TextAlign::Left => rect.x0,
            TextAlign::Center => rect.center().x,
            TextAlign::Right => rect.x1,
        };
        // The placeholder is drawn faded until real content replaces it.
        let color = if self.is_placeholder() {
            self.color.with_opacity(0.5)
        } else {
            self.color
        };

        let advance = self.line_advance();
        for (i, line) in self.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            out.push(DrawCommand::Text {
                origin: Point::new(x, rect.y0 + self.font_size + i as f64 * advance),
                text: line.to_string(),
                font_family: self.font_family.clone(),
                font_size: self.font_size,
                font_weight: self.font_weight.numeric(),
                color,
                align: self.text_align,
            });
        }

        if state.is_editing {
            let selection = SerializableColor::from(state.palette().selection);
            out.push(DrawCommand::Rect {
                rect,
                fill: None,
                stroke: Some(StrokeStyle::solid(selection, 2.0 * state.pixel())),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::elements::{PLACEHOLDER_TEXT, Theme};

    fn state(is_editing: bool) -> RenderState {
        RenderState {
            is_selected: false,
            is_editing,
            theme: Theme::Light,
            zoom: 100.0,
            handle_size: 10.0,
        }
    }

    fn origins(out: &[DrawCommand]) -> Vec<Point> {
        out.iter()
            .filter_map(|c| match c {
                DrawCommand::Text { origin, .. } => Some(*origin),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_one_run_per_line() {
        let text = TextElement::new(Point::new(10.0, 20.0), Theme::Light).with_content("a\nb\n\nc");
        let mut out = Vec::new();
        text.render_content(&state(false), &mut out);

        let origins = origins(&out);
        assert_eq!(origins.len(), 3);
        assert!((origins[0].y - 44.0).abs() < 1e-9);
        // Blank third line still advances.
        assert!((origins[2].y - (44.0 + 3.0 * 24.0 * 1.2)).abs() < 1e-9);
        assert!(origins.iter().all(|p| (p.x - 10.0).abs() < 1e-9));
    }

    #[test]
    fn test_placeholder_is_faded() {
        let text = TextElement::new(Point::ZERO, Theme::Light);
        let mut out = Vec::new();
        text.render_content(&state(false), &mut out);
        let DrawCommand::Text { text: run, color, .. } = &out[0] else {
            panic!("expected a text run");
        };
        assert_eq!(run, PLACEHOLDER_TEXT);
        assert!(color.a < 255);
    }

    #[test]
    fn test_editing_outline() {
        let mut text = TextElement::new(Point::ZERO, Theme::Light).with_content("Hello");
        text.text_align = TextAlign::Right;
        let mut out = Vec::new();
        text.render_content(&state(true), &mut out);

        assert!(matches!(out.last(), Some(DrawCommand::Rect { stroke: Some(_), .. })));
        assert!((origins(&out)[0].x - 300.0).abs() < 1e-9);
    }
}
