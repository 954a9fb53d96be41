//! Element dispatcher: routes each element to its content renderer and skips
//! re-rendering elements whose render key has not changed.

use crate::content::{RenderState, render_content, render_selection};
use crate::output::RenderedElement;
use easel_core::elements::{Element, ElementBase, ElementId, SerializableColor, Theme};
use kurbo::Affine;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// The part of an element's type-specific data that affects its output.
#[derive(Debug, Clone, PartialEq)]
enum Payload {
    Content(String),
    Source(String),
    Background(SerializableColor),
}

impl Payload {
    fn of(element: &Element) -> Self {
        match element {
            Element::Text(text) => Payload::Content(text.content.clone()),
            Element::Image(image) => Payload::Source(image.src.clone()),
            Element::Video(video) => Payload::Source(video.src.clone()),
            Element::Frame(frame) => Payload::Background(frame.background_color),
        }
    }
}

/// Inputs that decide an element's output. Equal keys give equal output.
#[derive(Debug, Clone, PartialEq)]
struct RenderKey {
    /// Id, box, rotation, opacity and the lock/visibility flags.
    base: ElementBase,
    payload: Payload,
    state: RenderState,
}

impl RenderKey {
    fn new(element: &Element, state: RenderState) -> Self {
        Self {
            base: element.base().clone(),
            payload: Payload::of(element),
            state,
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    key: RenderKey,
    output: Arc<RenderedElement>,
}

/// Routes elements to their renderers and caches the result per element id.
#[derive(Debug)]
pub struct ElementDispatcher {
    cache: HashMap<ElementId, CacheEntry>,
    /// Handle edge length in screen pixels.
    handle_size: f64,
}

impl Default for ElementDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementDispatcher {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            handle_size: 10.0,
        }
    }

    pub fn with_handle_size(mut self, handle_size: f64) -> Self {
        self.set_handle_size(handle_size);
        self
    }

    pub fn handle_size(&self) -> f64 {
        self.handle_size
    }

    /// Change the handle size. Cached output drawn with the old size is
    /// dropped.
    pub fn set_handle_size(&mut self, handle_size: f64) {
        if handle_size.is_finite() && handle_size > 0.0 && handle_size != self.handle_size {
            self.handle_size = handle_size;
            self.cache.clear();
        }
    }

    /// Render an element that is not being edited.
    pub fn render(
        &mut self,
        element: &Element,
        is_selected: bool,
        theme: Theme,
        zoom: f64,
    ) -> Arc<RenderedElement> {
        self.render_with_edit(element, is_selected, false, theme, zoom)
    }

    /// Render an element, reusing the cached output when nothing in its
    /// render key changed.
    pub fn render_with_edit(
        &mut self,
        element: &Element,
        is_selected: bool,
        is_editing: bool,
        theme: Theme,
        zoom: f64,
    ) -> Arc<RenderedElement> {
        let state = RenderState {
            is_selected,
            is_editing,
            theme,
            zoom,
            handle_size: self.handle_size,
        };
        let key = RenderKey::new(element, state);
        let id = element.id();

        if let Some(entry) = self.cache.get(&id) {
            if entry.key == key {
                return Arc::clone(&entry.output);
            }
        }

        log::debug!("Rendering {} element {id}", element.kind());
        let output = Arc::new(Self::render_uncached(element, &state));
        self.cache.insert(
            id,
            CacheEntry {
                key,
                output: Arc::clone(&output),
            },
        );
        output
    }

    fn render_uncached(element: &Element, state: &RenderState) -> RenderedElement {
        let base = element.base();
        let mut commands = Vec::new();
        if base.visible {
            render_content(element, state, &mut commands);
            if state.is_selected && !base.locked {
                render_selection(element, state, &mut commands);
            }
        }
        RenderedElement {
            id: base.id,
            kind: element.kind(),
            transform: Affine::rotate_about(base.rotation.to_radians(), element.rect().center()),
            opacity: base.opacity,
            visible: base.visible,
            commands,
        }
    }

    /// Drop cached output for elements not in `ids`.
    pub fn retain(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        let keep: HashSet<ElementId> = ids.into_iter().collect();
        self.cache.retain(|id, _| keep.contains(id));
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::DrawCommand;
    use easel_core::elements::ElementKind;
    use kurbo::Point;

    fn text() -> Element {
        Element::create(ElementKind::Text, Point::new(100.0, 100.0), Theme::Light)
    }

    #[test]
    fn test_unchanged_key_reuses_output() {
        let mut dispatcher = ElementDispatcher::new();
        let element = text();

        let first = dispatcher.render(&element, false, Theme::Light, 100.0);
        let second = dispatcher.render(&element, false, Theme::Light, 100.0);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(dispatcher.cached_len(), 1);
    }

    #[test]
    fn test_key_changes_rerender() {
        let mut dispatcher = ElementDispatcher::new();
        let element = text();
        let first = dispatcher.render(&element, false, Theme::Light, 100.0);

        let variants = [
            (element.translated(1.0, 0.0), false, false, Theme::Light, 100.0),
            (element.resized(320.0, 80.0, false, 20.0), false, false, Theme::Light, 100.0),
            (element.resized(300.0, 90.0, false, 20.0), false, false, Theme::Light, 100.0),
            (element.clone(), true, false, Theme::Light, 100.0),
            (element.clone(), false, true, Theme::Light, 100.0),
            (element.clone(), false, false, Theme::Dark, 100.0),
            (element.clone(), false, false, Theme::Light, 150.0),
            (element.rotated(10.0), false, false, Theme::Light, 100.0),
            (element.with_opacity(0.5), false, false, Theme::Light, 100.0),
            (element.toggled_lock(), false, false, Theme::Light, 100.0),
            (element.toggled_visibility(), false, false, Theme::Light, 100.0),
        ];
        for (variant, selected, editing, theme, zoom) in variants {
            let output = dispatcher.render_with_edit(&variant, selected, editing, theme, zoom);
            assert!(!Arc::ptr_eq(&first, &output));
        }

        let Element::Text(t) = &element else { unreachable!() };
        let edited = Element::Text(t.with_content("Hello"));
        let output = dispatcher.render(&edited, false, Theme::Light, 100.0);
        assert_eq!(output.texts().collect::<Vec<_>>(), vec!["Hello"]);
    }

    #[test]
    fn test_media_source_change_rerenders() {
        let mut dispatcher = ElementDispatcher::new();
        for kind in [ElementKind::Image, ElementKind::Video] {
            let element = Element::create(kind, Point::ZERO, Theme::Light);
            let empty = dispatcher.render(&element, false, Theme::Light, 100.0);

            let mut uploaded = element.clone();
            match &mut uploaded {
                Element::Image(image) => image.src = "data:image/png;base64,AAAA".to_string(),
                Element::Video(video) => video.src = "data:video/mp4;base64,AAAA".to_string(),
                _ => unreachable!(),
            }
            let output = dispatcher.render(&uploaded, false, Theme::Light, 100.0);
            assert!(!Arc::ptr_eq(&empty, &output));
            // The placeholder label is gone once a source is set.
            assert!(empty.texts().count() > 0);
            assert_eq!(output.texts().count(), 0);
        }
    }

    #[test]
    fn test_frame_background_change_rerenders() {
        let mut dispatcher = ElementDispatcher::new();
        let element = Element::create(ElementKind::Frame, Point::ZERO, Theme::Light);
        let first = dispatcher.render(&element, false, Theme::Light, 100.0);

        let mut recoloured = element.clone();
        if let Element::Frame(frame) = &mut recoloured {
            frame.background_color = SerializableColor::rgb(255, 0, 0);
        }
        let output = dispatcher.render(&recoloured, false, Theme::Light, 100.0);
        assert!(!Arc::ptr_eq(&first, &output));
        let DrawCommand::RoundedRect { fill, .. } = &output.commands[0] else {
            panic!("expected the frame body");
        };
        assert_eq!(*fill, Some(SerializableColor::rgb(255, 0, 0)));
    }

    #[test]
    fn test_routes_by_kind() {
        let mut dispatcher = ElementDispatcher::new();
        for kind in ElementKind::ALL {
            let element = Element::create(kind, Point::ZERO, Theme::Light);
            let output = dispatcher.render(&element, false, Theme::Light, 100.0);
            assert_eq!(output.kind, kind);
            assert_eq!(output.id, element.id());
            let first = &output.commands[0];
            let expected = match kind {
                ElementKind::Text => matches!(first, DrawCommand::Text { .. }),
                // Empty media render the upload placeholder.
                ElementKind::Image | ElementKind::Video => matches!(first, DrawCommand::Rect { .. }),
                ElementKind::Frame => matches!(first, DrawCommand::RoundedRect { .. }),
            };
            assert!(expected, "{kind} rendered {first:?}");
        }
    }

    #[test]
    fn test_invisible_renders_nothing() {
        let mut dispatcher = ElementDispatcher::new();
        let element = text().toggled_visibility();
        let output = dispatcher.render(&element, true, Theme::Light, 100.0);
        assert!(output.is_empty());
        assert!(!output.visible);
    }

    #[test]
    fn test_locked_selection_has_no_chrome() {
        let mut dispatcher = ElementDispatcher::new();
        let element = Element::create(ElementKind::Frame, Point::ZERO, Theme::Light);
        let selected = dispatcher.render(&element, true, Theme::Light, 100.0);
        let locked = dispatcher.render(&element.toggled_lock(), true, Theme::Light, 100.0);
        // Body, border and eight handles.
        assert_eq!(selected.commands.len(), 10);
        assert_eq!(locked.commands.len(), 1);
    }

    #[test]
    fn test_rotation_about_centre() {
        let mut dispatcher = ElementDispatcher::new();
        let element = Element::create(ElementKind::Image, Point::ZERO, Theme::Light).rotated(90.0);
        let output = dispatcher.render(&element, false, Theme::Light, 100.0);
        let centre = output.transform * Point::new(200.0, 150.0);
        assert!((centre - Point::new(200.0, 150.0)).hypot() < 1e-9);
        let corner = output.transform * Point::new(400.0, 150.0);
        assert!((corner - Point::new(200.0, 350.0)).hypot() < 1e-9);
    }

    #[test]
    fn test_retain_evicts_removed() {
        let mut dispatcher = ElementDispatcher::new();
        let a = text();
        let b = text();
        let cached = dispatcher.render(&a, false, Theme::Light, 100.0);
        let before = dispatcher.render(&b, false, Theme::Light, 100.0);
        assert_eq!(dispatcher.cached_len(), 2);

        dispatcher.retain([a.id()]);
        assert_eq!(dispatcher.cached_len(), 1);
        assert!(Arc::ptr_eq(&cached, &dispatcher.render(&a, false, Theme::Light, 100.0)));
        assert!(!Arc::ptr_eq(&before, &dispatcher.render(&b, false, Theme::Light, 100.0)));
    }

    #[test]
    fn test_handle_size_change_clears_cache() {
        let mut dispatcher = ElementDispatcher::new().with_handle_size(10.0);
        dispatcher.render(&text(), false, Theme::Light, 100.0);
        dispatcher.set_handle_size(12.0);
        assert_eq!(dispatcher.cached_len(), 0);
        assert!((dispatcher.handle_size() - 12.0).abs() < f64::EPSILON);
    }
}
