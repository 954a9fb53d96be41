//! Canvas document and viewport state.
//!
//! [`CanvasDocument`] owns the ordered element sequence. [`Canvas`] wraps it
//! with the viewport (camera, grid, selection) and routes pointer, wheel and
//! keyboard input to the controller of the selected element.

use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::controllers::{
    Controller, GestureContext, GestureState, MediaController, PointerInput, Response, TextKey,
};
use crate::elements::{Element, ElementId, ElementKind, Theme};
use crate::error::{EditorError, EditorResult};
use crate::input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent, WheelEvent};
use crate::selection::{handle_tolerance, hit_test_handles};
use crate::tools::{ToolKind, ToolManager};
use crate::upload::UploadedFile;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// All elements of one canvas, back to front.
#[derive(Debug, Clone, Serialize)]
pub struct CanvasDocument {
    /// Unique document identifier.
    pub id: String,
    pub name: String,
    /// Elements in z-order; later entries draw on top.
    elements: Vec<Element>,
    /// Ids of deleted elements. They are never accepted again.
    #[serde(skip)]
    retired: HashSet<ElementId>,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized document with elements left undecoded, so that one bad element
/// does not spoil the whole load.
#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    elements: Vec<serde_json::Value>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: "Untitled".to_string(),
            elements: Vec::new(),
            retired: HashSet::new(),
        }
    }

    /// Append an element on top of the others.
    ///
    /// Ids already present, or used by an element that was removed, are
    /// refused.
    pub fn insert(&mut self, element: Element) -> EditorResult<ElementId> {
        let id = element.id();
        if self.contains(id) || self.retired.contains(&id) {
            return Err(EditorError::DuplicateId(id));
        }
        self.elements.push(element);
        Ok(id)
    }

    /// Swap the stored element with the same id for `element`.
    pub fn replace(&mut self, element: Element) -> EditorResult<()> {
        let id = element.id();
        let slot = self
            .elements
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or(EditorError::ElementNotFound(id))?;
        *slot = element;
        Ok(())
    }

    /// Apply a pure operation to the element with `id` and store the result.
    pub fn update(&mut self, id: ElementId, f: impl FnOnce(&Element) -> Element) -> EditorResult<()> {
        let current = self.get(id).ok_or(EditorError::ElementNotFound(id))?;
        let next = f(current);
        if next.id() != id {
            return Err(EditorError::ElementNotFound(next.id()));
        }
        self.replace(next)
    }

    /// Remove an element, retiring its id and dropping it from every frame.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        let removed = self.elements.remove(index);
        self.retired.insert(id);
        for element in &mut self.elements {
            if let Element::Frame(frame) = element {
                if frame.contains_child(id) {
                    *frame = frame.without_child(id);
                }
            }
        }
        Some(removed)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Whether `id` belonged to a removed element.
    pub fn is_retired(&self, id: ElementId) -> bool {
        self.retired.contains(&id)
    }

    /// Elements in z-order (back to front).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.iter().map(Element::id)
    }

    /// Topmost visible element containing a canvas point.
    pub fn element_at(&self, point: Point) -> Option<&Element> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.is_visible() && e.contains_point(point.x, point.y))
    }

    /// Bring an element to the front (topmost).
    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let element = self.elements.remove(index);
        self.elements.push(element);
        true
    }

    /// Send an element to the back (bottommost).
    pub fn send_to_back(&mut self, id: ElementId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let element = self.elements.remove(index);
        self.elements.insert(0, element);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a document from JSON.
    ///
    /// Elements of an unknown type (or otherwise malformed) are skipped with a
    /// warning, as are repeated ids. Loaded elements have their size, rotation
    /// and opacity brought back inside the valid ranges.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let min_size = EditorConfig::default().min_element_size;
        let raw: RawDocument = serde_json::from_str(json)?;
        let mut document = Self::new();
        if let Some(id) = raw.id {
            document.id = id;
        }
        if let Some(name) = raw.name {
            document.name = name;
        }
        for value in raw.elements {
            let type_name = value
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or("<missing>")
                .to_string();
            match serde_json::from_value::<Element>(value) {
                Ok(element) => {
                    let normalized = element.normalized(min_size);
                    if normalized != element {
                        log::warn!("Normalized out-of-range attributes of element {}", element.id());
                    }
                    if let Err(err) = document.insert(normalized) {
                        log::warn!("Skipping element: {err}");
                    }
                }
                Err(err) => log::warn!("Skipping element of type `{type_name}`: {err}"),
            }
        }
        Ok(document)
    }
}

/// Zoom and pan of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub zoom: f64,
    pub pan_offset: Vec2,
}

/// Read-only export of a canvas: what an exporter or a save call consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSnapshot {
    pub elements: Vec<Element>,
    pub viewport: ViewportState,
    pub selected_element_id: Option<ElementId>,
    pub show_grid: bool,
    pub theme: Theme,
}

impl CanvasSnapshot {
    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The canvas viewport: document, camera, tools, selection and input.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    /// Camera for view transform.
    pub camera: Camera,
    pub tools: ToolManager,
    pub input: InputState,
    config: EditorConfig,
    theme: Theme,
    show_grid: bool,
    viewport_size: Size,
    selected: Option<ElementId>,
    /// Controller bound to the selected element.
    controller: Option<Controller>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty document and default settings.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self::with_document(CanvasDocument::new(), config)
    }

    /// Create a canvas over an existing document.
    pub fn with_document(mut document: CanvasDocument, config: EditorConfig) -> Self {
        let min_size = config.min_element_size;
        for element in &mut document.elements {
            *element = element.normalized(min_size);
        }
        Self {
            document,
            camera: Camera::from_config(&config),
            tools: ToolManager::new(),
            input: InputState::new(),
            theme: config.theme,
            show_grid: config.show_grid,
            viewport_size: Size::new(800.0, 600.0),
            selected: None,
            controller: None,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        if width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 {
            self.viewport_size = Size::new(width, height);
        }
    }

    /// Canvas-space rectangle currently on screen.
    pub fn visible_rect(&self) -> Rect {
        self.camera.visible_canvas_rect(self.viewport_size)
    }

    // --- Creation -----------------------------------------------------------

    /// Create an element of `kind` (at the default position when none is
    /// given), append it on top and select it.
    pub fn add_element(&mut self, kind: ElementKind, position: Option<Point>) -> ElementId {
        let position = position
            .filter(|p| p.x.is_finite() && p.y.is_finite())
            .unwrap_or(self.config.default_position);
        self.adopt(Element::create(kind, position, self.theme))
    }

    /// Run a tool. Creation tools add one element at the default position and
    /// select it.
    pub fn activate_tool(&mut self, tool: ToolKind) -> Option<ElementId> {
        let element = self
            .tools
            .activate(tool, self.config.default_position, self.theme)?;
        Some(self.adopt(element))
    }

    /// Append a freshly created element and select it.
    fn adopt(&mut self, mut element: Element) -> ElementId {
        // Fresh ids cannot collide, but a retired id must never come back.
        while self.document.contains(element.id()) || self.document.is_retired(element.id()) {
            element = element.duplicate(0.0);
        }
        let id = element.id();
        let kind = element.kind();
        self.document.elements.push(element);
        log::info!("Added {kind} element {id}");
        self.select_element(id);
        id
    }

    // --- Selection ----------------------------------------------------------

    pub fn selected_element_id(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.and_then(|id| self.document.get(id))
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    /// Select an element. Returns false if no element has that id.
    pub fn select_element(&mut self, id: ElementId) -> bool {
        if self.selected == Some(id) {
            return true;
        }
        let Some(element) = self.document.get(id) else {
            log::warn!("Cannot select missing element {id}");
            return false;
        };
        let controller = Controller::for_element(element);
        self.blur();
        self.selected = Some(id);
        self.controller = Some(controller);
        log::debug!("Selected element {id}");
        true
    }

    pub fn clear_selection(&mut self) {
        self.blur();
        self.selected = None;
        self.controller = None;
    }

    /// Interaction state of the selected element.
    pub fn gesture_state(&self) -> GestureState {
        self.controller
            .as_ref()
            .map_or(GestureState::Idle, Controller::state)
    }

    pub fn is_editing(&self) -> bool {
        self.controller.as_ref().is_some_and(Controller::is_editing)
    }

    /// Whether `id` is the element with an open text edit session.
    pub fn is_editing_element(&self, id: ElementId) -> bool {
        self.is_editing() && self.selected == Some(id)
    }

    // --- Viewport commands ---------------------------------------------------

    /// Screen point at the middle of the viewport.
    fn viewport_centre(&self) -> Point {
        Point::new(self.viewport_size.width / 2.0, self.viewport_size.height / 2.0)
    }

    /// Step the zoom up around the viewport centre.
    pub fn zoom_in(&mut self) -> bool {
        self.camera.zoom_in(self.config.zoom_step, self.viewport_centre())
    }

    /// Step the zoom down around the viewport centre.
    pub fn zoom_out(&mut self) -> bool {
        self.camera.zoom_out(self.config.zoom_step, self.viewport_centre())
    }

    /// Back to the default zoom with no pan.
    pub fn reset_zoom(&mut self) {
        self.camera.reset();
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.show_grid = !self.show_grid;
        self.show_grid
    }

    // --- Input ----------------------------------------------------------------

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.input.set_modifiers(modifiers);
    }

    fn gesture_context(&self) -> GestureContext {
        GestureContext::new(self.camera.zoom, &self.config)
    }

    fn pointer_input(&self, screen: Point, button: MouseButton) -> PointerInput {
        PointerInput {
            screen,
            canvas: self.camera.screen_to_canvas(screen),
            button,
            modifiers: self.input.modifiers,
            double_click: self.input.is_double_click(),
        }
    }

    /// Route a pointer event. Returns whether any state changed.
    ///
    /// Presses and moves with a non-finite position are dropped. Releases and
    /// leaves do not need a position and always end the current gesture.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        let position = event.position();
        let finite = position.x.is_finite() && position.y.is_finite();
        if !finite && matches!(event, PointerEvent::Down { .. } | PointerEvent::Move { .. }) {
            log::warn!("Rejected pointer event with non-finite position {position:?}");
            return false;
        }
        self.input.begin_frame();
        self.input.handle_pointer_event(event);
        match event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { button, .. } => self.pointer_up(button),
            PointerEvent::Leave { .. } => self.pointer_leave(),
        }
    }

    fn pointer_down(&mut self, position: Point, button: MouseButton) -> bool {
        // Middle presses only start a pan, tracked by the input state.
        if button != MouseButton::Left {
            return false;
        }
        let input = self.pointer_input(position, button);
        let ctx = self.gesture_context();
        let mut changed = false;

        // The selected element gets first pick when the press lands on one of
        // its handles or while it is being edited.
        if let Some(selected) = self.selected_element().cloned() {
            let editing = self.is_editing();
            let tolerance = handle_tolerance(ctx.handle_size, ctx.zoom);
            let on_handle = !selected.is_locked()
                && hit_test_handles(&selected, input.canvas, tolerance).is_some();
            if editing || on_handle {
                let response = match self.controller.as_mut() {
                    Some(controller) => controller.pointer_down(&selected, true, &input, &ctx),
                    None => Response::NotHandled,
                };
                if response.is_handled() {
                    return self.apply(response);
                }
                if editing {
                    changed |= self.blur();
                }
            }
        }

        match self.document.element_at(input.canvas).cloned() {
            Some(hit) => {
                let was_selected = self.selected == Some(hit.id());
                if !was_selected {
                    changed |= self.select_element(hit.id());
                }
                let response = match self.controller.as_mut() {
                    Some(controller) => controller.pointer_down(&hit, was_selected, &input, &ctx),
                    None => Response::NotHandled,
                };
                self.apply(response) || changed
            }
            None => {
                changed |= self.selected.is_some();
                self.clear_selection();
                changed
            }
        }
    }

    fn pointer_move(&mut self, position: Point) -> bool {
        if self.input.is_button_pressed(MouseButton::Middle) {
            return self.camera.pan(self.input.pointer_delta());
        }
        if !matches!(
            self.gesture_state(),
            GestureState::Dragging | GestureState::Resizing(_)
        ) {
            return false;
        }
        let Some(current) = self.selected_element().cloned() else {
            return false;
        };
        let input = self.pointer_input(position, MouseButton::Left);
        let ctx = self.gesture_context();
        let response = match self.controller.as_mut() {
            Some(controller) => controller.pointer_move(&current, &input, &ctx),
            None => Response::NotHandled,
        };
        self.apply(response)
    }

    fn pointer_up(&mut self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.controller.as_mut().is_some_and(Controller::pointer_up),
            MouseButton::Middle | MouseButton::Right => false,
        }
    }

    /// Losing the pointer commits like a release.
    fn pointer_leave(&mut self) -> bool {
        self.controller.as_mut().is_some_and(Controller::pointer_up)
    }

    /// Route a wheel event to the camera.
    pub fn handle_wheel(&mut self, event: &WheelEvent) -> bool {
        self.camera.apply_wheel(event, &self.config)
    }

    /// Act on a key event. Releases are ignored.
    pub fn handle_key_event(&mut self, event: KeyEvent) -> bool {
        match event {
            KeyEvent::Pressed(key) => self.handle_key(&key),
            KeyEvent::Released(_) => false,
        }
    }

    /// Act on a key press.
    ///
    /// While a text edit session is open every key goes to it. Otherwise
    /// `Delete` and `Backspace` remove the selected element and all other
    /// keys are ignored.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if self.is_editing() {
            return match TextKey::from_key_name(key) {
                Some(text_key) => self.edit_key(text_key),
                None => false,
            };
        }
        match key {
            "Delete" | "Backspace" => self.delete_selected(),
            _ => false,
        }
    }

    fn edit_key(&mut self, key: TextKey) -> bool {
        let Some(element) = self.selected_element().cloned() else {
            return false;
        };
        let response = match self.controller.as_mut().and_then(Controller::as_text_mut) {
            Some(controller) => controller.key(&element, key),
            None => Response::NotHandled,
        };
        self.apply(response)
    }

    /// Type a string into the open edit session.
    pub fn type_text(&mut self, text: &str) -> bool {
        let Some(element) = self.selected_element().cloned() else {
            return false;
        };
        let response = match self.controller.as_mut().and_then(Controller::as_text_mut) {
            Some(controller) => controller.type_text(&element, text),
            None => Response::NotHandled,
        };
        self.apply(response)
    }

    /// Open an edit session on a text element, selecting it first.
    pub fn begin_text_edit(&mut self, id: ElementId) -> bool {
        if !self.select_element(id) {
            return false;
        }
        let Some(element) = self.document.get(id).cloned() else {
            return false;
        };
        self.controller
            .as_mut()
            .and_then(Controller::as_text_mut)
            .is_some_and(|controller| controller.begin_edit(&element))
    }

    /// Close the open edit session, if any.
    pub fn blur(&mut self) -> bool {
        if !self.is_editing() {
            return false;
        }
        let Some(element) = self.selected_element().cloned() else {
            return false;
        };
        let response = match self.controller.as_mut().and_then(Controller::as_text_mut) {
            Some(controller) => controller.blur(&element),
            None => Response::NotHandled,
        };
        self.apply(response)
    }

    fn apply(&mut self, response: Response) -> bool {
        match response {
            Response::NotHandled => false,
            Response::Handled => true,
            Response::Replace(element) => match self.document.replace(element) {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("Dropped controller update: {err}");
                    false
                }
            },
        }
    }

    // --- Document commands -----------------------------------------------------

    /// Remove the selected element and clear the selection.
    pub fn delete_selected(&mut self) -> bool {
        match self.selected {
            Some(id) => self.remove_element(id).is_some(),
            None => false,
        }
    }

    /// Remove an element. If it was selected, the selection is cleared.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        if self.selected == Some(id) {
            self.selected = None;
            self.controller = None;
        }
        let removed = self.document.remove(id)?;
        log::info!("Removed {} element {id}", removed.kind());
        Some(removed)
    }

    /// Upload a file into an image or video element.
    ///
    /// A rejected file leaves the element untouched; the error is returned so
    /// the host can report it.
    pub fn upload(&mut self, id: ElementId, file: &UploadedFile) -> EditorResult<()> {
        let element = self
            .document
            .get(id)
            .ok_or(EditorError::ElementNotFound(id))?;
        let result = match self.controller.as_ref().and_then(Controller::as_media) {
            Some(controller) if controller.element_id() == id => {
                controller.accept_upload(element, file, self.config.max_upload_bytes)
            }
            _ => MediaController::new(id, element.kind()).accept_upload(
                element,
                file,
                self.config.max_upload_bytes,
            ),
        };
        match result {
            Ok(next) => {
                self.document.replace(next)?;
                log::info!("Uploaded `{}` into element {id}", file.name);
                Ok(())
            }
            Err(err) => {
                log::warn!("Rejected upload `{}` for element {id}: {err}", file.name);
                Err(err)
            }
        }
    }

    pub fn move_element(&mut self, id: ElementId, dx: f64, dy: f64) -> EditorResult<()> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(EditorError::NonFiniteInput("move delta"));
        }
        self.document.update(id, |e| e.translated(dx, dy))
    }

    pub fn resize_element(
        &mut self,
        id: ElementId,
        width: f64,
        height: f64,
        maintain_aspect: bool,
    ) -> EditorResult<()> {
        if !width.is_finite() || !height.is_finite() {
            return Err(EditorError::NonFiniteInput("size"));
        }
        let min = self.config.min_element_size;
        self.document
            .update(id, |e| e.resized(width, height, maintain_aspect, min))
    }

    pub fn rotate_element(&mut self, id: ElementId, degrees: f64) -> EditorResult<()> {
        if !degrees.is_finite() {
            return Err(EditorError::NonFiniteInput("rotation"));
        }
        self.document.update(id, |e| e.rotated(degrees))
    }

    pub fn set_opacity(&mut self, id: ElementId, opacity: f64) -> EditorResult<()> {
        if opacity.is_nan() {
            return Err(EditorError::NonFiniteInput("opacity"));
        }
        self.document.update(id, |e| e.with_opacity(opacity))
    }

    pub fn toggle_lock(&mut self, id: ElementId) -> EditorResult<()> {
        self.document.update(id, Element::toggled_lock)
    }

    pub fn toggle_visibility(&mut self, id: ElementId) -> EditorResult<()> {
        self.document.update(id, Element::toggled_visibility)
    }

    /// Duplicate the selected element and select the copy.
    pub fn duplicate_selected(&mut self) -> Option<ElementId> {
        let copy = self.selected_element()?.duplicate(self.config.clone_offset);
        Some(self.adopt(copy))
    }

    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        self.document.bring_to_front(id)
    }

    pub fn send_to_back(&mut self, id: ElementId) -> bool {
        self.document.send_to_back(id)
    }

    /// Add `child` to a frame's children.
    pub fn add_to_frame(&mut self, frame_id: ElementId, child: ElementId) -> EditorResult<()> {
        if !self.document.contains(child) {
            return Err(EditorError::ElementNotFound(child));
        }
        let frame = self
            .document
            .get(frame_id)
            .and_then(Element::as_frame)
            .ok_or(EditorError::ElementNotFound(frame_id))?;
        let next = Element::Frame(frame.with_child(child));
        self.document.replace(next)
    }

    // --- Export -----------------------------------------------------------------

    pub fn viewport(&self) -> ViewportState {
        ViewportState {
            zoom: self.camera.zoom,
            pan_offset: self.camera.offset,
        }
    }

    /// Read-only snapshot of the elements and viewport.
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            elements: self.document.elements().to_vec(),
            viewport: self.viewport(),
            selected_element_id: self.selected,
            show_grid: self.show_grid,
            theme: self.theme,
        }
    }
}
