//! Text controller: drag, resize and in-place editing.

use super::{Gesture, GestureContext, GestureState, PointerInput, Response};
use crate::elements::{Element, ElementId, committed_content};

/// Keyboard key for text editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextKey {
    Character(String),
    Backspace,
    Delete,
    Enter,
    Escape,
}

impl TextKey {
    /// Map a browser-style key name to an editing key.
    ///
    /// Single characters type themselves; navigation and function keys
    /// return `None`.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Backspace" => Some(TextKey::Backspace),
            "Delete" => Some(TextKey::Delete),
            "Enter" => Some(TextKey::Enter),
            "Escape" => Some(TextKey::Escape),
            _ if name.chars().count() == 1 => Some(TextKey::Character(name.to_string())),
            _ => None,
        }
    }
}

/// Live state of an edit session.
#[derive(Debug, Clone)]
struct EditSession {
    buffer: String,
    /// Everything is selected, so the next edit replaces the whole buffer.
    all_selected: bool,
}

/// Controller for a text element.
#[derive(Debug, Clone)]
pub struct TextController {
    element_id: ElementId,
    gesture: Gesture,
    session: Option<EditSession>,
}

impl TextController {
    pub fn new(element_id: ElementId) -> Self {
        Self {
            element_id,
            gesture: Gesture::new(),
            session: None,
        }
    }

    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    pub fn state(&self) -> GestureState {
        self.gesture.state()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn gesture_mut(&mut self) -> &mut Gesture {
        &mut self.gesture
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Text currently in the edit buffer.
    pub fn buffer(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.buffer.as_str())
    }

    /// Whether the whole buffer is selected.
    pub fn all_selected(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.all_selected)
    }

    /// Handle a press. A double-click on an unlocked text element starts
    /// editing; presses inside the element while editing stay in the session.
    pub fn pointer_down(
        &mut self,
        element: &Element,
        is_selected: bool,
        input: &PointerInput,
        ctx: &GestureContext,
    ) -> Response {
        let inside = element.contains_point(input.canvas.x, input.canvas.y);
        if self.is_editing() {
            return if inside {
                Response::Handled
            } else {
                Response::NotHandled
            };
        }
        if input.double_click && inside {
            return if self.begin_edit(element) {
                Response::Handled
            } else {
                Response::NotHandled
            };
        }
        self.gesture.pointer_down(element, is_selected, input, ctx)
    }

    /// Enter editing mode with the whole content selected.
    pub fn begin_edit(&mut self, element: &Element) -> bool {
        let Some(text) = element.as_text() else {
            return false;
        };
        if text.base.locked || self.gesture.is_active() {
            return false;
        }
        if self.session.is_none() {
            log::debug!("Editing text element {}", self.element_id);
            self.session = Some(EditSession {
                buffer: text.content.clone(),
                all_selected: true,
            });
            self.gesture.set_editing(true);
        }
        true
    }

    /// Apply a key to the edit session. Edits are applied to the element
    /// immediately; Escape ends the session.
    pub fn key(&mut self, element: &Element, key: TextKey) -> Response {
        let Some(session) = self.session.as_mut() else {
            return Response::NotHandled;
        };
        match key {
            TextKey::Escape => return self.end_edit(element),
            TextKey::Character(s) => {
                if session.all_selected {
                    session.buffer.clear();
                }
                session.buffer.push_str(&s);
            }
            TextKey::Enter => {
                if session.all_selected {
                    session.buffer.clear();
                }
                session.buffer.push('\n');
            }
            TextKey::Backspace => {
                if session.all_selected {
                    session.buffer.clear();
                } else {
                    session.buffer.pop();
                }
            }
            TextKey::Delete => {
                // The caret sits at the end of the buffer, so Delete only
                // acts on a selection.
                if session.all_selected {
                    session.buffer.clear();
                }
            }
        }
        session.all_selected = false;
        let buffer = session.buffer.clone();
        Self::with_content(element, buffer)
    }

    /// Type a string as a sequence of character keys.
    pub fn type_text(&mut self, element: &Element, text: &str) -> Response {
        let mut current = element.clone();
        let mut response = Response::NotHandled;
        for c in text.chars() {
            match self.key(&current, TextKey::Character(c.to_string())) {
                Response::Replace(next) => {
                    current = next.clone();
                    response = Response::Replace(next);
                }
                Response::NotHandled => return response,
                Response::Handled => response = Response::Handled,
            }
        }
        response
    }

    /// Focus left the element: end the session, replacing blank content with
    /// the placeholder.
    pub fn blur(&mut self, element: &Element) -> Response {
        self.end_edit(element)
    }

    fn end_edit(&mut self, element: &Element) -> Response {
        let Some(session) = self.session.take() else {
            return Response::NotHandled;
        };
        self.gesture.set_editing(false);
        log::debug!("Finished editing text element {}", self.element_id);
        Self::with_content(element, committed_content(&session.buffer))
    }

    fn with_content(element: &Element, content: String) -> Response {
        match element.as_text() {
            Some(text) if text.content == content => Response::Handled,
            Some(text) => Response::Replace(Element::Text(text.with_content(content))),
            None => Response::NotHandled,
        }
    }
}
