//! Image and video controller: drag, resize and file uploads.

use super::Gesture;
use crate::elements::{Element, ElementId, ElementKind};
use crate::error::{EditorError, EditorResult};
use crate::upload::UploadedFile;

/// Controller for image and video elements.
#[derive(Debug, Clone)]
pub struct MediaController {
    element_id: ElementId,
    kind: ElementKind,
    gesture: Gesture,
}

impl MediaController {
    pub fn new(element_id: ElementId, kind: ElementKind) -> Self {
        Self {
            element_id,
            kind,
            gesture: Gesture::new(),
        }
    }

    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn gesture_mut(&mut self) -> &mut Gesture {
        &mut self.gesture
    }

    /// Build the element that results from uploading `file` into `element`.
    ///
    /// Only the MIME type prefix (`image/` or `video/`) and the size are
    /// checked. On error nothing is returned, so the caller's element stays
    /// exactly as it was.
    pub fn accept_upload(
        &self,
        element: &Element,
        file: &UploadedFile,
        max_bytes: usize,
    ) -> EditorResult<Element> {
        let expected = match element.kind() {
            ElementKind::Image => "image/",
            ElementKind::Video => "video/",
            ElementKind::Text | ElementKind::Frame => {
                return Err(EditorError::NotUploadable(element.id()));
            }
        };
        if !file.has_mime_prefix(expected) {
            return Err(EditorError::UnsupportedMediaType {
                mime: file.mime.clone(),
                expected,
            });
        }
        if file.size() > max_bytes {
            return Err(EditorError::UploadTooLarge {
                size: file.size(),
                limit: max_bytes,
            });
        }

        let src = file.to_data_url();
        let next = match element {
            Element::Image(image) => Element::Image(image.with_source(src, file.decoded_image_size())),
            Element::Video(video) => Element::Video(video.with_source(src)),
            Element::Text(_) | Element::Frame(_) => return Err(EditorError::NotUploadable(element.id())),
        };
        log::debug!("Accepted {} byte upload `{}` for {}", file.size(), file.name, element.id());
        Ok(next)
    }
}
