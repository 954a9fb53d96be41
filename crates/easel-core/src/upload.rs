//! Files handed to media elements.
//!
//! The host reads the file; the core only sees the finished bytes and turns
//! them into a `data:` URL the element can point at.

use crate::error::EditorResult;
use base64::{Engine, engine::general_purpose::STANDARD};
use std::io::Cursor;
use std::path::Path;

/// A fully read local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    /// MIME type as reported by the host (e.g. `image/png`).
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension and,
    /// failing that, from the image magic bytes.
    pub fn from_path(path: impl AsRef<Path>) -> EditorResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(mime_from_extension)
            .or_else(|| image::guess_format(&bytes).ok().map(|f| f.to_mime_type()))
            .unwrap_or("application/octet-stream");
        Ok(Self::new(name, mime, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the MIME type falls under `prefix` (e.g. `image/`).
    pub fn has_mime_prefix(&self, prefix: &str) -> bool {
        self.mime.trim().to_ascii_lowercase().starts_with(prefix)
    }

    /// Encode the bytes as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime.trim(), STANDARD.encode(&self.bytes))
    }

    /// Pixel dimensions, if the bytes decode as a supported image format.
    pub fn decoded_image_size(&self) -> Option<(u32, u32)> {
        image::ImageReader::new(Cursor::new(&self.bytes))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }
}

/// MIME type for common media file extensions.
pub fn mime_from_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "mp4" | "m4v" => Some("video/mp4"),
        "webm" => Some("video/webm"),
        "mov" => Some("video/quicktime"),
        "ogv" => Some("video/ogg"),
        "svg" => Some("image/svg+xml"),
        other => image::ImageFormat::from_extension(other).map(|f| f.to_mime_type()),
    }
}

#[cfg(test)]
pub(crate) fn tiny_png(width: u32, height: u32) -> Vec<u8> {
    let image = image::DynamicImage::ImageRgba8(image::RgbaImage::new(width, height));
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, image::ImageFormat::Png)
        .expect("encoding an in-memory png");
    bytes.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_data_url() {
        let file = UploadedFile::new("a.txt", "image/png", b"abc".to_vec());
        assert_eq!(file.to_data_url(), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_mime_prefix_is_case_insensitive() {
        let file = UploadedFile::new("a", "Image/PNG", Vec::new());
        assert!(file.has_mime_prefix("image/"));
        assert!(!file.has_mime_prefix("video/"));
    }

    #[test]
    fn test_decoded_png_size() {
        let file = UploadedFile::new("p.png", "image/png", tiny_png(3, 2));
        assert_eq!(file.decoded_image_size(), Some((3, 2)));

        let junk = UploadedFile::new("j.png", "image/png", vec![0, 1, 2, 3]);
        assert_eq!(junk.decoded_image_size(), None);
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension("MP4"), Some("video/mp4"));
        assert_eq!(mime_from_extension("png"), Some("image/png"));
        assert_eq!(mime_from_extension("jpg"), Some("image/jpeg"));
        assert_eq!(mime_from_extension("exe"), None);
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.webm");
        std::fs::File::create(&path).unwrap().write_all(b"webm").unwrap();

        let file = UploadedFile::from_path(&path).unwrap();
        assert_eq!(file.name, "clip.webm");
        assert_eq!(file.mime, "video/webm");
        assert_eq!(file.size(), 4);

        // No extension: fall back to sniffing the bytes.
        let path = dir.path().join("picture");
        std::fs::write(&path, tiny_png(1, 1)).unwrap();
        assert_eq!(UploadedFile::from_path(&path).unwrap().mime, "image/png");
    }
}
