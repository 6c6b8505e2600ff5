//! Image handles.
//!
//! Widgets never look at pixels. They only need to know whether an image is
//! mutable (mutable images are rejected wherever the backend may repaint an
//! image behind the application's back) and how large it is. Pixel storage
//! belongs to the backend, which plugs in through [`ImageSource`].

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Backend-provided image storage.
pub trait ImageSource: Send + Sync + 'static {
    /// Whether the image can still be drawn into.
    fn is_mutable(&self) -> bool;

    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Produce an immutable snapshot of this image.
    ///
    /// The default snapshot only carries the dimensions; backends that hold
    /// pixel data override this to copy it.
    fn freeze(&self) -> Arc<dyn ImageSource> {
        Arc::new(BlankImage {
            width: self.width(),
            height: self.height(),
            mutable: false,
        })
    }
}

/// Pixel-less image source used when no backend storage is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlankImage {
    width: u32,
    height: u32,
    mutable: bool,
}

impl ImageSource for BlankImage {
    fn is_mutable(&self) -> bool {
        self.mutable
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// A shared handle to an image.
///
/// Cloning the handle does not copy the image; two handles compare equal
/// only if they refer to the same source.
#[derive(Clone)]
pub struct Image {
    source: Arc<dyn ImageSource>,
}

impl Image {
    /// Wrap a backend image source.
    pub fn from_source(source: impl ImageSource) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Wrap an already shared backend image source.
    pub fn from_shared(source: Arc<dyn ImageSource>) -> Self {
        Self { source }
    }

    /// Create a blank mutable image.
    pub fn mutable(width: u32, height: u32) -> Result<Self> {
        Self::blank(width, height, true)
    }

    /// Create a blank immutable image.
    pub fn immutable(width: u32, height: u32) -> Result<Self> {
        Self::blank(width, height, false)
    }

    fn blank(width: u32, height: u32, mutable: bool) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_argument(format!(
                "Image size must be positive, got {width}x{height}"
            )));
        }
        Ok(Self::from_source(BlankImage {
            width,
            height,
            mutable,
        }))
    }

    /// An immutable version of this image.
    ///
    /// Immutable images are returned as is.
    pub fn immutable_copy(&self) -> Self {
        if self.is_mutable() {
            Self::from_shared(self.source.freeze())
        } else {
            self.clone()
        }
    }

    /// Whether the image can still be drawn into.
    pub fn is_mutable(&self) -> bool {
        self.source.is_mutable()
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.source.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.source.height()
    }

    /// The backend source behind this handle.
    pub fn source(&self) -> &Arc<dyn ImageSource> {
        &self.source
    }

    /// Reject mutable images, naming `context` in the error.
    pub(crate) fn require_immutable(image: Option<&Image>, context: &str) -> Result<()> {
        match image {
            Some(image) if image.is_mutable() => Err(Error::invalid_argument(format!(
                "Mutable images are not allowed in {context}"
            ))),
            _ => Ok(()),
        }
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.source), Arc::as_ptr(&other.source))
    }
}

impl Eq for Image {}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("mutable", &self.is_mutable())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_images() {
        let image = Image::mutable(16, 8).unwrap();
        assert!(image.is_mutable());
        assert_eq!((image.width(), image.height()), (16, 8));

        let frozen = image.immutable_copy();
        assert!(!frozen.is_mutable());
        assert_eq!((frozen.width(), frozen.height()), (16, 8));
        assert_ne!(frozen, image);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            Image::immutable(0, 4),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_identity_equality() {
        let image = Image::immutable(4, 4).unwrap();
        let same = image.clone();
        let other = Image::immutable(4, 4).unwrap();
        assert_eq!(image, same);
        assert_ne!(image, other);
        assert_eq!(image.immutable_copy(), image);
    }

    #[test]
    fn test_require_immutable() {
        let mutable = Image::mutable(1, 1).unwrap();
        let immutable = Image::immutable(1, 1).unwrap();
        assert!(Image::require_immutable(None, "a list").is_ok());
        assert!(Image::require_immutable(Some(&immutable), "a list").is_ok());
        assert!(Image::require_immutable(Some(&mutable), "a list").is_err());
    }

    struct Backend;

    impl ImageSource for Backend {
        fn is_mutable(&self) -> bool {
            true
        }
        fn width(&self) -> u32 {
            3
        }
        fn height(&self) -> u32 {
            2
        }
    }

    #[test]
    fn test_backend_source_default_freeze() {
        let image = Image::from_source(Backend);
        let frozen = image.immutable_copy();
        assert!(!frozen.is_mutable());
        assert_eq!(frozen.width(), 3);
    }
}
