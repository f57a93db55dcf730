use std::path::{Path, PathBuf};

/// Interleaved 8-bit pixels of a decoded image, rows bottom-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("image file {0} does not exist")]
    NotFound(PathBuf),
    #[error("could not decode {path}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Turns an image file into pixels.
///
/// Implementations must flip the image vertically so that the first row is the bottom
/// one, which is what texture coordinates with v pointing up expect.
pub trait ImageDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage, DecodeError>;
}

/// [`ImageDecoder`] backed by the `image` crate. Relative paths are resolved against
/// `root`.
#[derive(Clone, Debug)]
pub struct ImageCrateDecoder {
    pub root: PathBuf,
}

impl ImageCrateDecoder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage, DecodeError> {
        let full_path = self.resolve(path);
        if !full_path.exists() {
            return Err(DecodeError::NotFound(full_path));
        }
        let img = image::open(&full_path)
            .map_err(|source| DecodeError::Image {
                path: full_path.clone(),
                source,
            })?
            .flipv();

        let width = img.width();
        let height = img.height();
        // Anything wider than 8 bits per channel is narrowed, the channel count is kept.
        let channels = img.color().channel_count();
        let pixels = match channels {
            1 => img.to_luma8().into_raw(),
            2 => img.to_luma_alpha8().into_raw(),
            3 => img.to_rgb8().into_raw(),
            _ => img.to_rgba8().into_raw(),
        };
        Ok(DecodedImage {
            pixels,
            width,
            height,
            channels: channels.min(4),
        })
    }
}
