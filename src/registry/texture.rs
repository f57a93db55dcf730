use std::{collections::HashMap, path::Path};

use crate::{
    data_structures::texture::PixelLayout,
    resources::image::{DecodeError, DecodedImage, ImageDecoder},
};

/// Number of texture units the scene shader can select from.
pub const MAX_TEXTURE_UNITS: usize = 16;

/// The GPU side of texture management.
///
/// The registry owns every handle a backend creates until it gives it back through
/// [`TextureBackend::release`].
pub trait TextureBackend {
    type Handle;

    /// Allocate a texture, upload `image` in `layout` and generate its mip levels.
    fn create(
        &mut self,
        label: &str,
        image: &DecodedImage,
        layout: PixelLayout,
    ) -> anyhow::Result<Self::Handle>;

    /// Make `handle` the texture sampled for `unit`.
    fn bind(&mut self, unit: u32, handle: &Self::Handle);

    fn release(&mut self, handle: Self::Handle);
}

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("texture `{tag}` has {channels} channels, only 3 (RGB) and 4 (RGBA) are supported")]
    UnsupportedChannels { tag: String, channels: u8 },
    #[error("texture tag `{0}` is already registered")]
    DuplicateTag(String),
    #[error("all {0} texture units are in use")]
    UnitsExhausted(usize),
    #[error("no texture registered under `{0}`")]
    UnknownTag(String),
    #[error("texture backend failed")]
    Backend(#[from] anyhow::Error),
}

#[derive(Debug)]
pub struct TextureEntry<H> {
    pub tag: String,
    pub handle: H,
}

/// Tag to texture mapping. The slot of a texture is the order in which it was loaded.
#[derive(Debug)]
pub struct TextureRegistry<H> {
    entries: Vec<TextureEntry<H>>,
    slots: HashMap<String, usize>,
    max_units: usize,
}

impl<H> Default for TextureRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> TextureRegistry<H> {
    pub fn new() -> Self {
        Self::with_max_units(MAX_TEXTURE_UNITS)
    }

    pub fn with_max_units(max_units: usize) -> Self {
        Self {
            entries: Vec::new(),
            slots: HashMap::new(),
            max_units,
        }
    }

    /// Decode the image at `path` and register it under `tag`.
    ///
    /// Returns the slot of the new texture. On any failure the error is logged and
    /// nothing is registered.
    pub fn load<B, D>(
        &mut self,
        backend: &mut B,
        decoder: &D,
        path: impl AsRef<Path>,
        tag: &str,
    ) -> Result<u32, TextureError>
    where
        B: TextureBackend<Handle = H>,
        D: ImageDecoder + ?Sized,
    {
        let path = path.as_ref();
        let image = self
            .check_free(tag)
            .and_then(|()| Ok(decoder.decode(path)?))
            .inspect_err(|e| {
                log::error!("could not load texture `{tag}` from {}: {e}", path.display())
            })?;
        let slot = self.insert_decoded(backend, tag, &image)?;
        log::info!("texture `{tag}` from {} is bound to slot {slot}", path.display());
        Ok(slot)
    }

    /// Register an already decoded image under `tag`.
    ///
    /// A rejected image is logged and nothing is registered.
    pub fn insert_decoded<B>(
        &mut self,
        backend: &mut B,
        tag: &str,
        image: &DecodedImage,
    ) -> Result<u32, TextureError>
    where
        B: TextureBackend<Handle = H>,
    {
        self.register(backend, tag, image)
            .inspect_err(|e| log::error!("could not register texture `{tag}`: {e}"))
    }

    fn register<B>(
        &mut self,
        backend: &mut B,
        tag: &str,
        image: &DecodedImage,
    ) -> Result<u32, TextureError>
    where
        B: TextureBackend<Handle = H>,
    {
        self.check_free(tag)?;
        let layout = PixelLayout::from_channels(image.channels).ok_or_else(|| {
            TextureError::UnsupportedChannels {
                tag: tag.to_string(),
                channels: image.channels,
            }
        })?;
        let handle = backend.create(tag, image, layout)?;
        log::info!(
            "texture `{tag}`: {}x{} with {} channels",
            image.width,
            image.height,
            image.channels
        );

        let slot = self.entries.len();
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
        });
        self.slots.insert(tag.to_string(), slot);
        Ok(slot as u32)
    }

    fn check_free(&self, tag: &str) -> Result<(), TextureError> {
        if self.slots.contains_key(tag) {
            return Err(TextureError::DuplicateTag(tag.to_string()));
        }
        if self.entries.len() >= self.max_units {
            return Err(TextureError::UnitsExhausted(self.max_units));
        }
        Ok(())
    }

    /// Bind every texture to the unit equal to its slot. Returns the number of bound units.
    pub fn bind_all<B>(&self, backend: &mut B) -> usize
    where
        B: TextureBackend<Handle = H>,
    {
        for (unit, entry) in self.entries.iter().enumerate() {
            backend.bind(unit as u32, &entry.handle);
        }
        self.entries.len()
    }

    pub fn find_handle(&self, tag: &str) -> Result<&H, TextureError> {
        self.slots
            .get(tag)
            .map(|&slot| &self.entries[slot].handle)
            .ok_or_else(|| TextureError::UnknownTag(tag.to_string()))
    }

    pub fn find_slot(&self, tag: &str) -> Result<u32, TextureError> {
        self.slots
            .get(tag)
            .map(|&slot| slot as u32)
            .ok_or_else(|| TextureError::UnknownTag(tag.to_string()))
    }

    /// Tags in slot order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.tag.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hand every handle back to `backend`. The registry is empty afterwards.
    pub fn destroy<B>(&mut self, backend: &mut B)
    where
        B: TextureBackend<Handle = H>,
    {
        self.slots.clear();
        for entry in self.entries.drain(..) {
            log::debug!("releasing texture `{}`", entry.tag);
            backend.release(entry.handle);
        }
    }
}
