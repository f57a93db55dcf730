//! Scene configuration.
//!
//! [`SceneConfig::default`] reproduces the hot-sauce shelf scene. Texture paths in the
//! manifest are relative to `asset_root`, which defaults to `./assets` resolved against
//! the working directory and can be overridden with the `SHELF_NGIN_ASSETS` environment
//! variable.

use std::path::PathBuf;

use cgmath::Deg;

use crate::data_structures::light::LightSetup;

/// Environment variable that overrides [`SceneConfig::asset_root`].
pub const ASSETS_ENV: &str = "SHELF_NGIN_ASSETS";

/// A texture to load and the tag it is registered under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureSource {
    pub path: PathBuf,
    pub tag: String,
}

impl TextureSource {
    pub fn new(path: impl Into<PathBuf>, tag: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            tag: tag.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub yaw: Deg<f32>,
    pub pitch: Deg<f32>,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 5.0, 12.0],
            yaw: Deg(-90.0),
            pitch: Deg(-14.0),
            fovy: Deg(45.0),
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub asset_root: PathBuf,
    /// Textures in load order. The n-th entry is bound to texture unit n.
    pub textures: Vec<TextureSource>,
    pub lights: LightSetup,
    pub window_title: String,
    pub window_size: (u32, u32),
    pub clear_color: wgpu::Color,
    pub camera: CameraConfig,
}

impl SceneConfig {
    /// The default scene with the asset root taken from `SHELF_NGIN_ASSETS` if set.
    pub fn from_env() -> Self {
        Self::default().with_asset_root_from(std::env::var_os(ASSETS_ENV).map(PathBuf::from))
    }

    pub fn with_asset_root_from(mut self, root: Option<PathBuf>) -> Self {
        if let Some(root) = root.filter(|root| !root.as_os_str().is_empty()) {
            log::info!("assets are read from {}", root.display());
            self.asset_root = root;
        }
        self
    }

    pub fn texture_tags(&self) -> impl Iterator<Item = &str> {
        self.textures.iter().map(|source| source.tag.as_str())
    }
}

/// Textures of the shelf scene in load order.
pub fn default_textures() -> Vec<TextureSource> {
    [
        ("wood.jpg", "wood"),
        ("sauce1.jpg", "sauce1"),
        ("sauce2.jpg", "sauce2"),
        ("sauce3.jpg", "sauce3"),
        ("sauce4.jpg", "sauce4"),
        ("lid.jpg", "lid"),
        ("wall.jpg", "wall"),
        ("shelfwood.jpg", "shelf"),
        ("redplastic.jpg", "redplastic"),
    ]
    .into_iter()
    .map(|(file, tag)| TextureSource::new(PathBuf::from("textures").join(file), tag))
    .collect()
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("./assets"),
            textures: default_textures(),
            lights: LightSetup::kitchen(),
            window_title: "shelf-ngin".to_string(),
            window_size: (1000, 800),
            clear_color: wgpu::Color {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 1.0,
            },
            camera: CameraConfig::default(),
        }
    }
}
