#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::HashMap,
    path::{Path, PathBuf},
    rc::Rc,
};

use shelf_ngin::{
    cgmath::{Matrix4, Vector2, Vector3, Vector4},
    data_structures::{shapes::Shape, texture::PixelLayout},
    pipelines::uniforms::{ShaderProgram, UniformValue},
    registry::TextureBackend,
    resources::{
        image::{DecodeError, DecodedImage, ImageDecoder},
        mesh::MeshDrawer,
    },
};

pub(crate) const EPSILON: f32 = 1e-4;

pub(crate) fn near(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON * a.abs().max(b.abs()).max(1.0)
}

pub(crate) fn vec3_near(a: Vector3<f32>, b: Vector3<f32>) -> bool {
    near(a.x, b.x) && near(a.y, b.y) && near(a.z, b.z)
}

pub(crate) fn mat4_near(a: &Matrix4<f32>, b: &Matrix4<f32>) -> bool {
    let a: &[[f32; 4]; 4] = a.as_ref();
    let b: &[[f32; 4]; 4] = b.as_ref();
    a.iter()
        .flatten()
        .zip(b.iter().flatten())
        .all(|(x, y)| near(*x, *y))
}

#[macro_export]
macro_rules! assert_vec3_near {
    ($actual:expr, $expected:expr) => {{
        let actual: shelf_ngin::cgmath::Vector3<f32> = $actual;
        let expected: shelf_ngin::cgmath::Vector3<f32> = $expected;
        assert!(
            crate::common::test_utils::vec3_near(actual, expected),
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }};
}

/// Shader program that remembers every uniform write.
#[derive(Debug, Default, Clone)]
pub(crate) struct RecordingShader {
    pub(crate) values: HashMap<String, UniformValue>,
    pub(crate) writes: Vec<(String, UniformValue)>,
}

impl RecordingShader {
    fn record(&mut self, name: &str, value: UniformValue) {
        self.values.insert(name.to_string(), value);
        self.writes.push((name.to_string(), value));
    }

    pub(crate) fn get(&self, name: &str) -> Option<UniformValue> {
        self.values.get(name).copied()
    }

    pub(crate) fn bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            UniformValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub(crate) fn float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            UniformValue::Float(f) => Some(f),
            _ => None,
        }
    }

    pub(crate) fn vec2(&self, name: &str) -> Option<Vector2<f32>> {
        match self.get(name)? {
            UniformValue::Vec2(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn vec3(&self, name: &str) -> Option<Vector3<f32>> {
        match self.get(name)? {
            UniformValue::Vec3(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn vec4(&self, name: &str) -> Option<Vector4<f32>> {
        match self.get(name)? {
            UniformValue::Vec4(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn mat4(&self, name: &str) -> Option<Matrix4<f32>> {
        match self.get(name)? {
            UniformValue::Mat4(m) => Some(m),
            _ => None,
        }
    }

    pub(crate) fn sampler(&self, name: &str) -> Option<u32> {
        match self.get(name)? {
            UniformValue::Sampler2d(unit) => Some(unit),
            _ => None,
        }
    }

    /// Names in write order, starting at write number `from`.
    pub(crate) fn names_since(&self, from: usize) -> Vec<&str> {
        self.writes[from..]
            .iter()
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

impl ShaderProgram for RecordingShader {
    fn set_int(&mut self, name: &str, value: i32) {
        self.record(name, UniformValue::Int(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.record(name, UniformValue::Bool(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.record(name, UniformValue::Float(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.record(name, UniformValue::Vec2(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.record(name, UniformValue::Vec3(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.record(name, UniformValue::Vec4(value));
    }

    fn set_mat4(&mut self, name: &str, value: &Matrix4<f32>) {
        self.record(name, UniformValue::Mat4(*value));
    }

    fn set_sampler_2d(&mut self, name: &str, unit: u32) {
        self.record(name, UniformValue::Sampler2d(unit));
    }
}

/// A draw together with the shader state it was issued with.
#[derive(Debug, Clone)]
pub(crate) struct DrawRecord {
    pub(crate) shape: Shape,
    pub(crate) state: RecordingShader,
    /// Number of uniform writes before the draw.
    pub(crate) write_index: usize,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingMeshes {
    pub(crate) loaded: Vec<Shape>,
    pub(crate) draws: Vec<DrawRecord>,
}

impl MeshDrawer<RecordingShader> for RecordingMeshes {
    fn load(&mut self, shape: Shape) {
        if !self.loaded.contains(&shape) {
            self.loaded.push(shape);
        }
    }

    fn draw(&mut self, shape: Shape, shader: &RecordingShader) {
        self.draws.push(DrawRecord {
            shape,
            state: shader.clone(),
            write_index: shader.writes.len(),
        });
    }
}

/// In-memory images keyed by path.
#[derive(Debug, Default)]
pub(crate) struct FakeDecoder {
    images: HashMap<PathBuf, DecodedImage>,
}

impl FakeDecoder {
    pub(crate) fn with(mut self, path: impl Into<PathBuf>, width: u32, height: u32, channels: u8) -> Self {
        self.images.insert(path.into(), image(width, height, channels));
        self
    }

    /// Every texture of `sources` as a 4x4 RGB image.
    pub(crate) fn serving<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Self {
        paths
            .into_iter()
            .fold(Self::default(), |decoder, path| decoder.with(path, 4, 4, 3))
    }
}

impl ImageDecoder for FakeDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage, DecodeError> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| DecodeError::NotFound(path.to_path_buf()))
    }
}

pub(crate) fn image(width: u32, height: u32, channels: u8) -> DecodedImage {
    DecodedImage {
        pixels: vec![128; (width * height) as usize * channels as usize],
        width,
        height,
        channels,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct FakeHandle(pub(crate) u64);

#[derive(Debug, Default)]
pub(crate) struct TextureLog {
    pub(crate) created: Vec<(String, PixelLayout)>,
    pub(crate) bound: Vec<(u32, FakeHandle)>,
    pub(crate) released: Vec<FakeHandle>,
}

/// Texture backend that hands out numbered handles and logs every call. The log is
/// shared so it can be inspected after the backend was moved or dropped.
#[derive(Debug, Default)]
pub(crate) struct FakeTextures {
    next: u64,
    pub(crate) log: Rc<RefCell<TextureLog>>,
}

impl FakeTextures {
    pub(crate) fn new() -> (Self, Rc<RefCell<TextureLog>>) {
        let backend = Self::default();
        let log = backend.log.clone();
        (backend, log)
    }
}

impl TextureBackend for FakeTextures {
    type Handle = FakeHandle;

    fn create(
        &mut self,
        label: &str,
        _image: &DecodedImage,
        layout: PixelLayout,
    ) -> anyhow::Result<FakeHandle> {
        self.log
            .borrow_mut()
            .created
            .push((label.to_string(), layout));
        self.next += 1;
        Ok(FakeHandle(self.next))
    }

    fn bind(&mut self, unit: u32, handle: &FakeHandle) {
        self.log.borrow_mut().bound.push((unit, *handle));
    }

    fn release(&mut self, handle: FakeHandle) {
        self.log.borrow_mut().released.push(handle);
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Keeps every log record of the current test thread.
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        CAPTURED.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Start capturing the log records of the calling test.
pub(crate) fn capture_logs() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
    CAPTURED.with(|records| records.borrow_mut().clear());
}

/// Error messages logged by the calling test since [`capture_logs`].
pub(crate) fn logged_errors() -> Vec<String> {
    CAPTURED.with(|records| {
        records
            .borrow()
            .iter()
            .filter(|(level, _)| *level == log::Level::Error)
            .map(|(_, message)| message.clone())
            .collect()
    })
}
