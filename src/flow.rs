//! Application event loop.
//!
//! [`run`] opens a window and drives the shelf scene with winit's
//! [`ApplicationHandler`]:
//!
//! 1. On `resumed` the GPU [`Context`] is created and the scene is prepared once:
//!    textures are loaded and bound, materials defined, lights configured and the
//!    shapes uploaded. The scene is then built into a list of queued draws.
//! 2. On every `RedrawRequested` the view uniforms are refreshed and the queued draws
//!    are replayed into the frame.
//! 3. Resizes reconfigure the surface and the depth buffer; a lost or outdated surface
//!    is reconfigured on the next frame.

use std::{iter, sync::Arc};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    config::SceneConfig,
    context::Context,
    data_structures::texture::Texture,
    pipelines::uniforms::UniformState,
    render::{ObjectBuffer, draw_queued},
    resources::{
        image::ImageCrateDecoder,
        mesh::{DrawCall, ShapeMeshes},
        texture::GpuTextures,
    },
    scene::SceneManager,
};

/// The scene as it is wired to WGPU.
pub type GpuScene = SceneManager<UniformState, GpuTextures, ShapeMeshes>;

/// Everything that exists once the window is open.
pub struct AppState {
    pub(crate) ctx: Context,
    scene: GpuScene,
    draws: Vec<DrawCall>,
    objects: ObjectBuffer,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &SceneConfig) -> anyhow::Result<Self> {
        let ctx = Context::new(window, config).await?;

        let textures = GpuTextures::new(&ctx.device, &ctx.queue);
        let meshes = ShapeMeshes::new(&ctx.device);
        let mut scene = SceneManager::new(UniformState::new(), textures, meshes);

        let decoder = ImageCrateDecoder::new(&config.asset_root);
        scene.prepare_scene(&decoder, config)?;

        let errors = scene.render_scene();
        if !errors.is_empty() {
            log::warn!("{} parts of the scene could not be drawn", errors.len());
        }
        let draws = scene.meshes_mut().take_draws();
        log::info!("scene prepared with {} draws", draws.len());

        let mut objects = ObjectBuffer::new(&ctx.device, &ctx.object_layout, draws.len());
        objects.upload(&ctx.device, &ctx.queue, &ctx.object_layout, &draws);

        Ok(Self {
            ctx,
            scene,
            draws,
            objects,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.ctx.window.request_redraw();

        if !self.is_surface_configured {
            return Ok(());
        }

        self.scene
            .update_view(&self.ctx.camera, &self.ctx.projection);
        self.ctx.write_frame(&self.scene.shader().frame);

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.ctx.pipeline);
            render_pass.set_bind_group(0, &self.ctx.frame_bind_group, &[]);
            draw_queued(
                &mut render_pass,
                &self.draws,
                &self.objects,
                self.scene.meshes(),
                self.scene.backend(),
            );
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: SceneConfig,
    state: Option<AppState>,
}

impl App {
    fn new(config: SceneConfig) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            async_runtime,
            config,
            state: None,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let (width, height) = self.config.window_size;
        let window_attributes = Window::default_attributes()
            .with_title(self.config.window_title.clone())
            .with_inner_size(PhysicalSize::new(width, height));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Cannot open a window: {e}");
                event_loop.exit();
                return;
            }
        };

        match self
            .async_runtime
            .block_on(AppState::new(window, &self.config))
        {
            Ok(mut state) => {
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("App initialization failed. Cannot create the main context: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                state.scene.destroy();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => match state.render() {
                Ok(_) => {}
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = state.ctx.window.inner_size();
                    state.resize(size.width, size.height);
                }
                Err(e) => {
                    log::error!("Unable to render {}", e);
                }
            },
            _ => {}
        }
    }
}

/// Open a window and render the scene described by `config` until it is closed.
pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    Ok(())
}
