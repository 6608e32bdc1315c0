//! The window event loop and the per-frame update task.
//!
//! Each redraw runs one update task over the last-known input state:
//!
//! 1. request the next redraw
//! 2. poll the avatar load and splice it in if it resolved
//! 3. read the frame clock
//! 4. derive the frame state from clock, scroll and pointer
//! 5. apply it to the scene and render
//!
//! Event callbacks never mutate the scene; they only record input. The loop
//! starts when `run` is called and every per-frame effect stops when the
//! window closes.

use std::{iter, sync::Arc};

use winit::{
    application::ApplicationHandler,
    event::{KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::{
    carousel::Carousel,
    clock::FrameClock,
    config::BackdropConfig,
    context::{self, Context},
    data_structures::texture::Texture,
    frame::FrameState,
    input::InputState,
    scene::Scene,
};

/// Pixels one wheel line scrolls the virtual page by.
const LINE_SCROLL_PX: f32 = 40.0;

struct AppState {
    ctx: Context,
    scene: Scene,
    input: InputState,
    clock: FrameClock,
    carousel: Carousel,
    config: BackdropConfig,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(
        window: Arc<Window>,
        runtime: &tokio::runtime::Runtime,
        config: BackdropConfig,
    ) -> anyhow::Result<Self> {
        let ctx = Context::new(window, &config).await?;
        let scene = Scene::new(&ctx, runtime, config.clone())?;
        let input = InputState::new(
            ctx.config.width as f32,
            ctx.config.height as f32,
            config.page_length,
        );
        let carousel = Carousel::new(config.carousel_slides, config.carousel_links)?;
        Ok(Self {
            ctx,
            scene,
            input,
            clock: FrameClock::new(),
            carousel,
            config,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            // The window may have moved to a monitor with a different scale.
            self.ctx.pixel_ratio = context::clamped_pixel_ratio(
                self.ctx.window.scale_factor(),
                self.config.max_pixel_ratio,
            );
            self.ctx.projection.resize(width, height);
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture =
                Texture::create_depth_texture(&self.ctx.device, [width, height], "depth_texture");
            self.input
                .resize(width as f32, height as f32, self.config.page_length);
            self.scene.resize(&self.ctx);
        }
    }

    /// One tick of the update task plus the render it feeds.
    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.ctx.window.request_redraw();

        if !self.is_surface_configured {
            return Ok(());
        }

        self.scene.poll_avatar(&self.ctx);
        let tick = self.clock.tick();
        let frame = FrameState::derive(tick, &self.input, self.scene.avatar_ready(), &self.config);
        self.scene.apply(&mut self.ctx, &frame);

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
                label: Some("Backdrop Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
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

            self.scene.record(&self.ctx, &mut render_pass);
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    state: Option<AppState>,
    config: Option<BackdropConfig>,
}

impl App {
    fn new(config: BackdropConfig) -> anyhow::Result<Self> {
        Ok(Self {
            async_runtime: tokio::runtime::Runtime::new()?,
            state: None,
            config: Some(config),
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(config) = self.config.take() else {
            return;
        };
        let window = match event_loop.create_window(Window::default_attributes()) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("cannot create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        match self
            .async_runtime
            .block_on(AppState::new(window, &self.async_runtime, config))
        {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("backdrop initialization failed: {:#}", e);
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
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
            }
            WindowEvent::CursorMoved { position, .. } => state.input.set_pointer(position),
            WindowEvent::MouseWheel { delta, .. } => {
                let px = match delta {
                    MouseScrollDelta::LineDelta(_, lines) => -lines * LINE_SCROLL_PX,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                state.input.scroll_by(px);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                    },
                ..
            } if key_state.is_pressed() => match code {
                KeyCode::ArrowLeft => state.carousel.prev(),
                KeyCode::ArrowRight => state.carousel.next(),
                _ => {}
            },
            WindowEvent::RedrawRequested => match state.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = state.ctx.window.inner_size();
                    state.resize(size.width, size.height);
                }
                Err(e) => {
                    log::error!("unable to render: {}", e);
                }
            },
            _ => {}
        }
    }
}

/// Start the backdrop: initialize logging, build the window and run the event
/// loop until the window closes.
pub fn run(config: BackdropConfig) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
