pub mod painter;
pub mod quad_pipeline;
pub mod utils;

use std::sync::Arc;

use glam::Vec2;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use quad_pipeline::{QuadPipeline, QuadVertex, create_quad_pipeline};
use utils::{Viewport, letterbox_viewport};

use crate::camera::CameraUniform;
use crate::error::Result;
use crate::geometry::Rect;
use crate::palette::Color;

pub use painter::{LAYOUT, Painted, paint};

pub struct Renderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    quad_pipeline: QuadPipeline,
    /// Fixed 1280×720 projection for the HUD and full-screen overlays.
    screen_bind_group: wgpu::BindGroup,
    /// Camera view-projection for the world pass.
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    // ── Screen vertex buffer (persistent, invalidated by FNV hash) ─────────
    screen_vertex_buffer: Option<wgpu::Buffer>,
    screen_vertex_capacity: u32,
    screen_vertex_hash: u64,
    viewport: Viewport,
}

/// FNV-1a 64-bit hash, used to detect unchanged overlay vertex data.
fn fnv1a_64(data: &[u8]) -> u64 {
    data.iter().fold(14695981039346656037u64, |h, &b| {
        h.wrapping_mul(1099511628211) ^ b as u64
    })
}

fn physical(size: PhysicalSize<u32>) -> Vec2 {
    Vec2::new(size.width as f32, size.height as f32)
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .unwrap_or(caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let quad_pipeline = create_quad_pipeline(&device, format);

        let screen_uniform = CameraUniform::identity_ortho(LAYOUT.x, LAYOUT.y);
        let screen_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("screen_projection_buffer"),
            contents: bytemuck::cast_slice(&[screen_uniform]),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("screen_projection_bg"),
            layout: &quad_pipeline.projection_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_buffer.as_entire_binding(),
            }],
        });

        // Identity ortho until the first camera upload.
        let camera_uniform = CameraUniform::identity_ortho(LAYOUT.x, LAYOUT.y);
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera_buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &quad_pipeline.projection_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let viewport = letterbox_viewport(physical(size), LAYOUT);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            quad_pipeline,
            screen_bind_group,
            camera_buffer,
            camera_bind_group,
            screen_vertex_buffer: None,
            screen_vertex_capacity: 0,
            screen_vertex_hash: 0,
            viewport,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.viewport = letterbox_viewport(physical(new_size), LAYOUT);
    }

    /// Letterboxed region the game is drawn into, in physical pixels.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Upload a new camera view-projection matrix for the world pass.
    pub fn update_camera(&mut self, uniform: &CameraUniform) {
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(std::slice::from_ref(uniform)),
        );
    }

    fn upload_screen(&mut self, verts: &[QuadVertex]) {
        let bytes: &[u8] = bytemuck::cast_slice(verts);
        let hash = fnv1a_64(bytes);
        let count = verts.len() as u32;

        if count > self.screen_vertex_capacity || self.screen_vertex_buffer.is_none() {
            let capacity = count.next_power_of_two().max(256);
            self.screen_vertex_buffer = Some(self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("screen_vertex_buffer"),
                size: capacity as u64 * std::mem::size_of::<QuadVertex>() as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.screen_vertex_capacity = capacity;
            self.screen_vertex_hash = !hash;
        }

        if hash != self.screen_vertex_hash {
            if let Some(buffer) = &self.screen_vertex_buffer {
                self.queue.write_buffer(buffer, 0, bytes);
            }
            self.screen_vertex_hash = hash;
        }
    }

    /// Render one frame: the world through the camera, then the overlay in
    /// layout space, both inside the letterbox. The bars stay black.
    pub fn render(&mut self, painted: &Painted, background: Color) -> std::result::Result<(), wgpu::SurfaceError> {
        if self.viewport.width < 1.0 || self.viewport.height < 1.0 {
            return Ok(());
        }
        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        if !painted.screen.is_empty() {
            self.upload_screen(&painted.screen);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("game_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let vp = self.viewport;
            pass.set_viewport(vp.x, vp.y, vp.width, vp.height, 0.0, 1.0);
            pass.set_pipeline(&self.quad_pipeline.render_pipeline);

            // ── Background fill [screen] ────────────────────────────────────
            let mut backdrop = Vec::with_capacity(6);
            painter::push_rect(&mut backdrop, Rect::new(0.0, 0.0, LAYOUT.x, LAYOUT.y), background);
            let bbuf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("backdrop_vertex_buffer"),
                contents: bytemuck::cast_slice(&backdrop),
                usage: wgpu::BufferUsages::VERTEX,
            });
            pass.set_bind_group(0, &self.screen_bind_group, &[]);
            pass.set_vertex_buffer(0, bbuf.slice(..));
            pass.draw(0..backdrop.len() as u32, 0..1);

            // ── World: sprites and particles [camera] ───────────────────────
            if !painted.world.is_empty() {
                let wbuf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("world_vertex_buffer"),
                    contents: bytemuck::cast_slice(&painted.world),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                pass.set_bind_group(0, &self.camera_bind_group, &[]);
                pass.set_vertex_buffer(0, wbuf.slice(..));
                pass.draw(0..painted.world.len() as u32, 0..1);
            }

            // ── HUD and screens [screen] ────────────────────────────────────
            if !painted.screen.is_empty() {
                if let Some(buf) = &self.screen_vertex_buffer {
                    let count = painted.screen.len() as u32;
                    let byte_len = count as u64 * std::mem::size_of::<QuadVertex>() as u64;
                    pass.set_bind_group(0, &self.screen_bind_group, &[]);
                    pass.set_vertex_buffer(0, buf.slice(..byte_len));
                    pass.draw(0..count, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
