use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use log::{debug, info};
use wgpu::util::DeviceExt;
use winit::window::Window;

use super::batch::FrameBatch;
use crate::core::GpuContext;
use crate::math::Rgb;
use crate::scene::SceneStats;
use crate::scenes::Showcase;
use crate::types::{ColorVertex, ParticleInstance, ShellVertex};
use crate::uniforms::{FrameUniform, PostUniform, ShaderProgram};

/// Offscreen scene target, read by the composite pass
pub const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const ADDITIVE_BLENDING: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

type SpriteKey = (Option<ShaderProgram>, bool, bool);
type ShellKey = (ShaderProgram, bool);

/// What the egui overlay shows
pub struct Overlay<'a> {
    pub showcase: Showcase,
    pub seed: u64,
    pub fps: f32,
    pub stats: &'a SceneStats,
    pub triangles: usize,
    pub sprites: usize,
}

struct PipelineSpec<'a> {
    label: &'a str,
    module: &'a wgpu::ShaderModule,
    entry_points: (&'a str, &'a str),
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
    blend: wgpu::BlendState,
    depth_test: bool,
    depth_write: bool,
}

/// Size-dependent render targets
struct Targets {
    color: wgpu::TextureView,
    depth: wgpu::TextureView,
    composite: wgpu::BindGroup,
}

impl Targets {
    fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        post_buffer: &wgpu::Buffer,
    ) -> Self {
        let color = create_target(device, "Scene Target", width, height, HDR_FORMAT);
        let depth = create_target(device, "Depth Target", width, height, DEPTH_FORMAT);

        let composite = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&color),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: post_buffer.as_entire_binding(),
                },
            ],
            label: Some("composite_bind_group"),
        });

        Self { color, depth, composite }
    }
}

fn create_target(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Approximate sRGB decode for the clear color of the linear scene target
fn srgb_to_linear(rgb: Rgb) -> wgpu::Color {
    let [r, g, b] = rgb.map(|c| (c as f64).powf(2.2));
    wgpu::Color { r, g, b, a: 1.0 }
}

/// wgpu viewer: scene passes into an HDR target, composite, then egui
pub struct Renderer {
    gpu: GpuContext,
    modules: HashMap<ShaderProgram, wgpu::ShaderModule>,
    scene_layout: wgpu::PipelineLayout,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    post_buffer: wgpu::Buffer,
    composite_layout: wgpu::BindGroupLayout,
    composite_pipeline: wgpu::RenderPipeline,
    sampler: wgpu::Sampler,
    targets: Targets,
    opaque_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    shell_pipelines: HashMap<ShellKey, wgpu::RenderPipeline>,
    sprite_pipelines: HashMap<SpriteKey, wgpu::RenderPipeline>,
    backdrop_pipeline: Option<wgpu::RenderPipeline>,
    clear_color: wgpu::Color,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
    show_ui: bool,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, background: Rgb, show_ui: bool) -> Result<Self> {
        let gpu = GpuContext::new(window.clone()).await?;
        let device = &gpu.device;
        let (width, height) = gpu.size();

        let modules: HashMap<ShaderProgram, wgpu::ShaderModule> = ShaderProgram::ALL
            .iter()
            .map(|&program| {
                let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some(program.label()),
                    source: wgpu::ShaderSource::Wgsl(program.source().into()),
                });
                (program, module)
            })
            .collect();
        let scene_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/scene.wgsl").into()),
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("frame_bind_group_layout"),
        });
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Buffer"),
            size: std::mem::size_of::<FrameUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
            label: Some("frame_bind_group"),
        });
        let scene_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&frame_layout],
            push_constant_ranges: &[],
        });

        let opaque_pipeline = Self::create_pipeline(
            device,
            &scene_layout,
            PipelineSpec {
                label: "Opaque Pipeline",
                module: &scene_module,
                entry_points: ("vs_main", "fs_main"),
                buffers: &[ColorVertex::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                blend: wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
                depth_test: true,
                depth_write: true,
            },
        );
        let transparent_pipeline = Self::create_pipeline(
            device,
            &scene_layout,
            PipelineSpec {
                label: "Transparent Pipeline",
                module: &scene_module,
                entry_points: ("vs_main", "fs_main"),
                buffers: &[ColorVertex::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                blend: wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
                depth_test: true,
                depth_write: false,
            },
        );
        let line_pipeline = Self::create_pipeline(
            device,
            &scene_layout,
            PipelineSpec {
                label: "Line Pipeline",
                module: &scene_module,
                entry_points: ("vs_main", "fs_main"),
                buffers: &[ColorVertex::layout()],
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                blend: wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
                depth_test: true,
                depth_write: false,
            },
        );

        let (post_buffer, composite_layout, composite_pipeline, sampler) =
            Self::create_composite(device, gpu.format());
        let targets = Targets::new(device, width, height, &composite_layout, &sampler, &post_buffer);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, gpu.format(), egui_wgpu::RendererOptions::default());

        info!("renderer ready at {}x{}", width, height);

        Ok(Self {
            gpu,
            modules,
            scene_layout,
            frame_buffer,
            frame_bind_group,
            post_buffer,
            composite_layout,
            composite_pipeline,
            sampler,
            targets,
            opaque_pipeline,
            transparent_pipeline,
            line_pipeline,
            shell_pipelines: HashMap::new(),
            sprite_pipelines: HashMap::new(),
            backdrop_pipeline: None,
            clear_color: srgb_to_linear(background),
            egui_renderer,
            egui_state,
            egui_ctx,
            show_ui,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        self.gpu.size()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.gpu.resize(width, height) {
            return;
        }
        self.targets = Targets::new(
            &self.gpu.device,
            width,
            height,
            &self.composite_layout,
            &self.sampler,
            &self.post_buffer,
        );
        debug!("render targets resized to {}x{}", width, height);
    }

    pub fn reconfigure(&self) {
        self.gpu.reconfigure();
    }

    /// Returns true when egui consumed the event
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        spec: PipelineSpec,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(spec.label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: spec.module,
                entry_point: Some(spec.entry_points.0),
                buffers: spec.buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: spec.module,
                entry_point: Some(spec.entry_points.1),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: Some(spec.blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: spec.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: spec.cull_mode,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: spec.depth_write,
                depth_compare: if spec.depth_test {
                    wgpu::CompareFunction::LessEqual
                } else {
                    wgpu::CompareFunction::Always
                },
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_composite(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> (wgpu::Buffer, wgpu::BindGroupLayout, wgpu::RenderPipeline, wgpu::Sampler) {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Composite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/composite.wgsl").into()),
        });

        let post_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Post Buffer"),
            size: std::mem::size_of::<PostUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
            label: Some("composite_bind_group_layout"),
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Composite Pipeline Layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Composite Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        (post_buffer, layout, pipeline, sampler)
    }

    fn ensure_pipelines(&mut self, batch: &FrameBatch) {
        let device = &self.gpu.device;

        for shell in &batch.shells {
            let key = (shell.program, shell.depth_write);
            if self.shell_pipelines.contains_key(&key) {
                continue;
            }
            let Some(module) = self.modules.get(&shell.program) else {
                continue;
            };
            let pipeline = Self::create_pipeline(
                device,
                &self.scene_layout,
                PipelineSpec {
                    label: shell.program.label(),
                    module,
                    entry_points: shell.program.entry_points(),
                    buffers: &[ShellVertex::layout()],
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: Some(wgpu::Face::Front),
                    blend: wgpu::BlendState::ALPHA_BLENDING,
                    depth_test: true,
                    depth_write: shell.depth_write,
                },
            );
            self.shell_pipelines.insert(key, pipeline);
        }

        for sprites in &batch.sprites {
            let key = (sprites.program, sprites.additive, sprites.depth_test);
            if self.sprite_pipelines.contains_key(&key) {
                continue;
            }
            // plain points share the point program source
            let (module, entry_points) = match sprites.program {
                Some(program) => (self.modules.get(&program), program.entry_points()),
                None => (self.modules.get(&ShaderProgram::Sparks), ("vs_plain", "fs_square")),
            };
            let Some(module) = module else {
                continue;
            };
            let pipeline = Self::create_pipeline(
                device,
                &self.scene_layout,
                PipelineSpec {
                    label: sprites.program.map_or("Points", |p| p.label()),
                    module,
                    entry_points,
                    buffers: &[ParticleInstance::layout()],
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: None,
                    blend: if sprites.additive {
                        ADDITIVE_BLENDING
                    } else {
                        wgpu::BlendState::ALPHA_BLENDING
                    },
                    depth_test: sprites.depth_test,
                    depth_write: false,
                },
            );
            self.sprite_pipelines.insert(key, pipeline);
        }

        if batch.backdrop.is_some() && self.backdrop_pipeline.is_none() {
            if let Some(module) = self.modules.get(&ShaderProgram::Aurora) {
                self.backdrop_pipeline = Some(Self::create_pipeline(
                    device,
                    &self.scene_layout,
                    PipelineSpec {
                        label: ShaderProgram::Aurora.label(),
                        module,
                        entry_points: ShaderProgram::Aurora.entry_points(),
                        buffers: &[],
                        topology: wgpu::PrimitiveTopology::TriangleList,
                        cull_mode: None,
                        blend: wgpu::BlendState::REPLACE,
                        depth_test: false,
                        depth_write: false,
                    },
                ));
            }
        }
    }

    fn vertex_buffer(&self, label: &str, contents: &[u8]) -> Option<wgpu::Buffer> {
        (!contents.is_empty()).then(|| {
            self.gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::VERTEX,
            })
        })
    }

    pub fn render(
        &mut self,
        window: &Window,
        batch: &FrameBatch,
        frame: FrameUniform,
        post: PostUniform,
        overlay: &Overlay,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        self.ensure_pipelines(batch);

        self.gpu
            .queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::cast_slice(&[frame]));
        self.gpu
            .queue
            .write_buffer(&self.post_buffer, 0, bytemuck::cast_slice(&[post]));

        let opaque = self.vertex_buffer("Opaque Vertices", bytemuck::cast_slice(&batch.opaque));
        let transparent = self.vertex_buffer("Transparent Vertices", bytemuck::cast_slice(&batch.transparent));
        let lines = self.vertex_buffer("Line Vertices", bytemuck::cast_slice(&batch.lines));
        let shells: Vec<(ShellKey, wgpu::Buffer, u32)> = batch
            .shells
            .iter()
            .filter_map(|s| {
                let buffer = self.vertex_buffer("Shell Vertices", bytemuck::cast_slice(&s.vertices))?;
                Some(((s.program, s.depth_write), buffer, s.vertices.len() as u32))
            })
            .collect();
        let sprites: Vec<(SpriteKey, wgpu::Buffer, u32)> = batch
            .sprites
            .iter()
            .filter_map(|s| {
                let buffer = self.vertex_buffer("Sprite Instances", bytemuck::cast_slice(&s.instances))?;
                Some(((s.program, s.additive, s.depth_test), buffer, s.instances.len() as u32))
            })
            .collect();

        let output = self.gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Encoder"),
            });

        // Scene pass - backdrop, shells, meshes, lines, sprites
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.color,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            pass.set_bind_group(0, &self.frame_bind_group, &[]);

            if let (Some(_), Some(pipeline)) = (batch.backdrop, &self.backdrop_pipeline) {
                pass.set_pipeline(pipeline);
                pass.draw(0..3, 0..1);
            }

            for (key, buffer, count) in &shells {
                if let Some(pipeline) = self.shell_pipelines.get(key) {
                    pass.set_pipeline(pipeline);
                    pass.set_vertex_buffer(0, buffer.slice(..));
                    pass.draw(0..*count, 0..1);
                }
            }

            for (pipeline, buffer, count) in [
                (&self.opaque_pipeline, &opaque, batch.opaque.len()),
                (&self.transparent_pipeline, &transparent, batch.transparent.len()),
                (&self.line_pipeline, &lines, batch.lines.len()),
            ] {
                if let Some(buffer) = buffer {
                    pass.set_pipeline(pipeline);
                    pass.set_vertex_buffer(0, buffer.slice(..));
                    pass.draw(0..count as u32, 0..1);
                }
            }

            for (key, buffer, count) in &sprites {
                if let Some(pipeline) = self.sprite_pipelines.get(key) {
                    pass.set_pipeline(pipeline);
                    pass.set_vertex_buffer(0, buffer.slice(..));
                    pass.draw(0..6, 0..*count);
                }
            }
        }

        // Composite pass - bloom and color correction into the surface
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Composite Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.composite_pipeline);
            pass.set_bind_group(0, &self.targets.composite, &[]);
            pass.draw(0..3, 0..1);
        }

        if self.show_ui {
            self.draw_overlay(window, &mut encoder, &view, overlay);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn draw_overlay(
        &mut self,
        window: &Window,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        overlay: &Overlay,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            egui::Window::new("FPS")
                .title_bar(false)
                .resizable(false)
                .fixed_pos(egui::pos2(10.0, 10.0))
                .frame(egui::Frame::NONE)
                .show(ctx, |ui| {
                    ui.label(
                        egui::RichText::new(format!("{:.0}", overlay.fps))
                            .size(48.0)
                            .color(egui::Color32::from_rgb(0, 255, 255)),
                    );
                    ui.label(
                        egui::RichText::new("FPS")
                            .size(12.0)
                            .color(egui::Color32::GRAY),
                    );
                    ui.label(
                        egui::RichText::new(format!(
                            "{} · seed {}\n{} nodes · {} animated\n{} triangles · {} sprites",
                            overlay.showcase,
                            overlay.seed,
                            overlay.stats.nodes,
                            overlay.stats.animated,
                            overlay.triangles,
                            overlay.sprites
                        ))
                        .size(11.0)
                        .color(egui::Color32::GRAY),
                    );
                });
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.gpu.device, &self.gpu.queue, *id, image_delta);
        }

        let (width, height) = self.gpu.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        self.egui_renderer.update_buffers(
            &self.gpu.device,
            &self.gpu.queue,
            encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
