//! WebGPU state for one chart surface.
//!
//! One uniform buffer holds a 256-byte-aligned slice per entity, bound with a
//! dynamic offset, so every data point is its own draw call and a bad entity
//! never takes the rest of the frame down with it.

use chart_core::{
    bar_mesh, wedge_mesh, wedge_segment_count, wedge_vertex_count, DrawInstance, DrawShape,
    SceneColors, Vertex, BAR_VERTEX_COUNT, PATTERN_SIZE,
};
use fnv::FnvHashMap;
use glam::Mat4;
use smallvec::SmallVec;
use web_sys as web;
use wgpu::util::DeviceExt;

/// Capacity of the per-entity uniform buffer.
pub const MAX_ENTITIES: usize = 64;

// Minimum uniform offset alignment guaranteed by the default WebGPU limits.
const UNIFORM_STRIDE: u64 = 256;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct EntityUniforms {
    camera: [[f32; 4]; 4],
    base_color: [f32; 4],
    secondary_color: [f32; 4],
    highlight_color: [f32; 4],
    base: [f32; 2],
    radius: f32,
    height: f32,
    // start, end, width, spacing (wedge only)
    span: [f32; 4],
    // pattern index, pattern size, highlight, unused
    params: [f32; 4],
}

struct DrawCall {
    // None draws the shared bar strip, Some(n) the cached n-segment wedge
    wedge_segments: Option<u32>,
    uniform_offset: u32,
    vertex_count: u32,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    bar_pipeline: wgpu::RenderPipeline,
    wedge_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    bar_vb: wgpu::Buffer,
    wedge_vbs: FnvHashMap<u32, wgpu::Buffer>,
    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("chart_shader"),
            source: wgpu::ShaderSource::Wgsl(chart_core::SCENE_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("entity_uniforms"),
            size: UNIFORM_STRIDE * MAX_ENTITIES as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("entity_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("entity_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &uniform_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<EntityUniforms>() as u64),
                }),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("chart_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }];

        let strip_pipeline = |entry: &str, label: &str| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some(entry),
                    buffers: &vertex_buffers,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleStrip,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth24Plus,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            })
        };
        let bar_pipeline = strip_pipeline("vs_bar", "bar_pipeline");
        let wedge_pipeline = strip_pipeline("vs_wedge", "wedge_pipeline");

        let bar_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("bar_vb"),
            contents: bar_mesh().as_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            bar_pipeline,
            wedge_pipeline,
            uniform_buffer,
            bind_group,
            bar_vb,
            wedge_vbs: FnvHashMap::default(),
            depth_view,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, width, height);
        }
    }

    /// Re-acquire the swapchain after a lost/outdated surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    // Wedge strips are cached per segment count; a slice only re-tessellates
    // when its angular span crosses a segment boundary.
    fn ensure_wedge_buffer(&mut self, segments: u32) {
        if self.wedge_vbs.contains_key(&segments) {
            return;
        }
        let mesh = wedge_mesh(segments);
        let vb = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("wedge_vb"),
                contents: mesh.as_bytes(),
                usage: wgpu::BufferUsages::VERTEX,
            });
        self.wedge_vbs.insert(segments, vb);
    }

    /// Draw one frame: one call per live entity. Entities with invalid
    /// animated values are skipped and logged; the rest of the frame
    /// continues.
    pub fn render(
        &mut self,
        camera: &Mat4,
        colors: &SceneColors,
        instances: &[DrawInstance],
    ) -> Result<(), wgpu::SurfaceError> {
        let count = instances.len().min(MAX_ENTITIES);
        if instances.len() > MAX_ENTITIES {
            log::warn!(
                "[render] {} entities exceed capacity {}, extra dropped",
                instances.len(),
                MAX_ENTITIES
            );
        }

        let mut uniform_bytes = vec![0u8; UNIFORM_STRIDE as usize * count];
        let mut calls: Vec<DrawCall> = Vec::with_capacity(count);
        let mut skipped: SmallVec<[usize; 8]> = SmallVec::new();
        for (index, instance) in instances.iter().take(count).enumerate() {
            match entity_uniforms(camera, colors, instance) {
                Ok(uniforms) => {
                    let offset = index * UNIFORM_STRIDE as usize;
                    let data = bytemuck::bytes_of(&uniforms);
                    uniform_bytes[offset..offset + data.len()].copy_from_slice(data);
                    let (wedge_segments, vertex_count) = match instance.shape {
                        DrawShape::Bar { .. } => (None, BAR_VERTEX_COUNT),
                        DrawShape::Wedge { start, end, .. } => {
                            let segments = wedge_segment_count(end - start);
                            (Some(segments), wedge_vertex_count(segments))
                        }
                    };
                    calls.push(DrawCall {
                        wedge_segments,
                        uniform_offset: offset as u32,
                        vertex_count,
                    });
                }
                Err(reason) => {
                    skipped.push(index);
                    log::error!("[render] entity {index} skipped: {reason}");
                }
            }
        }
        if !skipped.is_empty() {
            log::warn!("[render] frame continued without entities {skipped:?}");
        }

        for call in &calls {
            if let Some(segments) = call.wedge_segments {
                self.ensure_wedge_buffer(segments);
            }
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("chart_encoder"),
            });

        if !uniform_bytes.is_empty() {
            self.queue
                .write_buffer(&self.uniform_buffer, 0, &uniform_bytes);
        }

        {
            let clear = colors.clear;
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("chart_rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            for call in &calls {
                match call.wedge_segments {
                    None => {
                        rpass.set_pipeline(&self.bar_pipeline);
                        rpass.set_vertex_buffer(0, self.bar_vb.slice(..));
                    }
                    Some(segments) => {
                        rpass.set_pipeline(&self.wedge_pipeline);
                        // just ensured above
                        if let Some(vb) = self.wedge_vbs.get(&segments) {
                            rpass.set_vertex_buffer(0, vb.slice(..));
                        } else {
                            continue;
                        }
                    }
                }
                rpass.set_bind_group(0, &self.bind_group, &[call.uniform_offset]);
                rpass.draw(0..call.vertex_count, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Release the context deterministically; the surface must not wait for
    /// garbage collection.
    pub fn destroy(self) {
        self.device.destroy();
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let depth = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("chart_depth"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth24Plus,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    depth.create_view(&wgpu::TextureViewDescriptor::default())
}

fn entity_uniforms(
    camera: &Mat4,
    colors: &SceneColors,
    instance: &DrawInstance,
) -> Result<EntityUniforms, &'static str> {
    if !instance.height.is_finite() || !instance.highlight.is_finite() {
        return Err("non-finite animated value");
    }
    let (base, radius, span) = match instance.shape {
        DrawShape::Bar { base, radius } => {
            if !radius.is_finite() || !base.is_finite() {
                return Err("non-finite bar placement");
            }
            (base.to_array(), radius, [0.0; 4])
        }
        DrawShape::Wedge {
            radius,
            width,
            start,
            end,
            spacing,
        } => {
            let all_finite = [radius, width, start, end, spacing]
                .iter()
                .all(|v| v.is_finite());
            if !all_finite {
                return Err("non-finite wedge placement");
            }
            ([0.0; 2], radius, [start, end, width, spacing])
        }
    };
    Ok(EntityUniforms {
        camera: camera.to_cols_array_2d(),
        base_color: colors.base.to_vec4().to_array(),
        secondary_color: colors.secondary.to_vec4().to_array(),
        highlight_color: colors.highlight.to_vec4().to_array(),
        base,
        radius,
        height: instance.height,
        span,
        params: [
            instance.pattern.shader_index() as f32,
            PATTERN_SIZE,
            instance.highlight,
            0.0,
        ],
    })
}
