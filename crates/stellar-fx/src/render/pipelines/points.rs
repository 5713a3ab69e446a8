use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::render::RenderCtx;
use crate::scene::{Blending, ObjectKey, Points, PointsMaterial, Scene, SceneObject};

use super::common::{
    blend_state, multisample_state, primitive_state, uniform_bind_group_layout, uniform_binding,
};

/// Renderer for `SceneObject::Points`.
///
/// Each point is an instanced screen-aligned quad. Positions are re-uploaded
/// only when the geometry version changes.
#[derive(Default)]
pub struct PointsRenderer {
    target: Option<(wgpu::TextureFormat, u32)>,
    pipelines: HashMap<Blending, wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    clouds: HashMap<ObjectKey, CloudBinding>,
}

struct CloudBinding {
    instance_vbo: wgpu::Buffer,
    capacity: usize,
    count: u32,
    uploaded_version: Option<u64>,
    ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl PointsRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepare(
        &mut self,
        ctx: &RenderCtx<'_>,
        scene: &Scene,
        view_proj: Mat4,
        view: Mat4,
    ) {
        self.clouds.retain(|key, _| scene.points(*key).is_some());

        let mut any = false;
        for (key, object) in scene.iter() {
            let SceneObject::Points(points) = object else { continue };
            if points.geometry.is_empty() {
                continue;
            }
            if !any {
                self.ensure_target(ctx);
                self.ensure_static_buffers(ctx);
                any = true;
            }
            self.ensure_pipeline(ctx, points.material.blending);
            self.upload(ctx, key, points, view_proj, view);
        }
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, scene: &Scene) {
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        for (key, object) in scene.iter() {
            let SceneObject::Points(points) = object else { continue };
            let Some(cloud) = self.clouds.get(&key) else { continue };
            if cloud.count == 0 {
                continue;
            }
            let Some(pipeline) = self.pipelines.get(&points.material.blending) else { continue };

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &cloud.bind_group, &[]);
            rpass.set_vertex_buffer(0, quad_vbo.slice(..));
            rpass.set_vertex_buffer(1, cloud.instance_vbo.slice(..));
            rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..cloud.count);
        }
    }

    pub fn clear(&mut self) {
        self.clouds.clear();
        self.pipelines.clear();
        self.bind_group_layout = None;
        self.quad_vbo = None;
        self.quad_ibo = None;
        self.target = None;
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_target(&mut self, ctx: &RenderCtx<'_>) {
        let target = (ctx.surface_format, ctx.sample_count);
        if self.target != Some(target) {
            self.pipelines.clear();
            self.target = Some(target);
        }
        if self.bind_group_layout.is_none() {
            self.bind_group_layout = Some(uniform_bind_group_layout::<PointsUniform>(
                ctx.device,
                "stellar-fx points bgl",
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            ));
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>, blending: Blending) {
        if self.pipelines.contains_key(&blending) {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("stellar-fx points shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/points.wgsl").into()),
        });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("stellar-fx points pipeline layout"),
                bind_group_layouts: &[bgl],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("stellar-fx points pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[CornerVertex::layout(), PointInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(blend_state(blending)),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: primitive_state(),
            depth_stencil: None,
            multisample: multisample_state(ctx.sample_count),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("points pipeline built for {:?} ({:?})", ctx.surface_format, blending);
        self.pipelines.insert(blending, pipeline);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("stellar-fx points quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("stellar-fx points quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn upload(
        &mut self,
        ctx: &RenderCtx<'_>,
        key: ObjectKey,
        points: &Points,
        view_proj: Mat4,
        view: Mat4,
    ) {
        let len = points.geometry.len();

        let too_small = self.clouds.get(&key).is_some_and(|c| c.capacity < len);
        if too_small {
            self.clouds.remove(&key);
        }

        if !self.clouds.contains_key(&key) {
            let Some(bgl) = self.bind_group_layout.as_ref() else { return };
            let capacity = len.next_power_of_two();
            let instance_vbo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("stellar-fx points instance vbo"),
                size: (capacity * std::mem::size_of::<PointInstance>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let (ubo, bind_group) =
                uniform_binding::<PointsUniform>(ctx.device, bgl, "stellar-fx points ubo");
            self.clouds.insert(
                key,
                CloudBinding {
                    instance_vbo,
                    capacity,
                    count: 0,
                    uploaded_version: None,
                    ubo,
                    bind_group,
                },
            );
        }

        let Some(cloud) = self.clouds.get_mut(&key) else { return };

        let version = points.geometry.version();
        if cloud.uploaded_version != Some(version) {
            ctx.queue.write_buffer(
                &cloud.instance_vbo,
                0,
                bytemuck::cast_slice(points.geometry.positions()),
            );
            cloud.uploaded_version = Some(version);
            cloud.count = len as u32;
        }

        let uniform = PointsUniform::new(view_proj, view, &points.material, ctx.viewport.to_array());
        ctx.queue.write_buffer(&cloud.ubo, 0, bytemuck::bytes_of(&uniform));
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Uniform block, 160 bytes:
///
///  offset   0  view_proj  mat4x4<f32>
///  offset  64  view       mat4x4<f32>
///  offset 128  color      vec4<f32>   rgb + opacity
///  offset 144  viewport   vec2<f32>   physical px
///  offset 152  size       f32
///  offset 156  attenuate  f32         0 or 1
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct PointsUniform {
    view_proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    color: [f32; 4],
    viewport: [f32; 2],
    size: f32,
    attenuate: f32,
}

impl PointsUniform {
    fn new(view_proj: Mat4, view: Mat4, material: &PointsMaterial, viewport: [f32; 2]) -> Self {
        let [r, g, b] = material.color.to_array();
        let alpha = if material.transparent { material.opacity } else { 1.0 };
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            color: [r, g, b, alpha],
            viewport,
            size: material.size,
            attenuate: if material.size_attenuation { 1.0 } else { 0.0 },
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CornerVertex {
    corner: [f32; 2],
}

impl CornerVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CornerVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Sprite corners around the point center, in sprite-size units.
const QUAD_CORNERS: [CornerVertex; 4] = [
    CornerVertex { corner: [-0.5, -0.5] },
    CornerVertex { corner: [0.5, -0.5] },
    CornerVertex { corner: [0.5, 0.5] },
    CornerVertex { corner: [-0.5, 0.5] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Per-instance position; the host `[f32; 3]` array is uploaded as-is.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct PointInstance {
    position: [f32; 3],
}

impl PointInstance {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Rgb;

    #[test]
    fn uniform_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<PointsUniform>(), 160);
        assert_eq!(std::mem::offset_of!(PointsUniform, color), 128);
        assert_eq!(std::mem::offset_of!(PointsUniform, viewport), 144);
        assert_eq!(std::mem::offset_of!(PointsUniform, attenuate), 156);
        assert_eq!(std::mem::size_of::<PointInstance>(), 12);
    }

    #[test]
    fn opacity_applies_only_when_transparent() {
        let mut material = PointsMaterial {
            color: Rgb::new(0.2, 0.4, 0.6),
            opacity: 0.5,
            ..PointsMaterial::default()
        };
        let opaque = PointsUniform::new(Mat4::IDENTITY, Mat4::IDENTITY, &material, [1.0, 1.0]);
        assert_eq!(opaque.color, [0.2, 0.4, 0.6, 1.0]);

        material.transparent = true;
        let blended = PointsUniform::new(Mat4::IDENTITY, Mat4::IDENTITY, &material, [1.0, 1.0]);
        assert_eq!(blended.color[3], 0.5);
    }

    #[test]
    fn attenuation_flag_is_encoded() {
        let mut material = PointsMaterial::default();
        let on = PointsUniform::new(Mat4::IDENTITY, Mat4::IDENTITY, &material, [800.0, 600.0]);
        assert_eq!(on.attenuate, 1.0);
        assert_eq!(on.viewport, [800.0, 600.0]);

        material.size_attenuation = false;
        let off = PointsUniform::new(Mat4::IDENTITY, Mat4::IDENTITY, &material, [800.0, 600.0]);
        assert_eq!(off.attenuate, 0.0);
    }
}
