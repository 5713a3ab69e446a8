use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::render::RenderCtx;
use crate::scene::{Blending, Mesh, NebulaUniforms, ObjectKey, PlaneGeometry, Scene, SceneObject};

use super::common::{
    blend_state, multisample_state, primitive_state, uniform_bind_group_layout, uniform_binding,
};

/// Renderer for `SceneObject::Mesh` (the nebula plane).
///
/// One pipeline per blending mode, built lazily for the current target format
/// and sample count. Each mesh gets its own vertex buffer and uniform buffer,
/// keyed by `ObjectKey`.
#[derive(Default)]
pub struct NebulaRenderer {
    target: Option<(wgpu::TextureFormat, u32)>,
    pipelines: HashMap<Blending, wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    quad_ibo: Option<wgpu::Buffer>,
    meshes: HashMap<ObjectKey, MeshBinding>,
}

struct MeshBinding {
    geometry: PlaneGeometry,
    vbo: wgpu::Buffer,
    ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl NebulaRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads geometry (when changed) and uniforms for every mesh in `scene`,
    /// and forgets meshes that left it.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, scene: &Scene, view_proj: Mat4) {
        self.meshes.retain(|key, _| scene.mesh(*key).is_some());

        let mut any = false;
        for (key, object) in scene.iter() {
            let SceneObject::Mesh(mesh) = object else { continue };
            if !any {
                self.ensure_target(ctx);
                self.ensure_static_buffers(ctx);
                any = true;
            }
            self.ensure_pipeline(ctx, mesh.material.blending);
            self.upload(ctx, key, mesh, view_proj);
        }
    }

    /// Records draw calls for every prepared mesh, in scene order.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, scene: &Scene) {
        let Some(ibo) = self.quad_ibo.as_ref() else { return };

        for (key, object) in scene.iter() {
            let SceneObject::Mesh(mesh) = object else { continue };
            let Some(binding) = self.meshes.get(&key) else { continue };
            let Some(pipeline) = self.pipelines.get(&mesh.material.blending) else { continue };

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &binding.bind_group, &[]);
            rpass.set_vertex_buffer(0, binding.vbo.slice(..));
            rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..PlaneGeometry::INDICES.len() as u32, 0, 0..1);
        }
    }

    /// Drops every GPU resource this renderer created.
    pub fn clear(&mut self) {
        self.meshes.clear();
        self.pipelines.clear();
        self.bind_group_layout = None;
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
            self.bind_group_layout = Some(uniform_bind_group_layout::<NebulaUniform>(
                ctx.device,
                "stellar-fx nebula bgl",
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
            label: Some("stellar-fx nebula shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/nebula.wgsl").into()),
        });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("stellar-fx nebula pipeline layout"),
                bind_group_layouts: &[bgl],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("stellar-fx nebula pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[PlaneVertex::layout()],
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

        log::debug!("nebula pipeline built for {:?} ({:?})", ctx.surface_format, blending);
        self.pipelines.insert(blending, pipeline);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_ibo.is_some() {
            return;
        }
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("stellar-fx nebula ibo"),
            contents: bytemuck::cast_slice(&PlaneGeometry::INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn upload(&mut self, ctx: &RenderCtx<'_>, key: ObjectKey, mesh: &Mesh, view_proj: Mat4) {
        let stale = self
            .meshes
            .get(&key)
            .is_some_and(|b| b.geometry != mesh.geometry);
        if stale {
            self.meshes.remove(&key);
        }

        if !self.meshes.contains_key(&key) {
            let Some(bgl) = self.bind_group_layout.as_ref() else { return };
            let vertices = PlaneVertex::from_geometry(&mesh.geometry);
            let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("stellar-fx nebula vbo"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let (ubo, bind_group) =
                uniform_binding::<NebulaUniform>(ctx.device, bgl, "stellar-fx nebula ubo");
            self.meshes.insert(
                key,
                MeshBinding {
                    geometry: mesh.geometry,
                    vbo,
                    ubo,
                    bind_group,
                },
            );
        }

        let Some(binding) = self.meshes.get(&key) else { return };
        let uniform = NebulaUniform::new(view_proj, &mesh.material.uniforms);
        ctx.queue.write_buffer(&binding.ubo, 0, bytemuck::bytes_of(&uniform));
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Uniform block, 96 bytes:
///
///  offset  0  view_proj  mat4x4<f32>
///  offset 64  color      vec3<f32>
///  offset 76  time       f32
///  offset 80  density    f32
///  offset 84  speed      f32
///  offset 88  intensity  f32
///  offset 92  _pad       f32
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct NebulaUniform {
    view_proj: [[f32; 4]; 4],
    color: [f32; 3],
    time: f32,
    density: f32,
    speed: f32,
    intensity: f32,
    _pad: f32,
}

impl NebulaUniform {
    fn new(view_proj: Mat4, u: &NebulaUniforms) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            color: u.color.to_array(),
            time: u.time,
            density: u.density,
            speed: u.speed,
            intensity: u.intensity,
            _pad: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct PlaneVertex {
    position: [f32; 3],
    uv: [f32; 2],
}

impl PlaneVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2  // uv
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PlaneVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    fn from_geometry(geometry: &PlaneGeometry) -> [PlaneVertex; 4] {
        geometry
            .corners()
            .map(|(position, uv)| PlaneVertex { position, uv })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Rgb;

    #[test]
    fn uniform_layout_matches_shader() {
        assert_eq!(std::mem::size_of::<NebulaUniform>(), 96);
        assert_eq!(std::mem::offset_of!(NebulaUniform, color), 64);
        assert_eq!(std::mem::offset_of!(NebulaUniform, time), 76);
        assert_eq!(std::mem::offset_of!(NebulaUniform, intensity), 88);
        assert_eq!(std::mem::size_of::<PlaneVertex>(), 20);
    }

    #[test]
    fn uniform_copies_material_values() {
        let u = NebulaUniforms {
            time: 2.5,
            color: Rgb::new(1.0, 0.5, 0.0),
            density: 0.7,
            speed: 0.3,
            intensity: 2.0,
        };
        let gpu = NebulaUniform::new(Mat4::IDENTITY, &u);
        assert_eq!(gpu.color, [1.0, 0.5, 0.0]);
        assert_eq!(gpu.time, 2.5);
        assert_eq!(gpu.density, 0.7);
        assert_eq!(gpu.view_proj, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn plane_vertices_follow_geometry_corners() {
        let v = PlaneVertex::from_geometry(&PlaneGeometry::new(10.0, 10.0));
        assert_eq!(v[0].position, [-5.0, -5.0, 0.0]);
        assert_eq!(v[2].uv, [1.0, 1.0]);
    }
}
