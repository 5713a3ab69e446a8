//! Pieces shared by the nebula and points pipelines.

use crate::scene::Blending;

// ── blend ─────────────────────────────────────────────────────────────────

/// Maps a material blending mode onto a wgpu blend state.
///
/// Both modes weight the source by its alpha; `Additive` keeps the destination
/// at full strength for color and alpha alike.
pub(super) fn blend_state(blending: Blending) -> wgpu::BlendState {
    match blending {
        Blending::Normal => wgpu::BlendState::ALPHA_BLENDING,
        Blending::Additive => {
            let add = wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            };
            wgpu::BlendState { color: add, alpha: add }
        }
    }
}

// ── pipeline state ────────────────────────────────────────────────────────

pub(super) fn primitive_state() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

pub(super) fn multisample_state(sample_count: u32) -> wgpu::MultisampleState {
    wgpu::MultisampleState {
        count: sample_count,
        ..Default::default()
    }
}

// ── uniform binding ───────────────────────────────────────────────────────

/// Layout with a single uniform buffer of type `T` at binding 0.
pub(super) fn uniform_bind_group_layout<T>(
    device: &wgpu::Device,
    label: &str,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<T>() as u64),
            },
            count: None,
        }],
    })
}

/// Creates a uniform buffer sized for `T` and a bind group exposing it.
pub(super) fn uniform_binding<T>(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    label: &str,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let ubo = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<T>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: ubo.as_entire_binding(),
        }],
    });

    (ubo, bind_group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_blending_is_standard_alpha() {
        assert_eq!(blend_state(Blending::Normal), wgpu::BlendState::ALPHA_BLENDING);
    }

    #[test]
    fn additive_blending_keeps_destination() {
        let state = blend_state(Blending::Additive);
        for c in [state.color, state.alpha] {
            assert_eq!(c.src_factor, wgpu::BlendFactor::SrcAlpha);
            assert_eq!(c.dst_factor, wgpu::BlendFactor::One);
            assert_eq!(c.operation, wgpu::BlendOperation::Add);
        }
    }
}
