use winit::dpi::PhysicalSize;

use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::scene::{PerspectiveCamera, Scene};

use super::pipelines::{NebulaRenderer, PointsRenderer};
use super::{RenderCtx, RenderStatus, Renderer, Viewport};

/// [`Renderer`] backed by a wgpu surface.
///
/// Every frame is a single pass: clear to transparent, then nebula meshes, then
/// point clouds, each in scene order. With MSAA the pass renders into the
/// multisampled target and resolves into the swapchain texture.
pub struct WgpuRenderer {
    gpu: Option<Gpu>,
    nebula: NebulaRenderer,
    points: PointsRenderer,
}

impl WgpuRenderer {
    pub fn new(gpu: Gpu) -> Self {
        Self {
            gpu: Some(gpu),
            nebula: NebulaRenderer::new(),
            points: PointsRenderer::new(),
        }
    }

    /// Creates the GPU context for `target` and wraps it.
    pub async fn create(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: PhysicalSize<u32>,
        init: GpuInit,
    ) -> anyhow::Result<Self> {
        let gpu = Gpu::new(target, size, init).await?;
        Ok(Self::new(gpu))
    }
}

impl Renderer for WgpuRenderer {
    fn resize(&mut self, size: PhysicalSize<u32>) {
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize(size);
        }
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> RenderStatus {
        let Some(gpu) = self.gpu.as_mut() else {
            return RenderStatus::Skipped;
        };

        let size = gpu.size();
        if size.width == 0 || size.height == 0 {
            return RenderStatus::Skipped;
        }

        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                return match gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        RenderStatus::Skipped
                    }
                    SurfaceErrorAction::Fatal => {
                        log::error!("surface lost for good; stopping renderer");
                        RenderStatus::Lost
                    }
                };
            }
        };

        let ctx = RenderCtx::new(
            gpu.device(),
            gpu.queue(),
            gpu.surface_format(),
            gpu.sample_count(),
            Viewport::new(size.width as f32, size.height as f32),
        );

        let view = camera.view_matrix();
        let view_proj = camera.view_projection_matrix();

        self.nebula.prepare(&ctx, scene, view_proj);
        self.points.prepare(&ctx, scene, view_proj, view);

        {
            let (color_view, resolve_target) = match frame.msaa_view.as_ref() {
                Some(msaa) => (msaa, Some(&frame.view)),
                None => (&frame.view, None),
            };

            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("stellar-fx scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            self.nebula.draw(&mut rpass, scene);
            self.points.draw(&mut rpass, scene);
        }

        gpu.submit(frame);
        RenderStatus::Presented
    }

    fn dispose(&mut self) {
        self.nebula.clear();
        self.points.clear();
        if self.gpu.take().is_some() {
            log::debug!("wgpu renderer disposed");
        }
    }
}
