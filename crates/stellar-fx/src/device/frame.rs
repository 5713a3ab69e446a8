/// One acquired surface texture plus the encoder recording into it.
///
/// Submit it before the next tick; the surface hands out one texture at a time.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    /// Multisampled color target; `None` when antialiasing is off.
    pub msaa_view: Option<wgpu::TextureView>,
    pub encoder: wgpu::CommandEncoder,
}
