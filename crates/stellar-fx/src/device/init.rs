/// How a window's GPU context is created.
///
/// Defaults suit a transparent overlay: premultiplied alpha, vsync pacing, MSAA on.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Effects write shader output unconverted, so the default is `false`.
    pub prefer_srgb: bool,

    /// FIFO paces redraws to the display refresh, and redraws drive ticks.
    pub present_mode: wgpu::PresentMode,

    /// Surface compositing. Ignored when the surface does not support it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Request 4x MSAA. Falls back to 1x when the format does not support it.
    pub antialias: bool,

    pub required_features: wgpu::Features,

    /// Downlevel defaults are enough for both pipelines.
    pub required_limits: wgpu::Limits,

    /// Hint only.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: Some(wgpu::CompositeAlphaMode::PreMultiplied),
            antialias: true,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}
