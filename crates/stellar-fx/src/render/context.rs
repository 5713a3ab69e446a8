use winit::dpi::PhysicalSize;

use crate::scene::{PerspectiveCamera, Scene};

use super::{ActivationError, Container, ListenerId, RenderStatus, Renderer};

/// Camera and surface parameters for one render context.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Initial camera offset along +z.
    pub camera_distance: f32,
    pub antialias: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_distance: 5.0,
            antialias: true,
        }
    }
}

/// Scene root + camera + renderer bound to one host container.
///
/// Created once per effect activation. Only the resize handler mutates the
/// camera and surface size; [`dispose`](Self::dispose) runs its teardown steps
/// exactly once no matter how often it is called (and again from `Drop`).
pub struct RenderContext<C: Container> {
    container: C,
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: Option<C::Renderer>,
    resize_listener: Option<ListenerId>,
    surface_size: PhysicalSize<u32>,
}

impl<C: Container> RenderContext<C> {
    /// Attaches a renderer to `container` and builds the camera.
    ///
    /// Nothing is allocated when this fails.
    pub fn create(container: Option<C>, options: &RenderOptions) -> Result<Self, ActivationError> {
        let Some(container) = container.filter(|c| c.is_mounted()) else {
            return Err(ActivationError::MissingContainer);
        };

        if container.has_surface() {
            return Err(ActivationError::AlreadyAttached);
        }

        let size = container.client_size();
        let renderer = container
            .attach_surface(options)
            .map_err(ActivationError::Surface)?;

        let mut camera = PerspectiveCamera::new(
            options.fov,
            1.0,
            options.near,
            options.far,
            options.camera_distance,
        );
        camera.set_aspect_from_size(size.width, size.height);

        let resize_listener = Some(container.add_resize_listener());

        log::debug!("render context created at {}x{}", size.width, size.height);

        Ok(Self {
            container,
            scene: Scene::new(),
            camera,
            renderer: Some(renderer),
            resize_listener,
            surface_size: size,
        })
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[inline]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    #[inline]
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Size the surface was last configured with.
    #[inline]
    pub fn surface_size(&self) -> PhysicalSize<u32> {
        self.surface_size
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.renderer.is_none()
    }

    /// Re-reads the container size and adapts camera aspect + surface.
    ///
    /// Returns `false` once the resize listener has been removed. `&mut self`
    /// rules out re-entrant calls; repeated calls with the same size are cheap.
    pub fn handle_resize(&mut self) -> bool {
        if self.resize_listener.is_none() {
            return false;
        }

        let size = self.container.client_size();
        self.camera.set_aspect_from_size(size.width, size.height);
        self.surface_size = size;

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(size);
        }
        true
    }

    /// Draws the scene through the owned camera.
    pub fn render(&mut self) -> RenderStatus {
        match self.renderer.as_mut() {
            Some(renderer) => renderer.render(&self.scene, &self.camera),
            None => RenderStatus::Skipped,
        }
    }

    /// Removes the resize listener, releases GPU handles and detaches the
    /// surface. Idempotent.
    ///
    /// The scene stays readable so effects can drop their objects afterwards.
    pub fn dispose(&mut self) {
        if let Some(id) = self.resize_listener.take() {
            self.container.remove_resize_listener(id);
        }

        if let Some(mut renderer) = self.renderer.take() {
            renderer.dispose();
            drop(renderer);
            self.container.detach_surface();
            log::debug!("render context disposed");
        }
    }
}

impl<C: Container> Drop for RenderContext<C> {
    fn drop(&mut self) {
        self.dispose();
    }
}
