/// Opaque id of a pending next-frame request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameHandle(pub u64);

/// Host-side frame pacing.
///
/// A request asks the host to call the effect's `tick` once on the next display
/// refresh. Hosts that cannot retract a request (winit redraws) may still
/// deliver it after `cancel_frame`; callers must not rely on cancellation alone.
pub trait FrameScheduler {
    fn request_frame(&self) -> FrameHandle;

    fn cancel_frame(&self, handle: FrameHandle);
}
