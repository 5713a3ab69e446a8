/// Stable handle to an object stored in a [`Scene`](super::Scene).
///
/// Keys are never reused within one scene, so a renderer can key GPU resources
/// on them without risk of aliasing a removed object.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ObjectKey(u32);

impl ObjectKey {
    #[inline]
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}
