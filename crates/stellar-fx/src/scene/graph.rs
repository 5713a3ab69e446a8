use super::{Mesh, ObjectKey, Points, SceneObject};

/// Scene root: an ordered set of drawables.
///
/// Objects are drawn in insertion order. Each effect controller owns its own
/// scene; nothing here is shared.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<(ObjectKey, SceneObject)>,
    next_key: u32,
}

impl Scene {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object and returns its key.
    pub fn add(&mut self, object: impl Into<SceneObject>) -> ObjectKey {
        let key = ObjectKey::new(self.next_key);
        self.next_key = self.next_key.wrapping_add(1);
        self.objects.push((key, object.into()));
        key
    }

    /// Removes an object. Returns `None` if the key is not (or no longer) present.
    pub fn remove(&mut self, key: ObjectKey) -> Option<SceneObject> {
        let idx = self.objects.iter().position(|(k, _)| *k == key)?;
        Some(self.objects.remove(idx).1)
    }

    pub fn contains(&self, key: ObjectKey) -> bool {
        self.objects.iter().any(|(k, _)| *k == key)
    }

    pub fn get(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.iter().find(|(k, _)| *k == key).map(|(_, o)| o)
    }

    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut SceneObject> {
        self.objects
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, o)| o)
    }

    pub fn mesh(&self, key: ObjectKey) -> Option<&Mesh> {
        match self.get(key)? {
            SceneObject::Mesh(m) => Some(m),
            _ => None,
        }
    }

    pub fn mesh_mut(&mut self, key: ObjectKey) -> Option<&mut Mesh> {
        match self.get_mut(key)? {
            SceneObject::Mesh(m) => Some(m),
            _ => None,
        }
    }

    pub fn points(&self, key: ObjectKey) -> Option<&Points> {
        match self.get(key)? {
            SceneObject::Points(p) => Some(p),
            _ => None,
        }
    }

    pub fn points_mut(&mut self, key: ObjectKey) -> Option<&mut Points> {
        match self.get_mut(key)? {
            SceneObject::Points(p) => Some(p),
            _ => None,
        }
    }

    /// Iterates objects in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &SceneObject)> {
        self.objects.iter().map(|(k, o)| (*k, o))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
