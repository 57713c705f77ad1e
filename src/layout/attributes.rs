//! Opaque key/value storage reserved for layout engines

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

/// String-keyed bag of arbitrary values
///
/// Values are stored as `Box<dyn Any>`; nothing is validated. Callers that know
/// the concrete type can use [`AttributeBag::get_as`].
#[derive(Default)]
pub struct AttributeBag {
    values: HashMap<String, Box<dyn Any>>,
}

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&dyn Any> {
        self.values.get(key).map(|v| v.as_ref())
    }

    /// Typed lookup; `None` if the key is absent or holds another type
    pub fn get_as<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    /// Store a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: Box<dyn Any>) -> Option<Box<dyn Any>> {
        self.values.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Box<dyn Any>> {
        self.values.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }
}

impl fmt::Debug for AttributeBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("AttributeBag").field("keys", &keys).finish()
    }
}
