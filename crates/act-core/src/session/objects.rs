use std::any::Any;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Clase de propiedad de un objeto de sesión.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionKind {
    Serializable,
    Transient,
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKind::Serializable => f.write_str("serializable session"),
            SessionKind::Transient => f.write_str("transient session"),
        }
    }
}

fn lock<T: ?Sized>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // Un panic dentro de una acción no debe inutilizar la sesión.
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Objeto de sesión checkpointeable. Los clones comparten identidad.
#[derive(Clone, Default)]
pub struct SerializableSessionObject {
    inner: Arc<Mutex<Option<Value>>>,
}

impl SerializableSessionObject {
    pub fn get(&self) -> Option<Value> {
        lock(&self.inner).clone()
    }

    pub fn set(&self, value: Value) {
        *lock(&self.inner) = Some(value);
    }

    pub fn clear(&self) -> Option<Value> {
        lock(&self.inner).take()
    }

    /// Muta el valor en sitio bajo el lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut Option<Value>) -> R) -> R {
        f(&mut lock(&self.inner))
    }

    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for SerializableSessionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializableSessionObject").field("value", &self.get()).finish()
    }
}

impl Serialize for SerializableSessionObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        lock(&self.inner).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SerializableSessionObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(Self { inner: Arc::new(Mutex::new(value)) })
    }
}

type AnyBox = Box<dyn Any + Send>;

/// Objeto de sesión local al proceso (conexiones, caches, handles).
#[derive(Clone, Default)]
pub struct TransientSessionObject {
    inner: Arc<Mutex<Option<AnyBox>>>,
}

impl TransientSessionObject {
    pub fn set<T: Any + Send>(&self, value: T) {
        *lock(&self.inner) = Some(Box::new(value));
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.inner).is_none()
    }

    /// Copia del valor si existe y es de tipo `T`.
    pub fn get<T: Any + Send + Clone>(&self) -> Option<T> {
        lock(&self.inner).as_ref().and_then(|b| b.downcast_ref::<T>()).cloned()
    }

    /// Acceso mutable al valor tipado; `None` si está vacío o es de otro tipo.
    pub fn with_mut<T: Any + Send, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut guard = lock(&self.inner);
        guard.as_mut().and_then(|b| b.downcast_mut::<T>()).map(f)
    }

    /// Devuelve el valor, creándolo con `init` si la sesión está vacía.
    pub fn get_or_insert_with<T: Any + Send + Clone>(&self, init: impl FnOnce() -> T) -> Option<T> {
        let mut guard = lock(&self.inner);
        if guard.is_none() {
            *guard = Some(Box::new(init()));
        }
        guard.as_ref().and_then(|b| b.downcast_ref::<T>()).cloned()
    }

    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for TransientSessionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransientSessionObject").field("empty", &self.is_empty()).finish()
    }
}

/// Objeto de sesión resuelto por el `SessionStore`.
#[derive(Debug, Clone)]
pub enum SessionObject {
    Serializable(SerializableSessionObject),
    Transient(TransientSessionObject),
}

impl SessionObject {
    pub fn kind(&self) -> SessionKind {
        match self {
            SessionObject::Serializable(_) => SessionKind::Serializable,
            SessionObject::Transient(_) => SessionKind::Transient,
        }
    }

    pub fn same_as(&self, other: &SessionObject) -> bool {
        match (self, other) {
            (SessionObject::Serializable(a), SessionObject::Serializable(b)) => a.same_as(b),
            (SessionObject::Transient(a), SessionObject::Transient(b)) => a.same_as(b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clones_share_identity_and_state() {
        let a = SerializableSessionObject::default();
        let b = a.clone();
        b.set(json!(5));
        assert!(a.same_as(&b));
        assert_eq!(a.get(), Some(json!(5)));
        assert!(!a.same_as(&SerializableSessionObject::default()));
    }

    #[test]
    fn transient_object_is_typed() {
        let t = TransientSessionObject::default();
        assert!(t.is_empty());
        assert_eq!(t.get_or_insert_with(|| 10u32), Some(10));
        assert_eq!(t.with_mut(|v: &mut u32| { *v += 1; *v }), Some(11));
        assert_eq!(t.get::<String>(), None);
    }
}
