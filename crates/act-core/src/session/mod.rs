//! Sesiones: objetos con nombre que sobreviven entre ejecuciones de steps.
//!
//! Dos clases de propiedad:
//! - `SerializableSessionObject`: vive en el `ExecutionContext` y atraviesa
//!   checkpoints.
//! - `TransientSessionObject`: local al proceso, nunca se serializa; su mapa
//!   lo aporta el orquestador (`TransientSessionData`).

mod objects;
mod store;

pub use objects::{SerializableSessionObject, SessionKind, SessionObject, TransientSessionObject};
pub use store::{RunSessions, SessionStore, TransientSessionData};
