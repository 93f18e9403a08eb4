//! `SessionStore`: vista sobre las dos particiones de sesiones.
//!
//! Contrato: `get_or_create(name, kind)` es idempotente. Dos llamadas con el
//! mismo nombre devuelven el mismo objeto (identidad de referencia). Un nombre
//! queda ligado a una única clase de propiedad dentro de un run: la del primer
//! acceso. El registro de esa ligadura es del run (`RunSessions`), no del mapa
//! transitorio compartido.
use std::sync::Arc;

use dashmap::DashMap;
use indexmap::{IndexMap, IndexSet};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{SerializableSessionObject, SessionKind, SessionObject, TransientSessionObject};
use crate::errors::ActionError;

/// Mapa de sesiones transitorias propiedad del orquestador.
///
/// Es un handle clonable: todos los clones ven el mismo mapa. Se puede
/// compartir entre hilos del worker.
#[derive(Debug, Clone, Default)]
pub struct TransientSessionData {
    entries: Arc<DashMap<String, TransientSessionObject>>,
}

impl TransientSessionData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<TransientSessionObject> {
        self.entries.get(name).map(|e| e.value().clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get_or_create(&self, name: &str) -> TransientSessionObject {
        self.entries
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!("session:create transient name={name}");
                TransientSessionObject::default()
            })
            .value()
            .clone()
    }
}

/// Sesiones de un run: la partición serializable y los nombres que el run
/// ligó como transitorios. Viaja dentro del `ExecutionContext`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSessions {
    serializable: IndexMap<String, SerializableSessionObject>,
    #[serde(default)]
    transient_names: IndexSet<String>,
}

impl RunSessions {
    pub fn serializable(&self) -> &IndexMap<String, SerializableSessionObject> {
        &self.serializable
    }

    pub fn serializable_mut(&mut self) -> &mut IndexMap<String, SerializableSessionObject> {
        &mut self.serializable
    }

    /// Clase a la que el run ligó `name`, si ya lo usó.
    pub fn bound_kind(&self, name: &str) -> Option<SessionKind> {
        if self.serializable.contains_key(name) {
            Some(SessionKind::Serializable)
        } else if self.transient_names.contains(name) {
            Some(SessionKind::Transient)
        } else {
            None
        }
    }
}

pub struct SessionStore<'a> {
    run: &'a mut RunSessions,
    transient: &'a TransientSessionData,
}

impl<'a> SessionStore<'a> {
    pub fn new(run: &'a mut RunSessions, transient: &'a TransientSessionData) -> Self {
        Self { run, transient }
    }

    pub fn get_or_create(&mut self, name: &str, kind: SessionKind) -> Result<SessionObject, ActionError> {
        match kind {
            SessionKind::Serializable => self.serializable(name).map(SessionObject::Serializable),
            SessionKind::Transient => self.transient(name).map(SessionObject::Transient),
        }
    }

    pub fn serializable(&mut self, name: &str) -> Result<SerializableSessionObject, ActionError> {
        if self.run.transient_names.contains(name) {
            return Err(ActionError::SessionKindConflict { name: name.to_string(),
                                                          bound: SessionKind::Transient });
        }
        let object = self.run
                         .serializable
                         .entry(name.to_string())
                         .or_insert_with(|| {
                             debug!("session:create serializable name={name}");
                             SerializableSessionObject::default()
                         })
                         .clone();
        Ok(object)
    }

    pub fn transient(&mut self, name: &str) -> Result<TransientSessionObject, ActionError> {
        if self.run.serializable.contains_key(name) {
            return Err(ActionError::SessionKindConflict { name: name.to_string(),
                                                          bound: SessionKind::Serializable });
        }
        self.run.transient_names.insert(name.to_string());
        Ok(self.transient.get_or_create(name))
    }
}
