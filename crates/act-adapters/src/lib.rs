//! act-adapters: clases de acción nativas listas para registrar.
//!
//! - `Greeter`: acción sin estado, sólo argumentos de valor.
//! - `SessionCounter`: estado persistente en una sesión serializable.
//! - `ConnectionCache`: recurso local al proceso en una sesión transitoria.
use act_core::ActionRegistry;

pub mod cache;
pub mod counter;
pub mod greeter;

pub use cache::{ConnectionCache, ConnectionHandle};
pub use counter::{CounterState, SessionCounter};
pub use greeter::Greeter;

/// Registra todas las clases de este crate.
pub fn register_all(registry: &ActionRegistry) {
    registry.register::<Greeter>()
            .register::<SessionCounter>()
            .register::<ConnectionCache>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use act_core::ActionClass;

    #[test]
    fn register_all_registers_every_class() {
        let registry = ActionRegistry::new();
        register_all(&registry);
        assert_eq!(registry.class_refs(),
                   vec![ConnectionCache::CLASS_REF.to_string(),
                        Greeter::CLASS_REF.to_string(),
                        SessionCounter::CLASS_REF.to_string()]);
    }
}
