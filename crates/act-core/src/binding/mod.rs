//! Binding de parámetros de acciones nativas.
//!
//! Cada parámetro declara una directiva de binding (nombre) y un tipo que
//! indica su capacidad: valor plano, sesión serializable o sesión
//! transitoria. El `BindingResolver` convierte esa firma en una lista
//! ordenada de argumentos sin ejecutar nada.

mod resolver;
mod signature;

pub use resolver::BindingResolver;
pub use signature::{ActionArgument, ActionArguments, ActionParameter, ParamType, ValueType};
