use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use log::debug;
use serde_json::Value;

use crate::binding::{ActionArguments, ActionParameter};
use crate::errors::{ActionError, BoxError};

/// Rutina de una clase de acción. Recibe una instancia recién creada.
pub type ActionHandler<C> = fn(&mut C, ActionArguments) -> Result<Value, BoxError>;

/// Declaración de un método de acción.
pub struct ActionMethod<C> {
    pub name: &'static str,
    pub parameters: Vec<ActionParameter>,
    pub handler: ActionHandler<C>,
}

impl<C> ActionMethod<C> {
    pub fn new(name: &'static str, parameters: Vec<ActionParameter>, handler: ActionHandler<C>) -> Self {
        Self { name, parameters, handler }
    }
}

/// Clase de acciones nativas.
///
/// El invoker crea una instancia nueva por llamada (`instantiate`): el
/// estado que deba sobrevivir entre llamadas va a sesiones, no a campos.
pub trait ActionClass: Send + Sized + 'static {
    const CLASS_REF: &'static str;

    fn instantiate() -> Result<Self, BoxError>;

    /// Métodos en orden de declaración. Si dos comparten nombre gana el
    /// último.
    fn methods() -> Vec<ActionMethod<Self>>;
}

pub(crate) enum CallFailure {
    Instantiation(BoxError),
    Invocation(BoxError),
}

type ErasedHandler = Arc<dyn Fn(ActionArguments) -> Result<Value, CallFailure> + Send + Sync>;

/// Método registrado con el tipo de la clase borrado.
pub struct RegisteredMethod {
    class_ref: String,
    name: String,
    parameters: Vec<ActionParameter>,
    handler: ErasedHandler,
}

impl RegisteredMethod {
    pub fn class_ref(&self) -> &str {
        &self.class_ref
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[ActionParameter] {
        &self.parameters
    }

    pub(crate) fn call(&self, args: ActionArguments) -> Result<Value, CallFailure> {
        (self.handler)(args)
    }
}

impl fmt::Debug for RegisteredMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredMethod")
         .field("class_ref", &self.class_ref)
         .field("name", &self.name)
         .field("parameters", &self.parameters)
         .finish()
    }
}

/// Registro concurrente de clases de acción (clave = `CLASS_REF`).
#[derive(Default)]
pub struct ActionRegistry {
    classes: DashMap<String, Vec<Arc<RegisteredMethod>>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra (o reemplaza) la clase `C`.
    pub fn register<C: ActionClass>(&self) -> &Self {
        let methods: Vec<Arc<RegisteredMethod>> =
            C::methods().into_iter()
                        .map(|method| {
                            let handler = method.handler;
                            let erased: ErasedHandler = Arc::new(move |args: ActionArguments| {
                                let mut instance = C::instantiate().map_err(CallFailure::Instantiation)?;
                                handler(&mut instance, args).map_err(CallFailure::Invocation)
                            });
                            Arc::new(RegisteredMethod { class_ref: C::CLASS_REF.to_string(),
                                                        name: method.name.to_string(),
                                                        parameters: method.parameters,
                                                        handler: erased })
                        })
                        .collect();
        debug!("registry:register class={} methods={}", C::CLASS_REF, methods.len());
        self.classes.insert(C::CLASS_REF.to_string(), methods);
        self
    }

    pub fn contains_class(&self, class_ref: &str) -> bool {
        self.classes.contains_key(class_ref)
    }

    pub fn class_refs(&self) -> Vec<String> {
        let mut refs: Vec<String> = self.classes.iter().map(|e| e.key().clone()).collect();
        refs.sort();
        refs
    }

    /// Busca un método por nombre. Con sobrecargas gana el último declarado.
    pub fn lookup(&self, class_ref: &str, method_name: &str) -> Result<Arc<RegisteredMethod>, ActionError> {
        self.classes
            .get(class_ref)
            .and_then(|methods| methods.iter().rev().find(|m| m.name == method_name).cloned())
            .ok_or_else(|| ActionError::ActionNotFound { class_ref: class_ref.to_string(),
                                                         method_name: method_name.to_string() })
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry").field("classes", &self.class_refs()).finish()
    }
}
