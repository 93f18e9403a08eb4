use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use log::debug;
use serde_json::Value;

use super::registry::{ActionRegistry, CallFailure, RegisteredMethod};
use crate::binding::{ActionArguments, BindingResolver, ValueType};
use crate::errors::ActionError;
use crate::model::{ActionOutputs, CallArguments, ReturnValues};
use crate::session::SessionStore;

/// Ejecuta métodos registrados y normaliza su resultado.
pub struct NativeInvoker<'r> {
    registry: &'r ActionRegistry,
}

impl<'r> NativeInvoker<'r> {
    pub fn new(registry: &'r ActionRegistry) -> Self {
        Self { registry }
    }

    /// Resuelve la rutina, enlaza sus argumentos y la invoca.
    ///
    /// La firma se valida antes de crear ninguna sesión.
    pub fn resolve_and_invoke(&self,
                              class_ref: &str,
                              method_name: &str,
                              call_arguments: &CallArguments,
                              sessions: &mut SessionStore<'_>)
                              -> Result<ReturnValues, ActionError> {
        let method = self.registry.lookup(class_ref, method_name)?;
        let args = BindingResolver::new(sessions, call_arguments).resolve(class_ref, method_name, method.parameters())?;
        Self::call(&method, args)
    }

    /// Invoca con argumentos ya resueltos.
    pub fn invoke(&self, class_ref: &str, method_name: &str, args: ActionArguments) -> Result<ReturnValues, ActionError> {
        let method = self.registry.lookup(class_ref, method_name)?;
        Self::call(&method, args)
    }

    fn call(method: &RegisteredMethod, args: ActionArguments) -> Result<ReturnValues, ActionError> {
        debug!("native:invoke {}.{} args={}", method.class_ref(), method.name(), args.len());
        let outcome = catch_unwind(AssertUnwindSafe(|| method.call(args))).unwrap_or_else(|panic| {
            Err(CallFailure::Invocation(format!("action panicked: {}", panic_message(&*panic)).into()))
        });
        let class_ref = method.class_ref().to_string();
        let method_name = method.name().to_string();
        match outcome {
            Ok(Value::Object(map)) => Ok(ReturnValues::new(map.into_iter().collect::<ActionOutputs>(), None)),
            Ok(other) => Err(ActionError::MalformedActionResult { class_ref,
                                                                  method_name,
                                                                  actual: describe(&other) }),
            Err(CallFailure::Instantiation(reason)) => {
                Err(ActionError::InstantiationFailure { class_ref,
                                                        reason: reason.to_string() })
            }
            Err(CallFailure::Invocation(cause)) => Err(ActionError::InvocationFailure { class_ref,
                                                                                       method_name,
                                                                                       cause }),
        }
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "nothing".to_string(),
        other => ValueType::name_of(other).to_string(),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
