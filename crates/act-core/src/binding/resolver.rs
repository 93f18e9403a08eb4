//! `BindingResolver`: firma declarada -> argumentos ordenados.
//!
//! Reglas, en orden de declaración:
//! - sesión serializable / transitoria: `SessionStore::get_or_create`.
//! - valor plano: se busca la directiva en `CallArguments`; `Null` o ausente
//!   se liga al centinela "sin valor"; un tipo no asignable es
//!   `TypeMismatch`.
//!
//! La firma se valida completa antes de tocar el `SessionStore`: una firma
//! inválida no deja sesiones creadas.
use log::debug;

use super::{ActionArgument, ActionArguments, ActionParameter, ParamType, ValueType};
use crate::errors::ActionError;
use crate::model::CallArguments;
use crate::session::SessionStore;

pub struct BindingResolver<'s, 'a> {
    sessions: &'s mut SessionStore<'a>,
    call_arguments: &'s CallArguments,
}

impl<'s, 'a> BindingResolver<'s, 'a> {
    pub fn new(sessions: &'s mut SessionStore<'a>, call_arguments: &'s CallArguments) -> Self {
        Self { sessions, call_arguments }
    }

    pub fn resolve(&mut self, class_ref: &str, method_name: &str, parameters: &[ActionParameter]) -> Result<ActionArguments, ActionError> {
        let bindings = annotated_bindings(class_ref, method_name, parameters)?;

        let mut args = Vec::with_capacity(parameters.len());
        for (parameter, binding) in parameters.iter().zip(bindings) {
            let arg = match parameter.param_type {
                ParamType::SerializableSession => ActionArgument::SerializableSession(self.sessions.serializable(binding)?),
                ParamType::TransientSession => ActionArgument::TransientSession(self.sessions.transient(binding)?),
                ParamType::Value(expected) => {
                    let value = self.call_arguments.get(binding).filter(|v| !v.is_null());
                    match value {
                        Some(v) if !expected.accepts(v) => {
                            return Err(ActionError::TypeMismatch { action: method_name.to_string(),
                                                                   class_ref: class_ref.to_string(),
                                                                   parameter: binding.to_string(),
                                                                   expected: expected.to_string(),
                                                                   actual: ValueType::name_of(v).to_string() });
                        }
                        other => ActionArgument::Value(other.cloned()),
                    }
                }
            };
            args.push(arg);
        }
        debug!("bindings:resolved class={class_ref} method={method_name} count={}", args.len());
        Ok(ActionArguments::new(args))
    }
}

/// Devuelve las directivas en orden o `InvalidActionSignature` si algún
/// parámetro no está anotado.
fn annotated_bindings<'p>(class_ref: &str, method_name: &str, parameters: &'p [ActionParameter]) -> Result<Vec<&'p str>, ActionError> {
    let mut bindings = Vec::with_capacity(parameters.len());
    for (index, parameter) in parameters.iter().enumerate() {
        if let Some(binding) = parameter.binding.as_deref() {
            bindings.push(binding);
        }
        if bindings.len() != index + 1 {
            return Err(ActionError::InvalidActionSignature { class_ref: class_ref.to_string(),
                                                             method_name: method_name.to_string(),
                                                             annotated: parameters.iter().filter(|p| p.binding.is_some()).count(),
                                                             declared: parameters.len() });
        }
    }
    Ok(bindings)
}
