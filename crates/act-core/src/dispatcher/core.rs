//! Ciclo de vida de una acción.
//!
//! 1. Se consumen los `CallArguments` del contexto.
//! 2. Evento `ActionStart` con una copia profunda de los argumentos.
//! 3. Despacho por tipo: nativo (binding + invocación) o script.
//! 4. Error: se registra, se emite `ActionError` y se propaga. No se
//!    escribe nada en el contexto.
//! 5. Éxito: salidas y siguiente step se confirman juntos; luego
//!    `ActionEnd`.
use std::sync::Arc;

use log::{debug, error};

use super::DispatcherBuilder;
use crate::constants::{ACTION_PERFORMED_MESSAGE, CALL_ARGUMENTS_KEY, EXCEPTION_KEY, RETURN_VALUES_KEY};
use crate::errors::ActionError;
use crate::event::{ActionEvent, ActionEventKind, EventEmitter};
use crate::model::{ActionSpec, ActionStep, AuditSnapshot, CallArguments, ExecutionContext, ReturnValues};
use crate::native::{ActionRegistry, NativeInvoker};
use crate::script::ScriptRunner;
use crate::session::{SessionStore, TransientSessionData};

/// Dispatcher sin estado propio por ejecución: se puede compartir entre
/// hilos (`&self`).
pub struct ActionDispatcher {
    registry: Arc<ActionRegistry>,
    scripts: Arc<dyn ScriptRunner>,
    events: EventEmitter,
}

impl ActionDispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    pub(crate) fn from_parts(registry: Arc<ActionRegistry>, scripts: Arc<dyn ScriptRunner>, events: EventEmitter) -> Self {
        Self { registry, scripts, events }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Ejecuta la acción de `step` sobre `context`.
    ///
    /// Devuelve una copia de los `ReturnValues` confirmados.
    pub fn execute(&self,
                   step: &ActionStep,
                   context: &mut ExecutionContext,
                   transient: &TransientSessionData)
                   -> Result<ReturnValues, ActionError> {
        let mut call_arguments = context.remove_call_arguments();
        let path = context.execution_path().parent_path();
        let kind = step.action.kind();
        debug!("action:start run={} operation={} kind={kind} args={}",
               context.run_id(),
               step.operation,
               call_arguments.len());

        self.events.emit(ActionEvent::new(ActionEventKind::ActionStart,
                                          path.as_str(),
                                          format!("Preparing to run action {kind}"),
                                          CALL_ARGUMENTS_KEY,
                                          AuditSnapshot::of(&call_arguments)));

        let outcome = self.perform(step, &mut call_arguments, context, transient);

        match outcome {
            Err(e) => {
                error!("action:failed run={} operation={} kind={kind} code={}: {e}",
                       context.run_id(),
                       step.operation,
                       e.code());
                self.events.emit(ActionEvent::new(ActionEventKind::ActionError,
                                                  path.as_str(),
                                                  e.to_string(),
                                                  EXCEPTION_KEY,
                                                  AuditSnapshot::message(e.to_string())));
                Err(e)
            }
            Ok(values) => {
                let snapshot = AuditSnapshot::of(values.outputs());
                let committed = context.commit(values, step.next_step).clone();
                debug!("action:commit run={} operation={} outputs={} next={}",
                       context.run_id(),
                       step.operation,
                       committed.outputs().len(),
                       step.next_step);
                self.events.emit(ActionEvent::new(ActionEventKind::ActionEnd,
                                                  path.as_str(),
                                                  ACTION_PERFORMED_MESSAGE,
                                                  RETURN_VALUES_KEY,
                                                  snapshot));
                Ok(committed)
            }
        }
    }

    fn perform(&self,
               step: &ActionStep,
               call_arguments: &mut CallArguments,
               context: &mut ExecutionContext,
               transient: &TransientSessionData)
               -> Result<ReturnValues, ActionError> {
        match &step.action {
            ActionSpec::Native { class_ref, method_name } => {
                let mut sessions = SessionStore::new(context.sessions_mut(), transient);
                NativeInvoker::new(&self.registry).resolve_and_invoke(class_ref, method_name, call_arguments, &mut sessions)
            }
            ActionSpec::Scripted { source_text } => {
                if source_text.trim().is_empty() {
                    return Err(ActionError::MissingScript);
                }
                self.scripts.run(call_arguments, source_text, &step.operation)
            }
        }
    }
}

impl std::fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDispatcher").field("registry", &self.registry).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::InMemoryEventSink;
    use crate::model::StepId;
    use serde_json::json;

    #[test]
    fn blank_script_is_missing_script_and_nothing_committed() {
        let sink = Arc::new(InMemoryEventSink::new());
        let dispatcher = ActionDispatcher::builder().event_sink(sink.clone()).build();
        let mut ctx = ExecutionContext::default();
        let mut args = CallArguments::new();
        args.insert("a".into(), json!(1));
        ctx.put_call_arguments(args);

        let step = ActionStep::new("op", ActionSpec::scripted("   \n"), StepId(2));
        let err = dispatcher.execute(&step, &mut ctx, &TransientSessionData::new()).unwrap_err();

        assert!(matches!(err, ActionError::MissingScript));
        assert!(!ctx.has_call_arguments());
        assert!(ctx.return_values().is_none());
        assert!(ctx.next_step_position().is_none());
        let kinds: Vec<ActionEventKind> = sink.events().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ActionEventKind::ActionStart, ActionEventKind::ActionError]);
    }
}
