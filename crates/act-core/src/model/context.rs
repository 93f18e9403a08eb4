//! Contexto de ejecución por instancia de flujo.
//!
//! El contexto es serializable (checkpoint): contiene los argumentos
//! pendientes, las últimas salidas, el puntero al siguiente step y las
//! sesiones del run. El mapa de sesiones transitorias vive fuera (ver
//! `TransientSessionData`); el contexto solo recuerda qué nombres ligó a él.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CallArguments, ExecutionPath, ReturnValues, StepId};
use crate::session::{RunSessions, SerializableSessionObject};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
    run_id: Uuid,
    execution_path: ExecutionPath,
    call_arguments: Option<CallArguments>,
    return_values: Option<ReturnValues>,
    next_step: Option<StepId>,
    sessions: RunSessions,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new(Uuid::new_v4())
    }
}

impl ExecutionContext {
    pub fn new(run_id: Uuid) -> Self {
        Self { run_id,
               execution_path: ExecutionPath::root(),
               call_arguments: None,
               return_values: None,
               next_step: None,
               sessions: RunSessions::default() }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn execution_path(&self) -> &ExecutionPath {
        &self.execution_path
    }

    pub fn execution_path_mut(&mut self) -> &mut ExecutionPath {
        &mut self.execution_path
    }

    /// Fija los argumentos del próximo step (lo hace el orquestador).
    pub fn put_call_arguments(&mut self, arguments: CallArguments) {
        self.call_arguments = Some(arguments);
    }

    /// Extrae los argumentos pendientes. Una segunda llamada devuelve un mapa
    /// vacío: los argumentos se consumen una sola vez.
    pub fn remove_call_arguments(&mut self) -> CallArguments {
        self.call_arguments.take().unwrap_or_default()
    }

    pub fn has_call_arguments(&self) -> bool {
        self.call_arguments.is_some()
    }

    pub fn session_data(&self) -> &IndexMap<String, SerializableSessionObject> {
        self.sessions.serializable()
    }

    pub fn session_data_mut(&mut self) -> &mut IndexMap<String, SerializableSessionObject> {
        self.sessions.serializable_mut()
    }

    pub fn sessions(&self) -> &RunSessions {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut RunSessions {
        &mut self.sessions
    }

    pub fn put_return_values(&mut self, values: ReturnValues) {
        self.return_values = Some(values);
    }

    pub fn return_values(&self) -> Option<&ReturnValues> {
        self.return_values.as_ref()
    }

    pub fn put_next_step_position(&mut self, step: StepId) {
        self.next_step = Some(step);
    }

    pub fn next_step_position(&self) -> Option<StepId> {
        self.next_step
    }

    /// Publica salidas y siguiente step en una sola mutación.
    pub(crate) fn commit(&mut self, values: ReturnValues, next_step: StepId) -> &ReturnValues {
        self.next_step = Some(next_step);
        self.return_values.insert(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn call_arguments_are_consumed_once() {
        let mut ctx = ExecutionContext::default();
        let mut args = CallArguments::new();
        args.insert("name".into(), json!("Ada"));
        ctx.put_call_arguments(args);

        assert_eq!(ctx.remove_call_arguments().len(), 1);
        assert!(ctx.remove_call_arguments().is_empty());
        assert!(!ctx.has_call_arguments());
    }

    #[test]
    fn commit_sets_outputs_and_next_step_together() {
        let mut ctx = ExecutionContext::default();
        let mut outputs = crate::model::ActionOutputs::new();
        outputs.insert("x".into(), json!(1));
        ctx.commit(ReturnValues::new(outputs, None), StepId(7));
        assert_eq!(ctx.next_step_position(), Some(StepId(7)));
        assert_eq!(ctx.return_values().and_then(|r| r.get("x")), Some(&json!(1)));
    }

    #[test]
    fn context_survives_checkpoint_roundtrip() {
        let mut ctx = ExecutionContext::default();
        let session = SerializableSessionObject::default();
        session.set(json!({"count": 2}));
        ctx.session_data_mut().insert("counter".into(), session);
        ctx.put_next_step_position(StepId(3));

        let checkpoint = serde_json::to_string(&ctx).unwrap();
        let restored: ExecutionContext = serde_json::from_str(&checkpoint).unwrap();

        assert_eq!(restored.run_id(), ctx.run_id());
        assert_eq!(restored.next_step_position(), Some(StepId(3)));
        assert_eq!(restored.session_data()["counter"].get(), Some(json!({"count": 2})));
    }
}
