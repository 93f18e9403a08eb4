//! Tipos de evento emitidos por el dispatcher.
//!
//! Por cada ejecución se emite `ActionStart` y luego exactamente uno de
//! `ActionError` / `ActionEnd`. El payload es siempre un objeto con una
//! única clave (`callArguments`, `exception` o `returnValues`).
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::model::AuditSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionEventKind {
    ActionStart,
    ActionError,
    ActionEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepType {
    Action,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub id: Uuid,
    pub kind: ActionEventKind,
    /// Ruta del padre del step (correlación).
    pub path: String,
    pub step_type: StepType,
    pub message: String,
    pub payload: Value,
    pub ts: DateTime<Utc>,
}

impl ActionEvent {
    pub fn new(kind: ActionEventKind,
               path: impl Into<String>,
               message: impl Into<String>,
               key: &str,
               snapshot: AuditSnapshot)
               -> Self {
        let mut payload = Map::new();
        payload.insert(key.to_string(), snapshot.into_value());
        Self { id: Uuid::new_v4(),
               kind,
               path: path.into(),
               step_type: StepType::Action,
               message: message.into(),
               payload: Value::Object(payload),
               ts: Utc::now() }
    }

    /// Valor bajo `key` en el payload.
    pub fn payload_entry(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EXCEPTION_KEY;
    use crate::model::ExecutionPath;

    #[test]
    fn event_serializes_with_screaming_kind() {
        let ev = ActionEvent::new(ActionEventKind::ActionError,
                                  ExecutionPath::from_segments(vec![0, 2]).to_string(),
                                  "failed",
                                  EXCEPTION_KEY,
                                  AuditSnapshot::message("boom"));
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["kind"], "ACTION_ERROR");
        assert_eq!(json["step_type"], "ACTION");
        assert_eq!(json["path"], "0.2");
        assert_eq!(ev.payload_entry(EXCEPTION_KEY), Some(&Value::String("boom".into())));
    }
}
