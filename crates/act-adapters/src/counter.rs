use act_core::{ActionArguments, ActionClass, ActionMethod, ActionParameter, BoxError, ValueType};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Estado guardado en la sesión `counter`. Viaja con los checkpoints del
/// contexto.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterState {
    pub count: i64,
}

#[derive(Debug, Default)]
pub struct SessionCounter;

impl SessionCounter {
    fn increment(&mut self, args: ActionArguments) -> Result<Value, BoxError> {
        let session = args.serializable_session(0)?;
        let by = args.value(1).and_then(Value::as_i64).unwrap_or(1);
        let count = session.update(|slot| -> Result<i64, BoxError> {
                               let mut state: CounterState = match slot.as_ref() {
                                   Some(v) => serde_json::from_value(v.clone())?,
                                   None => CounterState::default(),
                               };
                               state.count += by;
                               let count = state.count;
                               *slot = Some(serde_json::to_value(state)?);
                               Ok(count)
                           })?;
        Ok(json!({ "count": count }))
    }

    fn reset(&mut self, args: ActionArguments) -> Result<Value, BoxError> {
        let previous = args.serializable_session(0)?
                           .clear()
                           .and_then(|v| serde_json::from_value::<CounterState>(v).ok())
                           .unwrap_or_default();
        Ok(json!({ "previous": previous.count }))
    }
}

impl ActionClass for SessionCounter {
    const CLASS_REF: &'static str = "actflow.adapters.SessionCounter";

    fn instantiate() -> Result<Self, BoxError> {
        Ok(SessionCounter)
    }

    fn methods() -> Vec<ActionMethod<Self>> {
        vec![ActionMethod::new("increment",
                               vec![ActionParameter::serializable_session("counter"),
                                    ActionParameter::value("by", ValueType::Integer),],
                               SessionCounter::increment),
             ActionMethod::new("reset",
                               vec![ActionParameter::serializable_session("counter")],
                               SessionCounter::reset),]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use act_core::{ActionArgument, SerializableSessionObject};

    #[test]
    fn increment_accumulates_in_session() {
        let session = SerializableSessionObject::default();
        let mut counter = SessionCounter;
        for _ in 0..2 {
            counter.increment(ActionArguments::new(vec![ActionArgument::SerializableSession(session.clone()),
                                                        ActionArgument::Value(Some(json!(5)))]))
                   .expect("increment");
        }
        assert_eq!(session.get(), Some(json!({"count": 10})));

        let out = counter.reset(ActionArguments::new(vec![ActionArgument::SerializableSession(session.clone())]))
                         .expect("reset");
        assert_eq!(out["previous"], 10);
        assert_eq!(session.get(), None);
    }
}
