use std::sync::atomic::{AtomicU64, Ordering};

use act_core::{ActionArguments, ActionClass, ActionMethod, ActionParameter, BoxError, ValueType};
use serde_json::{json, Value};

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Recurso local al proceso (p. ej. un cliente abierto). No es
/// serializable: vive en una sesión transitoria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionHandle {
    pub id: u64,
    pub url: String,
    pub uses: u64,
}

impl ConnectionHandle {
    fn open(url: &str) -> Self {
        Self { id: NEXT_HANDLE.fetch_add(1, Ordering::Relaxed),
               url: url.to_string(),
               uses: 0 }
    }
}

#[derive(Debug, Default)]
pub struct ConnectionCache;

impl ConnectionCache {
    /// Reutiliza la conexión de la sesión si apunta a la misma URL; si no,
    /// abre una nueva.
    fn connect(&mut self, args: ActionArguments) -> Result<Value, BoxError> {
        let session = args.transient_session(0)?;
        let url = args.require_str(1)?;
        let reused = session.with_mut(|h: &mut ConnectionHandle| h.url == url).unwrap_or(false);
        if !reused {
            session.set(ConnectionHandle::open(url));
        }
        let handle = session.with_mut(|h: &mut ConnectionHandle| {
                                h.uses += 1;
                                h.clone()
                            })
                            .ok_or("connection session holds an unexpected value")?;
        Ok(json!({ "connectionId": handle.id, "uses": handle.uses, "reused": reused }))
    }
}

impl ActionClass for ConnectionCache {
    const CLASS_REF: &'static str = "actflow.adapters.ConnectionCache";

    fn instantiate() -> Result<Self, BoxError> {
        Ok(ConnectionCache)
    }

    fn methods() -> Vec<ActionMethod<Self>> {
        vec![ActionMethod::new("connect",
                               vec![ActionParameter::transient_session("connection"),
                                    ActionParameter::value("url", ValueType::String),],
                               ConnectionCache::connect)]
    }
}
