//! Demo: ejecuta acciones nativas y Python sobre varios contextos en
//! paralelo (rayon) compartiendo las sesiones transitorias.
use actflow::logging::init_logging;
use actflow::{ActionSpec, ActionStep, CallArguments, ExecutionContext, Runtime, RuntimeError, StepId, CONFIG};
use act_adapters::{ConnectionCache, Greeter, SessionCounter};
use act_core::ActionClass;
use log::{error, info};
use rayon::prelude::*;
use serde_json::{json, Value};
use uuid::Uuid;

fn call_arguments(value: Value) -> CallArguments {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => CallArguments::new(),
    }
}

/// Workflow lineal de ejemplo: saludo -> script -> contador -> conexión.
fn steps() -> Vec<ActionStep> {
    vec![ActionStep::new("greet", ActionSpec::native(Greeter::CLASS_REF, "sayHello"), StepId(1)),
         ActionStep::new("measure",
                         ActionSpec::scripted("length = len(greeting)\nshout = greeting.upper()"),
                         StepId(2)),
         ActionStep::new("count", ActionSpec::native(SessionCounter::CLASS_REF, "increment"), StepId(3)),
         ActionStep::new("connect", ActionSpec::native(ConnectionCache::CLASS_REF, "connect"), StepId(4)),]
}

fn run_instance(runtime: &Runtime, name: &str) -> Result<ExecutionContext, RuntimeError> {
    let mut ctx = ExecutionContext::new(Uuid::new_v4());
    let steps = steps();

    ctx.put_call_arguments(call_arguments(json!({ "name": name })));
    let greeting = runtime.execute(&steps[0], &mut ctx)?;

    ctx.put_call_arguments(greeting.into_outputs());
    runtime.execute(&steps[1], &mut ctx)?;

    for _ in 0..3 {
        ctx.put_call_arguments(call_arguments(json!({ "by": 1 })));
        runtime.execute(&steps[2], &mut ctx)?;
    }

    ctx.put_call_arguments(call_arguments(json!({ "url": "db://demo" })));
    runtime.execute(&steps[3], &mut ctx)?;
    Ok(ctx)
}

fn main() -> Result<(), RuntimeError> {
    init_logging(&CONFIG.log_filter);
    let runtime = Runtime::new(&CONFIG)?;

    let names = ["Ada", "Grace", "Barbara", "Margaret"];
    let results: Vec<(&str, Result<ExecutionContext, RuntimeError>)> =
        names.par_iter().map(|name| (*name, run_instance(&runtime, name))).collect();

    for (name, result) in results {
        match result {
            Ok(ctx) => {
                let checkpoint = serde_json::to_string(&ctx).unwrap_or_default();
                info!("{name}: next={:?} last={:?} checkpoint={checkpoint}",
                      ctx.next_step_position(),
                      ctx.return_values().map(|v| v.outputs()));
            }
            Err(e) => error!("{name}: {e}"),
        }
    }
    info!("transient sessions in process: {}", runtime.transient_sessions().len());
    Ok(())
}
