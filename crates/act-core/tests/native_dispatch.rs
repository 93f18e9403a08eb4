use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use act_adapters::{register_all, ConnectionCache, Greeter, SessionCounter};
use act_core::constants::{CALL_ARGUMENTS_KEY, EXCEPTION_KEY, RETURN_VALUES_KEY};
use act_core::{ActionClass, ActionDispatcher, ActionError, ActionEventKind, ActionMethod, ActionParameter, ActionRegistry,
               ActionSpec, ActionStep, BoxError, CallArguments, ExecutionContext, ExecutionPath, InMemoryEventSink,
               ParamType, StepId, TransientSessionData, ValueType};
use serde_json::{json, Value};

static SIDE_EFFECTS: AtomicUsize = AtomicUsize::new(0);

/// Clase con firmas problemáticas para los casos de error.
struct Faulty;

impl ActionClass for Faulty {
    const CLASS_REF: &'static str = "tests.Faulty";

    fn instantiate() -> Result<Self, BoxError> {
        Ok(Faulty)
    }

    fn methods() -> Vec<ActionMethod<Self>> {
        vec![ActionMethod::new("halfAnnotated",
                               vec![ActionParameter::serializable_session("audit"),
                                    ActionParameter::unannotated(ParamType::Value(ValueType::Any)),],
                               |_, _| {
                                   SIDE_EFFECTS.fetch_add(1, Ordering::SeqCst);
                                   Ok(json!({}))
                               }),
             ActionMethod::new("scalar", vec![], |_, _| Ok(json!("not a map"))),
             ActionMethod::new("fails", vec![], |_, _| Err("downstream unavailable".into())),
             ActionMethod::new("transientCounter", vec![ActionParameter::transient_session("counter")], |_, _| Ok(json!({}))),]
    }
}

fn dispatcher() -> (ActionDispatcher, Arc<InMemoryEventSink>) {
    let registry = Arc::new(ActionRegistry::new());
    register_all(&registry);
    registry.register::<Faulty>();
    let sink = Arc::new(InMemoryEventSink::new());
    let dispatcher = ActionDispatcher::builder().registry(registry).event_sink(sink.clone()).build();
    (dispatcher, sink)
}

fn context_with(args: Value) -> ExecutionContext {
    let mut ctx = ExecutionContext::default();
    *ctx.execution_path_mut() = ExecutionPath::from_segments(vec![0, 3, 1]);
    if let Value::Object(map) = args {
        ctx.put_call_arguments(map.into_iter().collect::<CallArguments>());
    }
    ctx
}

fn assert_nothing_committed(ctx: &ExecutionContext) {
    assert!(ctx.return_values().is_none(), "no return values expected");
    assert!(ctx.next_step_position().is_none(), "no next step expected");
}

#[test]
fn greeter_commits_outputs_and_next_step() {
    let (dispatcher, sink) = dispatcher();
    let mut ctx = context_with(json!({"name": "Ada"}));
    let step = ActionStep::new("greet", ActionSpec::native(Greeter::CLASS_REF, "sayHello"), StepId(4));

    let values = dispatcher.execute(&step, &mut ctx, &TransientSessionData::new()).expect("greeter should run");

    assert_eq!(values.get("greeting"), Some(&json!("Hello, Ada")));
    assert_eq!(ctx.return_values(), Some(&values));
    assert_eq!(ctx.next_step_position(), Some(StepId(4)));
    assert!(!ctx.has_call_arguments(), "call arguments are consumed");

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, ActionEventKind::ActionStart);
    assert_eq!(events[0].path, "0.3");
    assert_eq!(events[0].message, "Preparing to run action NATIVE");
    assert_eq!(events[0].payload_entry(CALL_ARGUMENTS_KEY), Some(&json!({"name": "Ada"})));
    assert_eq!(events[1].kind, ActionEventKind::ActionEnd);
    assert_eq!(events[1].message, "Action performed");
    assert_eq!(events[1].payload_entry(RETURN_VALUES_KEY), Some(&json!({"greeting": "Hello, Ada"})));
}

#[test]
fn type_mismatch_aborts_without_commit() {
    let (dispatcher, sink) = dispatcher();
    let mut ctx = context_with(json!({"name": 42}));
    let step = ActionStep::new("greet", ActionSpec::native(Greeter::CLASS_REF, "sayHello"), StepId(1));

    let err = dispatcher.execute(&step, &mut ctx, &TransientSessionData::new()).unwrap_err();

    match &err {
        ActionError::TypeMismatch { parameter, expected, actual, .. } => {
            assert_eq!(parameter, "name");
            assert_eq!(expected, "string");
            assert_eq!(actual, "integer");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_nothing_committed(&ctx);
    let events = sink.events();
    assert_eq!(events.last().map(|e| e.kind), Some(ActionEventKind::ActionError));
    assert_eq!(events[1].message, err.to_string());
    assert_eq!(events[1].payload_entry(EXCEPTION_KEY), Some(&json!(err.to_string())));
}

#[test]
fn null_argument_binds_as_absent() {
    let (dispatcher, _) = dispatcher();
    let mut ctx = context_with(json!({"name": "Bo", "salutation": null}));
    let step = ActionStep::new("greet", ActionSpec::native(Greeter::CLASS_REF, "greet"), StepId(1));
    let values = dispatcher.execute(&step, &mut ctx, &TransientSessionData::new()).expect("greet");
    assert_eq!(values.get("greeting"), Some(&json!("Hello, Bo")));
}

#[test]
fn invalid_signature_creates_no_session_and_never_invokes() {
    let (dispatcher, _) = dispatcher();
    let mut ctx = context_with(json!({}));
    let step = ActionStep::new("audit", ActionSpec::native(Faulty::CLASS_REF, "halfAnnotated"), StepId(1));

    let err = dispatcher.execute(&step, &mut ctx, &TransientSessionData::new()).unwrap_err();

    assert!(matches!(err, ActionError::InvalidActionSignature { annotated: 1, declared: 2, .. }));
    assert!(ctx.session_data().is_empty());
    assert_eq!(SIDE_EFFECTS.load(Ordering::SeqCst), 0);
    assert_nothing_committed(&ctx);
}

#[test]
fn failures_are_classified_and_not_committed() {
    let (dispatcher, sink) = dispatcher();
    let cases = [("scalar", "malformed_action_result"),
                 ("fails", "invocation_failure"),
                 ("missing", "action_not_found")];
    for (method, code) in cases {
        let mut ctx = context_with(json!({}));
        let step = ActionStep::new("op", ActionSpec::native(Faulty::CLASS_REF, method), StepId(9));
        let err = dispatcher.execute(&step, &mut ctx, &TransientSessionData::new()).unwrap_err();
        assert_eq!(err.code(), code, "{method}");
        assert_nothing_committed(&ctx);
    }
    let errors = sink.events().iter().filter(|e| e.kind == ActionEventKind::ActionError).count();
    assert_eq!(errors, cases.len());
}

#[test]
fn serializable_session_survives_checkpoint() {
    let (dispatcher, _) = dispatcher();
    let transient = TransientSessionData::new();
    let step = ActionStep::new("count", ActionSpec::native(SessionCounter::CLASS_REF, "increment"), StepId(2));

    let mut ctx = context_with(json!({"by": 2}));
    dispatcher.execute(&step, &mut ctx, &transient).expect("first increment");

    let checkpoint = serde_json::to_string(&ctx).expect("serialize context");
    let mut restored: ExecutionContext = serde_json::from_str(&checkpoint).expect("restore context");
    restored.put_call_arguments(CallArguments::new());
    let values = dispatcher.execute(&step, &mut restored, &transient).expect("second increment");

    assert_eq!(values.get("count"), Some(&json!(3)));
}

#[test]
fn transient_session_is_shared_across_contexts() {
    let (dispatcher, _) = dispatcher();
    let transient = TransientSessionData::new();
    let step = ActionStep::new("connect", ActionSpec::native(ConnectionCache::CLASS_REF, "connect"), StepId(2));

    let first = dispatcher.execute(&step, &mut context_with(json!({"url": "db://main"})), &transient).expect("first");
    let second = dispatcher.execute(&step, &mut context_with(json!({"url": "db://main"})), &transient).expect("second");

    assert_eq!(first.get("reused"), Some(&json!(false)));
    assert_eq!(second.get("reused"), Some(&json!(true)));
    assert_eq!(first.get("connectionId"), second.get("connectionId"));
    assert!(transient.contains("connection"));
}

#[test]
fn session_name_keeps_its_first_kind() {
    let (dispatcher, _) = dispatcher();
    let transient = TransientSessionData::new();
    let mut ctx = context_with(json!({}));
    let count = ActionStep::new("count", ActionSpec::native(SessionCounter::CLASS_REF, "increment"), StepId(2));
    dispatcher.execute(&count, &mut ctx, &transient).expect("increment");

    let conflicting = ActionStep::new("op", ActionSpec::native(Faulty::CLASS_REF, "transientCounter"), StepId(3));
    let err = dispatcher.execute(&conflicting, &mut ctx, &transient).unwrap_err();

    assert!(matches!(err, ActionError::SessionKindConflict { .. }));
    assert!(!transient.contains("counter"));
}

#[test]
fn transient_binding_in_one_run_does_not_block_another() {
    let (dispatcher, _) = dispatcher();
    let transient = TransientSessionData::new();
    let transient_use = ActionStep::new("op", ActionSpec::native(Faulty::CLASS_REF, "transientCounter"), StepId(2));
    let count = ActionStep::new("count", ActionSpec::native(SessionCounter::CLASS_REF, "increment"), StepId(3));

    let mut first_run = context_with(json!({}));
    dispatcher.execute(&transient_use, &mut first_run, &transient).expect("transient use");
    assert!(transient.contains("counter"));

    let mut second_run = context_with(json!({}));
    let values = dispatcher.execute(&count, &mut second_run, &transient).expect("serializable use in another run");
    assert_eq!(values.get("count"), Some(&json!(1)));

    let err = dispatcher.execute(&count, &mut first_run, &transient).unwrap_err();
    assert!(matches!(err, ActionError::SessionKindConflict { .. }));
}

#[test]
fn concurrent_dispatches_use_their_own_context() {
    let (dispatcher, _) = dispatcher();
    let dispatcher = Arc::new(dispatcher);
    let transient = TransientSessionData::new();
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4).map(|i| {
                                    let dispatcher = Arc::clone(&dispatcher);
                                    let barrier = Arc::clone(&barrier);
                                    let transient = transient.clone();
                                    thread::spawn(move || {
                                        let name = format!("worker-{i}");
                                        let mut ctx = context_with(json!({ "name": name }));
                                        let step = ActionStep::new("greet",
                                                                   ActionSpec::native(Greeter::CLASS_REF, "sayHello"),
                                                                   StepId(i));
                                        barrier.wait();
                                        let values = dispatcher.execute(&step, &mut ctx, &transient).expect("greet");
                                        (name, values, ctx.next_step_position())
                                    })
                                })
                                .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let (name, values, next) = handle.join().expect("worker thread");
        assert_eq!(values.get("greeting"), Some(&json!(format!("Hello, {name}"))));
        assert_eq!(next, Some(StepId(i as u64)));
    }
}
