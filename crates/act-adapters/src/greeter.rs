use act_core::{ActionArguments, ActionClass, ActionMethod, ActionParameter, BoxError, ValueType};
use serde_json::{json, Value};

/// Saludo sin estado.
#[derive(Debug, Default)]
pub struct Greeter;

impl Greeter {
    fn say_hello(&mut self, args: ActionArguments) -> Result<Value, BoxError> {
        let name = args.require_str(0)?;
        Ok(json!({ "greeting": format!("Hello, {name}") }))
    }

    fn say_hello_with(&mut self, args: ActionArguments) -> Result<Value, BoxError> {
        let name = args.require_str(0)?;
        let salutation = args.str(1).unwrap_or("Hello");
        Ok(json!({ "greeting": format!("{salutation}, {name}") }))
    }
}

impl ActionClass for Greeter {
    const CLASS_REF: &'static str = "actflow.adapters.Greeter";

    fn instantiate() -> Result<Self, BoxError> {
        Ok(Greeter)
    }

    fn methods() -> Vec<ActionMethod<Self>> {
        vec![ActionMethod::new("sayHello",
                               vec![ActionParameter::value("name", ValueType::String)],
                               Greeter::say_hello),
             ActionMethod::new("greet",
                               vec![ActionParameter::value("name", ValueType::String),
                                    ActionParameter::value("salutation", ValueType::String),],
                               Greeter::say_hello_with),]
    }
}
