//! Entry point for hosts whose arguments are only known at run time, such
//! as scripting bridges or values read from configuration. Arguments arrive
//! as [`Value`]s and are checked before anything is evaluated.

use crate::engine::{Evaluator, Variables};
use crate::error::{Error, Result};
use crate::functions::{Function, Functions};
use std::fmt;

/// A loosely typed argument.
#[derive(Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    Function(Function),
    List(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Builds a `Value::Map` from key/value pairs.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Text(_) => "text",
            Value::Function(_) => "function",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// The numeric value, for integers and floats only.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Integer(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{:?}", value),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Text(value) => write!(f, "{:?}", value),
            Value::Function(_) => f.write_str("<function>"),
            Value::List(values) => f.debug_list().entries(values).finish(),
            Value::Map(entries) => f
                .debug_map()
                .entries(entries.iter().map(|(key, value)| (key, value)))
                .finish(),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

/// One call to the evaluator with dynamically typed arguments. Unset
/// `variables` and `functions` mean empty mappings; an unset expression is
/// an error.
#[derive(Clone, Debug, Default)]
pub struct Call {
    expression: Option<Value>,
    variables: Option<Value>,
    functions: Option<Value>,
}

impl Call {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expression(mut self, expression: impl Into<Value>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    pub fn variables(mut self, variables: impl Into<Value>) -> Self {
        self.variables = Some(variables.into());
        self
    }

    pub fn functions(mut self, functions: impl Into<Value>) -> Self {
        self.functions = Some(functions.into());
        self
    }

    pub fn evaluate(&self) -> Result<f64> {
        self.evaluate_with(&Evaluator::default())
    }

    /// Checks every argument, then evaluates with `evaluator`.
    pub fn evaluate_with(&self, evaluator: &Evaluator) -> Result<f64> {
        let expression = match &self.expression {
            None => return Err(Error::MissingArgument("expression")),
            Some(Value::Text(text)) => text,
            Some(other) => {
                return Err(Error::argument_type(
                    "expression",
                    format!("must be text, got {}", other.type_name()),
                ))
            }
        };
        let variables = variables_from(self.variables.as_ref())?;
        let functions = functions_from(self.functions.as_ref())?;

        evaluator.evaluate(expression, &variables, &functions)
    }
}

fn entries<'a>(argument: &'static str, value: Option<&'a Value>) -> Result<&'a [(Value, Value)]> {
    match value {
        None => Ok(&[]),
        Some(Value::Map(entries)) => Ok(entries),
        Some(other) => Err(Error::argument_type(
            argument,
            format!("must be a map, got {}", other.type_name()),
        )),
    }
}

fn variables_from(value: Option<&Value>) -> Result<Variables> {
    let mut variables = Variables::new();
    for (key, value) in entries("variables", value)? {
        let Value::Text(name) = key else {
            return Err(Error::argument_type(
                "variables",
                format!("variable name {:?} is not text", key),
            ));
        };
        let number = value.as_number().ok_or_else(|| {
            Error::argument_type(
                "variables",
                format!("variable '{}' has non-numeric value {:?}", name, value),
            )
        })?;
        variables.insert(name.clone(), number);
    }
    Ok(variables)
}

fn functions_from(value: Option<&Value>) -> Result<Functions> {
    let mut functions = Functions::new();
    for (key, value) in entries("functions", value)? {
        let Value::Text(name) = key else {
            return Err(Error::argument_type(
                "functions",
                format!("function name {:?} is not text", key),
            ));
        };
        let Value::Function(function) = value else {
            return Err(Error::argument_type(
                "functions",
                format!("function '{}' is not callable, got {}", name, value.type_name()),
            ));
        };
        functions.insert(name.clone(), function.clone());
    }
    Ok(functions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::function;

    fn argument_of(result: Result<f64>) -> Option<&'static str> {
        match result {
            Err(Error::ArgumentType { argument, .. }) => Some(argument),
            _ => None,
        }
    }

    #[test]
    fn test_full_call() {
        let result = Call::new()
            .expression("foo(a) + b")
            .variables(Value::map([("a", Value::Integer(2)), ("b", Value::Float(0.5))]))
            .functions(Value::map([(
                "foo",
                function(|args| Ok(args[0] * 42.0)),
            )]))
            .evaluate();
        assert_eq!(result, Ok(84.5));
    }

    #[test]
    fn test_missing_expression() {
        assert_eq!(
            Call::new().evaluate(),
            Err(Error::MissingArgument("expression"))
        );
        // An empty string is supplied, just empty.
        assert_eq!(
            Call::new().expression("").evaluate(),
            Err(Error::EmptyExpression)
        );
    }

    #[test]
    fn test_non_text_expression() {
        assert_eq!(
            argument_of(Call::new().expression(123_i64).evaluate()),
            Some("expression")
        );
    }

    #[test]
    fn test_non_map_bindings() {
        assert_eq!(
            argument_of(Call::new().expression("1+1").variables(123_i64).evaluate()),
            Some("variables")
        );
        assert_eq!(
            argument_of(
                Call::new()
                    .expression("1+1")
                    .functions(vec![Value::Integer(1)])
                    .evaluate()
            ),
            Some("functions")
        );
    }

    #[test]
    fn test_bad_variable_entries() {
        let non_text_name = Call::new()
            .expression("1")
            .variables(Value::map([(123_i64, 4_i64)]));
        assert_eq!(argument_of(non_text_name.evaluate()), Some("variables"));

        let non_numeric = Call::new()
            .expression("1")
            .variables(Value::map([("a", "x")]));
        assert_eq!(
            non_numeric.evaluate(),
            Err(Error::ArgumentType {
                argument: "variables",
                message: "variable 'a' has non-numeric value \"x\"".to_string(),
            })
        );

        let boolean = Call::new()
            .expression("a")
            .variables(Value::map([("a", true)]));
        assert_eq!(argument_of(boolean.evaluate()), Some("variables"));
    }

    #[test]
    fn test_bad_function_entries() {
        let non_text_name = Call::new()
            .expression("1")
            .functions(Value::map([(123_i64, function(|args| Ok(args[0])))]));
        assert_eq!(argument_of(non_text_name.evaluate()), Some("functions"));

        let not_callable = Call::new()
            .expression("foo(1)")
            .functions(Value::map([("foo", 123_i64)]));
        assert_eq!(
            not_callable.evaluate(),
            Err(Error::ArgumentType {
                argument: "functions",
                message: "function 'foo' is not callable, got integer".to_string(),
            })
        );
    }

    #[test]
    fn test_validation_precedes_evaluation() {
        // `1/0` would fail too, but the bad binding is reported first.
        let call = Call::new()
            .expression("1/0")
            .variables(Value::map([("a", "x")]));
        assert_eq!(argument_of(call.evaluate()), Some("variables"));
    }

    #[test]
    fn test_value_debug() {
        let value = Value::map([("a", Value::Float(1.0)), ("f", function(|_| Ok(0.0)).into())]);
        assert_eq!(format!("{:?}", value), r#"{"a": 1.0, "f": <function>}"#);
    }
}
