//! Evaluates arithmetic expressions by rewriting their text.
//!
//! Identifiers are replaced by their values, innermost function calls and
//! parenthesised groups are rewritten to the numbers they produce, and the
//! remaining flat arithmetic is folded one operator at a time until a single
//! literal is left.
//!
//! ```
//! use strmath_rs::{evaluate, evaluate_with, function, Functions, Variables};
//!
//! assert_eq!(evaluate("3+4*2/(1-5)**2").unwrap(), 3.5);
//!
//! let variables = Variables::from([("r".to_string(), 2.0)]);
//! let functions = Functions::from([("double".to_string(), function(|args| Ok(args[0] * 2.0)))]);
//! assert_eq!(evaluate_with("double(r) ** 2", &variables, &functions).unwrap(), 16.0);
//! ```

pub mod call;
pub mod engine;
pub mod error;
pub mod functions;
mod lexer;
pub mod operator;
pub mod trace;

pub use call::{Call, Value};
pub use engine::{Evaluator, Variables};
pub use error::{Error, EvaluationError, Result};
pub use functions::{function, Function, FunctionTable, Functions};
pub use operator::Operator;
pub use trace::{Step, TraceSink};

/// Evaluates an expression that uses no variables and only the built-in
/// functions.
pub fn evaluate(expression: &str) -> Result<f64> {
    Evaluator::default().evaluate(expression, &Variables::new(), &Functions::new())
}

/// Evaluates an expression against caller-supplied variables and functions.
pub fn evaluate_with(
    expression: &str,
    variables: &Variables,
    functions: &Functions,
) -> Result<f64> {
    Evaluator::default().evaluate(expression, variables, functions)
}
