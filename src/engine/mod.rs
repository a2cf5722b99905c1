mod flat;
mod reducer;
mod resolver;

use crate::error::{Error, Result};
use crate::functions::{FunctionTable, Functions};
use crate::lexer::Lexer;
use crate::trace::{Step, TraceSink};
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Variable bindings, keyed by the name used in expressions.
pub type Variables = HashMap<String, f64>;

/// Evaluates expressions. Holds configuration only: every call builds its
/// own function table and intermediate text, so one `Evaluator` can be
/// shared across threads.
#[derive(Clone, Default)]
pub struct Evaluator {
    trace: Option<Arc<dyn TraceSink>>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forwards every rewrite step to `sink`, in addition to the `debug!`
    /// log line each step always produces.
    pub fn with_trace(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.trace = Some(sink);
        self
    }

    /// Evaluates `expression` against the given bindings.
    ///
    /// # Arguments
    ///
    /// * `expression` - The expression text. Whitespace is ignored.
    /// * `variables` - Values substituted for identifiers.
    /// * `functions` - Callables added to the math library, replacing
    ///   library functions of the same name.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if the expression collapses to a single number.
    /// * `Err(Error)` naming the first problem found otherwise.
    pub fn evaluate(
        &self,
        expression: &str,
        variables: &Variables,
        functions: &Functions,
    ) -> Result<f64> {
        validate_variables(variables)?;
        validate_functions(functions)?;

        let table = FunctionTable::build(functions);
        let session = Session {
            table: &table,
            trace: self.trace.as_deref(),
        };

        let text = resolver::strip_whitespace(expression)?;
        session.record(Step::Stripped { text: &text });

        let text = resolver::resolve_identifiers(&text, variables, &table)?;
        session.record(Step::Resolved { text: &text });

        session.reduce(&text)
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("trace", &self.trace.is_some())
            .finish()
    }
}

fn validate_variables(variables: &Variables) -> Result<()> {
    for (name, value) in variables {
        if !Lexer::is_identifier(name) {
            return Err(Error::argument_type(
                "variables",
                format!("variable name {:?} is not a valid identifier", name),
            ));
        }
        if !value.is_finite() {
            return Err(Error::argument_type(
                "variables",
                format!("variable '{}' has non-finite value {}", name, value),
            ));
        }
    }
    Ok(())
}

fn validate_functions(functions: &Functions) -> Result<()> {
    match functions.keys().find(|name| !Lexer::is_identifier(name)) {
        Some(name) => Err(Error::argument_type(
            "functions",
            format!("function name {:?} is not a valid identifier", name),
        )),
        None => Ok(()),
    }
}

/// State shared by the phases of one evaluation.
pub(crate) struct Session<'a> {
    table: &'a FunctionTable,
    trace: Option<&'a dyn TraceSink>,
}

impl Session<'_> {
    fn record(&self, step: Step<'_>) {
        debug!("{}", step);
        if let Some(sink) = self.trace {
            sink.record(&step);
        }
    }
}

/// Writes a value back into expression text. `f64`'s `Display` gives the
/// shortest text that parses back to the same value and never uses
/// exponent notation, so the round trip is lossless for finite values.
pub(crate) fn render(value: f64) -> String {
    value.to_string()
}
