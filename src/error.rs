use crate::operator::Operator;
use thiserror::Error;

/// Failures while computing a value, after the expression was accepted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("cannot compute {lhs} {operator} {rhs}: division by zero")]
    ZeroDivision {
        lhs: f64,
        operator: Operator,
        rhs: f64,
    },

    #[error("cannot compute {lhs} {operator} {rhs}: result {result} is not a finite number")]
    InvalidResult {
        lhs: f64,
        operator: Operator,
        rhs: f64,
        result: f64,
    },

    #[error("error in function '{name}': {message}")]
    Function { name: String, message: String },

    #[error("function '{name}' returned {value}, which is not a finite number")]
    NonFiniteReturn { name: String, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("missing required argument `{0}`")]
    MissingArgument(&'static str),

    #[error("invalid `{argument}`: {message}")]
    ArgumentType {
        argument: &'static str,
        message: String,
    },

    #[error("empty expression")]
    EmptyExpression,

    #[error("unknown identifier '{0}' in expression")]
    UnknownIdentifier(String),

    #[error("unknown function '{0}' in expression")]
    UnknownFunction(String),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("could not fully evaluate expression, got '{0}'")]
    IncompleteEvaluation(String),
}

impl Error {
    pub(crate) fn argument_type(argument: &'static str, message: impl Into<String>) -> Self {
        Error::ArgumentType {
            argument,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
