use crate::operator::Operator;
use std::fmt;

/// One rewrite performed by the engine, with the expression text after it.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<'a> {
    Stripped {
        text: &'a str,
    },
    Resolved {
        text: &'a str,
    },
    Called {
        name: &'a str,
        args: &'a [f64],
        result: f64,
        text: &'a str,
    },
    Grouped {
        inner: &'a str,
        result: f64,
        text: &'a str,
    },
    Applied {
        lhs: f64,
        operator: Operator,
        rhs: f64,
        result: f64,
        text: &'a str,
    },
}

impl fmt::Display for Step<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Stripped { text } => write!(f, "start: {}", text),
            Step::Resolved { text } => write!(f, "identifiers resolved: {}", text),
            Step::Called {
                name,
                args,
                result,
                text,
            } => write!(f, "call {}{:?} -> {}, now {}", name, args, result, text),
            Step::Grouped {
                inner,
                result,
                text,
            } => write!(f, "group ({}) -> {}, now {}", inner, result, text),
            Step::Applied {
                lhs,
                operator,
                rhs,
                result,
                text,
            } => write!(
                f,
                "{}: {} {} {} -> {}, now {}",
                operator, lhs, operator, rhs, result, text
            ),
        }
    }
}

/// Receives every [`Step`] of an evaluation. Sinks observe only; they have
/// no way to change the result.
pub trait TraceSink: Send + Sync {
    fn record(&self, step: &Step<'_>);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Collects rendered steps for assertions.
    #[derive(Default)]
    pub struct Recorder {
        pub steps: Mutex<Vec<String>>,
    }

    impl Recorder {
        pub fn lines(&self) -> Vec<String> {
            self.steps.lock().map(|steps| steps.clone()).unwrap_or_default()
        }
    }

    impl TraceSink for Recorder {
        fn record(&self, step: &Step<'_>) {
            if let Ok(mut steps) = self.steps.lock() {
                steps.push(step.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_display() {
        let step = Step::Applied {
            lhs: 2.0,
            operator: Operator::Power,
            rhs: 3.0,
            result: 8.0,
            text: "1+8",
        };
        assert_eq!(step.to_string(), "**: 2 ** 3 -> 8, now 1+8");

        let step = Step::Called {
            name: "max",
            args: &[1.0, 2.5],
            result: 2.5,
            text: "2.5",
        };
        assert_eq!(step.to_string(), "call max[1.0, 2.5] -> 2.5, now 2.5");
    }
}
