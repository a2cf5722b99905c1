use crate::engine::{render, Session};
use crate::error::{Error, EvaluationError, Result};
use crate::lexer::{is_word_char, Lexer};
use crate::trace::Step;

/// A `(` and the `)` closing it with no other parenthesis in between.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    open: usize,
    close: usize,
}

/// All innermost parenthesised spans, left to right.
fn innermost_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut open = None;
    for (i, c) in text.char_indices() {
        match c {
            '(' => open = Some(i),
            ')' => {
                if let Some(open) = open.take() {
                    spans.push(Span { open, close: i });
                }
            }
            _ => {}
        }
    }
    spans
}

/// Start of the identifier directly before `open`, if the span is a call.
fn call_start(text: &str, open: usize) -> Option<usize> {
    let prefix = &text[..open];
    let start = prefix
        .char_indices()
        .rev()
        .find(|(_, c)| !is_word_char(*c))
        .map_or(0, |(i, c)| i + c.len_utf8());
    let word = &prefix[start..];
    Lexer::is_identifier(word).then_some(start)
}

/// A group touching a literal or another group would splice two numbers
/// together once rewritten (`2(3)` becoming `23`).
fn is_juxtaposed(text: &str, span: Span) -> bool {
    let before = text[..span.open].chars().next_back();
    matches!(before, Some(c) if is_word_char(c) || c == '.' || c == ')')
        || is_followed_by_operand(text, span)
}

/// True when a literal, identifier or group starts right after `span`.
fn is_followed_by_operand(text: &str, span: Span) -> bool {
    let after = text[span.close + 1..].chars().next();
    matches!(after, Some(c) if is_word_char(c) || c == '.' || c == '(')
}

impl Session<'_> {
    /// Reduces `text` to a number: innermost calls first, then innermost
    /// groups, then the remaining flat arithmetic. Arguments and group
    /// bodies are reduced by calling back into this function.
    pub(crate) fn reduce(&self, text: &str) -> Result<f64> {
        let mut text = text.to_string();

        loop {
            let spans = innermost_spans(&text);

            let call = spans
                .iter()
                .find_map(|&span| call_start(&text, span.open).map(|start| (start, span)));
            if let Some((start, span)) = call {
                self.reduce_call(&mut text, start, span)?;
                continue;
            }

            if let Some(&span) = spans.first() {
                if is_juxtaposed(&text, span) {
                    return Err(Error::IncompleteEvaluation(text));
                }
                self.reduce_group(&mut text, span)?;
                continue;
            }

            break;
        }

        self.reduce_flat(text)
    }

    fn reduce_call(&self, text: &mut String, start: usize, span: Span) -> Result<()> {
        if is_followed_by_operand(text, span) {
            return Err(Error::IncompleteEvaluation(text.clone()));
        }
        let name = &text[start..span.open];
        let function = self
            .table
            .get(name)
            .ok_or_else(|| Error::UnknownFunction(name.to_string()))?;

        let args = text[span.open + 1..span.close]
            .split(',')
            .filter(|part| !part.is_empty())
            .map(|part| self.reduce(part))
            .collect::<Result<Vec<f64>>>()?;

        let result = function(&args).map_err(|message| EvaluationError::Function {
            name: name.to_string(),
            message,
        })?;
        if !result.is_finite() {
            return Err(EvaluationError::NonFiniteReturn {
                name: name.to_string(),
                value: result,
            }
            .into());
        }

        let name = name.to_string();
        text.replace_range(start..=span.close, &render(result));
        self.record(Step::Called {
            name: &name,
            args: &args,
            result,
            text: text.as_str(),
        });
        Ok(())
    }

    fn reduce_group(&self, text: &mut String, span: Span) -> Result<()> {
        let inner = text[span.open + 1..span.close].to_string();
        let result = self.reduce(&inner)?;

        text.replace_range(span.open..=span.close, &render(result));
        self.record(Step::Grouped {
            inner: &inner,
            result,
            text: text.as_str(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{function, FunctionTable, Functions};

    fn reduce_with(text: &str, functions: Functions) -> Result<f64> {
        let table = FunctionTable::build(&functions);
        let session = Session {
            table: &table,
            trace: None,
        };
        session.reduce(text)
    }

    fn reduce(text: &str) -> Result<f64> {
        reduce_with(text, Functions::new())
    }

    #[test]
    fn test_innermost_spans() {
        assert_eq!(
            innermost_spans("((1)+f(2))"),
            vec![Span { open: 1, close: 3 }, Span { open: 6, close: 8 }]
        );
        assert_eq!(innermost_spans("1+2"), vec![]);
        assert_eq!(innermost_spans(")("), vec![]);
    }

    #[test]
    fn test_call_start() {
        assert_eq!(call_start("max(1)", 3), Some(0));
        assert_eq!(call_start("2*log10(1)", 7), Some(2));
        assert_eq!(call_start("2*(1)", 2), None);
        assert_eq!(call_start("2sin(1)", 4), None);
        assert_eq!(call_start("(1)", 0), None);
    }

    #[test]
    fn test_nested_calls_resolve_inside_out() {
        assert_eq!(reduce("max(1,min(5,2),pow(2,3))"), Ok(8.0));
        assert_eq!(reduce("pow(max(1,2),min(3,4))"), Ok(8.0));
    }

    #[test]
    fn test_zero_argument_call() {
        let functions = Functions::from([("seven".to_string(), function(|args| {
            assert!(args.is_empty());
            Ok(7.0)
        }))]);
        assert_eq!(reduce_with("seven()*2", functions), Ok(14.0));
    }

    #[test]
    fn test_empty_argument_fragments_are_dropped() {
        assert_eq!(reduce("max(1,,3,)"), Ok(3.0));
    }

    #[test]
    fn test_call_after_group_in_arguments() {
        assert_eq!(reduce("max((1),(2+3))"), Ok(5.0));
        assert_eq!(reduce("sqrt((16))"), Ok(4.0));
    }

    #[test]
    fn test_groups() {
        assert_eq!(reduce("((2+3)*4)"), Ok(20.0));
        assert_eq!(reduce("-(2+3)"), Ok(-5.0));
        assert_eq!(reduce("2*(-3)"), Ok(-6.0));
        assert_eq!(reduce("5-(-3)"), Ok(8.0));
        assert_eq!(reduce("-(-3)"), Ok(3.0));
    }

    #[test]
    fn test_juxtaposed_groups_are_incomplete() {
        assert_eq!(reduce("2(3)"), Err(Error::IncompleteEvaluation("2(3)".to_string())));
        assert_eq!(
            reduce("(1)(2)"),
            Err(Error::IncompleteEvaluation("(1)(2)".to_string()))
        );
        assert_eq!(reduce("(2)3"), Err(Error::IncompleteEvaluation("(2)3".to_string())));
    }

    #[test]
    fn test_juxtaposed_calls_are_incomplete() {
        assert_eq!(
            reduce("max(1)2"),
            Err(Error::IncompleteEvaluation("max(1)2".to_string()))
        );
        assert_eq!(
            reduce("pow(2,3)4"),
            Err(Error::IncompleteEvaluation("pow(2,3)4".to_string()))
        );
        assert_eq!(
            reduce("max(1).5"),
            Err(Error::IncompleteEvaluation("max(1).5".to_string()))
        );
        assert_eq!(
            reduce("max(1)(2)"),
            Err(Error::IncompleteEvaluation("max(1)(2)".to_string()))
        );
        assert_eq!(reduce("max(1)*2"), Ok(2.0));
    }

    #[test]
    fn test_unbalanced_parentheses_are_incomplete() {
        assert_eq!(
            reduce("(1+2"),
            Err(Error::IncompleteEvaluation("(1+2".to_string()))
        );
        assert_eq!(reduce("1+2)"), Err(Error::IncompleteEvaluation("3)".to_string())));
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(
            reduce("nope(1)"),
            Err(Error::UnknownFunction("nope".to_string()))
        );
    }

    #[test]
    fn test_function_failure_is_wrapped() {
        assert_eq!(
            reduce("sqrt(1,2)"),
            Err(Error::Evaluation(EvaluationError::Function {
                name: "sqrt".to_string(),
                message: "sqrt() takes exactly 1 argument (2 given)".to_string(),
            }))
        );
    }

    #[test]
    fn test_non_finite_return_is_rejected() {
        let functions = Functions::from([("boom".to_string(), function(|_| Ok(f64::INFINITY)))]);
        assert_eq!(
            reduce_with("boom()", functions),
            Err(Error::Evaluation(EvaluationError::NonFiniteReturn {
                name: "boom".to_string(),
                value: f64::INFINITY,
            }))
        );
    }

    #[test]
    fn test_comma_outside_call_is_incomplete() {
        assert!(matches!(reduce("(1,2)"), Err(Error::IncompleteEvaluation(_))));
        assert!(matches!(reduce("()"), Err(Error::IncompleteEvaluation(_))));
    }
}
