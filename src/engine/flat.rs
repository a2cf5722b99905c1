use crate::engine::{render, Session};
use crate::error::{Error, Result};
use crate::lexer::Lexer;
use crate::operator::{Operator, Tier};
use crate::trace::Step;

/// One `literal operator literal` occurrence in flat text.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Operation {
    start: usize,
    end: usize,
    lhs: f64,
    operator: Operator,
    rhs: f64,
}

/// Reads `text` as `literal (operator literal)*` from the start and returns
/// every adjacent pair, stopping at the first thing that does not fit.
///
/// A sign right after a literal is the binary operator; signs right after an
/// operator belong to the next literal. That is what keeps `1--2` as
/// `1 - (-2)` and `5-2**2` as `5 - (2**2)`.
fn operations(text: &str) -> Vec<Operation> {
    let mut found = Vec::new();
    let Some((literal, mut lhs)) = Lexer::literal_at(text) else {
        return found;
    };

    let mut start = 0;
    let mut pos = literal.len();
    while let Some((operator, op_len)) = Lexer::operator_at(&text[pos..]) {
        let rhs_start = pos + op_len;
        let Some((literal, rhs)) = Lexer::literal_at(&text[rhs_start..]) else {
            break;
        };
        let end = rhs_start + literal.len();
        found.push(Operation {
            start,
            end,
            lhs,
            operator,
            rhs,
        });
        start = rhs_start;
        lhs = rhs;
        pos = end;
    }

    found
}

impl Session<'_> {
    /// Evaluates text holding only literals and operators, one precedence
    /// tier at a time. Exponents go right to left, everything else left to
    /// right.
    pub(crate) fn reduce_flat(&self, mut text: String) -> Result<f64> {
        for tier in [Tier::Exponent, Tier::Multiplicative, Tier::Additive] {
            loop {
                let mut candidates = operations(&text)
                    .into_iter()
                    .filter(|operation| operation.operator.tier() == tier);
                let next = match tier {
                    Tier::Exponent => candidates.last(),
                    _ => candidates.next(),
                };
                let Some(operation) = next else {
                    break;
                };

                let result = operation.operator.apply(operation.lhs, operation.rhs)?;
                text.replace_range(operation.start..operation.end, &render(result));
                self.record(Step::Applied {
                    lhs: operation.lhs,
                    operator: operation.operator,
                    rhs: operation.rhs,
                    result,
                    text: &text,
                });
            }
        }

        match Lexer::parse_number(&text) {
            Some(value) => Ok(value),
            None => Err(Error::IncompleteEvaluation(text)),
        }
    }
}
