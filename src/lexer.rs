use crate::operator::Operator;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub(crate) struct Lexer;

impl Lexer {
    /// Length in bytes of the token `rule` matches at the start of `text`.
    fn match_len(rule: Rule, text: &str) -> Option<usize> {
        Lexer::parse(rule, text)
            .ok()?
            .next()
            .map(|pair| pair.as_str().len())
    }

    /// The identifier at the start of `text`, if any.
    pub(crate) fn identifier_at(text: &str) -> Option<&str> {
        Self::match_len(Rule::identifier, text).map(|len| &text[..len])
    }

    /// The signed numeric literal at the start of `text`, with its value.
    pub(crate) fn literal_at(text: &str) -> Option<(&str, f64)> {
        let len = Self::match_len(Rule::literal, text)?;
        let literal = &text[..len];
        literal_value(literal).map(|value| (literal, value))
    }

    /// The operator at the start of `text`, if any.
    pub(crate) fn operator_at(text: &str) -> Option<(Operator, usize)> {
        let len = Self::match_len(Rule::operator, text)?;
        Operator::try_from(&text[..len]).ok().map(|op| (op, len))
    }

    /// Parses `text` as exactly one numeric literal.
    pub(crate) fn parse_number(text: &str) -> Option<f64> {
        Lexer::parse(Rule::number, text).ok()?;
        literal_value(text)
    }

    /// True when `text` as a whole is identifier syntax.
    pub(crate) fn is_identifier(text: &str) -> bool {
        Self::identifier_at(text).is_some_and(|ident| ident.len() == text.len())
    }
}

/// Value of a literal matched by the grammar, folding its sign run.
fn literal_value(literal: &str) -> Option<f64> {
    let digits = literal.trim_start_matches(|c: char| c == '+' || c == '-');
    let signs = &literal[..literal.len() - digits.len()];
    let magnitude = digits.parse::<f64>().ok()?;
    if signs.matches('-').count() % 2 == 1 {
        Some(-magnitude)
    } else {
        Some(magnitude)
    }
}

/// Characters that can continue a word: identifiers and the digit runs of
/// literals.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
