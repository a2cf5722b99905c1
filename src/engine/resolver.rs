use crate::engine::{render, Variables};
use crate::error::{Error, Result};
use crate::functions::FunctionTable;
use crate::lexer::{is_word_char, Lexer};

pub(crate) fn strip_whitespace(expression: &str) -> Result<String> {
    let text: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    if text.is_empty() {
        return Err(Error::EmptyExpression);
    }
    Ok(text)
}

/// Replaces every bound variable with its value and checks that every other
/// identifier names a function. Word runs that start with a digit (`2x`,
/// `1e5`) are not identifiers and are copied as they are.
pub(crate) fn resolve_identifiers(
    text: &str,
    variables: &Variables,
    table: &FunctionTable,
) -> Result<String> {
    let mut resolved = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if !is_word_char(c) {
            resolved.push(c);
            rest = &rest[c.len_utf8()..];
            continue;
        }

        let word_len = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
        let (word, tail) = rest.split_at(word_len);
        match Lexer::identifier_at(word) {
            Some(name) => {
                if let Some(value) = variables.get(name) {
                    resolved.push_str(&render(*value));
                } else if table.contains(name) {
                    resolved.push_str(name);
                } else {
                    return Err(Error::UnknownIdentifier(name.to_string()));
                }
            }
            None => resolved.push_str(word),
        }
        rest = tail;
    }

    Ok(resolved)
}
