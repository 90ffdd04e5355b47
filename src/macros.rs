//! Helper macros for the lexer.
//!
//! `MK_TOKEN!` builds a `Token` and `MK_DEFAULT_HANDLER!` builds a handler
//! for fixed-literal patterns (punctuation and operators), which keeps the
//! pattern table in the lexer readable.

/// Creates a Token instance.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a lexer handler for a fixed-literal token.
///
/// The generated handler pushes a token of the given kind and advances the
/// lexer by the literal's length.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("&&").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: Regex| {
            lexer.push(MK_TOKEN!(
                $kind,
                String::from($value),
                Span {
                    start: Position(lexer.pos as u32, Rc::clone(&lexer.file)),
                    end: Position(
                        (lexer.pos + $value.len() as i32) as u32,
                        Rc::clone(&lexer.file)
                    )
                }
            ));
            lexer.advance_n($value.len().try_into().unwrap());
        }
    };
}
