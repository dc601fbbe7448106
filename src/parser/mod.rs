/*
MIT License

Copyright (c) 2026 Raja Lehtihet and Wael El Oraiby

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! `nom`-based tokenizer for equation lines.
//!
//! Lexemes:
//! - numeric literals (`2`, `.5`, `1e-3`), with a leading `+`/`-` folded in
//!   when the sign cannot be a binary operator
//! - identifiers (`[A-Za-z_][A-Za-z0-9_]*`)
//! - operators `+ - * / ^`, `,`, `=`
//! - brackets: `(` right after an identifier opens a parameter list, any other
//!   `(`, `[`, `{` opens a group
//!
//! Comment and blank lines are filtered by the loader before reaching here.

mod tokens;
mod utils;

use crate::ast::{Span, Token};
use crate::diagnostics::CompileError;
use nom::{IResult, error::VerboseError};

use self::tokens::Tokenizer;

type PResult<'a, O> = IResult<Span<'a>, O, VerboseError<Span<'a>>>;

/// Splits one equation line into tokens.
pub fn tokenize(line: &str) -> Result<Vec<Token>, CompileError> {
    if line.is_empty() {
        return Err(CompileError::message_only("Equation was an empty string"));
    }
    let tokens = Tokenizer::new(line).run()?;
    if tracing::enabled!(tracing::Level::TRACE) {
        for token in &tokens {
            tracing::trace!(%token, "token");
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TokenKind;

    fn kinds(line: &str) -> Vec<TokenKind> {
        tokenize(line)
            .expect("tokenize should succeed")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn splits_simple_arithmetic() {
        assert_eq!(
            kinds("2+3*4"),
            vec![
                TokenKind::Number(2.0),
                TokenKind::Operator('+'),
                TokenKind::Number(3.0),
                TokenKind::Operator('*'),
                TokenKind::Number(4.0),
            ]
        );
    }

    #[test]
    fn paren_after_identifier_opens_parameter_list() {
        assert_eq!(
            kinds("f(a, b) = (a)"),
            vec![
                TokenKind::Identifier("f".into()),
                TokenKind::ParamListStart,
                TokenKind::Identifier("a".into()),
                TokenKind::Comma,
                TokenKind::Identifier("b".into()),
                TokenKind::ParamListEnd,
                TokenKind::EqualSign,
                TokenKind::GroupStart('('),
                TokenKind::Identifier("a".into()),
                TokenKind::GroupEnd(')'),
            ]
        );
    }

    #[test]
    fn closing_paren_matches_innermost_bracket() {
        assert_eq!(
            kinds("(sin((x)))"),
            vec![
                TokenKind::GroupStart('('),
                TokenKind::Identifier("sin".into()),
                TokenKind::ParamListStart,
                TokenKind::GroupStart('('),
                TokenKind::Identifier("x".into()),
                TokenKind::GroupEnd(')'),
                TokenKind::ParamListEnd,
                TokenKind::GroupEnd(')'),
            ]
        );
    }

    #[test]
    fn square_and_curly_brackets_are_groups() {
        assert_eq!(
            kinds("[x]*{y}"),
            vec![
                TokenKind::GroupStart('['),
                TokenKind::Identifier("x".into()),
                TokenKind::GroupEnd(']'),
                TokenKind::Operator('*'),
                TokenKind::GroupStart('{'),
                TokenKind::Identifier("y".into()),
                TokenKind::GroupEnd('}'),
            ]
        );
    }

    #[test]
    fn leading_sign_folds_into_number() {
        assert_eq!(kinds("-2"), vec![TokenKind::Number(-2.0)]);
        assert_eq!(
            kinds("x*-2.5"),
            vec![
                TokenKind::Identifier("x".into()),
                TokenKind::Operator('*'),
                TokenKind::Number(-2.5),
            ]
        );
        assert_eq!(
            kinds("f(+1,-1)"),
            vec![
                TokenKind::Identifier("f".into()),
                TokenKind::ParamListStart,
                TokenKind::Number(1.0),
                TokenKind::Comma,
                TokenKind::Number(-1.0),
                TokenKind::ParamListEnd,
            ]
        );
    }

    #[test]
    fn sign_after_operand_is_binary() {
        assert_eq!(
            kinds("x -2"),
            vec![
                TokenKind::Identifier("x".into()),
                TokenKind::Operator('-'),
                TokenKind::Number(2.0),
            ]
        );
    }

    #[test]
    fn numbers_accept_fraction_and_exponent_forms() {
        assert_eq!(
            kinds(".5 + 1e-3"),
            vec![
                TokenKind::Number(0.5),
                TokenKind::Operator('+'),
                TokenKind::Number(0.001),
            ]
        );
    }

    #[test]
    fn identifiers_allow_underscores_and_digits() {
        assert_eq!(
            kinds("_a1 + b_2"),
            vec![
                TokenKind::Identifier("_a1".into()),
                TokenKind::Operator('+'),
                TokenKind::Identifier("b_2".into()),
            ]
        );
    }

    #[test]
    fn unclosed_parameter_list_is_bracket_mismatch() {
        let err = tokenize("sin(x").expect_err("tokenize should fail");
        assert!(err.message.contains("Bracket mismatch"), "{}", err.message);
        assert_eq!(err.column, 4);
        assert_eq!(err.snippet, "sin(x");
    }

    #[test]
    fn extra_closing_bracket_is_rejected() {
        let err = tokenize("x)").expect_err("tokenize should fail");
        assert!(err.message.contains("closing"), "{}", err.message);
        assert_eq!(err.column, 2);
    }

    #[test]
    fn square_bracket_cannot_close_parameter_list() {
        let err = tokenize("sin(x]").expect_err("tokenize should fail");
        assert!(err.message.contains("Bracket mismatch"), "{}", err.message);
    }

    #[test]
    fn unknown_character_is_rejected() {
        let err = tokenize("x $ y").expect_err("tokenize should fail");
        assert!(err.message.contains("'$'"), "{}", err.message);
        assert_eq!(err.column, 3);
        assert_eq!(err.pointer, "  ^");
    }

    #[test]
    fn malformed_number_is_rejected() {
        let err = tokenize("2 + .").expect_err("tokenize should fail");
        assert!(err.message.contains("number"), "{}", err.message);
        let err = tokenize("-x").expect_err("unary sign needs a number");
        assert!(err.message.contains("number"), "{}", err.message);
    }

    #[test]
    fn empty_line_is_rejected() {
        let err = tokenize("").expect_err("tokenize should fail");
        assert_eq!(err.message, "Equation was an empty string");
    }

    #[test]
    fn whitespace_only_line_has_no_tokens() {
        assert!(kinds("   \t ").is_empty());
    }
}
