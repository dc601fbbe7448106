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

//! Compilation of tokenized equation lines into postfix [`Equation`]s.
//!
//! A line is `[name ['(' param (',' param)* ')'] '='] expression`. The
//! signature parser consumes everything up to `=`; the expression compiler
//! turns the rest into postfix nodes, recursing into call arguments.

mod context;
mod expr;
mod signature;

use crate::CompileError;
use crate::ast::{SourceSpan, Token, TokenKind};
use crate::context::ContextConfig;
use crate::model::{Call, Equation, IMPLICIT_NAMES, Node, Operator};
use crate::parser::tokenize;
use std::collections::HashMap;

use self::context::CompileContext;
use self::signature::parse_signature;

/// Explicit parameter names mapped to their signature positions.
pub(crate) type ParamMap = HashMap<String, usize>;

/// Tokenizes and compiles one equation line.
///
/// The returned equation is unresolved: its calls are not bound and its
/// arity/validity are not yet derived.
pub(crate) fn compile_line(line: &str, config: &ContextConfig) -> Result<Equation, CompileError> {
    let tokens = tokenize(line)?;
    let ctx = CompileContext::new(line, &tokens, config);

    let signature = parse_signature(&ctx)?;
    // An anonymous line still needs at least one token to compile.
    ctx.token(signature.body_start)?;

    let mut equation = Equation::new(signature.name, signature.params);
    let end = ctx.compile_into(&signature.param_map, signature.body_start, &mut equation)?;
    if let Some(extra) = tokens.get(end) {
        return Err(ctx.error_at(
            format!("Unexpected '{}' after expression", extra.kind),
            &extra.span,
        ));
    }

    tracing::trace!(
        name = equation.name(),
        postfix = %equation,
        "compiled equation"
    );
    Ok(equation)
}

/// Classifies `x`, `y`, `z` (any case) as implicit coordinates.
pub(super) fn implicit_index(name: &str) -> Option<usize> {
    IMPLICIT_NAMES
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(line: &str) -> Result<Equation, CompileError> {
        compile_line(line, &ContextConfig::default())
    }

    fn postfix(line: &str) -> String {
        compile(line).expect("compile should succeed").to_string()
    }

    #[test]
    fn precedence_orders_postfix() {
        assert_eq!(postfix("2+3*4"), "2 3 4 * +");
        assert_eq!(postfix("(2+3)*4"), "2 3 + 4 *");
        assert_eq!(postfix("2*3+4"), "2 3 * 4 +");
        assert_eq!(postfix("x^2/y"), "x 2 ^ y /");
    }

    #[test]
    fn operators_are_left_associative() {
        assert_eq!(postfix("8-4-2"), "8 4 - 2 -");
        assert_eq!(postfix("2^3^2"), "2 3 ^ 2 ^");
    }

    #[test]
    fn all_bracket_kinds_group() {
        assert_eq!(postfix("[x+1]*{y-1}"), "x 1 + y 1 - *");
    }

    #[test]
    fn signature_parameters_become_explicit_refs() {
        let eq = compile("f(a, b) = a * x + b").expect("compile should succeed");
        assert_eq!(eq.name(), "f");
        assert_eq!(eq.params(), ["a".to_string(), "b".to_string()]);
        assert_eq!(eq.to_string(), "$0 x * $1 +");
    }

    #[test]
    fn implicit_names_are_case_insensitive() {
        assert_eq!(postfix("X + Y * Z"), "x y z * +");
    }

    #[test]
    fn unknown_names_become_zero_argument_calls() {
        let eq = compile("a = b + pi").expect("compile should succeed");
        assert_eq!(eq.to_string(), "b pi +");
        let names: Vec<&str> = eq.calls().map(Call::name).collect();
        assert_eq!(names, vec!["b", "pi"]);
        assert!(eq.calls().all(|call| call.args().is_empty() && call.target().is_none()));
    }

    #[test]
    fn call_arguments_compile_as_nested_equations() {
        let eq = compile("g(a) = h(a + 1, sin(x)) * 2").expect("compile should succeed");
        assert_eq!(eq.to_string(), "h($0 1 +, sin(x)) 2 *");
        let call = eq.calls().next().expect("call node");
        assert_eq!(call.args().len(), 2);
        assert_eq!(call.args()[0].name(), "");
        assert_eq!(call.args()[0].to_string(), "$0 1 +");
    }

    #[test]
    fn empty_argument_list_is_a_call_without_args() {
        let eq = compile("k = f() + 1").expect("compile should succeed");
        assert_eq!(eq.to_string(), "f 1 +");
    }

    #[test]
    fn constant_signature_has_no_params() {
        let eq = compile("c = 3").expect("compile should succeed");
        assert_eq!(eq.name(), "c");
        assert!(eq.params().is_empty());
        assert_eq!(eq.to_string(), "3");
    }

    #[test]
    fn anonymous_line_has_empty_name() {
        let eq = compile("sin(x) * y").expect("compile should succeed");
        assert_eq!(eq.name(), "");
        assert_eq!(eq.to_string(), "sin(x) y *");
    }

    #[test]
    fn rejects_multiple_equal_signs() {
        let err = compile("a = b = 1").expect_err("compile should fail");
        assert!(err.message.contains("Multiple equal signs"), "{}", err.message);
    }

    #[test]
    fn rejects_reserved_parameter_names() {
        for line in ["f(x) = 1", "f(a, y) = a", "f(Z) = 2"] {
            let err = compile(line).expect_err("compile should fail");
            assert!(err.message.contains("reserved"), "{line}: {}", err.message);
        }
    }

    #[test]
    fn rejects_malformed_signatures() {
        let cases = [
            ("2 = x", "Expected equation name"),
            ("f + 1 = x", "Expected parameters"),
            ("f(a b) = a", "Expected ',' or ')'"),
            ("f(1) = 2", "Expected parameter name"),
            ("f(a) x = a", "Expected '='"),
            ("f(a, a) = a", "Duplicate parameter"),
            ("f(a,) = a", "Expected parameter name"),
            ("f =", "Expected more tokens"),
        ];
        for (line, expected) in cases {
            let err = compile(line).expect_err("compile should fail");
            assert!(
                err.message.contains(expected),
                "{line}: expected '{expected}', got '{}'",
                err.message
            );
            assert!(err.column > 0, "{line}: missing column");
        }
    }

    #[test]
    fn rejects_trailing_tokens() {
        let err = compile("x, y").expect_err("compile should fail");
        assert!(err.message.contains("Unexpected ','"), "{}", err.message);
        assert_eq!(err.column, 2);
    }

    #[test]
    fn rejects_call_argument_followed_by_equal_sign() {
        let err = compile("f(a = 1)").expect_err("compile should fail");
        assert!(err.message.contains("Expected ',' or ')'"), "{}", err.message);
    }

    #[test]
    fn rejects_whitespace_only_line() {
        let err = compile("   ").expect_err("compile should fail");
        assert!(err.message.contains("Expected more tokens"), "{}", err.message);
    }

    #[test]
    fn node_limit_is_enforced_per_equation() {
        let config = ContextConfig::default().with_max_nodes(4);
        assert!(compile_line("1+2+3", &config).is_err());
        let err = compile_line("1+2+3", &config).expect_err("too many nodes");
        assert!(err.message.contains("maximum of 4 nodes"), "{}", err.message);
        assert!(compile_line("1+2", &config).is_ok());
        // Argument equations are bounded separately from their caller.
        assert!(compile_line("f(1+2, 3+4)", &config).is_ok());
    }

    #[test]
    fn rejects_malformed_operand_sequences() {
        let cases = [
            ("a = b +", "missing an operand"),
            ("* 2", "missing an operand"),
            ("2 3", "Missing operator"),
            ("f(, 1)", "Expected an expression"),
            ("()", "Expected an expression"),
        ];
        for (line, expected) in cases {
            let err = compile(line).expect_err("compile should fail");
            assert!(
                err.message.contains(expected),
                "{line}: expected '{expected}', got '{}'",
                err.message
            );
        }
    }

    #[test]
    fn lexical_errors_propagate() {
        let err = compile("sin(x").expect_err("compile should fail");
        assert!(err.message.contains("Bracket mismatch"), "{}", err.message);
    }
}
