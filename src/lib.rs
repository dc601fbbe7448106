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

//! Equation language for surface plotting.
//!
//! This crate provides:
//! - A tokenizer for single equation lines (`f(a, b) = sin(a) + b^2`).
//! - A shunting-yard compiler to postfix nodes, with nested call arguments.
//! - A [`Context`] that stores named equations, links references between
//!   them in any declaration order, and derives arity and validity.
//! - A stack evaluator over up to three implicit coordinates (`x`, `y`, `z`)
//!   plus named explicit arguments.
//! - Compile diagnostics with line/column/caret output.
//!
//! # Pipeline
//!
//! 1. Tokenize one line.
//! 2. Parse the optional `name(params) =` signature.
//! 3. Compile the infix body to postfix nodes.
//! 4. After a batch of lines is stored, resolve calls and infer properties.
//! 5. Evaluate through [`EquationRef`].
//!
//! ```
//! use surface_expr::Context;
//!
//! let mut ctx = Context::new();
//! let report = ctx.load_source("demo", "f(a) = a^2 + 1\ng = sin(f(x))");
//! assert!(report.is_clean());
//!
//! let g = ctx.find("g").unwrap();
//! assert_eq!(g.implicit_count(), 1);
//! assert_eq!(g.evaluate(0.0, 0.0), Ok(1.0_f64.sin()));
//! ```

mod ast;
mod compiler;
mod context;
mod diagnostics;
mod model;
mod parser;
mod stdlib;

pub use ast::{SourceSpan, Token, TokenKind};
pub use context::{Context, ContextConfig, EquationRef, LineFailure, LoadReport};
pub use diagnostics::CompileError;
pub use model::{
    Call, ContextError, Equation, EquationId, EvalError, MAX_IMPLICIT_PARAMS, Node, Operator,
};
pub use parser::tokenize;
pub use stdlib::BUILTIN_NAMES;

/// Compiles one line with default limits, without storing it.
///
/// Calls in the returned equation are unbound, so it is not yet valid;
/// add the line to a [`Context`] to link and evaluate it.
///
/// # Errors
///
/// Returns [`CompileError`] with line/column and caret highlight when the
/// line fails to tokenize or compile.
pub fn parse_equation(line: &str) -> Result<Equation, CompileError> {
    compiler::compile_line(line, &ContextConfig::default())
}
