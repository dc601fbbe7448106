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

//! Error types surfaced by context and evaluation APIs.

use crate::CompileError;

use super::Operator;

/// Reasons a stored equation failed to evaluate.
///
/// These are expected outcomes (an unknown name, a call with the wrong
/// number of arguments) and are reported through `Result`, never by panicking.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The equation reads an implicit coordinate the caller did not supply.
    #[error("implicit parameter {index} is not available ({available} supplied)")]
    MissingImplicit {
        /// Requested coordinate index (0 = x, 1 = y, 2 = z).
        index: usize,
        /// Number of coordinates supplied.
        available: usize,
    },

    /// The equation reads an explicit parameter the caller did not supply.
    #[error("explicit parameter {index} is not available ({available} supplied)")]
    MissingExplicit {
        /// Requested signature position.
        index: usize,
        /// Number of explicit values supplied.
        available: usize,
    },

    /// An operator found fewer operands than it consumes.
    #[error("operator '{operator}' needs {needed} operands, found {available}")]
    StackUnderflow {
        /// Operator being applied.
        operator: Operator,
        /// Operands it consumes.
        needed: usize,
        /// Operands available on the stack.
        available: usize,
    },

    /// A call names no stored equation.
    #[error("'{name}' does not name a known equation")]
    Unresolved {
        /// Called name.
        name: String,
    },

    /// A call supplies a different number of arguments than the callee declares.
    #[error("'{name}' expects {expected} arguments, found {found}")]
    ArityMismatch {
        /// Called name.
        name: String,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        found: usize,
    },

    /// Nested calls went deeper than the configured limit.
    #[error("call depth limit of {limit} exceeded while calling '{name}'")]
    CallDepthExceeded {
        /// Call that crossed the limit.
        name: String,
        /// Configured limit.
        limit: usize,
    },

    /// The postfix sequence did not reduce to exactly one value.
    #[error("evaluation left {remaining} values on the stack, expected exactly one")]
    UnbalancedStack {
        /// Values left after the last node.
        remaining: usize,
    },
}

/// Errors produced while adding or loading equations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ContextError {
    /// The equation line failed to tokenize or compile.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The context already stores its maximum number of equations.
    #[error("context is full: at most {limit} equations can be stored")]
    CapacityExceeded {
        /// Configured equation limit, built-ins included.
        limit: usize,
    },

    /// The injected source loader failed.
    #[error("failed to load '{path}': {message}")]
    Load {
        /// Requested source path.
        path: String,
        /// Loader-provided failure message.
        message: String,
    },
}

impl ContextError {
    /// Returns the compile diagnostic when this is a parse failure.
    pub fn compile_error(&self) -> Option<&CompileError> {
        match self {
            ContextError::Compile(err) => Some(err),
            _ => None,
        }
    }

    /// Re-anchors a compile diagnostic to a line of a multi-line source.
    pub(crate) fn relocate(self, file: &str, line: usize) -> Self {
        match self {
            ContextError::Compile(err) => ContextError::Compile(err.relocate(file, line)),
            other => other,
        }
    }
}
