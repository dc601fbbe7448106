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

//! Compile context shared by the signature parser and expression compiler.

use super::*;

/// State for compiling one tokenized equation line.
///
/// Holds the source text for diagnostics, the token slice being consumed,
/// and the limits from the owning context's configuration.
pub(super) struct CompileContext<'a> {
    pub(super) source: &'a str,
    pub(super) tokens: &'a [Token],
    pub(super) max_nodes: usize,
}

impl<'a> CompileContext<'a> {
    pub(super) fn new(source: &'a str, tokens: &'a [Token], config: &ContextConfig) -> Self {
        Self {
            source,
            tokens,
            max_nodes: config.max_nodes,
        }
    }

    /// Creates a source-mapped compile error.
    pub(super) fn error_at(&self, message: impl Into<String>, span: &SourceSpan) -> CompileError {
        CompileError::from_span(message, self.source, span)
    }

    /// Creates an error anchored just past the last character of the line.
    pub(super) fn error_at_end(&self, message: impl Into<String>) -> CompileError {
        let end = self.source.len();
        let column = self.source.chars().count() + 1;
        let span = SourceSpan {
            start: end,
            end,
            line: 1,
            column,
        };
        CompileError::from_span(message, self.source, &span)
    }

    /// Returns the token at `index`, or an "Expected more tokens" error.
    pub(super) fn token(&self, index: usize) -> Result<&'a Token, CompileError> {
        self.tokens
            .get(index)
            .ok_or_else(|| self.error_at_end("Expected more tokens"))
    }

    /// Appends `node` to `equation`, enforcing the per-equation node limit.
    pub(super) fn emit(
        &self,
        equation: &mut Equation,
        node: Node,
        span: &SourceSpan,
    ) -> Result<(), CompileError> {
        if equation.nodes().len() >= self.max_nodes {
            return Err(self.error_at(
                format!(
                    "Equation exceeds the maximum of {} nodes",
                    self.max_nodes
                ),
                span,
            ));
        }
        equation.push_node(node);
        Ok(())
    }
}
