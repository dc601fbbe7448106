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

//! Lexical data for equation lines with precise source spans.
//!
//! The tokenizer produces [`Token`]s first. The compiler then consumes them to
//! build postfix node sequences.

use nom_locate::LocatedSpan;
use std::fmt;

/// Parser input span type carrying byte offsets and line/column info.
pub type Span<'a> = LocatedSpan<&'a str>;

/// Source range and anchor position for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpan {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based UTF-8 column.
    pub column: usize,
}

impl SourceSpan {
    /// Creates a source span from parser start/end positions.
    pub fn from_bounds(start: Span<'_>, end: Span<'_>) -> Self {
        Self {
            start: start.location_offset(),
            end: end.location_offset(),
            line: start.location_line() as usize,
            column: start.get_utf8_column(),
        }
    }

    /// Returns span length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Token categories produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Numeric literal, with any unary sign already folded in.
    Number(f64),
    /// Name of a parameter, equation, or constant.
    Identifier(String),
    /// The `=` separating a signature from its body.
    EqualSign,
    /// Binary operator (`+ - * / ^`).
    Operator(char),
    /// Argument/parameter separator.
    Comma,
    /// `(` directly after an identifier.
    ParamListStart,
    /// `)` closing a parameter list.
    ParamListEnd,
    /// Grouping bracket: `(`, `[`, or `{`.
    GroupStart(char),
    /// Closing grouping bracket: `)`, `]`, or `}`.
    GroupEnd(char),
}

/// One token with its location in the source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token payload.
    pub kind: TokenKind,
    /// Source location for diagnostics.
    pub span: SourceSpan,
}

impl Token {
    /// Returns the identifier text when this is an identifier token.
    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Returns whether this token ends the current sub-expression.
    pub(crate) fn is_terminator(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::EqualSign | TokenKind::ParamListEnd | TokenKind::Comma
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(value) => write!(f, "{value}"),
            TokenKind::Identifier(name) => write!(f, "{name}"),
            TokenKind::EqualSign => write!(f, "="),
            TokenKind::Operator(op) => write!(f, "{op}"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::ParamListStart => write!(f, "("),
            TokenKind::ParamListEnd => write!(f, ")"),
            TokenKind::GroupStart(c) | TokenKind::GroupEnd(c) => write!(f, "{c}"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            TokenKind::Number(_) => "Number",
            TokenKind::Identifier(_) => "Identifier",
            TokenKind::EqualSign => "EqualSign",
            TokenKind::Operator(_) => "Operator",
            TokenKind::Comma => "Comma",
            TokenKind::ParamListStart => "ParamListStart",
            TokenKind::ParamListEnd => "ParamListEnd",
            TokenKind::GroupStart(_) => "GroupStart",
            TokenKind::GroupEnd(_) => "GroupEnd",
        };
        write!(f, "{label:<15}: {}", self.kind)
    }
}
