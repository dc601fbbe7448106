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

//! Line tokenizer driving the lexeme parsers.

use crate::ast::{SourceSpan, Span, Token, TokenKind};
use crate::diagnostics::CompileError;
use nom::character::complete::anychar;
use nom::error::VerboseError;

use super::utils::{identifier, is_ident_start, number, ws0};

/// Kind of bracket currently open while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bracket {
    ParamList,
    Group,
}

/// Single-pass tokenizer over one equation line.
///
/// Open brackets are tracked as a stack so that `)` always closes the
/// innermost bracket, whichever kind it is.
pub(super) struct Tokenizer<'a> {
    source: &'a str,
    input: Span<'a>,
    tokens: Vec<Token>,
    open: Vec<(Bracket, SourceSpan)>,
}

impl<'a> Tokenizer<'a> {
    pub(super) fn new(source: &'a str) -> Self {
        Self {
            source,
            input: Span::new(source),
            tokens: Vec::new(),
            open: Vec::new(),
        }
    }

    pub(super) fn run(mut self) -> Result<Vec<Token>, CompileError> {
        loop {
            if let Ok((rest, ())) = ws0(self.input) {
                self.input = rest;
            }
            let Some(c) = self.input.fragment().chars().next() else {
                break;
            };

            match c {
                '0'..='9' | '.' => self.lex_number()?,
                '+' | '-' if self.sign_is_unary() => self.lex_number()?,
                '+' | '-' | '*' | '/' | '^' => {
                    self.lex_single(TokenKind::Operator(c))?;
                }
                ',' => {
                    self.lex_single(TokenKind::Comma)?;
                }
                '=' => {
                    self.lex_single(TokenKind::EqualSign)?;
                }
                '(' => self.open_paren()?,
                '[' | '{' => {
                    let span = self.lex_single(TokenKind::GroupStart(c))?;
                    self.open.push((Bracket::Group, span));
                }
                ')' => self.close_paren()?,
                ']' | '}' => self.close_group(c)?,
                c if is_ident_start(c) => self.lex_identifier()?,
                other => {
                    let span = self.char_span(other);
                    return Err(self.error_at(format!("Unknown character '{other}'"), &span));
                }
            }
        }

        if let Some((_, span)) = self.open.last() {
            return Err(self.error_at("Bracket mismatch: bracket is never closed", span));
        }
        Ok(self.tokens)
    }

    /// A sign is unary at the start of an expression or after anything that
    /// cannot end an operand.
    fn sign_is_unary(&self) -> bool {
        match self.tokens.last().map(|token| &token.kind) {
            None => true,
            Some(kind) => matches!(
                kind,
                TokenKind::Operator(_)
                    | TokenKind::Comma
                    | TokenKind::ParamListStart
                    | TokenKind::GroupStart(_)
                    | TokenKind::EqualSign
            ),
        }
    }

    fn lex_number(&mut self) -> Result<(), CompileError> {
        let start = self.input;
        match number(start) {
            Ok((rest, value)) => {
                self.push(TokenKind::Number(value), start, rest);
                Ok(())
            }
            Err(_) => {
                let preview: String = start.fragment().chars().take(3).collect();
                let span = SourceSpan {
                    start: start.location_offset(),
                    end: start.location_offset() + preview.len(),
                    line: start.location_line() as usize,
                    column: start.get_utf8_column(),
                };
                Err(self.error_at(format!("Cannot parse number near '{preview}'"), &span))
            }
        }
    }

    fn lex_identifier(&mut self) -> Result<(), CompileError> {
        let start = self.input;
        let (rest, name) = identifier(start).map_err(|_| {
            let span = SourceSpan::from_bounds(start, start);
            self.error_at("Expected identifier", &span)
        })?;
        self.push(TokenKind::Identifier(name), start, rest);
        Ok(())
    }

    fn open_paren(&mut self) -> Result<(), CompileError> {
        let after_identifier = matches!(
            self.tokens.last().map(|token| &token.kind),
            Some(TokenKind::Identifier(_))
        );
        if after_identifier {
            let span = self.lex_single(TokenKind::ParamListStart)?;
            self.open.push((Bracket::ParamList, span));
        } else {
            let span = self.lex_single(TokenKind::GroupStart('('))?;
            self.open.push((Bracket::Group, span));
        }
        Ok(())
    }

    fn close_paren(&mut self) -> Result<(), CompileError> {
        match self.open.last() {
            Some((Bracket::ParamList, _)) => {
                self.lex_single(TokenKind::ParamListEnd)?;
            }
            Some((Bracket::Group, _)) => {
                self.lex_single(TokenKind::GroupEnd(')'))?;
            }
            None => {
                let span = self.char_span(')');
                return Err(self.error_at("Too many closing ')' brackets", &span));
            }
        }
        let _ = self.open.pop();
        Ok(())
    }

    fn close_group(&mut self, c: char) -> Result<(), CompileError> {
        match self.open.last() {
            Some((Bracket::Group, _)) => {
                self.lex_single(TokenKind::GroupEnd(c))?;
                let _ = self.open.pop();
                Ok(())
            }
            Some((Bracket::ParamList, _)) => {
                let span = self.char_span(c);
                Err(self.error_at(
                    format!("Bracket mismatch: '{c}' cannot close a parameter list"),
                    &span,
                ))
            }
            None => {
                let span = self.char_span(c);
                Err(self.error_at(format!("Too many closing '{c}' brackets"), &span))
            }
        }
    }

    /// Consumes one character and records it as a token.
    fn lex_single(&mut self, kind: TokenKind) -> Result<SourceSpan, CompileError> {
        let start = self.input;
        let (rest, _) = anychar::<_, VerboseError<Span<'a>>>(start).map_err(|_| {
            let span = SourceSpan::from_bounds(start, start);
            self.error_at("Unexpected end of input", &span)
        })?;
        Ok(self.push(kind, start, rest))
    }

    fn push(&mut self, kind: TokenKind, start: Span<'a>, rest: Span<'a>) -> SourceSpan {
        let span = SourceSpan::from_bounds(start, rest);
        self.tokens.push(Token {
            kind,
            span: span.clone(),
        });
        self.input = rest;
        span
    }

    /// Span covering the single character `c` at the current position.
    fn char_span(&self, c: char) -> SourceSpan {
        let start = self.input;
        SourceSpan {
            start: start.location_offset(),
            end: start.location_offset() + c.len_utf8(),
            line: start.location_line() as usize,
            column: start.get_utf8_column(),
        }
    }

    fn error_at(&self, message: impl Into<String>, span: &SourceSpan) -> CompileError {
        CompileError::from_span(message, self.source, span)
    }
}
