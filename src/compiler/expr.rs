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

//! Infix-to-postfix compilation (shunting-yard) with nested call arguments.

use super::*;

/// Entry on the pending-operator stack.
#[derive(Debug, Clone)]
enum Pending {
    Group,
    Operator(Operator, SourceSpan),
}

/// Postfix output for one (sub-)equation plus the number of values it
/// would leave on the evaluation stack so far.
struct Output<'e> {
    equation: &'e mut Equation,
    depth: usize,
}

impl CompileContext<'_> {
    /// Compiles the sub-expression starting at `start` into a fresh anonymous
    /// equation. Returns it with the index of the first unconsumed token.
    pub(super) fn compile_equation(
        &self,
        params: &ParamMap,
        start: usize,
    ) -> Result<(Equation, usize), CompileError> {
        let mut equation = Equation::anonymous();
        let end = self.compile_into(params, start, &mut equation)?;
        Ok((equation, end))
    }

    /// Appends the postfix form of the sub-expression starting at `start`.
    ///
    /// Scanning stops before `=`, `,` or a parameter-list `)`, leaving that
    /// token for the caller. Returns the index of the first unconsumed token.
    pub(super) fn compile_into(
        &self,
        params: &ParamMap,
        start: usize,
        equation: &mut Equation,
    ) -> Result<usize, CompileError> {
        let mut out = Output { equation, depth: 0 };
        // A synthetic outer group guarantees the final flush empties the stack.
        let mut stack = vec![Pending::Group];
        let mut index = start;

        while let Some(token) = self.tokens.get(index) {
            if token.is_terminator() {
                break;
            }
            match &token.kind {
                TokenKind::GroupStart(_) => {
                    stack.push(Pending::Group);
                    index += 1;
                }
                TokenKind::GroupEnd(_) => {
                    self.close_group(&mut stack, &mut out, &token.span)?;
                    index += 1;
                }
                TokenKind::Operator(symbol) => {
                    let Some(op) = Operator::from_symbol(*symbol) else {
                        return Err(
                            self.error_at(format!("Unknown operator '{symbol}'"), &token.span)
                        );
                    };
                    // Left-associative: flush pending operators that bind at
                    // least as tightly before pushing this one.
                    while let Some(Pending::Operator(top, _)) = stack.last() {
                        if top.precedence() < op.precedence() {
                            break;
                        }
                        if let Some(Pending::Operator(top, span)) = stack.pop() {
                            self.push(&mut out, Node::Operator(top), &span)?;
                        }
                    }
                    stack.push(Pending::Operator(op, token.span.clone()));
                    index += 1;
                }
                TokenKind::Number(value) => {
                    self.push(&mut out, Node::Literal(*value), &token.span)?;
                    index += 1;
                }
                TokenKind::Identifier(name) => {
                    index = self.compile_reference(params, name, index, &mut out)?;
                }
                TokenKind::ParamListStart
                | TokenKind::ParamListEnd
                | TokenKind::EqualSign
                | TokenKind::Comma => {
                    return Err(self.error_at(
                        format!("Unexpected '{}' in expression", token.kind),
                        &token.span,
                    ));
                }
            }
        }

        let end_span = match self.tokens.get(index).or_else(|| self.tokens.last()) {
            Some(token) => token.span.clone(),
            None => return Err(self.error_at_end("Expected more tokens")),
        };
        self.close_group(&mut stack, &mut out, &end_span)?;
        if !stack.is_empty() {
            return Err(self.error_at("Bracket mismatch: group is never closed", &end_span));
        }
        match out.depth {
            1 => Ok(index),
            0 => Err(self.error_at("Expected an expression", &end_span)),
            _ => Err(self.error_at("Missing operator between operands", &end_span)),
        }
    }

    /// Emits a node, tracking how many values evaluation would leave.
    fn push(&self, out: &mut Output<'_>, node: Node, span: &SourceSpan) -> Result<(), CompileError> {
        if let Node::Operator(op) = &node {
            if out.depth < op.arity() {
                return Err(self.error_at(format!("Operator '{op}' is missing an operand"), span));
            }
            out.depth -= op.arity();
        }
        out.depth += 1;
        self.emit(out.equation, node, span)
    }

    /// Emits pending operators up to and including the nearest group marker.
    fn close_group(
        &self,
        stack: &mut Vec<Pending>,
        out: &mut Output<'_>,
        span: &SourceSpan,
    ) -> Result<(), CompileError> {
        loop {
            match stack.pop() {
                Some(Pending::Group) => return Ok(()),
                Some(Pending::Operator(op, op_span)) => {
                    self.push(out, Node::Operator(op), &op_span)?
                }
                None => return Err(self.error_at("Unbalanced closing bracket", span)),
            }
        }
    }

    /// Compiles an identifier at `index`: a call with arguments, an implicit
    /// coordinate, an explicit parameter, or a reference to another equation.
    fn compile_reference(
        &self,
        params: &ParamMap,
        name: &str,
        index: usize,
        out: &mut Output<'_>,
    ) -> Result<usize, CompileError> {
        let span = &self.tokens[index].span;
        let opens_call = matches!(
            self.tokens.get(index + 1).map(|token| &token.kind),
            Some(TokenKind::ParamListStart)
        );

        if !opens_call {
            let node = if let Some(coordinate) = implicit_index(name) {
                Node::Param {
                    index: coordinate,
                    implicit: true,
                }
            } else if let Some(position) = params.get(name) {
                Node::Param {
                    index: *position,
                    implicit: false,
                }
            } else {
                // Another equation or constant, bound by the resolver later.
                Node::Call(Call::new(name, Vec::new()))
            };
            self.push(out, node, span)?;
            return Ok(index + 1);
        }

        let mut args = Vec::new();
        let mut cursor = index + 2;
        while self.token(cursor)?.kind != TokenKind::ParamListEnd {
            let (arg, next) = self.compile_equation(params, cursor)?;
            cursor = next;

            let separator = self.token(cursor)?;
            match separator.kind {
                TokenKind::Comma => cursor += 1,
                TokenKind::ParamListEnd => {}
                _ => {
                    return Err(self.error_at(
                        "Expected ',' or ')' after call argument",
                        &separator.span,
                    ));
                }
            }
            args.push(arg);
        }

        self.push(out, Node::Call(Call::new(name, args)), span)?;
        Ok(cursor + 1)
    }
}
