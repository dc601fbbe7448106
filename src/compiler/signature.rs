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

//! Signature parsing: the optional `name(params) =` prefix of a line.

use super::*;

/// Parsed equation signature.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct Signature {
    /// Equation name (`""` for anonymous expressions).
    pub(super) name: String,
    /// Declared parameter names, in order.
    pub(super) params: Vec<String>,
    /// Parameter name to signature position.
    pub(super) param_map: ParamMap,
    /// Index of the first body token.
    pub(super) body_start: usize,
}

/// Parses the signature prefix.
///
/// Without `=` the whole line is an anonymous expression. With one `=`, the
/// tokens before it must be `name` or `name '(' [param (',' param)*] ')'`.
pub(super) fn parse_signature(ctx: &CompileContext<'_>) -> Result<Signature, CompileError> {
    let mut equal_signs = ctx
        .tokens
        .iter()
        .filter(|token| token.kind == TokenKind::EqualSign);
    if equal_signs.next().is_none() {
        return Ok(Signature::default());
    }
    if let Some(second) = equal_signs.next() {
        return Err(ctx.error_at("Multiple equal signs", &second.span));
    }

    let mut index = 0;
    let first = ctx.token(index)?;
    let Some(name) = first.identifier() else {
        return Err(ctx.error_at("Expected equation name before '='", &first.span));
    };
    index += 1;

    let mut signature = Signature {
        name: name.to_string(),
        ..Signature::default()
    };

    let next = ctx.token(index)?;
    match next.kind {
        // `name = ...` declares a constant (zero-parameter equation).
        TokenKind::EqualSign => {
            signature.body_start = index + 1;
            return Ok(signature);
        }
        TokenKind::ParamListStart => index += 1,
        _ => {
            return Err(ctx.error_at("Expected parameters after equation name", &next.span));
        }
    }

    while ctx.token(index)?.kind != TokenKind::ParamListEnd {
        let param = ctx.token(index)?;
        let Some(param_name) = param.identifier() else {
            return Err(ctx.error_at("Expected parameter name", &param.span));
        };
        if implicit_index(param_name).is_some() {
            return Err(ctx.error_at(
                format!(
                    "'{param_name}' is reserved for an implicit coordinate and cannot name a parameter"
                ),
                &param.span,
            ));
        }
        if signature.param_map.contains_key(param_name) {
            return Err(ctx.error_at(
                format!("Duplicate parameter '{param_name}'"),
                &param.span,
            ));
        }
        index += 1;

        let separator = ctx.token(index)?;
        match separator.kind {
            TokenKind::Comma => {
                index += 1;
                let after = ctx.token(index)?;
                if after.kind == TokenKind::ParamListEnd {
                    return Err(ctx.error_at("Expected parameter name", &after.span));
                }
            }
            TokenKind::ParamListEnd => {}
            _ => {
                return Err(ctx.error_at(
                    "Expected ',' or ')' after parameter name",
                    &separator.span,
                ));
            }
        }

        let position = signature.params.len();
        signature.param_map.insert(param_name.to_string(), position);
        signature.params.push(param_name.to_string());
    }
    index += 1;

    let equal = ctx.token(index)?;
    if equal.kind != TokenKind::EqualSign {
        return Err(ctx.error_at("Expected '=' after parameter list", &equal.span));
    }
    signature.body_start = index + 1;
    Ok(signature)
}
