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

//! Call resolution: binds call names to stored equations.

use super::{Equation, EquationId};

/// Binds every call in `equation`, including calls nested inside argument
/// equations, using `lookup`.
///
/// Unknown names stay unbound and are appended to `unresolved`; they only
/// surface as evaluation failures.
pub(crate) fn resolve_equation<F>(equation: &mut Equation, lookup: &F, unresolved: &mut Vec<String>)
where
    F: Fn(&str) -> Option<EquationId>,
{
    for call in equation.calls_mut() {
        call.target = lookup(&call.name);
        if call.target.is_none() {
            unresolved.push(call.name.clone());
        }
        for arg in &mut call.args {
            resolve_equation(arg, lookup, unresolved);
        }
    }
}
