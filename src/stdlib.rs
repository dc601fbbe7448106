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

//! Built-in equations installed into every [`Context`](crate::Context).
//!
//! The unary functions are one-parameter equations wrapping an operator
//! node, so user code calls them exactly like its own equations.

use crate::model::{Equation, Node, Operator};

/// Names of the built-in equations, in installation order.
pub const BUILTIN_NAMES: [&str; 7] = ["sin", "cos", "tan", "sqrt", "exp", "pi", "e"];

const UNARY_FUNCTIONS: [(&str, Operator); 5] = [
    ("sin", Operator::Sin),
    ("cos", Operator::Cos),
    ("tan", Operator::Tan),
    ("sqrt", Operator::Sqrt),
    ("exp", Operator::Exp),
];

const CONSTANTS: [(&str, f64); 2] = [("pi", std::f64::consts::PI), ("e", std::f64::consts::E)];

/// Builds the built-in equations paired with their display labels.
pub(crate) fn builtin_equations() -> Vec<(Equation, String)> {
    let mut builtins = Vec::with_capacity(BUILTIN_NAMES.len());

    for (name, op) in UNARY_FUNCTIONS {
        let mut equation = Equation::new(name, vec!["value".to_string()]);
        equation.push_node(Node::Param {
            index: 0,
            implicit: false,
        });
        equation.push_node(Node::Operator(op));
        builtins.push((equation, format!("Inbuilt: {name}(x)")));
    }

    for (name, value) in CONSTANTS {
        let mut equation = Equation::new(name, Vec::new());
        equation.push_node(Node::Literal(value));
        builtins.push((equation, format!("Inbuilt: {name}")));
    }

    builtins
}
