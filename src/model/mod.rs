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

//! Equation data model and the passes that run over it.
//!
//! An [`Equation`] owns a postfix [`Node`] sequence. Call nodes own their
//! argument equations and hold a non-owning [`EquationId`] link to the
//! called equation, bound later by the resolver.
//!
//! After a batch of equations is stored, the owning context runs:
//! 1. [`resolve`]: binds every call to the equation it names.
//! 2. [`properties`]: derives implicit/explicit arity and validity by
//!    simulating evaluation with zero-filled parameters.

mod errors;
mod eval;
pub(crate) mod properties;
pub(crate) mod resolve;

use std::fmt;

pub use errors::{ContextError, EvalError};
pub(crate) use eval::{EquationTable, Evaluator};

/// Highest number of implicit coordinates (`x`, `y`, `z`).
pub const MAX_IMPLICIT_PARAMS: usize = 3;

/// Names of the implicit coordinates, by index.
pub(crate) const IMPLICIT_NAMES: [&str; MAX_IMPLICIT_PARAMS] = ["x", "y", "z"];

/// Stable handle to an equation stored in a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EquationId(pub(crate) usize);

impl EquationId {
    /// Returns the storage index behind this handle.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EquationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arithmetic operators and built-in unary functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`
    Div,
    /// `a ^ b`
    Pow,
    /// `sin(a)`
    Sin,
    /// `cos(a)`
    Cos,
    /// `tan(a)`
    Tan,
    /// `sqrt(a)`
    Sqrt,
    /// `exp(a)`
    Exp,
}

impl Operator {
    /// Maps an operator character to its binary operator.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }

    /// Returns the textual form used in postfix dumps.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "^",
            Operator::Sin => "sin",
            Operator::Cos => "cos",
            Operator::Tan => "tan",
            Operator::Sqrt => "sqrt",
            Operator::Exp => "exp",
        }
    }

    /// Returns whether the operator takes two operands.
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Pow
        )
    }

    /// Number of operands consumed from the stack.
    pub fn arity(self) -> usize {
        if self.is_binary() { 2 } else { 1 }
    }

    /// Binding strength, low to high: `+ -`, `* /`, `^`.
    ///
    /// Unary functions never sit on the compiler's operator stack; they bind
    /// tightest.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 0,
            Operator::Mul | Operator::Div => 1,
            Operator::Pow => 2,
            Operator::Sin | Operator::Cos | Operator::Tan | Operator::Sqrt | Operator::Exp => 3,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Reference from a call node to another equation.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub(crate) name: String,
    pub(crate) args: Vec<Equation>,
    pub(crate) target: Option<EquationId>,
}

impl Call {
    pub(crate) fn new(name: impl Into<String>, args: Vec<Equation>) -> Self {
        Self {
            name: name.into(),
            args,
            target: None,
        }
    }

    /// Name of the called equation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Argument equations, evaluated in the caller's scope.
    pub fn args(&self) -> &[Equation] {
        &self.args
    }

    /// Resolved call target (`None` until resolution, or when unknown).
    pub fn target(&self) -> Option<EquationId> {
        self.target
    }
}

/// One entry of a postfix node sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Numeric constant.
    Literal(f64),
    /// Parameter reference: implicit (`x`, `y`, `z`) or explicit (signature slot).
    Param {
        /// Coordinate index (implicit) or signature position (explicit).
        index: usize,
        /// Whether `index` refers to an implicit coordinate.
        implicit: bool,
    },
    /// Operator applied to values on the stack.
    Operator(Operator),
    /// Call to a named equation.
    Call(Call),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(value) => write!(f, "{value}"),
            Node::Param {
                index,
                implicit: true,
            } => match IMPLICIT_NAMES.get(*index) {
                Some(name) => f.write_str(name),
                None => write!(f, "x{index}"),
            },
            Node::Param {
                index,
                implicit: false,
            } => write!(f, "${index}"),
            Node::Operator(op) => write!(f, "{op}"),
            Node::Call(call) => {
                f.write_str(&call.name)?;
                if call.args.is_empty() {
                    return Ok(());
                }
                f.write_str("(")?;
                for (idx, arg) in call.args.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A compiled equation: optional name, declared parameters, and a postfix body.
///
/// Arity and validity are filled in by the owning context once resolution
/// has run; a freshly parsed equation reports zero arity and is invalid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Equation {
    name: String,
    params: Vec<String>,
    nodes: Vec<Node>,
    implicit_count: usize,
    explicit_count: usize,
    valid: bool,
}

impl Equation {
    /// Creates an empty equation with a name and declared parameter names.
    pub(crate) fn new(name: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            name: name.into(),
            params,
            ..Self::default()
        }
    }

    /// Creates an empty unnamed equation (used for call arguments).
    pub(crate) fn anonymous() -> Self {
        Self::default()
    }

    /// Equation name (`""` for anonymous expressions).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared explicit parameter names, in signature order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Postfix node sequence.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of implicit coordinates this equation needs (0 to 3).
    pub fn implicit_count(&self) -> usize {
        self.implicit_count
    }

    /// Number of explicit parameters needed to evaluate this equation's body.
    pub fn explicit_count(&self) -> usize {
        self.explicit_count
    }

    /// Whether simulated evaluation succeeded with exactly one result.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub(crate) fn push_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Iterates over the call nodes of this equation's own body.
    pub(crate) fn calls(&self) -> impl Iterator<Item = &Call> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Call(call) => Some(call),
            _ => None,
        })
    }

    pub(crate) fn calls_mut(&mut self) -> impl Iterator<Item = &mut Call> {
        self.nodes.iter_mut().filter_map(|node| match node {
            Node::Call(call) => Some(call),
            _ => None,
        })
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, node) in self.nodes.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
