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

//! Arity and validity inference.
//!
//! Implicit usage propagates outward through calls: `g = f(1)` needs `x`
//! when `f` reads `x`. Explicit usage does not: a callee's own signature is
//! satisfied by the call's arguments, so the caller only needs the explicit
//! parameters its body and its argument expressions read.

use super::{Equation, EquationId, EquationTable, Evaluator, MAX_IMPLICIT_PARAMS, Node};

/// Parameter counts derived for one equation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Arity {
    pub(crate) implicit: usize,
    pub(crate) explicit: usize,
}

impl Arity {
    fn absorb(&mut self, other: Arity) {
        self.implicit = self.implicit.max(other.implicit);
        self.explicit = self.explicit.max(other.explicit);
    }
}

/// Derived properties for one equation and its nested argument equations.
///
/// `nested` follows the order of [`Equation::calls`], then argument order,
/// which is the order [`Equation::apply_properties`] walks.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Properties {
    pub(crate) arity: Arity,
    pub(crate) valid: bool,
    pub(crate) nested: Vec<Properties>,
}

#[derive(Debug, Clone, Copy)]
enum Visit {
    Pending,
    InProgress,
    Done(Arity),
}

/// Computes [`Properties`] for every equation in a table.
pub(crate) struct PropertyInferencer<'t, T: EquationTable + ?Sized> {
    table: &'t T,
    evaluator: Evaluator<'t, T>,
    visits: Vec<Visit>,
}

impl<'t, T: EquationTable + ?Sized> PropertyInferencer<'t, T> {
    pub(crate) fn new(table: &'t T, max_call_depth: usize) -> Self {
        Self {
            table,
            evaluator: Evaluator::new(table, max_call_depth),
            visits: vec![Visit::Pending; table.equation_count()],
        }
    }

    /// Infers properties for every stored equation, indexed like the table.
    pub(crate) fn infer_all(mut self) -> Vec<Properties> {
        let count = self.table.equation_count();
        for index in 0..count {
            self.stored_arity(EquationId(index));
        }

        let table = self.table;
        (0..count)
            .map(|index| {
                let id = EquationId(index);
                match table.equation(id) {
                    Some(equation) => {
                        let arity = self.stored_arity(id);
                        self.properties_with(equation, arity)
                    }
                    None => Properties::default(),
                }
            })
            .collect()
    }

    /// Memoized arity of a stored equation.
    ///
    /// A call cycle contributes nothing while its head is still being
    /// computed; such equations recurse forever and fail validation anyway.
    fn stored_arity(&mut self, id: EquationId) -> Arity {
        match self.visits.get(id.0).copied() {
            Some(Visit::Done(arity)) => arity,
            Some(Visit::InProgress) | None => Arity::default(),
            Some(Visit::Pending) => {
                self.visits[id.0] = Visit::InProgress;
                let table = self.table;
                let arity = table
                    .equation(id)
                    .map(|equation| self.body_arity(equation))
                    .unwrap_or_default();
                self.visits[id.0] = Visit::Done(arity);
                arity
            }
        }
    }

    fn body_arity(&mut self, equation: &Equation) -> Arity {
        let mut arity = Arity::default();
        for node in equation.nodes() {
            match node {
                Node::Param {
                    index,
                    implicit: true,
                } => arity.implicit = arity.implicit.max(index + 1),
                Node::Param {
                    index,
                    implicit: false,
                } => arity.explicit = arity.explicit.max(index + 1),
                Node::Call(call) => {
                    if let Some(target) = call.target {
                        let callee = self.stored_arity(target);
                        arity.implicit = arity.implicit.max(callee.implicit);
                    }
                    for arg in &call.args {
                        let arg_arity = self.body_arity(arg);
                        arity.absorb(arg_arity);
                    }
                }
                Node::Literal(_) | Node::Operator(_) => {}
            }
        }
        arity.implicit = arity.implicit.min(MAX_IMPLICIT_PARAMS);
        arity
    }

    fn properties_with(&mut self, equation: &Equation, arity: Arity) -> Properties {
        let valid = self.simulate(equation, arity);
        let mut nested = Vec::new();
        for call in equation.calls() {
            for arg in &call.args {
                let arg_arity = self.body_arity(arg);
                nested.push(self.properties_with(arg, arg_arity));
            }
        }
        Properties {
            arity,
            valid,
            nested,
        }
    }

    /// Evaluates with zero-filled parameters sized to the derived arity.
    fn simulate(&self, equation: &Equation, arity: Arity) -> bool {
        let implicit = vec![0.0; arity.implicit.min(MAX_IMPLICIT_PARAMS)];
        let explicit = vec![0.0; arity.explicit];
        self.evaluator
            .evaluate(equation, &implicit, &explicit)
            .is_ok()
    }
}

impl Equation {
    /// Stores derived properties on this equation and its argument equations.
    pub(crate) fn apply_properties(&mut self, properties: &Properties) {
        self.implicit_count = properties.arity.implicit;
        self.explicit_count = properties.arity.explicit;
        self.valid = properties.valid;

        let mut nested = properties.nested.iter();
        for call in self.calls_mut() {
            for arg in &mut call.args {
                if let Some(arg_properties) = nested.next() {
                    arg.apply_properties(arg_properties);
                }
            }
        }
    }
}
