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

//! Postfix stack evaluation.

use super::{Call, Equation, EquationId, EvalError, Node, Operator};

/// Storage the evaluator follows call links through.
pub(crate) trait EquationTable {
    /// Returns the stored equation behind `id`.
    fn equation(&self, id: EquationId) -> Option<&Equation>;

    /// Number of stored equations; ids `0..count` are valid.
    fn equation_count(&self) -> usize;
}

impl EquationTable for [Equation] {
    fn equation(&self, id: EquationId) -> Option<&Equation> {
        self.get(id.0)
    }

    fn equation_count(&self) -> usize {
        self.len()
    }
}

/// Interprets postfix node sequences against concrete parameter values.
pub(crate) struct Evaluator<'t, T: EquationTable + ?Sized> {
    table: &'t T,
    max_call_depth: usize,
}

impl<T: EquationTable + ?Sized> Clone for Evaluator<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: EquationTable + ?Sized> Copy for Evaluator<'_, T> {}

impl<'t, T: EquationTable + ?Sized> Evaluator<'t, T> {
    pub(crate) fn new(table: &'t T, max_call_depth: usize) -> Self {
        Self {
            table,
            max_call_depth,
        }
    }

    /// Evaluates `equation` with the given implicit coordinates and explicit values.
    pub(crate) fn evaluate(
        &self,
        equation: &Equation,
        implicit: &[f64],
        explicit: &[f64],
    ) -> Result<f64, EvalError> {
        self.run(equation, implicit, explicit, 0)
    }

    fn run(
        &self,
        equation: &Equation,
        implicit: &[f64],
        explicit: &[f64],
        depth: usize,
    ) -> Result<f64, EvalError> {
        let mut stack: Vec<f64> = Vec::with_capacity(equation.nodes.len());
        for node in &equation.nodes {
            match node {
                Node::Literal(value) => stack.push(*value),
                Node::Param {
                    index,
                    implicit: true,
                } => {
                    let value = implicit
                        .get(*index)
                        .ok_or(EvalError::MissingImplicit {
                            index: *index,
                            available: implicit.len(),
                        })?;
                    stack.push(*value);
                }
                Node::Param {
                    index,
                    implicit: false,
                } => {
                    let value = explicit
                        .get(*index)
                        .ok_or(EvalError::MissingExplicit {
                            index: *index,
                            available: explicit.len(),
                        })?;
                    stack.push(*value);
                }
                Node::Operator(op) => apply_operator(*op, &mut stack)?,
                Node::Call(call) => {
                    let value = self.call(call, implicit, explicit, depth)?;
                    stack.push(value);
                }
            }
        }

        match stack.as_slice() {
            [value] => Ok(*value),
            _ => Err(EvalError::UnbalancedStack {
                remaining: stack.len(),
            }),
        }
    }

    /// Evaluates a call: arguments in the caller's scope, then the callee with
    /// the caller's implicit coordinates and the argument values as its
    /// explicit parameters.
    fn call(
        &self,
        call: &Call,
        implicit: &[f64],
        explicit: &[f64],
        depth: usize,
    ) -> Result<f64, EvalError> {
        let unresolved = || EvalError::Unresolved {
            name: call.name.clone(),
        };
        let target = call
            .target
            .and_then(|id| self.table.equation(id))
            .ok_or_else(unresolved)?;

        if call.args.len() != target.params.len() {
            return Err(EvalError::ArityMismatch {
                name: call.name.clone(),
                expected: target.params.len(),
                found: call.args.len(),
            });
        }
        if depth >= self.max_call_depth {
            return Err(EvalError::CallDepthExceeded {
                name: call.name.clone(),
                limit: self.max_call_depth,
            });
        }

        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.run(arg, implicit, explicit, depth)?);
        }
        self.run(target, implicit, &args, depth + 1)
    }
}

/// Pops operands, applies `op`, and pushes the result.
fn apply_operator(op: Operator, stack: &mut Vec<f64>) -> Result<(), EvalError> {
    let available = stack.len();
    let underflow = EvalError::StackUnderflow {
        operator: op,
        needed: op.arity(),
        available,
    };

    let result = if op.is_binary() {
        // The right operand sits on top: `a b -` computes `a - b`.
        let (Some(op2), Some(op1)) = (stack.pop(), stack.pop()) else {
            return Err(underflow);
        };
        match op {
            Operator::Add => op1 + op2,
            Operator::Sub => op1 - op2,
            Operator::Mul => op1 * op2,
            Operator::Div => op1 / op2,
            _ => op1.powf(op2),
        }
    } else {
        let Some(value) = stack.pop() else {
            return Err(underflow);
        };
        match op {
            Operator::Sin => value.sin(),
            Operator::Cos => value.cos(),
            Operator::Tan => value.tan(),
            Operator::Sqrt => value.sqrt(),
            _ => value.exp(),
        }
    };

    stack.push(result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equation(nodes: Vec<Node>) -> Equation {
        let mut eq = Equation::anonymous();
        for node in nodes {
            eq.push_node(node);
        }
        eq
    }

    fn implicit(index: usize) -> Node {
        Node::Param {
            index,
            implicit: true,
        }
    }

    fn explicit(index: usize) -> Node {
        Node::Param {
            index,
            implicit: false,
        }
    }

    fn call(name: &str, args: Vec<Equation>, target: Option<usize>) -> Node {
        let mut call = Call::new(name, args);
        call.target = target.map(EquationId);
        Node::Call(call)
    }

    fn eval(table: &[Equation], eq: &Equation, implicit: &[f64], explicit: &[f64]) -> Result<f64, EvalError> {
        Evaluator::new(table, 16).evaluate(eq, implicit, explicit)
    }

    #[test]
    fn binary_operators_take_right_operand_from_top() {
        let eq = equation(vec![
            Node::Literal(10.0),
            Node::Literal(4.0),
            Node::Operator(Operator::Sub),
        ]);
        assert_eq!(eval(&[], &eq, &[], &[]), Ok(6.0));

        let eq = equation(vec![
            Node::Literal(2.0),
            Node::Literal(3.0),
            Node::Operator(Operator::Pow),
        ]);
        assert_eq!(eval(&[], &eq, &[], &[]), Ok(8.0));
    }

    #[test]
    fn unary_operators_consume_one_value() {
        let eq = equation(vec![Node::Literal(16.0), Node::Operator(Operator::Sqrt)]);
        assert_eq!(eval(&[], &eq, &[], &[]), Ok(4.0));
        let eq = equation(vec![Node::Literal(0.0), Node::Operator(Operator::Exp)]);
        assert_eq!(eval(&[], &eq, &[], &[]), Ok(1.0));
    }

    #[test]
    fn operator_underflow_fails() {
        let eq = equation(vec![Node::Literal(1.0), Node::Operator(Operator::Mul)]);
        assert_eq!(
            eval(&[], &eq, &[], &[]),
            Err(EvalError::StackUnderflow {
                operator: Operator::Mul,
                needed: 2,
                available: 1,
            })
        );
        let eq = equation(vec![Node::Operator(Operator::Cos)]);
        assert!(matches!(
            eval(&[], &eq, &[], &[]),
            Err(EvalError::StackUnderflow { needed: 1, .. })
        ));
    }

    #[test]
    fn final_stack_must_hold_one_value() {
        let empty = Equation::anonymous();
        assert_eq!(
            eval(&[], &empty, &[], &[]),
            Err(EvalError::UnbalancedStack { remaining: 0 })
        );
        let two = equation(vec![Node::Literal(1.0), Node::Literal(2.0)]);
        assert_eq!(
            eval(&[], &two, &[], &[]),
            Err(EvalError::UnbalancedStack { remaining: 2 })
        );
    }

    #[test]
    fn parameters_out_of_range_fail() {
        let eq = equation(vec![implicit(2)]);
        assert_eq!(
            eval(&[], &eq, &[1.0, 2.0], &[]),
            Err(EvalError::MissingImplicit {
                index: 2,
                available: 2,
            })
        );
        assert_eq!(eval(&[], &eq, &[1.0, 2.0, 3.0], &[]), Ok(3.0));

        let eq = equation(vec![explicit(0)]);
        assert_eq!(
            eval(&[], &eq, &[], &[]),
            Err(EvalError::MissingExplicit {
                index: 0,
                available: 0,
            })
        );
        assert_eq!(eval(&[], &eq, &[], &[7.0]), Ok(7.0));
    }

    #[test]
    fn calls_evaluate_args_in_caller_scope() {
        // square(a) = a * a
        let mut square = equation(vec![
            explicit(0),
            explicit(0),
            Node::Operator(Operator::Mul),
        ]);
        square.params = vec!["a".into()];
        let table = vec![square];

        // square(x + b), where b is the caller's explicit parameter 0.
        let arg = equation(vec![implicit(0), explicit(0), Node::Operator(Operator::Add)]);
        let caller = equation(vec![call("square", vec![arg], Some(0))]);
        assert_eq!(eval(&table, &caller, &[2.0, 0.0], &[1.0]), Ok(9.0));
    }

    #[test]
    fn implicit_coordinates_pass_through_calls() {
        // shift(a) = y + a
        let mut shift = equation(vec![implicit(1), explicit(0), Node::Operator(Operator::Add)]);
        shift.params = vec!["a".into()];
        let table = vec![shift];
        let caller = equation(vec![call("shift", vec![equation(vec![Node::Literal(5.0)])], Some(0))]);
        assert_eq!(eval(&table, &caller, &[0.0, 10.0], &[]), Ok(15.0));
    }

    #[test]
    fn unbound_call_fails() {
        let eq = equation(vec![call("nowhere", Vec::new(), None)]);
        assert_eq!(
            eval(&[], &eq, &[], &[]),
            Err(EvalError::Unresolved {
                name: "nowhere".into()
            })
        );
    }

    #[test]
    fn argument_count_must_match_declaration() {
        let mut add = equation(vec![explicit(0), explicit(1), Node::Operator(Operator::Add)]);
        add.params = vec!["a".into(), "b".into()];
        let table = vec![add];
        let args = vec![
            equation(vec![Node::Literal(1.0)]),
            equation(vec![Node::Literal(2.0)]),
            equation(vec![Node::Literal(3.0)]),
        ];
        let eq = equation(vec![call("add", args, Some(0))]);
        assert_eq!(
            eval(&table, &eq, &[], &[]),
            Err(EvalError::ArityMismatch {
                name: "add".into(),
                expected: 2,
                found: 3,
            })
        );
    }

    #[test]
    fn self_recursion_hits_depth_limit() {
        // loop = loop
        let looping = equation(vec![call("loop", Vec::new(), Some(0))]);
        let table = vec![looping.clone()];
        assert_eq!(
            eval(&table, &looping, &[], &[]),
            Err(EvalError::CallDepthExceeded {
                name: "loop".into(),
                limit: 16,
            })
        );
    }
}
