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

//! Equation storage, name lookup and the two-phase resolve step.
//!
//! Lines are compiled and stored one at a time; nothing is linked until
//! [`Context::resolve`] runs, so equations may reference names defined
//! later in the same batch.

mod config;
mod loader;

pub use config::ContextConfig;
pub use loader::{LineFailure, LoadReport};

use crate::compiler::compile_line;
use crate::model::properties::PropertyInferencer;
use crate::model::resolve::resolve_equation;
use crate::model::{ContextError, Equation, EquationId, EquationTable, EvalError, Evaluator};
use crate::stdlib::builtin_equations;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::{self, Write};

/// A stored equation and the text it was compiled from.
#[derive(Debug, Clone)]
struct Stored {
    equation: Equation,
    source: String,
}

/// Ordered, name-addressable collection of equations.
///
/// Built-in functions and constants occupy the first slots and count toward
/// [`ContextConfig::max_equations`]. Once loading and resolution are done
/// the context is read-only and may be shared across threads for evaluation.
#[derive(Debug, Clone)]
pub struct Context {
    config: ContextConfig,
    entries: Vec<Stored>,
    names: HashMap<String, EquationId>,
    builtin_count: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context with default limits and resolved built-ins.
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    /// Creates a context with custom limits and resolved built-ins.
    pub fn with_config(config: ContextConfig) -> Self {
        let mut context = Self {
            config,
            entries: Vec::new(),
            names: HashMap::new(),
            builtin_count: 0,
        };
        context.install_builtins();
        context
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Drops every user equation and restores the built-ins.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.names.clear();
        self.install_builtins();
    }

    fn install_builtins(&mut self) {
        for (equation, label) in builtin_equations() {
            self.store(equation, label);
        }
        self.builtin_count = self.entries.len();
        self.resolve();
    }

    /// Compiles one line and stores the equation.
    ///
    /// The new equation stays unlinked and invalid until [`Context::resolve`]
    /// runs. Lines that fail to compile are never stored.
    pub fn add_equation(&mut self, line: &str) -> Result<EquationId, ContextError> {
        if self.entries.len() >= self.config.max_equations {
            return Err(ContextError::CapacityExceeded {
                limit: self.config.max_equations,
            });
        }
        let equation = compile_line(line, &self.config)?;
        let id = self.store(equation, line.to_string());
        tracing::debug!(%id, source = line, "stored equation");
        Ok(id)
    }

    fn store(&mut self, equation: Equation, source: String) -> EquationId {
        let id = EquationId(self.entries.len());
        if !equation.name().is_empty() {
            match self.names.entry(equation.name().to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
                Entry::Occupied(slot) => {
                    tracing::warn!(
                        name = equation.name(),
                        existing = %slot.get(),
                        shadowed = %id,
                        "name already defined; lookups keep the first definition"
                    );
                }
            }
        }
        self.entries.push(Stored { equation, source });
        id
    }

    /// Links every call to its target and recomputes arity and validity.
    ///
    /// Returns the names that matched no stored equation, in first-seen
    /// order. Equations calling them are left invalid.
    pub fn resolve(&mut self) -> Vec<String> {
        let names = &self.names;
        let lookup = |name: &str| names.get(name).copied();
        let mut unresolved = Vec::new();
        for stored in &mut self.entries {
            resolve_equation(&mut stored.equation, &lookup, &mut unresolved);
        }

        let properties = PropertyInferencer::new(&*self, self.config.max_call_depth).infer_all();
        for (stored, props) in self.entries.iter_mut().zip(&properties) {
            stored.equation.apply_properties(props);
        }

        let mut seen = Vec::with_capacity(unresolved.len());
        for name in unresolved {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        let invalid = self
            .entries
            .iter()
            .filter(|stored| !stored.equation.is_valid())
            .count();
        tracing::debug!(
            equations = self.entries.len(),
            invalid,
            unresolved = ?seen,
            "resolved context"
        );
        seen
    }

    /// Looks up the first equation stored under `name`.
    pub fn find(&self, name: &str) -> Option<EquationRef<'_>> {
        self.find_id(name).and_then(|id| self.get(id))
    }

    pub fn find_id(&self, name: &str) -> Option<EquationId> {
        self.names.get(name).copied()
    }

    pub fn get(&self, id: EquationId) -> Option<EquationRef<'_>> {
        self.entries.get(id.0).map(|stored| EquationRef {
            context: self,
            id,
            stored,
        })
    }

    /// Looks up an equation by storage index.
    pub fn get_index(&self, index: usize) -> Option<EquationRef<'_>> {
        self.get(EquationId(index))
    }

    /// Number of stored equations, built-ins included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of leading slots taken by built-ins.
    pub fn builtin_count(&self) -> usize {
        self.builtin_count
    }

    /// Iterates over stored equations in storage order.
    pub fn iter(&self) -> impl Iterator<Item = EquationRef<'_>> {
        (0..self.entries.len()).filter_map(|index| self.get_index(index))
    }

    /// Renders source, validity and arity of each equation, plus the value
    /// of valid equations that take no parameters.
    pub fn properties_report(&self, include_builtins: bool) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_properties(&mut out, include_builtins);
        out
    }

    fn write_properties(&self, out: &mut impl Write, include_builtins: bool) -> fmt::Result {
        let skip = if include_builtins { 0 } else { self.builtin_count };
        for equation in self.iter().skip(skip) {
            if include_builtins && equation.id().index() == self.builtin_count {
                writeln!(out, "----------------------------------")?;
            }
            writeln!(out, "{}", equation.source())?;
            writeln!(
                out,
                "{}, implicit: {}, explicit: {}",
                if equation.is_valid() { "Valid" } else { "Invalid" },
                equation.implicit_count(),
                equation.explicit_count()
            )?;
            if equation.is_valid() && equation.implicit_count() == 0 && equation.explicit_count() == 0
            {
                if let Ok(value) = equation.evaluate_with(&[], &[]) {
                    writeln!(out, "Value: {value:+.4}")?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl EquationTable for Context {
    fn equation(&self, id: EquationId) -> Option<&Equation> {
        self.entries.get(id.0).map(|stored| &stored.equation)
    }

    fn equation_count(&self) -> usize {
        self.entries.len()
    }
}

/// Borrowed view of one stored equation.
#[derive(Debug, Clone, Copy)]
pub struct EquationRef<'a> {
    context: &'a Context,
    id: EquationId,
    stored: &'a Stored,
}

impl<'a> EquationRef<'a> {
    pub fn id(&self) -> EquationId {
        self.id
    }

    /// Equation name; empty for anonymous lines.
    pub fn name(&self) -> &'a str {
        self.stored.equation.name()
    }

    /// Line the equation was compiled from.
    pub fn source(&self) -> &'a str {
        &self.stored.source
    }

    /// Declared explicit parameter names.
    pub fn params(&self) -> &'a [String] {
        self.stored.equation.params()
    }

    pub fn implicit_count(&self) -> usize {
        self.stored.equation.implicit_count()
    }

    pub fn explicit_count(&self) -> usize {
        self.stored.equation.explicit_count()
    }

    /// Whether evaluation with placeholder parameters leaves one value.
    pub fn is_valid(&self) -> bool {
        self.stored.equation.is_valid()
    }

    /// Compiled postfix form.
    pub fn equation(&self) -> &'a Equation {
        &self.stored.equation
    }

    /// Evaluates at `(x, y)` with no explicit arguments.
    pub fn evaluate(&self, x: f64, y: f64) -> Result<f64, EvalError> {
        self.evaluate_with(&[x, y], &[])
    }

    /// Evaluates at `(x, y, z)` with no explicit arguments.
    pub fn evaluate3(&self, x: f64, y: f64, z: f64) -> Result<f64, EvalError> {
        self.evaluate_with(&[x, y, z], &[])
    }

    /// Evaluates with caller-supplied implicit coordinates and explicit arguments.
    pub fn evaluate_with(&self, implicit: &[f64], explicit: &[f64]) -> Result<f64, EvalError> {
        Evaluator::new(self.context, self.context.config.max_call_depth).evaluate(
            &self.stored.equation,
            implicit,
            explicit,
        )
    }
}
