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

//! Context limits.

use serde::{Deserialize, Serialize};

/// Limits applied while compiling, storing and evaluating equations.
///
/// Missing fields deserialize to their defaults, so a host can override
/// a single limit from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Maximum stored equations, built-ins included.
    pub max_equations: usize,
    /// Maximum postfix nodes per equation. Argument equations are bounded
    /// separately from the equation that calls them.
    pub max_nodes: usize,
    /// Maximum nesting of calls during evaluation.
    pub max_call_depth: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_equations: 40,
            max_nodes: 100,
            max_call_depth: 64,
        }
    }
}

impl ContextConfig {
    pub fn with_max_equations(mut self, max_equations: usize) -> Self {
        self.max_equations = max_equations;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }
}
