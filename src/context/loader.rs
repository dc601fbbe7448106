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

//! Batch loading of equation lines.
//!
//! Every non-blank, non-comment line is compiled independently; a failing
//! line is logged and skipped so the rest of the batch still loads. The
//! context is resolved once at the end.

use super::Context;
use crate::model::{ContextError, EquationId};
use std::path::Path;

/// Outcome of loading a batch of lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Ids of the stored equations, in line order.
    pub added: Vec<EquationId>,
    /// Lines that failed to compile or store.
    pub failures: Vec<LineFailure>,
    /// Called names that matched no stored equation after resolving.
    pub unresolved: Vec<String>,
}

impl LoadReport {
    /// Returns `true` when every line loaded and every call resolved.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.unresolved.is_empty()
    }
}

/// One skipped line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFailure {
    /// 1-based line number within the loaded source.
    pub line: usize,
    /// Line text as read.
    pub text: String,
    /// Why the line was skipped.
    pub error: ContextError,
}

impl Context {
    /// Loads lines from memory, numbering them from 1.
    pub fn load_lines<'l, I>(&mut self, lines: I) -> LoadReport
    where
        I: IntoIterator<Item = &'l str>,
    {
        self.load_numbered("", numbered(lines))
    }

    /// Loads a multi-line source; `name` labels its diagnostics.
    pub fn load_source(&mut self, name: &str, text: &str) -> LoadReport {
        self.load_numbered(name, numbered(text.lines()))
    }

    /// Reads `path` through `loader` and loads its lines.
    ///
    /// Only a loader failure is an error; bad lines are reported in the
    /// returned [`LoadReport`].
    pub fn load_with<F>(&mut self, path: &str, mut loader: F) -> Result<LoadReport, ContextError>
    where
        F: FnMut(&str) -> Result<String, String>,
    {
        let text = loader(path).map_err(|message| ContextError::Load {
            path: path.to_string(),
            message,
        })?;
        Ok(self.load_source(path, &text))
    }

    /// Reads a file from disk and loads its lines.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, ContextError> {
        let path = path.as_ref();
        let label = path.display().to_string();
        self.load_with(&label, |_| {
            std::fs::read_to_string(path).map_err(|err| err.to_string())
        })
    }

    #[tracing::instrument(skip(self, lines))]
    fn load_numbered<'l, I>(&mut self, file: &str, lines: I) -> LoadReport
    where
        I: IntoIterator<Item = (usize, &'l str)>,
    {
        let mut report = LoadReport::default();
        for (line, text) in lines {
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match self.add_equation(text) {
                Ok(id) => {
                    tracing::debug!(line, %id, "loaded equation");
                    report.added.push(id);
                }
                Err(err) => {
                    let error = err.relocate(file, line);
                    tracing::warn!(line, text, %error, "skipping equation line");
                    report.failures.push(LineFailure {
                        line,
                        text: text.to_string(),
                        error,
                    });
                }
            }
        }

        report.unresolved = self.resolve();
        tracing::info!(
            added = report.added.len(),
            failed = report.failures.len(),
            unresolved = report.unresolved.len(),
            "loaded equations"
        );
        report
    }
}

fn numbered<'l, I>(lines: I) -> impl Iterator<Item = (usize, &'l str)>
where
    I: IntoIterator<Item = &'l str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(index, text)| (index + 1, text))
}
