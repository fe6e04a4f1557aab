// Copyright (c) 2025-2026 Corpus Contributors

// SPDX-License-Identifier: MIT
// Third-party contributions licensed under DCO

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NON-INFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

// ----------------------------------------------------------------------------

//! Diagnostics: the structured record the Markup Adapter and Classifier
//! report recoverable conditions through, instead of raising (§4.7, §6, §7).

use serde::{Deserialize, Serialize};
use std::fmt;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Diagnostic severity, ordered `Debug < Info < Warn < Error < Fatal <
/// Silent` (§6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Diagnostic detail, not shown by default.
    Debug,
    /// Informational.
    Info,
    /// A recovered condition worth a human's attention.
    Warn,
    /// An unresolved reference or other recovered failure (§7).
    Error,
    /// A condition the pipeline cannot recover from (duplicate resource,
    /// alias cycle).
    Fatal,
    /// No diagnostics are ever reported at this level or above; used only as
    /// a `failure_level` sentinel meaning "never fail the run".
    Silent,
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// A single location a diagnostic's message relates to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// File path the location is in.
    pub path: String,
    /// One-based line number, if known.
    pub line: Option<u32>,
}

/// A diagnostic event (§6 "Logger event JSON shape").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// A short, stable machine-readable code, e.g. `"unresolved-reference"`.
    pub code: String,
    /// Human-facing message.
    pub message: String,
    /// The file the diagnostic is about, if any.
    pub file: Option<Location>,
    /// The chain of include locations the diagnostic surfaced through,
    /// outermost file last (§4.7).
    pub stack: Vec<Location>,
}

impl Diagnostic {
    /// Builds a diagnostic with no file context.
    pub fn new(severity: Severity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            code: code.into(),
            message: message.into(),
            file: None,
            stack: Vec::new(),
        }
    }

    /// Attaches a file location.
    pub fn at(mut self, path: impl Into<String>, line: Option<u32>) -> Self {
        self.file = Some(Location { path: path.into(), line });
        self
    }

    /// Pushes a location onto the include stack (innermost first).
    pub fn through(mut self, path: impl Into<String>, line: Option<u32>) -> Self {
        self.stack.push(Location { path: path.into(), line });
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(loc) => match loc.line {
                Some(line) => write!(f, "{}:{line}: {}", loc.path, self.message),
                None => write!(f, "{}: {}", loc.path, self.message),
            },
            None => write!(f, "{}", self.message),
        }
    }
}

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// A sink for diagnostics raised while running the pipeline.
///
/// Per §9's design note, a logger is an explicit context object passed
/// through the call graph, not ambient global state.
pub trait Logger {
    /// Records a diagnostic.
    fn log(&mut self, diagnostic: Diagnostic);

    /// The severity at and above which a run is considered failed.
    fn failure_level(&self) -> Severity;

    /// Whether any recorded diagnostic meets or exceeds `failure_level`.
    fn failed(&self) -> bool;
}

// ----------------------------------------------------------------------------
// In-memory logger
// ----------------------------------------------------------------------------

/// An in-memory [`Logger`], for tests and embedders that want to inspect
/// diagnostics programmatically rather than have them printed.
#[derive(Debug)]
pub struct VecLogger {
    diagnostics: Vec<Diagnostic>,
    failure_level: Severity,
}

impl VecLogger {
    /// Creates a logger that fails the run at `failure_level` or above.
    pub fn new(failure_level: Severity) -> Self {
        VecLogger { diagnostics: Vec::new(), failure_level }
    }

    /// All diagnostics recorded so far, in order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl Default for VecLogger {
    fn default() -> Self {
        VecLogger::new(Severity::Error)
    }
}

impl Logger for VecLogger {
    fn log(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn failure_level(&self) -> Severity {
        self.failure_level
    }

    fn failed(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity >= self.failure_level)
    }
}

// ----------------------------------------------------------------------------
// Tracing-backed logger
// ----------------------------------------------------------------------------

#[cfg(feature = "tracing")]
mod tracing_logger {
    use super::{Diagnostic, Logger, Severity, VecLogger};

    /// A [`Logger`] that both records diagnostics in memory and emits
    /// [`tracing::event!`] records at the matching level, so a host binary's
    /// `tracing-subscriber` setup sees pipeline diagnostics too.
    #[derive(Debug, Default)]
    pub struct TracingLogger {
        inner: VecLogger,
    }

    impl TracingLogger {
        /// Creates a logger that fails the run at `failure_level` or above.
        pub fn new(failure_level: Severity) -> Self {
            TracingLogger { inner: VecLogger::new(failure_level) }
        }

        /// All diagnostics recorded so far, in order.
        pub fn diagnostics(&self) -> &[Diagnostic] {
            self.inner.diagnostics()
        }
    }

    impl Logger for TracingLogger {
        fn log(&mut self, diagnostic: Diagnostic) {
            match diagnostic.severity {
                Severity::Debug => tracing::event!(tracing::Level::DEBUG, "{diagnostic}"),
                Severity::Info => tracing::event!(tracing::Level::INFO, "{diagnostic}"),
                Severity::Warn => tracing::event!(tracing::Level::WARN, "{diagnostic}"),
                Severity::Error | Severity::Fatal => {
                    tracing::event!(tracing::Level::ERROR, "{diagnostic}");
                }
                Severity::Silent => {}
            }
            self.inner.log(diagnostic);
        }

        fn failure_level(&self) -> Severity {
            self.inner.failure_level()
        }

        fn failed(&self) -> bool {
            self.inner.failed()
        }
    }
}

#[cfg(feature = "tracing")]
pub use tracing_logger::TracingLogger;

// ----------------------------------------------------------------------------
// Rendering
// ----------------------------------------------------------------------------

/// Renders a diagnostic's file/include-stack context for humans.
///
/// Uses `ariadne` to produce a multi-label report when `source` (the
/// diagnostic's own file content) is available, and falls back to a plain
/// `path:line: message` line otherwise.
pub fn render(diagnostic: &Diagnostic, source: Option<(&str, &str)>) -> String {
    let Some(file) = &diagnostic.file else { return diagnostic.message.clone() };
    let Some((path, text)) = source else { return diagnostic.to_string() };
    if path != file.path {
        return diagnostic.to_string();
    }

    let line = file.line.unwrap_or(1).max(1) as usize;
    let offset = text
        .lines()
        .take(line - 1)
        .map(|l| l.len() + 1)
        .sum::<usize>()
        .min(text.len());
    let span_end = (offset + 1).min(text.len());

    let mut buf = Vec::new();
    let report = ariadne::Report::build(ariadne::ReportKind::Error, path, offset)
        .with_message(&diagnostic.message)
        .with_label(ariadne::Label::new((path, offset..span_end)).with_message(&diagnostic.code))
        .finish();
    if report.write((path, ariadne::Source::from(text)), &mut buf).is_ok() {
        String::from_utf8_lossy(&buf).into_owned()
    } else {
        diagnostic.to_string()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_debug_below_silent() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Error < Severity::Fatal);
        assert!(Severity::Fatal < Severity::Silent);
    }

    #[test]
    fn vec_logger_fails_at_configured_level() {
        let mut logger = VecLogger::new(Severity::Error);
        assert!(!logger.failed());
        logger.log(Diagnostic::new(Severity::Warn, "warn-code", "a warning"));
        assert!(!logger.failed());
        logger.log(Diagnostic::new(Severity::Error, "error-code", "an error"));
        assert!(logger.failed());
        assert_eq!(logger.diagnostics().len(), 2);
    }

    #[test]
    fn render_falls_back_without_source() {
        let diagnostic = Diagnostic::new(Severity::Error, "x", "broken").at("a.adoc", Some(3));
        assert_eq!(render(&diagnostic, None), "a.adoc:3: broken");
    }
}
