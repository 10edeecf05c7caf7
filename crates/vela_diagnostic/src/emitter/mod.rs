//! Diagnostic emitters: turn a [`crate::Diagnostic`] into user-facing text.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// A sink that renders diagnostics to some output.
pub trait DiagnosticEmitter {
    fn emit(&mut self, source: &str, diagnostic: &Diagnostic);
}
