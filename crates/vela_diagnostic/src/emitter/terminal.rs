//! Human-readable diagnostic output with optional ANSI color.

use std::io::{self, Write};

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Severity};

use super::DiagnosticEmitter;

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const NOTE: &str = "\x1b[1;36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m";
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode, settable from the CLI (`--color`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Renders a [`Diagnostic`] to a writer as `rustc`-style text: title,
/// primary span with a caret, optional secondary span, suggestion, and
/// the call-stack trace.
pub struct TerminalEmitter<W: Write> {
    out: W,
    use_color: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn new(out: W, color: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            out,
            use_color: color.should_use_colors(is_tty),
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_color {
            format!("{code}{text}{}", colors::RESET)
        } else {
            text.to_string()
        }
    }

    fn write_span(&mut self, source: &str, filename: &str, span: vela_ir::Span, color: &str) -> io::Result<()> {
        let table = LineOffsetTable::build(source);
        let (start_lc, _) = table.span_to_line_col(source, span);
        let (line, col) = start_lc;
        let Some(line_text) = table.line_text(source, line) else {
            return Ok(());
        };
        writeln!(self.out, "  --> {filename}:{line}:{col}")?;
        writeln!(self.out, "   |")?;
        writeln!(self.out, "{line:>3}| {line_text}")?;
        let caret_len = span.len().max(1) as usize;
        let caret = "^".repeat(caret_len.min(line_text.len().saturating_sub(col as usize - 1).max(1)));
        writeln!(
            self.out,
            "   | {}{}",
            " ".repeat(col.saturating_sub(1) as usize),
            self.paint(color, &caret)
        )
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, source: &str, diagnostic: &Diagnostic) {
        let color = match diagnostic.severity {
            Severity::Error => colors::ERROR,
            Severity::Note => colors::NOTE,
        };
        let _ = writeln!(
            self.out,
            "{}[{}]: {}",
            self.paint(color, &diagnostic.severity.to_string()),
            diagnostic.code,
            self.paint(colors::BOLD, &diagnostic.message)
        );
        for label in &diagnostic.labels {
            let label_color = if label.is_primary { color } else { colors::SECONDARY };
            let _ = self.write_span(source, &diagnostic.filename, label.span, label_color);
            if !label.message.is_empty() {
                let _ = writeln!(self.out, "   = note: {}", label.message);
            }
        }
        if let Some(suggestion) = &diagnostic.suggestion {
            let _ = writeln!(self.out, "   = help: {suggestion}");
        }
        if !diagnostic.stack.is_empty() {
            let _ = writeln!(self.out, "stack backtrace:");
            for (i, frame) in diagnostic.stack.iter().enumerate() {
                let name = frame.function_name.as_deref().unwrap_or("<anonymous>");
                let native = if frame.is_native { " [native]" } else { "" };
                let _ = writeln!(
                    self.out,
                    "  {i:>2}: {name}{native} at {}:{}",
                    frame.filename, frame.span.start
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Diagnostic, ErrorCode};
    use vela_ir::Span;

    #[test]
    fn renders_code_and_message() {
        let diagnostic = Diagnostic::error(ErrorCode::E6001, "undefined name `x`", "main.vela")
            .with_primary(Span::new(0, 1), "not found");
        let mut buf = Vec::new();
        let mut emitter = TerminalEmitter::new(&mut buf, ColorMode::Never, false);
        emitter.emit("x + 1", &diagnostic);
        let rendered = String::from_utf8(buf).unwrap();
        assert!(rendered.contains("E6001"));
        assert!(rendered.contains("undefined name"));
        assert!(rendered.contains("main.vela:1:1"));
    }
}
