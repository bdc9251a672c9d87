use std::fmt;
use std::io;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};

/// What went wrong. Each kind maps to a process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The first substantive line is not the language header.
    MissingOrInvalidHeader,
    UnknownOpcode,
    /// Too few or too many operands for the opcode.
    OperandCountMismatch,
    /// An operand matches none of the patterns its position accepts.
    InvalidOperandSyntax,
    /// Reading the source failed, e.g. it is not valid UTF-8.
    Input,
    Output,
}

impl ErrorKind {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::MissingOrInvalidHeader => 21,
            ErrorKind::UnknownOpcode => 22,
            ErrorKind::OperandCountMismatch | ErrorKind::InvalidOperandSyntax => 23,
            ErrorKind::Input => 11,
            ErrorKind::Output => 12,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ErrorKind::MissingOrInvalidHeader => "missing or invalid header",
            ErrorKind::UnknownOpcode => "unknown opcode",
            ErrorKind::OperandCountMismatch => "wrong number of operands",
            ErrorKind::InvalidOperandSyntax => "invalid operand",
            ErrorKind::Input => "cannot read input",
            ErrorKind::Output => "cannot write output",
        };
        f.write_str(text)
    }
}

/// A fatal translation error with source location information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    /// Byte span into the consumed source.
    pub span: Option<Range<usize>>,
    /// 1-based line the error was found on.
    pub line: Option<usize>,
    pub file_id: usize,
    pub notes: Vec<String>,
}

impl ParseError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, file_id: usize) -> Self {
        ParseError {
            kind,
            message: message.into(),
            span: None,
            line: None,
            file_id,
            notes: Vec::new(),
        }
    }

    pub fn at(mut self, line: usize, span: Range<usize>) -> Self {
        self.line = Some(line);
        self.span = Some(span);
        self
    }

    pub fn io(kind: ErrorKind, error: &io::Error, file_id: usize) -> Self {
        ParseError::new(kind, format!("{}: {}", kind, error), file_id)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_file_id(mut self, file_id: usize) -> Self {
        self.file_id = file_id;
        self
    }

    pub fn exit_code(&self) -> i32 {
        self.kind.exit_code()
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let labels = match &self.span {
            Some(span) => vec![Label::primary(self.file_id, span.clone()).with_message(self.kind.to_string())],
            None => Vec::new(),
        };
        Diagnostic::error()
            .with_message(&self.message)
            .with_labels(labels)
            .with_notes(self.notes.clone())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ParseError {}
