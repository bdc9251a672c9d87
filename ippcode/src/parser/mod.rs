pub mod error;
pub mod header;
pub mod line;

pub use error::{ErrorKind, ParseError};

use std::io::BufRead;
use std::ops::Range;

use log::{debug, trace};

use crate::HEADER;
use crate::instruction::Instruction;
use crate::instruction::operand::{Operand, classify};
use crate::instruction::signature;
use crate::parser::header::HeaderState;
use crate::parser::line::{is_blank, strip_comment, tokenize};
use crate::source::{Line, LineSource};

/// Single-pass parser over a line-oriented source.
///
/// Owns the header state and the order counter; instructions are produced
/// one at a time so they can be emitted while the input is still being read.
pub struct Parser<R> {
    lines: LineSource<R>,
    file_id: usize,
    state: HeaderState,
    order: u32,
}

impl<R: BufRead> Parser<R> {
    pub fn new(input: R, file_id: usize) -> Self {
        Parser {
            lines: LineSource::new(input),
            file_id,
            state: HeaderState::AwaitingHeader,
            order: 0,
        }
    }

    pub fn state(&self) -> HeaderState {
        self.state
    }

    /// Skip blank and comment-only lines, then require the header.
    /// Does nothing if the header was already accepted.
    pub fn read_header(&mut self) -> Result<(), ParseError> {
        if self.state == HeaderState::InBody {
            return Ok(());
        }

        while let Some(line) = self.next_line()? {
            let (code, _) = strip_comment(&line.text);
            if tokenize(code).is_empty() {
                trace!("line {}: skipped before header", line.number);
                continue;
            }
            if header::is_header(&line.text) {
                debug!("line {}: header accepted", line.number);
                self.state = HeaderState::InBody;
                return Ok(());
            }

            let found = code.trim_matches(is_blank);
            let start = code.len() - code.trim_start_matches(is_blank).len();
            return Err(self
                .error(
                    ErrorKind::MissingOrInvalidHeader,
                    format!("expected `{}` header, found `{}`", HEADER, found),
                )
                .at(line.number, line.offset + start..line.offset + start + found.len())
                .with_note(format!(
                    "the first non-comment line must be `{}` (any letter case)",
                    HEADER
                )));
        }

        Err(self.error(
            ErrorKind::MissingOrInvalidHeader,
            format!("missing `{}` header: input has no instructions", HEADER),
        ))
    }

    /// Parse up to the next valid instruction. Returns `None` at end of
    /// input. Reads the header first if it has not been seen yet.
    pub fn next_instruction(&mut self) -> Result<Option<Instruction>, ParseError> {
        self.read_header()?;

        while let Some(line) = self.next_line()? {
            if let Some(instruction) = self.parse_line(&line)? {
                return Ok(Some(instruction));
            }
        }
        Ok(None)
    }

    pub fn lines_read(&self) -> usize {
        self.lines.lines_read()
    }

    pub fn into_source(self) -> String {
        self.lines.into_consumed()
    }

    fn next_line(&mut self) -> Result<Option<Line>, ParseError> {
        self.lines
            .next_line()
            .map_err(|e| ParseError::io(ErrorKind::Input, &e, self.file_id))
    }

    fn parse_line(&mut self, line: &Line) -> Result<Option<Instruction>, ParseError> {
        let (code, comment) = strip_comment(&line.text);
        let tokens = tokenize(code);
        let Some((mnemonic, args)) = tokens.split_first() else {
            trace!("line {}: no instruction", line.number);
            return Ok(None);
        };

        let Some(signature) = signature::lookup(mnemonic.text) else {
            return Err(self
                .error(
                    ErrorKind::UnknownOpcode,
                    format!("unknown opcode `{}`", mnemonic.text),
                )
                .at(line.number, span(line, mnemonic.span())));
        };

        if args.len() != signature.arity() {
            let last = tokens.last().unwrap_or(mnemonic);
            let mut err = self
                .error(
                    ErrorKind::OperandCountMismatch,
                    format!(
                        "`{}` expects {} operand(s), found {}",
                        signature.opcode,
                        signature.arity(),
                        args.len()
                    ),
                )
                .at(line.number, span(line, mnemonic.start..last.span().end))
                .with_note(format!("expected form: {}", signature));
            if comment.is_some() && args.len() < signature.arity() {
                err = err.with_note("everything after `#` is a comment");
            }
            return Err(err);
        }

        let operands = args
            .iter()
            .zip(signature.args)
            .enumerate()
            .map(|(i, (token, &class))| {
                classify(token.text, class).ok_or_else(|| {
                    self.error(
                        ErrorKind::InvalidOperandSyntax,
                        format!(
                            "invalid operand `{}`: operand {} of `{}` must be {}",
                            token.text,
                            i + 1,
                            signature.opcode,
                            class.describe()
                        ),
                    )
                    .at(line.number, span(line, token.span()))
                    .with_note(format!("expected form: {}", signature))
                })
            })
            .collect::<Result<Vec<Operand>, ParseError>>()?;

        self.order += 1;
        let instruction = Instruction {
            order: self.order,
            opcode: signature.opcode,
            operands,
        };
        debug!("line {}: #{} {}", line.number, instruction.order, instruction);
        Ok(Some(instruction))
    }

    fn error(&self, kind: ErrorKind, message: String) -> ParseError {
        ParseError::new(kind, message, self.file_id)
    }
}

fn span(line: &Line, within: Range<usize>) -> Range<usize> {
    line.offset + within.start..line.offset + within.end
}
