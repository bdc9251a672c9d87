pub mod instruction;
pub mod parser;
pub mod source;
pub mod xml;

use std::io::{self, BufRead, Write};

use crate::instruction::Instruction;
use crate::parser::{ErrorKind, ParseError, Parser};
use crate::xml::XmlWriter;

/// Source language name, as written in the `language` attribute.
pub const LANGUAGE: &str = "IPPcode23";

/// The mandatory first line of every program.
pub const HEADER: &str = ".IPPcode23";

/// A parsed IPPcode23 program.
#[derive(Debug, Clone)]
pub struct Program {
    pub instructions: Vec<Instruction>,
}

impl Program {
    /// Write the program as an XML document.
    pub fn write_xml<W: Write>(&self, out: W) -> io::Result<W> {
        let mut writer = XmlWriter::begin(out)?;
        for instruction in &self.instructions {
            writer.write_instruction(instruction)?;
        }
        writer.finish()
    }
}

/// Parse a whole source text into a [`Program`].
pub fn parse_program(source: &str, file_id: usize) -> Result<Program, ParseError> {
    let mut parser = Parser::new(source.as_bytes(), file_id);
    parser.read_header()?;

    let mut instructions = Vec::new();
    while let Some(instruction) = parser.next_instruction()? {
        instructions.push(instruction);
    }
    Ok(Program { instructions })
}

/// Counts reported after a successful translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub instructions: usize,
    pub lines: usize,
}

/// A failed translation: the error plus the source consumed up to it, for
/// rendering diagnostics.
#[derive(Debug)]
pub struct Failure {
    pub error: ParseError,
    pub source: String,
}

/// Translate `input` to XML on `output`, one line at a time.
///
/// Each instruction is written as soon as it is validated. On failure,
/// whatever was already written stays written and is not a valid document.
pub fn translate<R: BufRead, W: Write>(
    input: R,
    output: W,
    file_id: usize,
) -> Result<Summary, Failure> {
    let mut parser = Parser::new(input, file_id);
    match emit(&mut parser, output, file_id) {
        Ok(instructions) => Ok(Summary {
            instructions,
            lines: parser.lines_read(),
        }),
        Err(error) => Err(Failure {
            error,
            source: parser.into_source(),
        }),
    }
}

fn emit<R: BufRead, W: Write>(
    parser: &mut Parser<R>,
    output: W,
    file_id: usize,
) -> Result<usize, ParseError> {
    let write_failed = |e: io::Error| ParseError::io(ErrorKind::Output, &e, file_id);

    parser.read_header()?;
    let mut writer = XmlWriter::begin(output).map_err(write_failed)?;

    let mut count = 0;
    while let Some(instruction) = parser.next_instruction()? {
        writer.write_instruction(&instruction).map_err(write_failed)?;
        count += 1;
    }
    writer.finish().map_err(write_failed)?;
    Ok(count)
}
