//! XML output: the document prologue and epilogue, and one element per
//! instruction.

use std::io::{self, Write};

use crate::LANGUAGE;
use crate::instruction::Instruction;

/// Replace `&`, `<` and `>` with entity references.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Writes one `<program>` document. The prologue is written when the
/// writer is created and the epilogue by [`XmlWriter::finish`], so each
/// appears exactly once.
pub struct XmlWriter<W: Write> {
    out: W,
}

impl<W: Write> XmlWriter<W> {
    pub fn begin(mut out: W) -> io::Result<Self> {
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(out, r#"<program language="{}">"#, LANGUAGE)?;
        Ok(XmlWriter { out })
    }

    pub fn write_instruction(&mut self, instruction: &Instruction) -> io::Result<()> {
        if instruction.operands.is_empty() {
            return writeln!(
                self.out,
                r#"  <instruction order="{}" opcode="{}"/>"#,
                instruction.order, instruction.opcode
            );
        }

        writeln!(
            self.out,
            r#"  <instruction order="{}" opcode="{}">"#,
            instruction.order, instruction.opcode
        )?;
        for (i, operand) in instruction.operands.iter().enumerate() {
            let n = i + 1;
            writeln!(
                self.out,
                r#"    <arg{n} type="{}">{}</arg{n}>"#,
                operand.kind.xml_name(),
                operand.value
            )?;
        }
        writeln!(self.out, "  </instruction>")
    }

    /// Close the document and flush, handing back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        writeln!(self.out, "</program>")?;
        self.out.flush()?;
        Ok(self.out)
    }
}
