//! The instruction set: every opcode and the operand classes it expects.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::instruction::operand::OperandKind;

/// The class of operand an instruction position accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgClass {
    /// `<var>`: a variable only.
    Variable,
    /// `<symb>`: a variable or a constant.
    Symbol,
    /// `<label>`
    Label,
    /// `<type>`: one of `int`, `string`, `bool`.
    Type,
}

const SYMBOL_KINDS: &[OperandKind] = &[
    OperandKind::Variable,
    OperandKind::Integer,
    OperandKind::Boolean,
    OperandKind::String,
    OperandKind::Nil,
];

impl ArgClass {
    /// Operand kinds accepted in this position, in the order they are tried.
    pub fn candidates(self) -> &'static [OperandKind] {
        match self {
            ArgClass::Variable => &[OperandKind::Variable],
            ArgClass::Symbol => SYMBOL_KINDS,
            ArgClass::Label => &[OperandKind::Label],
            ArgClass::Type => &[OperandKind::Type],
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            ArgClass::Variable => "a variable (GF@, LF@ or TF@ followed by a name)",
            ArgClass::Symbol => "a variable or an int, bool, string or nil constant",
            ArgClass::Label => "a label name",
            ArgClass::Type => "a type name (int, string or bool)",
        }
    }
}

impl fmt::Display for ArgClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgClass::Variable => "<var>",
            ArgClass::Symbol => "<symb>",
            ArgClass::Label => "<label>",
            ArgClass::Type => "<type>",
        };
        f.write_str(name)
    }
}

/// The operand shape of one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub opcode: &'static str,
    pub args: &'static [ArgClass],
}

impl Signature {
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opcode)?;
        for arg in self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

use ArgClass::{Label, Symbol, Type, Variable};

const SIGNATURE_GROUPS: &[(&[&str], &[ArgClass])] = &[
    (&["CREATEFRAME", "PUSHFRAME", "POPFRAME", "RETURN", "BREAK"], &[]),
    (&["DEFVAR", "POPS"], &[Variable]),
    (&["PUSHS", "WRITE", "EXIT", "DPRINT"], &[Symbol]),
    (&["CALL", "LABEL", "JUMP"], &[Label]),
    (&["MOVE", "NOT", "INT2CHAR", "STRLEN", "TYPE"], &[Variable, Symbol]),
    (&["READ"], &[Variable, Type]),
    (
        &[
            "ADD", "SUB", "MUL", "IDIV", "LT", "GT", "EQ", "AND", "OR", "STRI2INT", "CONCAT",
            "GETCHAR", "SETCHAR",
        ],
        &[Variable, Symbol, Symbol],
    ),
    (&["JUMPIFEQ", "JUMPIFNEQ"], &[Label, Symbol, Symbol]),
];

static SIGNATURES: LazyLock<HashMap<&'static str, Signature>> = LazyLock::new(|| {
    SIGNATURE_GROUPS
        .iter()
        .flat_map(|&(opcodes, args)| {
            opcodes
                .iter()
                .map(move |&opcode| (opcode, Signature { opcode, args }))
        })
        .collect()
});

/// Look up an opcode, ignoring case.
pub fn lookup(mnemonic: &str) -> Option<Signature> {
    SIGNATURES.get(mnemonic.to_ascii_uppercase().as_str()).copied()
}

/// Every known opcode, in no particular order.
#[cfg(test)]
fn opcodes() -> impl Iterator<Item = &'static str> {
    SIGNATURES.keys().copied()
}
