pub mod operand;
pub mod signature;

use std::fmt;

use crate::instruction::operand::Operand;

/// A fully validated instruction. Instructions that fail validation are
/// never constructed, so every value of this type owns its `order`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Position among valid instructions, starting at 1.
    pub order: u32,
    /// Uppercase mnemonic.
    pub opcode: &'static str,
    /// Operands in source order, matching the opcode's signature.
    pub operands: Vec<Operand>,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opcode)?;
        for operand in &self.operands {
            write!(f, " {}", operand)?;
        }
        Ok(())
    }
}
