use crate::table::opcode_table;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// One of the three historical raw-byte encodings used by the MCPX
/// interpreter. All three map onto the same 12 operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpcodeVersion {
    Retail,
    EarlyDebug,
    LateDebug,
}

impl OpcodeVersion {
    /// Fixed iteration order; version detection breaks ties in this order.
    pub const ALL: [OpcodeVersion; 3] = [
        OpcodeVersion::Retail,
        OpcodeVersion::EarlyDebug,
        OpcodeVersion::LateDebug,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpcodeType {
    MemRead,   // Read 4 bytes from the memory address in operand one
    MemWrite,  // Write operand two to the memory address in operand one
    PciWrite,  // Write operand two to the PCI address in operand one
    PciRead,   // Read 4 bytes from the PCI address in operand one
    AndOr,     // RESULT = (RESULT & op1) | op2
    Chain,     // Re-use the last result as the second operand of a nested opcode
    Jne,       // Jump to the offset in operand two if RESULT != operand one
    Jmp,       // Jump to the offset in operand two
    AndOrEbp,  // RESULT = EBP = (EBP & op1) | op2
    IoWrite,   // Write the 8-bit value in operand two to the IO port in operand one
    IoRead,    // Read an 8-bit value from the IO port in operand one
    Exit,      // Leave the X-Code interpreter
}

/// A decoded opcode byte: either one of the 12 known operations, or a byte
/// the interpreter skips over as a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpcodeKind {
    Known(OpcodeType),
    Reserved(u8),
}

/// Reverse lookup failed: the version's table has no byte value for the
/// requested operation. Only (LateDebug, AndOrEbp) hits this for the known
/// operations; everything else would be a programming error.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("no opcode byte mapped for {opcode_type:?} in {version:?}")]
pub struct UnmappedOpcode {
    pub version: OpcodeVersion,
    pub opcode_type: OpcodeType,
}

/// An opcode byte interpreted under a specific [OpcodeVersion]. Immutable
/// after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opcode {
    value: u8,
    kind: OpcodeKind,
    version: OpcodeVersion,
}

impl Opcode {
    /// Interprets a raw opcode byte under the given version. Total; bytes
    /// without a table entry come back as [OpcodeKind::Reserved].
    pub fn from_byte(value: u8, version: OpcodeVersion) -> Self {
        Self {
            value,
            kind: opcode_table(version).kind_of(value),
            version,
        }
    }

    /// Builds an opcode from an operation by reverse lookup in the version's
    /// table.
    pub fn from_type(
        opcode_type: OpcodeType,
        version: OpcodeVersion,
    ) -> Result<Self, UnmappedOpcode> {
        let value = opcode_table(version).byte_of(opcode_type)?;

        Ok(Self {
            value,
            kind: OpcodeKind::Known(opcode_type),
            version,
        })
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn kind(&self) -> OpcodeKind {
        self.kind
    }

    pub fn version(&self) -> OpcodeVersion {
        self.version
    }

    /// Returns true if the opcode does something; anything else is treated
    /// as a NOP by the MCPX interpreter.
    pub fn is_valid(&self) -> bool {
        matches!(self.kind, OpcodeKind::Known(_))
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            OpcodeKind::Known(OpcodeType::MemRead) => write!(f, "xc_mem_read"),
            OpcodeKind::Known(OpcodeType::MemWrite) => write!(f, "xc_mem_write"),
            OpcodeKind::Known(OpcodeType::PciRead) => write!(f, "xc_pci_read"),
            OpcodeKind::Known(OpcodeType::PciWrite) => write!(f, "xc_pci_write"),
            OpcodeKind::Known(OpcodeType::IoRead) => write!(f, "xc_io_read"),
            OpcodeKind::Known(OpcodeType::IoWrite) => write!(f, "xc_io_write"),
            OpcodeKind::Known(OpcodeType::AndOr) => write!(f, "xc_andor"),
            OpcodeKind::Known(OpcodeType::AndOrEbp) => write!(f, "xc_andorebp"),
            OpcodeKind::Known(OpcodeType::Jne) => write!(f, "xc_jne"),
            OpcodeKind::Known(OpcodeType::Jmp) => write!(f, "xc_jmp"),
            OpcodeKind::Known(OpcodeType::Chain) => write!(f, "xc_chain"),
            OpcodeKind::Known(OpcodeType::Exit) => write!(f, "xc_exit"),
            OpcodeKind::Reserved(value) => write!(f, "xc_nop_{:02X}", value),
        }
    }
}
