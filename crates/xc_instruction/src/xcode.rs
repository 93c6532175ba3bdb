use crate::opcode::{Opcode, OpcodeKind, OpcodeType};
use bitflags::bitflags;
use std::fmt::{Display, Formatter};

/// Total size of an X-Code on the wire: a 1-byte opcode and two 4-byte
/// operands.
pub const XCODE_SIZE: u32 = 9;

bitflags! {
    /// Rendering flags set on an instruction by the jump-resolution pass.
    pub struct XCodeFlags: u8 {
        /// Emit a `loc_<offset>:` label line; set on jump targets.
        const SHOW_LOCATION_LABEL = 1 << 0;
        /// Render the raw jump operand; set on misaligned or out-of-bounds
        /// jumps.
        const HIDE_JUMP_LABEL = 1 << 1;
    }
}

/// One decoded X-Code instruction. Everything except `flags` is fixed at
/// decode time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XCode {
    pub opcode: Opcode,
    pub operand_one: u32,
    pub operand_two: u32,
    /// Byte offset of the record within the image.
    pub offset: u32,
    pub flags: XCodeFlags,
}

impl XCode {
    pub fn new(opcode: Opcode, operand_one: u32, operand_two: u32, offset: u32) -> Self {
        Self {
            opcode,
            operand_one,
            operand_two,
            offset,
            flags: XCodeFlags::empty(),
        }
    }

    /// The byte offset a jump with our second operand lands on, relative to
    /// the end of this record. Operand two is signed on the wire.
    pub fn jump_target(&self) -> i64 {
        self.offset as i64 + XCODE_SIZE as i64 + self.operand_two as i32 as i64
    }
}

impl Display for XCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let opcode = &self.opcode;

        match opcode.kind() {
            OpcodeKind::Known(OpcodeType::MemRead | OpcodeType::PciRead | OpcodeType::IoRead) => {
                write!(f, "{} 0x{:08X}", opcode, self.operand_one)
            }

            OpcodeKind::Known(OpcodeType::Chain) => {
                let sub = Opcode::from_byte(self.operand_one as u8, opcode.version());
                write!(
                    f,
                    "{} {}, 0x{:08X}",
                    opcode,
                    sub.to_string().replace("xc_", "op_"),
                    self.operand_two
                )
            }

            OpcodeKind::Known(OpcodeType::Jne) => {
                if self.flags.contains(XCodeFlags::HIDE_JUMP_LABEL) {
                    write!(
                        f,
                        "{} 0x{:08X}, 0x{:08X}",
                        opcode, self.operand_one, self.operand_two
                    )
                } else {
                    write!(
                        f,
                        "{} 0x{:08X}, loc_{:X}",
                        opcode,
                        self.operand_one,
                        self.jump_target()
                    )
                }
            }

            OpcodeKind::Known(OpcodeType::Jmp) => {
                if self.flags.contains(XCodeFlags::HIDE_JUMP_LABEL) {
                    write!(f, "{} 0x{:08X}", opcode, self.operand_two)
                } else {
                    write!(f, "{} loc_{:X}", opcode, self.jump_target())
                }
            }

            OpcodeKind::Known(OpcodeType::Exit) => opcode.fmt(f),

            _ => write!(
                f,
                "{} 0x{:08X}, 0x{:08X}",
                opcode, self.operand_one, self.operand_two
            ),
        }
    }
}
