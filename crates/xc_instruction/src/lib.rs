//! This crate holds the structs and constants to represent an X-Code
//! instruction from an Xbox boot-ROM image: opcode versions, the per-version
//! opcode tables and the 9-byte instruction record.

mod bidi;
mod opcode;
mod table;
mod xcode;

pub use bidi::BidiMap;
pub use opcode::{Opcode, OpcodeKind, OpcodeType, OpcodeVersion, UnmappedOpcode};
pub use table::{opcode_table, OpcodeTable};
pub use xcode::{XCode, XCodeFlags, XCODE_SIZE};
