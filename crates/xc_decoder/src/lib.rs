//! Disassembly of the X-Code stream embedded in an Xbox boot-ROM image:
//! opcode-version auto-detection, the sequential decode loop, jump-target
//! resolution, per-opcode structural validation and text rendering.

mod comments;
mod decode;
mod disasm;
mod errors;
mod render;
mod validate;

pub use comments::CommentSet;
pub use decode::decode_one;
pub use disasm::{detect_version, disassemble, Disassembly, XCODE_BASE};
pub use errors::{Error, Result};
pub use render::render;
pub use validate::validate;
