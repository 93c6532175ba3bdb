use thiserror::Error;
use xc_instruction::UnmappedOpcode;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Accepted images are 256 KiB, 512 KiB or 1 MiB flash dumps.
    #[error("invalid Xbox BIOS image length ({0:#X} bytes)")]
    InvalidImageLength(usize),

    #[error("invalid Xbox BIOS image header")]
    InvalidImageHeader,

    #[error("image ends in the middle of an X-Code at offset {offset:#X}")]
    UnexpectedEndOfImage { offset: u32 },

    #[error("comment record on line {line} does not have exactly two tab-separated fields")]
    MalformedCommentRecord { line: usize },

    #[error(transparent)]
    UnmappedOpcode(#[from] UnmappedOpcode),
}

pub type Result<T> = std::result::Result<T, Error>;
