use thiserror::Error;

/// Result from decoding or verifying an image.
pub type Result<T> =
    std::result::Result<T, Error>;

/// Error returned while decoding or verifying an image.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum Error
{
    #[error("unexpected end of image")]
    UnexpectedEof,

    #[error("unsupported image version {0}")]
    UnsupportedVersion(u32),

    #[error("unknown constant type tag {0}")]
    UnknownConstantTag(u32),

    #[error("unknown opcode {0:#x}")]
    UnknownOpcode(u8),

    #[error("instruction at offset {0} is missing its operand")]
    TruncatedInstruction(usize),

    #[error("constant index {0} is out of range")]
    ConstantOutOfRange(u8),

    #[error("jump at offset {0} targets outside the code")]
    JumpOutOfRange(usize),
}
