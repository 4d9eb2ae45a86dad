use {super::super::syntax::location::Location, thiserror::Error};

/// Result from the compiler.
pub type Result<T> =
    std::result::Result<T, Error>;

/// Error returned while compiling a parsed program to bytecode.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum Error
{
    #[error("undefined variable {1:?}")]
    UndefinedVariable(Location, String),
}
