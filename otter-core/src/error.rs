//! Error types shared across the build engine.

use {std::path::PathBuf, thiserror::Error};

/// Error raised while validating or materialising a [`BuildContext`].
///
/// [`BuildContext`]: `crate::build::BuildContext`
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ValidationError
{
    #[error("target {0:?} is defined more than once")]
    DuplicateName(String),

    #[error("target {target:?} depends on undefined target {dependency:?}")]
    MissingDependency{target: String, dependency: String},

    #[error("dependency cycle: {}", .0.join(" -> "))]
    CycleDetected(Vec<String>),

    #[error("target {target:?} has an invalid name {name:?}: {reason}")]
    InvalidName{target: String, name: String, #[source] reason: otter_util::basename::BasenameError},
}

/// Error raised while computing a target's input digest (C1).
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum HashError
{
    #[error("failed to spawn preprocessor for {path:?}: {source}")]
    Spawn{path: PathBuf, #[source] source: std::io::Error},

    #[error("preprocessor exited with {status} while preprocessing {path:?}")]
    NonZeroExit{path: PathBuf, status: std::process::ExitStatus},

    #[error("failed to read preprocessed output of {path:?}: {source}")]
    Read{path: PathBuf, #[source] source: std::io::Error},
}

/// Error raised while reading or writing a target's cached digest (C5).
#[derive(Debug, Error)]
pub enum CacheError
{
    /// The extended attribute could not be read or written for a reason
    /// other than it simply being absent (absence is not an error; see
    /// [`crate::cache::needs_execute`]).
    #[error("failed to access cache entry for {0:?}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
}

/// Error raised while turning a validated definition list into a
/// [`BuildContext`][crate::build::BuildContext].
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ContextError
{
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Error raised while running a target's command (C4), propagated through
/// the graph executor (C6).
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ExecuteError
{
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("required tool {0:?} was not found on the search path")]
    ToolMissing(String),

    #[error("failed to spawn {argv0:?}: {source}")]
    SpawnFailure{argv0: String, #[source] source: std::io::Error},

    #[error("linter reported problems in target {target:?} (exit {status})")]
    LinterFailure{target: String, status: std::process::ExitStatus},

    #[error("command for target {target:?} exited with {status}")]
    CommandFailure{target: String, status: std::process::ExitStatus},
}
