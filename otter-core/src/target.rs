//! Build units (C3) and command synthesis (C2).

pub mod argv;

use {otter_util::hash::Hash, std::path::PathBuf};

/// Identifies a [`Target`] within a single [`BuildContext`].
///
/// Targets never move or get destroyed individually while their
/// [`BuildContext`] lives, so a plain index is a stable, `Copy`
/// reference - no reference counting needed.
///
/// [`BuildContext`]: crate::build::BuildContext
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TargetId(pub usize);

/// Kind of artifact a [`Target`] produces.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TargetKind
{
    /// A single compiled object file.
    Object,
    /// A linked, runnable program.
    Executable,
    /// A linked, position-independent shared library.
    SharedObject,
}

impl TargetKind
{
    /// Extension appended after a target's name and suffix to form its
    /// output path.
    pub fn extension(self) -> &'static str
    {
        match self {
            Self::Object       => ".o",
            Self::Executable   => "",
            Self::SharedObject => ".so",
        }
    }
}

/// A single declared build unit.
///
/// Owned exclusively by a [`BuildContext`]; `dependencies` holds
/// non-owning references (by index) to other targets in the same
/// context.
///
/// [`BuildContext`]: crate::build::BuildContext
pub struct Target
{
    /// Output path, unique across the build.
    pub name: PathBuf,

    /// Kind of artifact this target produces.
    pub kind: TargetKind,

    /// Source files, in declaration order. Non-empty for every kind.
    pub sources: Vec<PathBuf>,

    /// Compiler flag strings, applied to both compile and link
    /// commands. Each entry is whitespace-tokenised at synthesis time.
    pub cc_flags: Vec<String>,

    /// Preprocessor include-path flag strings, applied to compile
    /// commands, the linter, and the content hasher.
    pub include_flags: Vec<String>,

    /// Extra flag strings appended only to link commands.
    pub extra_flags: Vec<String>,

    /// Other targets in the same context this one depends on, in
    /// declaration order.
    pub dependencies: Vec<TargetId>,

    /// Command to spawn, synthesised once by [`argv::synthesize`] when
    /// the owning [`BuildContext`] is created.
    ///
    /// [`BuildContext`]: crate::build::BuildContext
    pub argv: Vec<String>,

    /// SHA-1 of the preprocessed concatenation of `sources`, computed
    /// once at construction. Editing a source requires reconstructing
    /// the target, not re-hashing in place.
    pub input_digest: Hash,

    /// Set the moment the graph executor (C6) decides to spawn this
    /// target's command during the current `build_all`. Never reverts.
    pub executed: bool,
}

impl Target
{
    /// Human-readable form of [`Self::argv`], for logging.
    pub fn command(&self) -> String
    {
        self.argv.join(" ")
    }
}
