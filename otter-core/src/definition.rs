//! The declarative build surface (C8).
//!
//! A build is described as a plain [`Vec<TargetDefinition>`] plus a
//! [`BuildConfig`]. Both derive [`serde::Deserialize`] so a build can be
//! loaded from a JSON manifest; nothing here reads the filesystem or
//! spawns anything.

use serde::{Deserialize, Serialize};

/// Kind of artifact a [`TargetDefinition`] asks to be built.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetDefinitionKind
{
    /// A single compiled object file.
    Object,
    /// A linked, runnable program.
    Executable,
    /// A linked, position-independent shared library.
    SharedObject,
}

/// One entry of the declarative build surface.
///
/// Source stem defaults to `name` when omitted; dependencies default to
/// empty; extra flags default to none. These defaults are exactly what
/// the `object`/`executable`/`shared_object` convenience constructors
/// below apply.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TargetDefinition
{
    /// Output name, unique across the build.
    pub name: String,

    /// Source file stem (without directory or `.c` extension).
    /// Defaults to `name` when omitted from a manifest.
    #[serde(default)]
    pub source: Option<String>,

    /// Kind of artifact to produce.
    pub kind: TargetDefinitionKind,

    /// Names of other definitions this one depends on.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Extra tokens appended only to link commands.
    #[serde(default)]
    pub extra_flags: Option<String>,
}

impl TargetDefinition
{
    /// Define an `Object` target with no dependencies.
    pub fn object(name: impl Into<String>) -> Self
    {
        Self{
            name: name.into(),
            source: None,
            kind: TargetDefinitionKind::Object,
            dependencies: Vec::new(),
            extra_flags: None,
        }
    }

    /// Define an `Executable` target depending on `dependencies`.
    pub fn executable(
        name: impl Into<String>,
        dependencies: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self
    {
        Self{
            name: name.into(),
            source: None,
            kind: TargetDefinitionKind::Executable,
            dependencies: dependencies.into_iter().map(Into::into).collect(),
            extra_flags: None,
        }
    }

    /// Define a `SharedObject` target depending on `dependencies`.
    pub fn shared_object(
        name: impl Into<String>,
        dependencies: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self
    {
        Self{
            name: name.into(),
            source: None,
            kind: TargetDefinitionKind::SharedObject,
            dependencies: dependencies.into_iter().map(Into::into).collect(),
            extra_flags: None,
        }
    }

    /// Override the source stem (defaults to [`Self::name`]).
    pub fn with_source(mut self, source: impl Into<String>) -> Self
    {
        self.source = Some(source.into());
        self
    }

    /// Set extra flags appended to this target's link command.
    pub fn with_extra_flags(mut self, flags: impl Into<String>) -> Self
    {
        self.extra_flags = Some(flags.into());
        self
    }

    /// The source stem to use: [`Self::source`] if set, else [`Self::name`].
    pub fn source_stem(&self) -> &str
    {
        self.source.as_deref().unwrap_or(&self.name)
    }
}

/// Filesystem locations the build reads from and writes to.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BuildPaths
{
    /// Directory containing `.c` sources.
    pub src_dir: String,

    /// Directory outputs are written to.
    pub out_dir: String,

    /// Inserted between a target's name and its extension in every
    /// output path, e.g. `-debug` to produce `out/math-debug.o`.
    #[serde(default)]
    pub suffix: String,
}

/// Flag buckets applied across every target.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BuildFlags
{
    /// Compiler flags, applied to every compile and link command.
    #[serde(default)]
    pub cc_flags: String,

    /// Link-only flags, appended (after `cc_flags`) only to link
    /// commands.
    #[serde(default)]
    pub ll_flags: String,

    /// Preprocessor include-path flags, applied to every compile
    /// command, the linter, and the content hasher.
    #[serde(default)]
    pub include_flags: String,
}

/// Top-level build configuration: where things live, and what flags
/// apply everywhere.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BuildConfig
{
    /// Path configuration.
    pub paths: BuildPaths,

    /// Flag configuration.
    #[serde(default)]
    pub flags: BuildFlags,
}
