//! Command-line surface (§6).

use {clap::Parser, std::path::PathBuf};

/// Build profile selected on the command line.
///
/// Exactly one of `--debug` (the default) or `--release` is in effect;
/// each expands to a fixed set of flags appended to every target's
/// `cc_flags`/`ll_flags` before the build runs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Profile
{
    /// Debug build: debug info, sanitizers, and coverage instrumentation.
    Debug,
    /// Release build: optimisation and link-time optimisation.
    Release,
}

impl Profile
{
    /// Flags appended to `cc_flags` (applied to every compile and
    /// link command).
    pub fn cc_flags(self) -> &'static str
    {
        match self {
            Self::Debug   => "-g -fsanitize=address,undefined --coverage",
            Self::Release => "-O2",
        }
    }

    /// Flags appended to `ll_flags` (applied only to link commands).
    pub fn ll_flags(self) -> &'static str
    {
        match self {
            Self::Debug   => "-fsanitize=address,undefined --coverage",
            Self::Release => "-O2 -flto",
        }
    }
}

/// otter: a self-hosted incremental build engine for C.
#[derive(Debug, Parser)]
#[command(name = "otter", author, version, about)]
pub struct Args
{
    /// Path to a JSON build manifest (see the manual for its schema).
    #[arg(long, default_value = "otter.json")]
    pub manifest: PathBuf,

    /// Build with debug, sanitizer, and coverage flags (default).
    #[arg(long, conflicts_with = "release")]
    pub debug: bool,

    /// Build with optimisation and link-time-optimisation flags.
    #[arg(long)]
    pub release: bool,
}

impl Args
{
    /// The effective profile: `--release` if given, `--debug` otherwise.
    pub fn profile(&self) -> Profile
    {
        if self.release { Profile::Release } else { Profile::Debug }
    }
}
