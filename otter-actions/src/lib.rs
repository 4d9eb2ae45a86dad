//! Process spawning for the build engine (C4).
//!
//! `otter-core` decides *whether* a target must run through the
//! [`Spawn`][otter_core::build::Spawn] trait; this crate supplies the
//! implementation that actually talks to the operating system.

#![warn(missing_docs)]

pub use self::process_runner::ProcessRunner;

mod process_runner;
