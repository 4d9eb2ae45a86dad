//! Core types and algorithms of the build engine.
//!
//! This crate owns the dependency graph of [`Target`][target::Target]s,
//! the logic that decides whether a target is up to date
//! ([`cache`]), the logic that turns a target's declared fields into
//! a compiler invocation ([`target::argv`]), and the validator that turns
//! a flat list of [`definition::TargetDefinition`]s into a buildable
//! [`build::BuildContext`].
//!
//! Spawning the actual compiler/linter processes is left to the
//! `otter-actions` crate, which this crate depends on only through the
//! [`Spawn`][build::Spawn] trait so that the graph executor can be tested
//! without a real C toolchain.

#![warn(missing_docs)]

pub mod build;
pub mod cache;
pub mod definition;
pub mod error;
pub mod hash;
pub mod target;
