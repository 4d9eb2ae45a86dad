//! A small stack-based virtual machine for an in-progress scripting
//! language: lexer, parser, bytecode loader, and interpreter.
//!
//! This crate is a boundary collaborator to the build engine, not part
//! of its dependency graph - it shares nothing at runtime with
//! `otter-core`. What it shares is the on-disk bytecode image format
//! (see [`bytecode`]), which is stable independently of how a given
//! image was produced.
//!
//! The language itself is deliberately shallow: integers and booleans,
//! arithmetic and comparisons, `let`/blocks/`if`/`while`/`print`. No
//! functions, no closures, no garbage-collected heap - those are
//! future work, not missing by oversight.

#![warn(missing_docs)]

pub mod bytecode;
pub mod compile;
pub mod interpret;
pub mod syntax;
