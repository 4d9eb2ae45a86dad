//! Syntax trees and parser for the scripting language.

pub mod ast;
pub mod lex;
pub mod location;
pub mod parse;
