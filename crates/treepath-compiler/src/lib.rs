#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! treepath compiler: lexer and path compiler.
//!
//! - `lexer` - state-machine lexer producing typed lexemes
//! - `compile` - recursive-descent compiler from lexemes to a [`Pipeline`]
//!
//! [`Pipeline`]: treepath_core::Pipeline

pub mod compile;
mod error;
pub mod lexer;
mod subscript;


pub use compile::{Compiler, DEFAULT_RECURSION_FUEL, compile};
pub use error::{CompileError, Result};
pub use lexer::{Lexeme, LexemeKind, Lexer, lex};
