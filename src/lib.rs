//! Builds the Unicode tables a C/C++ lexer needs for identifiers and whitespace,
//! and writes them as array initializers into a generated header.
//!
//! The tables deliberately leave out ASCII letters, digits, `$` and `_`, which the lexer
//! matches directly.

pub mod charset;
pub mod error;
pub mod header;
pub mod recipes;
pub mod source;
