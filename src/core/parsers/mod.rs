//! Source file parsing.
//!
//! - `source`: JS/TS/JSX/TSX parser (uses swc for AST generation)

pub mod source;
