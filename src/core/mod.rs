//! Core extraction engine.
//!
//! - `parsers`: swc parsing of JS/TS sources
//! - `matcher`: recognizing translation function callees
//! - `extract`: turning recognized calls into raw messages
//! - `catalog`: merging raw messages into the sorted catalog
//! - `file_scanner`: finding source files
//! - `context`: the pipeline tying the above together
//! - `po`: writing the catalog as a `.pot` file

pub mod catalog;
pub mod context;
pub mod extract;
pub mod file_scanner;
pub mod matcher;
pub mod parsers;
pub mod po;

pub use context::{ExtractContext, ExtractResult};
