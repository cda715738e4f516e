//! Message extraction from parsed source files.
//!
//! This module turns recognized translation calls into `RawMessage`s:
//! - `argument`: static string evaluation of call arguments
//! - `call_extractor`: the AST visitor and per-file results
//! - `comments`: attaching nearby source comments to messages
//! - `options`: serde-backed extraction options (extractors, content, comments)

pub mod argument;
pub mod call_extractor;
pub mod comments;
pub mod options;

pub use argument::{ArgumentValue, static_string};
pub use call_extractor::{
    CallExtractor, ExtractionRules, FileExtraction, SkipReason, SkippedCall, extract_file,
};
pub use comments::{CommentCollector, CommentRules};
pub use options::{
    ArgumentMapping, CallExtractorConfig, CommentOptions, ContentOptions, default_call_extractors,
};
