//! glotx - gettext message extractor for JavaScript and TypeScript
//!
//! glotx scans a project for calls of configured translation functions
//! (`gettext`, `ngettext`, `this.i18n.pgettext`, ...) and writes the
//! translatable strings into a gettext template (`.pot`).
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Parsing, call recognition, extraction and catalog assembly
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
