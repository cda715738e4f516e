//! Translation call extraction.
//!
//! `CallVisitor` walks a parsed module once, recognizes calls of the
//! configured translation functions with `CalleePath`, reads the mapped
//! arguments and produces one `RawMessage` per accepted call site.
//! The messages are not merged here; that is the catalog's job.

use anyhow::Result;
use swc_common::SourceMap;
use swc_ecma_ast::{CallExpr, Callee, Module};
use swc_ecma_visit::{Visit, VisitWith};

use super::argument::ArgumentValue;
use super::comments::{CommentCollector, CommentRules};
use super::options::{ArgumentMapping, CallExtractorConfig, CommentOptions, ContentOptions};
use crate::core::catalog::RawMessage;
use crate::core::matcher::CalleePath;
use crate::core::parsers::source::ParsedSource;

/// A group of callee paths sharing one argument layout.
#[derive(Debug, Clone)]
pub struct CallExtractor {
    pub callees: Vec<CalleePath>,
    pub arguments: ArgumentMapping,
}

impl From<&CallExtractorConfig> for CallExtractor {
    fn from(config: &CallExtractorConfig) -> Self {
        Self {
            callees: config.callees.iter().map(CalleePath::new).collect(),
            arguments: config.arguments.clone(),
        }
    }
}

/// Everything needed to extract messages from one file.
#[derive(Debug, Clone, Default)]
pub struct ExtractionRules {
    pub extractors: Vec<CallExtractor>,
    pub content: ContentOptions,
    pub comments: CommentRules,
}

impl ExtractionRules {
    pub fn new(
        extractors: &[CallExtractorConfig],
        content: ContentOptions,
        comments: CommentOptions,
    ) -> Result<Self> {
        Ok(Self {
            extractors: extractors.iter().map(CallExtractor::from).collect(),
            content,
            comments: CommentRules::new(comments)?,
        })
    }
}

/// Why a recognized call produced no message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingText,
    EmptyText,
    /// Argument name (`text`, `textPlural`, `context`) that was not a static string.
    NonLiteralArgument(&'static str),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingText => write!(f, "missing text argument"),
            SkipReason::EmptyText => write!(f, "empty text"),
            SkipReason::NonLiteralArgument(name) => {
                write!(f, "'{}' argument is not a string literal", name)
            }
        }
    }
}

/// A recognized call that was not turned into a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCall {
    pub reference: String,
    pub callee: String,
    pub reason: SkipReason,
}

/// Messages found in one source file, in source order.
#[derive(Debug, Default)]
pub struct FileExtraction {
    pub file_path: String,
    pub messages: Vec<RawMessage>,
    pub skipped: Vec<SkippedCall>,
}

/// Extract all messages of a parsed file.
///
/// `reference_path` is the path written into message references
/// (`<reference_path>:<line>`), usually relative to the source root.
pub fn extract_file(
    parsed: &ParsedSource,
    reference_path: &str,
    rules: &ExtractionRules,
) -> FileExtraction {
    CallVisitor::new(reference_path, &parsed.source_map, parsed, rules).extract(&parsed.module)
}

struct CallVisitor<'a> {
    reference_path: &'a str,
    source_map: &'a SourceMap,
    rules: &'a ExtractionRules,
    comments: CommentCollector<'a>,
    messages: Vec<RawMessage>,
    skipped: Vec<SkippedCall>,
}

impl<'a> CallVisitor<'a> {
    fn new(
        reference_path: &'a str,
        source_map: &'a SourceMap,
        parsed: &ParsedSource,
        rules: &'a ExtractionRules,
    ) -> Self {
        Self {
            reference_path,
            source_map,
            rules,
            comments: CommentCollector::new(&rules.comments, &parsed.comments, source_map),
            messages: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn extract(mut self, module: &Module) -> FileExtraction {
        self.visit_module(module);
        FileExtraction {
            file_path: self.reference_path.to_string(),
            messages: self.messages,
            skipped: self.skipped,
        }
    }

    fn find_extractor(&self, node: &CallExpr) -> Option<(&'a CallExtractor, &'a CalleePath)> {
        let Callee::Expr(callee) = &node.callee else {
            return None;
        };
        self.rules.extractors.iter().find_map(|extractor| {
            extractor
                .callees
                .iter()
                .find(|path| path.matches(&**callee))
                .map(|path| (extractor, path))
        })
    }

    fn build_message(
        &self,
        node: &CallExpr,
        arguments: &ArgumentMapping,
    ) -> Result<RawMessage, SkipReason> {
        let text = match ArgumentValue::at(&node.args, arguments.text) {
            ArgumentValue::Value(text) => self.rules.content.normalize(&text),
            ArgumentValue::Missing => return Err(SkipReason::MissingText),
            ArgumentValue::Unresolvable => return Err(SkipReason::NonLiteralArgument("text")),
        };
        if text.is_empty() {
            return Err(SkipReason::EmptyText);
        }

        let text_plural = optional_argument(node, arguments.text_plural, "textPlural")?
            .map(|plural| self.rules.content.normalize(&plural));
        let context = optional_argument(node, arguments.context, "context")?;

        let start = self.source_map.lookup_char_pos(node.span.lo).line;
        let end = self.source_map.lookup_char_pos(node.span.hi).line;

        Ok(RawMessage {
            text,
            text_plural,
            context,
            references: vec![format!("{}:{}", self.reference_path, start)],
            comments: self.comments.collect(node.span, start, end),
        })
    }
}

fn optional_argument(
    node: &CallExpr,
    index: Option<usize>,
    name: &'static str,
) -> Result<Option<String>, SkipReason> {
    let Some(index) = index else {
        return Ok(None);
    };
    match ArgumentValue::at(&node.args, index) {
        ArgumentValue::Value(value) => Ok(Some(value)),
        ArgumentValue::Missing => Ok(None),
        ArgumentValue::Unresolvable => Err(SkipReason::NonLiteralArgument(name)),
    }
}

impl Visit for CallVisitor<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Some((extractor, path)) = self.find_extractor(node) {
            match self.build_message(node, &extractor.arguments) {
                Ok(message) => self.messages.push(message),
                Err(reason) => {
                    let line = self.source_map.lookup_char_pos(node.span.lo).line;
                    self.skipped.push(SkippedCall {
                        reference: format!("{}:{}", self.reference_path, line),
                        callee: path.name().to_string(),
                        reason,
                    });
                }
            }
        }

        node.visit_children_with(self);
    }
}
