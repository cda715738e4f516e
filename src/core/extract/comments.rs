//! Attaching source comments to extracted messages.

use anyhow::{Context, Result};
use regex::Regex;
use swc_common::{SourceMap, Span, comments::Comment};

use super::options::CommentOptions;
use crate::core::parsers::source::ExtractedComments;

/// Compiled form of [`CommentOptions`].
#[derive(Debug, Clone, Default)]
pub struct CommentRules {
    options: CommentOptions,
    regex: Option<Regex>,
}

impl CommentRules {
    pub fn new(options: CommentOptions) -> Result<Self> {
        let regex = options
            .regex
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("Invalid comment regex: \"{}\"", pattern))
            })
            .transpose()?;
        Ok(Self { options, regex })
    }

    pub fn is_enabled(&self) -> bool {
        self.options.is_enabled()
    }

    /// Turn raw comment text into message comment text.
    ///
    /// Block comment decoration (`*` at line starts) is removed and blank
    /// lines dropped. Returns `None` when the regex filter rejects the comment.
    pub fn clean(&self, raw: &str) -> Option<String> {
        let text = raw
            .lines()
            .map(|line| line.trim().trim_start_matches('*').trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        let text = match &self.regex {
            Some(regex) => {
                let captures = regex.captures(&text)?;
                captures
                    .get(1)
                    .or_else(|| captures.get(0))
                    .map(|m| m.as_str().trim().to_string())?
            }
            None => text,
        };

        (!text.is_empty()).then_some(text)
    }
}

/// A comment with its resolved line range.
#[derive(Debug, Clone)]
struct LocatedComment {
    span: Span,
    start_line: usize,
    end_line: usize,
    text: String,
}

impl LocatedComment {
    fn locate(comment: &Comment, source_map: &SourceMap) -> Self {
        Self {
            span: comment.span,
            start_line: source_map.lookup_char_pos(comment.span.lo).line,
            end_line: source_map.lookup_char_pos(comment.span.hi).line,
            text: comment.text.to_string(),
        }
    }
}

/// Finds the comments belonging to a call site.
pub struct CommentCollector<'a> {
    rules: &'a CommentRules,
    leading: Vec<LocatedComment>,
    all: Vec<LocatedComment>,
}

impl<'a> CommentCollector<'a> {
    pub fn new(rules: &'a CommentRules, comments: &ExtractedComments, source_map: &SourceMap) -> Self {
        // Skip the line lookups entirely when no comment option is on.
        if !rules.is_enabled() {
            return Self {
                rules,
                leading: Vec::new(),
                all: Vec::new(),
            };
        }

        Self {
            rules,
            leading: comments
                .leading
                .iter()
                .map(|c| LocatedComment::locate(c, source_map))
                .collect(),
            all: comments
                .all()
                .into_iter()
                .map(|c| LocatedComment::locate(c, source_map))
                .collect(),
        }
    }

    /// Comments for a call spanning `span`, from `start_line` to `end_line`.
    pub fn collect(&self, span: Span, start_line: usize, end_line: usize) -> Vec<String> {
        let options = &self.rules.options;
        let mut found: Vec<&LocatedComment> = Vec::new();

        if options.other_line_leading {
            found.extend(self.block_above(span, start_line));
        }

        if options.same_line_leading {
            found.extend(
                self.leading
                    .iter()
                    .filter(|c| c.span.hi <= span.lo && c.start_line == start_line),
            );
        }

        if options.same_line_trailing {
            found.extend(
                self.all
                    .iter()
                    .filter(|c| c.span.lo >= span.hi && c.start_line == end_line),
            );
        }

        found
            .into_iter()
            .filter_map(|c| self.rules.clean(&c.text))
            .collect()
    }

    /// Leading comments stacked directly above `start_line`, top to bottom.
    fn block_above(&self, span: Span, start_line: usize) -> Vec<&LocatedComment> {
        let mut block = Vec::new();
        let mut expected_line = start_line.saturating_sub(1);

        for comment in self.leading.iter().rev().filter(|c| c.span.hi <= span.lo) {
            if comment.end_line >= start_line {
                continue;
            }
            if expected_line == 0 || comment.end_line != expected_line {
                break;
            }
            block.push(comment);
            expected_line = comment.start_line.saturating_sub(1);
        }

        block.reverse();
        block
    }
}
