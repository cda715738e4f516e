//! Extraction options as they appear in `.glotxrc.json`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Which call arguments hold the message parts (zero-based positions).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentMapping {
    pub text: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_plural: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<usize>,
}

impl ArgumentMapping {
    pub fn text(text: usize) -> Self {
        Self {
            text,
            text_plural: None,
            context: None,
        }
    }

    pub fn with_plural(mut self, index: usize) -> Self {
        self.text_plural = Some(index);
        self
    }

    pub fn with_context(mut self, index: usize) -> Self {
        self.context = Some(index);
        self
    }
}

/// One group of translation functions sharing an argument layout.
///
/// ```json
/// { "callees": ["ngettext", "i18n.ngettext"], "arguments": { "text": 0, "textPlural": 1 } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallExtractorConfig {
    pub callees: Vec<String>,
    pub arguments: ArgumentMapping,
}

impl CallExtractorConfig {
    pub fn new<S: Into<String>>(
        callees: impl IntoIterator<Item = S>,
        arguments: ArgumentMapping,
    ) -> Self {
        Self {
            callees: callees.into_iter().map(Into::into).collect(),
            arguments,
        }
    }
}

/// The classic gettext function family.
pub fn default_call_extractors() -> Vec<CallExtractorConfig> {
    vec![
        CallExtractorConfig::new(["gettext", "_"], ArgumentMapping::text(0)),
        CallExtractorConfig::new(["ngettext"], ArgumentMapping::text(0).with_plural(1)),
        CallExtractorConfig::new(["pgettext"], ArgumentMapping::text(1).with_context(0)),
        CallExtractorConfig::new(
            ["npgettext"],
            ArgumentMapping::text(1).with_plural(2).with_context(0),
        ),
    ]
}

/// Which source comments are attached to a message as extracted comments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentOptions {
    /// Comments on the lines directly above the call.
    pub other_line_leading: bool,
    /// Comments on the call's line, before the call.
    pub same_line_leading: bool,
    /// Comments on the call's last line, after the call.
    pub same_line_trailing: bool,
    /// Only keep comments matching this pattern. The first capture group,
    /// if any, becomes the comment text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
}

impl CommentOptions {
    pub fn is_enabled(&self) -> bool {
        self.other_line_leading || self.same_line_leading || self.same_line_trailing
    }
}

/// Normalization applied to extracted message text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentOptions {
    /// Drop leading newlines and trailing whitespace.
    pub trim_white_space: bool,
    /// Keep leading spaces/tabs on each line.
    pub preserve_indentation: bool,
    /// Replace every newline with this string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_new_lines: Option<String>,
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self {
            trim_white_space: false,
            preserve_indentation: true,
            replace_new_lines: None,
        }
    }
}

static LINE_INDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^[ \t]+").unwrap());

impl ContentOptions {
    pub fn normalize(&self, content: &str) -> String {
        let mut content = if self.trim_white_space {
            content.trim_start_matches('\n').trim_end().to_string()
        } else {
            content.to_string()
        };

        if !self.preserve_indentation {
            content = LINE_INDENT.replace_all(&content, "").into_owned();
        }

        if let Some(replacement) = &self.replace_new_lines {
            content = content.replace('\n', replacement);
        }

        content
    }
}
