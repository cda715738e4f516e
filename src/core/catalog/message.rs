//! Catalog message types.
//!
//! - `RawMessage`: one occurrence pulled out of a call site, before merging
//! - `Message`: a catalog entry, unique per (context, text)
//! - `ContextMessages`: one context and its sorted messages (read view)

/// One extracted occurrence of a translatable string.
///
/// Built by the extractor for every recognized call site and handed to
/// `CatalogBuilder::add_message`. Absent fields fall back to the defaults:
/// no plural, the default (empty) context, no references, no comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMessage {
    pub text: String,
    pub text_plural: Option<String>,
    pub context: Option<String>,
    pub references: Vec<String>,
    pub comments: Vec<String>,
}

impl RawMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_plural(mut self, text_plural: impl Into<String>) -> Self {
        self.text_plural = Some(text_plural.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.push(reference.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }

    /// Name of the context this occurrence belongs to (`""` when unnamed).
    pub fn context_name(&self) -> &str {
        self.context.as_deref().unwrap_or_default()
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub text_plural: Option<String>,
    /// Context name, `""` for the default context.
    pub context: String,
    /// Source locations (`file:line`), first-seen order, no duplicates.
    pub references: Vec<String>,
    /// Extracted comments, first-seen order, no duplicates.
    pub comments: Vec<String>,
}

impl Message {
    pub(crate) fn from_raw(raw: RawMessage) -> Self {
        let context = raw.context_name().to_string();
        let mut message = Self {
            text: raw.text,
            text_plural: raw.text_plural,
            context,
            references: Vec::new(),
            comments: Vec::new(),
        };
        append_unique(&mut message.references, raw.references);
        append_unique(&mut message.comments, raw.comments);
        message
    }

    pub fn is_plural(&self) -> bool {
        self.text_plural.is_some()
    }

    /// Merge a later occurrence of the same (context, text) into this entry.
    ///
    /// Plural consistency must be checked by the caller beforehand.
    pub(crate) fn merge(&mut self, raw: RawMessage) {
        if !raw.text.is_empty() {
            self.text = raw.text;
        }
        if raw.text_plural.is_some() {
            self.text_plural = raw.text_plural;
        }
        if let Some(context) = raw.context {
            self.context = context;
        }
        append_unique(&mut self.references, raw.references);
        append_unique(&mut self.comments, raw.comments);
    }
}

/// Append items not already present, keeping their incoming order.
fn append_unique(target: &mut Vec<String>, incoming: Vec<String>) {
    for item in incoming {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

/// A context and its messages, as returned by `CatalogBuilder::contexts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMessages<'a> {
    pub name: &'a str,
    pub messages: Vec<&'a Message>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_raw_message_defaults() {
        let raw = RawMessage::new("Hello");
        assert_eq!(raw.text, "Hello");
        assert_eq!(raw.text_plural, None);
        assert_eq!(raw.context_name(), "");
        assert!(raw.references.is_empty());
        assert!(raw.comments.is_empty());
    }

    #[test]
    fn test_from_raw_dedupes_incoming() {
        let raw = RawMessage::new("Hello")
            .with_context("menu")
            .with_reference("a.ts:1")
            .with_reference("a.ts:1")
            .with_reference("b.ts:2");
        let message = Message::from_raw(raw);

        assert_eq!(message.context, "menu");
        assert_eq!(message.references, vec!["a.ts:1", "b.ts:2"]);
    }

    #[test]
    fn test_merge_keeps_existing_order() {
        let mut message = Message::from_raw(
            RawMessage::new("Hello")
                .with_comment("greeting")
                .with_reference("b.ts:2"),
        );
        message.merge(
            RawMessage::new("Hello")
                .with_reference("a.ts:1")
                .with_reference("b.ts:2")
                .with_comment("greeting")
                .with_comment("shown on login"),
        );

        assert_eq!(message.references, vec!["b.ts:2", "a.ts:1"]);
        assert_eq!(message.comments, vec!["greeting", "shown on login"]);
    }

    #[test]
    fn test_merge_does_not_clear_plural() {
        let mut message = Message::from_raw(RawMessage::new("file").with_plural("files"));
        message.merge(RawMessage::new("file"));
        assert_eq!(message.text_plural.as_deref(), Some("files"));
        assert!(message.is_plural());
    }
}
