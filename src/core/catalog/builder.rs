//! Catalog assembly.
//!
//! `CatalogBuilder` is the single aggregation point of an extraction run.
//! Every recognized call site is turned into a `RawMessage` and fed through
//! `add_message`, which deduplicates by (context, text), merges repeated
//! occurrences and keeps plural forms consistent. Reads return views sorted
//! by context name, then message text, using the injected comparator.
//!
//! The builder is not synchronized: when files are processed in parallel,
//! collect the per-file results first and apply them from one thread.

use std::collections::HashMap;

use thiserror::Error;

use super::compare::{Comparator, locale_compare};
use super::message::{ContextMessages, Message, RawMessage};
use super::stats::ExtractionStats;

/// Errors raised by `CatalogBuilder::add_message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The same (context, text) was given two different plural forms.
    #[error(
        "incompatible plurals found for '{text}': '{existing}' and '{incoming}'"
    )]
    PluralConflict {
        text: String,
        existing: String,
        incoming: String,
    },

    /// The record broke a precondition; this is a bug in whatever built it.
    #[error("invalid message: {reason}")]
    InvalidMessage { reason: String },
}

/// Messages of one context, keyed by singular text.
type ContextMap = HashMap<String, Message>;

pub struct CatalogBuilder {
    contexts: HashMap<String, ContextMap>,
    comparator: Comparator,
    stats: Option<ExtractionStats>,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder {
    /// Create a builder that sorts with `locale_compare` and keeps no stats.
    pub fn new() -> Self {
        Self {
            contexts: HashMap::new(),
            comparator: locale_compare,
            stats: None,
        }
    }

    pub fn with_comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = comparator;
        self
    }

    pub fn with_stats(mut self, stats: ExtractionStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn stats(&self) -> Option<&ExtractionStats> {
        self.stats.as_ref()
    }

    /// Counters the pipeline updates itself (file counts).
    pub fn stats_mut(&mut self) -> Option<&mut ExtractionStats> {
        self.stats.as_mut()
    }

    /// Add one occurrence to the catalog.
    ///
    /// Creates the context and message on first sight, otherwise merges into
    /// the existing message. Fails without touching the catalog when the
    /// record is invalid or its plural form contradicts the stored one.
    pub fn add_message(&mut self, raw: RawMessage) -> Result<(), CatalogError> {
        if raw.text.is_empty() {
            return Err(CatalogError::InvalidMessage {
                reason: "message text must not be empty".to_string(),
            });
        }

        if let Some(existing) = self
            .contexts
            .get(raw.context_name())
            .and_then(|context| context.get(&raw.text))
            && let (Some(existing), Some(incoming)) = (&existing.text_plural, &raw.text_plural)
            && existing != incoming
        {
            return Err(CatalogError::PluralConflict {
                text: raw.text,
                existing: existing.clone(),
                incoming: incoming.clone(),
            });
        }

        let context_name = raw.context_name().to_string();
        if !self.contexts.contains_key(&context_name) {
            bump(&mut self.stats, |s| s.contexts += 1);
        }
        let context = self.contexts.entry(context_name).or_default();

        match context.get_mut(&raw.text) {
            Some(message) => {
                if message.text_plural.is_none() && raw.text_plural.is_some() {
                    bump(&mut self.stats, |s| s.plural_messages += 1);
                }
                message.merge(raw);
            }
            None => {
                let message = Message::from_raw(raw);
                bump(&mut self.stats, |s| {
                    s.messages += 1;
                    if message.is_plural() {
                        s.plural_messages += 1;
                    }
                });
                context.insert(message.text.clone(), message);
            }
        }

        bump(&mut self.stats, |s| s.message_usages += 1);
        Ok(())
    }

    /// All messages, sorted by context name and then by text.
    pub fn messages(&self) -> Vec<&Message> {
        self.contexts()
            .into_iter()
            .flat_map(|context| context.messages)
            .collect()
    }

    /// Every context with its sorted messages, sorted by context name.
    pub fn contexts(&self) -> Vec<ContextMessages<'_>> {
        let mut names: Vec<&String> = self.contexts.keys().collect();
        names.sort_by(|a, b| (self.comparator)(a, b));

        names
            .into_iter()
            .map(|name| ContextMessages {
                name,
                messages: self.messages_by_context(name),
            })
            .collect()
    }

    /// Sorted messages of one context; empty when the context is unknown.
    pub fn messages_by_context(&self, name: &str) -> Vec<&Message> {
        let Some(context) = self.contexts.get(name) else {
            return Vec::new();
        };
        let mut messages: Vec<&Message> = context.values().collect();
        messages.sort_by(|a, b| (self.comparator)(&a.text, &b.text));
        messages
    }
}

fn bump(stats: &mut Option<ExtractionStats>, update: impl FnOnce(&mut ExtractionStats)) {
    if let Some(stats) = stats.as_mut() {
        update(stats);
    }
}
