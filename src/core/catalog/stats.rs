/// Running counters for one extraction run.
///
/// The catalog updates the message/context/usage counters; the extraction
/// pipeline updates the file counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Source files that were parsed successfully.
    pub parsed_files: usize,
    /// Parsed files that contained at least one accepted message.
    pub parsed_files_with_messages: usize,
    /// Distinct (context, text) messages.
    pub messages: usize,
    /// Distinct messages carrying a plural form.
    pub plural_messages: usize,
    /// Every accepted occurrence, merged or new.
    pub message_usages: usize,
    /// Distinct contexts, including the default one.
    pub contexts: usize,
}

impl ExtractionStats {
    pub fn new() -> Self {
        Self::default()
    }
}
