//! The extraction pipeline.
//!
//! `ExtractContext` ties the pieces together:
//!
//! 1. **Setup**: load configuration (CLI args > `.glotxrc.json` > defaults)
//!    and scan the source files
//! 2. **Extraction**: read, parse and extract every file in parallel
//! 3. **Aggregation**: feed the per-file results, ordered by path, into one
//!    `CatalogBuilder` from a single thread
//!
//! Problems that do not stop the run (unparsable files, conflicting plural
//! forms, translation calls without static arguments) are returned as issues
//! next to the catalog.

use std::{
    collections::BTreeSet,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use anyhow::{Result, anyhow};
use colored::Colorize;
use rayon::prelude::*;
use swc_common::SourceMap;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        catalog::{CatalogBuilder, CatalogError, ExtractionStats},
        extract::{ExtractionRules, FileExtraction, extract_file},
        file_scanner::{ScanOptions, scan_files},
        parsers::source::parse_source,
    },
    issues::{Issue, ParseErrorIssue, PluralConflictIssue, SkippedCallIssue},
};

/// Outcome of one extraction run.
pub struct ExtractResult {
    pub catalog: CatalogBuilder,
    pub issues: Vec<Issue>,
}

impl ExtractResult {
    pub fn stats(&self) -> ExtractionStats {
        self.catalog.stats().copied().unwrap_or_default()
    }
}

pub struct ExtractContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root: where the config was searched and relative paths start.
    pub root_dir: PathBuf,

    /// Directory that message references are relative to.
    pub source_dir: PathBuf,

    /// Where the template is written.
    pub output_path: PathBuf,

    /// Source files to extract from, ordered by path.
    pub files: BTreeSet<PathBuf>,

    pub verbose: bool,
}

impl ExtractContext {
    /// Load configuration and scan source files.
    ///
    /// Fails when the config file is invalid or the source root is not valid UTF-8.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        if root_dir.to_str().is_none() {
            return Err(anyhow!("Invalid path: {:?}", root_dir));
        }

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "{} No {} found, using default configuration",
                "note:".bold().cyan(),
                CONFIG_FILE_NAME
            );
        }
        let mut config = config_result.config;

        if let Some(output) = &common_args.output {
            config.output = output.to_string_lossy().to_string();
        }

        let source_dir = resolve_from_root(&root_dir, &config.source_root);
        let output_path = resolve_from_root(&root_dir, &config.output);

        let scan_result = scan_files(
            &source_dir,
            ScanOptions {
                includes: &config.includes,
                ignores: &config.ignores,
                ignore_test_files: config.ignore_test_files,
                verbose,
            },
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            root_dir,
            source_dir,
            output_path,
            files: scan_result.files,
            verbose,
        })
    }

    /// Run extraction over all scanned files.
    pub fn extract(&self) -> Result<ExtractResult> {
        let rules = ExtractionRules::new(
            &self.config.extractors,
            self.config.content.clone(),
            self.config.comments.clone(),
        )?;

        // Parallel read + parse + extract; each file gets its own SourceMap
        let mut results: Vec<(String, Result<FileExtraction>)> = self
            .files
            .par_iter()
            .map(|path| {
                let reference_path = self.reference_path(path);
                let result = self.extract_one(path, &reference_path, &rules);
                (reference_path, result)
            })
            .collect();

        // Aggregation order decides reference order, keep it stable
        results.sort_by(|a, b| a.0.cmp(&b.0));

        let mut catalog = CatalogBuilder::new()
            .with_comparator(self.config.sort.comparator())
            .with_stats(ExtractionStats::new());
        let mut issues = Vec::new();

        for (reference_path, result) in results {
            match result {
                Ok(extraction) => self.aggregate(&mut catalog, &mut issues, extraction)?,
                Err(e) => {
                    if self.verbose {
                        eprintln!("{} {} - {}", "warning:".bold().yellow(), reference_path, e);
                    }
                    issues.push(Issue::ParseError(ParseErrorIssue {
                        file_path: reference_path,
                        error: e.to_string(),
                    }));
                }
            }
        }

        issues.sort();
        Ok(ExtractResult { catalog, issues })
    }

    fn extract_one(
        &self,
        path: &Path,
        reference_path: &str,
        rules: &ExtractionRules,
    ) -> Result<FileExtraction> {
        let code = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read file: {}", e))?;
        let parsed = parse_source(code, reference_path, Arc::new(SourceMap::default()))?;
        Ok(extract_file(&parsed, reference_path, rules))
    }

    fn aggregate(
        &self,
        catalog: &mut CatalogBuilder,
        issues: &mut Vec<Issue>,
        extraction: FileExtraction,
    ) -> Result<()> {
        let mut accepted = 0;

        for raw in extraction.messages {
            let reference = raw.references.first().cloned().unwrap_or_default();
            match catalog.add_message(raw) {
                Ok(()) => accepted += 1,
                Err(CatalogError::PluralConflict {
                    text,
                    existing,
                    incoming,
                }) => issues.push(Issue::PluralConflict(PluralConflictIssue::at_reference(
                    &reference, text, existing, incoming,
                ))),
                Err(e @ CatalogError::InvalidMessage { .. }) => {
                    return Err(anyhow!(e).context(format!("While adding {}", reference)));
                }
            }
        }

        issues.extend(extraction.skipped.into_iter().map(|skipped| {
            Issue::SkippedCall(SkippedCallIssue::at_reference(
                &skipped.reference,
                skipped.callee,
                skipped.reason.to_string(),
            ))
        }));

        if let Some(stats) = catalog.stats_mut() {
            stats.parsed_files += 1;
            if accepted > 0 {
                stats.parsed_files_with_messages += 1;
            }
        }
        Ok(())
    }

    /// Path of `file` as written into references: relative to the source
    /// directory, with forward slashes.
    fn reference_path(&self, file: &Path) -> String {
        file.strip_prefix(&self.source_dir)
            .unwrap_or(file)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

/// Resolve a configured path against the project root.
fn resolve_from_root(root_dir: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        root_dir.join(p.strip_prefix(".").unwrap_or(p))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::{TempDir, tempdir};

    use super::*;
    use crate::issues::{Report, Severity};

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        for (path, content) in files {
            let path = dir.path().join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    fn context(dir: &TempDir) -> ExtractContext {
        ExtractContext::new(&CommonArgs {
            source_root: Some(dir.path().to_path_buf()),
            output: None,
            verbose: false,
        })
        .unwrap()
    }

    #[test]
    fn test_output_path_defaults_to_config() {
        let dir = project(&[]);
        let ctx = context(&dir);
        assert_eq!(ctx.output_path, dir.path().join("locales/messages.pot"));
    }

    #[test]
    fn test_resolve_from_root() {
        assert_eq!(
            resolve_from_root(Path::new("."), "./locales/messages.pot"),
            PathBuf::from("./locales/messages.pot")
        );
        assert_eq!(
            resolve_from_root(Path::new("web"), "./locales/messages.pot"),
            PathBuf::from("web/locales/messages.pot")
        );
        assert_eq!(
            resolve_from_root(Path::new("web"), "po/app.pot"),
            PathBuf::from("web/po/app.pot")
        );
    }

    #[test]
    fn test_output_override() {
        let dir = project(&[]);
        let ctx = ExtractContext::new(&CommonArgs {
            source_root: Some(dir.path().to_path_buf()),
            output: Some(PathBuf::from("po/app.pot")),
            verbose: false,
        })
        .unwrap();
        assert_eq!(ctx.output_path, dir.path().join("po/app.pot"));
    }

    #[test]
    fn test_extract_merges_across_files() {
        let dir = project(&[
            ("src/b.ts", "gettext('Save');\nngettext('One file', '{n} files', n);"),
            ("src/a.ts", "\n\ngettext('Save');"),
            ("src/empty.ts", "export const x = 1;"),
        ]);

        let result = context(&dir).extract().unwrap();
        assert!(result.issues.is_empty());

        let messages = result.catalog.messages();
        let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["One file", "Save"]);
        assert_eq!(messages[1].references, vec!["src/a.ts:3", "src/b.ts:1"]);

        assert_eq!(
            result.stats(),
            ExtractionStats {
                parsed_files: 3,
                parsed_files_with_messages: 2,
                messages: 2,
                plural_messages: 1,
                message_usages: 3,
                contexts: 1,
            }
        );
    }

    #[test]
    fn test_extract_reports_plural_conflict() {
        let dir = project(&[
            ("src/a.ts", "ngettext('One file', '{n} files', n);"),
            ("src/b.ts", "\nngettext('One file', 'Many files', n);"),
        ]);

        let result = context(&dir).extract().unwrap();

        assert_eq!(result.issues.len(), 1);
        let Issue::PluralConflict(issue) = &result.issues[0] else {
            panic!("expected a plural conflict, got {:?}", result.issues[0]);
        };
        assert_eq!(issue.file_path, "src/b.ts");
        assert_eq!(issue.line, 2);
        assert_eq!(issue.existing, "{n} files");
        assert_eq!(issue.incoming, "Many files");

        let messages = result.catalog.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text_plural.as_deref(), Some("{n} files"));
        assert_eq!(messages[0].references, vec!["src/a.ts:1"]);
    }

    #[test]
    fn test_extract_reports_parse_error() {
        let dir = project(&[
            ("src/ok.ts", "gettext('Hello');"),
            ("src/broken.ts", "const = ;"),
        ]);

        let result = context(&dir).extract().unwrap();

        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].location().path(), "src/broken.ts");
        assert_eq!(result.catalog.messages().len(), 1);
        assert_eq!(result.stats().parsed_files, 1);
    }

    #[test]
    fn test_extract_reports_skipped_calls_as_warnings() {
        let dir = project(&[(
            "src/app.ts",
            "gettext('Kept');\n\ngettext(label);\nngettext('One', plural, n);",
        )]);

        let result = context(&dir).extract().unwrap();

        let found: Vec<(String, usize, Severity)> = result
            .issues
            .iter()
            .map(|i| {
                let loc = i.location();
                (loc.path().to_string(), loc.line(), i.severity())
            })
            .collect();
        assert_eq!(
            found,
            vec![
                ("src/app.ts".to_string(), 3, Severity::Warning),
                ("src/app.ts".to_string(), 4, Severity::Warning),
            ]
        );
        assert_eq!(
            result.issues[1].details().as_deref(),
            Some("'textPlural' argument is not a string literal")
        );
        assert_eq!(result.catalog.messages().len(), 1);
    }

    #[test]
    fn test_extract_uses_config_file() {
        let dir = project(&[
            (
                ".glotxrc.json",
                r#"{
                    "includes": ["app"],
                    "sort": "codePoint",
                    "extractors": [
                        { "callees": ["this.i18n.t"], "arguments": { "text": 0, "context": 1 } }
                    ]
                }"#,
            ),
            (
                "app/view.ts",
                "class View { render() { this.i18n.t('b'); this.i18n.t('B', 'menu'); gettext('ignored'); } }",
            ),
            ("src/other.ts", "this.i18n.t('not included');"),
        ]);

        let result = context(&dir).extract().unwrap();

        let contexts = result.catalog.contexts();
        let names: Vec<&str> = contexts.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["", "menu"]);
        assert_eq!(contexts[0].messages[0].text, "b");
        assert_eq!(contexts[1].messages[0].text, "B");
        assert_eq!(contexts[0].messages[0].references, vec!["app/view.ts:1"]);
    }
}
