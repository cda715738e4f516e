use anyhow::{Result, anyhow};
use std::path::Path;
use std::sync::Arc;
use swc_common::{
    FileName, Globals, SourceMap,
    comments::{Comment, SingleThreadedComments},
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// Extensions handed to the parser.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Comments of a file, split the way swc attaches them to tokens.
///
/// Leading comments precede a token (own line or same line before code);
/// trailing comments follow a token on the same line. Both lists are sorted
/// by position. Extracted during parsing so the result no longer holds
/// swc's single-threaded comment store and can cross threads.
#[derive(Debug, Clone, Default)]
pub struct ExtractedComments {
    pub leading: Vec<Comment>,
    pub trailing: Vec<Comment>,
}

impl ExtractedComments {
    /// Extract comments from SingleThreadedComments.
    /// This must be called before SingleThreadedComments is dropped.
    pub fn from_swc(store: &SingleThreadedComments) -> Self {
        let (leading, trailing) = store.borrow_all();
        Self {
            leading: sorted(leading.values().flatten()),
            trailing: sorted(trailing.values().flatten()),
        }
    }

    /// Every comment, ordered by position.
    pub fn all(&self) -> Vec<&Comment> {
        let mut all: Vec<&Comment> = self.leading.iter().chain(&self.trailing).collect();
        all.sort_by_key(|c| c.span.lo);
        all
    }
}

fn sorted<'a>(comments: impl Iterator<Item = &'a Comment>) -> Vec<Comment> {
    let mut comments: Vec<Comment> = comments.cloned().collect();
    comments.sort_by_key(|c| c.span.lo);
    comments
}

pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub comments: ExtractedComments,
}

/// Pick the swc syntax for a file from its extension.
///
/// TypeScript files get the TypeScript parser (with TSX only for `.tsx`);
/// everything else is parsed as JavaScript with JSX enabled.
pub fn syntax_for_path(file_path: &str) -> Syntax {
    let extension = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    match extension {
        "ts" | "mts" | "cts" => Syntax::Typescript(TsSyntax {
            decorators: true,
            ..Default::default()
        }),
        "tsx" => Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            decorators: true,
            ..Default::default()
        }),
    }
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e))
}

/// Parse a JavaScript/TypeScript source string into an AST.
///
/// Accepts a shared SourceMap for thread-safe parallel parsing.
pub fn parse_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(
            syntax_for_path(file_path),
            StringInput::from(&*source_file),
            Some(&comments),
        );

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        // Extract comments immediately (before SingleThreadedComments drops)
        let extracted_comments = ExtractedComments::from_swc(&comments);

        Ok(ParsedSource {
            module,
            source_map,
            comments: extracted_comments,
        })
    })
}
