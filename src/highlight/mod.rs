//! Syntax highlighting for buffer lines.
//!
//! syntect supplies the lexing: it parses source into scope-annotated
//! fragments. Those scopes are mapped onto nib's own token-kind tree and
//! styled through the run coalescer with one of the built-in color schemes,
//! so the renderer receives minimal styled runs rather than one span per
//! lexical atom.

pub mod coalesce;
pub mod tokens;

use std::path::Path;
use std::sync::{Mutex, OnceLock};

use ratatui::style::{Color, Modifier, Style};
use syntect::parsing::{ParseState, ScopeStack, ScopeStackOp, SyntaxReference, SyntaxSet};

use coalesce::{StyledRun, coalesce};
use tokens::{StyleTable, TokenKind};

/// Lexes a buffer's text and styles it as coalesced runs.
///
/// One `Highlighter` per open buffer; it owns the style table for the active
/// color scheme and the syntax selected from the file's extension.
pub struct Highlighter {
    syntax: &'static SyntaxReference,
    language: &'static str,
    table: StyleTable<Style>,
}

impl Highlighter {
    /// Pick a syntax from the file extension.
    ///
    /// Returns `None` when the extension is unknown or no grammar is
    /// bundled for it; the caller renders plain text in that case.
    pub fn for_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        let (token, language) = language_for_extension(extension)?;
        let syntax = syntax_set().find_syntax_by_token(token)?;
        Some(Self {
            syntax,
            language,
            table: style_table(background_mode()),
        })
    }

    /// Display name of the detected language.
    pub const fn language(&self) -> &'static str {
        self.language
    }

    /// Highlight every line of `text`, in order.
    ///
    /// Parse state carries across lines so multi-line constructs (block
    /// comments, raw strings) keep their style. A line the parser rejects
    /// falls back to a single plain run.
    pub fn highlight(&self, text: &str) -> Vec<Vec<StyledRun<Style>>> {
        let _scope = crate::perf::scope("highlight.buffer");
        let syntax_set = syntax_set();
        let mut parse_state = ParseState::new(self.syntax);
        let mut stack = ScopeStack::new();
        let mut lines = Vec::new();

        for line in text.lines() {
            // The bundled grammars expect the newline to be present.
            let with_newline = format!("{line}\n");
            let Ok(ops) = parse_state.parse_line(&with_newline, syntax_set) else {
                lines.push(coalesce([(TokenKind::Text, line)], &self.table));
                continue;
            };
            let fragments = scoped_fragments(&ops, &mut stack, &with_newline);
            let tokens = fragments
                .into_iter()
                .map(|(kind, text)| (kind, text.trim_end_matches('\n')));
            lines.push(coalesce(tokens, &self.table));
        }

        lines
    }
}

/// Split a parsed line into `(kind, text)` fragments.
///
/// Each scope operation takes effect at its byte offset; the text between
/// consecutive offsets shares one scope stack, which maps to one token kind.
fn scoped_fragments<'a>(
    ops: &[(usize, ScopeStackOp)],
    stack: &mut ScopeStack,
    line: &'a str,
) -> Vec<(TokenKind, &'a str)> {
    let mut fragments = Vec::new();
    let mut last = 0;
    for (offset, op) in ops {
        if *offset > last {
            fragments.push((kind_for_stack(stack), &line[last..*offset]));
            last = *offset;
        }
        let _ = stack.apply(op);
    }
    if last < line.len() {
        fragments.push((kind_for_stack(stack), &line[last..]));
    }
    fragments
}

/// Map the innermost recognizable scope to a token kind.
fn kind_for_stack(stack: &ScopeStack) -> TokenKind {
    for scope in stack.scopes.iter().rev() {
        if let Some(kind) = kind_for_scope(&scope.build_string()) {
            return kind;
        }
    }
    TokenKind::Text
}

fn kind_for_scope(name: &str) -> Option<TokenKind> {
    // Longest prefixes first: "keyword.operator" must win over "keyword".
    const MAPPINGS: &[(&str, TokenKind)] = &[
        ("comment", TokenKind::Comment),
        ("keyword.operator", TokenKind::Operator),
        ("keyword", TokenKind::Keyword),
        ("storage.type", TokenKind::KeywordType),
        ("storage", TokenKind::Keyword),
        ("string", TokenKind::LiteralString),
        ("constant.numeric", TokenKind::LiteralNumber),
        ("constant.character", TokenKind::LiteralString),
        ("constant", TokenKind::Literal),
        ("entity.name.function", TokenKind::NameFunction),
        ("entity.name.type", TokenKind::NameType),
        ("entity.name.class", TokenKind::NameType),
        ("entity.name", TokenKind::Name),
        ("support.function", TokenKind::NameFunction),
        ("support.type", TokenKind::NameType),
        ("support.class", TokenKind::NameType),
        ("variable", TokenKind::Name),
        ("punctuation", TokenKind::Punctuation),
    ];
    MAPPINGS
        .iter()
        .find(|(prefix, _)| name.starts_with(prefix))
        .map(|(_, kind)| *kind)
}

/// Fixed extension → (syntect token, display name) lookup.
///
/// Extensions without a bundled grammar simply fail the syntax lookup and
/// render plain.
pub fn language_for_extension(extension: &str) -> Option<(&'static str, &'static str)> {
    let entry = match extension {
        "c" | "h" => ("c", "c"),
        "cpp" | "hpp" | "cc" => ("c++", "c++"),
        "cs" => ("c#", "c sharp"),
        "css" => ("css", "css"),
        "go" => ("go", "go"),
        "html" | "htm" => ("html", "html"),
        "java" => ("java", "java"),
        "jl" => ("julia", "julia"),
        "js" => ("js", "javascript"),
        "json" => ("json", "json"),
        "lua" => ("lua", "lua"),
        "md" | "markdown" => ("markdown", "markdown"),
        "mk" | "make" => ("makefile", "makefile"),
        "php" => ("php", "php"),
        "pl" => ("perl", "perl"),
        "py" => ("python", "python"),
        "rb" => ("ruby", "ruby"),
        "rs" => ("rust", "rust"),
        "sh" | "bash" => ("bash", "shell"),
        "sql" => ("sql", "sql"),
        "xml" => ("xml", "xml"),
        "yaml" | "yml" => ("yaml", "yaml"),
        _ => return None,
    };
    Some(entry)
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.syntax_set.load_defaults");
        SyntaxSet::load_defaults_newlines()
    })
}

/// Build the style table for a color scheme.
///
/// The table is deliberately sparse: kinds without an entry resolve through
/// their parents, down to the unstyled root.
fn style_table(mode: BackgroundMode) -> StyleTable<Style> {
    let mut table = StyleTable::new(Style::default());
    match mode {
        BackgroundMode::Dark => {
            table.insert(
                TokenKind::Comment,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            );
            table.insert(TokenKind::Keyword, Style::default().fg(Color::Magenta));
            table.insert(TokenKind::KeywordType, Style::default().fg(Color::Cyan));
            table.insert(TokenKind::LiteralString, Style::default().fg(Color::Green));
            table.insert(TokenKind::LiteralNumber, Style::default().fg(Color::Yellow));
            table.insert(TokenKind::NameFunction, Style::default().fg(Color::Blue));
            table.insert(TokenKind::NameType, Style::default().fg(Color::Cyan));
        }
        BackgroundMode::Light => {
            table.insert(
                TokenKind::Comment,
                Style::default()
                    .fg(Color::Indexed(241))
                    .add_modifier(Modifier::ITALIC),
            );
            table.insert(TokenKind::Keyword, Style::default().fg(Color::Indexed(54)));
            table.insert(TokenKind::KeywordType, Style::default().fg(Color::Indexed(24)));
            table.insert(
                TokenKind::LiteralString,
                Style::default().fg(Color::Indexed(22)),
            );
            table.insert(
                TokenKind::LiteralNumber,
                Style::default().fg(Color::Indexed(58)),
            );
            table.insert(
                TokenKind::NameFunction,
                Style::default().fg(Color::Indexed(24)),
            );
            table.insert(TokenKind::NameType, Style::default().fg(Color::Indexed(30)));
        }
    }
    table
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackgroundMode {
    Dark,
    Light,
}

/// Forced background for style selection, set from the CLI theme flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightBackground {
    Light,
    Dark,
}

static BACKGROUND_OVERRIDE: OnceLock<Mutex<Option<HighlightBackground>>> = OnceLock::new();

pub fn set_background_mode(mode: Option<HighlightBackground>) {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    let mut guard = lock.lock().expect("highlight background lock");
    *guard = mode;
}

fn background_mode() -> BackgroundMode {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    if let Ok(guard) = lock.lock()
        && let Some(mode) = *guard
    {
        return match mode {
            HighlightBackground::Light => BackgroundMode::Light,
            HighlightBackground::Dark => BackgroundMode::Dark,
        };
    }
    background_mode_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_mode_from_colorfgbg(colorfgbg: Option<&str>) -> BackgroundMode {
    let Some(value) = colorfgbg else {
        return BackgroundMode::Dark;
    };
    let bg_str = value.rsplit(';').next().unwrap_or(value);
    let Ok(bg) = bg_str.parse::<u8>() else {
        return BackgroundMode::Dark;
    };

    if bg >= 7 {
        BackgroundMode::Light
    } else {
        BackgroundMode::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn rust_highlighter() -> Highlighter {
        Highlighter::for_path(&PathBuf::from("main.rs")).expect("bundled rust grammar")
    }

    #[test]
    fn test_for_path_detects_language_from_extension() {
        let hl = rust_highlighter();
        assert_eq!(hl.language(), "rust");
    }

    #[test]
    fn test_for_path_unknown_extension_is_none() {
        assert!(Highlighter::for_path(&PathBuf::from("notes.xyz")).is_none());
        assert!(Highlighter::for_path(&PathBuf::from("no_extension")).is_none());
    }

    #[test]
    fn test_highlight_is_lossless_per_line() {
        let hl = rust_highlighter();
        let code = "fn main() {\n    let x = 1;\n}";
        let lines = hl.highlight(code);
        assert_eq!(lines.len(), 3);
        for (line, runs) in code.lines().zip(&lines) {
            let joined: String = runs.iter().map(|r| r.text.as_str()).collect();
            assert_eq!(joined, line);
        }
    }

    #[test]
    fn test_highlight_rust_styles_keywords() {
        let hl = rust_highlighter();
        let lines = hl.highlight("fn main() { let x = 1; }");
        let styled = lines[0]
            .iter()
            .any(|run| matches!(run.kind, TokenKind::Keyword | TokenKind::KeywordType));
        assert!(styled, "expected a keyword run in {:?}", lines[0]);
    }

    #[test]
    fn test_highlight_carries_state_across_lines() {
        let hl = rust_highlighter();
        let lines = hl.highlight("/*\nplain words\n*/");
        let middle: Vec<_> = lines[1].iter().map(|r| r.kind).collect();
        assert_eq!(middle, vec![TokenKind::Comment], "inside a block comment");
    }

    #[test]
    fn test_highlight_coalesces_adjacent_plain_fragments() {
        let hl = rust_highlighter();
        let lines = hl.highlight("let y = 10;");
        for runs in &lines {
            for pair in runs.windows(2) {
                assert_ne!(pair[0].kind, pair[1].kind, "adjacent runs must differ");
            }
        }
    }

    #[test]
    fn test_kind_for_scope_prefers_longest_prefix() {
        assert_eq!(
            kind_for_scope("keyword.operator.assignment.rust"),
            Some(TokenKind::Operator)
        );
        assert_eq!(kind_for_scope("keyword.control.rust"), Some(TokenKind::Keyword));
        assert_eq!(kind_for_scope("meta.block.rust"), None);
    }

    #[test]
    fn test_colorfgbg_dark_background() {
        let mode = background_mode_from_colorfgbg(Some("15;0"));
        assert_eq!(mode, BackgroundMode::Dark);
    }

    #[test]
    fn test_colorfgbg_light_background() {
        let mode = background_mode_from_colorfgbg(Some("0;15"));
        assert_eq!(mode, BackgroundMode::Light);
    }

    #[test]
    fn test_colorfgbg_garbage_defaults_to_dark() {
        assert_eq!(background_mode_from_colorfgbg(Some("rgb:ff/ff")), BackgroundMode::Dark);
        assert_eq!(background_mode_from_colorfgbg(None), BackgroundMode::Dark);
    }

    #[test]
    fn test_background_override_roundtrip() {
        set_background_mode(Some(HighlightBackground::Light));
        assert_eq!(background_mode(), BackgroundMode::Light);
        set_background_mode(Some(HighlightBackground::Dark));
        assert_eq!(background_mode(), BackgroundMode::Dark);
        set_background_mode(None);
    }

    #[test]
    fn test_style_tables_leave_root_unstyled() {
        for mode in [BackgroundMode::Dark, BackgroundMode::Light] {
            let table = style_table(mode);
            let (kind, style) = table.resolve(TokenKind::Whitespace);
            assert_eq!(kind, TokenKind::Text);
            assert_eq!(*style, Style::default());
        }
    }
}
