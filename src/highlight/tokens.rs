//! Token kinds and style resolution.
//!
//! Lexical tokens carry a [`TokenKind`] from a small closed hierarchy; a
//! [`StyleTable`] maps kinds to style payloads with a parent-chain fallback,
//! so a sparse table still resolves every kind.

use std::collections::HashMap;

/// Kind of a lexical token.
///
/// Kinds form a tree rooted at [`TokenKind::Text`]: a specific kind falls
/// back to its parent when a style table has no entry for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Root kind; the catch-all for anything without a more specific style.
    Text,
    Whitespace,
    Comment,
    Keyword,
    /// Type-ish keywords (`storage.type` scopes: `fn`, `let`, `struct`, …).
    KeywordType,
    Name,
    NameFunction,
    NameType,
    Literal,
    LiteralString,
    LiteralNumber,
    Operator,
    Punctuation,
}

impl TokenKind {
    /// The parent kind, or `None` for the root.
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Text => None,
            Self::Whitespace
            | Self::Comment
            | Self::Keyword
            | Self::Name
            | Self::Literal
            | Self::Operator
            | Self::Punctuation => Some(Self::Text),
            Self::KeywordType => Some(Self::Keyword),
            Self::NameFunction | Self::NameType => Some(Self::Name),
            Self::LiteralString | Self::LiteralNumber => Some(Self::Literal),
        }
    }
}

/// Styles for token kinds, with a guaranteed catch-all root entry.
///
/// The payload type is whatever the consumer renders with: terminal styles
/// in the editor, plain marker pairs in tests and byte-stream output.
#[derive(Debug, Clone)]
pub struct StyleTable<S> {
    root: S,
    entries: HashMap<TokenKind, S>,
}

impl<S> StyleTable<S> {
    /// Create a table whose root (and therefore every kind, transitively)
    /// resolves to `root`.
    pub fn new(root: S) -> Self {
        Self {
            root,
            entries: HashMap::new(),
        }
    }

    /// Set the style for a kind. Inserting [`TokenKind::Text`] overrides the
    /// root style.
    pub fn insert(&mut self, kind: TokenKind, style: S) {
        self.entries.insert(kind, style);
    }

    /// Resolve a kind by walking up the parent chain until a kind with an
    /// entry is found.
    ///
    /// Returns the kind that matched together with its style; the matched
    /// kind is the style's identity for run coalescing. Total: the walk is
    /// bounded by the hierarchy depth and the root always resolves.
    pub fn resolve(&self, kind: TokenKind) -> (TokenKind, &S) {
        let mut current = kind;
        loop {
            if let Some(style) = self.entries.get(&current) {
                return (current, style);
            }
            let Some(parent) = current.parent() else {
                return (TokenKind::Text, &self.root);
            };
            current = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_chains_terminate_at_root() {
        let kinds = [
            TokenKind::Text,
            TokenKind::Whitespace,
            TokenKind::Comment,
            TokenKind::Keyword,
            TokenKind::KeywordType,
            TokenKind::Name,
            TokenKind::NameFunction,
            TokenKind::NameType,
            TokenKind::Literal,
            TokenKind::LiteralString,
            TokenKind::LiteralNumber,
            TokenKind::Operator,
            TokenKind::Punctuation,
        ];
        for kind in kinds {
            let mut current = kind;
            let mut steps = 0;
            while let Some(parent) = current.parent() {
                current = parent;
                steps += 1;
                assert!(steps < 8, "parent chain of {kind:?} does not terminate");
            }
            assert_eq!(current, TokenKind::Text);
        }
    }

    #[test]
    fn test_resolve_exact_entry() {
        let mut table = StyleTable::new("plain");
        table.insert(TokenKind::Keyword, "kw");
        assert_eq!(table.resolve(TokenKind::Keyword), (TokenKind::Keyword, &"kw"));
    }

    #[test]
    fn test_resolve_falls_back_to_parent() {
        let mut table = StyleTable::new("plain");
        table.insert(TokenKind::Keyword, "kw");
        // KeywordType has no entry of its own; Keyword's style wins.
        assert_eq!(
            table.resolve(TokenKind::KeywordType),
            (TokenKind::Keyword, &"kw")
        );
    }

    #[test]
    fn test_resolve_falls_back_to_root() {
        let table: StyleTable<&str> = StyleTable::new("plain");
        assert_eq!(
            table.resolve(TokenKind::LiteralNumber),
            (TokenKind::Text, &"plain")
        );
    }

    #[test]
    fn test_inserting_text_overrides_root() {
        let mut table = StyleTable::new("old-root");
        table.insert(TokenKind::Text, "new-root");
        assert_eq!(
            table.resolve(TokenKind::Operator),
            (TokenKind::Text, &"new-root")
        );
    }
}
