//! Token run coalescing.
//!
//! The lexer hands over one token per lexical atom, which is far more
//! granular than styling needs: three adjacent keyword fragments should cost
//! one styled emission, not three. [`coalesce`] merges every maximal run of
//! consecutive tokens that resolve to the same style-table entry into a
//! single [`StyledRun`], so the number of emitted runs equals the number of
//! style transitions in the input.

use super::tokens::{StyleTable, TokenKind};

/// A maximal sequence of consecutive tokens sharing one resolved style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun<S> {
    /// The style-table kind that matched (style identity).
    pub kind: TokenKind,
    /// The matched entry's payload.
    pub style: S,
    /// Concatenated text of the tokens the run absorbed.
    pub text: String,
}

/// Merge a token stream into minimal styled runs.
///
/// Each fragment's kind is resolved through `table` independently; fragments
/// whose *resolved* kinds are equal accumulate into one run. Runs are driven
/// by which table entry matched, not by the payload's contents, so two kinds
/// mapping to visually identical styles still break a run if they match
/// different entries. An empty input produces no runs.
pub fn coalesce<'a, S, I>(tokens: I, table: &StyleTable<S>) -> Vec<StyledRun<S>>
where
    S: Clone,
    I: IntoIterator<Item = (TokenKind, &'a str)>,
{
    let mut runs = Vec::new();
    let mut pending: Option<(TokenKind, String)> = None;

    for (kind, text) in tokens {
        let (resolved, _) = table.resolve(kind);
        match pending.as_mut() {
            Some((last, accumulated)) if *last == resolved => accumulated.push_str(text),
            _ => {
                flush(&mut runs, pending.take(), table);
                pending = Some((resolved, text.to_string()));
            }
        }
    }
    flush(&mut runs, pending, table);

    runs
}

fn flush<S: Clone>(
    runs: &mut Vec<StyledRun<S>>,
    pending: Option<(TokenKind, String)>,
    table: &StyleTable<S>,
) {
    if let Some((kind, text)) = pending
        && !text.is_empty()
    {
        let (_, style) = table.resolve(kind);
        runs.push(StyledRun {
            kind,
            style: style.clone(),
            text,
        });
    }
}

/// Render runs as a plain character stream, wrapping each run once in its
/// style's `(start, end)` marker pair.
pub fn render_runs<S: AsRef<str>>(runs: &[StyledRun<(S, S)>]) -> String {
    let mut out = String::new();
    for run in runs {
        let (start, end) = &run.style;
        out.push_str(start.as_ref());
        out.push_str(&run.text);
        out.push_str(end.as_ref());
    }
    out
}
