//! Benchmarks for token run coalescing.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use nib::highlight::coalesce::coalesce;
use nib::highlight::tokens::{StyleTable, TokenKind};

fn bench_coalesce_line(c: &mut Criterion) {
    let mut table = StyleTable::new(("", ""));
    table.insert(TokenKind::Keyword, ("<K>", "</K>"));
    table.insert(TokenKind::LiteralString, ("<S>", "</S>"));
    table.insert(TokenKind::Comment, ("<C>", "</C>"));

    let kinds = [
        TokenKind::Keyword,
        TokenKind::Keyword,
        TokenKind::Whitespace,
        TokenKind::Name,
        TokenKind::Operator,
        TokenKind::LiteralString,
        TokenKind::LiteralString,
        TokenKind::Punctuation,
    ];
    let tokens: Vec<(TokenKind, &str)> = kinds
        .iter()
        .cycle()
        .take(2_000)
        .map(|&kind| (kind, "tok "))
        .collect();

    c.bench_function("coalesce_line", |b| {
        b.iter(|| coalesce(black_box(tokens.iter().copied()), &table))
    });
}

criterion_group!(benches, bench_coalesce_line);
criterion_main!(benches);
