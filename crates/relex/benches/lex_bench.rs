use criterion::{Criterion, criterion_group, criterion_main};
use relex::{CompiledLexer, LexerBuilder};
use std::hint::black_box;

const DIGIT: &str = "01|2|3|4|5|6|7|8|9|";
const LETTER: &str = "ab|c|d|e|f|g|h|";

fn sample_lexer() -> CompiledLexer {
    let number = format!("{DIGIT}{DIGIT}*.");
    let ident = format!("{LETTER}{LETTER}*.");
    LexerBuilder::new()
        .rule("KEYWORD", "if.")
        .rule("KEYWORD", "el.s.e.")
        .rule("IDENTIFIER", &ident)
        .rule("NUMBER", &number)
        .rule("PLUS", "+")
        .rule("ASSIGN", "=")
        .rule("SEMI", ";")
        .build()
}

fn sample_input() -> String {
    "if abc = 42 + 17; else fed = 9;\n".repeat(64)
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_lexer", |b| {
        b.iter(|| black_box(sample_lexer()));
    });
}

fn bench_tokenize(c: &mut Criterion) {
    let lexer = sample_lexer();
    let input = sample_input();
    c.bench_function("tokenize_2k_chars", |b| {
        b.iter(|| black_box(lexer.tokenize(black_box(&input))));
    });
}

criterion_group!(benches, bench_build, bench_tokenize);
criterion_main!(benches);
