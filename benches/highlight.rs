//! Benchmarks for full and incremental highlighting
//!
//! Run with: cargo bench highlight

use restyle::syntax::{classify, LexState};
use restyle::Session;

fn main() {
    divan::main();
}

fn generate_source(lines: usize) -> String {
    let mut source = String::new();
    for i in 0..lines {
        match i % 5 {
            0 => source.push_str("#include <stdio.h>\n"),
            1 => source.push_str("/* block\n   comment */ int x = 0;\n"),
            2 => source.push_str("Fl_Window *w = new Fl_Window(10, 20); // window\n"),
            3 => source.push_str("if (x) return \"str\\\"ing\";\n"),
            _ => source.push_str("    value = compute(value, 42);\n"),
        }
    }
    source
}

// ============================================================================
// Full classification
// ============================================================================

#[divan::bench(args = [100, 1000, 10000])]
fn classify_full(bencher: divan::Bencher, lines: usize) {
    let source = generate_source(lines);
    bencher.bench_local(|| divan::black_box(classify(source.as_bytes(), LexState::Plain)));
}

// ============================================================================
// Incremental edits
// ============================================================================

#[divan::bench(args = [100, 1000, 10000])]
fn typing_burst_middle(bencher: divan::Bencher, lines: usize) {
    let source = generate_source(lines);
    bencher.bench_local(|| {
        let mut session = Session::with_text(&source).unwrap();
        let mid = source.len() / 2;
        for (i, ch) in "counter += 1;".chars().enumerate() {
            session.insert(mid + i, ch.to_string()).unwrap();
        }
        divan::black_box(session.tags().len())
    });
}

#[divan::bench(args = [100, 1000, 10000])]
fn open_comment_at_start(bencher: divan::Bencher, lines: usize) {
    let source = generate_source(lines);
    bencher.bench_local(|| {
        let mut session = Session::with_text(&source).unwrap();
        divan::black_box(session.insert(0, "/*").unwrap())
    });
}
