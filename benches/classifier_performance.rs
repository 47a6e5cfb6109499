use clarion_fence_lib::detection::{classify, detect_veto, extract_signals};
use clarion_fence_lib::fence::CaretFenceState;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Clarion source of roughly `procedures` procedures
fn generate_clarion(procedures: usize) -> String {
    let mut content = String::with_capacity(procedures * 300);
    content.push_str("  MEMBER('App.clw')\n\n");
    for i in 0..procedures {
        content.push_str(&format!("Proc{i} PROCEDURE(LONG pId)\n"));
        content.push_str("Total   DECIMAL(9,2)\nName    STRING(40)\n  CODE\n");
        content.push_str("  LOOP\n    NEXT(Items)\n    IF ERRORCODE() THEN BREAK.\n");
        content.push_str("    CASE ITM:Kind\n    OF 1\n      Total += ITM:Amount\n    END\n  END\n");
        content.push_str(&format!("  MESSAGE('Done ' & CLIP(Name))\n  RETURN Total  ! {i}\n\n"));
    }
    content
}

/// Markdown with `blocks` fenced blocks, caret at the end
fn generate_markdown(blocks: usize) -> String {
    let mut content = String::new();
    for i in 0..blocks {
        content.push_str(&format!("## Section {i}\n\nSome prose here.\n\n```clarion\nLOOP\nEND\n```\n\n"));
    }
    content
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for size in [1, 10, 100] {
        let source = generate_clarion(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| classify(black_box(source)))
        });
    }
    group.finish();

    let c_source = "int main() {\n  return 0;\n}\n".repeat(100);
    c.bench_function("classify_vetoed_brace", |b| b.iter(|| classify(black_box(&c_source))));
}

fn bench_stages(c: &mut Criterion) {
    let source = generate_clarion(50);
    c.bench_function("extract_signals", |b| b.iter(|| extract_signals(black_box(&source))));
    c.bench_function("detect_veto", |b| b.iter(|| detect_veto(black_box(&source))));

    let markdown = generate_markdown(200);
    c.bench_function("caret_fence_state", |b| {
        b.iter(|| CaretFenceState::at(black_box(&markdown), markdown.len()))
    });
}

criterion_group!(benches, bench_classify, bench_stages);
criterion_main!(benches);
