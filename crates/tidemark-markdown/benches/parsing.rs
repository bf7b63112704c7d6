use criterion::{Criterion, criterion_group, criterion_main};
use tidemark_markdown::parse_document;

fn generate_document(sections: usize) -> String {
    let mut doc = String::from("---\ntitle: bench\n---\n");
    for i in 0..sections {
        doc.push_str(&format!(
            "## Section {i}\n\nSome *styled* text with `code` and a \
             [link](https://example.com/page).\n\n```ts\nconst x{i} = {i};\n```\n\n"
        ));
    }
    doc
}

fn bench_parse_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let content = generate_document(100);
    group.bench_function("parse_document", |b| {
        b.iter(|| {
            let parsed = parse_document(std::hint::black_box(&content));
            std::hint::black_box(parsed);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse_document);
criterion_main!(benches);
