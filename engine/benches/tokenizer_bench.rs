use criterion::{criterion_group, criterion_main, Criterion};
use engine::tokenizer::tokenize;

const TEXT: &str = "Data science combines statistics, programming, and domain expertise to extract \
insights from data. Machine learning is a subset of artificial intelligence; it uses algorithms \
to learn from data. Web development involves creating websites and web applications.";

fn bench_tokenize(c: &mut Criterion) {
    let text = TEXT.repeat(50);
    c.bench_function("tokenize_paragraphs", |b| b.iter(|| tokenize(&text)));
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
