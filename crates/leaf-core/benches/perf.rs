use criterion::{black_box, criterion_group, criterion_main, Criterion};
use leaf_core::{parse_document, RecordNavigator};

fn generate_document(rows: usize) -> String {
    let companies = ["Acme", "Zenith, Ltd", "Globex", "Initech", "Umbrella"];
    let mut text = String::from("First Name,URL,Email Address,Company,Position\n");
    for i in 0..rows {
        let company = companies[i % companies.len()];
        text.push_str(&format!(
            "person{i},https://example.com/{i},person{i}@example.com,\"{company}\",Engineer\n"
        ));
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let text = generate_document(10_000);
    c.bench_function("parse_document_10k", |b| {
        b.iter(|| parse_document(black_box(&text)).map(|d| d.len()))
    });
}

fn bench_filter(c: &mut Criterion) {
    let text = generate_document(10_000);
    let nav = RecordNavigator::from_text(&text).expect("dataset");
    c.bench_function("apply_filter_10k", |b| {
        b.iter(|| {
            let mut nav = nav.clone();
            nav.apply_filter(black_box("zenith"))
        })
    });
}

criterion_group!(benches, bench_parse, bench_filter);
criterion_main!(benches);
