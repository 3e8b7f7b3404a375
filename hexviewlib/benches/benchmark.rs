use criterion::{Criterion, criterion_group, criterion_main};
use hexviewlib::{Config, Direction, MemorySource, NoInterrupt, Pattern, SearchEngine, ViewWindow};
use rand::Rng;

const DATA_SIZE: usize = 16 * 1024 * 1024;

fn random_data() -> Vec<u8> {
    // Keep the high bit set so ASCII patterns never match by accident
    rand::rng()
        .sample_iter(rand::distr::StandardUniform)
        .take(DATA_SIZE)
        .map(|b: u8| b | 0x80)
        .collect()
}

#[allow(clippy::unwrap_used)]
fn bench_search(c: &mut Criterion) {
    let mut data = random_data();
    data[DATA_SIZE - 10..DATA_SIZE - 4].copy_from_slice(b"needle");
    let mut source = MemorySource::new(data);
    let mut engine = SearchEngine::new(&Config::default());

    let text = Pattern::text("needle").unwrap();
    let regex = Pattern::regex(r"ne+dle").unwrap();

    c.bench_function("search_text_forward_16mb", |b| {
        b.iter(|| {
            let res = engine
                .find(
                    &mut source,
                    std::hint::black_box(&text),
                    0,
                    Direction::Forward,
                    false,
                    &mut NoInterrupt,
                )
                .unwrap();
            std::hint::black_box(res);
        });
    });

    c.bench_function("search_text_backward_16mb", |b| {
        b.iter(|| {
            let res = engine
                .find(
                    &mut source,
                    std::hint::black_box(&text),
                    (DATA_SIZE - 11) as u64,
                    Direction::Backward,
                    true,
                    &mut NoInterrupt,
                )
                .unwrap();
            std::hint::black_box(res);
        });
    });

    c.bench_function("search_regex_forward_16mb", |b| {
        b.iter(|| {
            let res = engine
                .find(
                    &mut source,
                    std::hint::black_box(&regex),
                    0,
                    Direction::Forward,
                    false,
                    &mut NoInterrupt,
                )
                .unwrap();
            std::hint::black_box(res);
        });
    });
}

#[allow(clippy::unwrap_used)]
fn bench_paging(c: &mut Criterion) {
    let mut source = MemorySource::new(random_data());
    let mut view = ViewWindow::new(DATA_SIZE as u64, &Config::default());
    view.resize(50);

    c.bench_function("page_through_16mb", |b| {
        b.iter(|| {
            view.goto_start();
            for _ in 0..100 {
                view.page(1);
                view.ensure_materialized(&mut source).unwrap();
            }
            std::hint::black_box(view.cursor());
        });
    });
}

criterion_group!(
    name = hexviewlib_benches;
    config = Criterion::default().sample_size(20);
    targets = bench_search, bench_paging
);
criterion_main!(hexviewlib_benches);
