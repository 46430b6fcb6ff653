use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use proxycat::domain::{Hostname, ListName, ListSnapshot};
use proxycat::policy;

fn snapshot(entries: usize) -> ListSnapshot {
    let mut lists = ListSnapshot::default();
    for i in 0..entries {
        lists
            .add(ListName::Blacklist, Hostname::new(format!("host{i}.example")))
            .unwrap();
    }
    lists
}

fn bench_render(c: &mut Criterion) {
    let lists = snapshot(1_000);

    c.bench_function("render_1000_hosts", |b| {
        b.iter(|| policy::render(black_box(&lists)))
    });
}

fn bench_add(c: &mut Criterion) {
    c.bench_function("add_to_1000_hosts", |b| {
        b.iter_batched(
            || snapshot(1_000),
            |mut lists| {
                lists
                    .add(ListName::Whitelist, Hostname::new("fresh.example"))
                    .unwrap()
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_render, bench_add);
criterion_main!(benches);
