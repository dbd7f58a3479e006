use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use xlit_core::engine::transliterate_with;
use xlit_core::registry::MethodRegistry;

static INPUTS: &[(&str, &str)] = &[
    ("short", "Щука"),
    ("medium", "Съешь же ещё этих мягких французских булок, да выпей чаю."),
    (
        "long",
        "В чащах юга жил бы цитрус? Да, но фальшивый экземпляр! \
         ЧЕМЕЗОВ ШАРАПОВА ШАРАпова ЦЕЛИТЕЛЬ ЦЕЛИтЕЛЬ ЩЕЦИН. \
         Москва, Санкт-Петербург, Новосибирск, Екатеринбург, Нижний Новгород.",
    ),
];

static METHODS: &[&str] = &[
    "Russian (Cyrillic)-->English (IC)",
    "Russian (Cyrillic)-->English (ISO-9)",
    "Russian (Chinese Cyrillic)-->English (Pinyin)",
];

fn bench_methods(c: &mut Criterion) {
    let registry = MethodRegistry::builtin();
    for &id in METHODS {
        let Some(method) = registry.resolve(id) else {
            continue;
        };
        let mut group = c.benchmark_group(format!("transliterate/{}", method.display_name));
        for &(label, text) in INPUTS {
            group.bench_with_input(BenchmarkId::new(label, text.chars().count()), &text, |b, &text| {
                b.iter(|| transliterate_with(method, text, true));
            });
        }
        group.finish();
    }
}

fn bench_large_input(c: &mut Criterion) {
    let registry = MethodRegistry::builtin();
    let Some(method) = registry.resolve("Russian (Cyrillic)-->English (IC)") else {
        return;
    };
    let text = INPUTS[2].1.repeat(1000);
    c.bench_function("transliterate/ic_large", |b| {
        b.iter(|| transliterate_with(method, &text, false));
    });
}

criterion_group!(benches, bench_methods, bench_large_input);
criterion_main!(benches);
